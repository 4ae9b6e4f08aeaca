//! The `ContentBackend` trait — the Remote Content Service boundary.
//!
//! The trait is implemented by storage backends (`indaba-store-sqlite`) and
//! by the HTTP client (`indaba-client`). Higher layers depend on this
//! abstraction, not on any concrete backend.
//!
//! Every `list_*` returns rows ordered by `created_at` descending (newest
//! first). Every `patch_*` returns `Ok(None)` when the id does not exist —
//! a patch never creates a record. Every `delete_*` reports whether a row
//! was actually removed.

use std::future::Future;

use uuid::Uuid;

use crate::{
  alert::{Alert, AlertPatch, NewAlert},
  application::{JobApplication, NewApplication},
  job::{JobPatch, JobPosting, NewJob},
  news::{ArticlePatch, NewArticle, NewsArticle},
  update::{CommunityUpdate, NewUpdate, UpdatePatch},
};

/// Abstraction over the hosted content service.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait ContentBackend: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Community updates ─────────────────────────────────────────────────

  fn list_updates(
    &self,
  ) -> impl Future<Output = Result<Vec<CommunityUpdate>, Self::Error>> + Send + '_;

  fn get_update(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<CommunityUpdate>, Self::Error>> + Send + '_;

  /// Persist a new update; the backend assigns `id` and `created_at` and
  /// returns the fully-populated row.
  fn insert_update(
    &self,
    draft: NewUpdate,
  ) -> impl Future<Output = Result<CommunityUpdate, Self::Error>> + Send + '_;

  fn patch_update(
    &self,
    id: Uuid,
    patch: UpdatePatch,
  ) -> impl Future<Output = Result<Option<CommunityUpdate>, Self::Error>> + Send + '_;

  fn delete_update(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  // ── Jobs ──────────────────────────────────────────────────────────────

  fn list_jobs(
    &self,
  ) -> impl Future<Output = Result<Vec<JobPosting>, Self::Error>> + Send + '_;

  fn get_job(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<JobPosting>, Self::Error>> + Send + '_;

  fn insert_job(
    &self,
    draft: NewJob,
  ) -> impl Future<Output = Result<JobPosting, Self::Error>> + Send + '_;

  fn patch_job(
    &self,
    id: Uuid,
    patch: JobPatch,
  ) -> impl Future<Output = Result<Option<JobPosting>, Self::Error>> + Send + '_;

  fn delete_job(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  // ── Alerts ────────────────────────────────────────────────────────────

  fn list_alerts(
    &self,
  ) -> impl Future<Output = Result<Vec<Alert>, Self::Error>> + Send + '_;

  fn get_alert(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Alert>, Self::Error>> + Send + '_;

  fn insert_alert(
    &self,
    draft: NewAlert,
  ) -> impl Future<Output = Result<Alert, Self::Error>> + Send + '_;

  fn patch_alert(
    &self,
    id: Uuid,
    patch: AlertPatch,
  ) -> impl Future<Output = Result<Option<Alert>, Self::Error>> + Send + '_;

  fn delete_alert(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  // ── News ──────────────────────────────────────────────────────────────

  fn list_articles(
    &self,
  ) -> impl Future<Output = Result<Vec<NewsArticle>, Self::Error>> + Send + '_;

  fn get_article(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<NewsArticle>, Self::Error>> + Send + '_;

  fn insert_article(
    &self,
    draft: NewArticle,
  ) -> impl Future<Output = Result<NewsArticle, Self::Error>> + Send + '_;

  fn patch_article(
    &self,
    id: Uuid,
    patch: ArticlePatch,
  ) -> impl Future<Output = Result<Option<NewsArticle>, Self::Error>> + Send + '_;

  fn delete_article(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  // ── Job applications ──────────────────────────────────────────────────

  fn insert_application(
    &self,
    draft: NewApplication,
  ) -> impl Future<Output = Result<JobApplication, Self::Error>> + Send + '_;

  fn list_applications(
    &self,
  ) -> impl Future<Output = Result<Vec<JobApplication>, Self::Error>> + Send + '_;

  // ── Identity ──────────────────────────────────────────────────────────

  /// Look up the stored argon2 PHC hash for an admin account. `None` means
  /// the account does not exist; the caller must not distinguish the two
  /// failure modes to the outside.
  fn admin_password_hash<'a>(
    &'a self,
    email: &'a str,
  ) -> impl Future<Output = Result<Option<String>, Self::Error>> + Send + 'a;
}
