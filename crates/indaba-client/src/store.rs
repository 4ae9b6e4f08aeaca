//! In-memory content cache over a [`SessionBackend`].
//!
//! The store holds all four collections and mutates them only on confirmed
//! backend success: adds prepend the server's returned row, updates replace
//! the cached record wholesale with the server's copy, deletes drop the row
//! only after the server confirms removal. A failed call always leaves the
//! cache exactly as it was and reports the error.
//!
//! There is no queuing, retrying, or cross-call coordination; concurrent
//! writers are last-write-wins at the server.

use indaba_core::{
  alert::{Alert, AlertPatch, NewAlert},
  application::{JobApplication, NewApplication},
  job::{JobPatch, JobPosting, NewJob},
  news::{ArticlePatch, NewArticle, NewsArticle},
  update::{CommunityUpdate, NewUpdate, UpdatePatch},
};
use uuid::Uuid;

use crate::{Result, SessionBackend, StoreError};

/// Client-side cache of the four content collections plus the session flag.
pub struct ContentStore<B> {
  backend: B,

  pub updates:  Vec<CommunityUpdate>,
  pub jobs:     Vec<JobPosting>,
  pub alerts:   Vec<Alert>,
  pub articles: Vec<NewsArticle>,

  /// Whether an admin session is currently live.
  pub authenticated: bool,
}

impl<B> ContentStore<B>
where
  B: SessionBackend<Error = StoreError>,
{
  pub fn new(backend: B) -> Self {
    Self {
      backend,
      updates: Vec::new(),
      jobs: Vec::new(),
      alerts: Vec::new(),
      articles: Vec::new(),
      authenticated: false,
    }
  }

  // ── Loading ───────────────────────────────────────────────────────────────

  /// Fetch every collection and the session state concurrently.
  ///
  /// Failures are swallowed: a collection whose fetch failed is left empty
  /// and the error is logged. `load` never raises and never retries.
  pub async fn load(&mut self) {
    let (updates, jobs, alerts, articles, user) = tokio::join!(
      self.backend.list_updates(),
      self.backend.list_jobs(),
      self.backend.list_alerts(),
      self.backend.list_articles(),
      self.backend.current_user(),
    );

    self.updates = unwrap_or_empty(updates, "updates");
    self.jobs = unwrap_or_empty(jobs, "jobs");
    self.alerts = unwrap_or_empty(alerts, "alerts");
    self.articles = unwrap_or_empty(articles, "articles");
    self.authenticated = match user {
      Ok(user) => user.is_some(),
      Err(e) => {
        tracing::warn!(error = %e, "session check failed");
        false
      }
    };
  }

  // ── Community updates ─────────────────────────────────────────────────────

  /// Persist a new update; on success the server's row lands at the front
  /// of the cache (newest first, no re-fetch).
  pub async fn add_update(&mut self, draft: NewUpdate) -> Result<&CommunityUpdate> {
    let record = self.backend.insert_update(draft).await?;
    self.updates.insert(0, record);
    Ok(&self.updates[0])
  }

  /// Apply a partial update; on success the server's full row replaces the
  /// cached one. An unknown id is [`StoreError::NotFound`] and changes
  /// nothing, locally or remotely.
  pub async fn update_update(
    &mut self,
    id: Uuid,
    patch: UpdatePatch,
  ) -> Result<&CommunityUpdate> {
    let record = self
      .backend
      .patch_update(id, patch)
      .await?
      .ok_or(StoreError::NotFound(id))?;
    Ok(replace_by_id(&mut self.updates, record, |r| r.id))
  }

  /// Remove an update. The cache drops the row only once the server has
  /// confirmed the removal.
  pub async fn delete_update(&mut self, id: Uuid) -> Result<()> {
    if !self.backend.delete_update(id).await? {
      return Err(StoreError::NotFound(id));
    }
    self.updates.retain(|r| r.id != id);
    Ok(())
  }

  // ── Jobs ──────────────────────────────────────────────────────────────────

  pub async fn add_job(&mut self, draft: NewJob) -> Result<&JobPosting> {
    let record = self.backend.insert_job(draft).await?;
    self.jobs.insert(0, record);
    Ok(&self.jobs[0])
  }

  pub async fn update_job(&mut self, id: Uuid, patch: JobPatch) -> Result<&JobPosting> {
    let record = self
      .backend
      .patch_job(id, patch)
      .await?
      .ok_or(StoreError::NotFound(id))?;
    Ok(replace_by_id(&mut self.jobs, record, |r| r.id))
  }

  pub async fn delete_job(&mut self, id: Uuid) -> Result<()> {
    if !self.backend.delete_job(id).await? {
      return Err(StoreError::NotFound(id));
    }
    self.jobs.retain(|r| r.id != id);
    Ok(())
  }

  // ── Alerts ────────────────────────────────────────────────────────────────

  pub async fn add_alert(&mut self, draft: NewAlert) -> Result<&Alert> {
    let record = self.backend.insert_alert(draft).await?;
    self.alerts.insert(0, record);
    Ok(&self.alerts[0])
  }

  pub async fn update_alert(&mut self, id: Uuid, patch: AlertPatch) -> Result<&Alert> {
    let record = self
      .backend
      .patch_alert(id, patch)
      .await?
      .ok_or(StoreError::NotFound(id))?;
    Ok(replace_by_id(&mut self.alerts, record, |r| r.id))
  }

  pub async fn delete_alert(&mut self, id: Uuid) -> Result<()> {
    if !self.backend.delete_alert(id).await? {
      return Err(StoreError::NotFound(id));
    }
    self.alerts.retain(|r| r.id != id);
    Ok(())
  }

  // ── News ──────────────────────────────────────────────────────────────────

  pub async fn add_article(&mut self, draft: NewArticle) -> Result<&NewsArticle> {
    let record = self.backend.insert_article(draft).await?;
    self.articles.insert(0, record);
    Ok(&self.articles[0])
  }

  pub async fn update_article(
    &mut self,
    id: Uuid,
    patch: ArticlePatch,
  ) -> Result<&NewsArticle> {
    let record = self
      .backend
      .patch_article(id, patch)
      .await?
      .ok_or(StoreError::NotFound(id))?;
    Ok(replace_by_id(&mut self.articles, record, |r| r.id))
  }

  pub async fn delete_article(&mut self, id: Uuid) -> Result<()> {
    if !self.backend.delete_article(id).await? {
      return Err(StoreError::NotFound(id));
    }
    self.articles.retain(|r| r.id != id);
    Ok(())
  }

  // ── Applications ──────────────────────────────────────────────────────────

  /// Submit a job application. Applications are not cached; the form only
  /// needs the confirmation.
  pub async fn submit_application(
    &self,
    draft: NewApplication,
  ) -> Result<JobApplication> {
    self.backend.insert_application(draft).await
  }

  // ── Session ───────────────────────────────────────────────────────────────

  /// Authenticate. Bad credentials are `Ok(false)`, not an error.
  pub async fn login(&mut self, email: &str, password: &str) -> Result<bool> {
    let ok = self.backend.login(email, password).await?;
    self.authenticated = ok;
    Ok(ok)
  }

  /// End the session. The local flag clears even when the remote call
  /// fails; a dead server must not keep the client logged in.
  pub async fn logout(&mut self) {
    if let Err(e) = self.backend.logout().await {
      tracing::warn!(error = %e, "logout failed remotely");
    }
    self.authenticated = false;
  }
}

fn unwrap_or_empty<T>(result: Result<Vec<T>>, what: &str) -> Vec<T> {
  match result {
    Ok(rows) => rows,
    Err(e) => {
      tracing::warn!(collection = what, error = %e, "load failed");
      Vec::new()
    }
  }
}

/// Swap the cached record with the same id for `record`; prepend when the
/// cache has no copy yet. Returns a reference to the stored record.
fn replace_by_id<T>(cache: &mut Vec<T>, record: T, id_of: impl Fn(&T) -> Uuid) -> &T {
  let id = id_of(&record);
  match cache.iter().position(|r| id_of(r) == id) {
    Some(pos) => {
      cache[pos] = record;
      &cache[pos]
    }
    None => {
      cache.insert(0, record);
      &cache[0]
    }
  }
}
