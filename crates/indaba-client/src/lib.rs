//! Typed client of the Indaba content service.
//!
//! [`RemoteBackend`] speaks the JSON API over HTTP; [`ContentStore`] wraps
//! any backend in an in-memory cache of all four content collections and
//! keeps that cache consistent with confirmed server results.

pub mod error;
pub mod http;
pub mod store;

pub use error::{Result, StoreError};
pub use http::RemoteBackend;
pub use store::ContentStore;

use std::future::Future;

use indaba_core::backend::ContentBackend;

/// Session management on top of [`ContentBackend`].
///
/// The content trait covers data; this covers the admin session the
/// mutating half of the store needs.
pub trait SessionBackend: ContentBackend {
  /// Authenticate. `Ok(false)` means the credentials were rejected, which
  /// is an expected outcome rather than an error.
  fn login<'a>(
    &'a self,
    email: &'a str,
    password: &'a str,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + 'a;

  fn logout(&self) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Email of the currently authenticated admin, if any.
  fn current_user(
    &self,
  ) -> impl Future<Output = Result<Option<String>, Self::Error>> + Send + '_;
}
