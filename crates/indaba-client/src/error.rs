//! Client-side error type.

use uuid::Uuid;

pub type Result<T, E = StoreError> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
  /// The server has no record with this id.
  #[error("no record with id {0}")]
  NotFound(Uuid),

  /// The session is missing, expired, or the credentials were wrong.
  #[error("not authorised")]
  Unauthorized,

  /// Any other non-success response from the server.
  #[error("server answered {status}: {message}")]
  Remote { status: u16, message: String },

  /// The request never completed (connection, timeout, body decode).
  #[error("transport error: {0}")]
  Transport(#[from] reqwest::Error),
}
