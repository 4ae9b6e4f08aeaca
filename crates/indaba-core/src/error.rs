//! Error types for `indaba-core`.

use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum Error {
  #[error("record not found: {0}")]
  RecordNotFound(Uuid),

  #[error("unknown category: {0:?}")]
  UnknownCategory(String),

  #[error("unknown severity: {0:?}")]
  UnknownSeverity(String),

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
