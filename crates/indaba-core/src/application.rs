//! Job applications submitted by the public through the apply form.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A submitted application. Never edited after insert; admins read them out
/// of band.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobApplication {
  pub id:           Uuid,
  pub job_id:       Uuid,
  pub name:         String,
  pub email:        String,
  pub cover_letter: String,
  /// Public URL of the uploaded résumé, when one was attached.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub resume_url:   Option<String>,
  pub created_at:   DateTime<Utc>,
}

/// Input to [`ContentBackend::insert_application`](crate::backend::ContentBackend::insert_application).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewApplication {
  pub job_id:       Uuid,
  pub name:         String,
  pub email:        String,
  #[serde(default)]
  pub cover_letter: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub resume_url:   Option<String>,
}
