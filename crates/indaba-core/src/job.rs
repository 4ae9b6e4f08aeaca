//! Job postings.
//!
//! Requirements are canonically a list of strings — the legacy flat
//! `contact_details` string and string-valued requirements are not carried.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// How to reach the employer about a posting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactDetails {
  pub phone: String,
  pub email: String,
}

/// An open position posted by a local employer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobPosting {
  pub id:              Uuid,
  pub title:           String,
  pub description:     String,
  pub requirements:    Vec<String>,
  /// Free text, e.g. "Full-time", "Contract".
  pub employment_type: String,
  /// Human-readable display string, e.g. "2 days ago".
  pub posted:          String,
  pub company:         String,
  pub salary:          String,
  pub location:        String,
  pub contact:         ContactDetails,
  /// Backend-assigned at insert; never changes.
  pub created_at:      DateTime<Utc>,
}

/// Input to [`ContentBackend::insert_job`](crate::backend::ContentBackend::insert_job).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewJob {
  pub title:           String,
  pub description:     String,
  #[serde(default)]
  pub requirements:    Vec<String>,
  pub employment_type: String,
  pub posted:          String,
  pub company:         String,
  pub salary:          String,
  pub location:        String,
  #[serde(default)]
  pub contact:         ContactDetails,
}

/// Partial update; a `None` field is left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobPatch {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub title:           Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub description:     Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub requirements:    Option<Vec<String>>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub employment_type: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub posted:          Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub company:         Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub salary:          Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub location:        Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub contact:         Option<ContactDetails>,
}

impl JobPatch {
  pub fn is_empty(&self) -> bool {
    self.title.is_none()
      && self.description.is_none()
      && self.requirements.is_none()
      && self.employment_type.is_none()
      && self.posted.is_none()
      && self.company.is_none()
      && self.salary.is_none()
      && self.location.is_none()
      && self.contact.is_none()
  }

  /// Apply this patch to `record`, replacing only the present fields.
  pub fn apply(&self, record: &mut JobPosting) {
    if let Some(v) = &self.title {
      record.title = v.clone();
    }
    if let Some(v) = &self.description {
      record.description = v.clone();
    }
    if let Some(v) = &self.requirements {
      record.requirements = v.clone();
    }
    if let Some(v) = &self.employment_type {
      record.employment_type = v.clone();
    }
    if let Some(v) = &self.posted {
      record.posted = v.clone();
    }
    if let Some(v) = &self.company {
      record.company = v.clone();
    }
    if let Some(v) = &self.salary {
      record.salary = v.clone();
    }
    if let Some(v) = &self.location {
      record.location = v.clone();
    }
    if let Some(v) = &self.contact {
      record.contact = v.clone();
    }
  }
}
