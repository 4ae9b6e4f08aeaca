//! Community updates — scheduled events announced by the admin team.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, Result};

/// What kind of event an update announces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpdateCategory {
  Meeting,
  Gathering,
  Funeral,
  Wedding,
  Party,
}

impl UpdateCategory {
  /// The discriminant string stored in the `category` column.
  /// Must match the `rename_all = "lowercase"` serde tags above.
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Meeting => "meeting",
      Self::Gathering => "gathering",
      Self::Funeral => "funeral",
      Self::Wedding => "wedding",
      Self::Party => "party",
    }
  }

  pub fn parse(s: &str) -> Result<Self> {
    match s {
      "meeting" => Ok(Self::Meeting),
      "gathering" => Ok(Self::Gathering),
      "funeral" => Ok(Self::Funeral),
      "wedding" => Ok(Self::Wedding),
      "party" => Ok(Self::Party),
      other => Err(Error::UnknownCategory(other.to_owned())),
    }
  }
}

/// A scheduled community event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommunityUpdate {
  pub id:          Uuid,
  pub title:       String,
  pub description: String,
  pub category:    UpdateCategory,
  /// When the event takes place (local calendar date).
  pub date:        NaiveDate,
  pub time:        NaiveTime,
  pub location:    String,
  /// Backend-assigned at insert; never changes.
  pub created_at:  DateTime<Utc>,
}

/// Input to [`ContentBackend::insert_update`](crate::backend::ContentBackend::insert_update).
/// `id` and `created_at` are always assigned by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUpdate {
  pub title:       String,
  pub description: String,
  pub category:    UpdateCategory,
  pub date:        NaiveDate,
  pub time:        NaiveTime,
  pub location:    String,
}

/// Partial update; a `None` field is left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePatch {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub title:       Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub description: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub category:    Option<UpdateCategory>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub date:        Option<NaiveDate>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub time:        Option<NaiveTime>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub location:    Option<String>,
}

impl UpdatePatch {
  /// True when every field is `None` — applying it would change nothing.
  pub fn is_empty(&self) -> bool {
    self.title.is_none()
      && self.description.is_none()
      && self.category.is_none()
      && self.date.is_none()
      && self.time.is_none()
      && self.location.is_none()
  }

  /// Apply this patch to `record`, replacing only the present fields.
  pub fn apply(&self, record: &mut CommunityUpdate) {
    if let Some(v) = &self.title {
      record.title = v.clone();
    }
    if let Some(v) = &self.description {
      record.description = v.clone();
    }
    if let Some(v) = self.category {
      record.category = v;
    }
    if let Some(v) = self.date {
      record.date = v;
    }
    if let Some(v) = self.time {
      record.time = v;
    }
    if let Some(v) = &self.location {
      record.location = v.clone();
    }
  }
}
