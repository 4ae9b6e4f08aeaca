//! Service alerts — outages, safety notices, and general warnings.
//!
//! The richer typed shape is canonical: category and severity are enums and
//! `locations` is always a list (empty when the alert is area-wide).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, Result};

/// What kind of disruption an alert describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertCategory {
  Water,
  Electricity,
  Crime,
  General,
}

impl AlertCategory {
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Water => "water",
      Self::Electricity => "electricity",
      Self::Crime => "crime",
      Self::General => "general",
    }
  }

  pub fn parse(s: &str) -> Result<Self> {
    match s {
      "water" => Ok(Self::Water),
      "electricity" => Ok(Self::Electricity),
      "crime" => Ok(Self::Crime),
      "general" => Ok(Self::General),
      other => Err(Error::UnknownCategory(other.to_owned())),
    }
  }
}

/// How urgent an alert is. `High` sorts first in public views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
  High,
  Medium,
  Low,
}

impl Severity {
  /// Sort rank; lower is more urgent.
  pub fn rank(self) -> u8 {
    match self {
      Self::High => 0,
      Self::Medium => 1,
      Self::Low => 2,
    }
  }

  pub fn as_str(self) -> &'static str {
    match self {
      Self::High => "high",
      Self::Medium => "medium",
      Self::Low => "low",
    }
  }

  pub fn parse(s: &str) -> Result<Self> {
    match s {
      "high" => Ok(Self::High),
      "medium" => Ok(Self::Medium),
      "low" => Ok(Self::Low),
      other => Err(Error::UnknownSeverity(other.to_owned())),
    }
  }
}

/// A public service alert.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alert {
  pub id:          Uuid,
  pub title:       String,
  pub description: String,
  pub category:    AlertCategory,
  pub severity:    Severity,
  /// Icon reference used by the rendering layer, e.g. "droplet".
  pub icon:        String,
  /// Human-readable display string, e.g. "Posted 1 hour ago".
  pub posted:      String,
  /// Expected resolution window, e.g. "08:00 - 16:00", when known.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub timeline:    Option<String>,
  /// Affected areas; empty means the whole community.
  #[serde(default)]
  pub locations:   Vec<String>,
  /// Backend-assigned at insert; never changes.
  pub created_at:  DateTime<Utc>,
}

/// Input to [`ContentBackend::insert_alert`](crate::backend::ContentBackend::insert_alert).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAlert {
  pub title:       String,
  pub description: String,
  pub category:    AlertCategory,
  pub severity:    Severity,
  pub icon:        String,
  pub posted:      String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub timeline:    Option<String>,
  #[serde(default)]
  pub locations:   Vec<String>,
}

/// Partial update; a `None` field is left untouched. A patch cannot unset
/// `timeline` — replacing it requires a new value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AlertPatch {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub title:       Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub description: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub category:    Option<AlertCategory>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub severity:    Option<Severity>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub icon:        Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub posted:      Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub timeline:    Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub locations:   Option<Vec<String>>,
}

impl AlertPatch {
  pub fn is_empty(&self) -> bool {
    self.title.is_none()
      && self.description.is_none()
      && self.category.is_none()
      && self.severity.is_none()
      && self.icon.is_none()
      && self.posted.is_none()
      && self.timeline.is_none()
      && self.locations.is_none()
  }

  /// Apply this patch to `record`, replacing only the present fields.
  pub fn apply(&self, record: &mut Alert) {
    if let Some(v) = &self.title {
      record.title = v.clone();
    }
    if let Some(v) = &self.description {
      record.description = v.clone();
    }
    if let Some(v) = self.category {
      record.category = v;
    }
    if let Some(v) = self.severity {
      record.severity = v;
    }
    if let Some(v) = &self.icon {
      record.icon = v.clone();
    }
    if let Some(v) = &self.posted {
      record.posted = v.clone();
    }
    if let Some(v) = &self.timeline {
      record.timeline = Some(v.clone());
    }
    if let Some(v) = &self.locations {
      record.locations = v.clone();
    }
  }
}
