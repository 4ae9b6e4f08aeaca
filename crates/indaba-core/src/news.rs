//! News articles.
//!
//! `content` is an HTML body. It is untrusted input: the service layer must
//! run it through [`crate::sanitize::clean_html`] before storing it, so that
//! the rendering layer can inject it verbatim.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A published news article.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsArticle {
  pub id:         Uuid,
  pub title:      String,
  /// Sanitized HTML body.
  pub content:    String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub image:      Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub video_link: Option<String>,
  #[serde(default)]
  pub featured:   bool,
  pub category:   String,
  pub author:     String,
  /// Publish date shown to readers; distinct from `created_at`.
  pub date:       NaiveDate,
  pub summary:    String,
  /// Backend-assigned at insert; never changes.
  pub created_at: DateTime<Utc>,
}

/// Input to [`ContentBackend::insert_article`](crate::backend::ContentBackend::insert_article).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewArticle {
  pub title:      String,
  pub content:    String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub image:      Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub video_link: Option<String>,
  #[serde(default)]
  pub featured:   bool,
  pub category:   String,
  pub author:     String,
  pub date:       NaiveDate,
  pub summary:    String,
}

/// Partial update; a `None` field is left untouched. A patch cannot unset
/// `image` or `video_link`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArticlePatch {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub title:      Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub content:    Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub image:      Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub video_link: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub featured:   Option<bool>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub category:   Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub author:     Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub date:       Option<NaiveDate>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub summary:    Option<String>,
}

impl ArticlePatch {
  pub fn is_empty(&self) -> bool {
    self.title.is_none()
      && self.content.is_none()
      && self.image.is_none()
      && self.video_link.is_none()
      && self.featured.is_none()
      && self.category.is_none()
      && self.author.is_none()
      && self.date.is_none()
      && self.summary.is_none()
  }

  /// Apply this patch to `record`, replacing only the present fields.
  pub fn apply(&self, record: &mut NewsArticle) {
    if let Some(v) = &self.title {
      record.title = v.clone();
    }
    if let Some(v) = &self.content {
      record.content = v.clone();
    }
    if let Some(v) = &self.image {
      record.image = Some(v.clone());
    }
    if let Some(v) = &self.video_link {
      record.video_link = Some(v.clone());
    }
    if let Some(v) = self.featured {
      record.featured = v;
    }
    if let Some(v) = &self.category {
      record.category = v.clone();
    }
    if let Some(v) = &self.author {
      record.author = v.clone();
    }
    if let Some(v) = self.date {
      record.date = v;
    }
    if let Some(v) = &self.summary {
      record.summary = v.clone();
    }
  }
}
