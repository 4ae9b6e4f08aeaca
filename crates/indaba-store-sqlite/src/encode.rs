//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! All timestamps are stored as RFC 3339 strings, calendar dates as
//! `YYYY-MM-DD`, times of day as `HH:MM:SS`. Structured fields
//! (requirements, locations, contact) are stored as compact JSON. UUIDs are
//! stored as hyphenated lowercase strings.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use indaba_core::{
  alert::{Alert, AlertCategory, Severity},
  application::JobApplication,
  job::{ContactDetails, JobPosting},
  news::NewsArticle,
  update::{CommunityUpdate, UpdateCategory},
};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Scalars ─────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

pub fn encode_date(d: NaiveDate) -> String { d.format("%Y-%m-%d").to_string() }

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, "%Y-%m-%d")
    .map_err(|e| Error::DateParse(e.to_string()))
}

pub fn encode_time(t: NaiveTime) -> String { t.format("%H:%M:%S").to_string() }

pub fn decode_time(s: &str) -> Result<NaiveTime> {
  NaiveTime::parse_from_str(s, "%H:%M:%S")
    .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M"))
    .map_err(|e| Error::DateParse(e.to_string()))
}

pub fn encode_string_list(list: &[String]) -> Result<String> {
  Ok(serde_json::to_string(list)?)
}

pub fn decode_string_list(s: &str) -> Result<Vec<String>> {
  Ok(serde_json::from_str(s)?)
}

pub fn encode_contact(c: &ContactDetails) -> Result<String> {
  Ok(serde_json::to_string(c)?)
}

pub fn decode_contact(s: &str) -> Result<ContactDetails> {
  Ok(serde_json::from_str(s)?)
}

// ─── Raw rows ────────────────────────────────────────────────────────────────
//
// Intermediate structs holding column values exactly as SQLite hands them
// back; converted into domain records outside the connection closure.

pub struct RawUpdate {
  pub id:          String,
  pub title:       String,
  pub description: String,
  pub category:    String,
  pub date:        String,
  pub time:        String,
  pub location:    String,
  pub created_at:  String,
}

impl RawUpdate {
  pub fn into_update(self) -> Result<CommunityUpdate> {
    Ok(CommunityUpdate {
      id:          decode_uuid(&self.id)?,
      title:       self.title,
      description: self.description,
      category:    UpdateCategory::parse(&self.category).map_err(Error::Core)?,
      date:        decode_date(&self.date)?,
      time:        decode_time(&self.time)?,
      location:    self.location,
      created_at:  decode_dt(&self.created_at)?,
    })
  }
}

pub struct RawJob {
  pub id:              String,
  pub title:           String,
  pub description:     String,
  pub requirements:    String,
  pub employment_type: String,
  pub posted:          String,
  pub company:         String,
  pub salary:          String,
  pub location:        String,
  pub contact:         String,
  pub created_at:      String,
}

impl RawJob {
  pub fn into_job(self) -> Result<JobPosting> {
    Ok(JobPosting {
      id:              decode_uuid(&self.id)?,
      title:           self.title,
      description:     self.description,
      requirements:    decode_string_list(&self.requirements)?,
      employment_type: self.employment_type,
      posted:          self.posted,
      company:         self.company,
      salary:          self.salary,
      location:        self.location,
      contact:         decode_contact(&self.contact)?,
      created_at:      decode_dt(&self.created_at)?,
    })
  }
}

pub struct RawAlert {
  pub id:          String,
  pub title:       String,
  pub description: String,
  pub category:    String,
  pub severity:    String,
  pub icon:        String,
  pub posted:      String,
  pub timeline:    Option<String>,
  pub locations:   String,
  pub created_at:  String,
}

impl RawAlert {
  pub fn into_alert(self) -> Result<Alert> {
    Ok(Alert {
      id:          decode_uuid(&self.id)?,
      title:       self.title,
      description: self.description,
      category:    AlertCategory::parse(&self.category).map_err(Error::Core)?,
      severity:    Severity::parse(&self.severity).map_err(Error::Core)?,
      icon:        self.icon,
      posted:      self.posted,
      timeline:    self.timeline,
      locations:   decode_string_list(&self.locations)?,
      created_at:  decode_dt(&self.created_at)?,
    })
  }
}

pub struct RawArticle {
  pub id:         String,
  pub title:      String,
  pub content:    String,
  pub image:      Option<String>,
  pub video_link: Option<String>,
  pub featured:   bool,
  pub category:   String,
  pub author:     String,
  pub date:       String,
  pub summary:    String,
  pub created_at: String,
}

impl RawArticle {
  pub fn into_article(self) -> Result<NewsArticle> {
    Ok(NewsArticle {
      id:         decode_uuid(&self.id)?,
      title:      self.title,
      content:    self.content,
      image:      self.image,
      video_link: self.video_link,
      featured:   self.featured,
      category:   self.category,
      author:     self.author,
      date:       decode_date(&self.date)?,
      summary:    self.summary,
      created_at: decode_dt(&self.created_at)?,
    })
  }
}

pub struct RawApplication {
  pub id:           String,
  pub job_id:       String,
  pub name:         String,
  pub email:        String,
  pub cover_letter: String,
  pub resume_url:   Option<String>,
  pub created_at:   String,
}

impl RawApplication {
  pub fn into_application(self) -> Result<JobApplication> {
    Ok(JobApplication {
      id:           decode_uuid(&self.id)?,
      job_id:       decode_uuid(&self.job_id)?,
      name:         self.name,
      email:        self.email,
      cover_letter: self.cover_letter,
      resume_url:   self.resume_url,
      created_at:   decode_dt(&self.created_at)?,
    })
  }
}
