//! [`SqliteStore`] — the SQLite implementation of [`ContentBackend`].

use std::path::Path;

use chrono::Utc;
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use indaba_core::{
  alert::{Alert, AlertPatch, NewAlert},
  application::{JobApplication, NewApplication},
  backend::ContentBackend,
  job::{JobPatch, JobPosting, NewJob},
  news::{ArticlePatch, NewArticle, NewsArticle},
  update::{CommunityUpdate, NewUpdate, UpdatePatch},
};

use crate::{
  encode::{
    encode_contact, encode_date, encode_dt, encode_string_list, encode_time,
    encode_uuid, RawAlert, RawApplication, RawArticle, RawJob, RawUpdate,
  },
  schema::SCHEMA,
  Error, Result,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// An Indaba content store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  // ── Admin accounts ────────────────────────────────────────────────────────

  /// Create or replace an admin account. `password_hash` is an argon2 PHC
  /// string; plaintext never reaches the store.
  pub async fn create_admin(&self, email: &str, password_hash: &str) -> Result<()> {
    let email = email.to_owned();
    let hash = password_hash.to_owned();
    let at = encode_dt(Utc::now());

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO admin_users (email, password_hash, created_at)
           VALUES (?1, ?2, ?3)
           ON CONFLICT (email) DO UPDATE SET password_hash = ?2",
          rusqlite::params![email, hash, at],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  // ── Row writers ───────────────────────────────────────────────────────────
  //
  // Insert and patch both end in a full-row write; `INSERT OR REPLACE`
  // keeps a single code path per table.

  async fn write_update(&self, record: &CommunityUpdate) -> Result<()> {
    let id          = encode_uuid(record.id);
    let title       = record.title.clone();
    let description = record.description.clone();
    let category    = record.category.as_str().to_owned();
    let date        = encode_date(record.date);
    let time        = encode_time(record.time);
    let location    = record.location.clone();
    let created_at  = encode_dt(record.created_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT OR REPLACE INTO community_updates
             (id, title, description, category, date, time, location, created_at)
           VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
          rusqlite::params![
            id, title, description, category, date, time, location, created_at,
          ],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn write_job(&self, record: &JobPosting) -> Result<()> {
    let id              = encode_uuid(record.id);
    let title           = record.title.clone();
    let description     = record.description.clone();
    let requirements    = encode_string_list(&record.requirements)?;
    let employment_type = record.employment_type.clone();
    let posted          = record.posted.clone();
    let company         = record.company.clone();
    let salary          = record.salary.clone();
    let location        = record.location.clone();
    let contact         = encode_contact(&record.contact)?;
    let created_at      = encode_dt(record.created_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT OR REPLACE INTO jobs
             (id, title, description, requirements, employment_type, posted,
              company, salary, location, contact, created_at)
           VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
          rusqlite::params![
            id, title, description, requirements, employment_type, posted,
            company, salary, location, contact, created_at,
          ],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn write_alert(&self, record: &Alert) -> Result<()> {
    let id          = encode_uuid(record.id);
    let title       = record.title.clone();
    let description = record.description.clone();
    let category    = record.category.as_str().to_owned();
    let severity    = record.severity.as_str().to_owned();
    let icon        = record.icon.clone();
    let posted      = record.posted.clone();
    let timeline    = record.timeline.clone();
    let locations   = encode_string_list(&record.locations)?;
    let created_at  = encode_dt(record.created_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT OR REPLACE INTO alerts
             (id, title, description, category, severity, icon, posted,
              timeline, locations, created_at)
           VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
          rusqlite::params![
            id, title, description, category, severity, icon, posted,
            timeline, locations, created_at,
          ],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn write_article(&self, record: &NewsArticle) -> Result<()> {
    let id         = encode_uuid(record.id);
    let title      = record.title.clone();
    let content    = record.content.clone();
    let image      = record.image.clone();
    let video_link = record.video_link.clone();
    let featured   = record.featured;
    let category   = record.category.clone();
    let author     = record.author.clone();
    let date       = encode_date(record.date);
    let summary    = record.summary.clone();
    let created_at = encode_dt(record.created_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT OR REPLACE INTO news
             (id, title, content, image, video_link, featured, category,
              author, date, summary, created_at)
           VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
          rusqlite::params![
            id, title, content, image, video_link, featured, category,
            author, date, summary, created_at,
          ],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn delete_row(&self, table: &'static str, id: Uuid) -> Result<bool> {
    let id_str = encode_uuid(id);
    let affected: usize = self
      .conn
      .call(move |conn| {
        let n = conn.execute(
          &format!("DELETE FROM {table} WHERE id = ?1"),
          rusqlite::params![id_str],
        )?;
        Ok(n)
      })
      .await?;
    Ok(affected > 0)
  }
}

// ─── ContentBackend impl ─────────────────────────────────────────────────────

impl ContentBackend for SqliteStore {
  type Error = Error;

  // ── Community updates ─────────────────────────────────────────────────────

  async fn list_updates(&self) -> Result<Vec<CommunityUpdate>> {
    let raws: Vec<RawUpdate> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT id, title, description, category, date, time, location, created_at
           FROM community_updates ORDER BY created_at DESC, rowid DESC",
        )?;
        let rows = stmt
          .query_map([], |row| {
            Ok(RawUpdate {
              id:          row.get(0)?,
              title:       row.get(1)?,
              description: row.get(2)?,
              category:    row.get(3)?,
              date:        row.get(4)?,
              time:        row.get(5)?,
              location:    row.get(6)?,
              created_at:  row.get(7)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawUpdate::into_update).collect()
  }

  async fn get_update(&self, id: Uuid) -> Result<Option<CommunityUpdate>> {
    let id_str = encode_uuid(id);
    let raw: Option<RawUpdate> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            "SELECT id, title, description, category, date, time, location, created_at
             FROM community_updates WHERE id = ?1",
            rusqlite::params![id_str],
            |row| {
              Ok(RawUpdate {
                id:          row.get(0)?,
                title:       row.get(1)?,
                description: row.get(2)?,
                category:    row.get(3)?,
                date:        row.get(4)?,
                time:        row.get(5)?,
                location:    row.get(6)?,
                created_at:  row.get(7)?,
              })
            },
          )
          .optional()?)
      })
      .await?;

    raw.map(RawUpdate::into_update).transpose()
  }

  async fn insert_update(&self, draft: NewUpdate) -> Result<CommunityUpdate> {
    let record = CommunityUpdate {
      id:          Uuid::new_v4(),
      title:       draft.title,
      description: draft.description,
      category:    draft.category,
      date:        draft.date,
      time:        draft.time,
      location:    draft.location,
      created_at:  Utc::now(),
    };
    self.write_update(&record).await?;
    Ok(record)
  }

  async fn patch_update(
    &self,
    id: Uuid,
    patch: UpdatePatch,
  ) -> Result<Option<CommunityUpdate>> {
    let Some(mut record) = self.get_update(id).await? else {
      return Ok(None);
    };
    patch.apply(&mut record);
    self.write_update(&record).await?;
    Ok(Some(record))
  }

  async fn delete_update(&self, id: Uuid) -> Result<bool> {
    self.delete_row("community_updates", id).await
  }

  // ── Jobs ──────────────────────────────────────────────────────────────────

  async fn list_jobs(&self) -> Result<Vec<JobPosting>> {
    let raws: Vec<RawJob> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT id, title, description, requirements, employment_type, posted,
                  company, salary, location, contact, created_at
           FROM jobs ORDER BY created_at DESC, rowid DESC",
        )?;
        let rows = stmt
          .query_map([], |row| {
            Ok(RawJob {
              id:              row.get(0)?,
              title:           row.get(1)?,
              description:     row.get(2)?,
              requirements:    row.get(3)?,
              employment_type: row.get(4)?,
              posted:          row.get(5)?,
              company:         row.get(6)?,
              salary:          row.get(7)?,
              location:        row.get(8)?,
              contact:         row.get(9)?,
              created_at:      row.get(10)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawJob::into_job).collect()
  }

  async fn get_job(&self, id: Uuid) -> Result<Option<JobPosting>> {
    let id_str = encode_uuid(id);
    let raw: Option<RawJob> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            "SELECT id, title, description, requirements, employment_type, posted,
                    company, salary, location, contact, created_at
             FROM jobs WHERE id = ?1",
            rusqlite::params![id_str],
            |row| {
              Ok(RawJob {
                id:              row.get(0)?,
                title:           row.get(1)?,
                description:     row.get(2)?,
                requirements:    row.get(3)?,
                employment_type: row.get(4)?,
                posted:          row.get(5)?,
                company:         row.get(6)?,
                salary:          row.get(7)?,
                location:        row.get(8)?,
                contact:         row.get(9)?,
                created_at:      row.get(10)?,
              })
            },
          )
          .optional()?)
      })
      .await?;

    raw.map(RawJob::into_job).transpose()
  }

  async fn insert_job(&self, draft: NewJob) -> Result<JobPosting> {
    let record = JobPosting {
      id:              Uuid::new_v4(),
      title:           draft.title,
      description:     draft.description,
      requirements:    draft.requirements,
      employment_type: draft.employment_type,
      posted:          draft.posted,
      company:         draft.company,
      salary:          draft.salary,
      location:        draft.location,
      contact:         draft.contact,
      created_at:      Utc::now(),
    };
    self.write_job(&record).await?;
    Ok(record)
  }

  async fn patch_job(&self, id: Uuid, patch: JobPatch) -> Result<Option<JobPosting>> {
    let Some(mut record) = self.get_job(id).await? else {
      return Ok(None);
    };
    patch.apply(&mut record);
    self.write_job(&record).await?;
    Ok(Some(record))
  }

  async fn delete_job(&self, id: Uuid) -> Result<bool> {
    self.delete_row("jobs", id).await
  }

  // ── Alerts ────────────────────────────────────────────────────────────────

  async fn list_alerts(&self) -> Result<Vec<Alert>> {
    let raws: Vec<RawAlert> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT id, title, description, category, severity, icon, posted,
                  timeline, locations, created_at
           FROM alerts ORDER BY created_at DESC, rowid DESC",
        )?;
        let rows = stmt
          .query_map([], |row| {
            Ok(RawAlert {
              id:          row.get(0)?,
              title:       row.get(1)?,
              description: row.get(2)?,
              category:    row.get(3)?,
              severity:    row.get(4)?,
              icon:        row.get(5)?,
              posted:      row.get(6)?,
              timeline:    row.get(7)?,
              locations:   row.get(8)?,
              created_at:  row.get(9)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawAlert::into_alert).collect()
  }

  async fn get_alert(&self, id: Uuid) -> Result<Option<Alert>> {
    let id_str = encode_uuid(id);
    let raw: Option<RawAlert> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            "SELECT id, title, description, category, severity, icon, posted,
                    timeline, locations, created_at
             FROM alerts WHERE id = ?1",
            rusqlite::params![id_str],
            |row| {
              Ok(RawAlert {
                id:          row.get(0)?,
                title:       row.get(1)?,
                description: row.get(2)?,
                category:    row.get(3)?,
                severity:    row.get(4)?,
                icon:        row.get(5)?,
                posted:      row.get(6)?,
                timeline:    row.get(7)?,
                locations:   row.get(8)?,
                created_at:  row.get(9)?,
              })
            },
          )
          .optional()?)
      })
      .await?;

    raw.map(RawAlert::into_alert).transpose()
  }

  async fn insert_alert(&self, draft: NewAlert) -> Result<Alert> {
    let record = Alert {
      id:          Uuid::new_v4(),
      title:       draft.title,
      description: draft.description,
      category:    draft.category,
      severity:    draft.severity,
      icon:        draft.icon,
      posted:      draft.posted,
      timeline:    draft.timeline,
      locations:   draft.locations,
      created_at:  Utc::now(),
    };
    self.write_alert(&record).await?;
    Ok(record)
  }

  async fn patch_alert(&self, id: Uuid, patch: AlertPatch) -> Result<Option<Alert>> {
    let Some(mut record) = self.get_alert(id).await? else {
      return Ok(None);
    };
    patch.apply(&mut record);
    self.write_alert(&record).await?;
    Ok(Some(record))
  }

  async fn delete_alert(&self, id: Uuid) -> Result<bool> {
    self.delete_row("alerts", id).await
  }

  // ── News ──────────────────────────────────────────────────────────────────

  async fn list_articles(&self) -> Result<Vec<NewsArticle>> {
    let raws: Vec<RawArticle> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT id, title, content, image, video_link, featured, category,
                  author, date, summary, created_at
           FROM news ORDER BY created_at DESC, rowid DESC",
        )?;
        let rows = stmt
          .query_map([], |row| {
            Ok(RawArticle {
              id:         row.get(0)?,
              title:      row.get(1)?,
              content:    row.get(2)?,
              image:      row.get(3)?,
              video_link: row.get(4)?,
              featured:   row.get(5)?,
              category:   row.get(6)?,
              author:     row.get(7)?,
              date:       row.get(8)?,
              summary:    row.get(9)?,
              created_at: row.get(10)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawArticle::into_article).collect()
  }

  async fn get_article(&self, id: Uuid) -> Result<Option<NewsArticle>> {
    let id_str = encode_uuid(id);
    let raw: Option<RawArticle> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            "SELECT id, title, content, image, video_link, featured, category,
                    author, date, summary, created_at
             FROM news WHERE id = ?1",
            rusqlite::params![id_str],
            |row| {
              Ok(RawArticle {
                id:         row.get(0)?,
                title:      row.get(1)?,
                content:    row.get(2)?,
                image:      row.get(3)?,
                video_link: row.get(4)?,
                featured:   row.get(5)?,
                category:   row.get(6)?,
                author:     row.get(7)?,
                date:       row.get(8)?,
                summary:    row.get(9)?,
                created_at: row.get(10)?,
              })
            },
          )
          .optional()?)
      })
      .await?;

    raw.map(RawArticle::into_article).transpose()
  }

  async fn insert_article(&self, draft: NewArticle) -> Result<NewsArticle> {
    let record = NewsArticle {
      id:         Uuid::new_v4(),
      title:      draft.title,
      content:    draft.content,
      image:      draft.image,
      video_link: draft.video_link,
      featured:   draft.featured,
      category:   draft.category,
      author:     draft.author,
      date:       draft.date,
      summary:    draft.summary,
      created_at: Utc::now(),
    };
    self.write_article(&record).await?;
    Ok(record)
  }

  async fn patch_article(
    &self,
    id: Uuid,
    patch: ArticlePatch,
  ) -> Result<Option<NewsArticle>> {
    let Some(mut record) = self.get_article(id).await? else {
      return Ok(None);
    };
    patch.apply(&mut record);
    self.write_article(&record).await?;
    Ok(Some(record))
  }

  async fn delete_article(&self, id: Uuid) -> Result<bool> {
    self.delete_row("news", id).await
  }

  // ── Job applications ──────────────────────────────────────────────────────

  async fn insert_application(&self, draft: NewApplication) -> Result<JobApplication> {
    let record = JobApplication {
      id:           Uuid::new_v4(),
      job_id:       draft.job_id,
      name:         draft.name,
      email:        draft.email,
      cover_letter: draft.cover_letter,
      resume_url:   draft.resume_url,
      created_at:   Utc::now(),
    };

    let id           = encode_uuid(record.id);
    let job_id       = encode_uuid(record.job_id);
    let name         = record.name.clone();
    let email        = record.email.clone();
    let cover_letter = record.cover_letter.clone();
    let resume_url   = record.resume_url.clone();
    let created_at   = encode_dt(record.created_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO job_applications
             (id, job_id, name, email, cover_letter, resume_url, created_at)
           VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
          rusqlite::params![
            id, job_id, name, email, cover_letter, resume_url, created_at,
          ],
        )?;
        Ok(())
      })
      .await?;

    Ok(record)
  }

  async fn list_applications(&self) -> Result<Vec<JobApplication>> {
    let raws: Vec<RawApplication> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT id, job_id, name, email, cover_letter, resume_url, created_at
           FROM job_applications ORDER BY created_at DESC, rowid DESC",
        )?;
        let rows = stmt
          .query_map([], |row| {
            Ok(RawApplication {
              id:           row.get(0)?,
              job_id:       row.get(1)?,
              name:         row.get(2)?,
              email:        row.get(3)?,
              cover_letter: row.get(4)?,
              resume_url:   row.get(5)?,
              created_at:   row.get(6)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawApplication::into_application).collect()
  }

  // ── Identity ──────────────────────────────────────────────────────────────

  async fn admin_password_hash(&self, email: &str) -> Result<Option<String>> {
    let email = email.to_owned();
    let hash: Option<String> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            "SELECT password_hash FROM admin_users WHERE email = ?1",
            rusqlite::params![email],
            |row| row.get(0),
          )
          .optional()?)
      })
      .await?;
    Ok(hash)
  }
}
