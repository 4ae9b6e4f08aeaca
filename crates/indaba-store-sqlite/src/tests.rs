//! Integration tests for `SqliteStore` against an in-memory database.

use chrono::{NaiveDate, NaiveTime};
use indaba_core::{
  alert::{AlertCategory, AlertPatch, NewAlert, Severity},
  application::NewApplication,
  backend::ContentBackend,
  job::{ContactDetails, JobPatch, NewJob},
  news::{ArticlePatch, NewArticle},
  update::{NewUpdate, UpdateCategory, UpdatePatch},
};
use uuid::Uuid;

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn update_draft(title: &str) -> NewUpdate {
  NewUpdate {
    title:       title.into(),
    description: "All welcome.".into(),
    category:    UpdateCategory::Meeting,
    date:        NaiveDate::from_ymd_opt(2026, 9, 5).unwrap(),
    time:        NaiveTime::from_hms_opt(14, 0, 0).unwrap(),
    location:    "Community Hall".into(),
  }
}

fn job_draft(title: &str) -> NewJob {
  NewJob {
    title:           title.into(),
    description:     "General duties.".into(),
    requirements:    vec!["Matric".into(), "Driver's licence".into()],
    employment_type: "Full-time".into(),
    posted:          "Today".into(),
    company:         "Mokoena Builders".into(),
    salary:          "R8,500".into(),
    location:        "Main Road".into(),
    contact:         ContactDetails {
      phone: "011 555 0123".into(),
      email: "jobs@mokoena.example".into(),
    },
  }
}

fn alert_draft(title: &str) -> NewAlert {
  NewAlert {
    title:       title.into(),
    description: "Supply interrupted.".into(),
    category:    AlertCategory::Water,
    severity:    Severity::Medium,
    icon:        "droplet".into(),
    posted:      "Posted 1 hour ago".into(),
    timeline:    Some("08:00 - 16:00".into()),
    locations:   vec!["Extension 2".into(), "Riverside".into()],
  }
}

fn article_draft(title: &str, featured: bool) -> NewArticle {
  NewArticle {
    title:      title.into(),
    content:    "<p>Full story.</p>".into(),
    image:      Some("/uploads/abc.jpg".into()),
    video_link: None,
    featured,
    category:   "community".into(),
    author:     "News Desk".into(),
    date:       NaiveDate::from_ymd_opt(2026, 8, 30).unwrap(),
    summary:    "Short summary.".into(),
  }
}

// ─── Community updates ───────────────────────────────────────────────────────

#[tokio::test]
async fn insert_update_assigns_id_and_created_at() {
  let s = store().await;
  let record = s.insert_update(update_draft("AGM")).await.unwrap();

  assert!(!record.id.is_nil());
  assert_eq!(record.title, "AGM");

  let fetched = s.get_update(record.id).await.unwrap().unwrap();
  assert_eq!(fetched.id, record.id);
  assert_eq!(fetched.category, UpdateCategory::Meeting);
  assert_eq!(fetched.time, NaiveTime::from_hms_opt(14, 0, 0).unwrap());
  assert_eq!(fetched.created_at, record.created_at);
}

#[tokio::test]
async fn list_updates_newest_first() {
  let s = store().await;
  s.insert_update(update_draft("first")).await.unwrap();
  s.insert_update(update_draft("second")).await.unwrap();
  s.insert_update(update_draft("third")).await.unwrap();

  let titles: Vec<String> = s
    .list_updates()
    .await
    .unwrap()
    .into_iter()
    .map(|u| u.title)
    .collect();
  assert_eq!(titles, ["third", "second", "first"]);
}

#[tokio::test]
async fn patch_update_replaces_only_present_fields() {
  let s = store().await;
  let record = s.insert_update(update_draft("AGM")).await.unwrap();

  let patch = UpdatePatch {
    location: Some("Library".into()),
    ..Default::default()
  };
  let updated = s.patch_update(record.id, patch).await.unwrap().unwrap();

  assert_eq!(updated.location, "Library");
  assert_eq!(updated.title, "AGM");
  assert_eq!(updated.created_at, record.created_at);
}

#[tokio::test]
async fn patch_update_missing_id_returns_none_and_creates_nothing() {
  let s = store().await;
  let result = s
    .patch_update(Uuid::new_v4(), UpdatePatch {
      title: Some("ghost".into()),
      ..Default::default()
    })
    .await
    .unwrap();

  assert!(result.is_none());
  assert!(s.list_updates().await.unwrap().is_empty());
}

#[tokio::test]
async fn delete_update_reports_whether_a_row_was_removed() {
  let s = store().await;
  let record = s.insert_update(update_draft("AGM")).await.unwrap();

  assert!(s.delete_update(record.id).await.unwrap());
  assert!(s.get_update(record.id).await.unwrap().is_none());
  assert!(!s.delete_update(record.id).await.unwrap());
}

// ─── Jobs ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn job_requirements_and_contact_roundtrip() {
  let s = store().await;
  let record = s.insert_job(job_draft("Bricklayer")).await.unwrap();

  let fetched = s.get_job(record.id).await.unwrap().unwrap();
  assert_eq!(fetched.requirements, ["Matric", "Driver's licence"]);
  assert_eq!(fetched.contact.phone, "011 555 0123");
  assert_eq!(fetched.contact.email, "jobs@mokoena.example");
}

#[tokio::test]
async fn patch_job_salary_only() {
  let s = store().await;
  let record = s.insert_job(job_draft("Bricklayer")).await.unwrap();

  let updated = s
    .patch_job(record.id, JobPatch {
      salary: Some("R10,000".into()),
      ..Default::default()
    })
    .await
    .unwrap()
    .unwrap();

  assert_eq!(updated.salary, "R10,000");
  assert_eq!(updated.company, "Mokoena Builders");
  assert_eq!(updated.requirements, record.requirements);
}

// ─── Alerts ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn alert_optional_fields_roundtrip() {
  let s = store().await;
  let record = s.insert_alert(alert_draft("Water maintenance")).await.unwrap();

  let fetched = s.get_alert(record.id).await.unwrap().unwrap();
  assert_eq!(fetched.severity, Severity::Medium);
  assert_eq!(fetched.timeline.as_deref(), Some("08:00 - 16:00"));
  assert_eq!(fetched.locations, ["Extension 2", "Riverside"]);
}

#[tokio::test]
async fn alert_without_timeline_stays_none() {
  let s = store().await;
  let mut draft = alert_draft("Power cut");
  draft.timeline = None;
  draft.locations = vec![];

  let record = s.insert_alert(draft).await.unwrap();
  let fetched = s.get_alert(record.id).await.unwrap().unwrap();
  assert!(fetched.timeline.is_none());
  assert!(fetched.locations.is_empty());
}

#[tokio::test]
async fn patch_alert_severity() {
  let s = store().await;
  let record = s.insert_alert(alert_draft("Water maintenance")).await.unwrap();

  let updated = s
    .patch_alert(record.id, AlertPatch {
      severity: Some(Severity::High),
      ..Default::default()
    })
    .await
    .unwrap()
    .unwrap();

  assert_eq!(updated.severity, Severity::High);
  assert_eq!(updated.timeline, record.timeline);
}

// ─── News ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn article_featured_flag_roundtrip() {
  let s = store().await;
  let featured = s.insert_article(article_draft("Clinic opens", true)).await.unwrap();
  let regular = s.insert_article(article_draft("Taxi fares", false)).await.unwrap();

  assert!(s.get_article(featured.id).await.unwrap().unwrap().featured);
  assert!(!s.get_article(regular.id).await.unwrap().unwrap().featured);
}

#[tokio::test]
async fn patch_article_content_and_unusual_fields_survive() {
  let s = store().await;
  let record = s.insert_article(article_draft("Clinic opens", true)).await.unwrap();

  let updated = s
    .patch_article(record.id, ArticlePatch {
      content: Some("<p>Corrected story.</p>".into()),
      ..Default::default()
    })
    .await
    .unwrap()
    .unwrap();

  assert_eq!(updated.content, "<p>Corrected story.</p>");
  assert_eq!(updated.image.as_deref(), Some("/uploads/abc.jpg"));
  assert!(updated.featured);
}

#[tokio::test]
async fn delete_article_removes_row() {
  let s = store().await;
  let record = s.insert_article(article_draft("Gone", false)).await.unwrap();

  assert!(s.delete_article(record.id).await.unwrap());
  assert!(s.get_article(record.id).await.unwrap().is_none());
}

// ─── Job applications ────────────────────────────────────────────────────────

#[tokio::test]
async fn insert_and_list_applications() {
  let s = store().await;
  let job = s.insert_job(job_draft("Bricklayer")).await.unwrap();

  let app = s
    .insert_application(NewApplication {
      job_id:       job.id,
      name:         "Thandi N.".into(),
      email:        "thandi@example.org".into(),
      cover_letter: "I have five years of experience.".into(),
      resume_url:   Some("/uploads/resume.pdf".into()),
    })
    .await
    .unwrap();

  assert_eq!(app.job_id, job.id);

  let listed = s.list_applications().await.unwrap();
  assert_eq!(listed.len(), 1);
  assert_eq!(listed[0].name, "Thandi N.");
  assert_eq!(listed[0].resume_url.as_deref(), Some("/uploads/resume.pdf"));
}

// ─── Admin accounts ──────────────────────────────────────────────────────────

#[tokio::test]
async fn admin_hash_lookup_and_overwrite() {
  let s = store().await;

  assert!(s.admin_password_hash("admin@example.org").await.unwrap().is_none());

  s.create_admin("admin@example.org", "$argon2id$v=19$first").await.unwrap();
  assert_eq!(
    s.admin_password_hash("admin@example.org").await.unwrap().as_deref(),
    Some("$argon2id$v=19$first")
  );

  s.create_admin("admin@example.org", "$argon2id$v=19$second").await.unwrap();
  assert_eq!(
    s.admin_password_hash("admin@example.org").await.unwrap().as_deref(),
    Some("$argon2id$v=19$second")
  );
}
