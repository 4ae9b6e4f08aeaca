//! HTTP service layer for Indaba.
//!
//! Exposes an axum [`Router`] backed by any [`ContentBackend`]: public JSON
//! reads for the four content kinds, bearer-authenticated admin mutations,
//! job application submission, and file uploads.
//!
//! Auth is session-token based (`POST /api/auth/login` trades credentials for
//! a bearer token); TLS and reverse-proxy concerns are the deployment's
//! responsibility.

pub mod alerts;
pub mod applications;
pub mod auth;
pub mod error;
pub mod jobs;
pub mod media;
pub mod news;
pub mod updates;
pub mod uploads;

pub use error::ApiError;

use std::{path::PathBuf, sync::Arc};

use axum::{
  Router,
  extract::DefaultBodyLimit,
  routing::{get, post},
};
use indaba_core::backend::ContentBackend;
use serde::Deserialize;
use tower_http::trace::TraceLayer;

use auth::Sessions;
use media::MediaStore;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml`.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  pub host:       String,
  pub port:       u16,
  /// Public origin used when building upload URLs, e.g. `https://indaba.example`.
  pub base_url:   String,
  pub store_path: PathBuf,
  pub media_dir:  PathBuf,
}

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
pub struct AppState<S: ContentBackend> {
  pub store:    Arc<S>,
  pub sessions: Arc<Sessions>,
  pub media:    Arc<MediaStore>,
  pub config:   Arc<ServerConfig>,
}

// Manual impl: `#[derive(Clone)]` would demand `S: Clone` even though only
// the `Arc` is cloned.
impl<S: ContentBackend> Clone for AppState<S> {
  fn clone(&self) -> Self {
    Self {
      store:    Arc::clone(&self.store),
      sessions: Arc::clone(&self.sessions),
      media:    Arc::clone(&self.media),
      config:   Arc::clone(&self.config),
    }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Maximum accepted upload body.
const UPLOAD_LIMIT: usize = 8 * 1024 * 1024;

/// Build the full application [`Router`].
pub fn router<S>(state: AppState<S>) -> Router
where
  S: ContentBackend + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  Router::new()
    // Community updates
    .route("/api/updates", get(updates::list::<S>).post(updates::create::<S>))
    .route(
      "/api/updates/{id}",
      get(updates::get_one::<S>)
        .patch(updates::patch_one::<S>)
        .delete(updates::delete_one::<S>),
    )
    // Jobs
    .route("/api/jobs", get(jobs::list::<S>).post(jobs::create::<S>))
    .route(
      "/api/jobs/{id}",
      get(jobs::get_one::<S>)
        .patch(jobs::patch_one::<S>)
        .delete(jobs::delete_one::<S>),
    )
    // Alerts
    .route("/api/alerts", get(alerts::list::<S>).post(alerts::create::<S>))
    .route(
      "/api/alerts/{id}",
      get(alerts::get_one::<S>)
        .patch(alerts::patch_one::<S>)
        .delete(alerts::delete_one::<S>),
    )
    // News
    .route("/api/news", get(news::list::<S>).post(news::create::<S>))
    .route(
      "/api/news/{id}",
      get(news::get_one::<S>)
        .patch(news::patch_one::<S>)
        .delete(news::delete_one::<S>),
    )
    // Applications
    .route(
      "/api/applications",
      get(applications::list::<S>).post(applications::create::<S>),
    )
    // Auth
    .route("/api/auth/login", post(auth::login::<S>))
    .route("/api/auth/logout", post(auth::logout::<S>))
    .route("/api/auth/me", get(auth::me::<S>))
    // Uploads
    .route(
      "/api/uploads",
      post(uploads::create::<S>).layer(DefaultBodyLimit::max(UPLOAD_LIMIT)),
    )
    .route("/uploads/{name}", get(uploads::serve::<S>))
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}

#[cfg(test)]
mod tests {
  use super::*;

  use argon2::{Argon2, PasswordHasher, password_hash::SaltString};
  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
  };
  use indaba_store_sqlite::SqliteStore;
  use rand_core::OsRng;
  use serde_json::{Value, json};
  use tower::ServiceExt as _;

  const ADMIN_EMAIL: &str = "admin@indaba.test";
  const ADMIN_PASS:  &str = "hunter2";

  async fn make_state() -> AppState<SqliteStore> {
    let store = SqliteStore::open_in_memory().await.unwrap();
    let salt  = SaltString::generate(&mut OsRng);
    let hash  = Argon2::default()
      .hash_password(ADMIN_PASS.as_bytes(), &salt)
      .unwrap()
      .to_string();
    store.create_admin(ADMIN_EMAIL, &hash).await.unwrap();

    let media_dir = tempfile::tempdir().unwrap().keep();
    AppState {
      store:    Arc::new(store),
      sessions: Arc::new(Sessions::new()),
      media:    Arc::new(MediaStore::new(&media_dir)),
      config:   Arc::new(ServerConfig {
        host:       "127.0.0.1".to_string(),
        port:       8080,
        base_url:   "http://localhost:8080".to_string(),
        store_path: PathBuf::from(":memory:"),
        media_dir,
      }),
    }
  }

  async fn send(
    state:  &AppState<SqliteStore>,
    method: &str,
    uri:    &str,
    token:  Option<&str>,
    body:   Option<Value>,
  ) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
      builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let body = match body {
      Some(v) => {
        builder = builder.header(header::CONTENT_TYPE, "application/json");
        Body::from(v.to_string())
      }
      None => Body::empty(),
    };
    let resp = router(state.clone())
      .oneshot(builder.body(body).unwrap())
      .await
      .unwrap();

    let status = resp.status();
    let bytes  = axum::body::to_bytes(resp.into_body(), usize::MAX)
      .await
      .unwrap();
    let value = if bytes.is_empty() {
      Value::Null
    } else {
      serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
  }

  async fn login(state: &AppState<SqliteStore>) -> String {
    let (status, body) = send(
      state,
      "POST",
      "/api/auth/login",
      None,
      Some(json!({ "email": ADMIN_EMAIL, "password": ADMIN_PASS })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["token"].as_str().unwrap().to_string()
  }

  fn update_body() -> Value {
    json!({
      "title":       "Street cleanup",
      "description": "Bring gloves",
      "category":    "gathering",
      "date":        "2026-09-12",
      "time":        "09:00:00",
      "location":    "Main Rd park",
    })
  }

  // ── Auth ────────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn login_rejects_bad_credentials() {
    let state = make_state().await;
    let (status, _) = send(
      &state,
      "POST",
      "/api/auth/login",
      None,
      Some(json!({ "email": ADMIN_EMAIL, "password": "wrong" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(
      &state,
      "POST",
      "/api/auth/login",
      None,
      Some(json!({ "email": "nobody@indaba.test", "password": ADMIN_PASS })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
  }

  #[tokio::test]
  async fn me_reflects_session_and_logout_revokes_it() {
    let state = make_state().await;
    let token = login(&state).await;

    let (status, body) =
      send(&state, "GET", "/api/auth/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], ADMIN_EMAIL);

    let (status, _) =
      send(&state, "POST", "/api/auth/logout", Some(&token), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) =
      send(&state, "GET", "/api/auth/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
  }

  #[tokio::test]
  async fn mutations_require_a_session() {
    let state = make_state().await;
    let (status, _) =
      send(&state, "POST", "/api/updates", None, Some(update_body())).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(
      &state,
      "POST",
      "/api/updates",
      Some("not-a-real-token"),
      Some(update_body()),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
  }

  // ── CRUD flow ───────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn update_crud_roundtrip() {
    let state = make_state().await;
    let token = login(&state).await;

    // Public list starts empty.
    let (status, body) = send(&state, "GET", "/api/updates", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 0);

    // Create.
    let (status, created) = send(
      &state,
      "POST",
      "/api/updates",
      Some(&token),
      Some(update_body()),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["id"].as_str().unwrap().to_string();

    // Public get.
    let (status, fetched) =
      send(&state, "GET", &format!("/api/updates/{id}"), None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["title"], "Street cleanup");

    // Patch one field; the rest survive.
    let (status, patched) = send(
      &state,
      "PATCH",
      &format!("/api/updates/{id}"),
      Some(&token),
      Some(json!({ "location": "Community hall" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(patched["location"], "Community hall");
    assert_eq!(patched["title"], "Street cleanup");

    // Delete, then both get and re-delete report 404.
    let (status, _) = send(
      &state,
      "DELETE",
      &format!("/api/updates/{id}"),
      Some(&token),
      None,
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) =
      send(&state, "GET", &format!("/api/updates/{id}"), None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
      &state,
      "DELETE",
      &format!("/api/updates/{id}"),
      Some(&token),
      None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn patch_unknown_id_is_404_and_creates_nothing() {
    let state = make_state().await;
    let token = login(&state).await;

    let missing = uuid::Uuid::new_v4();
    let (status, _) = send(
      &state,
      "PATCH",
      &format!("/api/jobs/{missing}"),
      Some(&token),
      Some(json!({ "salary": "R20000" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, jobs) = send(&state, "GET", "/api/jobs", None, None).await;
    assert_eq!(jobs.as_array().unwrap().len(), 0);
  }

  // ── News ────────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn news_content_is_sanitised_on_create_and_patch() {
    let state = make_state().await;
    let token = login(&state).await;

    let (status, created) = send(
      &state,
      "POST",
      "/api/news",
      Some(&token),
      Some(json!({
        "title":    "Clinic hours",
        "content":  "<p>New hours</p><script>alert(1)</script>",
        "category": "health",
        "author":   "Editor",
        "date":     "2026-08-30",
        "summary":  "Clinic opens earlier",
      })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["content"], "<p>New hours</p>");

    let id = created["id"].as_str().unwrap();
    let (status, patched) = send(
      &state,
      "PATCH",
      &format!("/api/news/{id}"),
      Some(&token),
      Some(json!({ "content": "<p onclick=\"x()\">Edited</p>" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(patched["content"], "<p>Edited</p>");
  }

  #[tokio::test]
  async fn news_list_filters_by_featured() {
    let state = make_state().await;
    let token = login(&state).await;

    for (title, featured) in [("Plain", false), ("Big story", true)] {
      let (status, _) = send(
        &state,
        "POST",
        "/api/news",
        Some(&token),
        Some(json!({
          "title":    title,
          "content":  "<p>body</p>",
          "category": "general",
          "author":   "Editor",
          "date":     "2026-08-30",
          "summary":  "s",
          "featured": featured,
        })),
      )
      .await;
      assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) =
      send(&state, "GET", "/api/news?featured=true", None, None).await;
    assert_eq!(status, StatusCode::OK);
    let list = body.as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["title"], "Big story");
  }

  // ── Alerts ──────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn alerts_list_orders_by_severity_and_filters_by_category() {
    let state = make_state().await;
    let token = login(&state).await;

    for (title, category, severity) in [
      ("Outage tonight", "electricity", "low"),
      ("Burst main", "water", "high"),
      ("Load shedding", "electricity", "medium"),
    ] {
      let (status, _) = send(
        &state,
        "POST",
        "/api/alerts",
        Some(&token),
        Some(json!({
          "title":       title,
          "description": "d",
          "category":    category,
          "severity":    severity,
          "icon":        "warning",
          "posted":      "today",
        })),
      )
      .await;
      assert_eq!(status, StatusCode::CREATED);
    }

    let (_, all) = send(&state, "GET", "/api/alerts", None, None).await;
    let titles: Vec<_> = all
      .as_array()
      .unwrap()
      .iter()
      .map(|a| a["title"].as_str().unwrap())
      .collect();
    assert_eq!(titles, ["Burst main", "Load shedding", "Outage tonight"]);

    let (_, water) =
      send(&state, "GET", "/api/alerts?category=water", None, None).await;
    assert_eq!(water.as_array().unwrap().len(), 1);
    assert_eq!(water[0]["title"], "Burst main");
  }

  // ── Applications ────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn applications_submit_publicly_and_list_as_admin() {
    let state = make_state().await;
    let token = login(&state).await;

    let job_id = uuid::Uuid::new_v4();
    let (status, created) = send(
      &state,
      "POST",
      "/api/applications",
      None,
      Some(json!({
        "job_id":       job_id,
        "name":         "Thandi M",
        "email":        "thandi@example.com",
        "cover_letter": "I would like to apply.",
      })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["name"], "Thandi M");

    // Listing requires a session.
    let (status, _) = send(&state, "GET", "/api/applications", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, list) =
      send(&state, "GET", "/api/applications", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 1);
  }

  // ── Uploads ─────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn upload_then_serve_roundtrip() {
    let state = make_state().await;

    // No session required: the public apply form uploads résumés.
    let req = Request::builder()
      .method("POST")
      .uri("/api/uploads?filename=cv.pdf")
      .body(Body::from(&b"pdf bytes"[..]))
      .unwrap();
    let resp = router(state.clone()).oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
      .await
      .unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    let name = body["name"].as_str().unwrap();
    assert!(body["url"].as_str().unwrap().ends_with(name));

    let req = Request::builder()
      .uri(format!("/uploads/{name}"))
      .body(Body::empty())
      .unwrap();
    let resp = router(state.clone()).oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
      resp.headers().get(header::CONTENT_TYPE).unwrap(),
      "application/pdf"
    );
    let served = axum::body::to_bytes(resp.into_body(), usize::MAX)
      .await
      .unwrap();
    assert_eq!(&served[..], b"pdf bytes");
  }

  #[tokio::test]
  async fn serving_unknown_upload_is_404() {
    let state = make_state().await;
    let (status, _) =
      send(&state, "GET", "/uploads/0000-missing.pdf", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
  }
}
