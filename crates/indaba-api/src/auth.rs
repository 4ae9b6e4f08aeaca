//! Admin authentication: argon2 password check, bearer-token sessions, and
//! the `/api/auth` handlers.
//!
//! Sessions are held in process memory; restarting the server logs every
//! admin out. The backing store owns identity (email + PHC hash); plaintext
//! passwords exist only inside [`login`].

use std::{
  collections::HashMap,
  sync::Mutex,
};

use argon2::{Argon2, PasswordHash, PasswordVerifier};
use axum::{
  Json,
  extract::{FromRequestParts, State},
  http::{HeaderMap, StatusCode, request::Parts},
};
use indaba_core::backend::ContentBackend;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{AppState, error::ApiError};

// ─── Sessions ─────────────────────────────────────────────────────────────────

/// In-memory bearer-token session table, token → admin email.
#[derive(Debug, Default)]
pub struct Sessions {
  inner: Mutex<HashMap<String, String>>,
}

impl Sessions {
  pub fn new() -> Self {
    Self::default()
  }

  /// Open a session for `email` and return the fresh token.
  pub fn open(&self, email: &str) -> String {
    let token = Uuid::new_v4().simple().to_string();
    self
      .inner
      .lock()
      .expect("sessions lock poisoned")
      .insert(token.clone(), email.to_owned());
    token
  }

  /// Invalidate a token. Unknown tokens are a no-op.
  pub fn close(&self, token: &str) {
    self
      .inner
      .lock()
      .expect("sessions lock poisoned")
      .remove(token);
  }

  pub fn email_for(&self, token: &str) -> Option<String> {
    self
      .inner
      .lock()
      .expect("sessions lock poisoned")
      .get(token)
      .cloned()
  }
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
  headers
    .get(axum::http::header::AUTHORIZATION)?
    .to_str()
    .ok()?
    .strip_prefix("Bearer ")
}

// ─── Extractor ────────────────────────────────────────────────────────────────

/// Present in a handler's arguments means the request carried a valid admin
/// session. Carries the session's email.
pub struct Admin(pub String);

impl<S> FromRequestParts<AppState<S>> for Admin
where
  S: ContentBackend + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  type Rejection = ApiError;

  async fn from_request_parts(
    parts: &mut Parts,
    state: &AppState<S>,
  ) -> Result<Self, Self::Rejection> {
    let token = bearer_token(&parts.headers).ok_or(ApiError::Unauthorized)?;
    let email = state
      .sessions
      .email_for(token)
      .ok_or(ApiError::Unauthorized)?;
    Ok(Admin(email))
  }
}

// ─── Handlers ─────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct LoginBody {
  pub email:    String,
  pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
  pub token: String,
  pub email: String,
}

/// `POST /api/auth/login` — verify credentials against the store's admin
/// accounts; 401 on any mismatch, with no distinction between unknown
/// account and wrong password.
pub async fn login<S>(
  State(state): State<AppState<S>>,
  Json(body): Json<LoginBody>,
) -> Result<Json<LoginResponse>, ApiError>
where
  S: ContentBackend + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let hash = state
    .store
    .admin_password_hash(&body.email)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or(ApiError::Unauthorized)?;

  let parsed = PasswordHash::new(&hash).map_err(|_| ApiError::Unauthorized)?;
  Argon2::default()
    .verify_password(body.password.as_bytes(), &parsed)
    .map_err(|_| ApiError::Unauthorized)?;

  let token = state.sessions.open(&body.email);
  tracing::info!(email = %body.email, "admin logged in");
  Ok(Json(LoginResponse { token, email: body.email }))
}

/// `POST /api/auth/logout` — always 204, even for unknown tokens.
pub async fn logout<S>(
  State(state): State<AppState<S>>,
  headers: HeaderMap,
) -> StatusCode
where
  S: ContentBackend + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  if let Some(token) = bearer_token(&headers) {
    state.sessions.close(token);
  }
  StatusCode::NO_CONTENT
}

#[derive(Debug, Serialize)]
pub struct MeResponse {
  pub email: String,
}

/// `GET /api/auth/me` — the current-user lookup used by client `load()`.
pub async fn me<S>(Admin(email): Admin) -> Json<MeResponse>
where
  S: ContentBackend + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  Json(MeResponse { email })
}
