//! Handlers for `/api/applications` — the public apply form's submission
//! endpoint and the admin read-out.

use axum::{
  Json,
  extract::State,
  http::StatusCode,
  response::IntoResponse,
};
use indaba_core::{
  application::{JobApplication, NewApplication},
  backend::ContentBackend,
};

use crate::{AppState, auth::Admin, error::ApiError};

/// `POST /api/applications` — public; no session required.
pub async fn create<S>(
  State(state): State<AppState<S>>,
  Json(draft): Json<NewApplication>,
) -> Result<impl IntoResponse, ApiError>
where
  S: ContentBackend + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  if draft.name.trim().is_empty() || draft.email.trim().is_empty() {
    return Err(ApiError::BadRequest("name and email are required".to_string()));
  }

  let record = state
    .store
    .insert_application(draft)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok((StatusCode::CREATED, Json(record)))
}

/// `GET /api/applications` — admin only.
pub async fn list<S>(
  _admin: Admin,
  State(state): State<AppState<S>>,
) -> Result<Json<Vec<JobApplication>>, ApiError>
where
  S: ContentBackend + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let records = state
    .store
    .list_applications()
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(records))
}
