//! Handlers for `/api/jobs` endpoints. Same method table as `updates`.

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use indaba_core::{
  backend::ContentBackend,
  job::{JobPatch, JobPosting, NewJob},
};
use uuid::Uuid;

use crate::{AppState, auth::Admin, error::ApiError};

/// `GET /api/jobs`
pub async fn list<S>(
  State(state): State<AppState<S>>,
) -> Result<Json<Vec<JobPosting>>, ApiError>
where
  S: ContentBackend + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let records = state
    .store
    .list_jobs()
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(records))
}

/// `GET /api/jobs/:id` — the apply form reads the posting it applies to.
pub async fn get_one<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<JobPosting>, ApiError>
where
  S: ContentBackend + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let record = state
    .store
    .get_job(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| ApiError::NotFound(format!("job {id} not found")))?;
  Ok(Json(record))
}

/// `POST /api/jobs`
pub async fn create<S>(
  _admin: Admin,
  State(state): State<AppState<S>>,
  Json(draft): Json<NewJob>,
) -> Result<impl IntoResponse, ApiError>
where
  S: ContentBackend + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let record = state
    .store
    .insert_job(draft)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok((StatusCode::CREATED, Json(record)))
}

/// `PATCH /api/jobs/:id`
pub async fn patch_one<S>(
  _admin: Admin,
  State(state): State<AppState<S>>,
  Path(id): Path<Uuid>,
  Json(patch): Json<JobPatch>,
) -> Result<Json<JobPosting>, ApiError>
where
  S: ContentBackend + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let record = state
    .store
    .patch_job(id, patch)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| ApiError::NotFound(format!("job {id} not found")))?;
  Ok(Json(record))
}

/// `DELETE /api/jobs/:id`
pub async fn delete_one<S>(
  _admin: Admin,
  State(state): State<AppState<S>>,
  Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError>
where
  S: ContentBackend + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let removed = state
    .store
    .delete_job(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  if !removed {
    return Err(ApiError::NotFound(format!("job {id} not found")));
  }
  Ok(StatusCode::NO_CONTENT)
}
