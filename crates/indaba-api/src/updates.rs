//! Handlers for `/api/updates` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/api/updates` | Public |
//! | `GET`    | `/api/updates/:id` | Public; 404 if not found |
//! | `POST`   | `/api/updates` | Admin; body is a draft record |
//! | `PATCH`  | `/api/updates/:id` | Admin; 404 if not found, never creates |
//! | `DELETE` | `/api/updates/:id` | Admin; 404 if not found |

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use indaba_core::{
  backend::ContentBackend,
  update::{CommunityUpdate, NewUpdate, UpdatePatch},
};
use uuid::Uuid;

use crate::{AppState, auth::Admin, error::ApiError};

/// `GET /api/updates`
pub async fn list<S>(
  State(state): State<AppState<S>>,
) -> Result<Json<Vec<CommunityUpdate>>, ApiError>
where
  S: ContentBackend + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let records = state
    .store
    .list_updates()
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(records))
}

/// `GET /api/updates/:id`
pub async fn get_one<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<CommunityUpdate>, ApiError>
where
  S: ContentBackend + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let record = state
    .store
    .get_update(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| ApiError::NotFound(format!("update {id} not found")))?;
  Ok(Json(record))
}

/// `POST /api/updates`
pub async fn create<S>(
  _admin: Admin,
  State(state): State<AppState<S>>,
  Json(draft): Json<NewUpdate>,
) -> Result<impl IntoResponse, ApiError>
where
  S: ContentBackend + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let record = state
    .store
    .insert_update(draft)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok((StatusCode::CREATED, Json(record)))
}

/// `PATCH /api/updates/:id`
pub async fn patch_one<S>(
  _admin: Admin,
  State(state): State<AppState<S>>,
  Path(id): Path<Uuid>,
  Json(patch): Json<UpdatePatch>,
) -> Result<Json<CommunityUpdate>, ApiError>
where
  S: ContentBackend + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let record = state
    .store
    .patch_update(id, patch)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| ApiError::NotFound(format!("update {id} not found")))?;
  Ok(Json(record))
}

/// `DELETE /api/updates/:id`
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
    .delete_update(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  if !removed {
    return Err(ApiError::NotFound(format!("update {id} not found")));
  }
  Ok(StatusCode::NO_CONTENT)
}
