//! Handlers for `/api/alerts` endpoints. Same method table as `updates`,
//! with an optional `?category=` filter on the list.

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use indaba_core::{
  alert::{Alert, AlertCategory, AlertPatch, NewAlert},
  backend::ContentBackend,
  view,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{AppState, auth::Admin, error::ApiError};

#[derive(Debug, Deserialize)]
pub struct ListParams {
  pub category: Option<AlertCategory>,
}

/// `GET /api/alerts[?category=water|electricity|crime|general]`
///
/// Ordered most urgent first, newest first within a severity.
pub async fn list<S>(
  State(state): State<AppState<S>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<Alert>>, ApiError>
where
  S: ContentBackend + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let records = state
    .store
    .list_alerts()
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  let filtered: Vec<Alert> = match params.category {
    Some(cat) => view::with_category(&records, cat).into_iter().cloned().collect(),
    None => records,
  };
  let ordered: Vec<Alert> = view::by_severity(&filtered).into_iter().cloned().collect();
  Ok(Json(ordered))
}

/// `GET /api/alerts/:id`
pub async fn get_one<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Alert>, ApiError>
where
  S: ContentBackend + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let record = state
    .store
    .get_alert(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| ApiError::NotFound(format!("alert {id} not found")))?;
  Ok(Json(record))
}

/// `POST /api/alerts`
pub async fn create<S>(
  _admin: Admin,
  State(state): State<AppState<S>>,
  Json(draft): Json<NewAlert>,
) -> Result<impl IntoResponse, ApiError>
where
  S: ContentBackend + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let record = state
    .store
    .insert_alert(draft)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok((StatusCode::CREATED, Json(record)))
}

/// `PATCH /api/alerts/:id`
pub async fn patch_one<S>(
  _admin: Admin,
  State(state): State<AppState<S>>,
  Path(id): Path<Uuid>,
  Json(patch): Json<AlertPatch>,
) -> Result<Json<Alert>, ApiError>
where
  S: ContentBackend + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let record = state
    .store
    .patch_alert(id, patch)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| ApiError::NotFound(format!("alert {id} not found")))?;
  Ok(Json(record))
}

/// `DELETE /api/alerts/:id`
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
    .delete_alert(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  if !removed {
    return Err(ApiError::NotFound(format!("alert {id} not found")));
  }
  Ok(StatusCode::NO_CONTENT)
}
