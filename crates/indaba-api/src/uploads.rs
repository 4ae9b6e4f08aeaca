//! File upload and retrieval handlers.
//!
//! `POST /api/uploads?filename=cv.pdf` takes the raw request body, stores it
//! through [`MediaStore`](crate::media::MediaStore), and answers with the URL
//! the stored file is served from. `GET /uploads/{name}` streams it back.

use axum::{
  Json,
  extract::{Path, Query, State},
  http::{StatusCode, header},
  response::IntoResponse,
};
use bytes::Bytes;
use indaba_core::backend::ContentBackend;
use serde::{Deserialize, Serialize};

use crate::{AppState, error::ApiError, media};

#[derive(Debug, Deserialize)]
pub struct UploadParams {
  filename: String,
}

#[derive(Debug, Serialize)]
pub struct UploadResponse {
  pub name: String,
  pub url:  String,
}

/// `POST /api/uploads?filename=...` — public; the apply form uploads
/// résumés without a session. Stored names are content-hashed, so callers
/// cannot overwrite each other's files.
pub async fn create<S>(
  State(state): State<AppState<S>>,
  Query(params): Query<UploadParams>,
  body: Bytes,
) -> Result<impl IntoResponse, ApiError>
where
  S: ContentBackend + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  if body.is_empty() {
    return Err(ApiError::BadRequest("empty upload body".to_string()));
  }

  let name = state.media.save(&params.filename, &body).await?;
  let url = format!("{}/uploads/{name}", state.config.base_url);
  tracing::info!(name, bytes = body.len(), "stored upload");
  Ok((StatusCode::CREATED, Json(UploadResponse { name, url })))
}

/// `GET /uploads/{name}` — public.
pub async fn serve<S>(
  State(state): State<AppState<S>>,
  Path(name): Path<String>,
) -> Result<impl IntoResponse, ApiError>
where
  S: ContentBackend + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let bytes = state
    .media
    .read(&name)
    .await?
    .ok_or_else(|| ApiError::NotFound(format!("no upload named `{name}`")))?;
  let headers = [(header::CONTENT_TYPE, media::content_type_for(&name))];
  Ok((headers, bytes))
}
