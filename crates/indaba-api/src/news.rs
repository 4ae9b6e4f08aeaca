//! Handlers for `/api/news` endpoints.
//!
//! Article bodies are untrusted HTML: both `create` and `patch_one` run the
//! content through [`sanitize::clean_html`] before it reaches the store, so
//! everything the store holds is safe to inject into a page.

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use indaba_core::{
  backend::ContentBackend,
  news::{ArticlePatch, NewArticle, NewsArticle},
  sanitize,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{AppState, auth::Admin, error::ApiError};

#[derive(Debug, Deserialize)]
pub struct ListParams {
  pub featured: Option<bool>,
}

/// `GET /api/news[?featured=true|false]`
pub async fn list<S>(
  State(state): State<AppState<S>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<NewsArticle>>, ApiError>
where
  S: ContentBackend + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let records = state
    .store
    .list_articles()
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  let records = match params.featured {
    Some(want) => records.into_iter().filter(|a| a.featured == want).collect(),
    None => records,
  };
  Ok(Json(records))
}

/// `GET /api/news/:id`
pub async fn get_one<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<NewsArticle>, ApiError>
where
  S: ContentBackend + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let record = state
    .store
    .get_article(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| ApiError::NotFound(format!("article {id} not found")))?;
  Ok(Json(record))
}

/// `POST /api/news`
pub async fn create<S>(
  _admin: Admin,
  State(state): State<AppState<S>>,
  Json(mut draft): Json<NewArticle>,
) -> Result<impl IntoResponse, ApiError>
where
  S: ContentBackend + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  draft.content = sanitize::clean_html(&draft.content);
  let record = state
    .store
    .insert_article(draft)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok((StatusCode::CREATED, Json(record)))
}

/// `PATCH /api/news/:id`
pub async fn patch_one<S>(
  _admin: Admin,
  State(state): State<AppState<S>>,
  Path(id): Path<Uuid>,
  Json(mut patch): Json<ArticlePatch>,
) -> Result<Json<NewsArticle>, ApiError>
where
  S: ContentBackend + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  if let Some(content) = &patch.content {
    patch.content = Some(sanitize::clean_html(content));
  }
  let record = state
    .store
    .patch_article(id, patch)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| ApiError::NotFound(format!("article {id} not found")))?;
  Ok(Json(record))
}

/// `DELETE /api/news/:id`
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
    .delete_article(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  if !removed {
    return Err(ApiError::NotFound(format!("article {id} not found")));
  }
  Ok(StatusCode::NO_CONTENT)
}
