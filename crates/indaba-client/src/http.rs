//! Async HTTP backend wrapping the Indaba JSON API.

use std::{
  sync::{Arc, Mutex},
  time::Duration,
};

use indaba_core::{
  alert::{Alert, AlertPatch, NewAlert},
  application::{JobApplication, NewApplication},
  backend::ContentBackend,
  job::{JobPatch, JobPosting, NewJob},
  news::{ArticlePatch, NewArticle, NewsArticle},
  update::{CommunityUpdate, NewUpdate, UpdatePatch},
};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use uuid::Uuid;

use crate::error::StoreError;

/// HTTP client for the content service.
///
/// Cheap to clone; clones share the session token.
#[derive(Clone)]
pub struct RemoteBackend {
  client:   Client,
  base_url: String,
  token:    Arc<Mutex<Option<String>>>,
}

#[derive(Deserialize)]
struct ErrorBody {
  error: String,
}

#[derive(Deserialize)]
struct LoginResponse {
  token: String,
}

#[derive(Deserialize)]
struct MeResponse {
  email: String,
}

impl RemoteBackend {
  pub fn new(base_url: impl Into<String>) -> Result<Self, StoreError> {
    let client = Client::builder()
      .timeout(Duration::from_secs(30))
      .build()?;
    Ok(Self {
      client,
      base_url: base_url.into(),
      token: Arc::new(Mutex::new(None)),
    })
  }

  fn url(&self, path: &str) -> String {
    format!("{}{path}", self.base_url.trim_end_matches('/'))
  }

  fn bearer(&self, req: RequestBuilder) -> RequestBuilder {
    let token = self.token.lock().expect("token lock poisoned").clone();
    match token {
      Some(token) => req.bearer_auth(token),
      None => req,
    }
  }

  /// Map a non-success response to a typed error.
  async fn fail(resp: Response) -> StoreError {
    let status = resp.status();
    if status == StatusCode::UNAUTHORIZED {
      return StoreError::Unauthorized;
    }
    let message = resp
      .json::<ErrorBody>()
      .await
      .map(|b| b.error)
      .unwrap_or_default();
    StoreError::Remote { status: status.as_u16(), message }
  }

  // ── Request helpers ───────────────────────────────────────────────────────

  async fn get_list<T: DeserializeOwned>(
    &self,
    path: &str,
  ) -> Result<Vec<T>, StoreError> {
    let resp = self.client.get(self.url(path)).send().await?;
    if !resp.status().is_success() {
      return Err(Self::fail(resp).await);
    }
    Ok(resp.json().await?)
  }

  async fn get_by_id<T: DeserializeOwned>(
    &self,
    path: &str,
    id: Uuid,
  ) -> Result<Option<T>, StoreError> {
    let resp = self
      .client
      .get(self.url(&format!("{path}/{id}")))
      .send()
      .await?;
    match resp.status() {
      StatusCode::NOT_FOUND => Ok(None),
      s if s.is_success() => Ok(Some(resp.json().await?)),
      _ => Err(Self::fail(resp).await),
    }
  }

  async fn post_json<B: Serialize, T: DeserializeOwned>(
    &self,
    path: &str,
    body: &B,
  ) -> Result<T, StoreError> {
    let resp = self
      .bearer(self.client.post(self.url(path)))
      .json(body)
      .send()
      .await?;
    if !resp.status().is_success() {
      return Err(Self::fail(resp).await);
    }
    Ok(resp.json().await?)
  }

  /// PATCH by id; `Ok(None)` when the server has no such record.
  async fn patch_json<B: Serialize, T: DeserializeOwned>(
    &self,
    path: &str,
    id: Uuid,
    body: &B,
  ) -> Result<Option<T>, StoreError> {
    let resp = self
      .bearer(self.client.patch(self.url(&format!("{path}/{id}"))))
      .json(body)
      .send()
      .await?;
    match resp.status() {
      StatusCode::NOT_FOUND => Ok(None),
      s if s.is_success() => Ok(Some(resp.json().await?)),
      _ => Err(Self::fail(resp).await),
    }
  }

  /// DELETE by id; `Ok(false)` when the server had nothing to remove.
  async fn delete_by_id(&self, path: &str, id: Uuid) -> Result<bool, StoreError> {
    let resp = self
      .bearer(self.client.delete(self.url(&format!("{path}/{id}"))))
      .send()
      .await?;
    match resp.status() {
      StatusCode::NOT_FOUND => Ok(false),
      s if s.is_success() => Ok(true),
      _ => Err(Self::fail(resp).await),
    }
  }
}

impl ContentBackend for RemoteBackend {
  type Error = StoreError;

  async fn list_updates(&self) -> Result<Vec<CommunityUpdate>, StoreError> {
    self.get_list("/api/updates").await
  }

  async fn get_update(&self, id: Uuid) -> Result<Option<CommunityUpdate>, StoreError> {
    self.get_by_id("/api/updates", id).await
  }

  async fn insert_update(&self, draft: NewUpdate) -> Result<CommunityUpdate, StoreError> {
    self.post_json("/api/updates", &draft).await
  }

  async fn patch_update(
    &self,
    id: Uuid,
    patch: UpdatePatch,
  ) -> Result<Option<CommunityUpdate>, StoreError> {
    self.patch_json("/api/updates", id, &patch).await
  }

  async fn delete_update(&self, id: Uuid) -> Result<bool, StoreError> {
    self.delete_by_id("/api/updates", id).await
  }

  async fn list_jobs(&self) -> Result<Vec<JobPosting>, StoreError> {
    self.get_list("/api/jobs").await
  }

  async fn get_job(&self, id: Uuid) -> Result<Option<JobPosting>, StoreError> {
    self.get_by_id("/api/jobs", id).await
  }

  async fn insert_job(&self, draft: NewJob) -> Result<JobPosting, StoreError> {
    self.post_json("/api/jobs", &draft).await
  }

  async fn patch_job(
    &self,
    id: Uuid,
    patch: JobPatch,
  ) -> Result<Option<JobPosting>, StoreError> {
    self.patch_json("/api/jobs", id, &patch).await
  }

  async fn delete_job(&self, id: Uuid) -> Result<bool, StoreError> {
    self.delete_by_id("/api/jobs", id).await
  }

  async fn list_alerts(&self) -> Result<Vec<Alert>, StoreError> {
    self.get_list("/api/alerts").await
  }

  async fn get_alert(&self, id: Uuid) -> Result<Option<Alert>, StoreError> {
    self.get_by_id("/api/alerts", id).await
  }

  async fn insert_alert(&self, draft: NewAlert) -> Result<Alert, StoreError> {
    self.post_json("/api/alerts", &draft).await
  }

  async fn patch_alert(
    &self,
    id: Uuid,
    patch: AlertPatch,
  ) -> Result<Option<Alert>, StoreError> {
    self.patch_json("/api/alerts", id, &patch).await
  }

  async fn delete_alert(&self, id: Uuid) -> Result<bool, StoreError> {
    self.delete_by_id("/api/alerts", id).await
  }

  async fn list_articles(&self) -> Result<Vec<NewsArticle>, StoreError> {
    self.get_list("/api/news").await
  }

  async fn get_article(&self, id: Uuid) -> Result<Option<NewsArticle>, StoreError> {
    self.get_by_id("/api/news", id).await
  }

  async fn insert_article(&self, draft: NewArticle) -> Result<NewsArticle, StoreError> {
    self.post_json("/api/news", &draft).await
  }

  async fn patch_article(
    &self,
    id: Uuid,
    patch: ArticlePatch,
  ) -> Result<Option<NewsArticle>, StoreError> {
    self.patch_json("/api/news", id, &patch).await
  }

  async fn delete_article(&self, id: Uuid) -> Result<bool, StoreError> {
    self.delete_by_id("/api/news", id).await
  }

  async fn insert_application(
    &self,
    draft: NewApplication,
  ) -> Result<JobApplication, StoreError> {
    self.post_json("/api/applications", &draft).await
  }

  async fn list_applications(&self) -> Result<Vec<JobApplication>, StoreError> {
    let resp = self
      .bearer(self.client.get(self.url("/api/applications")))
      .send()
      .await?;
    if !resp.status().is_success() {
      return Err(Self::fail(resp).await);
    }
    Ok(resp.json().await?)
  }

  /// Password hashes never cross the HTTP boundary; identity lives on the
  /// server. Always `None`.
  async fn admin_password_hash(&self, _email: &str) -> Result<Option<String>, StoreError> {
    Ok(None)
  }
}

impl crate::SessionBackend for RemoteBackend {
  async fn login(&self, email: &str, password: &str) -> Result<bool, StoreError> {
    let resp = self
      .client
      .post(self.url("/api/auth/login"))
      .json(&serde_json::json!({ "email": email, "password": password }))
      .send()
      .await?;

    match resp.status() {
      StatusCode::UNAUTHORIZED => Ok(false),
      s if s.is_success() => {
        let body: LoginResponse = resp.json().await?;
        *self.token.lock().expect("token lock poisoned") = Some(body.token);
        Ok(true)
      }
      _ => Err(Self::fail(resp).await),
    }
  }

  async fn logout(&self) -> Result<(), StoreError> {
    let resp = self
      .bearer(self.client.post(self.url("/api/auth/logout")))
      .send()
      .await;
    // The local token is gone regardless of what the server said.
    *self.token.lock().expect("token lock poisoned") = None;
    resp?;
    Ok(())
  }

  async fn current_user(&self) -> Result<Option<String>, StoreError> {
    let resp = self
      .bearer(self.client.get(self.url("/api/auth/me")))
      .send()
      .await?;
    match resp.status() {
      StatusCode::UNAUTHORIZED => Ok(None),
      s if s.is_success() => {
        let body: MeResponse = resp.json().await?;
        Ok(Some(body.email))
      }
      _ => Err(Self::fail(resp).await),
    }
  }
}
