//! API error type and [`axum::response::IntoResponse`] implementation.

use askify_core::store::StoreError;
use axum::{
  Json,
  extract::rejection::{JsonRejection, PathRejection},
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("not found: {0}")]
  NotFound(String),

  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("unauthenticated: {0}")]
  Unauthenticated(String),

  #[error("conflict: {0}")]
  Conflict(String),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ApiError {
  /// Classify a backend failure by the domain error behind it, if any.
  pub fn from_store<E: StoreError>(e: E) -> Self {
    use askify_core::Error as Domain;

    let mapped = e.domain().map(|d| match d {
      Domain::EventNotFound(_) | Domain::QuestionNotFound(_) => {
        ApiError::NotFound(d.to_string())
      }
      Domain::DuplicateVote { .. } => ApiError::Conflict(d.to_string()),
      Domain::Validation { .. } => ApiError::BadRequest(d.to_string()),
    });
    mapped.unwrap_or_else(|| ApiError::Store(Box::new(e)))
  }
}

impl From<JsonRejection> for ApiError {
  fn from(rejection: JsonRejection) -> Self { ApiError::BadRequest(rejection.body_text()) }
}

impl From<PathRejection> for ApiError {
  fn from(rejection: PathRejection) -> Self { ApiError::BadRequest(rejection.body_text()) }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match &self {
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, m.clone()),
      ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m.clone()),
      ApiError::Unauthenticated(m) => (StatusCode::UNAUTHORIZED, m.clone()),
      ApiError::Conflict(m) => (StatusCode::CONFLICT, m.clone()),
      ApiError::Store(e) => {
        tracing::error!(error = %e, "store failure");
        (StatusCode::INTERNAL_SERVER_ERROR, "internal error".to_owned())
      }
    };
    (status, Json(json!({ "error": message }))).into_response()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  async fn body_of(err: ApiError) -> (StatusCode, serde_json::Value) {
    let resp = err.into_response();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
  }

  #[tokio::test]
  async fn store_failure_hides_backend_detail() {
    let backend = std::io::Error::other("disk I/O error at /var/lib/askify.db");
    let (status, body) = body_of(ApiError::Store(Box::new(backend))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "internal error");
  }

  #[tokio::test]
  async fn duplicate_vote_maps_to_conflict() {
    let err = ApiError::from_store(askify_core::Error::DuplicateVote {
      user_id:     uuid::Uuid::nil(),
      question_id: uuid::Uuid::nil(),
    });
    let (status, body) = body_of(err).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["error"].as_str().unwrap().contains("once per question"));
  }
}
