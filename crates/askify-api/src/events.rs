//! Handlers for `/events` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/events` | Oldest first |
//! | `POST` | `/events` | Body: `{"name":"..."}`; acting user required |
//! | `GET`  | `/events/:id` | Event plus ranked questions; 404 if not found |

use std::sync::Arc;

use askify_core::{
  event::Event,
  service::{EventDetail, QuestionService},
  store::AskifyStore,
};
use axum::{
  Json,
  extract::State,
  http::StatusCode,
  response::IntoResponse,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
  context::CurrentUser,
  error::ApiError,
  extract::{ApiJson, ApiPath},
};

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /events`
pub async fn list<S: AskifyStore>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<Event>>, ApiError> {
  let events = store.list_events().await.map_err(ApiError::from_store)?;
  Ok(Json(events))
}

// ─── Create ───────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CreateBody {
  pub name: String,
}

/// `POST /events` — body: `{"name":"..."}`
pub async fn create<S: AskifyStore>(
  State(store): State<Arc<S>>,
  CurrentUser(ctx): CurrentUser,
  ApiJson(body): ApiJson<CreateBody>,
) -> Result<impl IntoResponse, ApiError> {
  let event = QuestionService::new(store.as_ref())
    .create_event(&ctx, body.name)
    .await
    .map_err(ApiError::from_store)?;

  tracing::info!(event_id = %event.event_id, user_id = %ctx.user_id, "event created");
  Ok((StatusCode::CREATED, Json(event)))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /events/:id`
pub async fn get_one<S: AskifyStore>(
  State(store): State<Arc<S>>,
  ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<EventDetail>, ApiError> {
  let detail = QuestionService::new(store.as_ref())
    .event_detail(id)
    .await
    .map_err(ApiError::from_store)?
    .ok_or_else(|| ApiError::NotFound(format!("event {id} not found")))?;
  Ok(Json(detail))
}
