//! Handlers for question endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/events/:id/questions` | Ranked, best first |
//! | `POST` | `/events/:id/questions` | Body: `{"question":"..."}`; acting user required |
//! | `GET`  | `/questions/:id` | Question with tally and score |

use std::sync::Arc;

use askify_core::{
  score::ScoredQuestion,
  service::QuestionService,
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

/// `GET /events/:id/questions`
pub async fn ranked<S: AskifyStore>(
  State(store): State<Arc<S>>,
  ApiPath(event_id): ApiPath<Uuid>,
) -> Result<Json<Vec<ScoredQuestion>>, ApiError> {
  let questions = QuestionService::new(store.as_ref())
    .ranked_questions(event_id)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(questions))
}

#[derive(Debug, Deserialize)]
pub struct AskBody {
  pub question: String,
}

/// `POST /events/:id/questions` — body: `{"question":"..."}`
pub async fn ask<S: AskifyStore>(
  State(store): State<Arc<S>>,
  CurrentUser(ctx): CurrentUser,
  ApiPath(event_id): ApiPath<Uuid>,
  ApiJson(body): ApiJson<AskBody>,
) -> Result<impl IntoResponse, ApiError> {
  let question = QuestionService::new(store.as_ref())
    .ask(&ctx, event_id, body.question)
    .await
    .map_err(ApiError::from_store)?;

  tracing::info!(%event_id, question_id = %question.question_id, "question asked");
  Ok((StatusCode::CREATED, Json(question)))
}

/// `GET /questions/:id`
pub async fn get_one<S: AskifyStore>(
  State(store): State<Arc<S>>,
  ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<ScoredQuestion>, ApiError> {
  let question = QuestionService::new(store.as_ref())
    .scored_question(id)
    .await
    .map_err(ApiError::from_store)?
    .ok_or_else(|| ApiError::NotFound(format!("question {id} not found")))?;
  Ok(Json(question))
}
