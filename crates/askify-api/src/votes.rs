//! Handlers for `/questions/:id/upvote` and `/questions/:id/downvote`.
//!
//! Both return 201 with the stored vote, or 409 if the acting user has
//! already voted on the question.

use std::sync::Arc;

use askify_core::{
  context::RequestContext,
  service::QuestionService,
  store::AskifyStore,
  vote::{Vote, VoteKind},
};
use axum::{
  Json,
  extract::State,
  http::StatusCode,
};
use uuid::Uuid;

use crate::{
  context::CurrentUser,
  error::ApiError,
  extract::ApiPath,
};

/// `POST /questions/:id/upvote`
pub async fn upvote<S: AskifyStore>(
  State(store): State<Arc<S>>,
  CurrentUser(ctx): CurrentUser,
  ApiPath(question_id): ApiPath<Uuid>,
) -> Result<(StatusCode, Json<Vote>), ApiError> {
  cast(store.as_ref(), &ctx, question_id, VoteKind::Upvote).await
}

/// `POST /questions/:id/downvote`
pub async fn downvote<S: AskifyStore>(
  State(store): State<Arc<S>>,
  CurrentUser(ctx): CurrentUser,
  ApiPath(question_id): ApiPath<Uuid>,
) -> Result<(StatusCode, Json<Vote>), ApiError> {
  cast(store.as_ref(), &ctx, question_id, VoteKind::Downvote).await
}

async fn cast<S: AskifyStore>(
  store: &S,
  ctx: &RequestContext,
  question_id: Uuid,
  kind: VoteKind,
) -> Result<(StatusCode, Json<Vote>), ApiError> {
  let vote = QuestionService::new(store)
    .vote(ctx, question_id, kind)
    .await
    .map_err(ApiError::from_store)?;

  tracing::info!(%question_id, user_id = %ctx.user_id, %kind, "vote cast");
  Ok((StatusCode::CREATED, Json(vote)))
}
