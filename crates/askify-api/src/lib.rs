//! JSON REST API for Askify.
//!
//! Exposes an axum [`Router`] backed by any [`askify_core::store::AskifyStore`].
//! Identity verification, TLS and transport concerns are the caller's
//! responsibility; the acting user arrives in the
//! [`context::USER_HEADER`] header.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", askify_api::api_router(store.clone()))
//! ```

pub mod context;
pub mod error;
pub mod events;
pub mod extract;
pub mod questions;
pub mod votes;

use std::sync::Arc;

use askify_core::store::AskifyStore;
use axum::{
  Router,
  routing::{get, post},
};

pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: AskifyStore + 'static,
{
  Router::new()
    // Events
    .route("/events", get(events::list::<S>).post(events::create::<S>))
    .route("/events/{id}", get(events::get_one::<S>))
    // Questions
    .route(
      "/events/{id}/questions",
      get(questions::ranked::<S>).post(questions::ask::<S>),
    )
    .route("/questions/{id}", get(questions::get_one::<S>))
    // Votes
    .route("/questions/{id}/upvote", post(votes::upvote::<S>))
    .route("/questions/{id}/downvote", post(votes::downvote::<S>))
    .with_state(store)
}
