//! The `AskifyStore` trait.
//!
//! Implemented by storage backends (e.g. `askify-store-sqlite`). The API and
//! server crates depend on this abstraction, not on a concrete backend.

use std::future::Future;

use uuid::Uuid;

use crate::{
  event::{Event, NewEvent},
  question::{NewQuestion, Question},
  vote::{Vote, VoteKind},
};

// ─── Errors ──────────────────────────────────────────────────────────────────

/// Implemented by backend error types so callers can tell domain failures
/// (missing rows, duplicate votes, invalid input) apart from I/O failures.
pub trait StoreError: std::error::Error + Send + Sync + 'static {
  /// The domain error behind this failure, if there is one.
  fn domain(&self) -> Option<&crate::Error>;
}

impl StoreError for crate::Error {
  fn domain(&self) -> Option<&crate::Error> { Some(self) }
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over an Askify storage backend.
///
/// Events, questions and votes are append-only. Question tallies are derived
/// from the stored votes on every read; nothing caches them.
///
/// All methods return `Send` futures so the trait can be used from axum
/// handlers on a multi-threaded runtime.
pub trait AskifyStore: Send + Sync {
  type Error: StoreError;

  // ── Events ────────────────────────────────────────────────────────────

  /// Validate and persist a new event.
  fn create_event(
    &self,
    input: NewEvent,
  ) -> impl Future<Output = Result<Event, Self::Error>> + Send + '_;

  /// Retrieve an event by id. Returns `None` if not found.
  fn get_event(
    &self,
    event_id: Uuid,
  ) -> impl Future<Output = Result<Option<Event>, Self::Error>> + Send + '_;

  /// All events, oldest first.
  fn list_events(
    &self,
  ) -> impl Future<Output = Result<Vec<Event>, Self::Error>> + Send + '_;

  // ── Questions ─────────────────────────────────────────────────────────

  /// Validate and persist a new question. Fails with
  /// [`crate::Error::EventNotFound`] if the event does not exist.
  fn create_question(
    &self,
    input: NewQuestion,
  ) -> impl Future<Output = Result<Question, Self::Error>> + Send + '_;

  /// Retrieve a question, with its tally. Returns `None` if not found.
  fn get_question(
    &self,
    question_id: Uuid,
  ) -> impl Future<Output = Result<Option<Question>, Self::Error>> + Send + '_;

  /// All questions under an event, with tallies, in storage order.
  fn list_questions(
    &self,
    event_id: Uuid,
  ) -> impl Future<Output = Result<Vec<Question>, Self::Error>> + Send + '_;

  // ── Votes ─────────────────────────────────────────────────────────────

  /// Record `user_id`'s vote on a question.
  ///
  /// Fails with [`crate::Error::QuestionNotFound`] for an unknown question and
  /// with [`crate::Error::DuplicateVote`] if the user has already voted on it,
  /// whichever way. A rejected vote leaves the tally unchanged.
  fn record_vote(
    &self,
    user_id: Uuid,
    question_id: Uuid,
    kind: VoteKind,
  ) -> impl Future<Output = Result<Vote, Self::Error>> + Send + '_;

  /// Number of upvotes on a question.
  fn count_upvotes(
    &self,
    question_id: Uuid,
  ) -> impl Future<Output = Result<u64, Self::Error>> + Send + '_;

  /// Number of downvotes on a question.
  fn count_downvotes(
    &self,
    question_id: Uuid,
  ) -> impl Future<Output = Result<u64, Self::Error>> + Send + '_;
}
