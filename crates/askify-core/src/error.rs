//! Error types for `askify-core`.

use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum Error {
  #[error("event not found: {0}")]
  EventNotFound(Uuid),

  #[error("question not found: {0}")]
  QuestionNotFound(Uuid),

  /// The (user, question) pair already has a vote. The first one stands.
  #[error("user {user_id} can only vote once per question ({question_id})")]
  DuplicateVote { user_id: Uuid, question_id: Uuid },

  #[error("invalid {field}: {reason}")]
  Validation {
    field:  &'static str,
    reason: &'static str,
  },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
