//! Questions posted under an event, together with their vote tally.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, Result, score};

/// A persisted question.
///
/// `upvotes` and `downvotes` are never stored on the question itself; the
/// store derives them from the `votes` table each time a question is read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
  pub question_id: Uuid,
  pub event_id:    Uuid,
  /// The user who asked.
  pub user_id:     Uuid,
  pub body:        String,
  pub created_at:  DateTime<Utc>,
  pub upvotes:     u64,
  pub downvotes:   u64,
}

impl Question {
  /// Ranking score for the current tally. See [`score::score`].
  pub fn score(&self) -> f64 { score::score(self.upvotes, self.downvotes) }
}

/// Input to [`crate::store::AskifyStore::create_question`].
#[derive(Debug, Clone)]
pub struct NewQuestion {
  pub event_id: Uuid,
  pub user_id:  Uuid,
  pub body:     String,
}

impl NewQuestion {
  pub fn new(event_id: Uuid, user_id: Uuid, body: impl Into<String>) -> Self {
    Self { event_id, user_id, body: body.into() }
  }

  /// Check invariants and return the input with its body trimmed.
  pub fn validate(self) -> Result<Self> {
    let body = self.body.trim();
    if body.is_empty() {
      return Err(Error::Validation { field: "question", reason: "must not be empty" });
    }
    Ok(Self { body: body.to_owned(), ..self })
  }
}
