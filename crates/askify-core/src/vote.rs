//! Votes cast by users on questions.
//!
//! A vote is immutable once recorded, and each user gets at most one vote
//! per question.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Which way a vote goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteKind {
  Upvote,
  Downvote,
}

impl VoteKind {
  /// The string stored in the `score` column and used in URLs.
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Upvote => "upvote",
      Self::Downvote => "downvote",
    }
  }
}

impl fmt::Display for VoteKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// A recorded vote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vote {
  pub vote_id:     Uuid,
  pub user_id:     Uuid,
  pub question_id: Uuid,
  pub kind:        VoteKind,
  pub created_at:  DateTime<Utc>,
}
