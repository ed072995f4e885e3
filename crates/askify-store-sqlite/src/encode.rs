//! Conversions between domain types and the plain-text SQLite columns.
//!
//! Timestamps are RFC 3339 strings and UUIDs are hyphenated lowercase
//! strings. Vote kinds use their `upvote` / `downvote` names.

use askify_core::{event::Event, question::Question};
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Scalars ─────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

pub fn decode_count(n: i64) -> Result<u64> {
  u64::try_from(n).map_err(|_| Error::InvalidCount(n))
}

// ─── Raw rows ────────────────────────────────────────────────────────────────

/// An `events` row as read from SQLite.
pub struct RawEvent {
  pub event_id:   String,
  pub name:       String,
  pub user_id:    String,
  pub created_at: String,
}

impl RawEvent {
  pub fn into_event(self) -> Result<Event> {
    Ok(Event {
      event_id:   decode_uuid(&self.event_id)?,
      name:       self.name,
      user_id:    decode_uuid(&self.user_id)?,
      created_at: decode_dt(&self.created_at)?,
    })
  }
}

/// A `questions` row joined with its vote aggregates.
pub struct RawQuestion {
  pub question_id: String,
  pub event_id:    String,
  pub user_id:     String,
  pub body:        String,
  pub created_at:  String,
  pub upvotes:     i64,
  pub downvotes:   i64,
}

impl RawQuestion {
  pub fn into_question(self) -> Result<Question> {
    Ok(Question {
      question_id: decode_uuid(&self.question_id)?,
      event_id:    decode_uuid(&self.event_id)?,
      user_id:     decode_uuid(&self.user_id)?,
      body:        self.body,
      created_at:  decode_dt(&self.created_at)?,
      upvotes:     decode_count(self.upvotes)?,
      downvotes:   decode_count(self.downvotes)?,
    })
  }
}
