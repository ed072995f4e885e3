//! [`SqliteStore`] — the SQLite implementation of [`AskifyStore`].

use std::path::Path;

use askify_core::{
  event::{Event, NewEvent},
  question::{NewQuestion, Question},
  store::AskifyStore,
  vote::{Vote, VoteKind},
};
use chrono::Utc;
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use crate::{
  Error, Result,
  encode::{RawEvent, RawQuestion, decode_count, encode_dt, encode_uuid},
  schema::SCHEMA,
};

/// Question columns plus per-kind vote aggregates. Callers append a
/// `WHERE` clause and the trailing `GROUP BY`/`ORDER BY`.
const QUESTION_SELECT: &str = "
  SELECT q.question_id, q.event_id, q.user_id, q.body, q.created_at,
         COALESCE(SUM(v.score = 'upvote'), 0)   AS upvotes,
         COALESCE(SUM(v.score = 'downvote'), 0) AS downvotes
  FROM questions q
  LEFT JOIN votes v ON v.question_id = q.question_id";

fn raw_question(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawQuestion> {
  Ok(RawQuestion {
    question_id: row.get(0)?,
    event_id:    row.get(1)?,
    user_id:     row.get(2)?,
    body:        row.get(3)?,
    created_at:  row.get(4)?,
    upvotes:     row.get(5)?,
    downvotes:   row.get(6)?,
  })
}

fn raw_event(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawEvent> {
  Ok(RawEvent {
    event_id:   row.get(0)?,
    name:       row.get(1)?,
    user_id:    row.get(2)?,
    created_at: row.get(3)?,
  })
}

/// Outcome of a vote insert.
enum Insert {
  Done,
  QuestionMissing,
  Duplicate,
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// An Askify store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn count_votes(&self, question_id: Uuid, kind: VoteKind) -> Result<u64> {
    let id_str = encode_uuid(question_id);

    let n: i64 = self
      .conn
      .call(move |conn| {
        Ok(conn.query_row(
          "SELECT COUNT(*) FROM votes WHERE question_id = ?1 AND score = ?2",
          rusqlite::params![id_str, kind.as_str()],
          |row| row.get(0),
        )?)
      })
      .await?;

    decode_count(n)
  }
}

// ─── AskifyStore impl ────────────────────────────────────────────────────────

impl AskifyStore for SqliteStore {
  type Error = Error;

  // ── Events ────────────────────────────────────────────────────────────────

  async fn create_event(&self, input: NewEvent) -> Result<Event> {
    let input = input.validate()?;
    let event = Event {
      event_id:   Uuid::new_v4(),
      name:       input.name,
      user_id:    input.user_id,
      created_at: Utc::now(),
    };

    let id_str   = encode_uuid(event.event_id);
    let name     = event.name.clone();
    let user_str = encode_uuid(event.user_id);
    let at_str   = encode_dt(event.created_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO events (event_id, name, user_id, created_at) VALUES (?1, ?2, ?3, ?4)",
          rusqlite::params![id_str, name, user_str, at_str],
        )?;
        Ok(())
      })
      .await?;

    tracing::debug!(event_id = %event.event_id, "event created");
    Ok(event)
  }

  async fn get_event(&self, event_id: Uuid) -> Result<Option<Event>> {
    let id_str = encode_uuid(event_id);

    let raw: Option<RawEvent> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            "SELECT event_id, name, user_id, created_at FROM events WHERE event_id = ?1",
            rusqlite::params![id_str],
            raw_event,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawEvent::into_event).transpose()
  }

  async fn list_events(&self) -> Result<Vec<Event>> {
    let raws: Vec<RawEvent> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT event_id, name, user_id, created_at FROM events
           ORDER BY created_at, event_id",
        )?;
        let rows = stmt
          .query_map([], raw_event)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawEvent::into_event).collect()
  }

  // ── Questions ─────────────────────────────────────────────────────────────

  async fn create_question(&self, input: NewQuestion) -> Result<Question> {
    let input = input.validate()?;
    let question = Question {
      question_id: Uuid::new_v4(),
      event_id:    input.event_id,
      user_id:     input.user_id,
      body:        input.body,
      created_at:  Utc::now(),
      upvotes:     0,
      downvotes:   0,
    };

    let id_str    = encode_uuid(question.question_id);
    let event_str = encode_uuid(question.event_id);
    let user_str  = encode_uuid(question.user_id);
    let body      = question.body.clone();
    let at_str    = encode_dt(question.created_at);

    let event_exists = self
      .conn
      .call(move |conn| {
        let exists = conn
          .query_row(
            "SELECT 1 FROM events WHERE event_id = ?1",
            rusqlite::params![event_str],
            |_| Ok(true),
          )
          .optional()?
          .unwrap_or(false);

        if exists {
          conn.execute(
            "INSERT INTO questions (question_id, event_id, user_id, body, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            rusqlite::params![id_str, event_str, user_str, body, at_str],
          )?;
        }
        Ok(exists)
      })
      .await?;

    if !event_exists {
      return Err(askify_core::Error::EventNotFound(question.event_id).into());
    }

    tracing::debug!(question_id = %question.question_id, "question created");
    Ok(question)
  }

  async fn get_question(&self, question_id: Uuid) -> Result<Option<Question>> {
    let id_str = encode_uuid(question_id);

    let raw: Option<RawQuestion> = self
      .conn
      .call(move |conn| {
        let sql = format!("{QUESTION_SELECT} WHERE q.question_id = ?1 GROUP BY q.question_id");
        Ok(conn
          .query_row(&sql, rusqlite::params![id_str], raw_question)
          .optional()?)
      })
      .await?;

    raw.map(RawQuestion::into_question).transpose()
  }

  async fn list_questions(&self, event_id: Uuid) -> Result<Vec<Question>> {
    let id_str = encode_uuid(event_id);

    let raws: Vec<RawQuestion> = self
      .conn
      .call(move |conn| {
        let sql = format!(
          "{QUESTION_SELECT}
           WHERE q.event_id = ?1
           GROUP BY q.question_id
           ORDER BY q.created_at, q.question_id"
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(rusqlite::params![id_str], raw_question)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawQuestion::into_question).collect()
  }

  // ── Votes ─────────────────────────────────────────────────────────────────

  async fn record_vote(
    &self,
    user_id:     Uuid,
    question_id: Uuid,
    kind:        VoteKind,
  ) -> Result<Vote> {
    let vote = Vote {
      vote_id: Uuid::new_v4(),
      user_id,
      question_id,
      kind,
      created_at: Utc::now(),
    };

    let vote_str     = encode_uuid(vote.vote_id);
    let user_str     = encode_uuid(user_id);
    let question_str = encode_uuid(question_id);
    let at_str       = encode_dt(vote.created_at);

    // Existence check and insert run in one closure on the connection
    // thread; the unique index settles races between duplicate votes.
    let outcome = self
      .conn
      .call(move |conn| {
        let question_exists = conn
          .query_row(
            "SELECT 1 FROM questions WHERE question_id = ?1",
            rusqlite::params![question_str],
            |_| Ok(true),
          )
          .optional()?
          .unwrap_or(false);

        if !question_exists {
          return Ok(Insert::QuestionMissing);
        }

        let inserted = conn.execute(
          "INSERT INTO votes (vote_id, user_id, question_id, score, created_at)
           VALUES (?1, ?2, ?3, ?4, ?5)",
          rusqlite::params![vote_str, user_str, question_str, kind.as_str(), at_str],
        );

        match inserted {
          Ok(_) => Ok(Insert::Done),
          Err(rusqlite::Error::SqliteFailure(e, _))
            if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE =>
          {
            Ok(Insert::Duplicate)
          }
          Err(e) => Err(e.into()),
        }
      })
      .await?;

    match outcome {
      Insert::Done => {
        tracing::debug!(%question_id, %user_id, %kind, "vote recorded");
        Ok(vote)
      }
      Insert::QuestionMissing => Err(askify_core::Error::QuestionNotFound(question_id).into()),
      Insert::Duplicate => {
        tracing::debug!(%question_id, %user_id, "duplicate vote rejected");
        Err(askify_core::Error::DuplicateVote { user_id, question_id }.into())
      }
    }
  }

  async fn count_upvotes(&self, question_id: Uuid) -> Result<u64> {
    self.count_votes(question_id, VoteKind::Upvote).await
  }

  async fn count_downvotes(&self, question_id: Uuid) -> Result<u64> {
    self.count_votes(question_id, VoteKind::Downvote).await
  }
}
