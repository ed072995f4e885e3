//! SQL schema for the Askify SQLite store.
//!
//! Executed at connection startup; versioned through `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE ... IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS events (
    event_id    TEXT PRIMARY KEY,
    name        TEXT NOT NULL CHECK (length(trim(name)) > 0),
    user_id     TEXT NOT NULL,
    created_at  TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS questions (
    question_id TEXT PRIMARY KEY,
    event_id    TEXT NOT NULL REFERENCES events(event_id),
    user_id     TEXT NOT NULL,
    body        TEXT NOT NULL CHECK (length(trim(body)) > 0),
    created_at  TEXT NOT NULL
);

-- Votes are append-only. One row per (user, question): the first writer
-- wins and any later insert for the same pair hits the unique index.
CREATE TABLE IF NOT EXISTS votes (
    vote_id     TEXT PRIMARY KEY,
    user_id     TEXT NOT NULL,
    question_id TEXT NOT NULL REFERENCES questions(question_id),
    score       TEXT NOT NULL CHECK (score IN ('upvote', 'downvote')),
    created_at  TEXT NOT NULL
);

CREATE UNIQUE INDEX IF NOT EXISTS votes_user_question_idx
    ON votes(user_id, question_id);
CREATE INDEX IF NOT EXISTS questions_event_idx ON questions(event_id);
CREATE INDEX IF NOT EXISTS votes_question_idx  ON votes(question_id, score);

PRAGMA user_version = 1;
";
