//! SQL schema for the subject store.
//!
//! Executed at connection startup and by `SubjectStore::initialize`.
//! `PRAGMA user_version` records the layout for future migrations.

/// Full schema DDL; idempotent thanks to `IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- AUTOINCREMENT keeps deleted ids from ever being handed out again.
CREATE TABLE IF NOT EXISTS subjects (
    id              INTEGER PRIMARY KEY AUTOINCREMENT,
    name            TEXT    NOT NULL CHECK (length(name) > 0),
    progress        INTEGER NOT NULL DEFAULT 0 CHECK (progress BETWEEN 0 AND 100),
    last_message_at TEXT,            -- RFC 3339 UTC, fixed width; NULL = never
    created_at      TEXT    NOT NULL,-- RFC 3339 UTC, fixed width; write-once
    icon            TEXT    NOT NULL DEFAULT '📚'
);

CREATE INDEX IF NOT EXISTS subjects_recency_idx
    ON subjects(last_message_at DESC, created_at DESC);

PRAGMA user_version = 1;
";
