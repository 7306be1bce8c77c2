//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 UTC strings with a fixed microsecond
//! width, so lexical order in SQL equals chronological order.

use chrono::{DateTime, SecondsFormat, Utc};
use tutor_core::{
  subject::{SubjectId, SubjectView, clamp_progress},
  time_ago::format_time_ago,
};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String {
  dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Column list matching [`RawSubject::from_row`].
pub const SUBJECT_COLUMNS: &str = "id, name, icon, progress, last_message_at";

/// Values read directly from a `subjects` row.
pub struct RawSubject {
  pub id:              SubjectId,
  pub name:            String,
  pub icon:            String,
  pub progress:        i64,
  pub last_message_at: Option<String>,
}

impl RawSubject {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:              row.get(0)?,
      name:            row.get(1)?,
      icon:            row.get(2)?,
      progress:        row.get(3)?,
      last_message_at: row.get(4)?,
    })
  }

  /// Project the row for callers, labelling recency relative to `now`.
  pub fn into_view(self, now: DateTime<Utc>) -> SubjectView {
    SubjectView {
      id:           self.id,
      name:         self.name,
      icon:         self.icon,
      progress:     clamp_progress(self.progress),
      last_message: format_time_ago(self.last_message_at.as_deref(), now),
    }
  }
}
