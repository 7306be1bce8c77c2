//! [`SqliteStore`], the SQLite implementation of [`SubjectStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::OptionalExtension as _;
use tutor_core::{
  store::SubjectStore,
  subject::{NewSubject, SubjectId, SubjectView, clamp_progress},
};

use crate::{
  Result,
  encode::{RawSubject, SUBJECT_COLUMNS, encode_dt},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A subject store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted. Every
/// operation runs as one transaction inside a single `call` on the connection
/// thread; dropping the transaction on an early return rolls it back.
#[derive(Clone)]
pub struct SqliteStore {
  pub(crate) conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  /// Missing parent directories are created.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
      std::fs::create_dir_all(parent)?;
    }

    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.initialize().await?;
    Ok(store)
  }

  /// Open an in-memory store, useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.initialize().await?;
    Ok(store)
  }

  /// Shared write path for progress updates and timestamp touches.
  ///
  /// `None` arguments leave the corresponding column untouched. Returns
  /// `None` when no row has `id`.
  async fn apply_update(
    &self,
    id:       SubjectId,
    progress: Option<u8>,
    touch:    bool,
  ) -> Result<Option<SubjectView>> {
    let now    = Utc::now();
    let at_str = touch.then(|| encode_dt(now));

    let raw: Option<RawSubject> = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let changed = tx.execute(
          "UPDATE subjects
              SET progress        = COALESCE(?2, progress),
                  last_message_at = COALESCE(?3, last_message_at)
            WHERE id = ?1",
          rusqlite::params![id, progress, at_str],
        )?;
        if changed == 0 {
          return Ok(None);
        }
        let raw = select_one(&tx, id)?;
        tx.commit()?;
        Ok(raw)
      })
      .await?;

    Ok(raw.map(|r| r.into_view(now)))
  }
}

fn select_one(
  conn: &rusqlite::Connection,
  id:   SubjectId,
) -> rusqlite::Result<Option<RawSubject>> {
  conn
    .query_row(
      &format!("SELECT {SUBJECT_COLUMNS} FROM subjects WHERE id = ?1"),
      rusqlite::params![id],
      RawSubject::from_row,
    )
    .optional()
}

// ─── SubjectStore impl ───────────────────────────────────────────────────────

impl SubjectStore for SqliteStore {
  type Error = crate::Error;

  async fn initialize(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn create(&self, input: NewSubject) -> Result<SubjectView> {
    let now    = Utc::now();
    let at_str = encode_dt(now);
    let name   = input.name().to_owned();
    let icon   = input.icon().to_owned();

    let raw: RawSubject = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        tx.execute(
          "INSERT INTO subjects (name, progress, last_message_at, created_at, icon)
           VALUES (?1, 0, ?2, ?2, ?3)",
          rusqlite::params![name, at_str, icon],
        )?;
        let id = tx.last_insert_rowid();
        tx.commit()?;
        Ok(RawSubject {
          id,
          name,
          icon,
          progress: 0,
          last_message_at: Some(at_str),
        })
      })
      .await?;

    Ok(raw.into_view(now))
  }

  async fn list_all(&self) -> Result<Vec<SubjectView>> {
    let raws: Vec<RawSubject> = self
      .conn
      .call(|conn| {
        let tx = conn.transaction()?;
        let rows = {
          let mut stmt = tx.prepare(&format!(
            "SELECT {SUBJECT_COLUMNS} FROM subjects
             ORDER BY last_message_at IS NULL,
                      last_message_at DESC,
                      created_at DESC,
                      id DESC"
          ))?;
          let rows = stmt
            .query_map([], RawSubject::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
          rows
        };
        tx.commit()?;
        Ok(rows)
      })
      .await?;

    // One reference instant so labels within a listing are consistent.
    let now = Utc::now();
    Ok(raws.into_iter().map(|r| r.into_view(now)).collect())
  }

  async fn get_by_id(&self, id: SubjectId) -> Result<Option<SubjectView>> {
    let raw: Option<RawSubject> = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let raw = select_one(&tx, id)?;
        tx.commit()?;
        Ok(raw)
      })
      .await?;

    let now = Utc::now();
    Ok(raw.map(|r| r.into_view(now)))
  }

  async fn update_progress(
    &self,
    id:              SubjectId,
    progress:        i64,
    touch_timestamp: bool,
  ) -> Result<Option<SubjectView>> {
    self
      .apply_update(id, Some(clamp_progress(progress)), touch_timestamp)
      .await
  }

  async fn touch_last_message(&self, id: SubjectId) -> Result<Option<SubjectView>> {
    self.apply_update(id, None, true).await
  }

  async fn delete(&self, id: SubjectId) -> Result<bool> {
    let removed: bool = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let changed = tx.execute(
          "DELETE FROM subjects WHERE id = ?1",
          rusqlite::params![id],
        )?;
        tx.commit()?;
        Ok(changed > 0)
      })
      .await?;

    Ok(removed)
  }
}
