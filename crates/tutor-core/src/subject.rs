//! Subject: a topic the student is learning, with progress and recency.
//!
//! The raw `last_message_at` timestamp stays inside the storage backend. Every
//! read path hands out a [`SubjectView`] whose `last_message` is already a
//! relative label (see [`crate::time_ago`]).

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Store-assigned row id. Never reused, never mutated.
pub type SubjectId = i64;

/// Icon used when the caller supplies none, or an empty one.
pub const DEFAULT_ICON: &str = "📚";

pub const MIN_PROGRESS: i64 = 0;
pub const MAX_PROGRESS: i64 = 100;

/// Clamp an arbitrary progress value into `[0, 100]`.
pub fn clamp_progress(progress: i64) -> u8 {
  // Lossless: the clamped value always fits in a u8.
  progress.clamp(MIN_PROGRESS, MAX_PROGRESS) as u8
}

// ─── View ────────────────────────────────────────────────────────────────────

/// The presentation projection of a subject row, computed at read time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectView {
  pub id:           SubjectId,
  pub name:         String,
  pub icon:         String,
  /// Percentage in `[0, 100]`.
  pub progress:     u8,
  /// Relative label such as `"3 hours ago"` or `"Never"`.
  pub last_message: String,
}

// ─── NewSubject ──────────────────────────────────────────────────────────────

/// Validated input to [`crate::store::SubjectStore::create`].
///
/// Fields are private so an empty name can never reach storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSubject {
  name: String,
  icon: String,
}

impl NewSubject {
  /// Build a creation request. `name` must contain something other than
  /// whitespace; a missing or blank `icon` falls back to [`DEFAULT_ICON`].
  pub fn new(name: impl Into<String>, icon: Option<&str>) -> Result<Self> {
    let name = name.into();
    if name.trim().is_empty() {
      return Err(Error::EmptyName);
    }

    let icon = icon
      .map(str::trim)
      .filter(|i| !i.is_empty())
      .unwrap_or(DEFAULT_ICON)
      .to_owned();

    Ok(Self { name, icon })
  }

  pub fn name(&self) -> &str { &self.name }

  pub fn icon(&self) -> &str { &self.icon }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn clamp_progress_bounds() {
    assert_eq!(clamp_progress(-20), 0);
    assert_eq!(clamp_progress(0), 0);
    assert_eq!(clamp_progress(42), 42);
    assert_eq!(clamp_progress(100), 100);
    assert_eq!(clamp_progress(105), 100);
    assert_eq!(clamp_progress(i64::MAX), 100);
    assert_eq!(clamp_progress(i64::MIN), 0);
  }

  #[test]
  fn new_subject_rejects_blank_names() {
    assert!(matches!(NewSubject::new("", None), Err(Error::EmptyName)));
    assert!(matches!(NewSubject::new("   ", None), Err(Error::EmptyName)));
  }

  #[test]
  fn new_subject_defaults_icon() {
    let s = NewSubject::new("Algebra", None).unwrap();
    assert_eq!(s.icon(), DEFAULT_ICON);

    let s = NewSubject::new("Algebra", Some("  ")).unwrap();
    assert_eq!(s.icon(), DEFAULT_ICON);

    let s = NewSubject::new("Algebra", Some("🔢")).unwrap();
    assert_eq!(s.name(), "Algebra");
    assert_eq!(s.icon(), "🔢");
  }

  #[test]
  fn view_serialises_camel_case() {
    let view = SubjectView {
      id:           7,
      name:         "Chemistry".into(),
      icon:         "🧪".into(),
      progress:     30,
      last_message: "2 days ago".into(),
    };
    let json = serde_json::to_value(&view).unwrap();
    assert_eq!(json["lastMessage"], "2 days ago");
    assert_eq!(json["progress"], 30);
    assert!(json.get("last_message_at").is_none());
  }
}
