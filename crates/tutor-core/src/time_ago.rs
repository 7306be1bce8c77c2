//! Coarse relative-age labels ("3 hours ago") for subject recency.
//!
//! Thresholds are fixed second counts; a "month" is 30 days, not a calendar
//! month.

use chrono::{DateTime, NaiveDateTime, Utc};

const MINUTE: i64 = 60;
const HOUR: i64 = 3_600;
const DAY: i64 = 86_400;
const WEEK: i64 = 604_800;
const MONTH: i64 = 2_592_000;

/// Label for a subject that has never been interacted with.
pub const NEVER: &str = "Never";
/// Label for a stored timestamp that could not be parsed.
pub const UNKNOWN: &str = "Unknown";
/// Label for anything under a minute old, including future timestamps.
pub const JUST_NOW: &str = "Just now";

/// Format an optional stored timestamp relative to `now`.
///
/// Never fails: a missing timestamp yields [`NEVER`] and an unparsable one
/// yields [`UNKNOWN`].
pub fn format_time_ago(timestamp: Option<&str>, now: DateTime<Utc>) -> String {
  match timestamp {
    None => NEVER.to_owned(),
    Some(raw) => match parse_timestamp(raw) {
      Some(then) => time_ago(then, now),
      None => UNKNOWN.to_owned(),
    },
  }
}

/// Format the distance between `then` and `now`.
pub fn time_ago(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
  let elapsed = (now - then).num_seconds();

  if elapsed < MINUTE {
    JUST_NOW.to_owned()
  } else if elapsed < HOUR {
    plural(elapsed / MINUTE, "minute")
  } else if elapsed < DAY {
    plural(elapsed / HOUR, "hour")
  } else if elapsed < WEEK {
    plural(elapsed / DAY, "day")
  } else if elapsed < MONTH {
    plural(elapsed / WEEK, "week")
  } else {
    plural(elapsed / MONTH, "month")
  }
}

fn plural(n: i64, unit: &str) -> String {
  if n == 1 {
    format!("{n} {unit} ago")
  } else {
    format!("{n} {unit}s ago")
  }
}

/// Accepts RFC 3339 with any offset, or a naive ISO-8601 date-time (with `T`
/// or a space separator) which is taken to be UTC.
fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
  let raw = raw.trim();
  if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
    return Some(dt.with_timezone(&Utc));
  }
  ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
    .iter()
    .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
    .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
  use chrono::{Duration, TimeZone};

  use super::*;

  fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap()
  }

  fn ago(secs: i64) -> String { time_ago(now() - Duration::seconds(secs), now()) }

  #[test]
  fn absent_timestamp_is_never() {
    assert_eq!(format_time_ago(None, now()), "Never");
  }

  #[test]
  fn garbage_timestamp_is_unknown() {
    assert_eq!(format_time_ago(Some("yesterday-ish"), now()), "Unknown");
    assert_eq!(format_time_ago(Some(""), now()), "Unknown");
  }

  #[test]
  fn same_instant_is_just_now() {
    assert_eq!(ago(0), "Just now");
    assert_eq!(ago(59), "Just now");
  }

  #[test]
  fn future_timestamp_is_just_now() {
    assert_eq!(ago(-3_600), "Just now");
  }

  #[test]
  fn minute_boundary() {
    assert_eq!(ago(60), "1 minute ago");
    assert_eq!(ago(119), "1 minute ago");
    assert_eq!(ago(120), "2 minutes ago");
    assert_eq!(ago(3_599), "59 minutes ago");
  }

  #[test]
  fn hour_boundary() {
    assert_eq!(ago(3_600), "1 hour ago");
    assert_eq!(ago(7_200), "2 hours ago");
    assert_eq!(ago(86_399), "23 hours ago");
  }

  #[test]
  fn days_weeks_months() {
    assert_eq!(ago(86_400), "1 day ago");
    assert_eq!(ago(3 * 86_400), "3 days ago");
    assert_eq!(ago(604_800), "1 week ago");
    assert_eq!(ago(3 * 604_800), "3 weeks ago");
    assert_eq!(ago(2_592_000), "1 month ago");
    assert_eq!(ago(14 * 2_592_000), "14 months ago");
  }

  #[test]
  fn parses_rfc3339_with_offset() {
    // 13:00 at +01:00 is 12:00 UTC.
    let label = format_time_ago(Some("2026-10-19T13:00:00+01:00"), now());
    assert_eq!(label, "Just now");

    let label = format_time_ago(Some("2026-10-19T09:30:00.000000Z"), now());
    assert_eq!(label, "2 hours ago");
  }

  #[test]
  fn parses_naive_timestamps_as_utc() {
    let label = format_time_ago(Some("2026-10-19T11:55:00"), now());
    assert_eq!(label, "5 minutes ago");

    let label = format_time_ago(Some("2026-10-12 11:59:59.5"), now());
    assert_eq!(label, "1 week ago");
  }
}
