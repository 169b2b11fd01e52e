//! Human-readable date/time labels for rendering layers.
//!
//! Total over arbitrary input: missing or unparseable strings yield
//! placeholders, never a panic.

use chrono::{Local, NaiveDate, NaiveTime};

/// Shown when a date is missing or unparseable.
pub const DATE_PLACEHOLDER: &str = "--";
/// Shown when a time is missing or unparseable.
pub const TIME_PLACEHOLDER: &str = "--:--";

/// `"Today"`, `"Tomorrow"`, or a short form like `"24 Aug"`, relative to
/// the local calendar day.
pub fn format_date(date_str: &str) -> String {
  format_date_on(date_str, Local::now().date_naive())
}

/// Same as [`format_date`] with an explicit "today", so the relative labels
/// are deterministic under test.
pub fn format_date_on(date_str: &str, today: NaiveDate) -> String {
  let Ok(date) = NaiveDate::parse_from_str(date_str, "%Y-%m-%d") else {
    return DATE_PLACEHOLDER.to_owned();
  };

  if date == today {
    return "Today".to_owned();
  }
  if Some(date) == today.succ_opt() {
    return "Tomorrow".to_owned();
  }
  date.format("%-d %b").to_string()
}

/// 24h `HH:MM` to a 12h `H:MM AM/PM` label.
pub fn format_time(time_str: &str) -> String {
  let Ok(time) = NaiveTime::parse_from_str(time_str, "%H:%M") else {
    return TIME_PLACEHOLDER.to_owned();
  };
  time.format("%-I:%M %p").to_string()
}
