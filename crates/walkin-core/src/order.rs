//! Display ordering and text search over enquiry snapshots.
//!
//! Both operations are pure, non-mutating transformations; the stored
//! collection keeps its insertion order.

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::enquiry::Enquiry;

/// Substitutes for empty date/time values, preserved from the original
/// storage format: an unscheduled visit sorts like one scheduled at the
/// epoch, at the front of its completion group.
const FALLBACK_DATE: &str = "1970-01-01";
const FALLBACK_TIME: &str = "00:00";

/// Sort key: `completed` ascending (pending first, regardless of date),
/// then parseability (records whose date/time fails to parse go after
/// every valid record of their completion group), then the scheduled
/// instant ascending.
fn sort_key(enquiry: &Enquiry) -> (bool, bool, NaiveDateTime) {
  let date = if enquiry.date.is_empty() {
    FALLBACK_DATE
  } else {
    &enquiry.date
  };
  let time = if enquiry.time.is_empty() {
    FALLBACK_TIME
  } else {
    &enquiry.time
  };

  match NaiveDateTime::parse_from_str(&format!("{date}T{time}"), "%Y-%m-%dT%H:%M") {
    Ok(dt) => (enquiry.completed, false, dt),
    Err(_) => (enquiry.completed, true, DateTime::<Utc>::UNIX_EPOCH.naive_utc()),
  }
}

/// Order a snapshot for display. The sort is stable, so ties keep their
/// insertion order.
pub fn sorted_for_display<'a, I>(items: I) -> Vec<&'a Enquiry>
where
  I: IntoIterator<Item = &'a Enquiry>,
{
  let mut list: Vec<&Enquiry> = items.into_iter().collect();
  list.sort_by_cached_key(|e| sort_key(e));
  list
}

/// Case-insensitive substring match on `name`, plain substring match on
/// `number`. An empty term matches everything. Filtering commutes with
/// [`sorted_for_display`] since it never depends on order.
pub fn matches_search(enquiry: &Enquiry, term: &str) -> bool {
  if term.is_empty() {
    return true;
  }
  enquiry.name.to_lowercase().contains(&term.to_lowercase())
    || enquiry.number.contains(term)
}
