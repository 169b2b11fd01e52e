//! Enquiry record types — the fundamental unit of the tracker.
//!
//! An enquiry is a prospective tenant's scheduled visit. Serialized field
//! names stay camelCase so the persisted blob remains compatible with the
//! storage format the original mobile app wrote.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier for an enquiry: the millisecond Unix timestamp at creation,
/// bumped past the current collection maximum on collision so ids stay
/// unique and monotonically increasing for the life of the process.
pub type EnquiryId = i64;

// ─── Required fields ─────────────────────────────────────────────────────────

/// The fields a draft must fill before it may be persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
  Name,
  Number,
  Date,
  Time,
}

impl fmt::Display for Field {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(match self {
      Self::Name => "name",
      Self::Number => "number",
      Self::Date => "date",
      Self::Time => "time",
    })
  }
}

// ─── Enquiry ─────────────────────────────────────────────────────────────────

/// A logged visit enquiry. `id` and `created_at` never change after
/// creation; `completed` only ever toggles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enquiry {
  pub id:         EnquiryId,
  pub name:       String,
  /// Contact phone, stored exactly as entered — no normalization.
  pub number:     String,
  /// Scheduled visit date, ISO `YYYY-MM-DD`.
  pub date:       String,
  /// Scheduled visit time, 24h `HH:MM`.
  pub time:       String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub note:       Option<String>,
  pub completed:  bool,
  /// Set once at creation; never mutated afterwards.
  #[serde(rename = "createdAt")]
  pub created_at: DateTime<Utc>,
}

// ─── EnquiryDraft ────────────────────────────────────────────────────────────

/// Input to [`crate::book::EnquiryBook::add`] and
/// [`crate::book::EnquiryBook::update`].
/// `id`, `completed`, and `created_at` are always assigned by the book; they
/// are not accepted from callers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnquiryDraft {
  pub name:   String,
  pub number: String,
  pub date:   String,
  pub time:   String,
  #[serde(default)]
  pub note:   Option<String>,
}

impl EnquiryDraft {
  /// Required fields that are empty, in declaration order. An empty vec
  /// means the draft may be persisted.
  pub fn missing_fields(&self) -> Vec<Field> {
    let mut missing = Vec::new();
    if self.name.is_empty() {
      missing.push(Field::Name);
    }
    if self.number.is_empty() {
      missing.push(Field::Number);
    }
    if self.date.is_empty() {
      missing.push(Field::Date);
    }
    if self.time.is_empty() {
      missing.push(Field::Time);
    }
    missing
  }
}

/// Prefill for the edit form.
impl From<&Enquiry> for EnquiryDraft {
  fn from(enquiry: &Enquiry) -> Self {
    Self {
      name:   enquiry.name.clone(),
      number: enquiry.number.clone(),
      date:   enquiry.date.clone(),
      time:   enquiry.time.clone(),
      note:   enquiry.note.clone(),
    }
  }
}
