//! Error types for `walkin-core`.
//!
//! Nothing here is fatal to a host process: validation errors keep the form
//! open, a missing id degrades to a logged no-op, and persistence failures
//! never surface past the repository (the in-memory collection stays
//! authoritative for the session).

use thiserror::Error;

use crate::enquiry::{EnquiryId, Field};

#[derive(Debug, Error)]
pub enum Error {
  /// A draft failed the required-field gate on add or update. The stored
  /// collection is untouched when this is returned.
  #[error("missing required fields: {}", list_fields(.missing))]
  Validation { missing: Vec<Field> },

  #[error("enquiry not found: {0}")]
  NotFound(EnquiryId),

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

impl Error {
  pub fn is_validation(&self) -> bool {
    matches!(self, Self::Validation { .. })
  }
}

fn list_fields(fields: &[Field]) -> String {
  fields
    .iter()
    .map(ToString::to_string)
    .collect::<Vec<_>>()
    .join(", ")
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
