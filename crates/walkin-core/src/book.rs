//! [`EnquiryBook`] — the in-memory enquiry collection with write-through
//! persistence.
//!
//! Every mutation updates the in-memory collection first and then rewrites
//! the whole serialized collection to the injected store. Persistence
//! failure never rolls back the in-memory change; it is logged and the
//! session carries on with memory as the source of truth.

use chrono::Utc;
use tracing::warn;

use crate::{
  enquiry::{Enquiry, EnquiryDraft, EnquiryId},
  error::{Error, Result},
  store::{ENQUIRIES_KEY, KeyValueStore},
};

pub struct EnquiryBook<S> {
  store: S,
  items: Vec<Enquiry>,
}

impl<S: KeyValueStore> EnquiryBook<S> {
  /// Read the serialized collection from `store` and build the book around
  /// it. A missing key, a read failure, or a corrupt blob all yield an
  /// empty collection — never an error.
  pub async fn load(store: S) -> Self {
    let items = match store.get(ENQUIRIES_KEY).await {
      Ok(Some(raw)) => match serde_json::from_str(&raw) {
        Ok(items) => items,
        Err(e) => {
          warn!(error = %e, "corrupt enquiry blob, starting empty");
          Vec::new()
        }
      },
      Ok(None) => Vec::new(),
      Err(e) => {
        warn!(error = %e, "failed to read enquiries, starting empty");
        Vec::new()
      }
    };
    Self { store, items }
  }

  // ── Reads ─────────────────────────────────────────────────────────────

  /// The collection in insertion order. Display ordering is applied by
  /// [`crate::order`] over this snapshot; the stored collection itself is
  /// never reordered.
  pub fn snapshot(&self) -> &[Enquiry] {
    &self.items
  }

  pub fn get(&self, id: EnquiryId) -> Option<&Enquiry> {
    self.items.iter().find(|e| e.id == id)
  }

  pub fn len(&self) -> usize {
    self.items.len()
  }

  pub fn is_empty(&self) -> bool {
    self.items.is_empty()
  }

  // ── Mutations ─────────────────────────────────────────────────────────

  /// Validate `draft`, assign `id` and `created_at`, and append the new
  /// record with `completed = false`. Returns the created record.
  pub async fn add(&mut self, draft: EnquiryDraft) -> Result<Enquiry> {
    let missing = draft.missing_fields();
    if !missing.is_empty() {
      return Err(Error::Validation { missing });
    }

    let enquiry = Enquiry {
      id:         self.next_id(),
      name:       draft.name,
      number:     draft.number,
      date:       draft.date,
      time:       draft.time,
      note:       draft.note,
      completed:  false,
      created_at: Utc::now(),
    };

    self.items.push(enquiry.clone());
    self.write_through().await;
    Ok(enquiry)
  }

  /// Merge `draft` into the record matching `id`. `id`, `completed`, and
  /// `created_at` are preserved. Returns the updated record.
  pub async fn update(&mut self, id: EnquiryId, draft: EnquiryDraft) -> Result<Enquiry> {
    let missing = draft.missing_fields();
    if !missing.is_empty() {
      return Err(Error::Validation { missing });
    }

    let Some(item) = self.items.iter_mut().find(|e| e.id == id) else {
      return Err(Error::NotFound(id));
    };

    item.name = draft.name;
    item.number = draft.number;
    item.date = draft.date;
    item.time = draft.time;
    item.note = draft.note;
    let updated = item.clone();

    self.write_through().await;
    Ok(updated)
  }

  /// Idempotent completion toggle. A record already in the target state is
  /// left alone, but the write still happens.
  pub async fn set_completed(&mut self, id: EnquiryId, value: bool) -> Result<()> {
    let Some(item) = self.items.iter_mut().find(|e| e.id == id) else {
      return Err(Error::NotFound(id));
    };

    if item.completed != value {
      item.completed = value;
    }

    self.write_through().await;
    Ok(())
  }

  /// Delete the record matching `id`. Silent no-op on an absent id; the
  /// write still happens.
  pub async fn remove(&mut self, id: EnquiryId) {
    self.items.retain(|e| e.id != id);
    self.write_through().await;
  }

  // ── Internals ─────────────────────────────────────────────────────────

  /// Millisecond timestamp id, bumped past the collection maximum when two
  /// records land within the same millisecond.
  fn next_id(&self) -> EnquiryId {
    let now = Utc::now().timestamp_millis();
    let max = self.items.iter().map(|e| e.id).max().unwrap_or(0);
    if now > max { now } else { max + 1 }
  }

  /// Rewrite the whole collection to the store. Failure is logged and
  /// swallowed: in-memory state remains authoritative for the session.
  async fn write_through(&self) {
    let raw = match serde_json::to_string(&self.items) {
      Ok(raw) => raw,
      Err(e) => {
        warn!(error = %e, "failed to serialize enquiries, skipping write");
        return;
      }
    };
    if let Err(e) = self.store.set(ENQUIRIES_KEY, &raw).await {
      warn!(error = %e, "failed to persist enquiries, in-memory state retained");
    }
  }
}
