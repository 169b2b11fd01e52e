//! The `KeyValueStore` trait and the in-memory implementation.
//!
//! The trait is implemented by storage backends (e.g. `walkin-store-sqlite`).
//! Higher layers depend on this abstraction, not on any concrete backend;
//! the repository injects whichever store the application boundary supplies.

use std::{
  collections::HashMap,
  convert::Infallible,
  future::Future,
  sync::{Arc, Mutex, PoisonError},
};

/// Storage key for the JSON-serialized enquiry collection.
pub const ENQUIRIES_KEY: &str = "pg-enquiries";

/// Storage key for the host UI theme preference (`"dark"` / `"light"`).
/// Owned by the host layer; the repository never reads or writes it.
pub const THEME_KEY: &str = "pg-theme";

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a durable key/value store.
///
/// Values are opaque strings; serialization belongs to the caller. An absent
/// key is `Ok(None)`, not an error — callers treat read failures as "no
/// existing data" and decide for themselves whether a write failure is worth
/// surfacing.
pub trait KeyValueStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Read the value stored under `key`.
  fn get<'a>(
    &'a self,
    key: &'a str,
  ) -> impl Future<Output = Result<Option<String>, Self::Error>> + Send + 'a;

  /// Write `value` under `key`, replacing any existing value.
  fn set<'a>(
    &'a self,
    key: &'a str,
    value: &'a str,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;
}

// ─── MemoryStore ─────────────────────────────────────────────────────────────

/// Non-durable store: the transparent substitute when no host-provided store
/// exists, and the fake that makes the repository unit-testable.
///
/// Cloning is cheap — clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
  entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
  pub fn new() -> Self {
    Self::default()
  }

  /// Direct peek at a stored value, for assertions in tests.
  pub fn peek(&self, key: &str) -> Option<String> {
    self
      .entries
      .lock()
      .unwrap_or_else(PoisonError::into_inner)
      .get(key)
      .cloned()
  }
}

impl KeyValueStore for MemoryStore {
  type Error = Infallible;

  async fn get(&self, key: &str) -> Result<Option<String>, Infallible> {
    Ok(
      self
        .entries
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .get(key)
        .cloned(),
    )
  }

  async fn set(&self, key: &str, value: &str) -> Result<(), Infallible> {
    self
      .entries
      .lock()
      .unwrap_or_else(PoisonError::into_inner)
      .insert(key.to_owned(), value.to_owned());
    Ok(())
  }
}
