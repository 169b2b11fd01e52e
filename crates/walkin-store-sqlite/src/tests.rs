//! Integration tests for `SqliteStore` against an in-memory database.

use walkin_core::{
  book::EnquiryBook,
  enquiry::EnquiryDraft,
  store::{ENQUIRIES_KEY, KeyValueStore},
};

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn draft(name: &str, number: &str) -> EnquiryDraft {
  EnquiryDraft {
    name:   name.to_owned(),
    number: number.to_owned(),
    date:   "2024-05-01".to_owned(),
    time:   "10:30".to_owned(),
    note:   None,
  }
}

// ─── Key/value contract ──────────────────────────────────────────────────────

#[tokio::test]
async fn get_missing_key_returns_none() {
  let s = store().await;
  assert_eq!(s.get("absent").await.unwrap(), None);
}

#[tokio::test]
async fn set_then_get_round_trips() {
  let s = store().await;
  s.set("k", "v").await.unwrap();
  assert_eq!(s.get("k").await.unwrap().as_deref(), Some("v"));
}

#[tokio::test]
async fn set_overwrites_existing_value() {
  let s = store().await;
  s.set("k", "first").await.unwrap();
  s.set("k", "second").await.unwrap();
  assert_eq!(s.get("k").await.unwrap().as_deref(), Some("second"));
}

#[tokio::test]
async fn keys_are_independent() {
  let s = store().await;
  s.set("a", "1").await.unwrap();
  s.set("b", "2").await.unwrap();
  assert_eq!(s.get("a").await.unwrap().as_deref(), Some("1"));
  assert_eq!(s.get("b").await.unwrap().as_deref(), Some("2"));
}

#[tokio::test]
async fn values_may_hold_arbitrary_json_text() {
  let s = store().await;
  let blob = r#"[{"id":1,"name":"Asha","note":"likes the 2nd floor \"corner\" room"}]"#;
  s.set(ENQUIRIES_KEY, blob).await.unwrap();

  let raw = s.get(ENQUIRIES_KEY).await.unwrap().unwrap();
  assert_eq!(raw, blob);
  serde_json::from_str::<serde_json::Value>(&raw).expect("stored blob stays valid JSON");
}

// ─── Repository over SQLite ──────────────────────────────────────────────────

#[tokio::test]
async fn book_round_trips_through_sqlite() {
  let s = store().await;
  let mut book = EnquiryBook::load(s.clone()).await;

  book.add(draft("Asha", "9000000000")).await.unwrap();
  let second = book.add(draft("Binod", "9111111111")).await.unwrap();
  book.set_completed(second.id, true).await.unwrap();

  let reloaded = EnquiryBook::load(s).await;
  assert_eq!(reloaded.snapshot(), book.snapshot());
}

#[tokio::test]
async fn empty_book_round_trips_through_sqlite() {
  let s = store().await;
  let mut book = EnquiryBook::load(s.clone()).await;
  let created = book.add(draft("Asha", "9000000000")).await.unwrap();
  book.remove(created.id).await;

  assert_eq!(s.get(ENQUIRIES_KEY).await.unwrap().as_deref(), Some("[]"));
  assert!(EnquiryBook::load(s).await.is_empty());
}

#[tokio::test]
async fn data_survives_reopening_the_same_file() {
  let path = std::env::temp_dir().join(format!(
    "walkin-store-test-{}-reopen.db",
    std::process::id()
  ));
  let _ = std::fs::remove_file(&path);

  {
    let s = SqliteStore::open(&path).await.expect("open store file");
    s.set("k", "durable").await.unwrap();
  }

  let reopened = SqliteStore::open(&path).await.expect("reopen store file");
  assert_eq!(reopened.get("k").await.unwrap().as_deref(), Some("durable"));

  let _ = std::fs::remove_file(&path);
}
