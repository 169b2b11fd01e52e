//! Core types and logic for the Walkin enquiry tracker.
//!
//! This crate is deliberately free of database and transport dependencies.
//! It owns the enquiry record type, the repository with its write-through
//! persistence semantics, the display ordering and search rules, the
//! date/time presentation formatters, and the transient interaction state
//! that rendering layers drive.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod book;
pub mod enquiry;
pub mod error;
pub mod format;
pub mod order;
pub mod session;
pub mod store;

pub use error::{Error, Result};
