//! Transient interaction state and the [`Tracker`] facade.
//!
//! Nothing in this module is persisted; a reload always starts [`SessionState::Idle`].
//! The tracker is the surface a rendering layer drives: it reads
//! [`Tracker::visible`] and [`Tracker::session`], and calls the handlers.
//! The tracker itself never renders or navigates.

use tracing::warn;

use crate::{
  book::EnquiryBook,
  enquiry::{Enquiry, EnquiryDraft, EnquiryId},
  error::Result,
  order,
  store::KeyValueStore,
};

// ─── SessionState ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
  #[default]
  Idle,
  /// The add/edit form is showing. `editing` is `None` for a new enquiry.
  FormOpen { editing: Option<EnquiryId> },
  /// A delete was requested and awaits confirmation.
  DeleteConfirmPending { target: EnquiryId },
}

// ─── Tracker ─────────────────────────────────────────────────────────────────

/// Owns the repository, the transient session state, and the current search
/// term.
pub struct Tracker<S> {
  book:    EnquiryBook<S>,
  session: SessionState,
  search:  String,
}

impl<S: KeyValueStore> Tracker<S> {
  /// Load the collection from `store` and start `Idle` with no filter.
  pub async fn load(store: S) -> Self {
    Self {
      book:    EnquiryBook::load(store).await,
      session: SessionState::Idle,
      search:  String::new(),
    }
  }

  // ── Read-only views ───────────────────────────────────────────────────

  pub fn session(&self) -> SessionState {
    self.session
  }

  pub fn search_term(&self) -> &str {
    &self.search
  }

  /// The current filtered, display-ordered snapshot.
  pub fn visible(&self) -> Vec<&Enquiry> {
    order::sorted_for_display(
      self
        .book
        .snapshot()
        .iter()
        .filter(|e| order::matches_search(e, &self.search)),
    )
  }

  pub fn pending_count(&self) -> usize {
    self.book.snapshot().iter().filter(|e| !e.completed).count()
  }

  pub fn completed_count(&self) -> usize {
    self.book.snapshot().iter().filter(|e| e.completed).count()
  }

  // ── Form ──────────────────────────────────────────────────────────────

  /// `Idle → FormOpen(None)`. Ignored outside `Idle`.
  pub fn open_add_form(&mut self) {
    if self.session == SessionState::Idle {
      self.session = SessionState::FormOpen { editing: None };
    }
  }

  /// `Idle → FormOpen(Some id)`. Returns the draft prefilled from the
  /// selected record; an unknown id is logged and leaves the state alone.
  pub fn open_edit_form(&mut self, id: EnquiryId) -> Option<EnquiryDraft> {
    if self.session != SessionState::Idle {
      return None;
    }
    let Some(enquiry) = self.book.get(id) else {
      warn!(id, "edit requested for unknown enquiry");
      return None;
    };
    let draft = EnquiryDraft::from(enquiry);
    self.session = SessionState::FormOpen { editing: Some(id) };
    Some(draft)
  }

  /// `FormOpen(_) → Idle` without touching the repository.
  pub fn cancel_form(&mut self) {
    if matches!(self.session, SessionState::FormOpen { .. }) {
      self.session = SessionState::Idle;
    }
  }

  /// Submit the form: adds a new record, or updates the one being edited.
  /// On success the session returns to `Idle`; on failure (validation, or
  /// the edited record vanished) the form stays open and the error is
  /// returned for the rendering layer to show.
  pub async fn submit(&mut self, draft: EnquiryDraft) -> Result<Enquiry> {
    let editing = match self.session {
      SessionState::FormOpen { editing } => editing,
      // Submitting without an open form behaves like a plain add; rendering
      // layers normally open the form first.
      _ => None,
    };

    let result = match editing {
      Some(id) => self.book.update(id, draft).await,
      None => self.book.add(draft).await,
    };

    if result.is_ok() {
      self.session = SessionState::Idle;
    }
    result
  }

  // ── Completion ────────────────────────────────────────────────────────

  /// Mark `id` completed. A missing id is logged and ignored.
  pub async fn complete(&mut self, id: EnquiryId) {
    self.set_completed(id, true).await;
  }

  /// Put `id` back to pending. A missing id is logged and ignored.
  pub async fn undo(&mut self, id: EnquiryId) {
    self.set_completed(id, false).await;
  }

  async fn set_completed(&mut self, id: EnquiryId, value: bool) {
    if let Err(e) = self.book.set_completed(id, value).await {
      warn!(id, error = %e, "completion toggle ignored");
    }
  }

  // ── Delete ────────────────────────────────────────────────────────────

  /// `Idle → DeleteConfirmPending(id)`. Ignored outside `Idle`.
  pub fn request_delete(&mut self, id: EnquiryId) {
    if self.session == SessionState::Idle {
      self.session = SessionState::DeleteConfirmPending { target: id };
    }
  }

  /// Remove the record whose delete is pending, then return to `Idle`.
  /// No-op when no delete is pending.
  pub async fn confirm_delete(&mut self) {
    if let SessionState::DeleteConfirmPending { target } = self.session {
      self.book.remove(target).await;
      self.session = SessionState::Idle;
    }
  }

  /// `DeleteConfirmPending → Idle`, leaving the record in place.
  pub fn cancel_delete(&mut self) {
    if matches!(self.session, SessionState::DeleteConfirmPending { .. }) {
      self.session = SessionState::Idle;
    }
  }

  // ── Search ────────────────────────────────────────────────────────────

  pub fn set_search_term(&mut self, term: impl Into<String>) {
    self.search = term.into();
  }
}
