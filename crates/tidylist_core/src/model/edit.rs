//! Edit cursor state.
//!
//! # Responsibility
//! - Track which task is currently being edited and the in-progress draft
//!   text.
//!
//! # Invariants
//! - At most one cursor exists at a time (enforced by the store holding an
//!   `Option<EditCursor>`).
//! - An active cursor references an id present in the task list.

use crate::model::task::{cap_chars, TaskId, MAX_TASK_TEXT_CHARS};

/// Reference to the single task under edit plus its scratch draft text.
///
/// Absence of a cursor means no task is being edited. The draft is a
/// scratch buffer only; nothing touches the task list until the edit is
/// committed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditCursor {
    target: TaskId,
    draft: String,
}

impl EditCursor {
    /// Starts an edit of `target` with the given initial draft text.
    pub fn new(target: TaskId, draft: impl Into<String>) -> Self {
        let mut cursor = Self {
            target,
            draft: String::new(),
        };
        cursor.set_draft(draft);
        cursor
    }

    /// Id of the task under edit.
    pub fn target(&self) -> TaskId {
        self.target
    }

    /// Current scratch draft text.
    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// Replaces the scratch draft, capped at the task text limit.
    pub fn set_draft(&mut self, draft: impl Into<String>) {
        let draft = draft.into();
        self.draft = cap_chars(&draft, MAX_TASK_TEXT_CHARS);
    }
}
