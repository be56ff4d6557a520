//! Task domain model and id assignment.
//!
//! # Responsibility
//! - Define the canonical task record persisted in the snapshot blob.
//! - Normalize raw user text into valid task text.
//! - Assign unique, monotonically increasing task ids.
//!
//! # Invariants
//! - `id` is stable and never reused for another task.
//! - Valid task text is non-empty, trimmed and at most
//!   `MAX_TASK_TEXT_CHARS` characters.
//! - Ids issued by one `TaskIdGen` are strictly increasing.

use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// Stable identifier for a task.
///
/// Epoch-millisecond based with a tiebreaker bump, so ids double as a
/// creation-order clock. Kept as a type alias to make semantic intent
/// explicit in signatures.
pub type TaskId = i64;

/// Maximum task text length in characters.
pub const MAX_TASK_TEXT_CHARS: usize = 100;

/// One user-visible task item.
///
/// Field names are the wire format of the persisted snapshot and must not
/// change without a storage migration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Unique id assigned at creation, immutable afterwards.
    pub id: TaskId,
    /// Trimmed, non-empty display text.
    pub text: String,
    /// Completion flag. Starts as `false`.
    pub completed: bool,
}

impl Task {
    /// Creates a fresh, not-completed task.
    ///
    /// Callers pass text that already went through [`normalize_text`].
    pub fn new(id: TaskId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            completed: false,
        }
    }
}

/// Normalizes raw user input into valid task text.
///
/// Returns `None` when the trimmed input is empty; callers treat that as a
/// no-op. Otherwise returns the trimmed text capped at
/// [`MAX_TASK_TEXT_CHARS`] characters.
pub fn normalize_text(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(cap_chars(trimmed, MAX_TASK_TEXT_CHARS))
}

/// Truncates `value` to at most `max_chars` characters.
///
/// Operates on characters, not bytes, so multi-byte input is never split
/// mid-codepoint.
pub(crate) fn cap_chars(value: &str, max_chars: usize) -> String {
    value.chars().take(max_chars).collect()
}

/// Monotonic task id source.
///
/// Ids are current epoch milliseconds; whenever the clock has not advanced
/// past the previously issued id, the next id is bumped to `last + 1`, so
/// rapid successive adds still receive distinct, ordered ids.
#[derive(Debug, Clone, Default)]
pub struct TaskIdGen {
    last: TaskId,
}

impl TaskIdGen {
    /// Creates a generator with no issued ids.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restores the high-water mark from already-persisted ids, so tasks
    /// created after a restart never collide with restored ones.
    pub fn seeded(max_existing: TaskId) -> Self {
        Self { last: max_existing }
    }

    /// Issues the next id, strictly greater than every id issued before.
    pub fn next(&mut self) -> TaskId {
        let now = epoch_millis();
        self.last = if now > self.last { now } else { self.last + 1 };
        self.last
    }
}

fn epoch_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .ok()
        .and_then(|elapsed| i64::try_from(elapsed.as_millis()).ok())
        .unwrap_or(0)
}
