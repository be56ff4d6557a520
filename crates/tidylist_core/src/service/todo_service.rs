//! Todo store use-case service.
//!
//! # Responsibility
//! - Own the current task-list snapshot, the edit cursor and the pending
//!   input buffer.
//! - Apply user intents as value transformations and persist every new
//!   snapshot before returning.
//!
//! # Invariants
//! - Every successful mutation is written to storage before the call
//!   returns; no-op intents never touch storage.
//! - An active cursor always references a task present in the list.
//! - Empty or whitespace-only text is rejected as a silent no-op, not an
//!   error.

use crate::model::edit::EditCursor;
use crate::model::list::TaskList;
use crate::model::task::{cap_chars, normalize_text, Task, TaskId, TaskIdGen, MAX_TASK_TEXT_CHARS};
use crate::repo::snapshot_repo::{RepoResult, SnapshotRepository};
use log::{debug, info};

/// View-state manager for the task list.
///
/// The store hands out read-only snapshots; the view layer re-renders from
/// the returned reference after every operation. Persistence is a
/// post-mutation hook applied inside each operation, so callers never have
/// to remember to save.
pub struct TodoStore<R: SnapshotRepository> {
    repo: R,
    tasks: TaskList,
    cursor: Option<EditCursor>,
    pending_input: String,
    ids: TaskIdGen,
}

impl<R: SnapshotRepository> TodoStore<R> {
    /// Opens a store over the given repository, restoring the persisted
    /// snapshot.
    ///
    /// Absent or malformed snapshots restore as the empty list. The id
    /// generator is seeded above every restored id so restarts never reuse
    /// an id.
    pub fn open(repo: R) -> RepoResult<Self> {
        let tasks = repo.load_snapshot()?;
        let ids = TaskIdGen::seeded(tasks.max_id().unwrap_or(0));
        info!(
            "event=store_open module=service status=ok len={}",
            tasks.len()
        );
        Ok(Self {
            repo,
            tasks,
            cursor: None,
            pending_input: String::new(),
            ids,
        })
    }

    /// Current task-list snapshot in display order.
    pub fn tasks(&self) -> &TaskList {
        &self.tasks
    }

    /// Active edit cursor, if a task is being edited.
    pub fn cursor(&self) -> Option<&EditCursor> {
        self.cursor.as_ref()
    }

    /// Returns whether the task with `id` is currently under edit.
    pub fn is_editing(&self, id: TaskId) -> bool {
        self.cursor
            .as_ref()
            .is_some_and(|cursor| cursor.target() == id)
    }

    /// Current pending new-task input text.
    pub fn pending_input(&self) -> &str {
        &self.pending_input
    }

    /// Replaces the pending new-task input, capped at the task text limit.
    pub fn set_pending_input(&mut self, text: &str) {
        self.pending_input = cap_chars(text, MAX_TASK_TEXT_CHARS);
    }

    /// Adds a task from the pending input buffer.
    ///
    /// The buffer is cleared only when a task was actually inserted;
    /// whitespace-only input leaves both list and buffer untouched.
    pub fn submit_input(&mut self) -> RepoResult<&TaskList> {
        let raw = self.pending_input.clone();
        let len_before = self.tasks.len();
        self.add(&raw)?;
        if self.tasks.len() > len_before {
            self.pending_input.clear();
        }
        Ok(&self.tasks)
    }

    /// Prepends a fresh task built from `raw_text`.
    ///
    /// Text is trimmed and capped; empty results are a silent no-op that
    /// returns the current snapshot without writing.
    pub fn add(&mut self, raw_text: &str) -> RepoResult<&TaskList> {
        let Some(text) = normalize_text(raw_text) else {
            debug!("event=task_add module=service status=noop reason=empty_text");
            return Ok(&self.tasks);
        };

        let id = self.ids.next();
        let next = self.tasks.with_added(Task::new(id, text));
        self.repo.save_snapshot(&next)?;
        self.tasks = next;
        info!(
            "event=task_add module=service status=ok id={id} len={}",
            self.tasks.len()
        );
        Ok(&self.tasks)
    }

    /// Inverts the `completed` flag of the task with `id`.
    ///
    /// Unknown ids are a silent no-op without a storage write.
    pub fn toggle(&mut self, id: TaskId) -> RepoResult<&TaskList> {
        if !self.tasks.contains(id) {
            debug!("event=task_toggle module=service status=noop reason=unknown_id id={id}");
            return Ok(&self.tasks);
        }

        let next = self.tasks.with_toggled(id);
        self.repo.save_snapshot(&next)?;
        self.tasks = next;
        info!(
            "event=task_toggle module=service status=ok id={id} remaining={}",
            self.tasks.remaining_count()
        );
        Ok(&self.tasks)
    }

    /// Removes the task with `id`.
    ///
    /// Unknown ids are a silent no-op. When the removed task was under
    /// edit, the cursor is cleared as well.
    pub fn remove(&mut self, id: TaskId) -> RepoResult<&TaskList> {
        if !self.tasks.contains(id) {
            debug!("event=task_remove module=service status=noop reason=unknown_id id={id}");
            return Ok(&self.tasks);
        }

        let next = self.tasks.without(id);
        self.repo.save_snapshot(&next)?;
        self.tasks = next;
        if self.is_editing(id) {
            self.cursor = None;
        }
        info!(
            "event=task_remove module=service status=ok id={id} len={}",
            self.tasks.len()
        );
        Ok(&self.tasks)
    }

    /// Starts editing the task with `id`, seeding the draft with
    /// `current_text`.
    ///
    /// Beginning a new edit silently discards any unsaved draft from a
    /// previous edit. Unknown ids leave the cursor unchanged.
    pub fn begin_edit(&mut self, id: TaskId, current_text: &str) {
        if !self.tasks.contains(id) {
            debug!("event=edit_begin module=service status=noop reason=unknown_id id={id}");
            return;
        }
        self.cursor = Some(EditCursor::new(id, current_text));
        debug!("event=edit_begin module=service status=ok id={id}");
    }

    /// Updates the scratch draft of the active edit.
    ///
    /// No-op when no edit is active.
    pub fn set_edit_draft(&mut self, text: &str) {
        match self.cursor.as_mut() {
            Some(cursor) => cursor.set_draft(text),
            None => debug!("event=edit_draft module=service status=noop reason=no_cursor"),
        }
    }

    /// Commits the active edit, replacing the target task's text.
    ///
    /// An empty or whitespace-only draft behaves as a cancel: the cursor is
    /// cleared and the list stays untouched. Repeated commits with the
    /// cursor already cleared are no-ops. Blur-triggered saves in the view
    /// map here (blur saves, it does not cancel).
    pub fn commit_edit(&mut self) -> RepoResult<&TaskList> {
        let Some(cursor) = self.cursor.take() else {
            debug!("event=edit_commit module=service status=noop reason=no_cursor");
            return Ok(&self.tasks);
        };

        let target = cursor.target();
        let Some(text) = normalize_text(cursor.draft()) else {
            debug!("event=edit_commit module=service status=cancelled reason=empty_draft id={target}");
            return Ok(&self.tasks);
        };

        let next = self.tasks.with_text(target, text);
        self.repo.save_snapshot(&next)?;
        self.tasks = next;
        info!("event=edit_commit module=service status=ok id={target}");
        Ok(&self.tasks)
    }

    /// Abandons the active edit, discarding the draft unconditionally.
    ///
    /// Never mutates the task list or storage.
    pub fn cancel_edit(&mut self) {
        if self.cursor.take().is_some() {
            debug!("event=edit_cancel module=service status=ok");
        }
    }
}
