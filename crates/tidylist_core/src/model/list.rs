//! Ordered task-list snapshot.
//!
//! # Responsibility
//! - Hold tasks in display order, newest first.
//! - Provide the value-semantic transformations applied by the store.
//!
//! # Invariants
//! - Task ids within one list are unique.
//! - Transformations targeting unknown ids return an unchanged list.

use crate::model::task::{Task, TaskId};
use serde::{Deserialize, Serialize};

/// Ordered collection of tasks, newest first.
///
/// Every mutation is a full-list value transformation returning a new
/// snapshot, so callers can detect change by value comparison. Serializes
/// transparently as the wire-format task array.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskList {
    tasks: Vec<Task>,
}

impl TaskList {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a list from restored tasks, keeping display order.
    ///
    /// Duplicate ids in restored data keep their first occurrence; later
    /// duplicates are dropped to uphold the unique-id invariant.
    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        let mut deduped: Vec<Task> = Vec::with_capacity(tasks.len());
        for task in tasks {
            if !deduped.iter().any(|existing| existing.id == task.id) {
                deduped.push(task);
            }
        }
        Self { tasks: deduped }
    }

    /// Returns a new list with `task` prepended.
    ///
    /// A task whose id is already present is rejected as a silent no-op.
    pub fn with_added(&self, task: Task) -> Self {
        if self.contains(task.id) {
            return self.clone();
        }
        let mut tasks = Vec::with_capacity(self.tasks.len() + 1);
        tasks.push(task);
        tasks.extend(self.tasks.iter().cloned());
        Self { tasks }
    }

    /// Returns a new list with the matching task's `completed` flag
    /// inverted. Unknown ids yield an identical list.
    pub fn with_toggled(&self, id: TaskId) -> Self {
        let tasks = self
            .tasks
            .iter()
            .map(|task| {
                if task.id == id {
                    Task {
                        completed: !task.completed,
                        ..task.clone()
                    }
                } else {
                    task.clone()
                }
            })
            .collect();
        Self { tasks }
    }

    /// Returns a new list with the matching task removed. Unknown ids yield
    /// an identical list.
    pub fn without(&self, id: TaskId) -> Self {
        let tasks = self
            .tasks
            .iter()
            .filter(|task| task.id != id)
            .cloned()
            .collect();
        Self { tasks }
    }

    /// Returns a new list with the matching task's text replaced. Unknown
    /// ids yield an identical list.
    pub fn with_text(&self, id: TaskId, text: impl Into<String>) -> Self {
        let text = text.into();
        let tasks = self
            .tasks
            .iter()
            .map(|task| {
                if task.id == id {
                    Task {
                        text: text.clone(),
                        ..task.clone()
                    }
                } else {
                    task.clone()
                }
            })
            .collect();
        Self { tasks }
    }

    /// Gets a task by id.
    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    /// Returns whether a task with `id` is present.
    pub fn contains(&self, id: TaskId) -> bool {
        self.get(id).is_some()
    }

    /// Number of tasks in the list.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Returns whether the list holds no tasks.
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Number of tasks not yet completed.
    pub fn remaining_count(&self) -> usize {
        self.tasks.iter().filter(|task| !task.completed).count()
    }

    /// Largest id present in the list, used to seed id generation after a
    /// restore.
    pub fn max_id(&self) -> Option<TaskId> {
        self.tasks.iter().map(|task| task.id).max()
    }

    /// Iterates tasks in display order.
    pub fn iter(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter()
    }

    /// Tasks in display order as a slice.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }
}
