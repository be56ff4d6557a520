//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose stable, use-case-level store functions to Dart via FRB.
//! - Own the process-wide store instance the view layer talks to.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Every view-intent function returns the full post-operation snapshot,
//!   so the view re-renders from one value.
//! - Storage write failures degrade to a logged diagnostics message plus
//!   the unchanged snapshot.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, OnceLock};
use tidylist_core::db::open_db;
use tidylist_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    RepoResult, SqliteSnapshotRepository, TodoStore,
};

const STORE_DB_FILE_NAME: &str = "tidylist.sqlite3";

static STORE_DB_PATH: OnceLock<PathBuf> = OnceLock::new();
static STORE: Mutex<Option<TodoStore<SqliteSnapshotRepository>>> = Mutex::new(None);

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Sync call; may perform small file-system setup work.
/// - Idempotent for the same `level + log_dir`; conflicting
///   reconfiguration returns an error message.
/// - Never panics; returns empty string on success and error message on
///   failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Pins the store database location before first use.
///
/// Input semantics:
/// - `db_dir`: directory the app owns; the database file is created inside
///   it.
///
/// # FFI contract
/// - Sync call; must run before the first view-intent call to take effect.
/// - Idempotent for the same directory; conflicting reconfiguration
///   returns an error message.
/// - Never panics; returns empty string on success and error message on
///   failure.
#[flutter_rust_bridge::frb(sync)]
pub fn configure_store(db_dir: String) -> String {
    let trimmed = db_dir.trim();
    if trimmed.is_empty() {
        return "db_dir cannot be empty".to_string();
    }

    let candidate = Path::new(trimmed).join(STORE_DB_FILE_NAME);
    if STORE_DB_PATH.set(candidate.clone()).is_err() {
        let active = resolve_store_db_path();
        if active != candidate {
            return format!(
                "store already configured at `{}`; refusing to switch to `{}`",
                active.display(),
                candidate.display()
            );
        }
    }
    String::new()
}

/// Task item projected for view rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskView {
    /// Stable task id.
    pub id: i64,
    /// Display text.
    pub text: String,
    /// Completion flag.
    pub completed: bool,
}

/// Full store snapshot the view re-renders from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreView {
    /// Tasks in display order, newest first.
    pub tasks: Vec<TaskView>,
    /// Count of not-completed tasks for the header line.
    pub remaining: u32,
    /// Id of the task under edit, when an edit is active.
    pub editing_id: Option<i64>,
    /// Scratch draft of the active edit.
    pub edit_draft: Option<String>,
    /// Pending new-task input text.
    pub pending_input: String,
    /// Human-readable diagnostics message; empty on success.
    pub message: String,
}

/// Returns the current snapshot without mutating anything.
///
/// # FFI contract
/// - Sync call; opens the store on first use.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn load_view() -> StoreView {
    run_store_op("load_view", |_store| Ok(()))
}

/// Replaces the pending new-task input text.
///
/// # FFI contract
/// - Sync call; no storage write.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn set_pending_input(text: String) -> StoreView {
    run_store_op("set_pending_input", |store| {
        store.set_pending_input(&text);
        Ok(())
    })
}

/// Adds a task from the pending input buffer.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Whitespace-only input is a no-op; the buffer clears only when a task
///   was inserted.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn submit_pending_input() -> StoreView {
    run_store_op("submit_pending_input", |store| {
        store.submit_input().map(|_| ())
    })
}

/// Adds a task from explicit text.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Whitespace-only input is a no-op.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn add_task(text: String) -> StoreView {
    run_store_op("add_task", |store| store.add(&text).map(|_| ()))
}

/// Toggles the completion flag of one task.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Unknown ids are a silent no-op.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn toggle_task(id: i64) -> StoreView {
    run_store_op("toggle_task", |store| {
        store.toggle(id).map(|_| ())
    })
}

/// Deletes one task.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Unknown ids are a silent no-op; deleting the task under edit clears
///   the edit state.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn remove_task(id: i64) -> StoreView {
    run_store_op("remove_task", |store| {
        store.remove(id).map(|_| ())
    })
}

/// Starts editing one task.
///
/// # FFI contract
/// - Sync call; no storage write.
/// - Replaces any previous unsaved draft; unknown ids are a silent no-op.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn begin_edit(id: i64, current_text: String) -> StoreView {
    run_store_op("begin_edit", |store| {
        store.begin_edit(id, &current_text);
        Ok(())
    })
}

/// Updates the scratch draft of the active edit.
///
/// # FFI contract
/// - Sync call; no storage write.
/// - No-op when no edit is active.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn set_edit_draft(text: String) -> StoreView {
    run_store_op("set_edit_draft", |store| {
        store.set_edit_draft(&text);
        Ok(())
    })
}

/// Commits the active edit.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - An empty draft cancels; repeated commits are no-ops. Blur-triggered
///   saves in the view call this, not `cancel_edit`.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn commit_edit() -> StoreView {
    run_store_op("commit_edit", |store| store.commit_edit().map(|_| ()))
}

/// Abandons the active edit.
///
/// # FFI contract
/// - Sync call; no storage write.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn cancel_edit() -> StoreView {
    run_store_op("cancel_edit", |store| {
        store.cancel_edit();
        Ok(())
    })
}

fn resolve_store_db_path() -> PathBuf {
    STORE_DB_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var("TIDYLIST_DB_PATH") {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(STORE_DB_FILE_NAME)
        })
        .clone()
}

fn lock_store() -> MutexGuard<'static, Option<TodoStore<SqliteSnapshotRepository>>> {
    match STORE.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

fn open_store() -> Result<TodoStore<SqliteSnapshotRepository>, String> {
    let db_path = resolve_store_db_path();
    let conn = open_db(&db_path).map_err(|err| format!("store DB open failed: {err}"))?;
    let repo = SqliteSnapshotRepository::try_new(conn)
        .map_err(|err| format!("store repo init failed: {err}"))?;
    TodoStore::open(repo).map_err(|err| format!("store open failed: {err}"))
}

fn run_store_op(
    op: &str,
    f: impl FnOnce(&mut TodoStore<SqliteSnapshotRepository>) -> RepoResult<()>,
) -> StoreView {
    let mut guard = lock_store();

    if guard.is_none() {
        match open_store() {
            Ok(store) => *guard = Some(store),
            Err(err) => {
                log::error!("event=store_bootstrap module=ffi status=error op={op} error={err}");
                return unavailable_view(format!("{op} failed: {err}"));
            }
        }
    }

    let Some(store) = guard.as_mut() else {
        return unavailable_view(format!("{op} failed: store unavailable"));
    };

    let message = match f(store) {
        Ok(()) => String::new(),
        Err(err) => {
            log::error!("event=store_op module=ffi status=error op={op} error={err}");
            format!("{op} failed: {err}")
        }
    };
    snapshot_view(store, message)
}

fn snapshot_view(store: &TodoStore<SqliteSnapshotRepository>, message: String) -> StoreView {
    let tasks = store
        .tasks()
        .iter()
        .map(|task| TaskView {
            id: task.id,
            text: task.text.clone(),
            completed: task.completed,
        })
        .collect();
    let remaining = u32::try_from(store.tasks().remaining_count()).unwrap_or(u32::MAX);

    StoreView {
        tasks,
        remaining,
        editing_id: store.cursor().map(|cursor| cursor.target()),
        edit_draft: store.cursor().map(|cursor| cursor.draft().to_owned()),
        pending_input: store.pending_input().to_owned(),
        message,
    }
}

fn unavailable_view(message: String) -> StoreView {
    StoreView {
        tasks: Vec::new(),
        remaining: 0,
        editing_id: None,
        edit_draft: None,
        pending_input: String::new(),
        message,
    }
}
