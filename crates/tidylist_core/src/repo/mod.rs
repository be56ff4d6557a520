//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the snapshot persistence contract used by the store.
//! - Isolate SQLite and JSON wire details from service orchestration.
//!
//! # Invariants
//! - Snapshot writes replace the whole stored value (last-write-wins).
//! - Missing or unparsable snapshot *content* degrades to an empty list;
//!   only transport failures surface as errors.

pub mod snapshot_repo;
