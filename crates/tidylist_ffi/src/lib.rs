//! Flutter-facing FFI crate for TidyList.
//!
//! # Responsibility
//! - Expose the core store as stable, sync use-case functions for Dart.
//! - Keep the core crate free of FFI runtime concerns.

pub mod api;
