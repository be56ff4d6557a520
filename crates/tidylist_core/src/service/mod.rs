//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate snapshot transformations and persistence into the
//!   view-facing store API.
//! - Keep UI/FFI layers decoupled from storage details.

pub mod todo_service;
