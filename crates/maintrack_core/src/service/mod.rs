//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate model mutations and repository writes for UI callers.
//! - Keep UI/FFI layers decoupled from storage details.

pub mod record_store;
