//! Forum use-case services.
//!
//! # Responsibility
//! - Turn caller intents (publish, comment, rename) into store writes.
//! - Keep callers independent of which store backend is in use.

pub mod forum_service;
