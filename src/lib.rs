//! chirp - A Minimal Social-Posting Backend
//!
//! chirp exposes CRUD-style HTTP endpoints for two record collections:
//! users (sign-up + listing) and tweets (post, list newest-first, edit,
//! delete). Records live in a document store selected at startup, either
//! the MongoDB backend or an in-memory backend for development and tests.
#![warn(missing_docs)]

// Core foundational modules
pub mod core;

// Main functional modules
pub mod api;
pub mod store;
pub mod validate;

// Re-export commonly used items for convenience
pub use crate::core::{Config, Error, Result};

/// Crate version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
