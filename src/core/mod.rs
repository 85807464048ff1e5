//! Core system types and foundations
//!
//! This module contains the fundamental building blocks of chirp:
//! record types, error handling, and configuration.

pub mod app_state;
pub mod config;
pub mod error;
pub mod model;

// Re-export commonly used items
pub use app_state::AppState;
pub use config::{Config, StoreBackend};
pub use error::{Error, Result, Violation};
pub use model::{Tweet, TweetDraft, TweetUpdate, User};
