//! # API Module
//!
//! HTTP interface for chirp.
//!
//! ## Endpoints Overview
//!
//! ### User Operations
//! - `POST /sign-up` - Register a user
//! - `GET /sign-up` - List all users
//!
//! ### Tweet Operations
//! - `POST /tweets` - Post a tweet (author must exist)
//! - `GET /tweets` - List all tweets, newest first
//! - `PUT /tweets/{id}` - Replace a tweet's username and text
//! - `DELETE /tweets/{id}` - Delete a tweet
//!
//! ### System Essentials
//! - `GET /health` - Health check

pub mod handlers;
pub mod server;

// Re-export commonly used items
pub use server::{create_app, start_server};
