//! Application state management
//!
//! The central state handed to every request handler: the store handle and
//! the configuration, both established once during startup sequencing and
//! shared read-only thereafter.

use crate::core::config::Config;
use crate::store::SharedStore;
use std::sync::Arc;

/// Central application state shared with every request task
#[derive(Clone)]
pub struct AppState {
    /// Document store handle, ready before the listener binds
    pub store: SharedStore,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Create a new AppState once the store handle is ready
    pub fn new(store: SharedStore, config: Arc<Config>) -> Self {
        Self { store, config }
    }
}
