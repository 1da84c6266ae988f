//! Application state for the Time Attendance Engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::ConfigLoader;
use crate::source::{InMemoryWorkUpdateSource, PunchSource, WorkUpdateSource};

/// Shared application state.
///
/// Contains the loaded configuration and the punch and work update sources.
/// Cloning is cheap; everything is behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// The loaded attendance configuration.
    config: Arc<ConfigLoader>,
    /// Where punches are read from and recorded to.
    source: Arc<dyn PunchSource>,
    /// Where work updates are read from and recorded to.
    work_updates: Arc<dyn WorkUpdateSource>,
}

impl AppState {
    /// Creates a new application state with an empty work update source.
    pub fn new(config: ConfigLoader, source: Arc<dyn PunchSource>) -> Self {
        Self {
            config: Arc::new(config),
            source,
            work_updates: Arc::new(InMemoryWorkUpdateSource::new()),
        }
    }

    /// Replaces the work update source.
    pub fn with_work_updates(mut self, work_updates: Arc<dyn WorkUpdateSource>) -> Self {
        self.work_updates = work_updates;
        self
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Returns the punch source.
    pub fn source(&self) -> &dyn PunchSource {
        self.source.as_ref()
    }

    /// Returns the work update source.
    pub fn work_updates(&self) -> &dyn WorkUpdateSource {
        self.work_updates.as_ref()
    }
}
