//! Configuration loading and management for the Time Attendance Engine.
//!
//! This module loads `attendance.yaml` from a configuration directory: week
//! boundaries, reporting settings, source settings and the server
//! address.
//!
//! # Example
//!
//! ```no_run
//! use attendance_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Binding {}", config.server_address());
//! ```

mod loader;
mod types;

pub use loader::{CONFIG_FILE_NAME, ConfigLoader};
pub use types::{
    AttendanceConfig, ReportingConfig, ServerConfig, SourceConfig, WeekConfig, WeekStartDay,
};
