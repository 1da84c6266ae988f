//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the attendance
//! configuration from a YAML file.

use chrono::{FixedOffset, Weekday};
use rust_decimal::Decimal;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{EngineError, EngineResult};

use super::types::AttendanceConfig;

/// Name of the configuration file inside the configuration directory.
pub const CONFIG_FILE_NAME: &str = "attendance.yaml";

/// Largest accepted UTC offset magnitude, in minutes.
const MAX_OFFSET_MINUTES: i32 = 1439;

/// Loads, validates and provides access to the attendance configuration.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// ├── attendance.yaml   # Week, reporting, source and server settings
/// └── punches.json      # Optional seed data for the in-memory source
/// ```
///
/// # Example
///
/// ```no_run
/// use attendance_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default").unwrap();
/// println!("Weeks start on {:?}", loader.week_start());
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: AttendanceConfig,
    base_dir: PathBuf,
    utc_offset: FixedOffset,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - `attendance.yaml` is missing
    /// - The file contains invalid YAML
    /// - A value is out of range
    ///
    /// # Example
    ///
    /// ```no_run
    /// use attendance_engine::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::load("./config/default")?;
    /// # Ok::<(), attendance_engine::error::EngineError>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        let config = Self::load_yaml::<AttendanceConfig>(&path.join(CONFIG_FILE_NAME))?;
        Self::from_config(config, path)
    }

    /// Builds a loader from an already parsed configuration.
    ///
    /// `base_dir` is the directory relative paths such as the seed file are
    /// resolved against.
    pub fn from_config<P: AsRef<Path>>(
        config: AttendanceConfig,
        base_dir: P,
    ) -> EngineResult<Self> {
        let utc_offset = Self::validate(&config)?;
        Ok(Self {
            config,
            base_dir: base_dir.as_ref().to_path_buf(),
            utc_offset,
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Checks value ranges and returns the resolved UTC offset.
    fn validate(config: &AttendanceConfig) -> EngineResult<FixedOffset> {
        let minutes = config.week.utc_offset_minutes;
        if minutes.abs() > MAX_OFFSET_MINUTES {
            return Err(EngineError::InvalidConfig {
                field: "week.utc_offset_minutes".to_string(),
                message: format!(
                    "{} is outside -{}..={}",
                    minutes, MAX_OFFSET_MINUTES, MAX_OFFSET_MINUTES
                ),
            });
        }
        let utc_offset =
            FixedOffset::east_opt(minutes * 60).ok_or_else(|| EngineError::InvalidConfig {
                field: "week.utc_offset_minutes".to_string(),
                message: format!("{} is not a valid offset", minutes),
            })?;

        if config.reporting.standard_workday_hours <= Decimal::ZERO {
            return Err(EngineError::InvalidConfig {
                field: "reporting.standard_workday_hours".to_string(),
                message: "must be greater than zero".to_string(),
            });
        }

        if config.source.fetch_timeout_ms == 0 {
            return Err(EngineError::InvalidConfig {
                field: "source.fetch_timeout_ms".to_string(),
                message: "must be greater than zero".to_string(),
            });
        }

        Ok(utc_offset)
    }

    /// Returns the underlying configuration.
    pub fn config(&self) -> &AttendanceConfig {
        &self.config
    }

    /// Returns the first day of the reporting week.
    pub fn week_start(&self) -> Weekday {
        self.config.week.start_day.weekday()
    }

    /// Returns the offset used for week and day boundaries.
    pub fn utc_offset(&self) -> FixedOffset {
        self.utc_offset
    }

    /// Returns the length of a standard work day.
    pub fn standard_workday_hours(&self) -> Decimal {
        self.config.reporting.standard_workday_hours
    }

    /// Returns the upper bound on a single source fetch.
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_millis(self.config.source.fetch_timeout_ms)
    }

    /// Returns the resolved seed file path, if one is configured.
    pub fn seed_file_path(&self) -> Option<PathBuf> {
        self.config
            .source
            .seed_file
            .as_ref()
            .map(|file| self.base_dir.join(file))
    }

    /// Returns the resolved work update seed file path, if one is configured.
    pub fn work_updates_file_path(&self) -> Option<PathBuf> {
        self.config
            .source
            .work_updates_file
            .as_ref()
            .map(|file| self.base_dir.join(file))
    }

    /// Returns the `host:port` address to bind.
    pub fn server_address(&self) -> String {
        format!("{}:{}", self.config.server.host, self.config.server.port)
    }
}
