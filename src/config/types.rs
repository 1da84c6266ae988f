//! Configuration types for the attendance engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from `attendance.yaml`.

use chrono::Weekday;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::calculation::DEFAULT_STANDARD_WORKDAY_HOURS;

/// The day a reporting week starts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekStartDay {
    /// Monday.
    Monday,
    /// Tuesday.
    Tuesday,
    /// Wednesday.
    Wednesday,
    /// Thursday.
    Thursday,
    /// Friday.
    Friday,
    /// Saturday.
    Saturday,
    /// Sunday.
    #[default]
    Sunday,
}

impl WeekStartDay {
    /// Returns the matching chrono weekday.
    pub fn weekday(self) -> Weekday {
        match self {
            WeekStartDay::Monday => Weekday::Mon,
            WeekStartDay::Tuesday => Weekday::Tue,
            WeekStartDay::Wednesday => Weekday::Wed,
            WeekStartDay::Thursday => Weekday::Thu,
            WeekStartDay::Friday => Weekday::Fri,
            WeekStartDay::Saturday => Weekday::Sat,
            WeekStartDay::Sunday => Weekday::Sun,
        }
    }
}

/// Week boundary settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WeekConfig {
    /// First day of the reporting week.
    #[serde(default)]
    pub start_day: WeekStartDay,
    /// Offset from UTC, in minutes, used for week and day boundaries.
    #[serde(default)]
    pub utc_offset_minutes: i32,
}

/// Settings for the team summary.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportingConfig {
    /// Length of a standard work day used to estimate days worked.
    #[serde(default = "default_standard_workday_hours")]
    pub standard_workday_hours: Decimal,
}

impl Default for ReportingConfig {
    fn default() -> Self {
        Self {
            standard_workday_hours: default_standard_workday_hours(),
        }
    }
}

/// Punch and work update source settings.
#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    /// Upper bound on a single fetch from either source.
    #[serde(default = "default_fetch_timeout_ms")]
    pub fetch_timeout_ms: u64,
    /// JSON file of punch records to seed the in-memory source with,
    /// relative to the configuration directory.
    #[serde(default)]
    pub seed_file: Option<String>,
    /// JSON file of work update rows to seed the in-memory update source
    /// with, relative to the configuration directory.
    #[serde(default)]
    pub work_updates_file: Option<String>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            fetch_timeout_ms: default_fetch_timeout_ms(),
            seed_file: None,
            work_updates_file: None,
        }
    }
}

/// HTTP server settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Address to bind.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to bind.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// The complete configuration loaded from `attendance.yaml`.
///
/// Every section is optional; missing sections take their defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AttendanceConfig {
    /// Week boundary settings.
    #[serde(default)]
    pub week: WeekConfig,
    /// Team summary settings.
    #[serde(default)]
    pub reporting: ReportingConfig,
    /// Punch and work update source settings.
    #[serde(default)]
    pub source: SourceConfig,
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
}

fn default_standard_workday_hours() -> Decimal {
    Decimal::from(DEFAULT_STANDARD_WORKDAY_HOURS)
}

fn default_fetch_timeout_ms() -> u64 {
    5000
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}
