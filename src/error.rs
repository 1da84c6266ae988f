//! Error types for the Time Attendance Engine.
//!
//! The aggregator itself never fails; these errors cover configuration,
//! boundary parsing of punch rows and work updates, and the data sources.

use thiserror::Error;

/// The main error type for the Time Attendance Engine.
///
/// # Example
///
/// ```
/// use attendance_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/attendance.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/attendance.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A configuration value was present but out of range.
    #[error("Invalid configuration value '{field}': {message}")]
    InvalidConfig {
        /// The offending field.
        field: String,
        /// Why the value was rejected.
        message: String,
    },

    /// A punch row from the store could not be converted into a punch event.
    #[error("Invalid punch field '{field}': {message}")]
    InvalidPunch {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A work update submitted through the API was invalid.
    #[error("Invalid work update field '{field}': {message}")]
    InvalidWorkUpdate {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// An attendance window was empty, inverted or out of range.
    #[error("Invalid window: {message}")]
    InvalidWindow {
        /// A description of the problem.
        message: String,
    },

    /// A punch or work update source failed to answer a query.
    #[error("Source unavailable: {message}")]
    SourceUnavailable {
        /// The upstream failure, unmodified.
        message: String,
    },

    /// A punch or work update source did not answer in time.
    #[error("Source timed out after {timeout_ms}ms")]
    SourceTimeout {
        /// The timeout that elapsed.
        timeout_ms: u64,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/attendance.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/attendance.yaml"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = EngineError::ConfigParseError {
            path: "/config/bad.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/bad.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_invalid_config_displays_field_and_message() {
        let error = EngineError::InvalidConfig {
            field: "week.utc_offset_minutes".to_string(),
            message: "must be within +/-1439".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid configuration value 'week.utc_offset_minutes': must be within +/-1439"
        );
    }

    #[test]
    fn test_invalid_punch_displays_field_and_message() {
        let error = EngineError::InvalidPunch {
            field: "status".to_string(),
            message: "expected IN or OUT, got 'BREAK'".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid punch field 'status': expected IN or OUT, got 'BREAK'"
        );
    }

    #[test]
    fn test_invalid_work_update_displays_field_and_message() {
        let error = EngineError::InvalidWorkUpdate {
            field: "user_id".to_string(),
            message: "cannot be empty".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid work update field 'user_id': cannot be empty"
        );
    }

    #[test]
    fn test_invalid_window_displays_message() {
        let error = EngineError::InvalidWindow {
            message: "end must be after start".to_string(),
        };
        assert_eq!(error.to_string(), "Invalid window: end must be after start");
    }

    #[test]
    fn test_source_errors_display() {
        let unavailable = EngineError::SourceUnavailable {
            message: "connection refused".to_string(),
        };
        assert_eq!(
            unavailable.to_string(),
            "Source unavailable: connection refused"
        );

        let timeout = EngineError::SourceTimeout { timeout_ms: 5000 };
        assert_eq!(timeout.to_string(), "Source timed out after 5000ms");
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_source_timeout() -> EngineResult<()> {
            Err(EngineError::SourceTimeout { timeout_ms: 10 })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_source_timeout()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
