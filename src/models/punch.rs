//! Punch model and related types.
//!
//! This module defines the [`PunchEvent`] domain type and the [`PunchRecord`]
//! row shape returned by the punch store, together with the boundary
//! conversion from one to the other.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Whether a punch starts or ends a work session.
///
/// # Example
///
/// ```
/// use attendance_engine::models::PunchDirection;
///
/// let direction: PunchDirection = serde_json::from_str("\"IN\"").unwrap();
/// assert_eq!(direction, PunchDirection::In);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PunchDirection {
    /// Clock in: the start of a work session.
    In,
    /// Clock out: the end of a work session.
    Out,
}

impl PunchDirection {
    /// Parses the exact store representation (`IN` or `OUT`).
    pub fn parse(raw: &str) -> EngineResult<Self> {
        match raw {
            "IN" => Ok(PunchDirection::In),
            "OUT" => Ok(PunchDirection::Out),
            other => Err(EngineError::InvalidPunch {
                field: "status".to_string(),
                message: format!("expected IN or OUT, got '{}'", other),
            }),
        }
    }
}

impl std::fmt::Display for PunchDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PunchDirection::In => write!(f, "IN"),
            PunchDirection::Out => write!(f, "OUT"),
        }
    }
}

/// A single clock-in or clock-out recorded for a user.
///
/// Punch events are created once and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PunchEvent {
    /// Opaque identifier of the person who punched.
    pub user_id: String,
    /// The moment the punch was recorded.
    pub timestamp: DateTime<Utc>,
    /// Whether this punch starts or ends a session.
    pub direction: PunchDirection,
}

impl PunchEvent {
    /// Creates a new punch event.
    pub fn new(
        user_id: impl Into<String>,
        direction: PunchDirection,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            timestamp,
            direction,
        }
    }
}

/// A punch row as returned by the remote store.
///
/// Rows are loosely typed: the status and timestamp are plain strings. Convert
/// with `PunchEvent::try_from` before handing punches to the aggregator.
///
/// # Example
///
/// ```
/// use attendance_engine::models::{PunchDirection, PunchEvent, PunchRecord};
///
/// let record: PunchRecord = serde_json::from_str(r#"{
///     "id": "p_1",
///     "clerk_user_id": "user_42",
///     "timestamp": "2026-01-13T09:00:00+00:00",
///     "status": "IN"
/// }"#).unwrap();
///
/// let event = PunchEvent::try_from(record).unwrap();
/// assert_eq!(event.user_id, "user_42");
/// assert_eq!(event.direction, PunchDirection::In);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PunchRecord {
    /// Row identifier, if the store supplied one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// The user who punched.
    #[serde(alias = "clerk_user_id")]
    pub user_id: String,
    /// Timestamp string; must carry a timezone offset.
    pub timestamp: String,
    /// Either `IN` or `OUT`.
    pub status: String,
}

impl TryFrom<PunchRecord> for PunchEvent {
    type Error = EngineError;

    fn try_from(record: PunchRecord) -> EngineResult<Self> {
        let user_id = record.user_id.trim();
        if user_id.is_empty() {
            return Err(EngineError::InvalidPunch {
                field: "user_id".to_string(),
                message: "cannot be empty".to_string(),
            });
        }

        let direction = PunchDirection::parse(record.status.trim())?;
        let timestamp = parse_timestamp(&record.timestamp)?;

        Ok(PunchEvent {
            user_id: user_id.to_string(),
            timestamp,
            direction,
        })
    }
}

impl From<&PunchEvent> for PunchRecord {
    fn from(event: &PunchEvent) -> Self {
        PunchRecord {
            id: None,
            user_id: event.user_id.clone(),
            timestamp: event.timestamp.to_rfc3339(),
            status: event.direction.to_string(),
        }
    }
}

/// Parses a timezone-aware timestamp.
///
/// Accepts RFC 3339 and the store's `YYYY-MM-DD HH:MM:SS[.f]+HH[:MM]` form.
/// Timestamps without an offset are rejected.
pub fn parse_timestamp(raw: &str) -> EngineResult<DateTime<Utc>> {
    let trimmed = raw.trim();

    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(parsed.with_timezone(&Utc));
    }

    DateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S%.f%#z")
        .map(|parsed| parsed.with_timezone(&Utc))
        .map_err(|e| EngineError::InvalidPunch {
            field: "timestamp".to_string(),
            message: format!("'{}' is not a timezone-aware timestamp ({})", trimmed, e),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn record(user_id: &str, timestamp: &str, status: &str) -> PunchRecord {
        PunchRecord {
            id: Some("p_001".to_string()),
            user_id: user_id.to_string(),
            timestamp: timestamp.to_string(),
            status: status.to_string(),
        }
    }

    #[test]
    fn test_rfc3339_record_converts() {
        let event =
            PunchEvent::try_from(record("user_1", "2026-01-13T09:00:00+00:00", "IN")).unwrap();

        assert_eq!(event.user_id, "user_1");
        assert_eq!(event.direction, PunchDirection::In);
        assert_eq!(
            event.timestamp,
            Utc.with_ymd_and_hms(2026, 1, 13, 9, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_offset_is_normalized_to_utc() {
        let event =
            PunchEvent::try_from(record("user_1", "2026-01-13T09:00:00+05:30", "OUT")).unwrap();

        assert_eq!(
            event.timestamp,
            Utc.with_ymd_and_hms(2026, 1, 13, 3, 30, 0).unwrap()
        );
        assert_eq!(event.direction, PunchDirection::Out);
    }

    #[test]
    fn test_store_timestamp_format_converts() {
        let event = PunchEvent::try_from(record(
            "user_1",
            "2026-01-13 17:30:00.123456+00",
            "OUT",
        ))
        .unwrap();

        assert_eq!(
            event.timestamp,
            Utc.with_ymd_and_hms(2026, 1, 13, 17, 30, 0).unwrap()
                + chrono::Duration::microseconds(123_456)
        );
    }

    #[test]
    fn test_zulu_timestamp_converts() {
        let event = PunchEvent::try_from(record("user_1", "2026-01-13T09:00:00Z", "IN")).unwrap();
        assert_eq!(
            event.timestamp,
            Utc.with_ymd_and_hms(2026, 1, 13, 9, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_naive_timestamp_is_rejected() {
        let result = PunchEvent::try_from(record("user_1", "2026-01-13T09:00:00", "IN"));

        match result {
            Err(EngineError::InvalidPunch { field, .. }) => assert_eq!(field, "timestamp"),
            other => panic!("Expected InvalidPunch on timestamp, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_status_is_rejected() {
        let result = PunchEvent::try_from(record("user_1", "2026-01-13T09:00:00Z", "BREAK"));

        match result {
            Err(EngineError::InvalidPunch { field, message }) => {
                assert_eq!(field, "status");
                assert!(message.contains("BREAK"));
            }
            other => panic!("Expected InvalidPunch on status, got {:?}", other),
        }
    }

    #[test]
    fn test_lowercase_status_is_rejected() {
        let result = PunchEvent::try_from(record("user_1", "2026-01-13T09:00:00Z", "in"));
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_user_is_rejected() {
        let result = PunchEvent::try_from(record("  ", "2026-01-13T09:00:00Z", "IN"));

        match result {
            Err(EngineError::InvalidPunch { field, .. }) => assert_eq!(field, "user_id"),
            other => panic!("Expected InvalidPunch on user_id, got {:?}", other),
        }
    }

    #[test]
    fn test_record_accepts_clerk_user_id_alias() {
        let json = r#"{
            "clerk_user_id": "user_7",
            "timestamp": "2026-01-13T09:00:00+00:00",
            "status": "OUT",
            "created_at": "2026-01-13T09:00:01+00:00"
        }"#;

        let record: PunchRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.user_id, "user_7");
        assert_eq!(record.id, None);
    }

    #[test]
    fn test_direction_serializes_uppercase() {
        assert_eq!(
            serde_json::to_string(&PunchDirection::Out).unwrap(),
            "\"OUT\""
        );
    }

    #[test]
    fn test_event_to_record_keeps_direction_and_instant() {
        let event = PunchEvent::new(
            "user_1",
            PunchDirection::Out,
            Utc.with_ymd_and_hms(2026, 1, 13, 17, 0, 0).unwrap(),
        );

        let record = PunchRecord::from(&event);
        assert_eq!(record.status, "OUT");
        assert_eq!(PunchEvent::try_from(record).unwrap(), event);
    }
}
