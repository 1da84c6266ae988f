//! Current punch status detection.

use crate::models::{ClockState, PunchDirection, PunchEvent, PunchStatus};

/// Determines whether a user is currently punched in from their punches.
///
/// The latest punch by timestamp decides the state; when several punches
/// share the latest timestamp, the one appearing last in the input wins.
///
/// # Example
///
/// ```
/// use attendance_engine::calculation::current_status;
/// use attendance_engine::models::{ClockState, PunchDirection, PunchEvent};
/// use chrono::{TimeZone, Utc};
///
/// let events = vec![
///     PunchEvent::new("user_1", PunchDirection::Out, Utc.with_ymd_and_hms(2026, 1, 13, 17, 0, 0).unwrap()),
///     PunchEvent::new("user_1", PunchDirection::In, Utc.with_ymd_and_hms(2026, 1, 13, 9, 0, 0).unwrap()),
/// ];
///
/// assert_eq!(current_status(&events).state, ClockState::PunchedOut);
/// assert_eq!(current_status(&[]).state, ClockState::NoPunches);
/// ```
pub fn current_status(events: &[PunchEvent]) -> PunchStatus {
    let latest = events.iter().fold(None::<&PunchEvent>, |latest, event| match latest {
        Some(current) if current.timestamp > event.timestamp => Some(current),
        _ => Some(event),
    });

    match latest {
        Some(event) => PunchStatus {
            state: match event.direction {
                PunchDirection::In => ClockState::PunchedIn,
                PunchDirection::Out => ClockState::PunchedOut,
            },
            last_punch: Some(event.timestamp),
        },
        None => PunchStatus::no_punches(),
    }
}
