//! Core data models for the Time Attendance Engine.
//!
//! This module contains the punch, window and summary types used throughout
//! the engine.

mod hours_summary;
mod punch;
mod status;
mod window;
mod work_update;

pub use hours_summary::{AnomalyKind, HoursSummary, PunchAnomaly, WorkSession};
pub use punch::{PunchDirection, PunchEvent, PunchRecord, parse_timestamp};
pub use status::{ClockState, PunchStatus, TeamMemberSummary};
pub use window::{AttendanceWindow, local_midnight, utc_offset};
pub use work_update::WorkUpdate;
