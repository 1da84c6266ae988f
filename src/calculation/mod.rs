//! Calculation logic for the Time Attendance Engine.
//!
//! This module contains the pure functions that turn punches into hours:
//! session pairing and weekly aggregation, midnight splitting, rounding,
//! current punch status and the team weekly summary.

mod day_split;
mod punch_status;
mod rounding;
mod team_summary;
mod weekly_hours;

pub use day_split::{DayPortion, split_by_local_day};
pub use punch_status::current_status;
pub use rounding::{HOURS_DECIMAL_PLACES, millis_to_hours, round_hours};
pub use team_summary::{DEFAULT_STANDARD_WORKDAY_HOURS, build_team_summary};
pub use weekly_hours::{compute_hours_by_week, compute_weekly_hours};
