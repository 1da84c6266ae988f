//! Punch status and team summary models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Whether a user is currently clocked in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClockState {
    /// The latest punch is an IN.
    PunchedIn,
    /// The latest punch is an OUT.
    PunchedOut,
    /// The user has never punched.
    NoPunches,
}

/// A user's current clock state and the time of their last punch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PunchStatus {
    /// Current clock state.
    pub state: ClockState,
    /// When the latest punch was recorded, if any.
    pub last_punch: Option<DateTime<Utc>>,
}

impl PunchStatus {
    /// Status for a user with no punches.
    pub fn no_punches() -> Self {
        Self {
            state: ClockState::NoPunches,
            last_punch: None,
        }
    }

    /// Returns true if the user is currently clocked in.
    pub fn is_punched_in(&self) -> bool {
        self.state == ClockState::PunchedIn
    }
}

/// One row of the team weekly summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamMemberSummary {
    /// The user this row describes.
    pub user_id: String,
    /// Display name, falling back to the user id.
    pub name: String,
    /// Hours worked in the week, rounded to one decimal place.
    pub total_hours_week: Decimal,
    /// Number of work updates submitted in the week.
    pub updates_week: usize,
    /// Average hours per estimated work day, rounded to one decimal place.
    pub avg_daily_hours: Decimal,
}
