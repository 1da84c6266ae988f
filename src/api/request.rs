//! Request types for the Time Attendance Engine API.
//!
//! Punch rows arrive in their loosely typed store shape and are converted to
//! domain types here, so handlers only ever see validated punches.

use std::collections::HashMap;

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{AttendanceWindow, PunchDirection, PunchEvent, PunchRecord, WorkUpdate};

/// Largest number of weeks a single hours query may cover.
pub const MAX_WEEKS_PER_QUERY: u32 = 52;

/// Request body for the `/hours/weekly` endpoint.
///
/// The offset of `window_start` decides which local calendar day each
/// session is credited to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeeklyHoursRequest {
    /// One user's punch rows.
    pub events: Vec<PunchRecord>,
    /// Inclusive window start.
    pub window_start: DateTime<FixedOffset>,
    /// Exclusive window end.
    pub window_end: DateTime<FixedOffset>,
}

impl WeeklyHoursRequest {
    /// Converts the request into validated punches and a window.
    ///
    /// Fails if a row is not a valid punch, if the rows belong to more than
    /// one user, or if the window is empty or inverted.
    pub fn into_parts(self) -> EngineResult<(Vec<PunchEvent>, AttendanceWindow)> {
        let window = AttendanceWindow::new(
            self.window_start.with_timezone(&Utc),
            self.window_end.with_timezone(&Utc),
            *self.window_start.offset(),
        );
        if window.is_empty() {
            return Err(EngineError::InvalidWindow {
                message: format!(
                    "window_end {} must be after window_start {}",
                    self.window_end.to_rfc3339(),
                    self.window_start.to_rfc3339()
                ),
            });
        }

        let events = convert_records(self.events)?;
        if let Some(first) = events.first() {
            if let Some(other) = events.iter().find(|e| e.user_id != first.user_id) {
                return Err(EngineError::InvalidPunch {
                    field: "user_id".to_string(),
                    message: format!(
                        "events must belong to a single user, found '{}' and '{}'",
                        first.user_id, other.user_id
                    ),
                });
            }
        }

        Ok((events, window))
    }
}

/// Query string for the `/users/:user_id/hours` endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HoursQuery {
    /// Any date in the first week to report; defaults to today.
    #[serde(default)]
    pub week_of: Option<NaiveDate>,
    /// Number of consecutive weeks; defaults to one.
    #[serde(default)]
    pub weeks: Option<u32>,
}

impl HoursQuery {
    /// Returns the validated number of weeks.
    pub fn weeks(&self) -> EngineResult<u32> {
        let weeks = self.weeks.unwrap_or(1);
        if !(1..=MAX_WEEKS_PER_QUERY).contains(&weeks) {
            return Err(EngineError::InvalidWindow {
                message: format!("weeks must be between 1 and {MAX_WEEKS_PER_QUERY}, got {weeks}"),
            });
        }
        Ok(weeks)
    }
}

/// Request body for the `/users/:user_id/punches` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordPunchRequest {
    /// `IN` or `OUT`.
    pub direction: PunchDirection,
    /// When the punch happened; defaults to now.
    #[serde(default)]
    pub timestamp: Option<DateTime<FixedOffset>>,
}

impl RecordPunchRequest {
    /// Builds the punch event for `user_id`, stamping it with `now` if no
    /// timestamp was supplied.
    pub fn into_event(self, user_id: &str, now: DateTime<Utc>) -> EngineResult<PunchEvent> {
        let user_id = user_id.trim();
        if user_id.is_empty() {
            return Err(EngineError::InvalidPunch {
                field: "user_id".to_string(),
                message: "cannot be empty".to_string(),
            });
        }

        let timestamp = self
            .timestamp
            .map(|ts| ts.with_timezone(&Utc))
            .unwrap_or(now);
        Ok(PunchEvent::new(user_id, self.direction, timestamp))
    }
}

/// Request body for the `/users/:user_id/work-updates` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordWorkUpdateRequest {
    /// The day the update is for; defaults to today in the configured offset.
    #[serde(default)]
    pub update_date: Option<NaiveDate>,
    /// Free-text body of the update.
    #[serde(default)]
    pub content: Option<String>,
}

impl RecordWorkUpdateRequest {
    /// Builds the work update for `user_id`, dating it `today` if no date
    /// was supplied.
    pub fn into_update(self, user_id: &str, today: NaiveDate) -> EngineResult<WorkUpdate> {
        let user_id = user_id.trim();
        if user_id.is_empty() {
            return Err(EngineError::InvalidWorkUpdate {
                field: "user_id".to_string(),
                message: "cannot be empty".to_string(),
            });
        }

        Ok(WorkUpdate {
            user_id: user_id.to_string(),
            update_date: self.update_date.unwrap_or(today),
            content: self.content,
        })
    }
}

/// Request body for the `/team/weekly-summary` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamSummaryRequest {
    /// Punch rows for any number of users.
    pub punches: Vec<PunchRecord>,
    /// Work updates for any number of users.
    #[serde(default)]
    pub work_updates: Vec<WorkUpdate>,
    /// Display names by user id.
    #[serde(default)]
    pub user_names: HashMap<String, String>,
    /// Any date in the week to summarise; defaults to today.
    #[serde(default)]
    pub week_of: Option<NaiveDate>,
}

impl TeamSummaryRequest {
    /// Converts the punch rows into validated punch events.
    pub fn punch_events(&self) -> EngineResult<Vec<PunchEvent>> {
        convert_records(self.punches.clone())
    }
}

fn convert_records(records: Vec<PunchRecord>) -> EngineResult<Vec<PunchEvent>> {
    records.into_iter().map(PunchEvent::try_from).collect()
}
