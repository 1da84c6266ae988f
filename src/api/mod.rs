//! HTTP API module for the Time Attendance Engine.
//!
//! This module provides the REST endpoints for weekly hours, punch status,
//! punch and work update recording and the team weekly summary.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    HoursQuery, MAX_WEEKS_PER_QUERY, RecordPunchRequest, RecordWorkUpdateRequest,
    TeamSummaryRequest, WeeklyHoursRequest,
};
pub use response::{ApiError, ApiErrorResponse, HealthResponse, UserHoursResponse, WeeklyHours};
pub use state::AppState;
