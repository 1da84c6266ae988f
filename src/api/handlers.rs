//! HTTP request handlers for the Time Attendance Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::future::Future;
use std::time::{Duration, Instant};

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{
    build_team_summary, compute_hours_by_week, compute_weekly_hours, current_status,
};
use crate::error::{EngineError, EngineResult};
use crate::models::{AttendanceWindow, HoursSummary};

use super::request::{
    HoursQuery, RecordPunchRequest, RecordWorkUpdateRequest, TeamSummaryRequest,
    WeeklyHoursRequest,
};
use super::response::{
    ApiError, ApiErrorResponse, HealthResponse, UserHoursResponse, WeeklyHours,
};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/hours/weekly", post(weekly_hours_handler))
        .route("/users/:user_id/hours", get(user_hours_handler))
        .route("/users/:user_id/status", get(status_handler))
        .route("/users/:user_id/punches", post(record_punch_handler))
        .route("/users/:user_id/work-updates", post(record_work_update_handler))
        .route("/team/weekly-summary", post(team_summary_handler))
        .with_state(state)
}

/// Handler for GET /health.
async fn health_handler() -> Response {
    json_response(StatusCode::OK, HealthResponse::ok())
}

/// Handler for POST /hours/weekly.
///
/// Aggregates the punches supplied in the body over the supplied window.
async fn weekly_hours_handler(
    payload: Result<Json<WeeklyHoursRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing weekly hours request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return json_rejection_response(rejection, correlation_id),
    };

    let (events, window) = match request.into_parts() {
        Ok(parts) => parts,
        Err(err) => return engine_error_response(err, correlation_id),
    };

    let start_time = Instant::now();
    let summary = compute_weekly_hours(&events, &window);
    info!(
        correlation_id = %correlation_id,
        events = events.len(),
        total_hours = %summary.total_hours,
        anomalies = summary.anomalies.len(),
        duration_us = start_time.elapsed().as_micros(),
        "Weekly hours computed"
    );

    json_response(StatusCode::OK, summary)
}

/// Handler for GET /users/:user_id/hours.
///
/// Reports one or more consecutive configured weeks from the punch source,
/// with the number of work updates dated in each week.
async fn user_hours_handler(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    query: Result<Query<HoursQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, user_id = %user_id, "Processing user hours request");

    let query = match query {
        Ok(Query(query)) => query,
        Err(rejection) => {
            warn!(
                correlation_id = %correlation_id,
                error = %rejection.body_text(),
                "Query string rejected"
            );
            return ApiErrorResponse::bad_request(ApiError::validation_error(
                rejection.body_text(),
            ))
            .into_response();
        }
    };

    let weeks = match query.weeks() {
        Ok(weeks) => weeks,
        Err(err) => return engine_error_response(err, correlation_id),
    };

    let config = state.config();
    let first_window = match query.week_of {
        Some(date) => {
            AttendanceWindow::week_containing_date(date, config.week_start(), config.utc_offset())
        }
        None => AttendanceWindow::week_containing(
            Utc::now(),
            config.week_start(),
            config.utc_offset(),
        ),
    };
    let (first_window, range_end) = match first_window.and_then(|window| {
        let end = weeks_range_end(&window, weeks)?;
        Ok((window, end))
    }) {
        Ok(range) => range,
        Err(err) => return engine_error_response(err, correlation_id),
    };

    let range = AttendanceWindow::new(first_window.start, range_end, first_window.offset);
    let Some((first_date, last_date)) = range.local_date_range() else {
        return engine_error_response(
            EngineError::InvalidWindow {
                message: "requested range is empty".to_string(),
            },
            correlation_id,
        );
    };

    let fetch_punches = state
        .source()
        .fetch_punches(&user_id, first_window.start, range_end);
    let fetch_updates = state
        .work_updates()
        .fetch_work_updates(&user_id, first_date, last_date);
    let (events, updates) = tokio::join!(
        with_timeout(config.fetch_timeout(), fetch_punches),
        with_timeout(config.fetch_timeout(), fetch_updates),
    );
    let (events, updates) = match (events, updates) {
        (Ok(events), Ok(updates)) => (events, updates),
        (Err(err), _) | (_, Err(err)) => return engine_error_response(err, correlation_id),
    };

    let start_time = Instant::now();
    let by_week = match compute_hours_by_week(&events, &first_window, weeks) {
        Ok(by_week) => by_week,
        Err(err) => return engine_error_response(err, correlation_id),
    };
    let combined = by_week
        .iter()
        .fold(HoursSummary::default(), |acc, (_, summary)| acc.merge(summary));

    info!(
        correlation_id = %correlation_id,
        user_id = %user_id,
        weeks = weeks,
        events = events.len(),
        updates = updates.len(),
        total_hours = %combined.total_hours,
        duration_us = start_time.elapsed().as_micros(),
        "User hours computed"
    );

    let response = UserHoursResponse {
        user_id,
        weeks: by_week
            .into_iter()
            .map(|(window, summary)| WeeklyHours::new(&window, summary, &updates))
            .collect(),
        combined,
        updates: updates.len(),
    };
    json_response(StatusCode::OK, response)
}

/// Handler for GET /users/:user_id/status.
async fn status_handler(State(state): State<AppState>, Path(user_id): Path<String>) -> Response {
    let correlation_id = Uuid::new_v4();

    let fetch = state.source().latest_punches(&user_id, 1);
    match with_timeout(state.config().fetch_timeout(), fetch).await {
        Ok(latest) => {
            let status = current_status(&latest);
            info!(
                correlation_id = %correlation_id,
                user_id = %user_id,
                punched_in = status.is_punched_in(),
                "Status resolved"
            );
            json_response(StatusCode::OK, status)
        }
        Err(err) => engine_error_response(err, correlation_id),
    }
}

/// Handler for POST /users/:user_id/punches.
///
/// Records an IN or OUT punch; a missing timestamp means now.
async fn record_punch_handler(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    payload: Result<Json<RecordPunchRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return json_rejection_response(rejection, correlation_id),
    };

    let event = match request.into_event(&user_id, Utc::now()) {
        Ok(event) => event,
        Err(err) => return engine_error_response(err, correlation_id),
    };

    let record = state.source().record_punch(event.clone());
    match with_timeout(state.config().fetch_timeout(), record).await {
        Ok(()) => {
            info!(
                correlation_id = %correlation_id,
                user_id = %event.user_id,
                direction = %event.direction,
                timestamp = %event.timestamp,
                "Punch recorded"
            );
            json_response(StatusCode::CREATED, event)
        }
        Err(err) => engine_error_response(err, correlation_id),
    }
}

/// Handler for POST /users/:user_id/work-updates.
///
/// Records a daily work update; a missing date means today in the configured
/// offset.
async fn record_work_update_handler(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    payload: Result<Json<RecordWorkUpdateRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return json_rejection_response(rejection, correlation_id),
    };

    let config = state.config();
    let today = Utc::now().with_timezone(&config.utc_offset()).date_naive();
    let update = match request.into_update(&user_id, today) {
        Ok(update) => update,
        Err(err) => return engine_error_response(err, correlation_id),
    };

    let record = state.work_updates().record_work_update(update.clone());
    match with_timeout(config.fetch_timeout(), record).await {
        Ok(()) => {
            info!(
                correlation_id = %correlation_id,
                user_id = %update.user_id,
                update_date = %update.update_date,
                "Work update recorded"
            );
            json_response(StatusCode::CREATED, update)
        }
        Err(err) => engine_error_response(err, correlation_id),
    }
}

/// Handler for POST /team/weekly-summary.
async fn team_summary_handler(
    State(state): State<AppState>,
    payload: Result<Json<TeamSummaryRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing team summary request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return json_rejection_response(rejection, correlation_id),
    };

    let punches = match request.punch_events() {
        Ok(punches) => punches,
        Err(err) => return engine_error_response(err, correlation_id),
    };

    let config = state.config();
    let week_of = request
        .week_of
        .unwrap_or_else(|| Utc::now().with_timezone(&config.utc_offset()).date_naive());
    let window = match AttendanceWindow::week_containing_date(
        week_of,
        config.week_start(),
        config.utc_offset(),
    ) {
        Ok(window) => window,
        Err(err) => return engine_error_response(err, correlation_id),
    };

    let start_time = Instant::now();
    let rows = build_team_summary(
        &punches,
        &request.work_updates,
        &request.user_names,
        &window,
        config.standard_workday_hours(),
    );
    info!(
        correlation_id = %correlation_id,
        members = rows.len(),
        punches = punches.len(),
        duration_us = start_time.elapsed().as_micros(),
        "Team summary built"
    );

    json_response(StatusCode::OK, rows)
}

/// End of the range covered by `weeks` windows starting at `first_window`.
fn weeks_range_end(first_window: &AttendanceWindow, weeks: u32) -> EngineResult<DateTime<Utc>> {
    first_window
        .start
        .checked_add_signed(chrono::Duration::days(7 * i64::from(weeks)))
        .ok_or_else(|| EngineError::InvalidWindow {
            message: format!("{weeks} weeks from {} is out of range", first_window.start),
        })
}

/// Bounds a source call by `timeout`.
async fn with_timeout<T>(
    timeout: Duration,
    call: impl Future<Output = EngineResult<T>>,
) -> EngineResult<T> {
    match tokio::time::timeout(timeout, call).await {
        Ok(result) => result,
        Err(_) => Err(EngineError::SourceTimeout {
            timeout_ms: u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
        }),
    }
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (status, [(header::CONTENT_TYPE, "application/json")], Json(body)).into_response()
}

fn engine_error_response(err: EngineError, correlation_id: Uuid) -> Response {
    warn!(correlation_id = %correlation_id, error = %err, "Request failed");
    let api_error: ApiErrorResponse = err.into();
    json_response(api_error.status, api_error.error)
}

fn json_rejection_response(rejection: JsonRejection, correlation_id: Uuid) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // The body text carries serde's description of the problem
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    json_response(StatusCode::BAD_REQUEST, error)
}
