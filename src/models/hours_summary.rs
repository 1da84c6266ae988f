//! Hours summary models.
//!
//! This module contains the [`HoursSummary`] produced by the weekly hours
//! aggregator and its supporting types: the sessions that were counted and
//! the punch adjacencies that were not.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::{millis_to_hours, round_hours};

/// An inferred IN→OUT interval that contributed worked hours.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkSession {
    /// The IN punch that opened the session.
    pub clock_in: DateTime<Utc>,
    /// The OUT punch that closed the session.
    pub clock_out: DateTime<Utc>,
    /// Unrounded session length in hours.
    pub hours: Decimal,
}

/// The kind of punch adjacency that contributed no hours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnomalyKind {
    /// An IN immediately followed by another IN.
    OrphanedIn,
    /// An OUT not immediately preceded by an IN.
    UnmatchedOut,
    /// A trailing IN with no OUT before the window ends.
    OpenSession,
}

/// A punch that was skipped by the adjacency scan.
///
/// Anomalies are informational only; they never change the totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PunchAnomaly {
    /// What kind of adjacency was skipped.
    pub kind: AnomalyKind,
    /// Timestamp of the skipped punch.
    pub timestamp: DateTime<Utc>,
}

/// Worked hours for one user over one or more windows.
///
/// `total_hours` and `by_day` are rounded to 0.1 for display. `raw_hours`
/// keeps the unrounded value, and [`HoursSummary::merge`] composes summaries
/// from exact per-day milliseconds so rounding never compounds.
///
/// # Example
///
/// ```
/// use attendance_engine::models::HoursSummary;
/// use rust_decimal::Decimal;
///
/// let empty = HoursSummary::default();
/// assert_eq!(empty.total_hours, Decimal::ZERO);
/// assert!(empty.by_day.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoursSummary {
    /// Total worked hours, rounded half-up to one decimal place.
    pub total_hours: Decimal,
    /// Total worked hours, unrounded.
    pub raw_hours: Decimal,
    /// Worked hours per local calendar day, rounded to one decimal place.
    pub by_day: BTreeMap<NaiveDate, Decimal>,
    /// The sessions that were counted, in chronological order.
    pub sessions: Vec<WorkSession>,
    /// Punches that the adjacency scan skipped.
    pub anomalies: Vec<PunchAnomaly>,
    /// How many input events fell outside the window and were discarded.
    pub excluded_events: usize,
    #[serde(skip)]
    daily_millis: BTreeMap<NaiveDate, i64>,
}

impl HoursSummary {
    /// Builds a summary from exact per-day milliseconds.
    pub fn from_daily_millis(
        daily_millis: BTreeMap<NaiveDate, i64>,
        sessions: Vec<WorkSession>,
        anomalies: Vec<PunchAnomaly>,
        excluded_events: usize,
    ) -> Self {
        let total_millis: i64 = daily_millis.values().sum();
        let raw_hours = millis_to_hours(total_millis);
        let by_day = daily_millis
            .iter()
            .map(|(date, millis)| (*date, round_hours(millis_to_hours(*millis))))
            .collect();

        Self {
            total_hours: round_hours(raw_hours),
            raw_hours,
            by_day,
            sessions,
            anomalies,
            excluded_events,
            daily_millis,
        }
    }

    /// Exact worked milliseconds.
    ///
    /// Summaries that were deserialized rather than computed report zero.
    pub fn worked_millis(&self) -> i64 {
        self.daily_millis.values().sum()
    }

    /// Exact worked milliseconds per local day.
    pub fn daily_millis(&self) -> &BTreeMap<NaiveDate, i64> {
        &self.daily_millis
    }

    /// Combines two computed summaries, e.g. consecutive weeks.
    ///
    /// Totals are re-derived from the unrounded per-day values.
    pub fn merge(&self, other: &HoursSummary) -> HoursSummary {
        let mut daily_millis = self.daily_millis.clone();
        for (date, millis) in &other.daily_millis {
            *daily_millis.entry(*date).or_insert(0) += millis;
        }

        let mut sessions = self.sessions.clone();
        sessions.extend(other.sessions.iter().cloned());
        sessions.sort_by_key(|s| s.clock_in);

        let mut anomalies = self.anomalies.clone();
        anomalies.extend(other.anomalies.iter().cloned());
        anomalies.sort_by_key(|a| a.timestamp);

        HoursSummary::from_daily_millis(
            daily_millis,
            sessions,
            anomalies,
            self.excluded_events + other.excluded_events,
        )
    }
}
