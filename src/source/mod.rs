//! Punch and work update sources.
//!
//! The [`PunchSource`] trait abstracts the store punches are read from and
//! appended to; [`WorkUpdateSource`] does the same for daily work updates.
//! The engine ships in-memory implementations of both; other stores plug in
//! by implementing the traits.

mod memory;
mod updates;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};

use crate::error::EngineResult;
use crate::models::{PunchEvent, WorkUpdate};

pub use memory::InMemoryPunchSource;
pub use updates::InMemoryWorkUpdateSource;

/// Read and append access to a user's punches.
///
/// Implementations never mutate or delete stored punches. Failures are
/// reported as [`EngineError::SourceUnavailable`](crate::error::EngineError::SourceUnavailable).
#[async_trait]
pub trait PunchSource: Send + Sync {
    /// Returns the user's punches with `range_start <= timestamp < range_end`.
    ///
    /// Order is unspecified; the aggregator sorts its input.
    async fn fetch_punches(
        &self,
        user_id: &str,
        range_start: DateTime<Utc>,
        range_end: DateTime<Utc>,
    ) -> EngineResult<Vec<PunchEvent>>;

    /// Returns up to `limit` of the user's most recent punches, newest first.
    async fn latest_punches(&self, user_id: &str, limit: usize) -> EngineResult<Vec<PunchEvent>>;

    /// Appends a punch.
    async fn record_punch(&self, event: PunchEvent) -> EngineResult<()>;
}

/// Read and append access to a user's daily work updates.
#[async_trait]
pub trait WorkUpdateSource: Send + Sync {
    /// Returns the user's updates dated `first_date..=last_date`.
    async fn fetch_work_updates(
        &self,
        user_id: &str,
        first_date: NaiveDate,
        last_date: NaiveDate,
    ) -> EngineResult<Vec<WorkUpdate>>;

    /// Appends an update.
    async fn record_work_update(&self, update: WorkUpdate) -> EngineResult<()>;
}
