use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::fs;
use std::path::Path;
use tokio::sync::RwLock;
use tracing::info;

use crate::error::{EngineError, EngineResult};
use crate::models::{PunchEvent, PunchRecord};

use super::PunchSource;

/// A punch source held in memory.
///
/// Punches are kept in insertion order behind a [`tokio::sync::RwLock`] so
/// concurrent readers never block each other.
///
/// # Example
///
/// ```
/// use attendance_engine::models::{PunchDirection, PunchEvent};
/// use attendance_engine::source::{InMemoryPunchSource, PunchSource};
/// use chrono::Utc;
///
/// # #[tokio::main]
/// # async fn main() {
/// let source = InMemoryPunchSource::new();
/// source
///     .record_punch(PunchEvent::new("user_1", PunchDirection::In, Utc::now()))
///     .await
///     .unwrap();
///
/// let latest = source.latest_punches("user_1", 1).await.unwrap();
/// assert_eq!(latest.len(), 1);
/// # }
/// ```
#[derive(Debug, Default)]
pub struct InMemoryPunchSource {
    events: RwLock<Vec<PunchEvent>>,
}

impl InMemoryPunchSource {
    /// Creates an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a source holding the given events.
    pub fn with_events(events: Vec<PunchEvent>) -> Self {
        Self {
            events: RwLock::new(events),
        }
    }

    /// Creates a source from store rows, converting each one.
    ///
    /// Fails on the first row that is not a valid punch.
    pub fn from_records(records: Vec<PunchRecord>) -> EngineResult<Self> {
        let events = records
            .into_iter()
            .map(PunchEvent::try_from)
            .collect::<EngineResult<Vec<_>>>()?;
        Ok(Self::with_events(events))
    }

    /// Loads a JSON array of punch records from disk.
    pub fn load_json<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        let records: Vec<PunchRecord> =
            serde_json::from_str(&content).map_err(|e| EngineError::ConfigParseError {
                path: path_str.clone(),
                message: e.to_string(),
            })?;

        let source = Self::from_records(records)?;
        info!(path = %path_str, "Loaded seed punches");
        Ok(source)
    }

    /// Returns the number of stored punches.
    pub async fn len(&self) -> usize {
        self.events.read().await.len()
    }

    /// Returns `true` if no punches are stored.
    pub async fn is_empty(&self) -> bool {
        self.events.read().await.is_empty()
    }
}

#[async_trait]
impl PunchSource for InMemoryPunchSource {
    async fn fetch_punches(
        &self,
        user_id: &str,
        range_start: DateTime<Utc>,
        range_end: DateTime<Utc>,
    ) -> EngineResult<Vec<PunchEvent>> {
        let events = self.events.read().await;
        Ok(events
            .iter()
            .filter(|e| e.user_id == user_id)
            .filter(|e| e.timestamp >= range_start && e.timestamp < range_end)
            .cloned()
            .collect())
    }

    async fn latest_punches(&self, user_id: &str, limit: usize) -> EngineResult<Vec<PunchEvent>> {
        let events = self.events.read().await;
        let mut mine: Vec<PunchEvent> = events
            .iter()
            .filter(|e| e.user_id == user_id)
            .cloned()
            .collect();

        // Newest first; among equal timestamps the later insert is newer
        mine.reverse();
        mine.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        mine.truncate(limit);
        Ok(mine)
    }

    async fn record_punch(&self, event: PunchEvent) -> EngineResult<()> {
        self.events.write().await.push(event);
        Ok(())
    }
}
