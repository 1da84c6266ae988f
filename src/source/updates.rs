use async_trait::async_trait;
use chrono::NaiveDate;
use std::fs;
use std::path::Path;
use tokio::sync::RwLock;
use tracing::info;

use crate::error::{EngineError, EngineResult};
use crate::models::WorkUpdate;

use super::WorkUpdateSource;

/// A work update source held in memory, in insertion order.
#[derive(Debug, Default)]
pub struct InMemoryWorkUpdateSource {
    updates: RwLock<Vec<WorkUpdate>>,
}

impl InMemoryWorkUpdateSource {
    /// Creates an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a source holding the given updates.
    pub fn with_updates(updates: Vec<WorkUpdate>) -> Self {
        Self {
            updates: RwLock::new(updates),
        }
    }

    /// Loads a JSON array of work update rows from disk.
    pub fn load_json<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        let updates: Vec<WorkUpdate> =
            serde_json::from_str(&content).map_err(|e| EngineError::ConfigParseError {
                path: path_str.clone(),
                message: e.to_string(),
            })?;

        info!(path = %path_str, updates = updates.len(), "Loaded seed work updates");
        Ok(Self::with_updates(updates))
    }
}

#[async_trait]
impl WorkUpdateSource for InMemoryWorkUpdateSource {
    async fn fetch_work_updates(
        &self,
        user_id: &str,
        first_date: NaiveDate,
        last_date: NaiveDate,
    ) -> EngineResult<Vec<WorkUpdate>> {
        let updates = self.updates.read().await;
        Ok(updates
            .iter()
            .filter(|u| u.user_id == user_id)
            .filter(|u| u.update_date >= first_date && u.update_date <= last_date)
            .cloned()
            .collect())
    }

    async fn record_work_update(&self, update: WorkUpdate) -> EngineResult<()> {
        self.updates.write().await.push(update);
        Ok(())
    }
}
