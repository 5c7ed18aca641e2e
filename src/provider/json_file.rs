//! Snapshot provider reading a JSON export of the travel store

use std::path::PathBuf;

use async_trait::async_trait;
use tracing::{debug, info};

use super::TravelDataProvider;
use crate::snapshot::SnapshotData;
use crate::{Result, TravelAtlasError};

/// Loads `{cities, connections, attractions, accommodations, restaurants}`
/// from a JSON document on every fetch
#[derive(Debug, Clone)]
pub struct JsonFileProvider {
    path: PathBuf,
}

impl JsonFileProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl TravelDataProvider for JsonFileProvider {
    #[tracing::instrument(name = "load_json_snapshot", level = "debug", skip(self), fields(path = %self.path.display()))]
    async fn load(&self) -> Result<SnapshotData> {
        debug!("Reading snapshot file");
        let raw = tokio::fs::read_to_string(&self.path).await?;

        let data: SnapshotData = serde_json::from_str(&raw).map_err(|e| {
            TravelAtlasError::data_unavailable(format!(
                "Failed to parse snapshot {}: {e}",
                self.path.display()
            ))
        })?;

        info!(
            "Loaded {} cities and {} connections from {}",
            data.cities.len(),
            data.connections.len(),
            self.path.display()
        );
        Ok(data)
    }

    fn name(&self) -> &str {
        "json-file"
    }
}
