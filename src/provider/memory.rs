use async_trait::async_trait;

use super::TravelDataProvider;
use crate::Result;
use crate::snapshot::SnapshotData;

/// Serves a fixed, owned snapshot
#[derive(Debug, Clone, Default)]
pub struct InMemoryProvider {
    data: SnapshotData,
}

impl InMemoryProvider {
    #[must_use]
    pub fn new(data: SnapshotData) -> Self {
        Self { data }
    }
}

#[async_trait]
impl TravelDataProvider for InMemoryProvider {
    async fn load(&self) -> Result<SnapshotData> {
        Ok(self.data.clone())
    }

    fn name(&self) -> &str {
        "memory"
    }
}
