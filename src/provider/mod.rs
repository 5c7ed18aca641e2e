//! Data providers materializing travel snapshots
//!
//! The graph and POI storage lives outside the engine. A provider performs
//! one bounded fetch per query and hands back raw records; the engine indexes
//! them into a [`TravelSnapshot`](crate::snapshot::TravelSnapshot).

use async_trait::async_trait;

use crate::Result;
use crate::snapshot::SnapshotData;

pub mod cached;
pub mod json_file;
pub mod memory;

pub use cached::CachedProvider;
pub use json_file::JsonFileProvider;
pub use memory::InMemoryProvider;

#[async_trait]
pub trait TravelDataProvider: Send + Sync {
    /// Fetch every city, connection and POI record.
    ///
    /// Storage failures must surface as
    /// [`TravelAtlasError::DataUnavailable`](crate::TravelAtlasError::DataUnavailable).
    async fn load(&self) -> Result<SnapshotData>;

    /// Short label used in logs and cache keys
    fn name(&self) -> &str;
}
