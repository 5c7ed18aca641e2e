//! `TravelAtlas` - constrained trip planning over a graph of cities
//!
//! This library indexes cities, their travel connections and points of
//! interest, and answers two questions: which itineraries fit a traveller's
//! budget, duration, interests and budget tier, and what are the cheapest
//! paths between two cities.

pub mod cache;
pub mod cancel;
pub mod catalog;
pub mod config;
pub mod error;
pub mod graph;
pub mod logging;
pub mod models;
pub mod planner;
pub mod poi_index;
pub mod provider;
pub mod snapshot;

// Re-export core types for public API
pub use cancel::CancellationToken;
pub use catalog::{InMemoryInterestCatalog, InterestCatalog};
pub use config::{SearchConfig, TravelAtlasConfig};
pub use error::TravelAtlasError;
pub use models::{BudgetTier, PathResult, ShortestPathsResponse, TripResult};
pub use planner::{ShortestPathQuery, TripPlanner, TripQuery};
pub use provider::{CachedProvider, InMemoryProvider, JsonFileProvider, TravelDataProvider};
pub use snapshot::{SnapshotData, TravelSnapshot};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, TravelAtlasError>;
