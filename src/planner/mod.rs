//! Trip planning engine
//!
//! [`TripPlanner`] is the entry point: every query performs one bounded fetch
//! from the data provider, indexes it into a [`TravelSnapshot`] and runs the
//! CPU-bound search on the blocking pool. The synchronous [`plan_trips`] and
//! [`shortest_paths`] functions run directly against a snapshot.

pub mod city_filter;
pub mod enumerator;
pub mod evaluator;
pub mod query;
pub mod shortest_path;

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use std::time::Instant;

use rayon::prelude::*;
use tokio::task;
use tracing::{debug, info, instrument};

use crate::cancel::CancellationToken;
use crate::catalog::InterestCatalog;
use crate::config::SearchConfig;
use crate::graph::CityIdx;
use crate::models::{PathResult, ShortestPathsResponse, TripResult};
use crate::provider::TravelDataProvider;
use crate::snapshot::TravelSnapshot;
use crate::{Result, TravelAtlasError};

use city_filter::{CityCriteria, CityEvaluations};
use enumerator::{EnumerationStats, PathEnumerator};
use evaluator::TripEvaluator;
use shortest_path::{EdgeCeilings, ShortestPathSearch};

pub use query::{ShortestPathQuery, TripLimits, TripQuery, Totals};

pub struct TripPlanner {
    provider: Arc<dyn TravelDataProvider>,
    catalog: Arc<dyn InterestCatalog>,
    search: SearchConfig,
}

impl TripPlanner {
    pub fn new(
        provider: Arc<dyn TravelDataProvider>,
        catalog: Arc<dyn InterestCatalog>,
        search: SearchConfig,
    ) -> Self {
        Self {
            provider,
            catalog,
            search,
        }
    }

    /// Fetch and index a fresh snapshot, bounded by the query timeout
    #[instrument(name = "load_snapshot", level = "debug", skip(self), fields(provider = self.provider.name()))]
    pub async fn snapshot(&self) -> Result<Arc<TravelSnapshot>> {
        let timeout = self.search.query_timeout();
        let data = tokio::time::timeout(timeout, self.provider.load())
            .await
            .map_err(|_| {
                TravelAtlasError::data_unavailable(format!(
                    "Provider '{}' did not respond within {}s",
                    self.provider.name(),
                    timeout.as_secs()
                ))
            })?
            .map_err(into_data_unavailable)?;

        let snapshot = task::spawn_blocking(move || TravelSnapshot::build(data))
            .await
            .map_err(join_failed)??;
        debug!(loaded_at = %snapshot.loaded_at(), "Snapshot ready");
        Ok(Arc::new(snapshot))
    }

    /// Cheapest paths between two cities under budget and duration ceilings,
    /// with the catalog interests of every city they visit
    #[instrument(name = "find_shortest_constrained", level = "debug", skip(self, cancel))]
    pub async fn find_shortest_constrained(
        &self,
        query: &ShortestPathQuery,
        cancel: &CancellationToken,
    ) -> Result<ShortestPathsResponse> {
        query.validate()?;
        let started = Instant::now();
        let snapshot = self.snapshot().await?;

        let owned_query = query.clone();
        let search = self.search.clone();
        let token = cancel.clone();
        let paths = task::spawn_blocking(move || {
            shortest_paths(&snapshot, &owned_query, &search, &token)
        })
        .await
        .map_err(join_failed)??;

        let interests = self.interests_along(&paths).await?;
        info!(
            paths = paths.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Shortest constrained paths from {} to {}",
            query.start_city,
            query.end_city
        );
        Ok(ShortestPathsResponse { paths, interests })
    }

    /// Every itinerary matching the traveller's budget, duration, interests
    /// and budget tier
    #[instrument(name = "find_optimal_trips", level = "debug", skip(self, cancel))]
    pub async fn find_optimal_trips(
        &self,
        query: &TripQuery,
        cancel: &CancellationToken,
    ) -> Result<Vec<TripResult>> {
        query.validate()?;
        let started = Instant::now();
        let snapshot = self.snapshot().await?;

        let owned_query = query.clone();
        let search = self.search.clone();
        let token = cancel.clone();
        let trips = task::spawn_blocking(move || plan_trips(&snapshot, &owned_query, &search, &token))
            .await
            .map_err(join_failed)??;

        info!(
            trips = trips.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Optimal trip search finished"
        );
        Ok(trips)
    }

    /// Sorted distinct interest categories of the current snapshot
    pub async fn all_interest_categories(&self) -> Result<Vec<String>> {
        Ok(self.snapshot().await?.all_unique_interest_categories())
    }

    async fn interests_along(&self, paths: &[PathResult]) -> Result<BTreeMap<String, Vec<String>>> {
        let visited: BTreeSet<&str> = paths.iter().flat_map(PathResult::city_names).collect();
        let mut interests = BTreeMap::new();
        for city in visited {
            let tags = self
                .catalog
                .interests_for(city)
                .await
                .map_err(into_data_unavailable)?;
            interests.insert(city.to_string(), tags);
        }
        Ok(interests)
    }
}

/// Trip search against an already built snapshot.
///
/// Every matching start city is a trip on its own, followed by the trips
/// leaving it. Start cities are searched independently and merged in city
/// order, so the parallel and sequential runs return the same sequence.
pub fn plan_trips(
    snapshot: &TravelSnapshot,
    query: &TripQuery,
    search: &SearchConfig,
    cancel: &CancellationToken,
) -> Result<Vec<TripResult>> {
    query.validate()?;
    let graph = snapshot.graph();
    let starts: Vec<CityIdx> = match &query.start_city {
        Some(name) => vec![graph.find_by_name(name).ok_or_else(|| {
            TravelAtlasError::invalid_query(format!("Unknown start city '{name}'"))
        })?],
        None => graph.cities().collect(),
    };

    let interests = query.interest_set();
    let criteria = CityCriteria {
        budget_tier: query.user_budget_tier,
        interests: &interests,
        max_attraction_duration: query.max_trip_duration,
    };
    let evaluations = CityEvaluations::compute(graph, snapshot.pois(), &criteria);
    debug!(
        matched = evaluations.matched_count(),
        cities = graph.city_count(),
        "Evaluated cities"
    );

    let limits = query.limits();
    let evaluator = TripEvaluator::new(graph, &evaluations, limits);
    let from_start = |start: &CityIdx| {
        let mut paths =
            PathEnumerator::pruned(graph, vec![*start], search.max_hops, &evaluations, limits)
                .with_start_alone()
                .with_cancellation(cancel.clone());
        let trips = evaluator.evaluate(paths.by_ref());
        (trips, paths.stats())
    };

    let per_start: Vec<(Vec<TripResult>, EnumerationStats)> = if search.parallel {
        starts.par_iter().map(from_start).collect()
    } else {
        starts.iter().map(from_start).collect()
    };

    if cancel.is_cancelled() {
        return Err(TravelAtlasError::Cancelled);
    }

    let mut stats = EnumerationStats::default();
    let mut trips = Vec::new();
    for (found, start_stats) in per_start {
        trips.extend(found);
        stats += start_stats;
    }
    debug!(
        emitted = stats.emitted,
        pruned = stats.pruned,
        "Path enumeration finished"
    );
    Ok(trips)
}

/// Shortest-path search against an already built snapshot.
///
/// An unknown start city is rejected; an unknown end city simply has no paths.
pub fn shortest_paths(
    snapshot: &TravelSnapshot,
    query: &ShortestPathQuery,
    search: &SearchConfig,
    cancel: &CancellationToken,
) -> Result<Vec<PathResult>> {
    query.validate()?;
    let graph = snapshot.graph();
    let start = graph.find_by_name(&query.start_city).ok_or_else(|| {
        TravelAtlasError::invalid_query(format!("Unknown start city '{}'", query.start_city))
    })?;
    let Some(end) = graph.find_by_name(&query.end_city) else {
        debug!(end = %query.end_city, "End city not in snapshot");
        return Ok(Vec::new());
    };

    ShortestPathSearch::new(graph, query.limits())
        .with_edge_ceilings(EdgeCeilings {
            max_cost: search.per_edge_cost_ceiling,
            max_travel_time: search.per_edge_time_ceiling,
        })
        .with_top_k(search.top_k)
        .find_top_paths(start, end, cancel)
}

fn into_data_unavailable(error: TravelAtlasError) -> TravelAtlasError {
    match error {
        TravelAtlasError::DataUnavailable { .. } | TravelAtlasError::Cancelled => error,
        other => TravelAtlasError::data_unavailable(other.to_string()),
    }
}

fn join_failed(error: task::JoinError) -> TravelAtlasError {
    TravelAtlasError::general(format!("Search task failed: {error}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::InMemoryInterestCatalog;
    use crate::models::{BudgetTier, City, Connection};
    use crate::provider::InMemoryProvider;
    use crate::snapshot::SnapshotData;
    use async_trait::async_trait;
    use std::time::Duration;

    fn triangle() -> SnapshotData {
        SnapshotData {
            cities: vec![
                City::new("a", "A", BudgetTier::Low),
                City::new("b", "B", BudgetTier::Low),
                City::new("c", "C", BudgetTier::Low),
            ],
            connections: vec![
                Connection::new("a", "b", 100.0, 1.0),
                Connection::new("b", "c", 100.0, 1.0),
                Connection::new("a", "c", 500.0, 0.5),
            ],
            ..SnapshotData::default()
        }
    }

    fn planner(provider: impl TravelDataProvider + 'static, search: SearchConfig) -> TripPlanner {
        let catalog = InMemoryInterestCatalog::new();
        catalog
            .add_city("B", vec!["Street Food".to_string()])
            .unwrap();
        TripPlanner::new(Arc::new(provider), Arc::new(catalog), search)
    }

    struct StalledProvider;

    #[async_trait]
    impl TravelDataProvider for StalledProvider {
        async fn load(&self) -> Result<SnapshotData> {
            tokio::time::sleep(Duration::from_secs(30)).await;
            Ok(SnapshotData::default())
        }

        fn name(&self) -> &str {
            "stalled"
        }
    }

    struct BrokenProvider;

    #[async_trait]
    impl TravelDataProvider for BrokenProvider {
        async fn load(&self) -> Result<SnapshotData> {
            Err(TravelAtlasError::Io {
                source: std::io::Error::other("connection reset"),
            })
        }

        fn name(&self) -> &str {
            "broken"
        }
    }

    #[tokio::test]
    async fn test_shortest_constrained_attaches_interests() {
        let planner = planner(InMemoryProvider::new(triangle()), SearchConfig::default());
        let response = planner
            .find_shortest_constrained(
                &ShortestPathQuery::new("A", "C", 300.0, 3.0),
                &CancellationToken::new(),
            )
            .await
            .unwrap();

        assert_eq!(response.paths.len(), 1);
        assert_eq!(response.paths[0].total_cost, 200.0);
        assert_eq!(response.interests["B"], vec!["Street Food"]);
        assert!(response.interests["A"].is_empty());
        assert_eq!(response.interests.len(), 3);
    }

    #[tokio::test]
    async fn test_stalled_provider_times_out_as_data_unavailable() {
        let search = SearchConfig {
            query_timeout_seconds: 1,
            ..SearchConfig::default()
        };
        let planner = planner(StalledProvider, search);
        let err = planner
            .find_optimal_trips(&TripQuery::new(100.0, 1.0), &CancellationToken::new())
            .await
            .unwrap_err();
        assert!(matches!(err, TravelAtlasError::DataUnavailable { .. }));
    }

    #[tokio::test]
    async fn test_provider_failure_is_wrapped() {
        let planner = planner(BrokenProvider, SearchConfig::default());
        let err = planner.all_interest_categories().await.unwrap_err();
        assert!(matches!(err, TravelAtlasError::DataUnavailable { .. }));
        assert!(err.to_string().contains("connection reset"));
    }

    #[tokio::test]
    async fn test_invalid_query_rejected_before_fetch() {
        let planner = planner(BrokenProvider, SearchConfig::default());
        let err = planner
            .find_optimal_trips(&TripQuery::new(-5.0, 1.0), &CancellationToken::new())
            .await
            .unwrap_err();
        assert!(matches!(err, TravelAtlasError::InvalidQuery { .. }));
    }

    #[tokio::test]
    async fn test_cancelled_before_start() {
        let planner = planner(InMemoryProvider::new(triangle()), SearchConfig::default());
        let cancel = CancellationToken::new();
        cancel.cancel();
        let err = planner
            .find_optimal_trips(&TripQuery::new(1000.0, 10.0), &cancel)
            .await
            .unwrap_err();
        assert!(matches!(err, TravelAtlasError::Cancelled));
    }

    #[test]
    fn test_parallel_and_sequential_agree() {
        let snapshot = TravelSnapshot::build(triangle()).unwrap();
        let query = TripQuery::new(1000.0, 10.0);
        let cancel = CancellationToken::new();
        let parallel = plan_trips(&snapshot, &query, &SearchConfig::default(), &cancel).unwrap();
        let sequential = plan_trips(
            &snapshot,
            &query,
            &SearchConfig {
                parallel: false,
                ..SearchConfig::default()
            },
            &cancel,
        )
        .unwrap();

        assert_eq!(parallel, sequential);
        // A, B and C alone plus A-B, A-B-C, A-C and B-C
        assert_eq!(parallel.len(), 7);
    }
}
