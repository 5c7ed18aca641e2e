mod common;

use travel_atlas::models::{City, Connection};
use travel_atlas::planner::shortest_paths;
use travel_atlas::{
    BudgetTier, CancellationToken, SearchConfig, ShortestPathQuery, SnapshotData,
    TravelAtlasError, TravelSnapshot,
};

use common::*;

fn is_sorted(paths: &[travel_atlas::PathResult]) -> bool {
    paths.windows(2).all(|w| {
        (w[0].total_cost, w[0].total_time) <= (w[1].total_cost, w[1].total_time)
    })
}

#[test]
fn test_budget_excludes_expensive_direct_connection() {
    let data = SnapshotData {
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
    };
    let snapshot = TravelSnapshot::build(data).unwrap();
    let paths = shortest_paths(
        &snapshot,
        &ShortestPathQuery::new("A", "C", 300.0, 3.0),
        &SearchConfig::default(),
        &CancellationToken::new(),
    )
    .unwrap();

    assert_eq!(paths.len(), 1);
    assert_eq!(paths[0].city_names().collect::<Vec<_>>(), vec!["A", "B", "C"]);
    assert_eq!(paths[0].total_cost, 200.0);
    assert_eq!(paths[0].total_time, 2.0);
}

#[test]
fn test_seed_results_sorted_and_bounded() {
    let snapshot = seed_snapshot();
    let query = ShortestPathQuery::new("Pune", "Lucknow", 40_000.0, 30.0);
    let paths = shortest_paths(
        &snapshot,
        &query,
        &SearchConfig::default(),
        &CancellationToken::new(),
    )
    .unwrap();

    assert!(!paths.is_empty());
    assert!(paths.len() <= 10);
    assert!(is_sorted(&paths));
    assert_eq!(paths[0].city_names().collect::<Vec<_>>(), vec!["Pune", "Jaipur", "Lucknow"]);
    assert_eq!(paths[0].total_cost, 3900.0);

    for path in &paths {
        assert_eq!(path.nodes.first().unwrap().name, "Pune");
        assert_eq!(path.nodes.last().unwrap().name, "Lucknow");
        assert_eq!(path.edges.len() + 1, path.nodes.len());
        assert_eq!(path.total_cost, path.edges.iter().map(|e| e.cost).sum::<f64>());
        assert!(path.total_cost <= 40_000.0 && path.total_time <= 30.0);
    }
}

#[test]
fn test_top_k_is_prefix_of_larger_k() {
    let snapshot = seed_snapshot();
    let query = ShortestPathQuery::new("Delhi", "Pune", 50_000.0, 40.0);
    let search = |top_k| SearchConfig {
        top_k,
        ..SearchConfig::default()
    };
    let cancel = CancellationToken::new();

    let ten = shortest_paths(&snapshot, &query, &search(10), &cancel).unwrap();
    let fifty = shortest_paths(&snapshot, &query, &search(50), &cancel).unwrap();

    assert!(is_sorted(&fifty));
    assert_eq!(ten.len(), fifty.len().min(10));
    assert_eq!(ten[..], fifty[..ten.len()]);
}

#[test]
fn test_per_edge_ceilings_are_configurable() {
    let snapshot = seed_snapshot();
    let query = ShortestPathQuery::new("Delhi", "Kolkata", 10_000.0, 10.0);
    let strict = SearchConfig {
        per_edge_cost_ceiling: 3000.0,
        ..SearchConfig::default()
    };
    let cancel = CancellationToken::new();

    let default = shortest_paths(&snapshot, &query, &SearchConfig::default(), &cancel).unwrap();
    assert_eq!(default.len(), 1);
    assert_eq!(default[0].total_cost, 7500.0);
    assert_eq!(default[0].total_time, 4.5);

    assert!(shortest_paths(&snapshot, &query, &strict, &cancel).unwrap().is_empty());
}

#[test]
fn test_unknown_end_city_is_empty() {
    let snapshot = seed_snapshot();
    let paths = shortest_paths(
        &snapshot,
        &ShortestPathQuery::new("Delhi", "Atlantis", 10_000.0, 10.0),
        &SearchConfig::default(),
        &CancellationToken::new(),
    )
    .unwrap();
    assert!(paths.is_empty());
}

#[test]
fn test_city_names_are_case_sensitive() {
    let snapshot = seed_snapshot();
    let err = shortest_paths(
        &snapshot,
        &ShortestPathQuery::new("delhi", "Kolkata", 10_000.0, 10.0),
        &SearchConfig::default(),
        &CancellationToken::new(),
    )
    .unwrap_err();
    assert!(matches!(err, TravelAtlasError::InvalidQuery { .. }));
}

#[tokio::test]
async fn test_response_carries_catalog_interests() {
    let planner = seed_planner();
    let response = planner
        .find_shortest_constrained(
            &ShortestPathQuery::new("Delhi", "Kolkata", 10_000.0, 10.0),
            &CancellationToken::new(),
        )
        .await
        .unwrap();

    assert_eq!(response.paths.len(), 1);
    assert_eq!(response.interests.len(), 3);
    assert_eq!(response.interests["Delhi"], vec!["History", "Food"]);
    assert_eq!(response.interests["Mumbai"], vec!["Beaches"]);
    assert!(response.interests["Kolkata"].is_empty());

    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(json["paths"][0]["totalCost"], 7500.0);
    assert_eq!(json["paths"][0]["edges"][0]["travelTime"], 2.0);
    assert_eq!(json["paths"][0]["nodes"][1]["name"], "Mumbai");
}

#[tokio::test]
async fn test_negative_budget_is_rejected() {
    let planner = seed_planner();
    let err = planner
        .find_shortest_constrained(
            &ShortestPathQuery::new("Delhi", "Kolkata", -1.0, 10.0),
            &CancellationToken::new(),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, TravelAtlasError::InvalidQuery { .. }));
}
