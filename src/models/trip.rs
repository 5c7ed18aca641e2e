//! Result records produced by trip-planning queries

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// POI name bundle of one visited city
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CityDetail {
    pub city_name: String,
    pub attractions: Vec<String>,
    pub accommodations: Vec<String>,
    pub restaurants: Vec<String>,
    pub activities: Vec<String>,
}

/// A qualifying trip with its per-city bundles in path order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripResult {
    pub cities_in_path: Vec<CityDetail>,
    pub trip_cost: f64,
    pub trip_duration: f64,
}

impl TripResult {
    /// Number of connections travelled
    #[must_use]
    pub fn hops(&self) -> usize {
        self.cities_in_path.len().saturating_sub(1)
    }

    pub fn city_names(&self) -> impl Iterator<Item = &str> {
        self.cities_in_path.iter().map(|c| c.city_name.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathNode {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeDetail {
    pub cost: f64,
    pub travel_time: f64,
}

/// One start-to-end route of a shortest-constrained-path query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathResult {
    pub nodes: Vec<PathNode>,
    pub edges: Vec<EdgeDetail>,
    pub total_cost: f64,
    pub total_time: f64,
}

impl PathResult {
    pub fn city_names(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(|n| n.name.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShortestPathsResponse {
    pub paths: Vec<PathResult>,
    /// Catalog interests of every city appearing in `paths`
    pub interests: BTreeMap<String, Vec<String>>,
}
