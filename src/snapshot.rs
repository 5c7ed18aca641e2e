//! Read-only graph and POI snapshot shared by concurrent queries

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::Result;
use crate::graph::GraphIndex;
use crate::models::{Accommodation, Attraction, City, Connection, Poi, Restaurant};
use crate::poi_index::PoiIndex;

/// Raw records as materialized by a data provider
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapshotData {
    pub cities: Vec<City>,
    pub connections: Vec<Connection>,
    pub attractions: Vec<Attraction>,
    pub accommodations: Vec<Accommodation>,
    pub restaurants: Vec<Restaurant>,
}

/// Indexed, immutable view of one provider fetch
#[derive(Debug)]
pub struct TravelSnapshot {
    graph: GraphIndex,
    pois: PoiIndex,
    loaded_at: DateTime<Utc>,
}

impl TravelSnapshot {
    pub fn build(data: SnapshotData) -> Result<Self> {
        let SnapshotData {
            cities,
            connections,
            attractions,
            accommodations,
            restaurants,
        } = data;

        let graph = GraphIndex::build(cities, connections)?;
        let pois = PoiIndex::build(attractions, accommodations, restaurants)?;
        pois.report_orphans(|id| graph.find_by_id(id).is_some());

        debug!(
            "Built snapshot with {} cities and {} connections",
            graph.city_count(),
            graph.connection_count()
        );

        Ok(Self {
            graph,
            pois,
            loaded_at: Utc::now(),
        })
    }

    #[must_use]
    pub fn graph(&self) -> &GraphIndex {
        &self.graph
    }

    #[must_use]
    pub fn pois(&self) -> &PoiIndex {
        &self.pois
    }

    #[must_use]
    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }

    /// Distinct categories a traveller can ask for: activity categories,
    /// cuisines, accommodation types and attraction names, sorted.
    #[must_use]
    pub fn all_unique_interest_categories(&self) -> Vec<String> {
        let mut categories = BTreeSet::new();
        for poi in self.pois.iter() {
            match poi {
                Poi::Attraction(attraction) => {
                    categories.insert(attraction.name.as_str());
                    for activity in &attraction.activities {
                        categories.insert(activity.category.as_str());
                    }
                }
                Poi::Accommodation(accommodation) => {
                    if let Some(kind) = &accommodation.accommodation_type {
                        categories.insert(kind.as_str());
                    }
                }
                Poi::Restaurant(restaurant) => {
                    categories.insert(restaurant.cuisine.as_str());
                }
            }
        }
        categories.into_iter().map(str::to_string).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Activity, BudgetTier};

    #[test]
    fn test_unique_interest_categories() {
        let data = SnapshotData {
            cities: vec![City::new("p", "Paris", BudgetTier::High)],
            connections: vec![],
            attractions: vec![Attraction {
                city_id: "p".to_string(),
                name: "Eiffel Tower".to_string(),
                cost: 25.0,
                duration: 2.0,
                activities: vec![Activity {
                    name: "Summit Climb".to_string(),
                    category: "Hiking".to_string(),
                }],
            }],
            accommodations: vec![Accommodation {
                city_id: "p".to_string(),
                name: "Le Grand".to_string(),
                cost_per_night: 300.0,
                accommodation_type: Some("Hotel".to_string()),
            }],
            restaurants: vec![
                Restaurant {
                    city_id: "p".to_string(),
                    name: "Luigi".to_string(),
                    cuisine: "Italian".to_string(),
                    average_cost: 40.0,
                },
                Restaurant {
                    city_id: "p".to_string(),
                    name: "Mario".to_string(),
                    cuisine: "Italian".to_string(),
                    average_cost: 35.0,
                },
            ],
        };

        let snapshot = TravelSnapshot::build(data).unwrap();
        assert_eq!(
            snapshot.all_unique_interest_categories(),
            vec!["Eiffel Tower", "Hiking", "Hotel", "Italian"]
        );
    }

    #[test]
    fn test_snapshot_data_tolerates_missing_sections() {
        let data: SnapshotData = serde_json::from_str(r#"{"cities": []}"#).unwrap();
        assert!(data.connections.is_empty());
        assert!(TravelSnapshot::build(data).is_ok());
    }

    #[test]
    fn test_loaded_at_is_build_time() {
        let before = Utc::now();
        let snapshot = TravelSnapshot::build(SnapshotData::default()).unwrap();
        assert!(snapshot.loaded_at() >= before);
        assert!(snapshot.loaded_at() <= Utc::now());
    }
}
