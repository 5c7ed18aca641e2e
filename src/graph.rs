//! In-memory city graph index
//!
//! Built once from the full city and connection sets of a snapshot. Neighbor
//! iteration follows connection insertion order, which is also the order the
//! planners explore branches in.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};
use tracing::warn;

use crate::models::{City, Connection};
use crate::{Result, TravelAtlasError};

/// Position of a city inside a [`GraphIndex`]
pub type CityIdx = NodeIndex;
/// Position of a connection inside a [`GraphIndex`]
pub type ConnectionIdx = EdgeIndex;

/// One outgoing step from a city
#[derive(Debug, Clone, Copy)]
pub struct Hop<'a> {
    pub connection_idx: ConnectionIdx,
    pub connection: &'a Connection,
    pub to: CityIdx,
}

#[derive(Debug)]
pub struct GraphIndex {
    graph: DiGraph<City, Connection>,
    by_id: HashMap<String, CityIdx>,
    by_name: HashMap<String, CityIdx>,
    // petgraph walks edges newest-first, keep our own insertion-ordered lists
    outgoing: Vec<Vec<(ConnectionIdx, CityIdx)>>,
}

impl GraphIndex {
    pub fn build(cities: Vec<City>, connections: Vec<Connection>) -> Result<Self> {
        let mut graph = DiGraph::with_capacity(cities.len(), connections.len());
        let mut by_id = HashMap::with_capacity(cities.len());
        let mut by_name = HashMap::with_capacity(cities.len());

        for city in cities {
            if by_id.contains_key(&city.id) {
                return Err(TravelAtlasError::data_unavailable(format!(
                    "Duplicate city id '{}' in snapshot",
                    city.id
                )));
            }
            let id = city.id.clone();
            let name = city.name.clone();
            let idx = graph.add_node(city);
            by_id.insert(id, idx);
            match by_name.entry(name) {
                Entry::Vacant(slot) => {
                    slot.insert(idx);
                }
                Entry::Occupied(slot) => {
                    warn!("Duplicate city name '{}', lookups resolve to the first", slot.key());
                }
            }
        }

        let mut outgoing = vec![Vec::new(); graph.node_count()];
        for connection in connections {
            if !(connection.cost >= 0.0 && connection.travel_time >= 0.0) {
                return Err(TravelAtlasError::data_unavailable(format!(
                    "Connection {} -> {} has a negative or undefined cost/travel time",
                    connection.from_city_id, connection.to_city_id
                )));
            }
            let from = Self::resolve(&by_id, &connection.from_city_id)?;
            let to = Self::resolve(&by_id, &connection.to_city_id)?;
            let edge = graph.add_edge(from, to, connection);
            outgoing[from.index()].push((edge, to));
        }

        Ok(Self {
            graph,
            by_id,
            by_name,
            outgoing,
        })
    }

    fn resolve(by_id: &HashMap<String, CityIdx>, id: &str) -> Result<CityIdx> {
        by_id.get(id).copied().ok_or_else(|| {
            TravelAtlasError::data_unavailable(format!(
                "Connection references unknown city '{id}'"
            ))
        })
    }

    #[must_use]
    pub fn city_count(&self) -> usize {
        self.graph.node_count()
    }

    #[must_use]
    pub fn connection_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// All cities in load order
    pub fn cities(&self) -> impl Iterator<Item = CityIdx> + '_ {
        self.graph.node_indices()
    }

    #[must_use]
    pub fn city(&self, idx: CityIdx) -> &City {
        &self.graph[idx]
    }

    #[must_use]
    pub fn connection(&self, idx: ConnectionIdx) -> &Connection {
        &self.graph[idx]
    }

    #[must_use]
    pub fn find_by_id(&self, id: &str) -> Option<CityIdx> {
        self.by_id.get(id).copied()
    }

    /// Exact, case-sensitive lookup by city name
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<CityIdx> {
        self.by_name.get(name).copied()
    }

    /// Outgoing connections of a city in insertion order
    pub fn neighbors(&self, city: CityIdx) -> impl Iterator<Item = Hop<'_>> + '_ {
        self.outgoing
            .get(city.index())
            .into_iter()
            .flatten()
            .map(move |&(connection_idx, to)| Hop {
                connection_idx,
                connection: &self.graph[connection_idx],
                to,
            })
    }

    #[must_use]
    pub fn out_degree(&self, city: CityIdx) -> usize {
        self.outgoing.get(city.index()).map_or(0, Vec::len)
    }

    /// The `pos`-th outgoing connection of a city, in insertion order
    #[must_use]
    pub fn nth_neighbor(&self, city: CityIdx, pos: usize) -> Option<Hop<'_>> {
        let &(connection_idx, to) = self.outgoing.get(city.index())?.get(pos)?;
        Some(Hop {
            connection_idx,
            connection: &self.graph[connection_idx],
            to,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BudgetTier;

    fn cities() -> Vec<City> {
        vec![
            City::new("a", "Alpha", BudgetTier::Low),
            City::new("b", "Beta", BudgetTier::Medium),
            City::new("c", "Gamma", BudgetTier::High),
        ]
    }

    #[test]
    fn test_neighbors_follow_insertion_order() {
        let graph = GraphIndex::build(
            cities(),
            vec![
                Connection::new("a", "b", 10.0, 1.0),
                Connection::new("a", "c", 20.0, 2.0),
                Connection::new("a", "b", 5.0, 3.0),
            ],
        )
        .unwrap();

        let a = graph.find_by_id("a").unwrap();
        let costs: Vec<f64> = graph.neighbors(a).map(|hop| hop.connection.cost).collect();
        assert_eq!(costs, vec![10.0, 20.0, 5.0]);
        assert_eq!(graph.out_degree(a), 3);
        assert_eq!(graph.nth_neighbor(a, 1).unwrap().to, graph.find_by_id("c").unwrap());
        assert!(graph.nth_neighbor(a, 3).is_none());
    }

    #[test]
    fn test_lookup_by_name_is_exact() {
        let graph = GraphIndex::build(cities(), vec![]).unwrap();
        assert!(graph.find_by_name("Beta").is_some());
        assert!(graph.find_by_name("beta").is_none());
        assert_eq!(graph.city_count(), 3);
        assert_eq!(graph.connection_count(), 0);
    }

    #[test]
    fn test_unknown_city_in_connection_is_rejected() {
        let err = GraphIndex::build(cities(), vec![Connection::new("a", "zz", 1.0, 1.0)])
            .unwrap_err();
        assert!(matches!(err, TravelAtlasError::DataUnavailable { .. }));
    }

    #[test]
    fn test_negative_cost_is_rejected() {
        let err = GraphIndex::build(cities(), vec![Connection::new("a", "b", -1.0, 1.0)])
            .unwrap_err();
        assert!(err.to_string().contains("negative"));
    }

    #[test]
    fn test_duplicate_city_id_is_rejected() {
        let mut cities = cities();
        cities.push(City::new("a", "Other", BudgetTier::Low));
        assert!(GraphIndex::build(cities, vec![]).is_err());
    }
}
