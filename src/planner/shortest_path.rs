//! Cheapest constrained paths between two cities
//!
//! A depth-first search that never travels the same connection twice in one
//! path, which bounds it on a cyclic graph. Connections over the per-edge
//! ceilings are never taken. The best `k` paths by `(total cost, total time)`
//! are kept in a sorted buffer; once it is full, any branch whose running
//! totals already reach the worst kept entry is abandoned.

use std::cmp::Ordering;

use tracing::debug;

use crate::cancel::CancellationToken;
use crate::graph::{CityIdx, ConnectionIdx, GraphIndex};
use crate::models::{Connection, EdgeDetail, PathNode, PathResult};
use crate::{Result, TravelAtlasError};

use super::query::{TripLimits, Totals};

pub const DEFAULT_TOP_K: usize = 10;

/// Per-connection admission limits
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeCeilings {
    pub max_cost: f64,
    pub max_travel_time: f64,
}

impl Default for EdgeCeilings {
    fn default() -> Self {
        Self {
            max_cost: 5000.0,
            max_travel_time: 5.0,
        }
    }
}

impl EdgeCeilings {
    fn admits(&self, connection: &Connection) -> bool {
        connection.cost <= self.max_cost && connection.travel_time <= self.max_travel_time
    }
}

#[derive(Debug, Clone)]
struct Candidate {
    totals: Totals,
    cities: Vec<CityIdx>,
    connections: Vec<ConnectionIdx>,
}

fn rank(a: &Totals, b: &Totals) -> Ordering {
    a.cost
        .total_cmp(&b.cost)
        .then_with(|| a.duration.total_cmp(&b.duration))
}

/// Best `k` candidates, ties kept in insertion order
#[derive(Debug)]
struct TopK {
    k: usize,
    entries: Vec<Candidate>,
}

impl TopK {
    fn new(k: usize) -> Self {
        Self {
            k,
            entries: Vec::with_capacity(k + 1),
        }
    }

    fn insert(&mut self, candidate: Candidate) {
        let position = self
            .entries
            .partition_point(|e| rank(&e.totals, &candidate.totals) != Ordering::Greater);
        if position >= self.k {
            return;
        }
        self.entries.insert(position, candidate);
        self.entries.truncate(self.k);
    }

    /// True when nothing reachable from `partial` could still enter the buffer
    fn closes(&self, partial: &Totals) -> bool {
        self.entries.len() >= self.k
            && self
                .entries
                .last()
                .is_some_and(|worst| rank(partial, &worst.totals) != Ordering::Less)
    }
}

pub struct ShortestPathSearch<'a> {
    graph: &'a GraphIndex,
    limits: TripLimits,
    ceilings: EdgeCeilings,
    k: usize,
}

impl<'a> ShortestPathSearch<'a> {
    pub fn new(graph: &'a GraphIndex, limits: TripLimits) -> Self {
        Self {
            graph,
            limits,
            ceilings: EdgeCeilings::default(),
            k: DEFAULT_TOP_K,
        }
    }

    #[must_use]
    pub fn with_edge_ceilings(mut self, ceilings: EdgeCeilings) -> Self {
        self.ceilings = ceilings;
        self
    }

    #[must_use]
    pub fn with_top_k(mut self, k: usize) -> Self {
        self.k = k;
        self
    }

    /// Paths of at least one hop from `start` ending at `end`, ordered by
    /// total cost then total time
    pub fn find_top_paths(
        &self,
        start: CityIdx,
        end: CityIdx,
        cancel: &CancellationToken,
    ) -> Result<Vec<PathResult>> {
        if self.k == 0 {
            return Ok(Vec::new());
        }
        let graph = self.graph;
        let mut top = TopK::new(self.k);

        let mut used = vec![false; graph.connection_count()];
        let mut cities = vec![start];
        let mut connections: Vec<ConnectionIdx> = Vec::new();
        let mut totals = vec![Totals::default()];
        let mut cursors = vec![0usize];
        let mut pruned = 0usize;

        while let Some(&current) = cities.last() {
            if cancel.is_cancelled() {
                return Err(TravelAtlasError::Cancelled);
            }

            let depth = cursors.len() - 1;
            let Some(hop) = graph.nth_neighbor(current, cursors[depth]) else {
                cities.pop();
                totals.pop();
                cursors.pop();
                if let Some(connection) = connections.pop() {
                    used[connection.index()] = false;
                }
                continue;
            };
            cursors[depth] += 1;

            if used[hop.connection_idx.index()] || !self.ceilings.admits(hop.connection) {
                continue;
            }
            let next = totals[depth].add(hop.connection.cost, hop.connection.travel_time);
            if next.exceeds(&self.limits) || top.closes(&next) {
                pruned += 1;
                continue;
            }

            used[hop.connection_idx.index()] = true;
            cities.push(hop.to);
            connections.push(hop.connection_idx);
            totals.push(next);
            cursors.push(0);

            if hop.to == end {
                top.insert(Candidate {
                    totals: next,
                    cities: cities.clone(),
                    connections: connections.clone(),
                });
            }
        }

        debug!(
            found = top.entries.len(),
            pruned, "Shortest constrained path search finished"
        );
        Ok(top
            .entries
            .iter()
            .map(|candidate| self.to_result(candidate))
            .collect())
    }

    fn to_result(&self, candidate: &Candidate) -> PathResult {
        PathResult {
            nodes: candidate
                .cities
                .iter()
                .map(|&city| PathNode {
                    name: self.graph.city(city).name.clone(),
                })
                .collect(),
            edges: candidate
                .connections
                .iter()
                .map(|&connection| {
                    let connection = self.graph.connection(connection);
                    EdgeDetail {
                        cost: connection.cost,
                        travel_time: connection.travel_time,
                    }
                })
                .collect(),
            total_cost: candidate.totals.cost,
            total_time: candidate.totals.duration,
        }
    }
}
