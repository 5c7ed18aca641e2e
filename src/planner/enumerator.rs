//! Bounded depth-first path enumeration with incremental pruning
//!
//! Paths are produced lazily. Every prefix of 1 to `max_hops` connections is a
//! candidate, cities may repeat (the graph has cycles) and the hop bound is
//! the only termination guarantee. The start city on its own (zero hops) is
//! only emitted when asked for with [`PathEnumerator::with_start_alone`].
//! With pruning enabled a branch is abandoned
//! as soon as it enters a non-matching city or its running cost/duration
//! goes strictly over the limits; since all costs are non-negative, no
//! extension of such a branch could qualify.

use std::collections::HashSet;

use crate::cancel::CancellationToken;
use crate::graph::{CityIdx, ConnectionIdx, GraphIndex};

use super::city_filter::{CityEvaluations, CityMatch};
use super::query::{TripLimits, Totals};

/// Cities in visiting order joined by the connections travelled between them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path {
    pub cities: Vec<CityIdx>,
    pub connections: Vec<ConnectionIdx>,
}

impl Path {
    #[must_use]
    pub fn hops(&self) -> usize {
        self.connections.len()
    }
}

/// Anything identified by the sequence of cities it visits
pub trait CitySequence {
    fn city_sequence(&self) -> &[CityIdx];
}

impl CitySequence for Path {
    fn city_sequence(&self) -> &[CityIdx] {
        &self.cities
    }
}

#[derive(Debug, Clone, Copy)]
struct Pruning<'a> {
    evaluations: &'a CityEvaluations,
    limits: TripLimits,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnumerationStats {
    pub emitted: usize,
    pub pruned: usize,
}

impl std::ops::AddAssign for EnumerationStats {
    fn add_assign(&mut self, other: Self) {
        self.emitted += other.emitted;
        self.pruned += other.pruned;
    }
}

/// Lazy, finite, non-restartable sequence of candidate paths
pub struct PathEnumerator<'a> {
    graph: &'a GraphIndex,
    pruning: Option<Pruning<'a>>,
    max_hops: usize,
    starts: std::vec::IntoIter<CityIdx>,
    cancel: Option<CancellationToken>,
    start_alone: bool,
    // DFS frame stack of the current start; index i describes cities[i]
    cities: Vec<CityIdx>,
    connections: Vec<ConnectionIdx>,
    totals: Vec<Totals>,
    cursors: Vec<usize>,
    stats: EnumerationStats,
    cancelled: bool,
}

impl<'a> PathEnumerator<'a> {
    /// Every path from `starts`, without any pruning
    pub fn exhaustive(graph: &'a GraphIndex, starts: Vec<CityIdx>, max_hops: usize) -> Self {
        Self {
            graph,
            pruning: None,
            max_hops,
            starts: starts.into_iter(),
            cancel: None,
            start_alone: false,
            cities: Vec::new(),
            connections: Vec::new(),
            totals: Vec::new(),
            cursors: Vec::new(),
            stats: EnumerationStats::default(),
            cancelled: false,
        }
    }

    /// Paths from `starts` whose cities all match and whose running totals
    /// stay within `limits`
    pub fn pruned(
        graph: &'a GraphIndex,
        starts: Vec<CityIdx>,
        max_hops: usize,
        evaluations: &'a CityEvaluations,
        limits: TripLimits,
    ) -> Self {
        let mut enumerator = Self::exhaustive(graph, starts, max_hops);
        enumerator.pruning = Some(Pruning {
            evaluations,
            limits,
        });
        enumerator
    }

    #[must_use]
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = Some(cancel);
        self
    }

    /// Also emit every admitted start city as a zero-hop path, ahead of the
    /// paths leaving it
    #[must_use]
    pub fn with_start_alone(mut self) -> Self {
        self.start_alone = true;
        self
    }

    #[must_use]
    pub fn stats(&self) -> EnumerationStats {
        self.stats
    }

    /// True when iteration stopped early because of cancellation
    #[must_use]
    pub fn was_cancelled(&self) -> bool {
        self.cancelled
    }

    /// Totals after stepping into `city`, or `None` when the branch is pruned
    fn admit(&self, prefix: Totals, cost: f64, duration: f64, city: CityIdx) -> Option<Totals> {
        let Some(pruning) = &self.pruning else {
            return Some(prefix);
        };
        let CityMatch::Matched(evaluation) = pruning.evaluations.get(city) else {
            return None;
        };
        let totals = prefix
            .add(cost, duration)
            .add(evaluation.cost, evaluation.duration);
        (!totals.exceeds(&pruning.limits)).then_some(totals)
    }

    fn push(&mut self, city: CityIdx, connection: Option<ConnectionIdx>, totals: Totals) {
        self.cities.push(city);
        self.connections.extend(connection);
        self.totals.push(totals);
        self.cursors.push(0);
    }

    fn pop(&mut self) {
        self.cities.pop();
        self.totals.pop();
        self.cursors.pop();
        if self.connections.len() >= self.cities.len() {
            self.connections.pop();
        }
    }

    fn abort(&mut self) {
        self.cancelled = true;
        self.cities.clear();
        self.connections.clear();
        self.totals.clear();
        self.cursors.clear();
        self.starts = Vec::new().into_iter();
    }
}

impl Iterator for PathEnumerator<'_> {
    type Item = Path;

    fn next(&mut self) -> Option<Path> {
        loop {
            if self.cancelled {
                return None;
            }
            if self.cancel.as_ref().is_some_and(CancellationToken::is_cancelled) {
                self.abort();
                return None;
            }

            let Some(&current) = self.cities.last() else {
                let start = self.starts.next()?;
                let Some(totals) = self.admit(Totals::default(), 0.0, 0.0, start) else {
                    self.stats.pruned += 1;
                    continue;
                };
                self.push(start, None, totals);
                if self.start_alone {
                    self.stats.emitted += 1;
                    return Some(Path {
                        cities: vec![start],
                        connections: Vec::new(),
                    });
                }
                continue;
            };

            if self.connections.len() >= self.max_hops {
                self.pop();
                continue;
            }

            let depth = self.cursors.len() - 1;
            let position = self.cursors[depth];
            let graph = self.graph;
            let Some(hop) = graph.nth_neighbor(current, position) else {
                self.pop();
                continue;
            };
            self.cursors[depth] += 1;

            let prefix = self.totals[depth];
            match self.admit(prefix, hop.connection.cost, hop.connection.travel_time, hop.to) {
                Some(totals) => {
                    self.push(hop.to, Some(hop.connection_idx), totals);
                    self.stats.emitted += 1;
                    return Some(Path {
                        cities: self.cities.clone(),
                        connections: self.connections.clone(),
                    });
                }
                None => self.stats.pruned += 1,
            }
        }
    }
}

/// Iterator adaptor suppressing items whose city sequence was already seen.
///
/// Two paths over different parallel connections but through the same cities
/// count as duplicates; the first one wins.
pub struct Distinct<I> {
    inner: I,
    seen: HashSet<Vec<CityIdx>>,
}

impl<I> Iterator for Distinct<I>
where
    I: Iterator,
    I::Item: CitySequence,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        for item in self.inner.by_ref() {
            if self.seen.insert(item.city_sequence().to_vec()) {
                return Some(item);
            }
        }
        None
    }
}

pub trait DistinctCitiesExt: Iterator + Sized {
    fn distinct_cities(self) -> Distinct<Self> {
        Distinct {
            inner: self,
            seen: HashSet::new(),
        }
    }
}

impl<I> DistinctCitiesExt for I
where
    I: Iterator,
    I::Item: CitySequence,
{
}
