//! Trip evaluation: per-path aggregation and final filtering

use crate::graph::{CityIdx, GraphIndex};
use crate::models::TripResult;

use super::city_filter::{CityEvaluations, CityMatch};
use super::enumerator::{CitySequence, DistinctCitiesExt, Path};
use super::query::{TripLimits, Totals};

/// A path that passed every filter, with its trip totals
#[derive(Debug, Clone)]
pub struct ScoredPath {
    pub path: Path,
    pub totals: Totals,
}

impl CitySequence for ScoredPath {
    fn city_sequence(&self) -> &[CityIdx] {
        &self.path.cities
    }
}

pub struct TripEvaluator<'a> {
    graph: &'a GraphIndex,
    evaluations: &'a CityEvaluations,
    limits: TripLimits,
}

impl<'a> TripEvaluator<'a> {
    pub fn new(graph: &'a GraphIndex, evaluations: &'a CityEvaluations, limits: TripLimits) -> Self {
        Self {
            graph,
            evaluations,
            limits,
        }
    }

    /// Trip totals of a path, or `None` if any visited city does not match
    /// or the totals exceed the limits
    #[must_use]
    pub fn score(&self, path: &Path) -> Option<Totals> {
        let (&start, rest) = path.cities.split_first()?;
        let mut totals = self.city_totals(Totals::default(), 0.0, 0.0, start)?;
        for (&connection, &city) in path.connections.iter().zip(rest) {
            let connection = self.graph.connection(connection);
            totals = self.city_totals(totals, connection.cost, connection.travel_time, city)?;
        }
        (!totals.exceeds(&self.limits)).then_some(totals)
    }

    fn city_totals(&self, prefix: Totals, cost: f64, duration: f64, city: CityIdx) -> Option<Totals> {
        let evaluation = self.evaluations.get(city).evaluation()?;
        Some(
            prefix
                .add(cost, duration)
                .add(evaluation.cost, evaluation.duration),
        )
    }

    /// Result records of all qualifying paths in enumeration order, duplicates
    /// by city sequence removed
    pub fn evaluate<I>(&self, paths: I) -> Vec<TripResult>
    where
        I: IntoIterator<Item = Path>,
    {
        paths
            .into_iter()
            .filter_map(|path| {
                let totals = self.score(&path)?;
                Some(ScoredPath { path, totals })
            })
            .distinct_cities()
            .map(|scored| self.to_result(&scored))
            .collect()
    }

    #[must_use]
    pub fn to_result(&self, scored: &ScoredPath) -> TripResult {
        let cities_in_path = scored
            .path
            .cities
            .iter()
            .filter_map(|&city| match self.evaluations.get(city) {
                CityMatch::Matched(evaluation) => Some(evaluation.detail.clone()),
                CityMatch::NoMatch(_) => None,
            })
            .collect();

        TripResult {
            cities_in_path,
            trip_cost: scored.totals.cost,
            trip_duration: scored.totals.duration,
        }
    }
}
