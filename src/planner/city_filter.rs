//! Per-city POI selection and aggregation
//!
//! A city qualifies when its budget tier matches (if one is requested) and at
//! least one attraction or restaurant matches the traveller's interests (if
//! any are given). The bundle lists every selected POI; the aggregates sum
//! their prices and attraction durations.

use tracing::trace;

use crate::graph::{CityIdx, GraphIndex};
use crate::models::{BudgetTier, City, CityDetail, InterestSet, Poi};
use crate::poi_index::{CityPois, PoiIndex};

/// What the traveller asks of every visited city
#[derive(Debug, Clone, Copy)]
pub struct CityCriteria<'q> {
    pub budget_tier: Option<BudgetTier>,
    pub interests: &'q InterestSet,
    /// Attractions longer than this are left out of the bundle
    pub max_attraction_duration: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CityEvaluation {
    pub detail: CityDetail,
    pub cost: f64,
    pub duration: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoMatchReason {
    BudgetTier,
    NoInterestMatch,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CityMatch {
    Matched(CityEvaluation),
    NoMatch(NoMatchReason),
}

impl CityMatch {
    #[must_use]
    pub fn evaluation(&self) -> Option<&CityEvaluation> {
        match self {
            CityMatch::Matched(evaluation) => Some(evaluation),
            CityMatch::NoMatch(_) => None,
        }
    }
}

pub fn evaluate_city(city: &City, pois: &CityPois, criteria: &CityCriteria<'_>) -> CityMatch {
    if let Some(tier) = criteria.budget_tier
        && city.budget_tier != tier
    {
        return CityMatch::NoMatch(NoMatchReason::BudgetTier);
    }

    let interests = criteria.interests;
    let mut detail = CityDetail {
        city_name: city.name.clone(),
        ..CityDetail::default()
    };
    let mut cost = 0.0;
    let mut duration = 0.0;
    let mut interest_hits = 0usize;

    for poi in pois.iter() {
        if !poi.matches(interests) || poi.duration() > criteria.max_attraction_duration {
            continue;
        }
        cost += poi.cost();
        duration += poi.duration();
        if poi.is_interest_bearing() {
            interest_hits += 1;
        }

        match poi {
            Poi::Attraction(attraction) => {
                detail.attractions.push(attraction.name.clone());
                detail.activities.extend(
                    attraction
                        .activities
                        .iter()
                        .filter(|activity| interests.admits(&activity.category))
                        .map(|activity| activity.name.clone()),
                );
            }
            Poi::Accommodation(accommodation) => {
                detail.accommodations.push(accommodation.name.clone());
            }
            Poi::Restaurant(restaurant) => {
                detail.restaurants.push(restaurant.name.clone());
            }
        }
    }

    if interests.is_filtering() && interest_hits == 0 {
        return CityMatch::NoMatch(NoMatchReason::NoInterestMatch);
    }

    CityMatch::Matched(CityEvaluation {
        detail,
        cost,
        duration,
    })
}

/// Evaluation of every city of a snapshot for one query, indexed by city
#[derive(Debug)]
pub struct CityEvaluations {
    by_city: Vec<CityMatch>,
}

impl CityEvaluations {
    pub fn compute(graph: &GraphIndex, pois: &PoiIndex, criteria: &CityCriteria<'_>) -> Self {
        let by_city: Vec<CityMatch> = graph
            .cities()
            .map(|idx| {
                let city = graph.city(idx);
                let verdict = evaluate_city(city, pois.pois_for(&city.id), criteria);
                if let CityMatch::NoMatch(reason) = &verdict {
                    trace!(city = %city.name, ?reason, "City excluded");
                }
                verdict
            })
            .collect();
        Self { by_city }
    }

    #[must_use]
    pub fn get(&self, city: CityIdx) -> &CityMatch {
        &self.by_city[city.index()]
    }

    #[must_use]
    pub fn matched_count(&self) -> usize {
        self.by_city
            .iter()
            .filter(|m| matches!(m, CityMatch::Matched(_)))
            .count()
    }
}
