//! Query parameters, limits and running totals

use serde::{Deserialize, Serialize};

use crate::models::{BudgetTier, InterestSet};
use crate::{Result, TravelAtlasError};

/// Cumulative ceilings a trip or path must stay within
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TripLimits {
    pub max_cost: f64,
    pub max_duration: f64,
}

impl TripLimits {
    pub fn new(max_cost: f64, max_duration: f64) -> Self {
        Self {
            max_cost,
            max_duration,
        }
    }

    pub fn unbounded() -> Self {
        Self::new(f64::INFINITY, f64::INFINITY)
    }
}

/// Running cost/duration of a path prefix.
///
/// Every consumer folds a path in the same order (start city, then each
/// connection followed by the city it reaches) so partial and final sums
/// agree bit for bit.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Totals {
    pub cost: f64,
    pub duration: f64,
}

impl Totals {
    #[must_use]
    pub fn add(self, cost: f64, duration: f64) -> Self {
        Self {
            cost: self.cost + cost,
            duration: self.duration + duration,
        }
    }

    /// Strictly over either ceiling
    #[must_use]
    pub fn exceeds(&self, limits: &TripLimits) -> bool {
        self.cost > limits.max_cost || self.duration > limits.max_duration
    }
}

/// Parameters of `find_optimal_trips`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripQuery {
    pub user_max_budget: f64,
    pub max_trip_duration: f64,
    #[serde(default)]
    pub user_interests: Vec<String>,
    #[serde(default)]
    pub user_budget_tier: Option<BudgetTier>,
    #[serde(default)]
    pub start_city: Option<String>,
}

impl TripQuery {
    pub fn new(user_max_budget: f64, max_trip_duration: f64) -> Self {
        Self {
            user_max_budget,
            max_trip_duration,
            user_interests: Vec::new(),
            user_budget_tier: None,
            start_city: None,
        }
    }

    #[must_use]
    pub fn with_interests<I, S>(mut self, interests: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.user_interests = interests.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_budget_tier(mut self, tier: BudgetTier) -> Self {
        self.user_budget_tier = Some(tier);
        self
    }

    #[must_use]
    pub fn starting_at(mut self, city_name: impl Into<String>) -> Self {
        self.start_city = Some(city_name.into());
        self
    }

    pub fn validate(&self) -> Result<()> {
        validate_ceiling("userMaxBudget", self.user_max_budget)?;
        validate_ceiling("maxTripDuration", self.max_trip_duration)?;
        if self.user_interests.iter().any(|i| i.trim().is_empty()) {
            return Err(TravelAtlasError::invalid_query(
                "Interest categories cannot be empty",
            ));
        }
        if let Some(start) = &self.start_city {
            validate_city_name("startCity", start)?;
        }
        Ok(())
    }

    #[must_use]
    pub fn limits(&self) -> TripLimits {
        TripLimits::new(self.user_max_budget, self.max_trip_duration)
    }

    #[must_use]
    pub fn interest_set(&self) -> InterestSet {
        InterestSet::new(self.user_interests.iter().cloned())
    }
}

/// Parameters of `find_shortest_constrained`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortestPathQuery {
    pub start_city: String,
    pub end_city: String,
    pub max_budget: f64,
    pub max_duration: f64,
}

impl ShortestPathQuery {
    pub fn new(
        start_city: impl Into<String>,
        end_city: impl Into<String>,
        max_budget: f64,
        max_duration: f64,
    ) -> Self {
        Self {
            start_city: start_city.into(),
            end_city: end_city.into(),
            max_budget,
            max_duration,
        }
    }

    pub fn validate(&self) -> Result<()> {
        validate_city_name("startCity", &self.start_city)?;
        validate_city_name("endCity", &self.end_city)?;
        validate_ceiling("maxBudget", self.max_budget)?;
        validate_ceiling("maxDuration", self.max_duration)?;
        Ok(())
    }

    #[must_use]
    pub fn limits(&self) -> TripLimits {
        TripLimits::new(self.max_budget, self.max_duration)
    }
}

fn validate_ceiling(name: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(TravelAtlasError::invalid_query(format!(
            "{name} must be a non-negative number, got {value}"
        )));
    }
    Ok(())
}

fn validate_city_name(name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(TravelAtlasError::invalid_query(format!(
            "{name} cannot be empty"
        )));
    }
    Ok(())
}
