//! City and connection records

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::TravelAtlasError;

/// Coarse price category of a city
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BudgetTier {
    Low,
    Medium,
    High,
}

impl BudgetTier {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            BudgetTier::Low => "LOW",
            BudgetTier::Medium => "MEDIUM",
            BudgetTier::High => "HIGH",
        }
    }
}

impl fmt::Display for BudgetTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BudgetTier {
    type Err = TravelAtlasError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "LOW" => Ok(BudgetTier::Low),
            "MEDIUM" => Ok(BudgetTier::Medium),
            "HIGH" => Ok(BudgetTier::High),
            other => Err(TravelAtlasError::invalid_query(format!(
                "Unknown budget tier '{other}'. Must be one of: LOW, MEDIUM, HIGH"
            ))),
        }
    }
}

/// A city node of the travel graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct City {
    pub id: String,
    pub name: String,
    pub budget_tier: BudgetTier,
}

impl City {
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, budget_tier: BudgetTier) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            budget_tier,
        }
    }
}

/// Directed travel edge between two cities. Parallel edges are allowed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
    pub from_city_id: String,
    pub to_city_id: String,
    pub cost: f64,
    pub travel_time: f64,
}

impl Connection {
    #[must_use]
    pub fn new(
        from_city_id: impl Into<String>,
        to_city_id: impl Into<String>,
        cost: f64,
        travel_time: f64,
    ) -> Self {
        Self {
            from_city_id: from_city_id.into(),
            to_city_id: to_city_id.into(),
            cost,
            travel_time,
        }
    }
}
