//! Points of interest attached to cities

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Something to do at an attraction, tagged with an interest category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub name: String,
    pub category: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attraction {
    pub city_id: String,
    pub name: String,
    pub cost: f64,
    pub duration: f64,
    #[serde(default)]
    pub activities: Vec<Activity>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Accommodation {
    pub city_id: String,
    pub name: String,
    pub cost_per_night: f64,
    /// Hotel, hostel, ... Only used to list interest categories.
    #[serde(default)]
    pub accommodation_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Restaurant {
    pub city_id: String,
    pub name: String,
    pub cuisine: String,
    pub average_cost: f64,
}

/// Interest categories requested by a traveller.
///
/// Matching is exact and case-sensitive. An empty set means no interest
/// filtering is in effect.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InterestSet {
    categories: BTreeSet<String>,
}

impl InterestSet {
    pub fn new<I, S>(categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            categories: categories.into_iter().map(Into::into).collect(),
        }
    }

    #[must_use]
    pub fn is_filtering(&self) -> bool {
        !self.categories.is_empty()
    }

    /// True when no filter is in effect or the category is requested
    #[must_use]
    pub fn admits(&self, category: &str) -> bool {
        !self.is_filtering() || self.categories.contains(category)
    }
}

/// Borrowed view over the closed set of POI kinds
#[derive(Debug, Clone, Copy)]
pub enum Poi<'a> {
    Attraction(&'a Attraction),
    Accommodation(&'a Accommodation),
    Restaurant(&'a Restaurant),
}

impl<'a> Poi<'a> {
    #[must_use]
    pub fn name(&self) -> &'a str {
        match *self {
            Poi::Attraction(a) => &a.name,
            Poi::Accommodation(a) => &a.name,
            Poi::Restaurant(r) => &r.name,
        }
    }

    /// Price contributed to a city aggregate when the POI is bundled
    #[must_use]
    pub fn cost(&self) -> f64 {
        match self {
            Poi::Attraction(a) => a.cost,
            Poi::Accommodation(a) => a.cost_per_night,
            Poi::Restaurant(r) => r.average_cost,
        }
    }

    /// Time spent at the POI; only attractions take time
    #[must_use]
    pub fn duration(&self) -> f64 {
        match self {
            Poi::Attraction(a) => a.duration,
            Poi::Accommodation(_) | Poi::Restaurant(_) => 0.0,
        }
    }

    /// Whether bundling this POI satisfies the city's interest requirement
    #[must_use]
    pub fn is_interest_bearing(&self) -> bool {
        !matches!(self, Poi::Accommodation(_))
    }

    /// Whether the POI passes the interest filter.
    ///
    /// Accommodations are never filtered by interest.
    #[must_use]
    pub fn matches(&self, interests: &InterestSet) -> bool {
        match self {
            Poi::Attraction(a) => {
                !interests.is_filtering()
                    || a.activities.iter().any(|act| interests.admits(&act.category))
            }
            Poi::Accommodation(_) => true,
            Poi::Restaurant(r) => interests.admits(&r.cuisine),
        }
    }
}
