//! Per-city points-of-interest index

use std::collections::HashMap;

use tracing::warn;

use crate::models::{Accommodation, Attraction, Poi, Restaurant};
use crate::{Result, TravelAtlasError};

static EMPTY_POIS: CityPois = CityPois::empty();

/// Everything a single city offers
#[derive(Debug, Clone, Default)]
pub struct CityPois {
    pub attractions: Vec<Attraction>,
    pub accommodations: Vec<Accommodation>,
    pub restaurants: Vec<Restaurant>,
}

impl CityPois {
    const fn empty() -> Self {
        Self {
            attractions: Vec::new(),
            accommodations: Vec::new(),
            restaurants: Vec::new(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.attractions.is_empty() && self.accommodations.is_empty() && self.restaurants.is_empty()
    }

    /// All POIs as one uniform sequence: attractions, accommodations, restaurants
    pub fn iter(&self) -> impl Iterator<Item = Poi<'_>> {
        self.attractions
            .iter()
            .map(Poi::Attraction)
            .chain(self.accommodations.iter().map(Poi::Accommodation))
            .chain(self.restaurants.iter().map(Poi::Restaurant))
    }
}

#[derive(Debug, Default)]
pub struct PoiIndex {
    by_city: HashMap<String, CityPois>,
}

impl PoiIndex {
    pub fn build(
        attractions: Vec<Attraction>,
        accommodations: Vec<Accommodation>,
        restaurants: Vec<Restaurant>,
    ) -> Result<Self> {
        let mut by_city: HashMap<String, CityPois> = HashMap::new();

        for attraction in attractions {
            if !(attraction.cost >= 0.0 && attraction.duration >= 0.0) {
                return Err(TravelAtlasError::data_unavailable(format!(
                    "Attraction '{}' has a negative or undefined cost/duration",
                    attraction.name
                )));
            }
            by_city
                .entry(attraction.city_id.clone())
                .or_default()
                .attractions
                .push(attraction);
        }
        for accommodation in accommodations {
            if !(accommodation.cost_per_night >= 0.0) {
                return Err(TravelAtlasError::data_unavailable(format!(
                    "Accommodation '{}' has a negative or undefined cost per night",
                    accommodation.name
                )));
            }
            by_city
                .entry(accommodation.city_id.clone())
                .or_default()
                .accommodations
                .push(accommodation);
        }
        for restaurant in restaurants {
            if !(restaurant.average_cost >= 0.0) {
                return Err(TravelAtlasError::data_unavailable(format!(
                    "Restaurant '{}' has a negative or undefined average cost",
                    restaurant.name
                )));
            }
            by_city
                .entry(restaurant.city_id.clone())
                .or_default()
                .restaurants
                .push(restaurant);
        }

        Ok(Self { by_city })
    }

    /// POIs of a city; a city without any is valid and yields empty collections
    #[must_use]
    pub fn pois_for(&self, city_id: &str) -> &CityPois {
        self.by_city.get(city_id).unwrap_or(&EMPTY_POIS)
    }

    /// Warn about POIs attached to cities the graph does not know
    pub fn report_orphans(&self, known: impl Fn(&str) -> bool) {
        for (city_id, pois) in &self.by_city {
            if !known(city_id) {
                warn!(
                    "{} POIs reference unknown city '{}' and will never be visited",
                    pois.iter().count(),
                    city_id
                );
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = Poi<'_>> {
        self.by_city.values().flat_map(|pois| pois.iter())
    }
}
