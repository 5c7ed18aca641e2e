//! Flat city/interest catalog
//!
//! Independent of the travel graph: it stores free-form interest tags per city
//! name. Shortest-path answers use it to attach interests to every city they
//! visit.

use std::collections::BTreeSet;
use std::sync::RwLock;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{Result, TravelAtlasError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogCity {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub interests: Vec<String>,
}

#[async_trait]
pub trait InterestCatalog: Send + Sync {
    /// Interest tags recorded for a city; unknown cities have none
    async fn interests_for(&self, city_name: &str) -> Result<Vec<String>>;
}

#[derive(Debug, Default)]
pub struct InMemoryInterestCatalog {
    cities: RwLock<Vec<CatalogCity>>,
}

impl InMemoryInterestCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from exported entries, assigning ids where missing
    pub fn from_entries(entries: Vec<CatalogCity>) -> Self {
        let catalog = Self::new();
        if let Ok(mut cities) = catalog.cities.write() {
            for (n, mut entry) in entries.into_iter().enumerate() {
                if entry.id.is_empty() {
                    entry.id = format!("city-{}", n + 1);
                }
                cities.push(entry);
            }
        }
        catalog
    }

    pub fn add_city(&self, name: impl Into<String>, interests: Vec<String>) -> Result<CatalogCity> {
        let mut cities = self.cities.write().map_err(|_| poisoned())?;
        let city = CatalogCity {
            id: format!("city-{}", cities.len() + 1),
            name: name.into(),
            interests,
        };
        cities.push(city.clone());
        Ok(city)
    }

    pub fn find_by_name(&self, name: &str) -> Result<Option<CatalogCity>> {
        let cities = self.cities.read().map_err(|_| poisoned())?;
        Ok(cities.iter().find(|c| c.name == name).cloned())
    }

    /// Names of the cities tagged with `interest`
    pub fn find_all_by_interest(&self, interest: &str) -> Result<Vec<String>> {
        let cities = self.cities.read().map_err(|_| poisoned())?;
        Ok(cities
            .iter()
            .filter(|c| c.interests.iter().any(|i| i == interest))
            .map(|c| c.name.clone())
            .collect())
    }

    /// Every distinct tag across the catalog, sorted
    pub fn all_unique_interests(&self) -> Result<Vec<String>> {
        let cities = self.cities.read().map_err(|_| poisoned())?;
        let unique: BTreeSet<&str> = cities
            .iter()
            .flat_map(|c| c.interests.iter().map(String::as_str))
            .collect();
        Ok(unique.into_iter().map(str::to_string).collect())
    }

    pub fn count(&self) -> Result<usize> {
        Ok(self.cities.read().map_err(|_| poisoned())?.len())
    }
}

fn poisoned() -> TravelAtlasError {
    TravelAtlasError::general("Interest catalog lock poisoned")
}

#[async_trait]
impl InterestCatalog for InMemoryInterestCatalog {
    async fn interests_for(&self, city_name: &str) -> Result<Vec<String>> {
        let cities = self.cities.read().map_err(|_| poisoned())?;
        Ok(cities
            .iter()
            .filter(|c| c.name == city_name)
            .flat_map(|c| c.interests.iter().cloned())
            .collect())
    }
}
