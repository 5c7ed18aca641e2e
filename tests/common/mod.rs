//! Shared fixtures for integration tests
#![allow(dead_code)]

use std::sync::Arc;

use travel_atlas::models::{Accommodation, Activity, Attraction, City, Connection, Restaurant};
use travel_atlas::{
    BudgetTier, InMemoryInterestCatalog, InMemoryProvider, SearchConfig, SnapshotData,
    TravelSnapshot, TripPlanner,
};

pub const CITIES: [(&str, &str, BudgetTier); 10] = [
    ("c1", "Delhi", BudgetTier::Medium),
    ("c2", "Mumbai", BudgetTier::High),
    ("c3", "Kolkata", BudgetTier::Low),
    ("c4", "Chennai", BudgetTier::Medium),
    ("c5", "Bangalore", BudgetTier::High),
    ("c6", "Hyderabad", BudgetTier::Medium),
    ("c7", "Pune", BudgetTier::Low),
    ("c8", "Jaipur", BudgetTier::Low),
    ("c9", "Ahmedabad", BudgetTier::Medium),
    ("c10", "Lucknow", BudgetTier::Low),
];

/// Ring c1..c10 plus chords skipping one city
pub const CONNECTIONS: [(&str, &str, f64, f64); 19] = [
    ("c1", "c2", 3500.0, 2.0),
    ("c2", "c3", 4000.0, 2.5),
    ("c3", "c4", 3000.0, 2.0),
    ("c4", "c5", 2500.0, 1.5),
    ("c5", "c6", 2000.0, 1.0),
    ("c6", "c7", 1500.0, 0.75),
    ("c7", "c8", 1800.0, 1.0),
    ("c8", "c9", 2200.0, 1.25),
    ("c9", "c10", 3200.0, 1.75),
    ("c10", "c1", 3800.0, 2.25),
    ("c2", "c4", 4500.0, 3.0),
    ("c3", "c5", 3500.0, 2.5),
    ("c4", "c6", 2800.0, 2.0),
    ("c5", "c7", 2400.0, 1.75),
    ("c6", "c8", 2700.0, 2.0),
    ("c7", "c9", 1900.0, 1.25),
    ("c8", "c10", 2100.0, 1.5),
    ("c9", "c1", 3400.0, 2.0),
    ("c10", "c2", 3600.0, 2.5),
];

pub fn attraction(city_id: &str, name: &str, cost: f64, duration: f64, activities: &[(&str, &str)]) -> Attraction {
    Attraction {
        city_id: city_id.to_string(),
        name: name.to_string(),
        cost,
        duration,
        activities: activities
            .iter()
            .map(|(name, category)| Activity {
                name: name.to_string(),
                category: category.to_string(),
            })
            .collect(),
    }
}

pub fn restaurant(city_id: &str, name: &str, cuisine: &str, average_cost: f64) -> Restaurant {
    Restaurant {
        city_id: city_id.to_string(),
        name: name.to_string(),
        cuisine: cuisine.to_string(),
        average_cost,
    }
}

pub fn accommodation(city_id: &str, name: &str, kind: &str, cost_per_night: f64) -> Accommodation {
    Accommodation {
        city_id: city_id.to_string(),
        name: name.to_string(),
        cost_per_night,
        accommodation_type: Some(kind.to_string()),
    }
}

pub fn seed_data() -> SnapshotData {
    SnapshotData {
        cities: CITIES
            .iter()
            .map(|&(id, name, tier)| City::new(id, name, tier))
            .collect(),
        connections: CONNECTIONS
            .iter()
            .map(|&(from, to, cost, time)| Connection::new(from, to, cost, time))
            .collect(),
        attractions: vec![
            attraction("c1", "Red Fort", 500.0, 2.0, &[("Heritage Walk", "History")]),
            attraction("c1", "Chandni Chowk", 0.0, 1.5, &[("Street Food Crawl", "Food")]),
            attraction("c2", "Gateway of India", 0.0, 1.0, &[("Harbour Cruise", "Sightseeing")]),
            attraction("c3", "Victoria Memorial", 300.0, 2.0, &[("Museum Tour", "History")]),
            attraction("c4", "Marina Beach", 0.0, 2.0, &[("Sunrise Walk", "Nature")]),
            attraction("c5", "Lalbagh", 100.0, 1.5, &[("Botanical Tour", "Nature")]),
            attraction("c6", "Charminar", 200.0, 1.0, &[("Bazaar Walk", "Shopping"), ("Heritage Walk", "History")]),
            attraction("c7", "Shaniwar Wada", 150.0, 1.5, &[("Fort Tour", "History")]),
            attraction("c8", "Amber Fort", 600.0, 3.0, &[("Elephant Ride", "Adventure"), ("Fort Tour", "History")]),
            attraction("c9", "Sabarmati Ashram", 0.0, 1.0, &[("Guided Visit", "History")]),
            attraction("c10", "Bara Imambara", 250.0, 2.0, &[("Maze Walk", "History")]),
        ],
        accommodations: vec![
            accommodation("c1", "Connaught Residency", "Hotel", 4000.0),
            accommodation("c2", "Colaba Hostel", "Hostel", 1200.0),
            accommodation("c6", "Banjara Inn", "Hotel", 2500.0),
            accommodation("c8", "Pink City Haveli", "Heritage", 3000.0),
        ],
        restaurants: vec![
            restaurant("c1", "Karim's", "Mughlai", 800.0),
            restaurant("c2", "Trishna", "Seafood", 2500.0),
            restaurant("c3", "Peter Cat", "Continental", 1200.0),
            restaurant("c4", "Murugan Idli", "South Indian", 300.0),
            restaurant("c5", "MTR", "South Indian", 400.0),
            restaurant("c6", "Paradise", "Biryani", 600.0),
            restaurant("c7", "Vaishali", "South Indian", 350.0),
            restaurant("c9", "Agashiye", "Gujarati", 900.0),
            restaurant("c10", "Tunday Kababi", "Mughlai", 500.0),
        ],
    }
}

pub fn seed_snapshot() -> TravelSnapshot {
    TravelSnapshot::build(seed_data()).unwrap()
}

pub fn seed_catalog() -> InMemoryInterestCatalog {
    let catalog = InMemoryInterestCatalog::new();
    catalog
        .add_city("Delhi", vec!["History".to_string(), "Food".to_string()])
        .unwrap();
    catalog
        .add_city("Mumbai", vec!["Beaches".to_string()])
        .unwrap();
    catalog
}

pub fn planner_for(data: SnapshotData) -> TripPlanner {
    TripPlanner::new(
        Arc::new(InMemoryProvider::new(data)),
        Arc::new(seed_catalog()),
        SearchConfig::default(),
    )
}

pub fn seed_planner() -> TripPlanner {
    planner_for(seed_data())
}

pub fn tier_of(name: &str) -> BudgetTier {
    CITIES
        .iter()
        .find(|(_, city, _)| *city == name)
        .map(|&(_, _, tier)| tier)
        .unwrap()
}
