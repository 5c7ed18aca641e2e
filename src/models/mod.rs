//! Data models for the TravelAtlas engine
//!
//! This module contains the domain records organized by concern:
//! - City: cities, budget tiers and travel connections
//! - POI: attractions, accommodations, restaurants and interest matching
//! - Trip: result records returned by queries

pub mod city;
pub mod poi;
pub mod trip;

// Re-export all public types for convenient access
pub use city::{BudgetTier, City, Connection};
pub use poi::{Accommodation, Activity, Attraction, InterestSet, Poi, Restaurant};
pub use trip::{CityDetail, EdgeDetail, PathNode, PathResult, ShortestPathsResponse, TripResult};
