//! Configuration management for travel-atlas
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.

use crate::TravelAtlasError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TravelAtlasConfig {
    /// Where snapshot and catalog data come from
    #[serde(default)]
    pub data: DataConfig,
    /// Snapshot cache configuration
    #[serde(default)]
    pub cache: CacheConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Search limits and execution settings
    #[serde(default)]
    pub search: SearchConfig,
}

/// Data source settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// JSON snapshot with cities, connections and points of interest
    #[serde(default = "default_snapshot_path")]
    pub snapshot_path: String,
    /// Optional JSON list of `{name, interests}` catalog entries
    #[serde(default)]
    pub catalog_path: Option<String>,
}

/// Cache configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    #[serde(default = "default_cache_enabled")]
    pub enabled: bool,
    /// Cache directory location
    #[serde(default = "default_cache_location")]
    pub location: String,
    /// Cache TTL in hours
    #[serde(default = "default_cache_ttl")]
    pub ttl_hours: u32,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

/// Search limits and execution settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Maximum number of connections in an itinerary
    #[serde(default = "default_max_hops")]
    pub max_hops: usize,
    /// Connections costing more are never used by shortest-path search
    #[serde(default = "default_per_edge_cost_ceiling")]
    pub per_edge_cost_ceiling: f64,
    /// Connections taking longer are never used by shortest-path search
    #[serde(default = "default_per_edge_time_ceiling")]
    pub per_edge_time_ceiling: f64,
    /// Number of shortest paths returned
    #[serde(default = "default_top_k")]
    pub top_k: usize,
    /// Upper bound for fetching a snapshot
    #[serde(default = "default_query_timeout")]
    pub query_timeout_seconds: u64,
    /// Fan itinerary search out over start cities
    #[serde(default = "default_parallel")]
    pub parallel: bool,
}

impl SearchConfig {
    #[must_use]
    pub fn query_timeout(&self) -> Duration {
        Duration::from_secs(self.query_timeout_seconds)
    }
}

// Default value functions
fn default_snapshot_path() -> String {
    "travel-atlas.json".to_string()
}

fn default_cache_enabled() -> bool {
    false
}

fn default_cache_location() -> String {
    dirs::cache_dir()
        .map(|dir| dir.join("travel-atlas").to_string_lossy().into_owned())
        .unwrap_or_else(|| ".travel-atlas-cache".to_string())
}

fn default_cache_ttl() -> u32 {
    6
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_max_hops() -> usize {
    6
}

fn default_per_edge_cost_ceiling() -> f64 {
    5000.0
}

fn default_per_edge_time_ceiling() -> f64 {
    5.0
}

fn default_top_k() -> usize {
    10
}

fn default_query_timeout() -> u64 {
    30
}

fn default_parallel() -> bool {
    true
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            snapshot_path: default_snapshot_path(),
            catalog_path: None,
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: default_cache_enabled(),
            location: default_cache_location(),
            ttl_hours: default_cache_ttl(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_hops: default_max_hops(),
            per_edge_cost_ceiling: default_per_edge_cost_ceiling(),
            per_edge_time_ceiling: default_per_edge_time_ceiling(),
            top_k: default_top_k(),
            query_timeout_seconds: default_query_timeout(),
            parallel: default_parallel(),
        }
    }
}

impl TravelAtlasConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // TRAVELATLAS_SEARCH__MAX_HOPS=4 overrides search.max_hops
        builder = builder.add_source(
            Environment::with_prefix("TRAVELATLAS")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: TravelAtlasConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("travel-atlas").join("config.toml"))
    }

    /// Apply default values to missing configuration fields
    pub fn apply_defaults(&mut self) {
        if self.data.snapshot_path.is_empty() {
            self.data.snapshot_path = default_snapshot_path();
        }
        if self
            .data
            .catalog_path
            .as_ref()
            .is_some_and(|path| path.is_empty())
        {
            self.data.catalog_path = None;
        }
        if self.cache.ttl_hours == 0 {
            self.cache.ttl_hours = default_cache_ttl();
        }
        if self.cache.location.is_empty() {
            self.cache.location = default_cache_location();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
        if self.search.top_k == 0 {
            self.search.top_k = default_top_k();
        }
        if self.search.query_timeout_seconds == 0 {
            self.search.query_timeout_seconds = default_query_timeout();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    fn validate_numeric_ranges(&self) -> Result<()> {
        let search = &self.search;
        if !(1..=12).contains(&search.max_hops) {
            return Err(TravelAtlasError::config("Search max hops must be between 1 and 12").into());
        }

        if !(1..=100).contains(&search.top_k) {
            return Err(TravelAtlasError::config("Search top k must be between 1 and 100").into());
        }

        if !(1..=300).contains(&search.query_timeout_seconds) {
            return Err(TravelAtlasError::config(
                "Query timeout must be between 1 and 300 seconds",
            )
            .into());
        }

        for (name, value) in [
            ("per edge cost ceiling", search.per_edge_cost_ceiling),
            ("per edge time ceiling", search.per_edge_time_ceiling),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(TravelAtlasError::config(format!(
                    "Search {name} must be a non-negative number"
                ))
                .into());
            }
        }

        if self.cache.ttl_hours > 168 {
            return Err(TravelAtlasError::config("Cache TTL cannot exceed 168 hours (1 week)").into());
        }

        Ok(())
    }

    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(TravelAtlasError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(TravelAtlasError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        if self.data.snapshot_path.trim().is_empty() {
            return Err(TravelAtlasError::config("Snapshot path cannot be empty").into());
        }

        Ok(())
    }
}
