use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::info;

use travel_atlas::cache::PersistentCache;
use travel_atlas::catalog::CatalogCity;
use travel_atlas::{
    BudgetTier, CachedProvider, CancellationToken, InMemoryInterestCatalog, JsonFileProvider,
    ShortestPathQuery, TravelAtlasConfig, TravelDataProvider, TripPlanner, TripQuery, logging,
};

#[derive(Parser)]
#[command(name = "travel-atlas")]
#[command(about = "Plan trips over a graph of cities", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Snapshot JSON file, overrides `data.snapshot_path`
    #[arg(short, long, value_name = "FILE")]
    snapshot: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Cheapest paths between two cities
    Find {
        start: String,
        end: String,

        #[arg(long)]
        max_budget: f64,

        /// Hours
        #[arg(long)]
        max_duration: f64,
    },
    /// Itineraries matching budget, duration and interests
    Trips {
        #[arg(long)]
        max_budget: f64,

        /// Hours
        #[arg(long)]
        max_duration: f64,

        /// Interest category, may be repeated
        #[arg(long = "interest")]
        interests: Vec<String>,

        /// LOW, MEDIUM or HIGH
        #[arg(long)]
        tier: Option<BudgetTier>,

        #[arg(long)]
        start: Option<String>,
    },
    /// List every interest category in the snapshot
    Interests,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = TravelAtlasConfig::load_from_path(cli.config)?;
    if let Some(snapshot) = cli.snapshot {
        config.data.snapshot_path = snapshot.to_string_lossy().into_owned();
    }
    logging::init(&config.logging)?;

    let planner = build_planner(&config).await?;
    let cancel = CancellationToken::new();

    match cli.command {
        Commands::Find {
            start,
            end,
            max_budget,
            max_duration,
        } => {
            let query = ShortestPathQuery::new(start, end, max_budget, max_duration);
            print_json(&planner.find_shortest_constrained(&query, &cancel).await?)?;
        }
        Commands::Trips {
            max_budget,
            max_duration,
            interests,
            tier,
            start,
        } => {
            let mut query = TripQuery::new(max_budget, max_duration).with_interests(interests);
            query.user_budget_tier = tier;
            query.start_city = start;
            print_json(&planner.find_optimal_trips(&query, &cancel).await?)?;
        }
        Commands::Interests => {
            print_json(&planner.all_interest_categories().await?)?;
        }
    }

    Ok(())
}

async fn build_planner(config: &TravelAtlasConfig) -> Result<TripPlanner> {
    let source = JsonFileProvider::new(&config.data.snapshot_path);
    let provider: Arc<dyn TravelDataProvider> = if config.cache.enabled {
        let cache = PersistentCache::open(&config.cache.location)
            .with_context(|| format!("Failed to open cache at {}", config.cache.location))?;
        let ttl = Duration::from_secs(u64::from(config.cache.ttl_hours) * 3600);
        info!("Snapshot cache enabled at {}", config.cache.location);
        Arc::new(CachedProvider::new(source, cache, ttl))
    } else {
        Arc::new(source)
    };

    let catalog = match &config.data.catalog_path {
        Some(path) => {
            let raw = tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("Failed to read catalog {path}"))?;
            let entries: Vec<CatalogCity> = serde_json::from_str(&raw)
                .with_context(|| format!("Failed to parse catalog {path}"))?;
            InMemoryInterestCatalog::from_entries(entries)
        }
        None => InMemoryInterestCatalog::new(),
    };

    Ok(TripPlanner::new(
        provider,
        Arc::new(catalog),
        config.search.clone(),
    ))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
