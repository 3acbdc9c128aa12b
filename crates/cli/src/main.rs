mod config;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use config::RecommenderConfig;
use data_loader::{ColumnConfig, PreprocessedDataset, PreprocessedRecord, preprocess};
use pipeline::{AllowedCities, QueryRequest, UserQuery, allowed_cities, filter_by_city_and_price};
use sources::{CachingSource, DatasetSource, HubSource, default_source};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;
use tracing::warn;

/// PlateRecs - Restaurant Recommendation Filter
#[derive(Parser)]
#[command(name = "plate-recs")]
#[command(about = "Find restaurants by city and budget in the Zomato dataset", long_about = None)]
struct Cli {
    /// TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the dataset cache file
    #[arg(long, global = true)]
    cache_path: Option<PathBuf>,

    /// Always fetch from the hub and never write the cache
    #[arg(long, global = true)]
    no_cache: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a query and print it
    Query(QueryArgs),

    /// List restaurants matching a city and budget
    Recommend {
        #[command(flatten)]
        query: QueryArgs,

        /// Maximum number of restaurants to show (default: top_n from config)
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Download the dataset and refresh the cache (ignores --no-cache)
    Fetch,

    /// Delete the dataset cache file
    ClearCache,
}

#[derive(Args)]
struct QueryArgs {
    /// City or locality, e.g. "Banashankari"
    #[arg(long)]
    city: String,

    /// Budget for two people (same as --max-price)
    #[arg(long, allow_negative_numbers = true)]
    price: Option<String>,

    /// Lower bound of the budget
    #[arg(long, allow_negative_numbers = true)]
    min_price: Option<String>,

    /// Upper bound of the budget (takes precedence over --price)
    #[arg(long, allow_negative_numbers = true)]
    max_price: Option<String>,

    /// Check the city against the cities in the dataset
    #[arg(long)]
    validate_city: bool,
}

impl QueryArgs {
    fn request(&self, allowed: Option<AllowedCities>) -> QueryRequest {
        QueryRequest {
            city: Some(self.city.clone()),
            price: self.price.clone().map(Into::into),
            min_price: self.min_price.clone().map(Into::into),
            max_price: self.max_price.clone().map(Into::into),
            allowed_cities: allowed,
        }
    }
}

fn main() -> ExitCode {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = RecommenderConfig::load(cli.config.as_deref())?;
    if let Some(path) = cli.cache_path {
        config.dataset.cache_path = path;
    }
    let source = default_source(&config.dataset, !cli.no_cache)?;

    // Dispatch to appropriate command handler
    match cli.command {
        Commands::Query(args) => handle_query(&source, &config, &args),
        Commands::Recommend { query, limit } => {
            handle_recommend(&source, &config, &query, limit.unwrap_or(config.top_n))
        }
        Commands::Fetch => handle_fetch(&source),
        Commands::ClearCache => handle_clear_cache(&source),
    }
}

/// Handle the 'query' command
fn handle_query(source: &impl DatasetSource, config: &RecommenderConfig, args: &QueryArgs) -> Result<()> {
    let allowed = if args.validate_city {
        match source.load() {
            Ok(raw) => Some(allowed_cities(&raw, &config.columns)),
            Err(e) => {
                warn!("Could not load dataset for city validation: {:#}", e);
                None
            }
        }
    } else {
        None
    };

    let query = args.request(allowed).build()?;
    print_query(&query);
    Ok(())
}

/// Handle the 'recommend' command
fn handle_recommend(
    source: &impl DatasetSource,
    config: &RecommenderConfig,
    args: &QueryArgs,
    limit: usize,
) -> Result<()> {
    // Reject bad input before touching the network
    if !args.validate_city {
        args.request(None).build()?;
    }

    let start = Instant::now();
    let raw = source.load().context("Failed to load dataset")?;
    println!(
        "{} Loaded {} restaurants in {:?}",
        "✓".green(),
        raw.len(),
        start.elapsed()
    );

    let allowed = args
        .validate_city
        .then(|| allowed_cities(&raw, &config.columns));
    let query = args.request(allowed).build()?;

    let dataset = preprocess(&raw, &config.columns);
    let matches = filter_by_city_and_price(&dataset, &query, &config.columns);

    print_query(&query);
    print_candidates(&dataset, &config.columns, &matches, limit);
    Ok(())
}

/// Handle the 'fetch' command
fn handle_fetch(source: &CachingSource<HubSource>) -> Result<()> {
    let start = Instant::now();
    let dataset = source.refresh()?;
    println!(
        "{} Fetched {} rows in {:?}",
        "✓".green(),
        dataset.len(),
        start.elapsed()
    );
    Ok(())
}

/// Handle the 'clear-cache' command
fn handle_clear_cache(source: &CachingSource<HubSource>) -> Result<()> {
    let path = source.cache().path().display().to_string();
    if source.clear_cache()? {
        println!("{} Removed {}", "✓".green(), path);
    } else {
        println!("No cache at {}", path);
    }
    Ok(())
}

fn print_query(query: &UserQuery) {
    println!("{} {}", "City:".bold(), query.city());
    println!("{} {}", "Price (max):".bold(), query.price_max());
    if let Some(min) = query.price_min() {
        println!("{} {}", "Price (min):".bold(), min);
    }
}

/// Print up to `limit` matches in dataset order
fn print_candidates(
    dataset: &PreprocessedDataset,
    columns: &ColumnConfig,
    matches: &[&PreprocessedRecord],
    limit: usize,
) {
    println!("\n{}", format!("Restaurants ({} matches):", matches.len()).bold().blue());
    if matches.is_empty() {
        println!("No restaurants match this city and budget.");
        return;
    }

    let name_idx = dataset.column_index(&columns.name);
    let city_idx = dataset.column_index(&columns.city);
    let text = |record: &PreprocessedRecord, idx: Option<usize>| {
        idx.and_then(|i| record.text(i)).unwrap_or("?").to_string()
    };

    for (rank, record) in matches.iter().take(limit).enumerate() {
        let rating = record
            .rating_value
            .map(|r| format!("{:.1}/5", r))
            .unwrap_or_else(|| "unrated".to_string());
        let cost = record
            .cost_value
            .map(|c| format!("{:.0}", c))
            .unwrap_or_else(|| "?".to_string());
        println!(
            "{}. {} ({}) - cost for two: {} - rating: {} ({} votes)",
            (rank + 1).to_string().green(),
            text(record, name_idx),
            text(record, city_idx).trim(),
            cost,
            rating,
            record.votes_value
        );
    }
    if matches.len() > limit {
        println!("... and {} more", matches.len() - limit);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_loader::{CacheFile, Dataset, RawRecord};
    use pipeline::QueryError;
    use std::fs;
    use std::path::Path;
    use tempfile::{TempDir, tempdir};

    /// Scratch directory with a config pointing at a hub nobody listens on.
    struct Workspace {
        dir: TempDir,
        config: PathBuf,
        cache: PathBuf,
    }

    impl Workspace {
        fn new() -> Self {
            let dir = tempdir().unwrap();
            let config = dir.path().join("plate-recs.toml");
            fs::write(
                &config,
                "[dataset]\nrows_url = \"http://127.0.0.1:9/rows\"\ntimeout_secs = 1\nmax_attempts = 1\n",
            )
            .unwrap();
            let cache = dir.path().join("zomato_data.json");
            Self { dir, config, cache }
        }

        fn cli(&self, args: &[&str]) -> Cli {
            let mut argv = vec![
                "plate-recs".to_string(),
                "--config".to_string(),
                path_arg(&self.config),
                "--cache-path".to_string(),
                path_arg(&self.cache),
            ];
            argv.extend(args.iter().map(|a| a.to_string()));
            Cli::try_parse_from(argv).unwrap()
        }

        fn run(&self, args: &[&str]) -> Result<()> {
            run(self.cli(args))
        }

        fn write_cache(&self) {
            let columns = ColumnConfig::default();
            let dataset = Dataset::from_rows(
                vec![columns.name, columns.city, columns.cost, columns.rating],
                vec![
                    row(["Jalsa", "Banashankari", "800", "4.1/5"]),
                    row(["Spice Elephant", "Banashankari", "500", "NEW"]),
                    row(["San Churro Cafe", "Koramangala", "400", "3.8/5"]),
                ],
            )
            .unwrap();
            CacheFile::new(&self.cache).write(&dataset).unwrap();
        }
    }

    fn row(cells: [&str; 4]) -> RawRecord {
        cells.into_iter().map(Some).collect()
    }

    fn path_arg(path: &Path) -> String {
        path.display().to_string()
    }

    fn query_error(result: Result<()>) -> QueryError {
        let err = result.unwrap_err();
        err.downcast_ref::<QueryError>()
            .cloned()
            .unwrap_or_else(|| panic!("expected a query error, got: {:#}", err))
    }

    #[test]
    fn test_missing_price_fails() {
        let ws = Workspace::new();
        let err = query_error(ws.run(&["query", "--city", "Bangalore"]));
        assert_eq!(err.to_string(), "Price (or max-price) is required.");
    }

    #[test]
    fn test_invalid_price_fails() {
        let ws = Workspace::new();
        let err = query_error(ws.run(&["query", "--city", "Bangalore", "--price", "abc"]));
        assert_eq!(err, QueryError::InvalidPrice);
    }

    #[test]
    fn test_negative_price_reaches_validation() {
        let ws = Workspace::new();
        let err = query_error(ws.run(&["query", "--city", "Bangalore", "--price", "-100"]));
        assert_eq!(err.to_string(), "Price must be positive.");
    }

    #[test]
    fn test_min_above_max_fails() {
        let ws = Workspace::new();
        let err = query_error(ws.run(&[
            "query", "--city", "Bangalore", "--min-price", "1000", "--max-price", "500",
        ]));
        assert_eq!(err.to_string(), "Min price cannot be greater than max price.");
    }

    #[test]
    fn test_valid_range_succeeds() {
        let ws = Workspace::new();
        ws.run(&["query", "--city", "Bangalore", "--min-price", "300", "--max-price", "1000"])
            .unwrap();
    }

    #[test]
    fn test_max_price_takes_precedence() {
        let ws = Workspace::new();
        let cli = ws.cli(&["query", "--city", "Bangalore", "--price", "-1", "--max-price", "500"]);

        let Commands::Query(args) = &cli.command else {
            panic!("expected the query command");
        };
        let query = args.request(None).build().unwrap();
        assert_eq!(query.price_max(), 500.0);
        assert_eq!(query.price_min(), None);

        run(cli).unwrap();
    }

    #[test]
    fn test_validate_city_load_failure_continues() {
        let ws = Workspace::new();
        fs::write(&ws.cache, "not a cache").unwrap();

        // corrupt cache and unreachable hub: no city list, so any city passes
        ws.run(&["query", "--city", "Nowhere", "--price", "500", "--validate-city"])
            .unwrap();
    }

    #[test]
    fn test_validate_city_against_cache() {
        let ws = Workspace::new();
        ws.write_cache();

        ws.run(&["query", "--city", " banashankari ", "--price", "500", "--validate-city"])
            .unwrap();

        let err = query_error(ws.run(&["query", "--city", "Mumbai", "--price", "500", "--validate-city"]));
        assert_eq!(
            err.to_string(),
            "City 'Mumbai' not found in dataset. Choose from: banashankari, koramangala"
        );
    }

    #[test]
    fn test_recommend_from_cache() {
        let ws = Workspace::new();
        ws.write_cache();

        ws.run(&["recommend", "--city", "Banashankari", "--price", "600", "--limit", "1"])
            .unwrap();
    }

    #[test]
    fn test_recommend_rejects_input_before_loading() {
        let ws = Workspace::new();
        // no cache and no hub: only a validation error can come back
        let err = query_error(ws.run(&["recommend", "--city", "Banashankari"]));
        assert_eq!(err, QueryError::PriceRequired);
    }

    #[test]
    fn test_no_cache_ignores_cache_file() {
        let ws = Workspace::new();
        ws.write_cache();

        let err = ws
            .run(&["--no-cache", "recommend", "--city", "Banashankari", "--price", "600"])
            .unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to load dataset"));
    }

    #[test]
    fn test_clear_cache() {
        let ws = Workspace::new();
        ws.write_cache();

        ws.run(&["clear-cache"]).unwrap();
        assert!(!ws.cache.exists());
        ws.run(&["clear-cache"]).unwrap();
        assert!(ws.dir.path().exists());
    }
}
