//! Operator tool for the parallel benchmark result store.
//!
//! Usage:
//!   pbr migrate
//!   pbr health-check
//!   pbr ingest --file <path>
//!   pbr query [--build-job-id <id>] [--scenario-name <name>]
//!             [--scenario-version <version>] [--framework-version <version>]

use std::env;
use std::path::PathBuf;

use futures_util::StreamExt;
use tracing::{Level, error, info, warn};
use tracing_subscriber::FmtSubscriber;

use parallel_benchmark_store::config::Config;
use parallel_benchmark_store::db::DbPool;
use parallel_benchmark_store::services::{BenchmarkResultStore, ingest};
use parallel_benchmark_store::BenchmarkResultFilter;

#[tokio::main]
async fn main() {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage();
        std::process::exit(1);
    }

    let command = args[1].as_str();
    if matches!(command, "help" | "--help" | "-h") {
        print_usage();
        return;
    }

    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .finish();
    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("Failed to set tracing subscriber");
    }

    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            error!("RUST_ENV must be set to 'development' or 'production'");
            error!("In production, PBR_DATABASE_URL must be set to a PostgreSQL URL");
            std::process::exit(1);
        }
    };

    if config.is_development() {
        warn!("Running in DEVELOPMENT mode - do not use in production!");
    }

    let pool = match DbPool::new(&config).await {
        Ok(p) => p,
        Err(e) => {
            error!("Error connecting to database: {}", e);
            std::process::exit(1);
        }
    };

    let store = BenchmarkResultStore::new(pool.clone());

    let outcome = match command {
        "migrate" => pool.run_migrations().await,
        "health-check" => pool.ping().await.map(|_| info!("Database is reachable")),
        "ingest" => {
            let Some(path) = flag_value(&args, "--file") else {
                eprintln!("Error: --file is required");
                std::process::exit(1);
            };
            match ingest::load_results_file(&PathBuf::from(path)).await {
                Ok(results) => ingest::ingest_results(&store, &config.principal, results)
                    .await
                    .map(|count| println!("Inserted {} result(s)", count)),
                Err(e) => Err(e),
            }
        }
        "query" => run_query(&store, &config, &args).await,
        _ => {
            eprintln!("Unknown command: {}", command);
            print_usage();
            std::process::exit(1);
        }
    };

    if let Err(e) = outcome {
        error!("{} failed: {}", command, e);
        std::process::exit(1);
    }

    if let Err(e) = pool.close().await {
        warn!("Failed to close database pool: {}", e);
    }
}

async fn run_query(
    store: &BenchmarkResultStore,
    config: &Config,
    args: &[String],
) -> parallel_benchmark_store::StoreResult<()> {
    let mut filter = BenchmarkResultFilter::new();
    if let Some(v) = flag_value(args, "--build-job-id") {
        filter = filter.build_job_id(v);
    }
    if let Some(v) = flag_value(args, "--scenario-name") {
        filter = filter.scenario_name(v);
    }
    if let Some(v) = flag_value(args, "--scenario-version") {
        filter = filter.scenario_version(v);
    }
    if let Some(v) = flag_value(args, "--framework-version") {
        filter = filter.framework_version(v);
    }

    let mut rows = store.query(&config.principal, &filter).await?;
    while let Some(row) = rows.next().await {
        println!("{}", serde_json::to_string(&row?)?);
    }

    Ok(())
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.iter()
        .position(|arg| arg == flag)
        .and_then(|i| args.get(i + 1))
        .map(String::as_str)
}

fn print_usage() {
    println!("Parallel benchmark result store");
    println!();
    println!("Usage:");
    println!("  pbr migrate                     Apply schema and grants");
    println!("  pbr health-check                Check the database is reachable");
    println!("  pbr ingest --file <path>        Insert results from JSON or JSON lines");
    println!("  pbr query [filters]             Print matching results as JSON lines");
    println!();
    println!("Query filters:");
    println!("  --build-job-id <id>");
    println!("  --scenario-name <name>");
    println!("  --scenario-version <version>");
    println!("  --framework-version <version>");
    println!();
    println!("Environment:");
    println!("  RUST_ENV            development | production (required)");
    println!("  PBR_DATABASE_URL    database connection string");
    println!("  PBR_PRINCIPAL       principal to act as (default: hetzner-ci)");
}
