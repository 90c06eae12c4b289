//! Shared test helpers for store integration tests.

use parallel_benchmark_store::config::DatabaseSettings;
use parallel_benchmark_store::{BenchmarkResultRecord, BenchmarkResultStore, DbPool};

/// Fresh in-memory database with migrations applied.
///
/// A single pooled connection keeps the in-memory database alive and shared.
pub async fn create_test_pool() -> DbPool {
    let mut settings = DatabaseSettings::new("sqlite::memory:");
    settings.max_connections = 1;
    settings.min_connections = 1;

    let pool = DbPool::connect(&settings)
        .await
        .expect("Failed to open in-memory database");

    pool.run_migrations()
        .await
        .expect("Failed to run migrations");

    pool
}

/// Store over a fresh database with the default access policy.
pub async fn create_test_store() -> BenchmarkResultStore {
    BenchmarkResultStore::new(create_test_pool().await)
}

/// The point-lookup example run.
pub fn point_lookup() -> BenchmarkResultRecord {
    BenchmarkResultRecord {
        build_job_id: "build-123".to_string(),
        framework_version: "1.2.0".to_string(),
        scenario_name: "point-lookup".to_string(),
        scenario_version: "3".to_string(),
        query: "SELECT * FROM t WHERE id=?".to_string(),
        load_phase_duration: None,
        queries: 10_000,
        qps: 523.4,
        min: 0.8,
        max: 12.1,
        avg: 1.9,
        p50: 1.7,
        p95: 4.2,
        p99: 9.0,
        std: 1.1,
        slope: 0.02,
    }
}

/// A run of `scenario` in `build_job_id` with distinguishable statistics.
pub fn scenario_run(build_job_id: &str, scenario: &str, p99: f64) -> BenchmarkResultRecord {
    BenchmarkResultRecord {
        build_job_id: build_job_id.to_string(),
        scenario_name: scenario.to_string(),
        p99,
        ..point_lookup()
    }
}
