//! Insert and query round trips.

use futures_util::StreamExt;
use parallel_benchmark_store::models::{Comparison, Metric};
use parallel_benchmark_store::{BenchmarkResultFilter, NewBenchmarkResult, Principal};

use super::test_helpers::*;

#[tokio::test]
async fn test_point_lookup_round_trip() {
    let store = create_test_store().await;
    let ci = Principal::hetzner_ci();

    store.insert(&ci, point_lookup()).await.unwrap();

    let rows = store
        .query_all(&ci, &BenchmarkResultFilter::new().scenario_name("point-lookup"))
        .await
        .unwrap();

    assert_eq!(rows, vec![point_lookup()]);
}

#[tokio::test]
async fn test_query_by_natural_identity() {
    let store = create_test_store().await;
    let ci = Principal::hetzner_ci();

    store.insert(&ci, point_lookup()).await.unwrap();
    store
        .insert(&ci, scenario_run("build-124", "point-lookup", 8.0))
        .await
        .unwrap();

    let filter = BenchmarkResultFilter::identity("build-123", "point-lookup", "3", "1.2.0");
    let rows = store.query_all(&ci, &filter).await.unwrap();

    assert_eq!(rows, vec![point_lookup()]);
}

#[tokio::test]
async fn test_duplicate_runs_are_both_kept() {
    let store = create_test_store().await;
    let ci = Principal::hetzner_ci();

    store.insert(&ci, point_lookup()).await.unwrap();
    store.insert(&ci, point_lookup()).await.unwrap();

    let filter = BenchmarkResultFilter::identity("build-123", "point-lookup", "3", "1.2.0");
    let rows = store.query_all(&ci, &filter).await.unwrap();

    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|row| *row == point_lookup()));
    assert_eq!(store.count(&ci, &filter).await.unwrap(), 2);
}

#[tokio::test]
async fn test_missing_required_field_persists_nothing() {
    let store = create_test_store().await;
    let ci = Principal::hetzner_ci();

    let mut draft = NewBenchmarkResult::from(point_lookup());
    draft.p95 = None;

    let err = store.insert(&ci, draft).await.unwrap_err();
    assert!(err.is_validation());
    assert_eq!(err.field(), Some("p95"));

    let total = store.count(&ci, &BenchmarkResultFilter::new()).await.unwrap();
    assert_eq!(total, 0);
}

#[tokio::test]
async fn test_absent_load_phase_round_trips_as_absent() {
    let store = create_test_store().await;
    let ci = Principal::hetzner_ci();

    let with_load_phase = parallel_benchmark_store::BenchmarkResultRecord {
        load_phase_duration: Some(120),
        scenario_name: "bulk-load".to_string(),
        ..point_lookup()
    };

    store.insert(&ci, point_lookup()).await.unwrap();
    store.insert(&ci, with_load_phase.clone()).await.unwrap();

    let without = store
        .query_all(&ci, &BenchmarkResultFilter::new().has_load_phase(false))
        .await
        .unwrap();
    assert_eq!(without.len(), 1);
    assert_eq!(without[0].load_phase_duration, None);
    assert_eq!(without[0].scenario_name, "point-lookup");

    let with = store
        .query_all(&ci, &BenchmarkResultFilter::new().has_load_phase(true))
        .await
        .unwrap();
    assert_eq!(with, vec![with_load_phase]);
}

#[tokio::test]
async fn test_empty_filter_returns_every_row() {
    let store = create_test_store().await;
    let ci = Principal::hetzner_ci();

    for build in ["b-1", "b-2", "b-3"] {
        store
            .insert(&ci, scenario_run(build, "scan", 5.0))
            .await
            .unwrap();
    }

    let rows = store
        .query_all(&ci, &BenchmarkResultFilter::new())
        .await
        .unwrap();
    assert_eq!(rows.len(), 3);
}

#[tokio::test]
async fn test_filter_by_build_set_and_metric() {
    let store = create_test_store().await;
    let ci = Principal::hetzner_ci();

    store.insert(&ci, scenario_run("b-1", "scan", 3.0)).await.unwrap();
    store.insert(&ci, scenario_run("b-2", "scan", 15.0)).await.unwrap();
    store.insert(&ci, scenario_run("b-3", "scan", 20.0)).await.unwrap();

    let filter = BenchmarkResultFilter::new()
        .build_job_ids(["b-1", "b-2"])
        .metric(Metric::P99, Comparison::Gt, 10.0);
    let rows = store.query_all(&ci, &filter).await.unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].build_job_id, "b-2");

    let filter = BenchmarkResultFilter::new().metric(Metric::Queries, Comparison::Ge, 10_000.0);
    assert_eq!(store.count(&ci, &filter).await.unwrap(), 3);
}

#[tokio::test]
async fn test_query_streams_lazily() {
    let store = create_test_store().await;
    let ci = Principal::hetzner_ci();

    for build in ["b-1", "b-2", "b-3", "b-4"] {
        store
            .insert(&ci, scenario_run(build, "scan", 5.0))
            .await
            .unwrap();
    }

    let first_two: Vec<_> = {
        let stream = store
            .query(&ci, &BenchmarkResultFilter::new().scenario_name("scan"))
            .await
            .unwrap();
        stream.take(2).collect().await
    };

    assert_eq!(first_two.len(), 2);
    assert!(first_two.iter().all(|row| row.is_ok()));

    // The connection is released once the stream is dropped
    let total = store.count(&ci, &BenchmarkResultFilter::new()).await.unwrap();
    assert_eq!(total, 4);
}

#[tokio::test]
async fn test_no_match_is_empty() {
    let store = create_test_store().await;
    let ci = Principal::hetzner_ci();

    store.insert(&ci, point_lookup()).await.unwrap();

    let rows = store
        .query_all(&ci, &BenchmarkResultFilter::new().scenario_name("range-scan"))
        .await
        .unwrap();
    assert!(rows.is_empty());
}

#[tokio::test]
async fn test_non_finite_metric_bound_rejected() {
    let store = create_test_store().await;
    let ci = Principal::hetzner_ci();

    store.insert(&ci, point_lookup()).await.unwrap();

    let filter = BenchmarkResultFilter::new().metric(Metric::P99, Comparison::Le, f64::NAN);

    let err = store.query_all(&ci, &filter).await.unwrap_err();
    assert!(err.is_validation());
    assert_eq!(err.field(), Some("p99"));

    let err = store.count(&ci, &filter).await.unwrap_err();
    assert_eq!(err.field(), Some("p99"));
}
