//! Loading harness output through the store.

use parallel_benchmark_store::services::ingest::{ingest_results, parse_results};
use parallel_benchmark_store::{BenchmarkResultFilter, Principal};

use super::test_helpers::*;

fn json_line(build_job_id: &str) -> String {
    let mut value = serde_json::to_value(point_lookup()).unwrap();
    value["build_job_id"] = serde_json::Value::from(build_job_id);
    value.to_string()
}

#[tokio::test]
async fn test_ingest_json_lines() {
    let store = create_test_store().await;
    let ci = Principal::hetzner_ci();

    let input = format!("{}\n{}\n", json_line("b-1"), json_line("b-2"));
    let results = parse_results(&input).unwrap();

    let inserted = ingest_results(&store, &ci, results).await.unwrap();
    assert_eq!(inserted, 2);

    let rows = store
        .query_all(&ci, &BenchmarkResultFilter::new().build_job_id("b-2"))
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].qps, 523.4);
}

#[tokio::test]
async fn test_ingest_stops_at_invalid_row() {
    let store = create_test_store().await;
    let ci = Principal::hetzner_ci();

    let mut invalid = serde_json::to_value(point_lookup()).unwrap();
    invalid.as_object_mut().unwrap().remove("queries");

    let input = format!("[{}, {}, {}]", json_line("b-1"), invalid, json_line("b-3"));
    let results = parse_results(&input).unwrap();

    let err = ingest_results(&store, &ci, results).await.unwrap_err();
    assert_eq!(err.field(), Some("queries"));

    let total = store.count(&ci, &BenchmarkResultFilter::new()).await.unwrap();
    assert_eq!(total, 1);
}

#[tokio::test]
async fn test_ingest_as_unauthorized_principal() {
    let store = create_test_store().await;
    let results = parse_results(&json_line("b-1")).unwrap();

    let err = ingest_results(&store, &Principal::new("laptop"), results)
        .await
        .unwrap_err();
    assert!(err.is_authorization());
}

#[tokio::test]
async fn test_ingest_wrong_type_is_validation_error() {
    let store = create_test_store().await;
    let ci = Principal::hetzner_ci();

    let mut mistyped = serde_json::to_value(point_lookup()).unwrap();
    mistyped["qps"] = serde_json::Value::from("fast");
    let input = format!("{}\n{}\n", json_line("b-1"), mistyped);

    let err = parse_results(&input).unwrap_err();
    assert!(err.is_validation());
    assert_eq!(err.field(), Some("qps"));

    let total = store.count(&ci, &BenchmarkResultFilter::new()).await.unwrap();
    assert_eq!(total, 0);
}
