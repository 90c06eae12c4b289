//! Concurrent writers sharing one store.

use parallel_benchmark_store::{BenchmarkResultFilter, BenchmarkResultStore, DbPool, Principal};

use super::test_helpers::*;

fn assert_send_sync<T: Send + Sync + Clone + 'static>() {}

#[test]
fn test_store_and_pool_are_shareable() {
    assert_send_sync::<BenchmarkResultStore>();
    assert_send_sync::<DbPool>();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_inserts_are_all_kept() {
    let store = create_test_store().await;
    let writers = 16;

    let handles: Vec<_> = (0..writers)
        .map(|i| {
            let store = store.clone();
            tokio::spawn(async move {
                let ci = Principal::hetzner_ci();
                store
                    .insert(&ci, scenario_run(&format!("b-{i}"), "scan", i as f64))
                    .await
            })
        })
        .collect();

    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let ci = Principal::hetzner_ci();
    let total = store.count(&ci, &BenchmarkResultFilter::new()).await.unwrap();
    assert_eq!(total, writers);

    let one = store
        .query_all(&ci, &BenchmarkResultFilter::new().build_job_id("b-7"))
        .await
        .unwrap();
    assert_eq!(one, vec![scenario_run("b-7", "scan", 7.0)]);
}
