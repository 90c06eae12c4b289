//! Loading harness output files into the store.
//!
//! Accepts either a JSON array of results or JSON lines (one result per line).

use std::path::Path;

use serde_json::Value;
use tracing::{error, info, warn};

use crate::auth::Principal;
use crate::error::{StoreError, StoreResult};
use crate::models::NewBenchmarkResult;

use super::BenchmarkResultStore;

/// Parse harness output into unvalidated results.
///
/// Malformed JSON is `InvalidInput`; an attribute of the wrong JSON type fails
/// validation against that attribute.
pub fn parse_results(input: &str) -> StoreResult<Vec<NewBenchmarkResult>> {
    let trimmed = input.trim_start();

    if trimmed.starts_with('[') {
        let rows: Vec<Value> = serde_json::from_str(trimmed)?;
        return rows
            .into_iter()
            .enumerate()
            .map(|(index, row)| {
                NewBenchmarkResult::from_json(row).inspect_err(|e| {
                    warn!(element = index, error = %e, "Unreadable benchmark result");
                })
            })
            .collect();
    }

    input
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| {
            let row: Value = serde_json::from_str(line).map_err(|e| {
                StoreError::InvalidInput(format!("Line {}: JSON parsing error: {}", index + 1, e))
            })?;
            NewBenchmarkResult::from_json(row).inspect_err(|e| {
                warn!(line = index + 1, error = %e, "Unreadable benchmark result");
            })
        })
        .collect()
}

/// Read and parse a harness output file.
pub async fn load_results_file(path: &Path) -> StoreResult<Vec<NewBenchmarkResult>> {
    let contents = tokio::fs::read_to_string(path).await.map_err(|e| {
        StoreError::InvalidInput(format!("Failed to read {}: {}", path.display(), e))
    })?;

    parse_results(&contents)
}

/// Insert every result in order, stopping at the first failure.
///
/// Returns the number of rows inserted. Rows inserted before a failure stay
/// stored; each insert is independent.
pub async fn ingest_results(
    store: &BenchmarkResultStore,
    principal: &Principal,
    results: Vec<NewBenchmarkResult>,
) -> StoreResult<usize> {
    let total = results.len();
    let mut inserted = 0;

    for (index, result) in results.into_iter().enumerate() {
        if let Err(e) = store.insert(principal, result).await {
            error!(index, inserted, total, error = %e, "Ingest stopped");
            return Err(e);
        }
        inserted += 1;
    }

    info!(inserted, "Ingest complete");

    Ok(inserted)
}
