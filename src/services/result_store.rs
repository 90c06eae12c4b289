//! Benchmark result store: authorized, validated access to the results table.

use std::sync::Arc;

use futures_util::TryStreamExt;
use tracing::{debug, info, warn};

use crate::auth::{AccessPolicy, Principal, Privilege};
use crate::db::DbPool;
use crate::db::benchmark_results::RecordStream;
use crate::error::{StoreError, StoreResult};
use crate::models::{
    BenchmarkResultFilter, BenchmarkResultRecord, BenchmarkResultUpdate, NewBenchmarkResult,
};

/// Append-only store of parallel benchmark results.
///
/// Every operation is checked against the [`AccessPolicy`] before touching
/// the database. There is no delete operation.
#[derive(Clone, Debug)]
pub struct BenchmarkResultStore {
    pool: DbPool,
    policy: Arc<AccessPolicy>,
}

impl BenchmarkResultStore {
    /// Store governed by the provisioned `hetzner-ci` grant.
    pub fn new(pool: DbPool) -> Self {
        Self::with_policy(pool, AccessPolicy::default())
    }

    pub fn with_policy(pool: DbPool, policy: AccessPolicy) -> Self {
        Self {
            pool,
            policy: Arc::new(policy),
        }
    }

    /// Allow/deny check for `principal` performing `privilege`.
    pub fn authorize(&self, principal: &Principal, privilege: Privilege) -> StoreResult<()> {
        self.policy.authorize(principal, privilege)
    }

    /// Validate and append one result. Logically identical runs are all kept.
    pub async fn insert(
        &self,
        principal: &Principal,
        result: impl Into<NewBenchmarkResult>,
    ) -> StoreResult<()> {
        self.authorize(principal, Privilege::Insert)?;

        let draft: NewBenchmarkResult = result.into();
        let record = draft.validate().inspect_err(|e| {
            warn!(principal = %principal, error = %e, "Rejected benchmark result");
        })?;

        self.pool.insert_benchmark_result(&record).await?;

        info!(
            principal = %principal,
            build_job_id = %record.build_job_id,
            scenario = %record.scenario_name,
            scenario_version = %record.scenario_version,
            "Stored benchmark result"
        );

        Ok(())
    }

    /// Lazily stream results matching `filter`. Order is unspecified.
    pub async fn query(
        &self,
        principal: &Principal,
        filter: &BenchmarkResultFilter,
    ) -> StoreResult<RecordStream<'_>> {
        self.authorize(principal, Privilege::Select)?;
        filter.validate()?;
        debug!(principal = %principal, ?filter, "Querying benchmark results");

        self.pool.stream_benchmark_results(filter).await
    }

    /// Collect every result matching `filter`.
    pub async fn query_all(
        &self,
        principal: &Principal,
        filter: &BenchmarkResultFilter,
    ) -> StoreResult<Vec<BenchmarkResultRecord>> {
        self.query(principal, filter).await?.try_collect().await
    }

    /// Count results matching `filter`.
    pub async fn count(
        &self,
        principal: &Principal,
        filter: &BenchmarkResultFilter,
    ) -> StoreResult<u64> {
        self.authorize(principal, Privilege::Select)?;
        filter.validate()?;

        self.pool.count_benchmark_results(filter).await
    }

    /// Apply `changes` to rows matching `filter`, returning rows affected.
    ///
    /// The table has no key, so an empty filter would rewrite every row; it is
    /// refused, as is an empty change set.
    pub async fn update(
        &self,
        principal: &Principal,
        filter: &BenchmarkResultFilter,
        changes: BenchmarkResultUpdate,
    ) -> StoreResult<u64> {
        self.authorize(principal, Privilege::Update)?;

        if filter.is_empty() {
            warn!(principal = %principal, "Refused unconditional update");
            return Err(StoreError::InvalidInput(
                "Update requires a non-empty filter".to_string(),
            ));
        }

        if changes.is_empty() {
            return Err(StoreError::InvalidInput(
                "Update requires at least one changed attribute".to_string(),
            ));
        }

        filter.validate()?;
        let changes = changes.validate()?;
        let rows = self.pool.update_benchmark_results(filter, &changes).await?;

        info!(principal = %principal, rows, "Updated benchmark results");

        Ok(rows)
    }
}
