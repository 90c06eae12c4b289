//! Database queries for parallel benchmark results.

use futures_util::StreamExt;
use futures_util::stream::BoxStream;
use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, Set};
use tracing::debug;

use crate::entity::parallel_benchmark_result::{ActiveModel, Column, Entity};
use crate::error::{StoreError, StoreResult};
use crate::models::{
    BenchmarkResultFilter, BenchmarkResultRecord, BenchmarkResultUpdate, Comparison, Metric,
    MetricBound,
};

use super::DbPool;

/// Lazy sequence of records produced by a query.
pub type RecordStream<'a> = BoxStream<'a, StoreResult<BenchmarkResultRecord>>;

impl DbPool {
    /// Append a validated record. No identifier is produced.
    pub async fn insert_benchmark_result(&self, record: &BenchmarkResultRecord) -> StoreResult<()> {
        let model = ActiveModel {
            build_job_id: Set(record.build_job_id.clone()),
            framework_version: Set(record.framework_version.clone()),
            scenario_name: Set(record.scenario_name.clone()),
            scenario_version: Set(record.scenario_version.clone()),
            query: Set(record.query.clone()),
            load_phase_duration: Set(record.load_phase_duration),
            queries: Set(record.queries),
            qps: Set(record.qps),
            min: Set(record.min),
            max: Set(record.max),
            avg: Set(record.avg),
            p50: Set(record.p50),
            p95: Set(record.p95),
            p99: Set(record.p99),
            std: Set(record.std),
            slope: Set(record.slope),
        };

        Entity::insert(model)
            .exec_without_returning(self.connection())
            .await?;

        Ok(())
    }

    /// Stream records matching `filter`. Order is unspecified.
    pub async fn stream_benchmark_results(
        &self,
        filter: &BenchmarkResultFilter,
    ) -> StoreResult<RecordStream<'_>> {
        let stream = Entity::find()
            .filter(filter_condition(filter))
            .stream(self.connection())
            .await?;

        Ok(stream
            .map(|row| {
                row.map(BenchmarkResultRecord::from)
                    .map_err(StoreError::from)
            })
            .boxed())
    }

    /// Count records matching `filter`.
    pub async fn count_benchmark_results(&self, filter: &BenchmarkResultFilter) -> StoreResult<u64> {
        let total = Entity::find()
            .filter(filter_condition(filter))
            .count(self.connection())
            .await?;

        Ok(total)
    }

    /// Apply `changes` to every row matching `filter`, returning rows affected.
    ///
    /// Callers are responsible for refusing empty filters.
    pub async fn update_benchmark_results(
        &self,
        filter: &BenchmarkResultFilter,
        changes: &BenchmarkResultUpdate,
    ) -> StoreResult<u64> {
        let mut update = Entity::update_many();

        if let Some(ref v) = changes.build_job_id {
            update = update.col_expr(Column::BuildJobId, Expr::value(v.clone()));
        }
        if let Some(ref v) = changes.framework_version {
            update = update.col_expr(Column::FrameworkVersion, Expr::value(v.clone()));
        }
        if let Some(ref v) = changes.scenario_name {
            update = update.col_expr(Column::ScenarioName, Expr::value(v.clone()));
        }
        if let Some(ref v) = changes.scenario_version {
            update = update.col_expr(Column::ScenarioVersion, Expr::value(v.clone()));
        }
        if let Some(ref v) = changes.query {
            update = update.col_expr(Column::Query, Expr::value(v.clone()));
        }
        if let Some(v) = changes.load_phase_duration {
            update = update.col_expr(Column::LoadPhaseDuration, Expr::value(v));
        }
        if let Some(v) = changes.queries {
            update = update.col_expr(Column::Queries, Expr::value(v));
        }

        let floats = [
            (Column::Qps, changes.qps),
            (Column::Min, changes.min),
            (Column::Max, changes.max),
            (Column::Avg, changes.avg),
            (Column::P50, changes.p50),
            (Column::P95, changes.p95),
            (Column::P99, changes.p99),
            (Column::Std, changes.std),
            (Column::Slope, changes.slope),
        ];
        for (column, value) in floats {
            if let Some(v) = value {
                update = update.col_expr(column, Expr::value(v));
            }
        }

        let outcome = update
            .filter(filter_condition(filter))
            .exec(self.connection())
            .await?;

        debug!(rows = outcome.rows_affected, "Updated benchmark results");

        Ok(outcome.rows_affected)
    }
}

fn metric_column(metric: Metric) -> Column {
    match metric {
        Metric::LoadPhaseDuration => Column::LoadPhaseDuration,
        Metric::Queries => Column::Queries,
        Metric::Qps => Column::Qps,
        Metric::Min => Column::Min,
        Metric::Max => Column::Max,
        Metric::Avg => Column::Avg,
        Metric::P50 => Column::P50,
        Metric::P95 => Column::P95,
        Metric::P99 => Column::P99,
        Metric::Std => Column::Std,
        Metric::Slope => Column::Slope,
    }
}

fn bound_condition(bound: &MetricBound) -> Condition {
    let column = metric_column(bound.metric);
    let expr = match bound.comparison {
        Comparison::Eq => column.eq(bound.value),
        Comparison::Lt => column.lt(bound.value),
        Comparison::Le => column.lte(bound.value),
        Comparison::Gt => column.gt(bound.value),
        Comparison::Ge => column.gte(bound.value),
    };
    Condition::all().add(expr)
}

/// Translate a filter into a SQL condition. An empty filter renders as `WHERE TRUE`.
pub(crate) fn filter_condition(filter: &BenchmarkResultFilter) -> Condition {
    let mut condition = Condition::all();

    if let Some(ref v) = filter.build_job_id {
        condition = condition.add(Column::BuildJobId.eq(v.as_str()));
    }
    if !filter.build_job_ids.is_empty() {
        condition = condition.add(Column::BuildJobId.is_in(filter.build_job_ids.clone()));
    }
    if let Some(ref v) = filter.framework_version {
        condition = condition.add(Column::FrameworkVersion.eq(v.as_str()));
    }
    if let Some(ref v) = filter.scenario_name {
        condition = condition.add(Column::ScenarioName.eq(v.as_str()));
    }
    if let Some(ref v) = filter.scenario_version {
        condition = condition.add(Column::ScenarioVersion.eq(v.as_str()));
    }
    if let Some(ref v) = filter.query {
        condition = condition.add(Column::Query.eq(v.as_str()));
    }
    match filter.has_load_phase {
        Some(true) => condition = condition.add(Column::LoadPhaseDuration.is_not_null()),
        Some(false) => condition = condition.add(Column::LoadPhaseDuration.is_null()),
        None => {}
    }
    for bound in &filter.metrics {
        condition = condition.add(bound_condition(bound));
    }

    condition
}
