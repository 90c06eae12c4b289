//! Create parallel_benchmark_result table.
//!
//! Append-only results: no primary key, no uniqueness constraint, no timestamp.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ParallelBenchmarkResult::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ParallelBenchmarkResult::BuildJobId)
                            .text()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ParallelBenchmarkResult::FrameworkVersion)
                            .text()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ParallelBenchmarkResult::ScenarioName)
                            .text()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ParallelBenchmarkResult::ScenarioVersion)
                            .text()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ParallelBenchmarkResult::Query)
                            .text()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ParallelBenchmarkResult::LoadPhaseDuration)
                            .big_integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(ParallelBenchmarkResult::Queries)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ParallelBenchmarkResult::Qps).double().not_null())
                    .col(ColumnDef::new(ParallelBenchmarkResult::Min).double().not_null())
                    .col(ColumnDef::new(ParallelBenchmarkResult::Max).double().not_null())
                    .col(ColumnDef::new(ParallelBenchmarkResult::Avg).double().not_null())
                    .col(ColumnDef::new(ParallelBenchmarkResult::P50).double().not_null())
                    .col(ColumnDef::new(ParallelBenchmarkResult::P95).double().not_null())
                    .col(ColumnDef::new(ParallelBenchmarkResult::P99).double().not_null())
                    .col(ColumnDef::new(ParallelBenchmarkResult::Std).double().not_null())
                    .col(ColumnDef::new(ParallelBenchmarkResult::Slope).double().not_null())
                    .to_owned(),
            )
            .await?;

        // Lookup paths used by reporting: per build and per scenario. Not unique.
        manager
            .create_index(
                Index::create()
                    .name("idx_parallel_benchmark_result_build_job_id")
                    .table(ParallelBenchmarkResult::Table)
                    .col(ParallelBenchmarkResult::BuildJobId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_parallel_benchmark_result_scenario")
                    .table(ParallelBenchmarkResult::Table)
                    .col(ParallelBenchmarkResult::ScenarioName)
                    .col(ParallelBenchmarkResult::ScenarioVersion)
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(
                Table::drop()
                    .table(ParallelBenchmarkResult::Table)
                    .if_exists()
                    .to_owned(),
            )
            .await
    }
}

#[derive(DeriveIden)]
enum ParallelBenchmarkResult {
    Table,
    BuildJobId,
    FrameworkVersion,
    ScenarioName,
    ScenarioVersion,
    Query,
    LoadPhaseDuration,
    Queries,
    Qps,
    Min,
    Max,
    Avg,
    #[sea_orm(iden = "p50")]
    P50,
    #[sea_orm(iden = "p95")]
    P95,
    #[sea_orm(iden = "p99")]
    P99,
    Std,
    Slope,
}
