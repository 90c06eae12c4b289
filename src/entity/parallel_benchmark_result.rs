//! Parallel benchmark result entity: one row per completed scenario run.
//!
//! The table carries no primary key. SeaORM needs one declared on every entity,
//! so the natural identity tuple is declared here only; nothing relies on it
//! being unique and the store never issues key-based statements.

use sea_orm::entity::prelude::*;

/// Name of the persisted table.
pub const TABLE_NAME: &str = "parallel_benchmark_result";

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "parallel_benchmark_result")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false, column_type = "Text")]
    pub build_job_id: String,
    #[sea_orm(primary_key, auto_increment = false, column_type = "Text")]
    pub framework_version: String,
    #[sea_orm(primary_key, auto_increment = false, column_type = "Text")]
    pub scenario_name: String,
    #[sea_orm(primary_key, auto_increment = false, column_type = "Text")]
    pub scenario_version: String,
    #[sea_orm(column_type = "Text")]
    pub query: String,
    pub load_phase_duration: Option<i64>,
    pub queries: i64,
    pub qps: f64,
    pub min: f64,
    pub max: f64,
    pub avg: f64,
    pub p50: f64,
    pub p95: f64,
    pub p99: f64,
    pub std: f64,
    pub slope: f64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
