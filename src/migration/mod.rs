//! SeaORM database migrations.

pub use sea_orm_migration::prelude::*;

mod m20261019_000001_create_parallel_benchmark_result;
mod m20261019_000002_grant_hetzner_ci;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20261019_000001_create_parallel_benchmark_result::Migration),
            Box::new(m20261019_000002_grant_hetzner_ci::Migration),
        ]
    }
}
