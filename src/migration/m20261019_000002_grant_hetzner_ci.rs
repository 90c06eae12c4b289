//! Migration: Grant hetzner-ci read/write access to parallel_benchmark_result.
//!
//! PostgreSQL only. SQLite has no roles; there the in-process access policy
//! is the only enforcement point.

use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::DatabaseBackend;
use tracing::info;

use crate::auth::AccessGrant;
use crate::entity::parallel_benchmark_result::TABLE_NAME;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let grant = AccessGrant::hetzner_ci();

        if manager.get_database_backend() != DatabaseBackend::Postgres {
            info!(
                principal = %grant.principal(),
                "Skipping table grant: backend has no role system"
            );
            return Ok(());
        }

        manager
            .get_connection()
            .execute_unprepared(&grant.grant_sql(TABLE_NAME))
            .await?;

        info!(principal = %grant.principal(), table = TABLE_NAME, "Applied table grant");

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        if manager.get_database_backend() != DatabaseBackend::Postgres {
            return Ok(());
        }

        manager
            .get_connection()
            .execute_unprepared(&AccessGrant::hetzner_ci().revoke_sql(TABLE_NAME))
            .await?;

        Ok(())
    }
}
