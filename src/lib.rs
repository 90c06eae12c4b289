//! Parallel benchmark result store.
//!
//! Durable storage for results produced by the parallel benchmark harness,
//! one row per scenario run, together with the access contract of the CI
//! principal that writes them.

pub mod auth;
pub mod config;
pub mod db;
pub mod entity;
pub mod error;
pub mod migration;
pub mod models;
pub mod services;

pub use auth::{AccessGrant, AccessPolicy, Principal, Privilege};
pub use db::DbPool;
pub use error::{StoreError, StoreResult};
pub use models::{BenchmarkResultFilter, BenchmarkResultRecord, BenchmarkResultUpdate, NewBenchmarkResult};
pub use services::BenchmarkResultStore;
