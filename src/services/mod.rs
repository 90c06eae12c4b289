//! Business logic services.

pub mod ingest;
pub mod result_store;

pub use result_store::BenchmarkResultStore;
