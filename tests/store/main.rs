//! Store integration test suite.
//!
//! Runs the migrations and every store operation against an in-memory SQLite
//! database, one database per test.
//!
//! Run with: cargo test --test store

mod test_helpers;

mod test_concurrency;
mod test_ingest;
mod test_insert_query;
