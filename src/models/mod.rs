//! Domain models for the benchmark result store.

pub mod benchmark_result;
pub mod filter;

// Re-export commonly used types
pub use benchmark_result::{BenchmarkResultRecord, NewBenchmarkResult};
pub use filter::{BenchmarkResultFilter, BenchmarkResultUpdate, Comparison, Metric, MetricBound};
