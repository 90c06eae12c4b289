//! SeaORM entity definitions.

pub mod parallel_benchmark_result;
