//! Benchmark result records and their validation.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::entity::parallel_benchmark_result;
use crate::error::{StoreError, StoreResult};

/// One completed benchmark scenario run, as stored.
///
/// Statistics are computed by the benchmark harness before insertion; time
/// units are defined by the harness as well.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkResultRecord {
    /// CI/build run that produced this result
    pub build_job_id: String,
    /// Version of the benchmarking framework
    pub framework_version: String,
    /// Logical scenario name
    pub scenario_name: String,
    /// Version of the scenario definition
    pub scenario_version: String,
    /// Query or workload description executed
    pub query: String,
    /// Warm-up/load phase duration; absent when the scenario has none
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub load_phase_duration: Option<i64>,
    /// Number of queries executed during measurement
    pub queries: i64,
    /// Measured queries-per-second throughput
    pub qps: f64,
    pub min: f64,
    pub max: f64,
    pub avg: f64,
    pub p50: f64,
    pub p95: f64,
    pub p99: f64,
    /// Standard deviation of latency
    pub std: f64,
    /// Latency trend over the run
    pub slope: f64,
}

impl From<parallel_benchmark_result::Model> for BenchmarkResultRecord {
    fn from(model: parallel_benchmark_result::Model) -> Self {
        Self {
            build_job_id: model.build_job_id,
            framework_version: model.framework_version,
            scenario_name: model.scenario_name,
            scenario_version: model.scenario_version,
            query: model.query,
            load_phase_duration: model.load_phase_duration,
            queries: model.queries,
            qps: model.qps,
            min: model.min,
            max: model.max,
            avg: model.avg,
            p50: model.p50,
            p95: model.p95,
            p99: model.p99,
            std: model.std,
            slope: model.slope,
        }
    }
}

/// A benchmark result as submitted by the harness, before validation.
///
/// Every attribute is optional here so that absent fields are reported by
/// name instead of failing deserialization as a whole.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewBenchmarkResult {
    pub build_job_id: Option<String>,
    pub framework_version: Option<String>,
    pub scenario_name: Option<String>,
    pub scenario_version: Option<String>,
    pub query: Option<String>,
    pub load_phase_duration: Option<i64>,
    pub queries: Option<i64>,
    pub qps: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub avg: Option<f64>,
    pub p50: Option<f64>,
    pub p95: Option<f64>,
    pub p99: Option<f64>,
    pub std: Option<f64>,
    pub slope: Option<f64>,
}

impl NewBenchmarkResult {
    /// Check required attributes and semantic types, producing a storable record.
    ///
    /// Fields are checked in column order; the first failure is reported.
    pub fn validate(self) -> StoreResult<BenchmarkResultRecord> {
        let build_job_id = required_text("build_job_id", self.build_job_id)?;
        let framework_version = required_text("framework_version", self.framework_version)?;
        let scenario_name = required_text("scenario_name", self.scenario_name)?;
        let scenario_version = required_text("scenario_version", self.scenario_version)?;
        let query = required_text("query", self.query)?;

        if let Some(duration) = self.load_phase_duration {
            non_negative("load_phase_duration", duration)?;
        }

        let queries = non_negative("queries", required("queries", self.queries)?)?;

        Ok(BenchmarkResultRecord {
            build_job_id,
            framework_version,
            scenario_name,
            scenario_version,
            query,
            load_phase_duration: self.load_phase_duration,
            queries,
            qps: required_float("qps", self.qps)?,
            min: required_float("min", self.min)?,
            max: required_float("max", self.max)?,
            avg: required_float("avg", self.avg)?,
            p50: required_float("p50", self.p50)?,
            p95: required_float("p95", self.p95)?,
            p99: required_float("p99", self.p99)?,
            std: required_float("std", self.std)?,
            slope: required_float("slope", self.slope)?,
        })
    }
}

impl NewBenchmarkResult {
    /// Read one harness row attribute by attribute.
    ///
    /// A value of the wrong JSON type fails validation against its attribute
    /// name. Unknown attributes are ignored.
    pub fn from_json(value: Value) -> StoreResult<Self> {
        let mut row = match value {
            Value::Object(row) => row,
            other => {
                return Err(StoreError::InvalidInput(format!(
                    "Expected a JSON object, got {}",
                    json_kind(&other)
                )));
            }
        };

        Ok(Self {
            build_job_id: text_attr(&mut row, "build_job_id")?,
            framework_version: text_attr(&mut row, "framework_version")?,
            scenario_name: text_attr(&mut row, "scenario_name")?,
            scenario_version: text_attr(&mut row, "scenario_version")?,
            query: text_attr(&mut row, "query")?,
            load_phase_duration: integer_attr(&mut row, "load_phase_duration")?,
            queries: integer_attr(&mut row, "queries")?,
            qps: float_attr(&mut row, "qps")?,
            min: float_attr(&mut row, "min")?,
            max: float_attr(&mut row, "max")?,
            avg: float_attr(&mut row, "avg")?,
            p50: float_attr(&mut row, "p50")?,
            p95: float_attr(&mut row, "p95")?,
            p99: float_attr(&mut row, "p99")?,
            std: float_attr(&mut row, "std")?,
            slope: float_attr(&mut row, "slope")?,
        })
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn text_attr(row: &mut Map<String, Value>, field: &'static str) -> StoreResult<Option<String>> {
    match row.remove(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(other) => Err(StoreError::validation(
            field,
            format!("expected a string, got {}", json_kind(&other)),
        )),
    }
}

fn integer_attr(row: &mut Map<String, Value>, field: &'static str) -> StoreResult<Option<i64>> {
    match row.remove(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => n.as_i64().map(Some).ok_or_else(|| {
            StoreError::validation(field, format!("expected an integer, got {}", n))
        }),
        Some(other) => Err(StoreError::validation(
            field,
            format!("expected an integer, got {}", json_kind(&other)),
        )),
    }
}

fn float_attr(row: &mut Map<String, Value>, field: &'static str) -> StoreResult<Option<f64>> {
    match row.remove(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => n.as_f64().map(Some).ok_or_else(|| {
            StoreError::validation(field, format!("expected a number, got {}", n))
        }),
        Some(other) => Err(StoreError::validation(
            field,
            format!("expected a number, got {}", json_kind(&other)),
        )),
    }
}

impl From<BenchmarkResultRecord> for NewBenchmarkResult {
    fn from(record: BenchmarkResultRecord) -> Self {
        Self {
            build_job_id: Some(record.build_job_id),
            framework_version: Some(record.framework_version),
            scenario_name: Some(record.scenario_name),
            scenario_version: Some(record.scenario_version),
            query: Some(record.query),
            load_phase_duration: record.load_phase_duration,
            queries: Some(record.queries),
            qps: Some(record.qps),
            min: Some(record.min),
            max: Some(record.max),
            avg: Some(record.avg),
            p50: Some(record.p50),
            p95: Some(record.p95),
            p99: Some(record.p99),
            std: Some(record.std),
            slope: Some(record.slope),
        }
    }
}

pub(crate) fn required<T>(field: &'static str, value: Option<T>) -> StoreResult<T> {
    value.ok_or_else(|| StoreError::validation(field, "is required"))
}

pub(crate) fn required_text(field: &'static str, value: Option<String>) -> StoreResult<String> {
    let value = required(field, value)?;
    checked_text(field, value)
}

pub(crate) fn checked_text(field: &'static str, value: String) -> StoreResult<String> {
    if value.trim().is_empty() {
        return Err(StoreError::validation(field, "must not be blank"));
    }
    Ok(value)
}

pub(crate) fn non_negative(field: &'static str, value: i64) -> StoreResult<i64> {
    if value < 0 {
        return Err(StoreError::validation(
            field,
            format!("must not be negative, got {}", value),
        ));
    }
    Ok(value)
}

pub(crate) fn required_float(field: &'static str, value: Option<f64>) -> StoreResult<f64> {
    let value = required(field, value)?;
    checked_float(field, value)
}

pub(crate) fn checked_float(field: &'static str, value: f64) -> StoreResult<f64> {
    if !value.is_finite() {
        return Err(StoreError::validation(
            field,
            format!("must be a finite number, got {}", value),
        ));
    }
    Ok(value)
}
