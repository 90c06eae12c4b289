//! Query predicates and update change sets over benchmark results.

use serde::{Deserialize, Serialize};

use super::benchmark_result::{checked_float, checked_text, non_negative};
use crate::error::StoreResult;

/// Numeric attributes a filter can compare against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    LoadPhaseDuration,
    Queries,
    Qps,
    Min,
    Max,
    Avg,
    P50,
    P95,
    P99,
    Std,
    Slope,
}

impl Metric {
    /// Column name of the metric.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LoadPhaseDuration => "load_phase_duration",
            Self::Queries => "queries",
            Self::Qps => "qps",
            Self::Min => "min",
            Self::Max => "max",
            Self::Avg => "avg",
            Self::P50 => "p50",
            Self::P95 => "p95",
            Self::P99 => "p99",
            Self::Std => "std",
            Self::Slope => "slope",
        }
    }
}

/// Comparison operator for a [`MetricBound`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Comparison {
    Eq,
    Lt,
    Le,
    Gt,
    Ge,
}

/// `metric <comparison> value`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricBound {
    pub metric: Metric,
    pub comparison: Comparison,
    pub value: f64,
}

/// Predicate over any subset of result attributes. All set criteria must match.
///
/// An empty filter matches every row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkResultFilter {
    pub build_job_id: Option<String>,
    /// Match any of these build jobs. Empty means unconstrained.
    #[serde(default)]
    pub build_job_ids: Vec<String>,
    pub framework_version: Option<String>,
    pub scenario_name: Option<String>,
    pub scenario_version: Option<String>,
    pub query: Option<String>,
    /// `Some(true)` keeps rows with a load phase, `Some(false)` rows without one.
    pub has_load_phase: Option<bool>,
    #[serde(default)]
    pub metrics: Vec<MetricBound>,
}

impl BenchmarkResultFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn build_job_id(mut self, value: impl Into<String>) -> Self {
        self.build_job_id = Some(value.into());
        self
    }

    pub fn build_job_ids<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.build_job_ids = values.into_iter().map(Into::into).collect();
        self
    }

    pub fn framework_version(mut self, value: impl Into<String>) -> Self {
        self.framework_version = Some(value.into());
        self
    }

    pub fn scenario_name(mut self, value: impl Into<String>) -> Self {
        self.scenario_name = Some(value.into());
        self
    }

    pub fn scenario_version(mut self, value: impl Into<String>) -> Self {
        self.scenario_version = Some(value.into());
        self
    }

    pub fn query(mut self, value: impl Into<String>) -> Self {
        self.query = Some(value.into());
        self
    }

    pub fn has_load_phase(mut self, value: bool) -> Self {
        self.has_load_phase = Some(value);
        self
    }

    pub fn metric(mut self, metric: Metric, comparison: Comparison, value: f64) -> Self {
        self.metrics.push(MetricBound {
            metric,
            comparison,
            value,
        });
        self
    }

    /// Filter on the natural identity of a scenario run.
    pub fn identity(
        build_job_id: impl Into<String>,
        scenario_name: impl Into<String>,
        scenario_version: impl Into<String>,
        framework_version: impl Into<String>,
    ) -> Self {
        Self::new()
            .build_job_id(build_job_id)
            .scenario_name(scenario_name)
            .scenario_version(scenario_version)
            .framework_version(framework_version)
    }

    /// True when no criterion is set.
    pub fn is_empty(&self) -> bool {
        self.build_job_id.is_none()
            && self.build_job_ids.is_empty()
            && self.framework_version.is_none()
            && self.scenario_name.is_none()
            && self.scenario_version.is_none()
            && self.query.is_none()
            && self.has_load_phase.is_none()
            && self.metrics.is_empty()
    }

    /// Reject metric bounds that are not finite numbers.
    pub fn validate(&self) -> StoreResult<()> {
        for bound in &self.metrics {
            checked_float(bound.metric.as_str(), bound.value)?;
        }
        Ok(())
    }
}

/// Changes applied by a guarded update. Unset fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkResultUpdate {
    pub build_job_id: Option<String>,
    pub framework_version: Option<String>,
    pub scenario_name: Option<String>,
    pub scenario_version: Option<String>,
    pub query: Option<String>,
    /// `Some(None)` clears the load phase duration.
    pub load_phase_duration: Option<Option<i64>>,
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

impl BenchmarkResultUpdate {
    /// True when the change set touches no column.
    pub fn is_empty(&self) -> bool {
        self.build_job_id.is_none()
            && self.framework_version.is_none()
            && self.scenario_name.is_none()
            && self.scenario_version.is_none()
            && self.query.is_none()
            && self.load_phase_duration.is_none()
            && self.queries.is_none()
            && self.qps.is_none()
            && self.min.is_none()
            && self.max.is_none()
            && self.avg.is_none()
            && self.p50.is_none()
            && self.p95.is_none()
            && self.p99.is_none()
            && self.std.is_none()
            && self.slope.is_none()
    }

    /// Apply the same semantic checks as insertion to every set value.
    pub fn validate(self) -> StoreResult<Self> {
        Ok(Self {
            build_job_id: text("build_job_id", self.build_job_id)?,
            framework_version: text("framework_version", self.framework_version)?,
            scenario_name: text("scenario_name", self.scenario_name)?,
            scenario_version: text("scenario_version", self.scenario_version)?,
            query: text("query", self.query)?,
            load_phase_duration: match self.load_phase_duration {
                Some(Some(duration)) => Some(Some(non_negative("load_phase_duration", duration)?)),
                other => other,
            },
            queries: self
                .queries
                .map(|queries| non_negative("queries", queries))
                .transpose()?,
            qps: float("qps", self.qps)?,
            min: float("min", self.min)?,
            max: float("max", self.max)?,
            avg: float("avg", self.avg)?,
            p50: float("p50", self.p50)?,
            p95: float("p95", self.p95)?,
            p99: float("p99", self.p99)?,
            std: float("std", self.std)?,
            slope: float("slope", self.slope)?,
        })
    }
}

fn text(field: &'static str, value: Option<String>) -> StoreResult<Option<String>> {
    value.map(|v| checked_text(field, v)).transpose()
}

fn float(field: &'static str, value: Option<f64>) -> StoreResult<Option<f64>> {
    value.map(|v| checked_float(field, v)).transpose()
}
