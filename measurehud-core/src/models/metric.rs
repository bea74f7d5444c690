use serde::{Deserialize, Serialize};
use std::fmt;

/// Well-known metric keys
pub mod keys {
    /// Default size metric of the treemap
    pub const NCLOC: &str = "ncloc";
}

const DIFF_METRIC_PREFIX: &str = "new_";

/// Whether `key` names a "delta since baseline" metric
pub fn is_diff_metric(key: &str) -> bool {
    key.starts_with(DIFF_METRIC_PREFIX)
}

/// Display type of a metric; drives formatting and color scale selection.
///
/// Unknown type strings load as [`MetricType::Data`] so a newer backend
/// never breaks deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MetricType {
    Level,
    Rating,
    Percent,
    Int,
    ShortInt,
    Float,
    Millisec,
    WorkDur,
    ShortWorkDur,
    Data,
    Distrib,
    Bool,
    String,
}

impl MetricType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricType::Level => "LEVEL",
            MetricType::Rating => "RATING",
            MetricType::Percent => "PERCENT",
            MetricType::Int => "INT",
            MetricType::ShortInt => "SHORT_INT",
            MetricType::Float => "FLOAT",
            MetricType::Millisec => "MILLISEC",
            MetricType::WorkDur => "WORK_DUR",
            MetricType::ShortWorkDur => "SHORT_WORK_DUR",
            MetricType::Data => "DATA",
            MetricType::Distrib => "DISTRIB",
            MetricType::Bool => "BOOL",
            MetricType::String => "STRING",
        }
    }

    pub fn parse(s: &str) -> MetricType {
        match s.to_uppercase().as_str() {
            "LEVEL" => MetricType::Level,
            "RATING" => MetricType::Rating,
            "PERCENT" => MetricType::Percent,
            "INT" => MetricType::Int,
            "SHORT_INT" => MetricType::ShortInt,
            "FLOAT" => MetricType::Float,
            "MILLISEC" => MetricType::Millisec,
            "WORK_DUR" => MetricType::WorkDur,
            "SHORT_WORK_DUR" => MetricType::ShortWorkDur,
            "DISTRIB" => MetricType::Distrib,
            "BOOL" => MetricType::Bool,
            "STRING" => MetricType::String,
            _ => MetricType::Data,
        }
    }

    /// Types whose legend is a set of discrete boxes rather than a gradient
    pub fn has_discrete_legend(&self) -> bool {
        matches!(self, MetricType::Level | MetricType::Rating)
    }
}

impl From<String> for MetricType {
    fn from(s: String) -> Self {
        MetricType::parse(&s)
    }
}

impl From<MetricType> for String {
    fn from(t: MetricType) -> Self {
        t.as_str().to_string()
    }
}

impl fmt::Display for MetricType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Metric definition as served by the backend
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metric {
    pub key: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub metric_type: MetricType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    /// Directionality; absent means lower values are better
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub higher_values_are_better: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hidden: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qualitative: Option<bool>,
}

impl Metric {
    pub fn new(key: &str, name: &str, metric_type: MetricType) -> Self {
        Self {
            key: key.to_string(),
            name: name.to_string(),
            metric_type,
            description: None,
            domain: None,
            higher_values_are_better: None,
            hidden: None,
            qualitative: None,
        }
    }

    pub fn with_higher_values_are_better(mut self, higher: bool) -> Self {
        self.higher_values_are_better = Some(higher);
        self
    }

    pub fn higher_is_better(&self) -> bool {
        self.higher_values_are_better.unwrap_or(false)
    }

    pub fn is_diff(&self) -> bool {
        is_diff_metric(&self.key)
    }
}
