use super::metric::{is_diff_metric, Metric};
use measurehud_utils::string::join_non_empty;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Component qualifier (project, directory, file, ...)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Qualifier {
    Project,
    Application,
    Portfolio,
    SubPortfolio,
    SubProject,
    Directory,
    File,
    UnitTestFile,
    Unknown,
}

impl Qualifier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Qualifier::Project => "TRK",
            Qualifier::Application => "APP",
            Qualifier::Portfolio => "VW",
            Qualifier::SubPortfolio => "SVW",
            Qualifier::SubProject => "BRC",
            Qualifier::Directory => "DIR",
            Qualifier::File => "FIL",
            Qualifier::UnitTestFile => "UTS",
            Qualifier::Unknown => "",
        }
    }

    pub fn parse(s: &str) -> Qualifier {
        match s {
            "TRK" => Qualifier::Project,
            "APP" => Qualifier::Application,
            "VW" => Qualifier::Portfolio,
            "SVW" => Qualifier::SubPortfolio,
            "BRC" => Qualifier::SubProject,
            "DIR" => Qualifier::Directory,
            "FIL" => Qualifier::File,
            "UTS" => Qualifier::UnitTestFile,
            _ => Qualifier::Unknown,
        }
    }

    /// Single-column glyph drawn in front of treemap labels
    pub fn icon(&self) -> &'static str {
        match self {
            Qualifier::Project | Qualifier::SubProject => "◆",
            Qualifier::Application => "◇",
            Qualifier::Portfolio | Qualifier::SubPortfolio => "◎",
            Qualifier::Directory => "▸",
            Qualifier::File => "•",
            Qualifier::UnitTestFile => "✓",
            Qualifier::Unknown => "·",
        }
    }
}

impl Default for Qualifier {
    fn default() -> Self {
        Qualifier::Unknown
    }
}

impl From<String> for Qualifier {
    fn from(s: String) -> Self {
        Qualifier::parse(&s)
    }
}

impl From<Qualifier> for String {
    fn from(q: Qualifier) -> Self {
        q.as_str().to_string()
    }
}

impl fmt::Display for Qualifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One metric's value on a component: absolute and/or delta since baseline
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Measure {
    pub metric: Metric,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delta: Option<String>,
}

impl Measure {
    pub fn new(metric: Metric, value: Option<&str>) -> Self {
        Self {
            metric,
            value: value.map(str::to_string),
            delta: None,
        }
    }

    pub fn with_delta(mut self, delta: &str) -> Self {
        self.delta = Some(delta.to_string());
        self
    }

    /// Delta for diff metrics, absolute value otherwise. Empty strings are absent.
    pub fn effective_value(&self) -> Option<&str> {
        let raw = if is_diff_metric(&self.metric.key) {
            self.delta.as_deref()
        } else {
            self.value.as_deref()
        };
        raw.filter(|v| !v.is_empty())
    }
}

/// A measured component: a named, optionally branched item with its measures
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeasuredEntity {
    pub key: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
    #[serde(default)]
    pub qualifier: Qualifier,
    /// Key of the referenced component for portfolio/application children
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ref_key: Option<String>,
    #[serde(default)]
    pub measures: Vec<Measure>,
}

impl MeasuredEntity {
    pub fn new(key: &str, name: &str, qualifier: Qualifier) -> Self {
        Self {
            key: key.to_string(),
            name: name.to_string(),
            branch: None,
            qualifier,
            ref_key: None,
            measures: Vec::new(),
        }
    }

    pub fn with_branch(mut self, branch: &str) -> Self {
        self.branch = Some(branch.to_string());
        self
    }

    pub fn with_measure(mut self, measure: Measure) -> Self {
        self.measures.push(measure);
        self
    }

    /// `name`, or `name / branch` when a branch is set
    pub fn display_name(&self) -> String {
        join_non_empty([Some(self.name.as_str()), self.branch.as_deref()], " / ")
    }

    pub fn measure(&self, metric_key: &str) -> Option<&Measure> {
        self.measures.iter().find(|m| m.metric.key == metric_key)
    }

    /// First measure whose metric differs from `metric_key`
    pub fn other_measure(&self, metric_key: &str) -> Option<&Measure> {
        self.measures.iter().find(|m| m.metric.key != metric_key)
    }
}

/// Stable key identifying a component row (reference key wins, branch suffixed)
pub fn component_measure_unique_key(entity: &MeasuredEntity) -> Option<String> {
    let base = entity.ref_key.as_deref().unwrap_or(entity.key.as_str());
    if base.is_empty() {
        return None;
    }
    match entity.branch.as_deref().filter(|b| !b.is_empty()) {
        Some(branch) => Some(format!("{}@{}", base, branch)),
        None => Some(base.to_string()),
    }
}
