//! Localization lookup
//!
//! The views only need key lookup with positional parameters. Bundles are
//! flat `key -> message` maps; nested tables in bundle files are flattened
//! into dotted keys.

use crate::models::Metric;
use crate::Result;
use std::collections::HashMap;
use std::path::Path;

pub trait Localizer: Send + Sync {
    /// Raw message for `key`, if the bundle has one
    fn message(&self, key: &str) -> Option<&str>;

    /// Message for the dotted join of `keys`, or the joined key itself
    fn translate(&self, keys: &[&str]) -> String {
        let key = keys.join(".");
        match self.message(&key) {
            Some(message) => message.to_string(),
            None => key,
        }
    }

    /// Message for `key` with `{0}`, `{1}`, ... replaced by `parameters`
    fn translate_with_parameters(&self, key: &str, parameters: &[&str]) -> String {
        let mut message = self.translate(&[key]);
        for (index, parameter) in parameters.iter().enumerate() {
            message = message.replace(&format!("{{{}}}", index), parameter);
        }
        message
    }

    /// `metric.<key>.name` when translated, else the metric's own name, else its key
    fn localized_metric_name(&self, metric: &Metric) -> String {
        if let Some(name) = self.message(&format!("metric.{}.name", metric.key)) {
            return name.to_string();
        }
        if metric.name.is_empty() {
            metric.key.clone()
        } else {
            metric.name.clone()
        }
    }
}

const DEFAULT_MESSAGES: &[(&str, &str)] = &[
    ("no_results", "No results"),
    ("na", "N/A"),
    ("component_measures.legend.color_x", "Color: {0}"),
    ("component_measures.legend.size_x", "Size: {0}"),
    ("metric.level.ERROR", "Failed"),
    ("metric.level.WARN", "Warning"),
    ("metric.level.OK", "Passed"),
    ("metric.level.NONE", "None"),
    ("metric.ncloc.name", "Lines of Code"),
    ("metric.coverage.name", "Coverage"),
    ("metric.new_coverage.name", "Coverage on New Code"),
    ("metric.alert_status.name", "Quality Gate Status"),
    ("metric.sqale_rating.name", "Maintainability Rating"),
    ("metric.reliability_rating.name", "Reliability Rating"),
    ("metric.security_rating.name", "Security Rating"),
    ("metric.duplicated_lines_density.name", "Duplicated Lines (%)"),
    ("metric.complexity.name", "Cyclomatic Complexity"),
    ("metric.sqale_index.name", "Technical Debt"),
    ("settings.authentication.title", "Authentication"),
    (
        "settings.authentication.description",
        "The following settings allow you to delegate authentication via SAML, or any of the following DevOps Platforms: GitHub, Bitbucket, GitLab.",
    ),
    (
        "settings.authentication.help",
        "Read more about configuring this authentication method in the {link}.",
    ),
    ("settings.authentication.help.link", "documentation"),
    ("settings.definitions.empty", "No settings in this category."),
];

/// In-memory message bundle
#[derive(Debug, Clone, Default)]
pub struct MessageBundle {
    messages: HashMap<String, String>,
}

impl MessageBundle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bundle preloaded with the default English messages
    pub fn with_defaults() -> Self {
        let messages = DEFAULT_MESSAGES
            .iter()
            .map(|(key, message)| ((*key).to_string(), (*message).to_string()))
            .collect();
        Self { messages }
    }

    pub fn insert(&mut self, key: &str, message: &str) {
        self.messages.insert(key.to_string(), message.to_string());
    }

    /// Add or override messages from `other`
    pub fn merge(&mut self, other: MessageBundle) {
        self.messages.extend(other.messages);
    }

    /// Load a bundle file (TOML, JSON or YAML by extension)
    pub fn load(path: &Path) -> Result<Self> {
        let value = measurehud_utils::config::load_value(path)?;
        let mut bundle = Self::new();
        flatten_into(&mut bundle.messages, String::new(), &value);
        Ok(bundle)
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

fn flatten_into(out: &mut HashMap<String, String>, prefix: String, value: &serde_json::Value) {
    match value {
        serde_json::Value::Object(map) => {
            for (key, nested) in map {
                let full_key = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{}.{}", prefix, key)
                };
                flatten_into(out, full_key, nested);
            }
        }
        serde_json::Value::String(message) => {
            out.insert(prefix, message.clone());
        }
        serde_json::Value::Null => {}
        other => {
            out.insert(prefix, other.to_string());
        }
    }
}

impl Localizer for MessageBundle {
    fn message(&self, key: &str) -> Option<&str> {
        self.messages.get(key).map(String::as_str)
    }
}
