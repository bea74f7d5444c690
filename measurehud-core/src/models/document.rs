use super::measure::{Measure, MeasuredEntity, Qualifier};
use super::metric::Metric;
use super::settings::SettingDefinition;
use crate::{CoreError, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Leak-period value attached to a raw measure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawPeriod {
    #[serde(default)]
    pub value: Option<String>,
}

/// Measure as returned by the component tree API: metric by key only
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawMeasure {
    pub metric: String,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub period: Option<RawPeriod>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawComponent {
    pub key: String,
    pub name: String,
    #[serde(default)]
    pub qualifier: Qualifier,
    #[serde(default)]
    pub branch: Option<String>,
    #[serde(default)]
    pub ref_key: Option<String>,
    #[serde(default)]
    pub measures: Vec<RawMeasure>,
}

/// Component tree payload: metric definitions plus components with raw measures
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MeasuresDocument {
    #[serde(default)]
    pub metrics: Vec<Metric>,
    #[serde(default)]
    pub components: Vec<RawComponent>,
}

impl MeasuresDocument {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let document = Self::from_json_str(&content)?;
        tracing::debug!(
            "Loaded {} components and {} metrics from {}",
            document.components.len(),
            document.metrics.len(),
            path.display()
        );
        Ok(document)
    }

    pub fn metric(&self, key: &str) -> Option<&Metric> {
        self.metrics.iter().find(|m| m.key == key)
    }

    /// Attach full metric definitions to every measure, keeping component order
    pub fn into_entities(&self) -> Result<Vec<MeasuredEntity>> {
        let metrics: IndexMap<&str, &Metric> =
            self.metrics.iter().map(|m| (m.key.as_str(), m)).collect();

        self.components
            .iter()
            .map(|component| {
                let measures = component
                    .measures
                    .iter()
                    .map(|raw| {
                        let metric = metrics
                            .get(raw.metric.as_str())
                            .ok_or_else(|| CoreError::UnknownMetric(raw.metric.clone()))?;
                        Ok(Measure {
                            metric: (*metric).clone(),
                            value: raw.value.clone(),
                            delta: raw.period.as_ref().and_then(|p| p.value.clone()),
                        })
                    })
                    .collect::<Result<Vec<_>>>()?;

                Ok(MeasuredEntity {
                    key: component.key.clone(),
                    name: component.name.clone(),
                    branch: component.branch.clone(),
                    qualifier: component.qualifier,
                    ref_key: component.ref_key.clone(),
                    measures,
                })
            })
            .collect()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SettingsShape {
    List(Vec<SettingDefinition>),
    Wrapped { definitions: Vec<SettingDefinition> },
}

/// Setting definitions payload, either a bare list or `{"definitions": [...]}`
#[derive(Debug, Clone, Default, Serialize)]
pub struct SettingsDocument {
    pub definitions: Vec<SettingDefinition>,
}

impl SettingsDocument {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let definitions = match serde_json::from_str::<SettingsShape>(json)? {
            SettingsShape::List(definitions) | SettingsShape::Wrapped { definitions } => definitions,
        };
        Ok(Self { definitions })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let document = Self::from_json_str(&content)?;
        tracing::debug!(
            "Loaded {} setting definitions from {}",
            document.definitions.len(),
            path.display()
        );
        Ok(document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MetricType;

    const DOCUMENT: &str = r#"{
        "metrics": [
            {"key": "ncloc", "name": "Lines of Code", "type": "INT"},
            {"key": "new_coverage", "name": "Coverage on New Code", "type": "PERCENT", "higherValuesAreBetter": true}
        ],
        "components": [
            {"key": "p:src", "name": "src", "qualifier": "DIR", "measures": [
                {"metric": "ncloc", "value": "1200"},
                {"metric": "new_coverage", "period": {"value": "64.5"}}
            ]},
            {"key": "p:lib", "name": "lib", "qualifier": "DIR", "branch": "main", "measures": []}
        ]
    }"#;

    #[test]
    fn test_resolves_metrics_in_order() -> Result<()> {
        let document = MeasuresDocument::from_json_str(DOCUMENT)?;
        let entities = document.into_entities()?;

        assert_eq!(entities.len(), 2);
        assert_eq!(entities[0].name, "src");
        assert_eq!(entities[0].measures[1].metric.metric_type, MetricType::Percent);
        assert_eq!(entities[0].measures[1].effective_value(), Some("64.5"));
        assert_eq!(entities[1].display_name(), "lib / main");
        assert!(document.metric("ncloc").is_some());
        Ok(())
    }

    #[test]
    fn test_unknown_metric_is_reported() {
        let document = MeasuresDocument::from_json_str(
            r#"{"metrics": [], "components": [{"key": "k", "name": "n", "measures": [{"metric": "ghost", "value": "1"}]}]}"#,
        )
        .unwrap();
        let err = document.into_entities().unwrap_err();
        assert!(matches!(err, CoreError::UnknownMetric(ref key) if key == "ghost"));
    }

    #[test]
    fn test_settings_document_shapes() -> Result<()> {
        let bare = SettingsDocument::from_json_str(
            r#"[{"key": "a", "category": "authentication", "subCategory": "saml"}]"#,
        )?;
        let wrapped = SettingsDocument::from_json_str(
            r#"{"definitions": [{"key": "a", "category": "authentication", "subCategory": "saml"}]}"#,
        )?;
        assert_eq!(bare.definitions, wrapped.definitions);
        Ok(())
    }
}
