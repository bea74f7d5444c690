use serde::{Deserialize, Serialize};
use std::fmt;

/// Category holding every authentication-related setting
pub const AUTHENTICATION_CATEGORY: &str = "authentication";

/// DevOps platform integrations known to the settings pages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AlmKey {
    #[serde(rename = "github")]
    GitHub,
    #[serde(rename = "gitlab")]
    GitLab,
    #[serde(rename = "bitbucket")]
    BitbucketServer,
    #[serde(rename = "bitbucketcloud")]
    BitbucketCloud,
    #[serde(rename = "azure")]
    Azure,
}

impl AlmKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlmKey::GitHub => "github",
            AlmKey::GitLab => "gitlab",
            AlmKey::BitbucketServer => "bitbucket",
            AlmKey::BitbucketCloud => "bitbucketcloud",
            AlmKey::Azure => "azure",
        }
    }
}

impl fmt::Display for AlmKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A configurable setting as described by the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingDefinition {
    pub key: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub category: String,
    pub sub_category: String,
    #[serde(default, rename = "type")]
    pub setting_type: Option<String>,
    #[serde(default)]
    pub default_value: Option<String>,
    #[serde(default)]
    pub multi_values: bool,
    #[serde(default)]
    pub options: Vec<String>,
}

impl SettingDefinition {
    pub fn new(key: &str, category: &str, sub_category: &str) -> Self {
        Self {
            key: key.to_string(),
            name: None,
            description: None,
            category: category.to_string(),
            sub_category: sub_category.to_string(),
            setting_type: None,
            default_value: None,
            multi_values: false,
            options: Vec::new(),
        }
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    /// Name when present, key otherwise
    pub fn display_name(&self) -> &str {
        self.name.as_deref().filter(|n| !n.is_empty()).unwrap_or(&self.key)
    }

    /// Category match is case-insensitive; sub-category match is exact
    pub fn belongs_to(&self, category: &str, sub_category: &str) -> bool {
        self.category.eq_ignore_ascii_case(category) && self.sub_category == sub_category
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_belongs_to() {
        let def = SettingDefinition::new("sonar.auth.saml.enabled", "Authentication", "saml");
        assert!(def.belongs_to(AUTHENTICATION_CATEGORY, "saml"));
        assert!(!def.belongs_to(AUTHENTICATION_CATEGORY, "SAML"));
        assert!(!def.belongs_to("general", "saml"));
    }

    #[test]
    fn test_deserialize_backend_shape() {
        let def: SettingDefinition = serde_json::from_str(
            r#"{"key":"sonar.auth.github.enabled","name":"Enabled","category":"authentication","subCategory":"github","type":"BOOLEAN","defaultValue":"false"}"#,
        )
        .unwrap();
        assert_eq!(def.sub_category, "github");
        assert_eq!(def.setting_type.as_deref(), Some("BOOLEAN"));
        assert_eq!(def.display_name(), "Enabled");
        assert!(!def.multi_values);
    }

    #[test]
    fn test_alm_key_strings() {
        assert_eq!(AlmKey::BitbucketServer.as_str(), "bitbucket");
        let key: AlmKey = serde_json::from_str("\"gitlab\"").unwrap();
        assert_eq!(key, AlmKey::GitLab);
    }
}
