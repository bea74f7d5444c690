//! Configuration loading
//!
//! Files are parsed by extension (`.toml`, `.json`, `.yml`/`.yaml`) and
//! deserialized into any serde type. Layering goes through JSON values so a
//! partial override only touches the keys it names.

use serde::{Deserialize, Serialize};
use std::path::Path;

fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("")
        .to_lowercase()
}

/// Load a configuration file into `T`
pub fn load_config<T>(path: &Path) -> crate::Result<T>
where
    T: for<'de> Deserialize<'de>,
{
    let extension = extension_of(path);
    let content = std::fs::read_to_string(path)?;

    match extension.as_str() {
        "toml" => toml::from_str(&content)
            .map_err(|e| crate::UtilError::Config(format!("TOML parse error: {}", e))),
        "json" => serde_json::from_str(&content)
            .map_err(|e| crate::UtilError::Config(format!("JSON parse error: {}", e))),
        "yml" | "yaml" => serde_yaml::from_str(&content)
            .map_err(|e| crate::UtilError::Config(format!("YAML parse error: {}", e))),
        _ => Err(crate::UtilError::Config(format!(
            "Unsupported config format: {}",
            extension
        ))),
    }
}

/// Load a configuration file as an untyped JSON value, used for overlays
pub fn load_value(path: &Path) -> crate::Result<serde_json::Value> {
    load_config::<serde_json::Value>(path)
}

/// Merge two JSON values (second overrides first, objects merge per key)
fn merge_json_values(base: &mut serde_json::Value, override_value: serde_json::Value) {
    match (base, override_value) {
        (serde_json::Value::Object(base_obj), serde_json::Value::Object(override_obj)) => {
            for (key, value) in override_obj {
                match base_obj.get_mut(&key) {
                    Some(existing) => merge_json_values(existing, value),
                    None => {
                        base_obj.insert(key, value);
                    }
                }
            }
        }
        (base_value, override_value) => {
            *base_value = override_value;
        }
    }
}

/// Merge `overlay` onto `base`
pub fn merge_configs<T>(base: &mut T, overlay: serde_json::Value) -> crate::Result<()>
where
    T: Serialize + for<'de> Deserialize<'de>,
{
    let mut base_value = serde_json::to_value(&*base)
        .map_err(|e| crate::UtilError::Serialization(format!("Base serialization error: {}", e)))?;

    merge_json_values(&mut base_value, overlay);

    *base = serde_json::from_value(base_value).map_err(|e| {
        crate::UtilError::Serialization(format!("Result deserialization error: {}", e))
    })?;

    Ok(())
}

/// Layered configuration: defaults, then files, then explicit overrides
#[derive(Debug)]
pub struct ConfigBuilder<T> {
    config: T,
}

impl<T> ConfigBuilder<T>
where
    T: Default + Serialize + for<'de> Deserialize<'de>,
{
    pub fn new() -> Self {
        Self {
            config: T::default(),
        }
    }

    /// Overlay a file on top of what has been built so far
    pub fn load_file(mut self, path: &Path) -> crate::Result<Self> {
        let overlay = load_value(path)?;
        merge_configs(&mut self.config, overlay)?;
        Ok(self)
    }

    /// Overlay an optional file; `None` is a no-op
    pub fn load_optional(self, path: Option<&Path>) -> crate::Result<Self> {
        match path {
            Some(path) => self.load_file(path),
            None => Ok(self),
        }
    }

    /// Overlay a single JSON value
    pub fn merge(mut self, overlay: serde_json::Value) -> crate::Result<Self> {
        merge_configs(&mut self.config, overlay)?;
        Ok(self)
    }

    pub fn build(self) -> T {
        self.config
    }
}

impl<T> Default for ConfigBuilder<T>
where
    T: Default + Serialize + for<'de> Deserialize<'de>,
{
    fn default() -> Self {
        Self::new()
    }
}
