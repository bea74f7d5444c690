//! Server context: where the dashboard is mounted

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerContext {
    base_url: String,
}

impl ServerContext {
    /// `base_url` is stored without its trailing slash
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL of an application path such as `/documentation/...`
    pub fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// Icon of a DevOps platform integration
    pub fn alm_icon_url(&self, alm_key: &str) -> String {
        self.url(&format!("/images/alm/{}.svg", alm_key))
    }
}
