use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::warn;

pub const DEFAULT_BASE_URL: &str = "https://control.marcelmacedo.com";
pub const DEFAULT_AGENT_ID: &str = "k1234567890";
pub const DEFAULT_CONFIG_PATH: &str = "/etc/mission-control/agent.toml";

pub const BASE_URL_ENV: &str = "MISSION_CONTROL_URL";
pub const AGENT_ID_ENV: &str = "MISSION_CONTROL_AGENT_ID";

/// Where to report and on whose behalf
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub base_url: String,
    pub agent_id: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            agent_id: DEFAULT_AGENT_ID.to_string(),
        }
    }
}

impl ClientConfig {
    pub async fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = tokio::fs::read_to_string(path).await?;
        let config: ClientConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load from `path`, falling back to the built-in defaults when the file
    /// is missing or malformed
    pub async fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();

        match Self::load(path).await {
            Ok(config) => config,
            Err(e) => {
                if path.exists() {
                    warn!("Failed to load config from {:?}: {}", path, e);
                }
                Self::default()
            }
        }
    }

    /// Override fields from `MISSION_CONTROL_URL` / `MISSION_CONTROL_AGENT_ID`
    pub fn apply_env(self) -> Self {
        self.apply_overrides(
            std::env::var(BASE_URL_ENV).ok(),
            std::env::var(AGENT_ID_ENV).ok(),
        )
    }

    /// Replace fields with any non-empty override
    pub fn apply_overrides(mut self, base_url: Option<String>, agent_id: Option<String>) -> Self {
        if let Some(base_url) = base_url.filter(|v| !v.is_empty()) {
            self.base_url = base_url;
        }
        if let Some(agent_id) = agent_id.filter(|v| !v.is_empty()) {
            self.agent_id = agent_id;
        }
        self
    }
}
