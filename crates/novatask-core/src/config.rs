use anyhow::Context;
use serde::Deserialize;
use tracing::debug;

use crate::persist::STATE_STORAGE_KEY;

pub const DEFAULT_SUGGESTION_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_SUGGESTION_MODEL: &str = "gemini-3-flash-preview";

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub storage: StorageConfig,
    pub suggestions: SuggestionSettings,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct StorageConfig {
    pub key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            key: STATE_STORAGE_KEY.to_string(),
        }
    }
}

#[derive(Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SuggestionSettings {
    pub endpoint: String,
    pub model: String,
    pub api_key: Option<String>,
    pub min_tasks: u32,
    pub max_tasks: u32,
}

impl Default for SuggestionSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_SUGGESTION_ENDPOINT.to_string(),
            model: DEFAULT_SUGGESTION_MODEL.to_string(),
            api_key: None,
            min_tasks: 5,
            max_tasks: 8,
        }
    }
}

// Keeps the credential out of logs.
impl std::fmt::Debug for SuggestionSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SuggestionSettings")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .field("min_tasks", &self.min_tasks)
            .field("max_tasks", &self.max_tasks)
            .finish()
    }
}

impl SuggestionSettings {
    pub fn endpoint_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.endpoint.trim_end_matches('/'),
            self.model
        )
    }
}

impl Config {
    #[tracing::instrument(skip(raw))]
    pub fn from_toml_str(raw: &str) -> anyhow::Result<Self> {
        let mut cfg: Config = toml::from_str(raw).context("failed parsing NovaTask config")?;
        if cfg.storage.key.trim().is_empty() {
            cfg.storage.key = STATE_STORAGE_KEY.to_string();
        }
        if cfg.suggestions.min_tasks > cfg.suggestions.max_tasks {
            std::mem::swap(
                &mut cfg.suggestions.min_tasks,
                &mut cfg.suggestions.max_tasks,
            );
        }
        debug!(config = ?cfg, "parsed config");
        Ok(cfg)
    }

    /// Overlays an externally supplied credential (the `API_KEY` environment value).
    /// Blank values are ignored.
    pub fn with_api_key(mut self, api_key: Option<&str>) -> Self {
        if let Some(key) = api_key.map(str::trim).filter(|key| !key.is_empty()) {
            self.suggestions.api_key = Some(key.to_string());
        }
        self
    }
}
