use crate::FetchError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteConfig {
    /// URL of the JSON manifest document.
    pub manifest_url: String,
    /// Base URL prepended to relative paths in legacy path-array manifests.
    #[serde(default)]
    pub image_base: Option<String>,
    /// Append a time-based query parameter to each fetch.
    #[serde(default)]
    pub cache_bust: bool,
}

impl RemoteConfig {
    pub fn new(manifest_url: &str) -> Self {
        Self {
            manifest_url: manifest_url.trim_end_matches('/').to_owned(),
            image_base: None,
            cache_bust: false,
        }
    }

    #[must_use]
    pub fn with_image_base(mut self, base: &str) -> Self {
        self.image_base = Some(base.trim_end_matches('/').to_owned());
        self
    }

    #[must_use]
    pub fn with_cache_bust(mut self, enabled: bool) -> Self {
        self.cache_bust = enabled;
        self
    }

    /// Load config from `~/.config/mediawall/remote.json`.
    pub fn load_default() -> Result<Self, FetchError> {
        let path = default_config_path()?;
        Self::load(&path)
    }

    pub fn load(path: &Path) -> Result<Self, FetchError> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| FetchError::Config(format!("invalid remote config: {e}")))
    }

    pub fn save(&self, path: &Path) -> Result<(), FetchError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| FetchError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

fn default_config_path() -> Result<PathBuf, FetchError> {
    let home = std::env::var("HOME").map_err(|_| FetchError::Config("HOME not set".to_owned()))?;
    Ok(PathBuf::from(home).join(".config/mediawall/remote.json"))
}
