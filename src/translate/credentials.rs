use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

use crate::config::TranslateConfig;
use crate::error::{BisubError, Result};

/// Translate API credentials.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub app_id: String,
    pub app_key: String,
}

impl Credentials {
    /// Config-file credentials win; otherwise fall back to the user-home
    /// cache file.
    pub fn resolve(config: &TranslateConfig) -> Result<Self> {
        if let (Some(app_id), Some(app_key)) = (&config.app_id, &config.app_key) {
            return Ok(Self {
                app_id: app_id.clone(),
                app_key: app_key.clone(),
            });
        }

        if let Some(cached) = Self::load_cached()? {
            return Ok(cached);
        }

        Err(BisubError::Config(
            "translation credentials missing: set translate.app_id and translate.app_key, \
             or cache them with the credentials command"
                .to_string(),
        ))
    }

    pub fn cache_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".bisub").join("credentials.json"))
    }

    pub fn load_cached() -> Result<Option<Self>> {
        let Some(path) = Self::cache_path() else {
            return Ok(None);
        };
        if !path.exists() {
            return Ok(None);
        }

        debug!("Loading cached credentials from {}", path.display());
        let content = std::fs::read_to_string(&path)?;
        Ok(Some(serde_json::from_str(&content)?))
    }

    pub fn save_cached(&self) -> Result<()> {
        let Some(path) = Self::cache_path() else {
            return Err(BisubError::Config(
                "cannot locate the home directory".to_string(),
            ));
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}
