use crate::error::{ReporterError, Result};
use serde::Deserialize;
use std::path::Path;

pub const HELIX_URL: &str = "HELIX_URL";
pub const HELIX_API_KEY: &str = "HELIX_API_KEY";
pub const APP_ID: &str = "APP_ID";

/// Helix connection settings as loaded at startup. Nothing is required yet:
/// a dry run or an empty cluster never needs them.
#[derive(Debug, Default, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct HelixSettings {
    pub helix_url: Option<String>,
    pub helix_api_key: Option<String>,
    pub app_id: Option<String>,
}

/// Validated settings, ready to talk to Helix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelixConfig {
    /// Without trailing slashes.
    pub base_url: String,
    pub api_key: String,
    pub app_id: String,
}

impl HelixSettings {
    /// Optional YAML file first, then the process environment on top.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let settings = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        Ok(settings.with_overrides(|key| std::env::var(key).ok()))
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let config_error = |message: String| ReporterError::ConfigFile {
            path: path.to_path_buf(),
            message,
        };
        let contents = std::fs::read_to_string(path).map_err(|e| config_error(e.to_string()))?;
        serde_yaml::from_str(&contents).map_err(|e| config_error(e.to_string()))
    }

    /// Replace values with the ones `lookup` returns for the Helix variables.
    /// Blank lookups leave the current value alone.
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let fields = [
            (HELIX_URL, &mut self.helix_url),
            (HELIX_API_KEY, &mut self.helix_api_key),
            (APP_ID, &mut self.app_id),
        ];
        for (key, field) in fields {
            if let Some(value) = lookup(key).filter(|v| !v.trim().is_empty()) {
                *field = Some(value);
            }
        }
        self
    }

    /// Fails with the names of every missing variable, in a fixed order.
    pub fn validate(&self) -> Result<HelixConfig> {
        fn present(value: &Option<String>) -> Option<&str> {
            value.as_deref().map(str::trim).filter(|v| !v.is_empty())
        }

        let url = present(&self.helix_url);
        let api_key = present(&self.helix_api_key);
        let app_id = present(&self.app_id);

        match (url, api_key, app_id) {
            (Some(url), Some(api_key), Some(app_id)) => Ok(HelixConfig {
                base_url: url.trim_end_matches('/').to_string(),
                api_key: api_key.to_string(),
                app_id: app_id.to_string(),
            }),
            _ => {
                let missing = [(HELIX_URL, url), (HELIX_API_KEY, api_key), (APP_ID, app_id)]
                    .into_iter()
                    .filter(|(_, value)| value.is_none())
                    .map(|(name, _)| name)
                    .collect();
                Err(ReporterError::Configuration { missing })
            }
        }
    }
}
