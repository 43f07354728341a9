use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

use crate::{model::WeatherQuery, render::RenderMode};

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// endpoint = "http://api.openweathermap.org/data/2.5"
/// zip = "10012"
/// country = "us"
/// render_mode = "raw"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Weather API base; `/weather` is appended.
    pub endpoint: String,
    pub zip: String,
    pub country: String,

    /// Sent as `appid` when present. Nothing is sent by default.
    pub api_key: Option<String>,

    /// No timeout is applied when unset.
    pub timeout_secs: Option<u64>,

    pub render_mode: RenderMode,
}

impl Default for Config {
    fn default() -> Self {
        let query = WeatherQuery::default();
        Self {
            endpoint: "http://api.openweathermap.org/data/2.5".to_string(),
            zip: query.zip,
            country: query.country,
            api_key: None,
            timeout_secs: None,
            render_mode: RenderMode::default(),
        }
    }
}

impl Config {
    pub fn query(&self) -> WeatherQuery {
        WeatherQuery::new(self.zip.clone(), self.country.clone())
    }

    /// Load config from disk, or return defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weatherbox", "weatherbox")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn set_api_key(&mut self, api_key: String) {
        self.api_key = Some(api_key);
    }

    pub fn clear_api_key(&mut self) {
        self.api_key = None;
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("weatherbox-config-test-{}-{name}", std::process::id()))
            .join("config.toml")
    }

    #[test]
    fn defaults_match_fixed_query() {
        let cfg = Config::default();

        assert_eq!(cfg.query().zip_param(), "10012,us");
        assert_eq!(cfg.endpoint, "http://api.openweathermap.org/data/2.5");
        assert!(!cfg.has_api_key());
        assert_eq!(cfg.timeout_secs, None);
        assert_eq!(cfg.render_mode, RenderMode::Raw);
    }

    #[test]
    fn partial_toml_falls_back_to_defaults() {
        let cfg: Config = toml::from_str("zip = \"94103\"\nrender_mode = \"escaped\"\n")
            .expect("partial config should parse");

        assert_eq!(cfg.query().zip_param(), "94103,us");
        assert_eq!(cfg.render_mode, RenderMode::Escaped);
        assert_eq!(cfg.endpoint, Config::default().endpoint);
    }

    #[test]
    fn api_key_helpers() {
        let mut cfg = Config::default();

        cfg.set_api_key("OPEN_KEY".into());
        assert!(cfg.has_api_key());
        assert_eq!(cfg.api_key.as_deref(), Some("OPEN_KEY"));

        cfg.set_api_key(String::new());
        assert!(!cfg.has_api_key());

        cfg.clear_api_key();
        assert_eq!(cfg.api_key, None);
    }

    #[test]
    fn missing_file_loads_defaults() {
        let cfg = Config::load_from(&scratch_path("missing")).expect("load should succeed");
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn save_then_load_preserves_values() {
        let path = scratch_path("save");
        let mut cfg = Config::default();
        cfg.zip = "60601".into();
        cfg.set_api_key("KEY".into());
        cfg.timeout_secs = Some(10);

        cfg.save_to(&path).expect("save should succeed");
        let loaded = Config::load_from(&path).expect("load should succeed");

        assert_eq!(loaded, cfg);
        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn invalid_toml_reports_path() {
        let path = scratch_path("invalid");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "zip = [").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
        let _ = fs::remove_dir_all(path.parent().unwrap());
    }
}
