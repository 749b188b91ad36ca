//! Client configuration.
//!
//! Settings are read from `config.toml` in the platform config directory
//! (`~/.config/lockopener/config.toml` on Linux) and layered:
//! file → environment → CLI.
//!
//! # Configuration File Format
//!
//! ```toml
//! [api]
//! url = "http://localhost:3001/api"
//! timeout_secs = 15
//!
//! [polling]
//! interval_secs = 30
//! admin_refresh_secs = 30
//! prune_on_bad_request = false
//!
//! [ui]
//! lang = "pl"
//! default_city = "Kraków"
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::forms::DEFAULT_CITY;
use crate::i18n::Lang;
use crate::poller::PrunePolicy;

pub const DEFAULT_API_URL: &str = "http://localhost:3001/api";
/// Hosted production backend.
pub const PRODUCTION_API_URL: &str = "https://lockopener-1ab529db3409.herokuapp.com/api";

/// Environment variables consulted for the API URL, highest priority first.
/// `VITE_API_URL` is what the web client's `.env` files already define.
pub const API_URL_ENV_VARS: &[&str] = &["LOCKOPENER_API_URL", "VITE_API_URL"];

const APP_DIR: &str = "lockopener";

/// Backend connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiSection {
    #[serde(default = "default_api_url")]
    pub url: String,
    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    15
}

impl Default for ApiSection {
    fn default() -> Self {
        Self {
            url: default_api_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Background refresh settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollingSection {
    /// Seconds between status sweeps of tracked orders
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
    /// Seconds between admin board reloads in watch mode
    #[serde(default = "default_interval_secs")]
    pub admin_refresh_secs: u64,
    /// Drop tracked orders whose lookup fails with HTTP 400
    #[serde(default)]
    pub prune_on_bad_request: bool,
}

fn default_interval_secs() -> u64 {
    30
}

impl Default for PollingSection {
    fn default() -> Self {
        Self {
            interval_secs: default_interval_secs(),
            admin_refresh_secs: default_interval_secs(),
            prune_on_bad_request: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiSection {
    #[serde(default)]
    pub lang: Lang,
    /// City prefilled in order forms
    #[serde(default = "default_city")]
    pub default_city: String,
}

fn default_city() -> String {
    DEFAULT_CITY.to_string()
}

impl Default for UiSection {
    fn default() -> Self {
        Self {
            lang: Lang::default(),
            default_city: default_city(),
        }
    }
}

/// Parsed `config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LockopenerToml {
    #[serde(default)]
    pub api: ApiSection,
    #[serde(default)]
    pub polling: PollingSection,
    #[serde(default)]
    pub ui: UiSection,
}

impl LockopenerToml {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::parse(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse config.toml")
    }

    /// Returns default configuration if the file doesn't exist.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to a TOML file, creating its directory.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        let content = toml::to_string_pretty(self).context("Failed to serialize config.toml")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        Ok(())
    }

    /// API URL from the first set environment variable, else the file value.
    pub fn api_url_with_env(&self, env: impl Fn(&str) -> Option<String>) -> String {
        API_URL_ENV_VARS
            .iter()
            .find_map(|name| env(name).filter(|v| !v.trim().is_empty()))
            .unwrap_or_else(|| self.api.url.clone())
    }

    /// Validate the configuration and return any warnings.
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if !self.api.url.starts_with("http://") && !self.api.url.starts_with("https://") {
            warnings.push(format!(
                "Invalid api.url '{}': should start with http:// or https://",
                self.api.url
            ));
        }
        if self.api.timeout_secs == 0 {
            warnings.push("api.timeout_secs is 0; every request would time out".to_string());
        }
        if self.polling.interval_secs == 0 {
            warnings.push("polling.interval_secs is 0; using 1 second".to_string());
        }
        if self.polling.admin_refresh_secs == 0 {
            warnings.push("polling.admin_refresh_secs is 0; using 1 second".to_string());
        }
        if self.ui.default_city.trim().is_empty() {
            warnings.push("ui.default_city is empty".to_string());
        }

        warnings
    }
}

/// Default location of `config.toml`.
pub fn default_config_path() -> Result<PathBuf> {
    let dir = dirs::config_dir().context("Could not determine the user config directory")?;
    Ok(dir.join(APP_DIR).join("config.toml"))
}

/// Default directory for local storage (tracked orders, cached credentials).
pub fn default_data_dir() -> Result<PathBuf> {
    let dir = dirs::data_dir().context("Could not determine the user data directory")?;
    Ok(dir.join(APP_DIR))
}

/// Effective configuration for one CLI invocation.
///
/// It merges settings from:
/// 1. config.toml
/// 2. Environment variables
/// 3. CLI arguments
#[derive(Debug, Clone)]
pub struct LockopenerConfig {
    pub config_path: PathBuf,
    pub data_dir: PathBuf,
    pub toml: LockopenerToml,
    /// CLI override: API base URL
    pub cli_api_url: Option<String>,
    /// CLI override: message language
    pub cli_lang: Option<Lang>,
    /// CLI override: skip confirmation prompts
    pub yes: bool,
}

impl LockopenerConfig {
    /// Load from `config_path` (or the default location) without CLI overrides.
    pub fn new(config_path: Option<PathBuf>, data_dir: Option<PathBuf>) -> Result<Self> {
        let config_path = match config_path {
            Some(path) => path,
            None => default_config_path()?,
        };
        let data_dir = match data_dir {
            Some(dir) => dir,
            None => default_data_dir()?,
        };
        let toml = LockopenerToml::load_or_default(&config_path)?;
        Ok(Self {
            config_path,
            data_dir,
            toml,
            cli_api_url: None,
            cli_lang: None,
            yes: false,
        })
    }

    /// API base URL (CLI → env → file → default).
    pub fn api_url(&self) -> String {
        self.api_url_with_env(|name| std::env::var(name).ok())
    }

    pub fn api_url_with_env(&self, env: impl Fn(&str) -> Option<String>) -> String {
        self.cli_api_url
            .clone()
            .unwrap_or_else(|| self.toml.api_url_with_env(env))
    }

    pub fn lang(&self) -> Lang {
        self.cli_lang.unwrap_or(self.toml.ui.lang)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.toml.api.timeout_secs.max(1))
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.toml.polling.interval_secs.max(1))
    }

    pub fn admin_refresh(&self) -> Duration {
        Duration::from_secs(self.toml.polling.admin_refresh_secs.max(1))
    }

    pub fn prune_policy(&self) -> PrunePolicy {
        PrunePolicy {
            prune_on_bad_request: self.toml.polling.prune_on_bad_request,
        }
    }

    pub fn default_city(&self) -> &str {
        &self.toml.ui.default_city
    }

    /// Path of the local key/value store.
    pub fn storage_file(&self) -> PathBuf {
        self.data_dir.join("storage.json")
    }

    /// Validate configuration and return warnings.
    pub fn validate(&self) -> Vec<String> {
        self.toml.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_parse_empty_uses_defaults() {
        let toml = LockopenerToml::parse("").unwrap();
        assert_eq!(toml.api.url, DEFAULT_API_URL);
        assert_eq!(toml.api.timeout_secs, 15);
        assert_eq!(toml.polling.interval_secs, 30);
        assert_eq!(toml.polling.admin_refresh_secs, 30);
        assert!(!toml.polling.prune_on_bad_request);
        assert_eq!(toml.ui.lang, Lang::Pl);
        assert_eq!(toml.ui.default_city, "Kraków");
    }

    #[test]
    fn test_parse_full() {
        let content = r#"
[api]
url = "https://lockopener-1ab529db3409.herokuapp.com/api"
timeout_secs = 5

[polling]
interval_secs = 10
prune_on_bad_request = true

[ui]
lang = "en"
default_city = "Warszawa"
"#;
        let toml = LockopenerToml::parse(content).unwrap();
        assert_eq!(toml.api.url, PRODUCTION_API_URL);
        assert_eq!(toml.api.timeout_secs, 5);
        assert_eq!(toml.polling.interval_secs, 10);
        assert_eq!(toml.polling.admin_refresh_secs, 30);
        assert!(toml.polling.prune_on_bad_request);
        assert_eq!(toml.ui.lang, Lang::En);
        assert_eq!(toml.ui.default_city, "Warszawa");
    }

    #[test]
    fn test_parse_rejects_unknown_lang() {
        assert!(LockopenerToml::parse("[ui]\nlang = \"de\"\n").is_err());
    }

    #[test]
    fn test_validate() {
        assert!(LockopenerToml::default().validate().is_empty());

        let mut toml = LockopenerToml::default();
        toml.api.url = "localhost:3001".into();
        toml.polling.interval_secs = 0;
        let warnings = toml.validate();
        assert_eq!(warnings.len(), 2);
        assert!(warnings[0].contains("api.url"));
    }

    #[test]
    fn test_load_and_save() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested/config.toml");

        let mut toml = LockopenerToml::default();
        toml.polling.interval_secs = 45;
        toml.ui.lang = Lang::En;
        toml.save(&path).unwrap();

        let loaded = LockopenerToml::load(&path).unwrap();
        assert_eq!(loaded.polling.interval_secs, 45);
        assert_eq!(loaded.ui.lang, Lang::En);
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let dir = tempdir().unwrap();
        let toml = LockopenerToml::load_or_default(&dir.path().join("config.toml")).unwrap();
        assert_eq!(toml.api.url, DEFAULT_API_URL);
    }

    #[test]
    fn test_api_url_layering() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[api]\nurl = \"http://file/api\"\n").unwrap();
        let mut config = LockopenerConfig::new(Some(path), Some(dir.path().to_path_buf())).unwrap();

        assert_eq!(config.api_url_with_env(no_env), "http://file/api");

        let vite = |name: &str| (name == "VITE_API_URL").then(|| "http://vite/api".to_string());
        assert_eq!(config.api_url_with_env(vite), "http://vite/api");

        let both = |name: &str| match name {
            "LOCKOPENER_API_URL" => Some("http://own/api".to_string()),
            "VITE_API_URL" => Some("http://vite/api".to_string()),
            _ => None,
        };
        assert_eq!(config.api_url_with_env(both), "http://own/api");

        config.cli_api_url = Some("http://cli/api".into());
        assert_eq!(config.api_url_with_env(both), "http://cli/api");
    }

    #[test]
    fn test_cli_overrides_and_paths() {
        let dir = tempdir().unwrap();
        let mut config = LockopenerConfig::new(
            Some(dir.path().join("config.toml")),
            Some(dir.path().join("data")),
        )
        .unwrap();
        assert_eq!(config.lang(), Lang::Pl);
        config.cli_lang = Some(Lang::En);
        assert_eq!(config.lang(), Lang::En);
        assert!(config.storage_file().ends_with("data/storage.json"));
        assert_eq!(config.poll_interval(), Duration::from_secs(30));
    }

    #[test]
    fn test_zero_intervals_clamp_to_one_second() {
        let dir = tempdir().unwrap();
        let mut config =
            LockopenerConfig::new(Some(dir.path().join("c.toml")), Some(dir.path().into())).unwrap();
        config.toml.polling.interval_secs = 0;
        assert_eq!(config.poll_interval(), Duration::from_secs(1));
    }
}
