use std::env;
use std::fs::{self, File, OpenOptions};
use std::io::{BufReader, ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::error::RollingError;
use crate::locale::Locale;

pub const DEFAULT_API_URL: &str = "https://rolling-api.vercel.app/2-1";
pub const DEFAULT_WEB_URL: &str = "https://rolling.example.com";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub api_base_url: String,
    pub web_base_url: String,
    pub locale: Locale,
    pub message_page_size: u32,
    pub request_timeout_secs: u64,
    pub notification_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_base_url: DEFAULT_API_URL.to_string(),
            web_base_url: DEFAULT_WEB_URL.to_string(),
            locale: Locale::default(),
            message_page_size: 20,
            request_timeout_secs: 10,
            notification_secs: 3,
        }
    }
}

pub fn default_config_path() -> Result<PathBuf, RollingError> {
    Ok(dirs::home_dir()
        .ok_or_else(|| RollingError::Config("Could not find home directory".to_string()))?
        .join(".config/rollingtui/config.json"))
}

/// Log file under `$XDG_CACHE_HOME/rollingtui`, falling back to `~/.cache`.
pub fn log_file_path() -> Result<PathBuf, RollingError> {
    let base_cache_dir = match env::var_os("XDG_CACHE_HOME") {
        Some(dir) => PathBuf::from(dir),
        None => dirs::home_dir()
            .ok_or_else(|| RollingError::Config("Home environment variable not set".to_string()))?
            .join(".cache"),
    };

    let app_cache_dir = base_cache_dir.join("rollingtui");
    fs::create_dir_all(&app_cache_dir)
        .map_err(|e| RollingError::Config(format!("Failed to create cache directory: {}", e)))?;

    Ok(app_cache_dir.join("rollingtui.log"))
}

impl Config {
    pub fn load() -> Result<Self, RollingError> {
        Self::load_from(&default_config_path()?)
    }

    /// Reads the config file, or returns defaults when it does not exist.
    pub fn load_from(config_path: &Path) -> Result<Self, RollingError> {
        let file = match File::open(config_path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::info!("no config at {:?}, using defaults", config_path);
                return Ok(Config::default());
            }
            Err(e) => {
                return Err(RollingError::Config(format!(
                    "Failed to open config file at {:?}: {}",
                    config_path, e
                )))
            }
        };

        let reader = BufReader::new(file);
        let config: Config = serde_json::from_reader(reader)
            .context("Failed to parse config JSON")?;

        Ok(config)
    }

    pub fn save(&self) -> Result<(), RollingError> {
        self.save_to(&default_config_path()?)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<(), RollingError> {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(&self)
            .context("Failed to serialize config to JSON")?;

        let mut file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(config_path)
            .with_context(|| format!("Failed to open conf file for writing at {:?}", config_path))?;

        file.write_all(json.as_bytes())
            .context("Failed to write config data")?;

        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }

    pub fn notification_ttl(&self) -> Duration {
        Duration::from_secs(self.notification_secs.max(1))
    }

    pub fn page_size(&self) -> u32 {
        self.message_page_size.max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("nope.json")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "api_base_url": "http://localhost:8000", "locale": "en" }"#).unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.api_base_url, "http://localhost:8000");
        assert_eq!(config.locale, Locale::En);
        assert_eq!(config.message_page_size, 20);
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/config.json");
        let config = Config {
            web_base_url: "http://localhost:5173".into(),
            notification_secs: 5,
            ..Config::default()
        };
        config.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn broken_json_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn zero_values_are_clamped() {
        let config = Config {
            message_page_size: 0,
            request_timeout_secs: 0,
            ..Config::default()
        };
        assert_eq!(config.page_size(), 1);
        assert_eq!(config.request_timeout(), Duration::from_secs(1));
    }
}
