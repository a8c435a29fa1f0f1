//! Server configuration, read from a RON file at startup.

use std::fs;
use std::io;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use engine_logging::LogSettings;
use giftscan_core::{DEFAULT_LIMIT, DEFAULT_PROFILE_HOST};
use giftscan_engine::{FetchSettings, PipelineSettings};
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const DEFAULT_CONFIG_FILENAME: &str = "giftscan.ron";
const CONFIG_ENV_VAR: &str = "GIFTSCAN_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
}

/// Every field is optional in the file; missing ones take the defaults below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub bind_address: SocketAddr,
    /// JSON object of model name to highest item id.
    pub catalog_path: PathBuf,
    /// JSON array of owner handles to hide. Re-read for every query.
    pub exclusions_path: PathBuf,
    /// Served for any path the API does not handle, when the directory exists.
    pub static_dir: Option<PathBuf>,
    pub remote_base_url: String,
    /// Host of the profile links that identify an item's owner.
    pub profile_host: String,
    pub request_timeout_secs: u64,
    pub max_in_flight: usize,
    pub max_body_bytes: u64,
    pub default_limit: usize,
    pub log_level: String,
    pub log_file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        let fetch = FetchSettings::default();
        Self {
            bind_address: SocketAddr::from(([127, 0, 0, 1], 8000)),
            catalog_path: PathBuf::from("telegram_gift_models.json"),
            exclusions_path: PathBuf::from("excluded_owners.json"),
            static_dir: Some(PathBuf::from("static")),
            remote_base_url: fetch.base_url,
            profile_host: DEFAULT_PROFILE_HOST.to_string(),
            request_timeout_secs: fetch.request_timeout.as_secs(),
            max_in_flight: PipelineSettings::default().max_in_flight,
            max_body_bytes: fetch.max_bytes,
            default_limit: DEFAULT_LIMIT,
            log_level: "info".to_string(),
            log_file: None,
        }
    }
}

impl AppConfig {
    pub fn fetch_settings(&self) -> FetchSettings {
        FetchSettings {
            base_url: self.remote_base_url.clone(),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            max_bytes: self.max_body_bytes,
        }
    }

    pub fn pipeline_settings(&self) -> PipelineSettings {
        PipelineSettings {
            max_in_flight: self.max_in_flight,
        }
    }

    pub fn log_settings(&self) -> LogSettings {
        LogSettings {
            level: Some(
                self.log_level
                    .parse::<LevelFilter>()
                    .unwrap_or(LevelFilter::Info),
            ),
            file: self.log_file.clone(),
        }
    }
}

/// First CLI argument, else `$GIFTSCAN_CONFIG`, else `./giftscan.ron`.
pub fn config_path(cli_arg: Option<PathBuf>) -> PathBuf {
    cli_arg
        .or_else(|| std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILENAME))
}

/// `Ok(None)` when the file does not exist.
pub fn load(path: &Path) -> Result<Option<AppConfig>, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    ron::from_str(&content)
        .map(Some)
        .map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn missing_file_is_not_an_error() {
        let temp = TempDir::new().unwrap();
        let loaded = load(&temp.path().join("giftscan.ron")).unwrap();
        assert_eq!(loaded, None);
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("giftscan.ron");
        fs::write(
            &path,
            r#"(
                bind_address: "0.0.0.0:9000",
                max_in_flight: 25,
                static_dir: None,
            )"#,
        )
        .unwrap();

        let config = load(&path).unwrap().unwrap();
        assert_eq!(config.bind_address, SocketAddr::from(([0, 0, 0, 0], 9000)));
        assert_eq!(config.max_in_flight, 25);
        assert_eq!(config.static_dir, None);
        assert_eq!(config.default_limit, DEFAULT_LIMIT);
        assert_eq!(config.profile_host, "t.me");
        assert_eq!(config.remote_base_url, "https://t.me/nft");
        assert_eq!(config.pipeline_settings().max_in_flight, 25);
        assert_eq!(config.fetch_settings().request_timeout, Duration::from_secs(5));
    }

    #[test]
    fn malformed_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("giftscan.ron");
        fs::write(&path, "(max_in_flight: \"many\")").unwrap();
        assert!(matches!(load(&path), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn cli_argument_wins() {
        let path = config_path(Some(PathBuf::from("/etc/giftscan.ron")));
        assert_eq!(path, PathBuf::from("/etc/giftscan.ron"));
    }

    #[test]
    fn unknown_log_level_falls_back_to_info() {
        let config = AppConfig {
            log_level: "chatty".to_string(),
            ..AppConfig::default()
        };
        assert_eq!(config.log_settings().level, Some(LevelFilter::Info));
    }
}
