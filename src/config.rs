use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_CONFIG_PATHS: [&str; 2] = ["topwords.config.json", "config/topwords.config.json"];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config JSON in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("timeout_secs must be greater than zero")]
    ZeroTimeout,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_limit")]
    pub limit: usize,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    #[serde(default = "default_follow_frames")]
    pub follow_frames: bool,

    #[serde(default = "default_max_frames")]
    pub max_frames: usize,

    #[serde(default)]
    pub unicode_nfkc: bool,
}

fn default_limit() -> usize {
    crate::rank::DEFAULT_LIMIT
}
fn default_timeout_secs() -> u64 {
    30
}
fn default_user_agent() -> String {
    concat!("topwords/", env!("CARGO_PKG_VERSION")).to_string()
}
fn default_follow_frames() -> bool {
    true
}
fn default_max_frames() -> usize {
    16
}

impl Default for Config {
    fn default() -> Self {
        Config {
            limit: default_limit(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
            follow_frames: default_follow_frames(),
            max_frames: default_max_frames(),
            unicode_nfkc: false,
        }
    }
}

impl Config {
    pub fn from_json(text: &str, path: &Path) -> Result<Config, ConfigError> {
        let config: Config = serde_json::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Config, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Config::from_json(&text, path)
    }

    /// Load the first default config file that exists, or fall back to defaults.
    pub fn discover() -> Result<Config, ConfigError> {
        for p in &DEFAULT_CONFIG_PATHS {
            let path = Path::new(p);
            if path.is_file() {
                return Config::load(path);
            }
        }
        Ok(Config::default())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        Ok(())
    }
}
