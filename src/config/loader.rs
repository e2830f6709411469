//! Layered configuration loading.
//!
//! Precedence, highest first:
//! 1. server-only environment variables (`N8N_WEBHOOK_URL`, `N8N_AUTH_KEY`)
//! 2. public environment variables (`NEXT_PUBLIC_N8N_WEBHOOK_URL`, `NEXT_PUBLIC_N8N_AUTH_KEY`)
//! 3. an optional YAML file (`FLEXAI_CONFIG` or [`ConfigLoader::with_file`])
//! 4. the OS keyring, for the auth key only, when enabled

use super::{non_empty, WebhookConfig};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, warn};

pub const WEBHOOK_URL_ENV: &str = "N8N_WEBHOOK_URL";
pub const PUBLIC_WEBHOOK_URL_ENV: &str = "NEXT_PUBLIC_N8N_WEBHOOK_URL";
pub const AUTH_KEY_ENV: &str = "N8N_AUTH_KEY";
pub const PUBLIC_AUTH_KEY_ENV: &str = "NEXT_PUBLIC_N8N_AUTH_KEY";
pub const TIMEOUT_ENV: &str = "N8N_TIMEOUT_SECS";
pub const CONFIG_FILE_ENV: &str = "FLEXAI_CONFIG";

pub const KEYRING_SERVICE: &str = "flexai";
pub const KEYRING_USER: &str = "n8n_auth_key";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

/// On-disk shape of the optional YAML file.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FileConfig {
    webhook_url: Option<String>,
    auth_key: Option<String>,
    timeout_secs: Option<u64>,
}

type EnvLookup = Box<dyn Fn(&str) -> Option<String> + Send + Sync>;

pub struct ConfigLoader {
    env: EnvLookup,
    file: Option<PathBuf>,
    keyring: bool,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self {
            env: Box::new(|name| std::env::var(name).ok()),
            file: None,
            keyring: false,
        }
    }

    /// Replace the environment lookup (tests, embedding hosts with their own settings).
    pub fn with_env<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        self.env = Box::new(lookup);
        self
    }

    /// Read this YAML file instead of the one named by `FLEXAI_CONFIG`.
    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.file = Some(path.into());
        self
    }

    /// Fall back to the OS keyring for the auth key.
    pub fn with_keyring(mut self, enable: bool) -> Self {
        self.keyring = enable;
        self
    }

    /// Environment only. Never fails.
    pub fn load_env(&self) -> WebhookConfig {
        self.merge(FileConfig::default())
    }

    /// All enabled sources. Fails only when a config file is named but unreadable or malformed.
    pub fn load(&self) -> Result<WebhookConfig, ConfigError> {
        let file = match self.file_path() {
            Some(path) => read_file(&path)?,
            None => FileConfig::default(),
        };
        let mut config = self.merge(file);

        if config.auth_key.is_none() && self.keyring {
            config.auth_key = keyring_auth_key();
        }

        Ok(config)
    }

    fn file_path(&self) -> Option<PathBuf> {
        self.file
            .clone()
            .or_else(|| self.var(CONFIG_FILE_ENV).map(PathBuf::from))
    }

    fn merge(&self, file: FileConfig) -> WebhookConfig {
        let webhook_url = self
            .var(WEBHOOK_URL_ENV)
            .or_else(|| self.var(PUBLIC_WEBHOOK_URL_ENV))
            .or_else(|| file.webhook_url.and_then(non_empty));
        let auth_key = self
            .var(AUTH_KEY_ENV)
            .or_else(|| self.var(PUBLIC_AUTH_KEY_ENV))
            .or_else(|| file.auth_key.and_then(non_empty));
        let timeout = self
            .var(TIMEOUT_ENV)
            .and_then(|raw| match raw.trim().parse::<u64>() {
                Ok(secs) => Some(secs),
                Err(_) => {
                    warn!(value = %raw, "ignoring invalid {}", TIMEOUT_ENV);
                    None
                }
            })
            .or(file.timeout_secs)
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs);

        WebhookConfig {
            webhook_url,
            auth_key,
            timeout,
        }
    }

    fn var(&self, name: &str) -> Option<String> {
        (self.env)(name).and_then(non_empty)
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

fn read_file(path: &Path) -> Result<FileConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), "loaded config file");
    serde_yaml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn keyring_auth_key() -> Option<String> {
    let entry = keyring::Entry::new(KEYRING_SERVICE, KEYRING_USER).ok()?;
    match entry.get_password() {
        Ok(key) => non_empty(key),
        Err(e) => {
            debug!(error = %e, "no auth key in keyring");
            None
        }
    }
}
