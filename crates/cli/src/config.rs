// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Client configuration management.
//!
//! Configuration is stored in `<data-dir>/config.toml` and includes:
//! - `remote_url`: WebSocket URL of the seasync-remote server
//! - `user_id`: Optional reporter id attached to new reports
//! - timeouts for connecting, requests, and reachability probes
//!
//! A missing file means defaults. The data directory also holds the local
//! store database.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{Error, Result};
use crate::remote::WebSocketConfig;

const DATA_DIR_NAME: &str = "seasync";
const CONFIG_FILE_NAME: &str = "config.toml";
const DB_FILE_NAME: &str = "seasync.db";

/// Client configuration stored in `<data-dir>/config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// WebSocket URL of the remote server (default: `ws://localhost:7890`).
    #[serde(default = "default_remote_url")]
    pub remote_url: String,
    /// Reporter id attached to new reports unless overridden.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    /// Max time to wait for one request's response in seconds (default: 10).
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Max time to establish a connection in seconds (default: 2).
    /// Also bounds each reachability probe.
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
    /// Interval between reachability probes in `watch` mode (default: 15).
    #[serde(default = "default_probe_interval_secs")]
    pub probe_interval_secs: u64,
}

fn default_remote_url() -> String {
    "ws://localhost:7890".to_string()
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_connect_timeout_secs() -> u64 {
    2
}

fn default_probe_interval_secs() -> u64 {
    15
}

impl Default for Config {
    fn default() -> Self {
        Config {
            remote_url: default_remote_url(),
            user_id: None,
            request_timeout_secs: default_request_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
            probe_interval_secs: default_probe_interval_secs(),
        }
    }
}

impl Config {
    /// Loads configuration from the data directory, or defaults if the file
    /// does not exist.
    pub fn load(data_dir: &Path) -> Result<Self> {
        let config_path = data_dir.join(CONFIG_FILE_NAME);
        if !config_path.exists() {
            return Ok(Config::default());
        }
        let content = fs::read_to_string(&config_path)
            .map_err(|e| Error::Config(format!("failed to read config: {}", e)))?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Saves configuration to the data directory.
    pub fn save(&self, data_dir: &Path) -> Result<()> {
        fs::create_dir_all(data_dir)?;
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("failed to serialize config: {}", e)))?;
        fs::write(data_dir.join(CONFIG_FILE_NAME), content)?;
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if !self.remote_url.starts_with("ws://") && !self.remote_url.starts_with("wss://") {
            return Err(Error::Config(format!(
                "remote_url must start with ws:// or wss://, got '{}'",
                self.remote_url
            )));
        }
        if self.request_timeout_secs == 0 || self.connect_timeout_secs == 0 {
            return Err(Error::Config("timeouts must be at least 1 second".to_string()));
        }
        Ok(())
    }

    /// Backend settings derived from this config.
    pub fn websocket_config(&self) -> WebSocketConfig {
        WebSocketConfig {
            url: self.remote_url.clone(),
            connect_timeout: self.connect_timeout(),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
        }
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn probe_interval(&self) -> Duration {
        Duration::from_secs(self.probe_interval_secs.max(1))
    }
}

/// Resolve the data directory: an explicit path, else the platform data
/// directory.
pub fn resolve_data_dir(explicit: Option<PathBuf>) -> Result<PathBuf> {
    match explicit {
        Some(dir) => Ok(dir),
        None => dirs::data_dir()
            .map(|dir| dir.join(DATA_DIR_NAME))
            .ok_or_else(|| Error::Config("could not determine a data directory".to_string())),
    }
}

/// Path of the local store database.
pub fn db_path(data_dir: &Path) -> PathBuf {
    data_dir.join(DB_FILE_NAME)
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
