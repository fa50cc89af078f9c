// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

pub mod add;
pub mod list;
pub mod seed;
pub mod status;
pub mod sync;
pub mod watch;

use std::path::PathBuf;
use std::sync::Arc;

use crate::config::{db_path, resolve_data_dir, Config};
use crate::connectivity::{probe, probe_target, NetworkState};
use crate::error::Result;
use crate::remote::WebSocketBackend;
use crate::reports::ReportStore;
use crate::store::SqliteStore;

/// Resolved settings shared by every command.
pub struct Context {
    pub data_dir: PathBuf,
    pub config: Config,
}

impl Context {
    /// Resolve the data directory and load its config, applying a remote URL
    /// given on the command line.
    pub fn load(data_dir: Option<PathBuf>, remote: Option<String>) -> Result<Self> {
        let data_dir = resolve_data_dir(data_dir)?;
        let mut config = Config::load(&data_dir)?;
        if let Some(url) = remote {
            config.remote_url = url;
        }
        Ok(Context { data_dir, config })
    }

    /// Open the local store and run the report store startup sequence.
    pub async fn open_store(&self) -> Result<ReportStore> {
        let local = Arc::new(SqliteStore::open(&db_path(&self.data_dir))?);
        let remote = Arc::new(WebSocketBackend::new(self.config.websocket_config()));
        Ok(ReportStore::open(remote, local).await)
    }

    /// Check once whether the remote server is reachable.
    pub async fn probe(&self) -> NetworkState {
        match probe_target(&self.config.remote_url) {
            Some(target) => probe(&target, self.config.connect_timeout()).await,
            None => NetworkState::offline(),
        }
    }
}
