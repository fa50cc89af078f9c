// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! seasync - offline-first sync engine for marine pollution reports.
//!
//! This crate provides the client side of SeaSync: reports are submitted to a
//! remote backend when it is reachable and kept in a persistent on-device
//! queue otherwise.
//!
//! # Main Components
//!
//! - [`ReportStore`] - Facade a user interface talks to
//! - [`SyncEngine`] - Queueing, draining, and fetching
//! - [`store`] - Local persistence ([`SqliteStore`](store::SqliteStore))
//! - [`remote`] - Remote backends ([`WebSocketBackend`](remote::WebSocketBackend))
//! - [`connectivity`] - Network state observers
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use seasync::remote::{WebSocketBackend, WebSocketConfig};
//! use seasync::store::SqliteStore;
//! use seasync::ReportStore;
//!
//! let remote = Arc::new(WebSocketBackend::new(WebSocketConfig::default()));
//! let local = Arc::new(SqliteStore::open(&db_path)?);
//! let reports = ReportStore::open(remote, local).await;
//! let subscription = reports.watch_connectivity(&monitor);
//! reports.add_report(draft).await?;
//! subscription.unsubscribe().await;
//! ```

mod cli;
mod commands;

pub mod config;
pub mod connectivity;
pub mod engine;
pub mod error;
pub mod remote;
pub mod reports;
pub mod seed;
pub mod store;

#[cfg(test)]
mod test_helpers;

pub use cli::{Cli, Command, OutputFormat};
pub use config::Config;
pub use engine::{DrainOutcome, Submission, SyncEngine};
pub use error::{Error, Result};
pub use reports::{ReportStore, StoreSnapshot};

use commands::add::AddArgs;
use commands::Context;

/// Execute a CLI command. This is the main entry point for library users
/// and provides a testable way to run commands without process execution.
pub async fn run(cli: Cli) -> Result<()> {
    let ctx = Context::load(cli.data_dir, cli.remote)?;
    tracing::debug!("Data directory: {}", ctx.data_dir.display());

    match cli.command {
        Command::Add {
            pollution_type,
            description,
            lat,
            lon,
            severity,
            photo,
            user,
            output,
        } => {
            let args = AddArgs {
                pollution_type,
                description,
                lat,
                lon,
                severity,
                photo,
                user,
                output,
            };
            commands::add::run(&ctx, args).await
        }
        Command::List { output } => commands::list::run(&ctx, output).await,
        Command::Status { output } => commands::status::run(&ctx, output).await,
        Command::Sync => commands::sync::run(&ctx).await,
        Command::Refresh => commands::sync::refresh(&ctx).await,
        Command::Seed => commands::seed::run(&ctx).await,
        Command::Watch => commands::watch::run(&ctx).await,
    }
}
