// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! seasync-remote: document store and blob host for seasync clients.
//!
//! Serves insert, list and blob upload requests over WebSocket, persisting
//! documents in SQLite and blobs on disk.

mod error;
mod server;
#[cfg(test)]
mod server_tests;
mod state;

use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

/// seasync-remote: remote store for pollution reports
#[derive(Parser, Debug)]
#[command(name = "seasync-remote")]
#[command(about = "WebSocket document and blob store for seasync clients")]
struct Args {
    /// Address to bind the server to
    #[arg(short, long, default_value = "0.0.0.0:7890")]
    bind: SocketAddr,

    /// Directory for the document database and blobs
    #[arg(short, long, default_value = ".")]
    data: PathBuf,

    /// Base URL under which uploaded blobs are reachable
    #[arg(long, default_value = "http://localhost:7890")]
    public_url: String,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting seasync-remote server");
    info!("  Bind address: {}", args.bind);
    info!("  Data directory: {}", args.data.display());
    info!("  Public URL: {}", args.public_url);

    let state = state::ServerState::new(&args.data, &args.public_url)?;

    server::run(args.bind, state).await?;

    Ok(())
}
