// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use super::Context;
use crate::connectivity::{probe_target, ReachabilityProbe};
use crate::error::{Error, Result};

/// Probe the server until interrupted, draining the queue each time it
/// becomes reachable.
pub async fn run(ctx: &Context) -> Result<()> {
    let target = probe_target(&ctx.config.remote_url)
        .ok_or_else(|| Error::Config(format!("invalid remote url: {}", ctx.config.remote_url)))?;

    let store = ctx.open_store().await?;
    let probe = ReachabilityProbe::start(
        target,
        ctx.config.probe_interval(),
        ctx.config.connect_timeout(),
    );
    let subscription = store.watch_connectivity(&probe);

    println!(
        "Watching {} ({} reports queued, Ctrl-C to stop)",
        ctx.config.remote_url,
        store.snapshot().queue.len()
    );

    let result = tokio::signal::ctrl_c().await;
    subscription.unsubscribe().await;
    drop(probe);
    result?;

    println!("Stopped, {} reports queued", store.snapshot().queue.len());
    Ok(())
}
