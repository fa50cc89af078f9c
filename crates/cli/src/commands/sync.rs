// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use super::Context;
use crate::engine::DrainOutcome;
use crate::error::Result;

/// Submit queued reports now.
pub async fn run(ctx: &Context) -> Result<()> {
    let store = ctx.open_store().await?;

    // Coming online drains on its own; otherwise try anyway.
    let outcome = match store.update_connectivity(ctx.probe().await).await {
        Some(outcome) => outcome,
        None => store.force_sync().await,
    };

    println!("{}", describe_outcome(outcome));
    let remaining = store.snapshot().queue.len();
    if remaining > 0 {
        println!("{} reports remain queued", remaining);
    }
    Ok(())
}

/// Re-fetch reports from the server.
pub async fn refresh(ctx: &Context) -> Result<()> {
    let store = ctx.open_store().await?;
    let count = store.refresh().await?;
    println!("Fetched {} reports", count);
    Ok(())
}

pub(crate) fn describe_outcome(outcome: DrainOutcome) -> String {
    match outcome {
        DrainOutcome::AlreadyRunning => "Sync already in progress".to_string(),
        DrainOutcome::Empty => "Nothing to sync".to_string(),
        DrainOutcome::Completed { synced, failed: 0 } => format!("Synced {} reports", synced),
        DrainOutcome::Completed { synced, failed } => {
            format!("Synced {} reports, {} failed", synced, failed)
        }
    }
}

#[cfg(test)]
#[path = "sync_tests.rs"]
mod tests;
