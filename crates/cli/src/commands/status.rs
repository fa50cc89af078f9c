// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use super::Context;
use crate::cli::OutputFormat;
use crate::error::Result;

pub async fn run(ctx: &Context, output: OutputFormat) -> Result<()> {
    let store = ctx.open_store().await?;
    let online = ctx.probe().await.is_online();
    let snapshot = store.snapshot();

    match output {
        OutputFormat::Text => {
            println!("remote: {}", ctx.config.remote_url);
            println!("online: {}", if online { "yes" } else { "no" });
            println!("queued: {}", snapshot.queue.len());
            println!("reports: {}", snapshot.reports.len());
        }
        OutputFormat::Json => {
            let output = serde_json::json!({
                "remote": ctx.config.remote_url,
                "online": online,
                "queued": snapshot.queue.len(),
                "reports": snapshot.reports.len(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }
    Ok(())
}
