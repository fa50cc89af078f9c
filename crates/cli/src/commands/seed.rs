// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use super::Context;
use crate::error::{Error, Result};

/// Add the sample reports unless this installation already has them.
///
/// Opening the store already attempts this on first run; the command
/// retries and reports the outcome.
pub async fn run(ctx: &Context) -> Result<()> {
    let store = ctx.open_store().await?;

    if store.seed_demo_data().await {
        println!("Added sample reports");
        return Ok(());
    }
    if store.is_seeded() {
        println!("Sample reports already added");
        return Ok(());
    }
    Err(Error::Network(format!(
        "could not add sample reports to {}",
        ctx.config.remote_url
    )))
}
