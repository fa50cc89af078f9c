// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::fs;
use std::path::PathBuf;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::Utc;
use seasync_core::{validate_draft, PollutionType, ReportDraft, ReportPayload, Severity};

use super::Context;
use crate::cli::OutputFormat;
use crate::engine::Submission;
use crate::error::{Error, Result};

/// Arguments of `seasync add`.
pub struct AddArgs {
    pub pollution_type: PollutionType,
    pub description: String,
    pub lat: f64,
    pub lon: f64,
    pub severity: Option<Severity>,
    pub photo: Option<PathBuf>,
    pub user: Option<String>,
    pub output: OutputFormat,
}

pub async fn run(ctx: &Context, args: AddArgs) -> Result<()> {
    let output = args.output;
    let user = args.user.clone().or_else(|| ctx.config.user_id.clone());
    let draft = build_draft(args, user, Utc::now().timestamp_millis())?;
    // Reject bad input before touching the network
    validate_draft(&draft).map_err(Error::Validation)?;

    let store = ctx.open_store().await?;
    store.update_connectivity(ctx.probe().await).await;

    let submission = store.add_report(draft).await?;
    print_submission(&submission, output)
}

/// Assemble a draft from command-line arguments, reading the photo file.
pub(crate) fn build_draft(args: AddArgs, user: Option<String>, now_ms: i64) -> Result<ReportDraft> {
    let mut payload = ReportPayload::new(
        args.pollution_type,
        args.description.trim(),
        args.lat,
        args.lon,
        now_ms,
    );
    payload.user_id = user;
    payload.severity = args.severity;

    let mut draft = ReportDraft::new(payload);
    if let Some(path) = args.photo {
        let bytes = fs::read(&path)?;
        draft = draft.with_photo(STANDARD.encode(bytes));
    }
    Ok(draft)
}

fn print_submission(submission: &Submission, output: OutputFormat) -> Result<()> {
    match output {
        OutputFormat::Text => match submission {
            Submission::Submitted { id } => println!("Submitted report {}", id),
            Submission::Queued { local_id } => {
                println!("Queued report {} (will sync when online)", local_id)
            }
        },
        OutputFormat::Json => {
            let value = match submission {
                Submission::Submitted { id } => serde_json::json!({"status": "submitted", "id": id}),
                Submission::Queued { local_id } => {
                    serde_json::json!({"status": "queued", "localId": local_id})
                }
            };
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "add_tests.rs"]
mod tests;
