// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use chrono::DateTime;
use serde_json::Value;
use seasync_core::{PendingReport, Report, ReportPayload};

use super::Context;
use crate::cli::OutputFormat;
use crate::error::Result;

pub async fn run(ctx: &Context, output: OutputFormat) -> Result<()> {
    let store = ctx.open_store().await?;
    let snapshot = store.snapshot();

    match output {
        OutputFormat::Text => {
            for pending in &snapshot.queue {
                println!("{}", format_pending_line(pending));
            }
            for report in &snapshot.reports {
                println!("{}", format_report_line(report));
            }
            if snapshot.queue.is_empty() && snapshot.reports.is_empty() {
                println!("No reports");
            }
        }
        OutputFormat::Json => {
            let pending = snapshot
                .queue
                .iter()
                .map(pending_json)
                .collect::<Result<Vec<_>>>()?;
            let output = serde_json::json!({
                "reports": snapshot.reports,
                "pending": pending,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }
    Ok(())
}

/// Format a confirmed report as a single line.
pub(crate) fn format_report_line(report: &Report) -> String {
    format!("{}  {}", report.id, format_payload(&report.payload))
}

/// Format a queued report as a single line.
pub(crate) fn format_pending_line(pending: &PendingReport) -> String {
    format!("[pending] {}  {}", pending.local_id, format_payload(&pending.payload))
}

fn format_payload(payload: &ReportPayload) -> String {
    let kind = match payload.severity {
        Some(severity) => format!("{} ({})", payload.pollution_type, severity),
        None => payload.pollution_type.to_string(),
    };
    let when = DateTime::from_timestamp_millis(payload.timestamp)
        .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| payload.timestamp.to_string());
    format!(
        "{}  {:.4},{:.4}  {}  {}",
        kind, payload.latitude, payload.longitude, when, payload.description
    )
}

/// Queued report as JSON, with the inline photo replaced by a flag.
fn pending_json(pending: &PendingReport) -> Result<Value> {
    let mut value = serde_json::to_value(pending)?;
    if let Some(fields) = value.as_object_mut() {
        fields.remove("photoBase64");
        fields.insert(
            "hasPhoto".to_string(),
            Value::Bool(pending.photo_base64.is_some()),
        );
    }
    Ok(value)
}

#[cfg(test)]
#[path = "list_tests.rs"]
mod tests;
