// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! seasync-core: Shared library for the SeaSync pollution reporter
//!
//! This crate provides the report data model, validation, local identifiers,
//! and the wire protocol used by both the `seasync` client and the
//! `seasync-remote` server.

pub mod document;
pub mod error;
pub mod id;
pub mod protocol;
pub mod report;
pub mod validate;

pub use error::{Error, Result};
pub use id::{generate_unique_local_id, is_local_id};
pub use report::{
    AiClassification, PendingReport, PollutionType, Report, ReportDraft, ReportPayload, Severity,
};
pub use validate::validate_draft;

/// Remote collection holding pollution reports.
pub const REPORTS_COLLECTION: &str = "pollution_reports";

/// Field the report collection is ordered by.
pub const REPORTS_SORT_FIELD: &str = "timestamp";
