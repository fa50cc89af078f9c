// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for seasync-core operations.

use thiserror::Error;

/// All possible errors that can occur in seasync-core operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    #[error("invalid pollution type: '{0}'\n  hint: valid types are: plastic, oil-spill, debris, chemical, sewage, other")]
    InvalidPollutionType(String),

    #[error("invalid severity: '{0}'\n  hint: valid severities are: low, medium, high, critical")]
    InvalidSeverity(String),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Returns true for errors caused by caller-supplied report data.
    ///
    /// These are the only errors that should reach a user as an actionable message.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Error::Validation { .. } | Error::InvalidPollutionType(_) | Error::InvalidSeverity(_)
        )
    }
}

/// A specialized Result type for seasync-core operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
