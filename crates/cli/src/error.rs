// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;

use crate::remote::RemoteError;

/// All possible errors that can occur in the seasync library.
///
/// Only [`Error::Validation`] is meant to reach a user: everything else is
/// absorbed by the sync engine, which degrades to queueing or to the
/// last persisted state.
#[derive(Debug, Error)]
pub enum Error {
    #[error("persistence error: {0}")]
    Persistence(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("photo uploaded to {url} but report insert failed: {reason}")]
    PartialUpload { url: String, reason: String },

    #[error("{0}")]
    Validation(seasync_core::Error),

    #[error(transparent)]
    Core(#[from] seasync_core::Error),

    #[error("config error: {0}")]
    Config(String),

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<RemoteError> for Error {
    fn from(e: RemoteError) -> Self {
        Error::Network(e.to_string())
    }
}

/// A specialized Result type for seasync operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
