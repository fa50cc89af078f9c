// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Input validation for user-submitted reports.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::error::{Error, Result};
use crate::report::{AiClassification, ReportDraft};

pub const MAX_DESCRIPTION_LENGTH: usize = 2_000;

/// Validate a draft before it enters the sync pipeline.
pub fn validate_draft(draft: &ReportDraft) -> Result<()> {
    let payload = &draft.payload;
    validate_description(&payload.description)?;
    validate_coordinates(payload.latitude, payload.longitude)?;
    if let Some(ai) = &payload.ai_classification {
        validate_classification(ai)?;
    }
    if let Some(photo) = &draft.photo_base64 {
        validate_photo(photo)?;
    }
    Ok(())
}

/// Validate that a description is non-empty and within length limits
pub fn validate_description(description: &str) -> Result<()> {
    let trimmed = description.trim();
    if trimmed.is_empty() {
        return Err(Error::Validation {
            field: "description",
            reason: "cannot be empty".to_string(),
        });
    }
    let len = trimmed.chars().count();
    if len > MAX_DESCRIPTION_LENGTH {
        return Err(Error::Validation {
            field: "description",
            reason: format!("too long ({} chars, max {})", len, MAX_DESCRIPTION_LENGTH),
        });
    }
    Ok(())
}

/// Validate a latitude/longitude pair
pub fn validate_coordinates(latitude: f64, longitude: f64) -> Result<()> {
    if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
        return Err(Error::Validation {
            field: "latitude",
            reason: format!("{} is outside [-90, 90]", latitude),
        });
    }
    if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
        return Err(Error::Validation {
            field: "longitude",
            reason: format!("{} is outside [-180, 180]", longitude),
        });
    }
    Ok(())
}

fn validate_classification(ai: &AiClassification) -> Result<()> {
    if !(0.0..=1.0).contains(&ai.confidence) {
        return Err(Error::Validation {
            field: "confidence",
            reason: format!("{} is outside [0, 1]", ai.confidence),
        });
    }
    Ok(())
}

fn validate_photo(photo_base64: &str) -> Result<()> {
    match STANDARD.decode(photo_base64) {
        Ok(bytes) if !bytes.is_empty() => Ok(()),
        Ok(_) => Err(Error::Validation {
            field: "photo",
            reason: "is empty".to_string(),
        }),
        Err(e) => Err(Error::Validation {
            field: "photo",
            reason: format!("not valid base64: {}", e),
        }),
    }
}

#[cfg(test)]
#[path = "validate_tests.rs"]
mod tests;
