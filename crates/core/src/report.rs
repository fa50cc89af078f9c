// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Pollution report types.
//!
//! A report exists in two forms: [`PendingReport`] while it only lives in the
//! device queue, and [`Report`] once the remote backend has stored it and
//! assigned an id. Both share a [`ReportPayload`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Category of a pollution sighting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PollutionType {
    /// Bottles, bags, packaging.
    Plastic,
    /// Oil sheen or slick on the water surface.
    OilSpill,
    /// Nets, ropes, and other marine debris.
    Debris,
    /// Discoloration or odor from chemical discharge.
    Chemical,
    /// Sewage overflow.
    Sewage,
    /// Anything that doesn't fit the other categories.
    Other,
}

impl PollutionType {
    /// All categories, in display order.
    pub const ALL: [PollutionType; 6] = [
        PollutionType::Plastic,
        PollutionType::OilSpill,
        PollutionType::Debris,
        PollutionType::Chemical,
        PollutionType::Sewage,
        PollutionType::Other,
    ];

    /// Returns the string representation used on the wire and in display.
    pub fn as_str(&self) -> &'static str {
        match self {
            PollutionType::Plastic => "plastic",
            PollutionType::OilSpill => "oil-spill",
            PollutionType::Debris => "debris",
            PollutionType::Chemical => "chemical",
            PollutionType::Sewage => "sewage",
            PollutionType::Other => "other",
        }
    }
}

impl fmt::Display for PollutionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PollutionType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "plastic" => Ok(PollutionType::Plastic),
            "oil-spill" | "oil_spill" => Ok(PollutionType::OilSpill),
            "debris" => Ok(PollutionType::Debris),
            "chemical" => Ok(PollutionType::Chemical),
            "sewage" => Ok(PollutionType::Sewage),
            "other" => Ok(PollutionType::Other),
            _ => Err(Error::InvalidPollutionType(s.to_string())),
        }
    }
}

/// Reporter-assessed severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    /// Returns the string representation used on the wire and in display.
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Critical => "critical",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Severity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "low" => Ok(Severity::Low),
            "medium" => Ok(Severity::Medium),
            "high" => Ok(Severity::High),
            "critical" => Ok(Severity::Critical),
            _ => Err(Error::InvalidSeverity(s.to_string())),
        }
    }
}

/// Output of an external image classifier, carried as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiClassification {
    pub suggested_type: PollutionType,
    /// Classifier confidence in `[0, 1]`.
    pub confidence: f64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub detected_items: Vec<String>,
}

/// Fields common to pending and confirmed reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportPayload {
    #[serde(rename = "type")]
    pub pollution_type: PollutionType,
    pub description: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Capture time in epoch milliseconds.
    pub timestamp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<Severity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_classification: Option<AiClassification>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verified: Option<bool>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub verified_by: Vec<String>,
    /// Affected area in square metres.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub impact_area: Option<f64>,
}

impl ReportPayload {
    /// Creates a payload with only the required fields set.
    pub fn new(
        pollution_type: PollutionType,
        description: impl Into<String>,
        latitude: f64,
        longitude: f64,
        timestamp: i64,
    ) -> Self {
        ReportPayload {
            pollution_type,
            description: description.into(),
            latitude,
            longitude,
            timestamp,
            user_id: None,
            severity: None,
            ai_classification: None,
            verified: None,
            verified_by: Vec::new(),
            impact_area: None,
        }
    }

    pub fn with_user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = Some(severity);
        self
    }

    pub fn with_classification(mut self, classification: AiClassification) -> Self {
        self.ai_classification = Some(classification);
        self
    }
}

/// A report confirmed by the remote backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    /// Identity assigned by the remote backend.
    pub id: String,
    #[serde(flatten)]
    pub payload: ReportPayload,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    #[serde(default = "confirmed")]
    pub synced: bool,
}

fn confirmed() -> bool {
    true
}

impl Report {
    /// Decodes a document returned by the remote backend.
    ///
    /// The document must carry its `id`. Whatever `synced` value was stored,
    /// a report read back from the backend is confirmed by definition.
    pub fn from_document(document: serde_json::Value) -> Result<Self> {
        let mut report: Report = serde_json::from_value(document)?;
        report.synced = true;
        Ok(report)
    }
}

/// A report accepted on-device but not yet stored by the remote backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingReport {
    /// Device-generated identifier; never sent to the backend.
    pub local_id: String,
    #[serde(flatten)]
    pub payload: ReportPayload,
    /// Raw photo, base64 encoded, not yet uploaded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_base64: Option<String>,
}

impl PendingReport {
    /// Builds the document inserted into the remote collection.
    ///
    /// The local id and inline photo stay on the device; the photo is
    /// referenced by the URL it was uploaded to, if any.
    pub fn to_document(&self, photo_url: Option<&str>) -> Result<serde_json::Value> {
        let mut document = serde_json::to_value(&self.payload)?;
        if let (Some(url), Some(fields)) = (photo_url, document.as_object_mut()) {
            fields.insert("photoUrl".to_string(), serde_json::Value::from(url));
        }
        Ok(document)
    }
}

/// A report as submitted by the user, before it is assigned a local id.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportDraft {
    pub payload: ReportPayload,
    /// Raw photo, base64 encoded.
    pub photo_base64: Option<String>,
}

impl ReportDraft {
    pub fn new(payload: ReportPayload) -> Self {
        ReportDraft {
            payload,
            photo_base64: None,
        }
    }

    pub fn with_photo(mut self, photo_base64: impl Into<String>) -> Self {
        self.photo_base64 = Some(photo_base64.into());
        self
    }

    /// Attaches a local id, producing the queueable form.
    pub fn into_pending(self, local_id: String) -> PendingReport {
        PendingReport {
            local_id,
            payload: self.payload,
            photo_base64: self.photo_base64,
        }
    }
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;
