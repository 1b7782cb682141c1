//! Pipeline status enum and the derived color classification.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when parsing an unknown status label.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown status label: {0}")]
pub struct StatusParseError(pub String);

/// Pipeline stage of a job application.
///
/// Closed set: the ledger keys history entries by this enum, so there can
/// never be more than eight entries per application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Status {
    Submitted,
    Screening,
    WrittenTest,
    BusinessInterview,
    HrInterview,
    OfferGranted,
    Onboarded,
    Rejected,
}

impl Status {
    /// Display order of the forward pipeline, consumed by board rendering.
    ///
    /// Cosmetic only — the reconciler never consults this ordering and
    /// permits backward transitions.
    pub const PIPELINE: [Status; 7] = [
        Status::Submitted,
        Status::Screening,
        Status::WrittenTest,
        Status::BusinessInterview,
        Status::HrInterview,
        Status::OfferGranted,
        Status::Onboarded,
    ];

    /// All statuses, including the terminal Rejected stage.
    pub const ALL: [Status; 8] = [
        Status::Submitted,
        Status::Screening,
        Status::WrittenTest,
        Status::BusinessInterview,
        Status::HrInterview,
        Status::OfferGranted,
        Status::Onboarded,
        Status::Rejected,
    ];

    /// Stable wire/storage label for this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Submitted => "submitted",
            Status::Screening => "screening",
            Status::WrittenTest => "writtenTest",
            Status::BusinessInterview => "businessInterview",
            Status::HrInterview => "hrInterview",
            Status::OfferGranted => "offerGranted",
            Status::Onboarded => "onboarded",
            Status::Rejected => "rejected",
        }
    }

    /// Derived classification for display: Rejected is the only negative
    /// stage.
    pub fn color_tag(&self) -> ColorTag {
        match self {
            Status::Rejected => ColorTag::Negative,
            _ => ColorTag::Positive,
        }
    }
}

impl Default for Status {
    /// A newly created application starts at resume submission.
    fn default() -> Self {
        Status::Submitted
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = StatusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "submitted" => Ok(Status::Submitted),
            "screening" => Ok(Status::Screening),
            "writtenTest" => Ok(Status::WrittenTest),
            "businessInterview" => Ok(Status::BusinessInterview),
            "hrInterview" => Ok(Status::HrInterview),
            "offerGranted" => Ok(Status::OfferGranted),
            "onboarded" => Ok(Status::Onboarded),
            "rejected" => Ok(Status::Rejected),
            other => Err(StatusParseError(other.to_string())),
        }
    }
}

/// Display classification of a history entry.
///
/// Always recomputed from the status on write — never stored
/// authoritatively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ColorTag {
    Positive,
    Negative,
}

impl ColorTag {
    /// Stable wire/storage label for this tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            ColorTag::Positive => "positive",
            ColorTag::Negative => "negative",
        }
    }
}

impl fmt::Display for ColorTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColorTag {
    type Err = StatusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "positive" => Ok(ColorTag::Positive),
            "negative" => Ok(ColorTag::Negative),
            other => Err(StatusParseError(other.to_string())),
        }
    }
}
