//! Request models for the application endpoints.
//!
//! Responses use the domain's `ApplicationRecord` directly — it already
//! serializes with camelCase wire names and the chronological history.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use jobtrail_commons::Status;
use jobtrail_core::{ApplicationPatch, NewApplication};

/// POST /api/applications body. `company` and `appliedAt` are required.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateApplicationRequest {
    pub company: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub job_description: Option<String>,
    #[serde(default)]
    pub resume_version: Option<String>,
    #[serde(default)]
    pub application_link: Option<String>,
    /// Initial pipeline stage; defaults to Submitted.
    #[serde(default)]
    pub status: Option<Status>,
    pub applied_at: DateTime<Utc>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl From<CreateApplicationRequest> for NewApplication {
    fn from(req: CreateApplicationRequest) -> Self {
        Self {
            company: req.company,
            location: req.location,
            job_description: req.job_description,
            resume_version: req.resume_version,
            application_link: req.application_link,
            status: req.status,
            applied_at: req.applied_at,
            notes: req.notes,
        }
    }
}

/// PUT /api/applications/{id} body: any subset of mutable fields.
/// `appliedAt` is immutable and deliberately absent.
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateApplicationRequest {
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub job_description: Option<String>,
    #[serde(default)]
    pub resume_version: Option<String>,
    #[serde(default)]
    pub application_link: Option<String>,
    #[serde(default)]
    pub status: Option<Status>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl From<UpdateApplicationRequest> for ApplicationPatch {
    fn from(req: UpdateApplicationRequest) -> Self {
        Self {
            company: req.company,
            location: req.location,
            job_description: req.job_description,
            resume_version: req.resume_version,
            application_link: req.application_link,
            status: req.status,
            notes: req.notes,
        }
    }
}

/// PUT /api/applications/{id}/history/{status} body.
/// A null or absent note clears the annotation.
#[derive(Debug, Deserialize, Default)]
pub struct StageNoteRequest {
    #[serde(default)]
    pub note: Option<String>,
}
