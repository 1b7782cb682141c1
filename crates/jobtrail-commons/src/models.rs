//! Domain models shared across jobtrail crates.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{ApplicationId, UserId};
use crate::status::{ColorTag, Status};

/// A registered user account.
///
/// The password hash never leaves the store layer on the wire; handlers
/// project this into a `UserInfo` DTO without it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// One ledger entry: the most recent occurrence of a pipeline stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusHistoryEntry {
    pub status: Status,
    pub occurred_at: DateTime<Utc>,
    pub color_tag: ColorTag,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl StatusHistoryEntry {
    /// Creates a fresh entry for a stage reached at `occurred_at`, with
    /// the color derived from the status and no annotation.
    pub fn new(status: Status, occurred_at: DateTime<Utc>) -> Self {
        Self {
            status,
            occurred_at,
            color_tag: status.color_tag(),
            note: None,
        }
    }
}

/// A job application owned by a single user.
///
/// `history` is the chronological projection of the status ledger, sorted
/// by `occurred_at` ascending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationRecord {
    pub id: ApplicationId,
    pub owner_id: UserId,
    pub company: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resume_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_link: Option<String>,
    pub status: Status,
    pub applied_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub history: Vec<StatusHistoryEntry>,
}
