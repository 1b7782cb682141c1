//! Store abstractions for users and application records.
//!
//! Handlers hold `Arc<dyn UserRepository>` / `Arc<dyn ApplicationStore>`
//! trait objects so the API layer never depends on a concrete backend.
//! Every application read and write is scoped by the owning user: a
//! mismatch behaves exactly like a missing record.

pub mod sqlite;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use jobtrail_commons::{ApplicationId, ApplicationRecord, Status, User, UserId};

use crate::error::StoreResult;

/// Fields required to create a user account. The password arrives here
/// already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

/// Abstraction over user persistence for authentication flows.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Creates a user, failing with `AlreadyExists` when the username or
    /// email is taken.
    async fn create_user(&self, new_user: NewUser) -> StoreResult<User>;

    async fn get_user_by_username(&self, username: &str) -> StoreResult<Option<User>>;

    async fn get_user_by_id(&self, id: &UserId) -> StoreResult<Option<User>>;
}

/// Fields accepted when creating an application record.
#[derive(Debug, Clone)]
pub struct NewApplication {
    pub company: String,
    pub location: Option<String>,
    pub job_description: Option<String>,
    pub resume_version: Option<String>,
    pub application_link: Option<String>,
    /// Initial pipeline stage; defaults to Submitted when absent.
    pub status: Option<Status>,
    pub applied_at: DateTime<Utc>,
    pub notes: Option<String>,
}

/// Partial update of an application record. Absent fields keep their
/// stored values. `applied_at` is immutable after creation and therefore
/// not patchable; a status change routes through the reconciler.
#[derive(Debug, Clone, Default)]
pub struct ApplicationPatch {
    pub company: Option<String>,
    pub location: Option<String>,
    pub job_description: Option<String>,
    pub resume_version: Option<String>,
    pub application_link: Option<String>,
    pub status: Option<Status>,
    pub notes: Option<String>,
}

impl ApplicationPatch {
    /// Whether the patch carries any change at all.
    pub fn is_empty(&self) -> bool {
        self.company.is_none()
            && self.location.is_none()
            && self.job_description.is_none()
            && self.resume_version.is_none()
            && self.application_link.is_none()
            && self.status.is_none()
            && self.notes.is_none()
    }
}

/// Owner-scoped persistence of application records and their status
/// history.
///
/// `create`, `update`, and `set_stage_note` are transactional: the
/// record's `status` column and its history rows commit together or not
/// at all. `Ok(None)` from the by-id operations means "absent or not
/// owned by the caller" — the two cases are deliberately
/// indistinguishable.
#[async_trait]
pub trait ApplicationStore: Send + Sync {
    /// Cheap liveness probe, used by the health endpoint.
    async fn ping(&self) -> StoreResult<()>;

    /// All records owned by `owner`, newest application first, history
    /// included.
    async fn list_by_owner(&self, owner: &UserId) -> StoreResult<Vec<ApplicationRecord>>;

    async fn get(
        &self,
        id: &ApplicationId,
        owner: &UserId,
    ) -> StoreResult<Option<ApplicationRecord>>;

    /// Creates a record and seeds its history with the initial status at
    /// `applied_at`.
    async fn create(&self, owner: &UserId, new: NewApplication) -> StoreResult<ApplicationRecord>;

    /// Applies a partial update. A requested status runs through the
    /// reconciler inside the same transaction that rewrites the record.
    async fn update(
        &self,
        id: &ApplicationId,
        owner: &UserId,
        patch: ApplicationPatch,
    ) -> StoreResult<Option<ApplicationRecord>>;

    /// Deletes the record and, by cascade, its history. Returns whether a
    /// row was removed.
    async fn delete(&self, id: &ApplicationId, owner: &UserId) -> StoreResult<bool>;

    /// Annotates a past stage without changing the current status.
    /// Fails with `NotFound` when the stage never occurred.
    async fn set_stage_note(
        &self,
        id: &ApplicationId,
        owner: &UserId,
        status: Status,
        note: Option<String>,
    ) -> StoreResult<Option<ApplicationRecord>>;
}
