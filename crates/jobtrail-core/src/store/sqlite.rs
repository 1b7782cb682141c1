//! SQLite-backed implementation of the user and application stores.
//!
//! A single connection sits behind a mutex and is driven from async
//! handlers through `tokio::task::spawn_blocking`. That serializes all
//! writes, and each status update additionally runs inside one SQL
//! transaction, so a record's `status` column and its history rows can
//! never diverge — a crash rolls both back together.
//!
//! The `status_history` table carries `PRIMARY KEY (application_id,
//! status)`, mirroring the ledger's one-entry-per-status invariant at the
//! storage level.

use std::str::FromStr;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::info;
use rusqlite::{params, Connection, OptionalExtension};
use uuid::Uuid;

use jobtrail_commons::{
    ApplicationId, ApplicationRecord, ColorTag, Status, StatusHistoryEntry, User, UserId,
};

use crate::error::{StoreError, StoreResult};
use crate::ledger::{reconcile, HistoryAction, StatusLedger};
use crate::store::{ApplicationPatch, ApplicationStore, NewApplication, NewUser, UserRepository};

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS users (
    id            TEXT PRIMARY KEY,
    username      TEXT NOT NULL UNIQUE,
    email         TEXT NOT NULL UNIQUE,
    password_hash TEXT NOT NULL,
    created_at    TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS job_applications (
    id               TEXT PRIMARY KEY,
    user_id          TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    company          TEXT NOT NULL,
    base             TEXT,
    jd               TEXT,
    resume_version   TEXT,
    application_link TEXT,
    status           TEXT NOT NULL,
    application_date TEXT NOT NULL,
    update_date      TEXT NOT NULL,
    notes            TEXT
);

CREATE INDEX IF NOT EXISTS idx_job_applications_user
    ON job_applications(user_id, application_date);

CREATE TABLE IF NOT EXISTS status_history (
    application_id TEXT NOT NULL REFERENCES job_applications(id) ON DELETE CASCADE,
    status         TEXT NOT NULL,
    date           TEXT NOT NULL,
    color          TEXT NOT NULL,
    note           TEXT,
    PRIMARY KEY (application_id, status)
);
";

/// SQLite store implementing both [`UserRepository`] and
/// [`ApplicationStore`].
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    /// Opens (or creates) the database at `path` and bootstraps the
    /// schema.
    pub fn open(path: &str) -> StoreResult<Self> {
        let conn = Connection::open(path)?;
        let store = Self::from_connection(conn)?;
        info!("SQLite store opened at {}", path);
        Ok(store)
    }

    /// In-memory database, used by tests.
    pub fn open_in_memory() -> StoreResult<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> StoreResult<Self> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Runs a closure against the connection on the blocking thread pool.
    async fn run<T, F>(&self, f: F) -> StoreResult<T>
    where
        F: FnOnce(&mut Connection) -> StoreResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let mut guard = conn.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
            f(&mut guard)
        })
        .await
        .map_err(|e| StoreError::Database(format!("task join error: {}", e)))?
    }

    #[cfg(test)]
    async fn history_row_count(&self, id: &ApplicationId) -> StoreResult<i64> {
        let id = id.clone();
        self.run(move |conn| {
            let count = conn.query_row(
                "SELECT COUNT(*) FROM status_history WHERE application_id = ?1",
                params![id.as_str()],
                |row| row.get(0),
            )?;
            Ok(count)
        })
        .await
    }
}

fn ts_to_sql(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339()
}

fn ts_from_sql(raw: &str) -> StoreResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| StoreError::Corrupt(format!("bad timestamp '{}': {}", raw, e)))
}

fn status_from_sql(raw: &str) -> StoreResult<Status> {
    Status::from_str(raw).map_err(|e| StoreError::Corrupt(e.to_string()))
}

/// Raw `job_applications` row before label/timestamp parsing.
struct AppRow {
    id: String,
    user_id: String,
    company: String,
    base: Option<String>,
    jd: Option<String>,
    resume_version: Option<String>,
    application_link: Option<String>,
    status: String,
    application_date: String,
    update_date: String,
    notes: Option<String>,
}

const APP_COLUMNS: &str = "id, user_id, company, base, jd, resume_version, application_link, \
                           status, application_date, update_date, notes";

fn app_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<AppRow> {
    Ok(AppRow {
        id: row.get(0)?,
        user_id: row.get(1)?,
        company: row.get(2)?,
        base: row.get(3)?,
        jd: row.get(4)?,
        resume_version: row.get(5)?,
        application_link: row.get(6)?,
        status: row.get(7)?,
        application_date: row.get(8)?,
        update_date: row.get(9)?,
        notes: row.get(10)?,
    })
}

fn load_ledger(conn: &Connection, id: &str) -> StoreResult<StatusLedger> {
    let mut stmt = conn.prepare(
        "SELECT status, date, color, note FROM status_history WHERE application_id = ?1",
    )?;
    let raw_rows = stmt
        .query_map(params![id], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, Option<String>>(3)?,
            ))
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    let mut entries = Vec::with_capacity(raw_rows.len());
    for (status, date, color, note) in raw_rows {
        entries.push(StatusHistoryEntry {
            status: status_from_sql(&status)?,
            occurred_at: ts_from_sql(&date)?,
            color_tag: ColorTag::from_str(&color)
                .map_err(|e| StoreError::Corrupt(e.to_string()))?,
            note,
        });
    }
    Ok(StatusLedger::from_entries(entries))
}

fn load_record(
    conn: &Connection,
    id: &str,
    owner: &str,
) -> StoreResult<Option<ApplicationRecord>> {
    let query = format!(
        "SELECT {} FROM job_applications WHERE id = ?1 AND user_id = ?2",
        APP_COLUMNS
    );
    let raw = conn
        .query_row(&query, params![id, owner], app_row)
        .optional()?;
    match raw {
        Some(row) => Ok(Some(record_from_row(conn, row)?)),
        None => Ok(None),
    }
}

fn record_from_row(conn: &Connection, row: AppRow) -> StoreResult<ApplicationRecord> {
    let ledger = load_ledger(conn, &row.id)?;
    Ok(ApplicationRecord {
        id: ApplicationId::new(row.id),
        owner_id: UserId::new(row.user_id),
        company: row.company,
        location: row.base,
        job_description: row.jd,
        resume_version: row.resume_version,
        application_link: row.application_link,
        status: status_from_sql(&row.status)?,
        applied_at: ts_from_sql(&row.application_date)?,
        updated_at: ts_from_sql(&row.update_date)?,
        notes: row.notes,
        history: ledger.chronological(),
    })
}

/// Raw `users` row before timestamp parsing.
struct UserRow {
    id: String,
    username: String,
    email: String,
    password_hash: String,
    created_at: String,
}

fn user_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<UserRow> {
    Ok(UserRow {
        id: row.get(0)?,
        username: row.get(1)?,
        email: row.get(2)?,
        password_hash: row.get(3)?,
        created_at: row.get(4)?,
    })
}

fn finish_user(row: UserRow) -> StoreResult<User> {
    Ok(User {
        id: UserId::new(row.id),
        username: row.username,
        email: row.email,
        password_hash: row.password_hash,
        created_at: ts_from_sql(&row.created_at)?,
    })
}

const USER_COLUMNS: &str = "id, username, email, password_hash, created_at";

#[async_trait]
impl UserRepository for SqliteStore {
    async fn create_user(&self, new_user: NewUser) -> StoreResult<User> {
        self.run(move |conn| {
            let tx = conn.transaction()?;

            let taken: Option<String> = tx
                .query_row(
                    "SELECT id FROM users WHERE username = ?1 OR email = ?2",
                    params![new_user.username, new_user.email],
                    |row| row.get(0),
                )
                .optional()?;
            if taken.is_some() {
                return Err(StoreError::AlreadyExists(
                    "username or email already in use".to_string(),
                ));
            }

            let id = Uuid::new_v4().to_string();
            let created_at = Utc::now();
            tx.execute(
                "INSERT INTO users (id, username, email, password_hash, created_at) \
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    id,
                    new_user.username,
                    new_user.email,
                    new_user.password_hash,
                    ts_to_sql(&created_at)
                ],
            )?;
            tx.commit()?;

            Ok(User {
                id: UserId::new(id),
                username: new_user.username,
                email: new_user.email,
                password_hash: new_user.password_hash,
                created_at,
            })
        })
        .await
    }

    async fn get_user_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        let username = username.to_string();
        self.run(move |conn| {
            let query = format!("SELECT {} FROM users WHERE username = ?1", USER_COLUMNS);
            let raw = conn
                .query_row(&query, params![username], user_from_row)
                .optional()?;
            raw.map(finish_user).transpose()
        })
        .await
    }

    async fn get_user_by_id(&self, id: &UserId) -> StoreResult<Option<User>> {
        let id = id.clone();
        self.run(move |conn| {
            let query = format!("SELECT {} FROM users WHERE id = ?1", USER_COLUMNS);
            let raw = conn
                .query_row(&query, params![id.as_str()], user_from_row)
                .optional()?;
            raw.map(finish_user).transpose()
        })
        .await
    }
}

#[async_trait]
impl ApplicationStore for SqliteStore {
    async fn ping(&self) -> StoreResult<()> {
        self.run(|conn| {
            conn.query_row("SELECT 1", [], |_| Ok(()))?;
            Ok(())
        })
        .await
    }

    async fn list_by_owner(&self, owner: &UserId) -> StoreResult<Vec<ApplicationRecord>> {
        let owner = owner.clone();
        self.run(move |conn| {
            let query = format!(
                "SELECT {} FROM job_applications WHERE user_id = ?1 \
                 ORDER BY application_date DESC",
                APP_COLUMNS
            );
            let rows = {
                let mut stmt = conn.prepare(&query)?;
                let rows = stmt
                    .query_map(params![owner.as_str()], app_row)?
                    .collect::<rusqlite::Result<Vec<_>>>()?;
                rows
            };

            let mut records = Vec::with_capacity(rows.len());
            for row in rows {
                records.push(record_from_row(conn, row)?);
            }
            Ok(records)
        })
        .await
    }

    async fn get(
        &self,
        id: &ApplicationId,
        owner: &UserId,
    ) -> StoreResult<Option<ApplicationRecord>> {
        let id = id.clone();
        let owner = owner.clone();
        self.run(move |conn| load_record(conn, id.as_str(), owner.as_str()))
            .await
    }

    async fn create(&self, owner: &UserId, new: NewApplication) -> StoreResult<ApplicationRecord> {
        let owner = owner.clone();
        self.run(move |conn| {
            let id = Uuid::new_v4().to_string();
            let status = new.status.unwrap_or_default();
            // updatedAt must never precede appliedAt.
            let updated_at = Utc::now().max(new.applied_at);

            let tx = conn.transaction()?;
            tx.execute(
                "INSERT INTO job_applications \
                 (id, user_id, company, base, jd, resume_version, application_link, \
                  status, application_date, update_date, notes) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
                params![
                    id,
                    owner.as_str(),
                    new.company,
                    new.location,
                    new.job_description,
                    new.resume_version,
                    new.application_link,
                    status.as_str(),
                    ts_to_sql(&new.applied_at),
                    ts_to_sql(&updated_at),
                    new.notes
                ],
            )?;

            // Seed the ledger: one entry, the initial status at appliedAt.
            tx.execute(
                "INSERT INTO status_history (application_id, status, date, color, note) \
                 VALUES (?1, ?2, ?3, ?4, NULL)",
                params![
                    id,
                    status.as_str(),
                    ts_to_sql(&new.applied_at),
                    status.color_tag().as_str()
                ],
            )?;

            let record = load_record(&tx, &id, owner.as_str())?.ok_or_else(|| {
                StoreError::Database("created record not readable in transaction".to_string())
            })?;
            tx.commit()?;
            Ok(record)
        })
        .await
    }

    async fn update(
        &self,
        id: &ApplicationId,
        owner: &UserId,
        patch: ApplicationPatch,
    ) -> StoreResult<Option<ApplicationRecord>> {
        let id = id.clone();
        let owner = owner.clone();
        self.run(move |conn| {
            let tx = conn.transaction()?;

            let current: Option<String> = tx
                .query_row(
                    "SELECT status FROM job_applications WHERE id = ?1 AND user_id = ?2",
                    params![id.as_str(), owner.as_str()],
                    |row| row.get(0),
                )
                .optional()?;
            let current = match current {
                Some(raw) => status_from_sql(&raw)?,
                None => return Ok(None),
            };

            let now = Utc::now();
            let ledger = load_ledger(&tx, id.as_str())?;
            let (action, next_status) = reconcile(&ledger, current, patch.status, now);

            tx.execute(
                "UPDATE job_applications SET \
                     company          = COALESCE(?1, company), \
                     base             = COALESCE(?2, base), \
                     jd               = COALESCE(?3, jd), \
                     resume_version   = COALESCE(?4, resume_version), \
                     application_link = COALESCE(?5, application_link), \
                     notes            = COALESCE(?6, notes), \
                     status           = ?7, \
                     update_date      = ?8 \
                 WHERE id = ?9 AND user_id = ?10",
                params![
                    patch.company,
                    patch.location,
                    patch.job_description,
                    patch.resume_version,
                    patch.application_link,
                    patch.notes,
                    next_status.as_str(),
                    ts_to_sql(&now),
                    id.as_str(),
                    owner.as_str()
                ],
            )?;

            match action {
                HistoryAction::NoChange => {}
                HistoryAction::Touch(status) => {
                    tx.execute(
                        "UPDATE status_history SET date = ?1, color = ?2 \
                         WHERE application_id = ?3 AND status = ?4",
                        params![
                            ts_to_sql(&now),
                            status.color_tag().as_str(),
                            id.as_str(),
                            status.as_str()
                        ],
                    )?;
                }
                HistoryAction::Insert(entry) => {
                    tx.execute(
                        "INSERT INTO status_history (application_id, status, date, color, note) \
                         VALUES (?1, ?2, ?3, ?4, ?5)",
                        params![
                            id.as_str(),
                            entry.status.as_str(),
                            ts_to_sql(&entry.occurred_at),
                            entry.color_tag.as_str(),
                            entry.note
                        ],
                    )?;
                }
            }

            let record = load_record(&tx, id.as_str(), owner.as_str())?;
            tx.commit()?;
            Ok(record)
        })
        .await
    }

    async fn delete(&self, id: &ApplicationId, owner: &UserId) -> StoreResult<bool> {
        let id = id.clone();
        let owner = owner.clone();
        self.run(move |conn| {
            // History rows go with the record via ON DELETE CASCADE.
            let removed = conn.execute(
                "DELETE FROM job_applications WHERE id = ?1 AND user_id = ?2",
                params![id.as_str(), owner.as_str()],
            )?;
            Ok(removed > 0)
        })
        .await
    }

    async fn set_stage_note(
        &self,
        id: &ApplicationId,
        owner: &UserId,
        status: Status,
        note: Option<String>,
    ) -> StoreResult<Option<ApplicationRecord>> {
        let id = id.clone();
        let owner = owner.clone();
        self.run(move |conn| {
            let tx = conn.transaction()?;

            let exists: Option<String> = tx
                .query_row(
                    "SELECT id FROM job_applications WHERE id = ?1 AND user_id = ?2",
                    params![id.as_str(), owner.as_str()],
                    |row| row.get(0),
                )
                .optional()?;
            if exists.is_none() {
                return Ok(None);
            }

            let changed = tx.execute(
                "UPDATE status_history SET note = ?1 \
                 WHERE application_id = ?2 AND status = ?3",
                params![note, id.as_str(), status.as_str()],
            )?;
            if changed == 0 {
                return Err(StoreError::NotFound(format!(
                    "no history entry for status '{}'",
                    status
                )));
            }

            tx.execute(
                "UPDATE job_applications SET update_date = ?1 WHERE id = ?2",
                params![ts_to_sql(&Utc::now()), id.as_str()],
            )?;

            let record = load_record(&tx, id.as_str(), owner.as_str())?;
            tx.commit()?;
            Ok(record)
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    async fn store_with_user(username: &str) -> (SqliteStore, UserId) {
        let store = SqliteStore::open_in_memory().expect("open in-memory store");
        let user = store
            .create_user(NewUser {
                username: username.to_string(),
                email: format!("{}@example.com", username),
                password_hash: "$2b$04$hash".to_string(),
            })
            .await
            .expect("create user");
        (store, user.id)
    }

    fn new_application(company: &str) -> NewApplication {
        NewApplication {
            company: company.to_string(),
            location: Some("Berlin".to_string()),
            job_description: None,
            resume_version: Some("v2.1".to_string()),
            application_link: None,
            status: None,
            applied_at: Utc.with_ymd_and_hms(2024, 5, 20, 9, 30, 0).unwrap(),
            notes: None,
        }
    }

    #[tokio::test]
    async fn test_create_seeds_history_with_initial_status() {
        let (store, owner) = store_with_user("alice").await;
        let record = store
            .create(&owner, new_application("ByteDance"))
            .await
            .unwrap();

        assert_eq!(record.status, Status::Submitted);
        assert_eq!(record.history.len(), 1);
        assert_eq!(record.history[0].status, Status::Submitted);
        assert_eq!(record.history[0].occurred_at, record.applied_at);
        assert_eq!(record.history[0].color_tag, ColorTag::Positive);
        assert!(record.updated_at >= record.applied_at);
    }

    #[tokio::test]
    async fn test_duplicate_username_or_email_conflicts() {
        let (store, _) = store_with_user("alice").await;
        let result = store
            .create_user(NewUser {
                username: "alice".to_string(),
                email: "other@example.com".to_string(),
                password_hash: "h".to_string(),
            })
            .await;
        assert!(matches!(result, Err(StoreError::AlreadyExists(_))));

        let result = store
            .create_user(NewUser {
                username: "bob".to_string(),
                email: "alice@example.com".to_string(),
                password_hash: "h".to_string(),
            })
            .await;
        assert!(matches!(result, Err(StoreError::AlreadyExists(_))));
    }

    #[tokio::test]
    async fn test_status_update_appends_then_touches() {
        let (store, owner) = store_with_user("alice").await;
        let record = store
            .create(&owner, new_application("ByteDance"))
            .await
            .unwrap();

        // Submitted -> Screening: 2 entries.
        let record = store
            .update(
                &record.id,
                &owner,
                ApplicationPatch {
                    status: Some(Status::Screening),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .expect("record exists");
        assert_eq!(record.status, Status::Screening);
        assert_eq!(record.history.len(), 2);

        // Screening -> Rejected -> Screening: still 3 distinct entries,
        // Screening timestamp moved, Submitted untouched.
        let submitted_at = record.history[0].occurred_at;
        let record = store
            .update(
                &record.id,
                &owner,
                ApplicationPatch {
                    status: Some(Status::Rejected),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        let screening_before = record
            .history
            .iter()
            .find(|e| e.status == Status::Screening)
            .unwrap()
            .occurred_at;

        let record = store
            .update(
                &record.id,
                &owner,
                ApplicationPatch {
                    status: Some(Status::Screening),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(record.status, Status::Screening);
        assert_eq!(record.history.len(), 3);
        let screening_after = record
            .history
            .iter()
            .find(|e| e.status == Status::Screening)
            .unwrap()
            .occurred_at;
        assert!(screening_after >= screening_before);
        let submitted = record
            .history
            .iter()
            .find(|e| e.status == Status::Submitted)
            .unwrap();
        assert_eq!(submitted.occurred_at, submitted_at);

        let rejected = record
            .history
            .iter()
            .find(|e| e.status == Status::Rejected)
            .unwrap();
        assert_eq!(rejected.color_tag, ColorTag::Negative);
    }

    #[tokio::test]
    async fn test_field_only_update_leaves_history_alone() {
        let (store, owner) = store_with_user("alice").await;
        let record = store
            .create(&owner, new_application("ByteDance"))
            .await
            .unwrap();

        let updated = store
            .update(
                &record.id,
                &owner,
                ApplicationPatch {
                    company: Some("ByteDance GmbH".to_string()),
                    notes: Some("pinged recruiter".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.company, "ByteDance GmbH");
        assert_eq!(updated.status, Status::Submitted);
        assert_eq!(updated.history, record.history);
        assert!(updated.updated_at >= record.updated_at);
    }

    #[tokio::test]
    async fn test_stage_note_set_and_preserved_across_transitions() {
        let (store, owner) = store_with_user("alice").await;
        let record = store
            .create(&owner, new_application("ByteDance"))
            .await
            .unwrap();

        let record = store
            .set_stage_note(
                &record.id,
                &owner,
                Status::Submitted,
                Some("abc".to_string()),
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(record.history[0].note.as_deref(), Some("abc"));

        let record = store
            .update(
                &record.id,
                &owner,
                ApplicationPatch {
                    status: Some(Status::Screening),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        let submitted = record
            .history
            .iter()
            .find(|e| e.status == Status::Submitted)
            .unwrap();
        assert_eq!(submitted.note.as_deref(), Some("abc"));
    }

    #[tokio::test]
    async fn test_stage_note_for_unreached_stage_is_not_found() {
        let (store, owner) = store_with_user("alice").await;
        let record = store
            .create(&owner, new_application("ByteDance"))
            .await
            .unwrap();

        let result = store
            .set_stage_note(&record.id, &owner, Status::HrInterview, Some("x".to_string()))
            .await;
        assert!(matches!(result, Err(StoreError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_owner_scoping_hides_foreign_records() {
        let (store, owner) = store_with_user("alice").await;
        let intruder = store
            .create_user(NewUser {
                username: "mallory".to_string(),
                email: "mallory@example.com".to_string(),
                password_hash: "h".to_string(),
            })
            .await
            .unwrap()
            .id;

        let record = store
            .create(&owner, new_application("ByteDance"))
            .await
            .unwrap();

        assert!(store.get(&record.id, &intruder).await.unwrap().is_none());
        assert!(store
            .update(
                &record.id,
                &intruder,
                ApplicationPatch {
                    status: Some(Status::Rejected),
                    ..Default::default()
                }
            )
            .await
            .unwrap()
            .is_none());
        assert!(!store.delete(&record.id, &intruder).await.unwrap());

        // The record is untouched for its real owner.
        let unchanged = store.get(&record.id, &owner).await.unwrap().unwrap();
        assert_eq!(unchanged.status, Status::Submitted);
    }

    #[tokio::test]
    async fn test_delete_cascades_history() {
        let (store, owner) = store_with_user("alice").await;
        let record = store
            .create(&owner, new_application("ByteDance"))
            .await
            .unwrap();
        store
            .update(
                &record.id,
                &owner,
                ApplicationPatch {
                    status: Some(Status::Screening),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(store.history_row_count(&record.id).await.unwrap(), 2);

        assert!(store.delete(&record.id, &owner).await.unwrap());
        assert!(store.get(&record.id, &owner).await.unwrap().is_none());
        assert_eq!(store.history_row_count(&record.id).await.unwrap(), 0);

        // Deleting again reports nothing removed.
        assert!(!store.delete(&record.id, &owner).await.unwrap());
    }

    #[tokio::test]
    async fn test_list_by_owner_newest_application_first() {
        let (store, owner) = store_with_user("alice").await;
        let mut older = new_application("Old Corp");
        older.applied_at = Utc.with_ymd_and_hms(2024, 4, 1, 8, 0, 0).unwrap();
        let mut newer = new_application("New Corp");
        newer.applied_at = Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap();

        store.create(&owner, older).await.unwrap();
        store.create(&owner, newer).await.unwrap();

        let records = store.list_by_owner(&owner).await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].company, "New Corp");
        assert_eq!(records[1].company, "Old Corp");
    }

    #[tokio::test]
    async fn test_custom_initial_status_seeds_that_stage() {
        let (store, owner) = store_with_user("alice").await;
        let mut new = new_application("Referral Inc");
        new.status = Some(Status::Screening);
        let record = store.create(&owner, new).await.unwrap();

        assert_eq!(record.status, Status::Screening);
        assert_eq!(record.history.len(), 1);
        assert_eq!(record.history[0].status, Status::Screening);
    }
}
