//! Status-history ledger and the reconciler that advances it.
//!
//! The ledger is a mapping from pipeline status to its most recent
//! occurrence — never a raw event log. Re-entering a status updates the
//! existing entry's timestamp instead of appending a duplicate, so a
//! ledger can never hold more entries than the status enum has values.
//!
//! The reconciler itself is a pure decision function: it performs no I/O
//! and takes the clock as an explicit argument, so the same inputs always
//! produce the same decision. Persisting the decision atomically with the
//! record's own `status` column is the store's job.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use thiserror::Error;

use jobtrail_commons::{Status, StatusHistoryEntry};

/// Errors raised by ledger accessors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// `set_note` targeted a stage the application has never reached.
    #[error("no history entry for status '{0}'")]
    StageNotFound(Status),
}

/// Decision computed by [`reconcile`]: how the ledger must change to
/// accommodate a requested status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryAction {
    /// No status change requested (absent or equal to current).
    NoChange,
    /// The requested status already has an entry: refresh its timestamp,
    /// leaving its note untouched.
    Touch(Status),
    /// First time this status is reached: add a fresh entry.
    Insert(StatusHistoryEntry),
}

/// Computes the next ledger state for a requested status change.
///
/// Returns the action to apply to the ledger together with the value the
/// record's `status` field must take. Backward motion in the pipeline is
/// handled identically to forward motion — the reconciler has no notion
/// of stage ordering.
pub fn reconcile(
    ledger: &StatusLedger,
    current: Status,
    requested: Option<Status>,
    now: DateTime<Utc>,
) -> (HistoryAction, Status) {
    let requested = match requested {
        Some(s) if s != current => s,
        // Absent or a no-op re-request of the current status: idempotent.
        _ => return (HistoryAction::NoChange, current),
    };

    if ledger.contains(requested) {
        (HistoryAction::Touch(requested), requested)
    } else {
        (
            HistoryAction::Insert(StatusHistoryEntry::new(requested, now)),
            requested,
        )
    }
}

/// Per-application mapping from status to its most recent occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StatusLedger {
    entries: BTreeMap<Status, StatusHistoryEntry>,
}

impl StatusLedger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the ledger for a brand-new application: exactly one entry,
    /// the initial status at the application timestamp.
    pub fn seeded(status: Status, applied_at: DateTime<Utc>) -> Self {
        let mut ledger = Self::new();
        ledger
            .entries
            .insert(status, StatusHistoryEntry::new(status, applied_at));
        ledger
    }

    /// Rebuilds a ledger from stored entries.
    ///
    /// Entries are keyed by status, so a later duplicate replaces an
    /// earlier one; the store's uniqueness constraint makes that case
    /// unreachable in practice.
    pub fn from_entries(entries: impl IntoIterator<Item = StatusHistoryEntry>) -> Self {
        let mut ledger = Self::new();
        for entry in entries {
            ledger.entries.insert(entry.status, entry);
        }
        ledger
    }

    /// Returns the entry for a status, if that stage was ever reached.
    pub fn get(&self, status: Status) -> Option<&StatusHistoryEntry> {
        self.entries.get(&status)
    }

    /// Whether the ledger has an entry for this status.
    pub fn contains(&self, status: Status) -> bool {
        self.entries.contains_key(&status)
    }

    /// Number of distinct statuses recorded.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Read projection: entries ordered chronologically by `occurred_at`.
    ///
    /// Ties break on the enum's declaration order so the projection is
    /// deterministic.
    pub fn chronological(&self) -> Vec<StatusHistoryEntry> {
        let mut entries: Vec<StatusHistoryEntry> = self.entries.values().cloned().collect();
        entries.sort_by(|a, b| {
            a.occurred_at
                .cmp(&b.occurred_at)
                .then(a.status.cmp(&b.status))
        });
        entries
    }

    /// Mutating entry point wrapping [`reconcile`]: applies the decision
    /// to this ledger and returns the new current status.
    pub fn apply_status(
        &mut self,
        current: Status,
        requested: Option<Status>,
        now: DateTime<Utc>,
    ) -> Status {
        let (action, next) = reconcile(self, current, requested, now);
        match action {
            HistoryAction::NoChange => {}
            HistoryAction::Touch(status) => {
                if let Some(entry) = self.entries.get_mut(&status) {
                    entry.occurred_at = now;
                    // Color stays derived from the status, never from
                    // whatever was stored.
                    entry.color_tag = status.color_tag();
                }
            }
            HistoryAction::Insert(entry) => {
                self.entries.insert(entry.status, entry);
            }
        }
        next
    }

    /// Replaces the note on an existing entry, leaving `occurred_at` and
    /// `color_tag` untouched.
    pub fn set_note(&mut self, status: Status, note: Option<String>) -> Result<(), LedgerError> {
        match self.entries.get_mut(&status) {
            Some(entry) => {
                entry.note = note;
                Ok(())
            }
            None => Err(LedgerError::StageNotFound(status)),
        }
    }
}
