// Error types for the store layer

use thiserror::Error;

use crate::ledger::LedgerError;

/// Errors surfaced by the user and application stores.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("already exists: {0}")]
    AlreadyExists(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("database error: {0}")]
    Database(String),

    #[error("corrupt row: {0}")]
    Corrupt(String),
}

impl From<rusqlite::Error> for StoreError {
    fn from(e: rusqlite::Error) -> Self {
        StoreError::Database(e.to_string())
    }
}

impl From<LedgerError> for StoreError {
    fn from(e: LedgerError) -> Self {
        match e {
            LedgerError::StageNotFound(status) => {
                StoreError::NotFound(format!("no history entry for status '{}'", status))
            }
        }
    }
}

/// Convenience alias used throughout the store layer.
pub type StoreResult<T> = Result<T, StoreError>;
