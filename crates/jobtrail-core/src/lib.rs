// jobtrail core
//
// The status-history ledger and its reconciler (pure computation), plus
// the SQLite-backed user and application stores that persist ledger
// decisions transactionally.

pub mod error;
pub mod ledger;
pub mod store;

pub use error::StoreError;
pub use ledger::{reconcile, HistoryAction, LedgerError, StatusLedger};
pub use store::sqlite::SqliteStore;
pub use store::{ApplicationPatch, ApplicationStore, NewApplication, NewUser, UserRepository};
