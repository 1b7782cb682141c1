// jobtrail shared types
//
// Typed identifiers, the pipeline status enum, and the domain models used
// by every other jobtrail crate.

pub mod ids;
pub mod models;
pub mod status;

pub use ids::{ApplicationId, UserId};
pub use models::{ApplicationRecord, StatusHistoryEntry, User};
pub use status::{ColorTag, Status, StatusParseError};
