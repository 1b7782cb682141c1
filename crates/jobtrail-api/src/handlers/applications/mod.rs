//! Application record handlers.
//!
//! All routes here sit behind the auth middleware; every store call is
//! scoped by the authenticated owner, so a foreign record behaves exactly
//! like a missing one.
//!
//! - GET    /api/applications - list records with history
//! - POST   /api/applications - create a record (seeds history)
//! - GET    /api/applications/{id} - fetch one record
//! - PUT    /api/applications/{id} - partial update, reconciles history
//! - DELETE /api/applications/{id} - delete record and history
//! - PUT    /api/applications/{id}/history/{status} - annotate a stage

pub mod models;

mod create;
mod delete;
mod get;
mod list;
mod stage_note;
mod update;

pub use create::create_handler;
pub use delete::delete_handler;
pub use get::get_handler;
pub use list::list_handler;
pub use stage_note::stage_note_handler;
pub use update::update_handler;
