//! Authentication handlers.
//!
//! - POST /api/auth/register - create an account and issue a token
//! - POST /api/auth/login - authenticate and issue a token
//! - GET  /api/auth/me - resolve the current user from a bearer token

pub mod models;

mod login;
mod me;
mod register;

pub use login::login_handler;
pub use me::me_handler;
pub use register::register_handler;
