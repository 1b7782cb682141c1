// jobtrail HTTP API
//
// Actix-web handlers for authentication and application CRUD, the auth
// middleware, and route registration. Handlers hold trait objects for the
// stores, so any backend satisfying the core traits can serve them.

pub mod envelope;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod settings;

pub use envelope::ApiResponse;
pub use middleware::AuthMiddleware;
pub use routes::configure_routes;
pub use settings::AuthSettings;
