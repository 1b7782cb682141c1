//! API route configuration.
//!
//! All endpoints live under the /api prefix:
//! - POST /api/auth/register, POST /api/auth/login, GET /api/auth/me
//! - CRUD under /api/applications (bearer auth enforced by middleware)
//! - GET /api/health

use actix_web::web;

use crate::handlers::{applications, auth, health};
use crate::middleware::AuthMiddleware;

/// Register all HTTP routes.
///
/// The caller is expected to have registered `AuthSettings`,
/// `Arc<dyn UserRepository>`, and `Arc<dyn ApplicationStore>` as app
/// data.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .service(
                web::scope("/auth")
                    .route("/register", web::post().to(auth::register_handler))
                    .route("/login", web::post().to(auth::login_handler))
                    .route("/me", web::get().to(auth::me_handler)),
            )
            .service(
                web::scope("/applications")
                    .wrap(AuthMiddleware)
                    .route("", web::get().to(applications::list_handler))
                    .route("", web::post().to(applications::create_handler))
                    .route("/{id}", web::get().to(applications::get_handler))
                    .route("/{id}", web::put().to(applications::update_handler))
                    .route("/{id}", web::delete().to(applications::delete_handler))
                    .route(
                        "/{id}/history/{status}",
                        web::put().to(applications::stage_note_handler),
                    ),
            )
            .route("/health", web::get().to(health::health_handler)),
    );
}
