//! Health check endpoint.

use std::sync::Arc;

use actix_web::{web, HttpResponse};
use serde_json::json;

use jobtrail_core::ApplicationStore;

use crate::envelope::ApiResponse;

/// GET /api/health
///
/// Pings the store so a wedged database shows up as unhealthy rather
/// than as sporadic 500s on real traffic.
pub async fn health_handler(store: web::Data<Arc<dyn ApplicationStore>>) -> HttpResponse {
    match store.ping().await {
        Ok(()) => HttpResponse::Ok().json(ApiResponse::ok(json!({
            "status": "healthy",
            "version": env!("CARGO_PKG_VERSION"),
            "timestamp": chrono::Utc::now().to_rfc3339(),
        }))),
        Err(err) => {
            log::error!("health check failed: {}", err);
            HttpResponse::InternalServerError()
                .json(ApiResponse::error("database connection failed"))
        }
    }
}
