//! GET /api/applications - all records owned by the caller

use std::sync::Arc;

use actix_web::{web, HttpRequest, HttpResponse};

use jobtrail_core::ApplicationStore;

use crate::envelope::ApiResponse;
use crate::error::map_store_error;
use crate::handlers::current_user;

pub async fn list_handler(
    req: HttpRequest,
    store: web::Data<Arc<dyn ApplicationStore>>,
) -> HttpResponse {
    let user = match current_user(&req) {
        Ok(user) => user,
        Err(response) => return response,
    };

    match store.list_by_owner(&user.user_id).await {
        Ok(records) => HttpResponse::Ok().json(ApiResponse::ok(records)),
        Err(err) => map_store_error(err),
    }
}
