//! GET /api/applications/{id} - one record with its history

use std::sync::Arc;

use actix_web::{web, HttpRequest, HttpResponse};

use jobtrail_commons::ApplicationId;
use jobtrail_core::ApplicationStore;

use crate::envelope::ApiResponse;
use crate::error::{map_store_error, record_not_found};
use crate::handlers::current_user;

pub async fn get_handler(
    req: HttpRequest,
    store: web::Data<Arc<dyn ApplicationStore>>,
    path: web::Path<String>,
) -> HttpResponse {
    let user = match current_user(&req) {
        Ok(user) => user,
        Err(response) => return response,
    };
    let id = ApplicationId::new(path.into_inner());

    match store.get(&id, &user.user_id).await {
        Ok(Some(record)) => HttpResponse::Ok().json(ApiResponse::ok(record)),
        Ok(None) => record_not_found(),
        Err(err) => map_store_error(err),
    }
}
