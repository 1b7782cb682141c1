//! POST /api/applications - create a record and seed its history

use std::sync::Arc;

use actix_web::{web, HttpRequest, HttpResponse};

use jobtrail_core::ApplicationStore;

use super::models::CreateApplicationRequest;
use crate::envelope::ApiResponse;
use crate::error::map_store_error;
use crate::handlers::current_user;

pub async fn create_handler(
    req: HttpRequest,
    store: web::Data<Arc<dyn ApplicationStore>>,
    body: web::Json<CreateApplicationRequest>,
) -> HttpResponse {
    let user = match current_user(&req) {
        Ok(user) => user,
        Err(response) => return response,
    };
    let body = body.into_inner();

    if body.company.trim().is_empty() {
        return HttpResponse::BadRequest()
            .json(ApiResponse::error("company and appliedAt are required"));
    }

    match store.create(&user.user_id, body.into()).await {
        Ok(record) => HttpResponse::Created()
            .json(ApiResponse::ok_with_message("application created", record)),
        Err(err) => map_store_error(err),
    }
}
