//! DELETE /api/applications/{id} - delete a record and its history

use std::sync::Arc;

use actix_web::{web, HttpRequest, HttpResponse};

use jobtrail_commons::ApplicationId;
use jobtrail_core::ApplicationStore;

use crate::envelope::ApiResponse;
use crate::error::{map_store_error, record_not_found};
use crate::handlers::current_user;

pub async fn delete_handler(
    req: HttpRequest,
    store: web::Data<Arc<dyn ApplicationStore>>,
    path: web::Path<String>,
) -> HttpResponse {
    let user = match current_user(&req) {
        Ok(user) => user,
        Err(response) => return response,
    };
    let id = ApplicationId::new(path.into_inner());

    match store.delete(&id, &user.user_id).await {
        Ok(true) => HttpResponse::Ok().json(ApiResponse::message_only("application deleted")),
        Ok(false) => record_not_found(),
        Err(err) => map_store_error(err),
    }
}
