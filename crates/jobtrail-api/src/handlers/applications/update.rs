//! PUT /api/applications/{id} - partial update
//!
//! A status change runs through the reconciler inside the store's
//! transaction: re-entering a previously seen status refreshes that
//! entry's timestamp, a new status appends an entry, and everything else
//! in the history is left byte-for-byte alone.

use std::sync::Arc;

use actix_web::{web, HttpRequest, HttpResponse};

use jobtrail_commons::ApplicationId;
use jobtrail_core::ApplicationStore;

use super::models::UpdateApplicationRequest;
use crate::envelope::ApiResponse;
use crate::error::{map_store_error, record_not_found};
use crate::handlers::current_user;

pub async fn update_handler(
    req: HttpRequest,
    store: web::Data<Arc<dyn ApplicationStore>>,
    path: web::Path<String>,
    body: web::Json<UpdateApplicationRequest>,
) -> HttpResponse {
    let user = match current_user(&req) {
        Ok(user) => user,
        Err(response) => return response,
    };
    let id = ApplicationId::new(path.into_inner());

    if let Some(company) = &body.company {
        if company.trim().is_empty() {
            return HttpResponse::BadRequest()
                .json(ApiResponse::error("company cannot be empty"));
        }
    }

    match store.update(&id, &user.user_id, body.into_inner().into()).await {
        Ok(Some(record)) => {
            HttpResponse::Ok().json(ApiResponse::ok_with_message("application updated", record))
        }
        Ok(None) => record_not_found(),
        Err(err) => map_store_error(err),
    }
}
