//! PUT /api/applications/{id}/history/{status} - annotate a past stage
//!
//! Only the note changes: the entry's timestamp, color, and the record's
//! current status all stay put. 404 when the stage never occurred.

use std::str::FromStr;
use std::sync::Arc;

use actix_web::{web, HttpRequest, HttpResponse};

use jobtrail_commons::{ApplicationId, Status};
use jobtrail_core::ApplicationStore;

use super::models::StageNoteRequest;
use crate::envelope::ApiResponse;
use crate::error::{map_store_error, record_not_found};
use crate::handlers::current_user;

pub async fn stage_note_handler(
    req: HttpRequest,
    store: web::Data<Arc<dyn ApplicationStore>>,
    path: web::Path<(String, String)>,
    body: web::Json<StageNoteRequest>,
) -> HttpResponse {
    let user = match current_user(&req) {
        Ok(user) => user,
        Err(response) => return response,
    };
    let (id, status_label) = path.into_inner();
    let id = ApplicationId::new(id);

    let status = match Status::from_str(&status_label) {
        Ok(status) => status,
        Err(err) => {
            return HttpResponse::BadRequest().json(ApiResponse::error(err.to_string()));
        }
    };

    match store
        .set_stage_note(&id, &user.user_id, status, body.into_inner().note)
        .await
    {
        Ok(Some(record)) => {
            HttpResponse::Ok().json(ApiResponse::ok_with_message("note saved", record))
        }
        Ok(None) => record_not_found(),
        Err(err) => map_store_error(err),
    }
}
