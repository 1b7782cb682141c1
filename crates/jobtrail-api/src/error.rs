//! Mapping from library errors to HTTP responses.
//!
//! All store and auth failures are caught at this boundary and translated
//! into the standard envelope; internal detail never reaches the client.

use actix_web::{error::JsonPayloadError, HttpRequest, HttpResponse};
use log::error;

use jobtrail_auth::AuthError;
use jobtrail_core::StoreError;

use crate::envelope::ApiResponse;

/// Map authentication errors to HTTP responses.
///
/// Credential failures collapse to one generic message to prevent user
/// enumeration; the distinct variants still reach the logs.
pub(crate) fn map_auth_error(err: AuthError) -> HttpResponse {
    match err {
        AuthError::InvalidCredentials | AuthError::UserNotFound(_) => HttpResponse::Unauthorized()
            .json(ApiResponse::error("invalid username or password")),
        AuthError::MissingAuthorization => HttpResponse::Unauthorized()
            .json(ApiResponse::error("authentication token required")),
        AuthError::TokenExpired
        | AuthError::InvalidSignature
        | AuthError::UntrustedIssuer(_)
        | AuthError::MissingClaim(_)
        | AuthError::MalformedAuthorization(_) => HttpResponse::Unauthorized()
            .json(ApiResponse::error("invalid or expired token")),
        AuthError::WeakPassword(message) => {
            HttpResponse::BadRequest().json(ApiResponse::error(message))
        }
        AuthError::HashingError(detail) | AuthError::DatabaseError(detail) => {
            error!("auth failure: {}", detail);
            HttpResponse::InternalServerError()
                .json(ApiResponse::error("authentication failed"))
        }
    }
}

/// Map store errors to HTTP responses.
pub(crate) fn map_store_error(err: StoreError) -> HttpResponse {
    match err {
        StoreError::NotFound(message) => {
            HttpResponse::NotFound().json(ApiResponse::error(message))
        }
        StoreError::AlreadyExists(message) | StoreError::InvalidInput(message) => {
            HttpResponse::BadRequest().json(ApiResponse::error(message))
        }
        StoreError::Database(detail) | StoreError::Corrupt(detail) => {
            error!("store failure: {}", detail);
            HttpResponse::InternalServerError()
                .json(ApiResponse::error("internal server error"))
        }
    }
}

/// The record-or-owner-mismatch 404, shared by the by-id handlers.
pub(crate) fn record_not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error("record not found"))
}

/// JSON body deserialization errors wrapped in the envelope instead of
/// actix's default plain-text 400. Registered via `JsonConfig` by the
/// server and the tests.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let message = err.to_string();
    actix_web::error::InternalError::from_response(
        err,
        HttpResponse::BadRequest().json(ApiResponse::error(message)),
    )
    .into()
}
