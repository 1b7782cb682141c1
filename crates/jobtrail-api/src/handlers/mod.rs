//! HTTP request handlers.

pub mod applications;
pub mod auth;
pub mod health;

use actix_web::{HttpMessage, HttpRequest, HttpResponse};

use jobtrail_auth::AuthenticatedUser;

use crate::envelope::ApiResponse;

/// Pulls the authenticated identity the middleware attached to the
/// request. Returns a 401 response when it is absent (the route was
/// mounted without the auth middleware).
pub(crate) fn current_user(req: &HttpRequest) -> Result<AuthenticatedUser, HttpResponse> {
    req.extensions()
        .get::<AuthenticatedUser>()
        .cloned()
        .ok_or_else(|| {
            HttpResponse::Unauthorized().json(ApiResponse::error("authentication token required"))
        })
}
