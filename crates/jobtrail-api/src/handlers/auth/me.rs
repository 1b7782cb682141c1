//! Current user handler
//!
//! GET /api/auth/me - Returns the user the presented token belongs to

use std::sync::Arc;

use actix_web::{web, HttpRequest, HttpResponse};

use jobtrail_auth::{extract_bearer_token, validate_token};
use jobtrail_core::UserRepository;

use super::models::{MeData, UserInfo};
use crate::envelope::ApiResponse;
use crate::error::{map_auth_error, map_store_error};
use crate::settings::AuthSettings;

/// GET /api/auth/me
///
/// Validates the bearer token itself (the route sits outside the auth
/// middleware) and resolves the account fresh from the store, so a
/// deleted user's still-valid token stops working here.
pub async fn me_handler(
    req: HttpRequest,
    users: web::Data<Arc<dyn UserRepository>>,
    settings: web::Data<AuthSettings>,
) -> HttpResponse {
    let header = req
        .headers()
        .get("Authorization")
        .and_then(|value| value.to_str().ok());

    let claims = match extract_bearer_token(header)
        .and_then(|token| validate_token(token, &settings.jwt_secret))
    {
        Ok(claims) => claims,
        Err(err) => return map_auth_error(err),
    };

    let user = match users.get_user_by_id(&claims.user_id()).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            return HttpResponse::Unauthorized()
                .json(ApiResponse::error("invalid or expired token"));
        }
        Err(err) => return map_store_error(err),
    };

    HttpResponse::Ok().json(ApiResponse::ok(MeData {
        user: UserInfo::from(&user),
    }))
}
