//! Login handler
//!
//! POST /api/auth/login - Authenticates a user and returns a bearer token

use std::sync::Arc;

use actix_web::{web, HttpResponse};
use log::error;

use jobtrail_auth::{create_and_sign_token, verify_password};
use jobtrail_core::UserRepository;

use super::models::{LoginRequest, TokenData, UserInfo};
use crate::envelope::ApiResponse;
use crate::error::{map_auth_error, map_store_error};
use crate::settings::AuthSettings;

/// POST /api/auth/login
///
/// A missing user and a wrong password produce the same response body, so
/// the endpoint cannot be used to probe for registered usernames.
pub async fn login_handler(
    users: web::Data<Arc<dyn UserRepository>>,
    settings: web::Data<AuthSettings>,
    body: web::Json<LoginRequest>,
) -> HttpResponse {
    let body = body.into_inner();

    if body.username.trim().is_empty() || body.password.is_empty() {
        return HttpResponse::BadRequest()
            .json(ApiResponse::error("username and password are required"));
    }

    let user = match users.get_user_by_username(&body.username).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            return HttpResponse::Unauthorized()
                .json(ApiResponse::error("invalid username or password"));
        }
        Err(err) => return map_store_error(err),
    };

    match verify_password(&body.password, &user.password_hash).await {
        Ok(true) => {}
        Ok(false) => {
            return HttpResponse::Unauthorized()
                .json(ApiResponse::error("invalid username or password"));
        }
        Err(err) => return map_auth_error(err),
    }

    let (token, _claims) = match create_and_sign_token(
        &user.id,
        &user.username,
        &user.email,
        Some(settings.token_expiry_hours),
        &settings.jwt_secret,
    ) {
        Ok(t) => t,
        Err(err) => {
            error!("error generating token at login: {}", err);
            return HttpResponse::InternalServerError()
                .json(ApiResponse::error("failed to generate token"));
        }
    };

    HttpResponse::Ok().json(ApiResponse::ok_with_message(
        "login successful",
        TokenData {
            token,
            user: UserInfo::from(&user),
        },
    ))
}
