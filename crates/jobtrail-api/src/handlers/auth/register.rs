//! Registration handler
//!
//! POST /api/auth/register - Creates an account and returns a bearer token

use std::sync::Arc;

use actix_web::{web, HttpResponse};
use log::error;

use jobtrail_auth::{create_and_sign_token, hash_password, validate_password};
use jobtrail_core::{NewUser, UserRepository};

use super::models::{RegisterRequest, TokenData, UserInfo};
use crate::envelope::ApiResponse;
use crate::error::{map_auth_error, map_store_error};
use crate::settings::AuthSettings;

/// POST /api/auth/register
///
/// Validates the credentials, hashes the password, creates the user, and
/// issues a token so the client is logged in immediately.
pub async fn register_handler(
    users: web::Data<Arc<dyn UserRepository>>,
    settings: web::Data<AuthSettings>,
    body: web::Json<RegisterRequest>,
) -> HttpResponse {
    let body = body.into_inner();

    if body.username.trim().is_empty() || body.email.trim().is_empty() {
        return HttpResponse::BadRequest().json(ApiResponse::error(
            "username, email, and password are required",
        ));
    }
    if !body.email.contains('@') {
        return HttpResponse::BadRequest()
            .json(ApiResponse::error("email address is not valid"));
    }
    if let Err(err) = validate_password(&body.password) {
        return map_auth_error(err);
    }

    let password_hash = match hash_password(&body.password, settings.bcrypt_cost).await {
        Ok(hash) => hash,
        Err(err) => return map_auth_error(err),
    };

    let user = match users
        .create_user(NewUser {
            username: body.username,
            email: body.email,
            password_hash,
        })
        .await
    {
        Ok(user) => user,
        Err(err) => return map_store_error(err),
    };

    let (token, _claims) = match create_and_sign_token(
        &user.id,
        &user.username,
        &user.email,
        Some(settings.token_expiry_hours),
        &settings.jwt_secret,
    ) {
        Ok(t) => t,
        Err(err) => {
            error!("error generating token at registration: {}", err);
            return HttpResponse::InternalServerError()
                .json(ApiResponse::error("failed to generate token"));
        }
    };

    HttpResponse::Created().json(ApiResponse::ok_with_message(
        "registration successful",
        TokenData {
            token,
            user: UserInfo::from(&user),
        },
    ))
}
