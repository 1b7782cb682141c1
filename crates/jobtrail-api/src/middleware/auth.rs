//! Authentication middleware for the applications API.
//!
//! Wraps a scope so that every request must carry a valid
//! `Authorization: Bearer <token>` header. On success the decoded
//! [`AuthenticatedUser`] lands in request extensions for handlers to
//! read; on failure the request is answered with a 401 envelope without
//! reaching the handler.

use std::{
    future::{ready, Ready},
    rc::Rc,
};

use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    web, Error, HttpMessage, HttpResponse,
};
use futures_util::future::LocalBoxFuture;
use log::{debug, warn};

use jobtrail_auth::{extract_bearer_token, validate_token, AuthenticatedUser};

use crate::envelope::ApiResponse;
use crate::error::map_auth_error;
use crate::settings::AuthSettings;

/// Authentication middleware factory.
pub struct AuthMiddleware;

impl<S> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse, Error = Error> + 'static,
    S::Future: 'static,
{
    type Response = ServiceResponse;
    type Error = Error;
    type InitError = ();
    type Transform = AuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
        }))
    }
}

/// Authentication middleware service instance.
pub struct AuthMiddlewareService<S> {
    service: Rc<S>,
}

impl<S> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse, Error = Error> + 'static,
    S::Future: 'static,
{
    type Response = ServiceResponse;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();

        Box::pin(async move {
            let settings = match req.app_data::<web::Data<AuthSettings>>() {
                Some(settings) => settings.clone(),
                None => {
                    warn!("AuthSettings not registered as app data");
                    let (req, _) = req.into_parts();
                    let response = HttpResponse::InternalServerError()
                        .json(ApiResponse::error("internal server error"));
                    return Ok(ServiceResponse::new(req, response));
                }
            };

            let header = req
                .headers()
                .get("Authorization")
                .and_then(|value| value.to_str().ok());

            let claims = extract_bearer_token(header)
                .and_then(|token| validate_token(token, &settings.jwt_secret));

            match claims {
                Ok(claims) => {
                    debug!("authenticated request for user {}", claims.sub);
                    req.extensions_mut()
                        .insert(AuthenticatedUser::from(claims));
                    service.call(req).await
                }
                Err(err) => {
                    warn!("rejected request: {}", err);
                    let (req, _) = req.into_parts();
                    Ok(ServiceResponse::new(req, map_auth_error(err)))
                }
            }
        })
    }
}
