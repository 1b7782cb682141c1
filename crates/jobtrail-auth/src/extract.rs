//! Bearer-token extraction from HTTP headers.

use crate::error::{AuthError, AuthResult};

/// Pulls the token out of an `Authorization: Bearer <token>` header value.
///
/// Takes the raw header value (if any) so it stays independent of the web
/// framework's request types.
///
/// # Errors
/// - `AuthError::MissingAuthorization` when no header was sent
/// - `AuthError::MalformedAuthorization` for a non-Bearer scheme or an
///   empty token
pub fn extract_bearer_token(header: Option<&str>) -> AuthResult<&str> {
    let header = header.ok_or(AuthError::MissingAuthorization)?;

    let token = header
        .strip_prefix("Bearer ")
        .ok_or_else(|| {
            AuthError::MalformedAuthorization(
                "authorization header must use the Bearer scheme".to_string(),
            )
        })?
        .trim();

    if token.is_empty() {
        return Err(AuthError::MalformedAuthorization(
            "empty bearer token".to_string(),
        ));
    }

    Ok(token)
}
