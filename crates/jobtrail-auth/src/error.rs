// Authentication error types

use thiserror::Error;

/// Errors raised by the authentication layer.
///
/// Expired, invalid, and missing tokens are distinct variants so logs can
/// tell them apart, even though the API maps all three to 401.
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("user not found: {0}")]
    UserNotFound(String),

    #[error("authorization header is missing")]
    MissingAuthorization,

    #[error("malformed authorization: {0}")]
    MalformedAuthorization(String),

    #[error("token expired")]
    TokenExpired,

    #[error("invalid token signature")]
    InvalidSignature,

    #[error("untrusted issuer: {0}")]
    UntrustedIssuer(String),

    #[error("missing claim: {0}")]
    MissingClaim(String),

    #[error("weak password: {0}")]
    WeakPassword(String),

    #[error("hashing error: {0}")]
    HashingError(String),

    #[error("database error: {0}")]
    DatabaseError(String),
}

pub type AuthResult<T> = Result<T, AuthError>;
