// Password hashing and validation module

use bcrypt::{hash, verify, DEFAULT_COST};

use crate::error::{AuthError, AuthResult};

/// Bcrypt cost factor for password hashing.
pub const BCRYPT_COST: u32 = DEFAULT_COST;

/// Minimum password length at registration.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Maximum password length (bcrypt has a 72-byte limit).
pub const MAX_PASSWORD_LENGTH: usize = 72;

/// Hash a password using bcrypt.
///
/// Runs on the blocking thread pool so the async runtime is never stalled
/// by the (intentionally slow) hash.
///
/// # Errors
/// Returns `AuthError::HashingError` if bcrypt fails.
pub async fn hash_password(password: &str, cost: Option<u32>) -> AuthResult<String> {
    let password = password.to_string();
    let cost = cost.unwrap_or(BCRYPT_COST);

    tokio::task::spawn_blocking(move || {
        hash(password, cost).map_err(|e| AuthError::HashingError(e.to_string()))
    })
    .await
    .map_err(|e| AuthError::HashingError(format!("task join error: {}", e)))?
}

/// Verify a password against a bcrypt hash.
///
/// Runs on the blocking thread pool to avoid blocking the async runtime.
///
/// # Errors
/// Returns `AuthError::HashingError` if bcrypt verification fails.
pub async fn verify_password(password: &str, hash: &str) -> AuthResult<bool> {
    let password = password.to_string();
    let hash = hash.to_string();

    tokio::task::spawn_blocking(move || {
        verify(password, &hash).map_err(|e| AuthError::HashingError(e.to_string()))
    })
    .await
    .map_err(|e| AuthError::HashingError(format!("task join error: {}", e)))?
}

/// Validate a password meets the registration requirements.
///
/// # Errors
/// Returns `AuthError::WeakPassword` with the specific reason.
pub fn validate_password(password: &str) -> AuthResult<()> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword(format!(
            "password must be at least {} characters",
            MIN_PASSWORD_LENGTH
        )));
    }

    // Bcrypt truncates beyond 72 bytes; reject instead of silently
    // hashing a prefix.
    if password.len() > MAX_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword(format!(
            "password must be at most {} characters",
            MAX_PASSWORD_LENGTH
        )));
    }

    Ok(())
}
