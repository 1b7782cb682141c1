// JWT issue and validation module

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use jobtrail_commons::UserId;

use crate::error::{AuthError, AuthResult};

/// Default token lifetime: 7 days.
pub const DEFAULT_TOKEN_EXPIRY_HOURS: i64 = 7 * 24;

/// Issuer baked into every jobtrail token.
pub const JOBTRAIL_ISSUER: &str = "jobtrail";

/// JWT claims carried by a jobtrail bearer token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtClaims {
    /// Subject (user ID)
    pub sub: String,
    /// Issuer
    pub iss: String,
    /// Expiration time (Unix timestamp)
    pub exp: usize,
    /// Issued at (Unix timestamp)
    pub iat: usize,
    /// Username (custom claim)
    pub username: String,
    /// Email (custom claim)
    pub email: String,
}

impl JwtClaims {
    /// Create claims for a user with the given lifetime (defaults to 7
    /// days).
    pub fn new(
        user_id: &UserId,
        username: &str,
        email: &str,
        expiry_hours: Option<i64>,
    ) -> Self {
        let now = chrono::Utc::now();
        let exp_hours = expiry_hours.unwrap_or(DEFAULT_TOKEN_EXPIRY_HOURS);
        let exp = now + chrono::Duration::hours(exp_hours);

        Self {
            sub: user_id.to_string(),
            iss: JOBTRAIL_ISSUER.to_string(),
            exp: exp.timestamp() as usize,
            iat: now.timestamp() as usize,
            username: username.to_string(),
            email: email.to_string(),
        }
    }

    /// The user ID the token was issued for.
    pub fn user_id(&self) -> UserId {
        UserId::new(&self.sub)
    }
}

/// Create and sign a bearer token in one step.
///
/// # Errors
/// Returns `AuthError::HashingError` if encoding fails.
pub fn create_and_sign_token(
    user_id: &UserId,
    username: &str,
    email: &str,
    expiry_hours: Option<i64>,
    secret: &str,
) -> AuthResult<(String, JwtClaims)> {
    let claims = JwtClaims::new(user_id, username, email, expiry_hours);
    let header = Header::new(Algorithm::HS256);
    let encoding_key = EncodingKey::from_secret(secret.as_bytes());

    let token = encode(&header, &claims, &encoding_key)
        .map_err(|e| AuthError::HashingError(format!("JWT encoding error: {}", e)))?;
    Ok((token, claims))
}

/// Validate a bearer token and extract its claims.
///
/// Verifies the signature, the expiration, the issuer, and that the
/// subject claim is present.
///
/// # Errors
/// - `AuthError::TokenExpired` when past `exp`
/// - `AuthError::InvalidSignature` on signature mismatch
/// - `AuthError::UntrustedIssuer` when `iss` is not jobtrail's
/// - `AuthError::MalformedAuthorization` on structurally broken tokens
/// - `AuthError::MissingClaim` when `sub` is empty
pub fn validate_token(token: &str, secret: &str) -> AuthResult<JwtClaims> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;
    validation.validate_nbf = false;

    let decoding_key = DecodingKey::from_secret(secret.as_bytes());
    let token_data =
        decode::<JwtClaims>(token, &decoding_key, &validation).map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => AuthError::TokenExpired,
            ErrorKind::InvalidSignature => AuthError::InvalidSignature,
            _ => AuthError::MalformedAuthorization(format!("JWT decode error: {}", e)),
        })?;

    let claims = token_data.claims;

    if claims.iss != JOBTRAIL_ISSUER {
        return Err(AuthError::UntrustedIssuer(claims.iss));
    }
    if claims.sub.is_empty() {
        return Err(AuthError::MissingClaim("sub".to_string()));
    }

    Ok(claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signed_token(secret: &str, exp_offset_secs: i64, issuer: &str) -> String {
        let now = chrono::Utc::now().timestamp() as usize;
        let claims = JwtClaims {
            sub: "user_123".to_string(),
            iss: issuer.to_string(),
            exp: ((now as i64) + exp_offset_secs) as usize,
            iat: now,
            username: "testuser".to_string(),
            email: "test@example.com".to_string(),
        };

        let header = Header::new(Algorithm::HS256);
        let encoding_key = EncodingKey::from_secret(secret.as_bytes());
        encode(&header, &claims, &encoding_key).unwrap()
    }

    #[test]
    fn test_validate_token_valid() {
        let secret = "test-secret-key";
        let token = signed_token(secret, 3600, JOBTRAIL_ISSUER);

        let claims = validate_token(&token, secret).expect("token should validate");
        assert_eq!(claims.sub, "user_123");
        assert_eq!(claims.username, "testuser");
        assert_eq!(claims.user_id(), UserId::new("user_123"));
    }

    #[test]
    fn test_validate_token_wrong_secret() {
        let secret = "test-secret-key";
        let token = signed_token(secret, 3600, JOBTRAIL_ISSUER);

        let result = validate_token(&token, "wrong-secret");
        assert!(matches!(result, Err(AuthError::InvalidSignature)));
    }

    #[test]
    fn test_validate_token_expired() {
        let secret = "test-secret-key";
        let token = signed_token(secret, -3600, JOBTRAIL_ISSUER);

        let result = validate_token(&token, secret);
        assert!(matches!(result, Err(AuthError::TokenExpired)));
    }

    #[test]
    fn test_validate_token_untrusted_issuer() {
        let secret = "test-secret-key";
        let token = signed_token(secret, 3600, "evil.example.com");

        let result = validate_token(&token, secret);
        assert!(matches!(result, Err(AuthError::UntrustedIssuer(_))));
    }

    #[test]
    fn test_validate_empty_string_returns_error() {
        let result = validate_token("", "any-secret");
        assert!(result.is_err(), "empty token string must be rejected");
    }

    #[test]
    fn test_validate_truncated_jwt_returns_error() {
        let result = validate_token("eyJhbGciOiJIUzI1NiJ9.e30", "any-secret");
        assert!(
            result.is_err(),
            "truncated JWT (missing signature) must be rejected"
        );
    }

    #[test]
    fn test_issued_token_round_trips() {
        let secret = "round-trip-secret";
        let user_id = UserId::new("u_round");
        let (token, issued) =
            create_and_sign_token(&user_id, "roundy", "roundy@example.com", None, secret).unwrap();

        let claims = validate_token(&token, secret).unwrap();
        assert_eq!(claims.sub, issued.sub);
        assert_eq!(claims.email, "roundy@example.com");
        // Default lifetime is 7 days.
        assert_eq!(
            claims.exp as i64 - claims.iat as i64,
            DEFAULT_TOKEN_EXPIRY_HOURS * 3600
        );
    }
}
