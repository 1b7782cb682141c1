//! Authenticated request context.

use jobtrail_commons::UserId;

use crate::jwt::JwtClaims;

/// Identity attached to a request after its bearer token validates.
///
/// The auth middleware inserts this into request extensions; handlers
/// read it back to scope every store call by owner.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
    pub username: String,
    pub email: String,
}

impl AuthenticatedUser {
    pub fn new(user_id: UserId, username: String, email: String) -> Self {
        Self {
            user_id,
            username,
            email,
        }
    }
}

impl From<JwtClaims> for AuthenticatedUser {
    fn from(claims: JwtClaims) -> Self {
        Self {
            user_id: claims.user_id(),
            username: claims.username,
            email: claims.email,
        }
    }
}
