//! Auth settings injected into handlers as application data.

/// Token signing and password hashing parameters.
///
/// The server builds this from its config file; tests construct it
/// directly with a throwaway secret and a low bcrypt cost.
#[derive(Debug, Clone)]
pub struct AuthSettings {
    /// HS256 signing secret.
    pub jwt_secret: String,
    /// Token lifetime in hours.
    pub token_expiry_hours: i64,
    /// Bcrypt cost override; `None` uses the library default.
    pub bcrypt_cost: Option<u32>,
}

impl AuthSettings {
    pub fn new(jwt_secret: impl Into<String>, token_expiry_hours: i64) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            token_expiry_hours,
            bcrypt_cost: None,
        }
    }
}
