// jobtrail authentication library
// Provides password hashing, JWT issue/validation, and bearer extraction

pub mod context;
pub mod error;
pub mod extract;
pub mod jwt;
pub mod password;

pub use context::AuthenticatedUser;
pub use error::{AuthError, AuthResult};
pub use extract::extract_bearer_token;
pub use jwt::{create_and_sign_token, validate_token, JwtClaims, DEFAULT_TOKEN_EXPIRY_HOURS};
pub use password::{hash_password, validate_password, verify_password};
