//! JWT claim and token-pair structures.
//!
//! RFC 7519 standard claims plus application-specific access control
//! claims.

use serde::{Deserialize, Serialize};

/// JWT payload.
///
/// Carries the minimum needed for authorization decisions:
///
/// - `sub`: subject (user id)
/// - `iat` / `exp`: issue and expiry times (Unix timestamps)
/// - `email`, `role`, `permissions`: access control claims
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject (user id, hex)
    pub sub: String,
    /// User email
    pub email: String,
    /// Assigned role
    pub role: String,
    /// Granted permissions in wire form
    pub permissions: Vec<String>,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiry (Unix timestamp)
    pub exp: i64,
}

/// Token set handed to clients, shaped after the OAuth 2.0 token
/// response.
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenPair {
    /// Short-lived API access token
    pub access_token: String,
    /// Long-lived refresh token
    pub refresh_token: Option<String>,
    /// Access token lifetime in seconds
    pub expires_in: i64,
}
