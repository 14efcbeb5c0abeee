//! JWT configuration.
//!
//! All token settings come from environment variables:
//!
//! ```bash
//! export JWT_SECRET="your-super-secret-jwt-key"
//! export JWT_EXPIRATION_HOURS="24"
//! export JWT_REFRESH_EXPIRATION_DAYS="7"
//! ```

use std::env;

/// JSON Web Token settings.
pub struct JwtConfig;

impl JwtConfig {
    /// HMAC signing secret from `JWT_SECRET`.
    ///
    /// Falls back to a development value and logs a warning when unset.
    pub fn secret() -> String {
        env::var("JWT_SECRET")
            .unwrap_or_else(|_| {
                log::warn!("JWT_SECRET not set, using default (not secure for production!)");
                "your-secret-key".to_string()
            })
    }

    /// Access token lifetime in hours, from `JWT_EXPIRATION_HOURS`.
    /// Defaults to 24.
    pub fn expiration_hours() -> i64 {
        env::var("JWT_EXPIRATION_HOURS")
            .unwrap_or_else(|_| "24".to_string())
            .parse()
            .unwrap_or(24)
    }

    /// Refresh token lifetime in days, from `JWT_REFRESH_EXPIRATION_DAYS`.
    /// Defaults to 7.
    pub fn refresh_expiration_days() -> i64 {
        env::var("JWT_REFRESH_EXPIRATION_DAYS")
            .unwrap_or_else(|_| "7".to_string())
            .parse()
            .unwrap_or(7)
    }
}
