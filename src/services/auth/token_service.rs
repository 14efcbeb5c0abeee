//! JWT token management.
//!
//! HMAC-SHA256 signed tokens carrying the user's id, email, role and
//! permission strings, so guards can authorize without a database
//! round trip.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use singleton_macro::service;

use crate::config::JwtConfig;
use crate::domain::entities::users::user::User;
use crate::domain::models::token::token::{TokenClaims, TokenPair};
use crate::errors::errors::AppError;

#[service(name = "token")]
pub struct TokenService {
    // no external dependencies
}

impl TokenService {
    /// Issues a short-lived access token for the user.
    ///
    /// # Errors
    ///
    /// * `AppError::InternalError` - user has no id or signing failed
    pub fn generate_access_token(&self, user: &User) -> Result<String, AppError> {
        let expiration = Utc::now() + Duration::hours(JwtConfig::expiration_hours());
        self.sign(user, expiration.timestamp())
    }

    /// Issues a long-lived refresh token for the user.
    pub fn generate_refresh_token(&self, user: &User) -> Result<String, AppError> {
        let expiration = Utc::now() + Duration::days(JwtConfig::refresh_expiration_days());
        self.sign(user, expiration.timestamp())
    }

    fn sign(&self, user: &User, exp: i64) -> Result<String, AppError> {
        let claims = TokenClaims {
            sub: user
                .id_string()
                .ok_or_else(|| AppError::InternalError("User has no id".to_string()))?,
            email: user.email.clone(),
            role: user.role.as_str().to_string(),
            permissions: user.permission_strings(),
            iat: Utc::now().timestamp(),
            exp,
        };

        let secret = JwtConfig::secret();
        let encoding_key = EncodingKey::from_secret(secret.as_ref());

        encode(&Header::default(), &claims, &encoding_key)
            .map_err(|e| AppError::InternalError(format!("Token signing failed: {}", e)))
    }

    /// Issues an access/refresh pair with the access expiry in seconds.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let pair = TokenService::instance().generate_token_pair(&user)?;
    /// println!("expires in {} seconds", pair.expires_in);
    /// ```
    pub fn generate_token_pair(&self, user: &User) -> Result<TokenPair, AppError> {
        let access_token = self.generate_access_token(user)?;
        let refresh_token = self.generate_refresh_token(user)?;
        let expires_in = JwtConfig::expiration_hours() * 3600;

        Ok(TokenPair {
            access_token,
            refresh_token: Some(refresh_token),
            expires_in,
        })
    }

    /// Verifies a token's signature and expiry, returning its claims.
    ///
    /// # Errors
    ///
    /// * `AppError::AuthenticationError` - expired or malformed token
    /// * `AppError::InternalError` - any other verification failure
    pub fn verify_token(&self, token: &str) -> Result<TokenClaims, AppError> {
        let secret = JwtConfig::secret();
        let decoding_key = DecodingKey::from_secret(secret.as_ref());

        decode::<TokenClaims>(token, &decoding_key, &Validation::default())
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    AppError::AuthenticationError("Token has expired".to_string())
                }
                jsonwebtoken::errors::ErrorKind::InvalidToken => {
                    AppError::AuthenticationError("Invalid token".to_string())
                }
                _ => AppError::AuthenticationError(format!("Token verification failed: {}", e)),
            })
    }

    /// Strips the `Bearer ` prefix from an Authorization header value.
    pub fn extract_bearer_token<'a>(&self, auth_header: &'a str) -> Result<&'a str, AppError> {
        match auth_header.strip_prefix("Bearer ") {
            Some(token) => Ok(token),
            None => Err(AppError::AuthenticationError(
                "Invalid authorization header format".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::users::user::UserRole;
    use mongodb::bson::oid::ObjectId;

    fn sample_user() -> User {
        let mut user = User::new(
            "Jane".to_string(),
            "Doe".to_string(),
            "jane@example.com".to_string(),
            "hash".to_string(),
            UserRole::Trainer,
        );
        user.id = Some(ObjectId::new());
        user
    }

    #[test]
    fn round_trips_claims() {
        let service = TokenService {};
        let user = sample_user();

        let token = service.generate_access_token(&user).unwrap();
        let claims = service.verify_token(&token).unwrap();

        assert_eq!(claims.sub, user.id_string().unwrap());
        assert_eq!(claims.email, "jane@example.com");
        assert_eq!(claims.role, "trainer");
        assert!(claims.permissions.contains(&"manage:workouts".to_string()));
    }

    #[test]
    fn rejects_user_without_id() {
        let service = TokenService {};
        let user = User::new(
            "No".to_string(),
            "Id".to_string(),
            "noid@example.com".to_string(),
            "hash".to_string(),
            UserRole::User,
        );

        assert!(service.generate_access_token(&user).is_err());
    }

    #[test]
    fn rejects_tampered_token() {
        let service = TokenService {};
        let token = service.generate_access_token(&sample_user()).unwrap();
        let tampered = format!("{}x", token);

        assert!(service.verify_token(&tampered).is_err());
    }

    #[test]
    fn extracts_bearer_tokens() {
        let service = TokenService {};
        assert_eq!(service.extract_bearer_token("Bearer abc").unwrap(), "abc");
        assert!(service.extract_bearer_token("Basic abc").is_err());
        assert!(service.extract_bearer_token("abc").is_err());
    }
}
