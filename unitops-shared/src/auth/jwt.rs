/// JWT token generation and validation module
///
/// Tokens are signed using HS256 (HMAC-SHA256) and carry the user's email as
/// subject plus their role. Login issues a token with a one-hour expiry by
/// default; the TTL is configurable at the call site.
///
/// Validation fails closed: a bad signature, malformed token, wrong issuer, or
/// an expiry in the past all produce a definite `Err` — untrusted input never
/// panics.
///
/// # Example
///
/// ```
/// use unitops_shared::auth::jwt::{create_token, validate_token, Claims};
/// use unitops_shared::models::user::Role;
/// use chrono::Duration;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let secret = "your-secret-key-at-least-32-bytes!!";
///
/// let claims = Claims::new("user@example.com".to_string(), Role::Customer, Duration::hours(1));
/// let token = create_token(&claims, secret)?;
///
/// let validated = validate_token(&token, secret)?;
/// assert_eq!(validated.sub, "user@example.com");
/// # Ok(())
/// # }
/// ```

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::models::user::Role;

/// Token issuer embedded in and required of every token
pub const ISSUER: &str = "unitops";

/// Error type for JWT operations
#[derive(Debug, thiserror::Error)]
pub enum JwtError {
    /// Failed to create token
    #[error("Failed to create token: {0}")]
    CreateError(String),

    /// Failed to validate token
    #[error("Failed to validate token: {0}")]
    ValidationError(String),

    /// Token has expired
    #[error("Token has expired")]
    Expired,

    /// Invalid issuer
    #[error("Invalid issuer: expected {expected}")]
    InvalidIssuer { expected: String },
}

/// JWT claims structure
///
/// # Standard Claims
///
/// - `sub`: Subject (user email)
/// - `iss`: Issuer (always "unitops")
/// - `iat`: Issued at timestamp
/// - `exp`: Expiration timestamp
/// - `nbf`: Not before timestamp
///
/// # Custom Claims
///
/// - `role`: The user's role at issue time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject - user email
    pub sub: String,

    /// Issuer - always "unitops"
    pub iss: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Not before (Unix timestamp)
    pub nbf: i64,

    /// User role (custom claim)
    pub role: Role,
}

impl Claims {
    /// Creates claims expiring `expires_in` from now
    ///
    /// # Example
    ///
    /// ```
    /// use unitops_shared::auth::jwt::Claims;
    /// use unitops_shared::models::user::Role;
    /// use chrono::Duration;
    ///
    /// let claims = Claims::new("admin@example.com".to_string(), Role::Admin, Duration::hours(1));
    /// assert!(!claims.is_expired());
    /// ```
    pub fn new(email: String, role: Role, expires_in: Duration) -> Self {
        let now = Utc::now();
        let expiration = now + expires_in;

        Self {
            sub: email,
            iss: ISSUER.to_string(),
            iat: now.timestamp(),
            exp: expiration.timestamp(),
            nbf: now.timestamp(),
            role,
        }
    }

    /// Checks if the token has expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }

    /// Gets time until expiration, if any remains
    pub fn time_until_expiration(&self) -> Option<Duration> {
        let now = Utc::now().timestamp();
        if self.exp > now {
            Some(Duration::seconds(self.exp - now))
        } else {
            None
        }
    }
}

/// Creates a signed JWT token from claims
///
/// # Errors
///
/// Returns `JwtError::CreateError` if token encoding fails
///
/// # Security
///
/// The secret should be at least 32 bytes (256 bits) for HS256, randomly
/// generated, and supplied via the environment.
pub fn create_token(claims: &Claims, secret: &str) -> Result<String, JwtError> {
    let header = Header::new(Algorithm::HS256);
    let key = EncodingKey::from_secret(secret.as_bytes());

    encode(&header, claims, &key)
        .map_err(|e| JwtError::CreateError(format!("Token encoding failed: {}", e)))
}

/// Validates a JWT token and extracts claims
///
/// Verifies:
/// - Signature is valid
/// - Token hasn't expired
/// - Issuer is "unitops"
/// - Token is not used before its nbf time
///
/// # Errors
///
/// Returns an error for any invalid, expired, or malformed token. Never
/// panics on untrusted input.
///
/// # Example
///
/// ```
/// use unitops_shared::auth::jwt::{create_token, validate_token, Claims};
/// use unitops_shared::models::user::Role;
/// use chrono::Duration;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let secret = "your-secret-key-at-least-32-bytes!!";
/// let claims = Claims::new("user@example.com".to_string(), Role::Employee, Duration::hours(1));
/// let token = create_token(&claims, secret)?;
///
/// let validated = validate_token(&token, secret)?;
/// assert_eq!(validated.sub, "user@example.com");
/// assert_eq!(validated.role, Role::Employee);
/// # Ok(())
/// # }
/// ```
pub fn validate_token(token: &str, secret: &str) -> Result<Claims, JwtError> {
    let key = DecodingKey::from_secret(secret.as_bytes());

    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[ISSUER]);
    validation.validate_exp = true;
    validation.validate_nbf = true;

    let token_data = decode::<Claims>(token, &key, &validation).map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => JwtError::Expired,
        jsonwebtoken::errors::ErrorKind::InvalidIssuer => JwtError::InvalidIssuer {
            expected: ISSUER.to_string(),
        },
        _ => JwtError::ValidationError(format!("Token validation failed: {}", e)),
    })?;

    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-key-at-least-32-bytes-long";

    #[test]
    fn test_claims_creation() {
        let claims = Claims::new(
            "user@example.com".to_string(),
            Role::Customer,
            Duration::hours(1),
        );

        assert_eq!(claims.sub, "user@example.com");
        assert_eq!(claims.iss, ISSUER);
        assert_eq!(claims.role, Role::Customer);
        assert!(!claims.is_expired());

        let time_left = claims.time_until_expiration().unwrap();
        assert!(time_left.num_seconds() > 3500);
        assert!(time_left.num_seconds() <= 3600);
    }

    #[test]
    fn test_create_and_validate_token() {
        let claims = Claims::new(
            "admin@example.com".to_string(),
            Role::Admin,
            Duration::hours(1),
        );
        let token = create_token(&claims, SECRET).expect("Should create token");

        let validated = validate_token(&token, SECRET).expect("Should validate token");
        assert_eq!(validated.sub, "admin@example.com");
        assert_eq!(validated.role, Role::Admin);
        assert_eq!(validated.iss, ISSUER);
    }

    #[test]
    fn test_validate_with_wrong_secret() {
        let claims = Claims::new(
            "user@example.com".to_string(),
            Role::Employee,
            Duration::hours(1),
        );
        let token = create_token(&claims, "secret1").expect("Should create token");

        let result = validate_token(&token, "wrong-secret");
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_expired_token() {
        // Token that expired an hour ago
        let claims = Claims::new(
            "user@example.com".to_string(),
            Role::Customer,
            Duration::seconds(-3600),
        );

        assert!(claims.is_expired());
        assert!(claims.time_until_expiration().is_none());

        let token = create_token(&claims, SECRET).expect("Should create token");
        let result = validate_token(&token, SECRET);

        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), JwtError::Expired));
    }

    #[test]
    fn test_validate_garbage_token() {
        assert!(validate_token("not-a-token", SECRET).is_err());
        assert!(validate_token("", SECRET).is_err());
        assert!(validate_token("a.b.c", SECRET).is_err());
    }

    #[test]
    fn test_validate_wrong_issuer() {
        // Hand-roll claims with a foreign issuer
        let mut claims = Claims::new(
            "user@example.com".to_string(),
            Role::Customer,
            Duration::hours(1),
        );
        claims.iss = "someone-else".to_string();

        let token = create_token(&claims, SECRET).expect("Should create token");
        let result = validate_token(&token, SECRET);

        assert!(result.is_err());
        assert!(matches!(
            result.unwrap_err(),
            JwtError::InvalidIssuer { .. }
        ));
    }

    #[test]
    fn test_role_survives_roundtrip() {
        for role in [Role::Admin, Role::Employee, Role::Customer] {
            let claims = Claims::new("x@example.com".to_string(), role, Duration::hours(1));
            let token = create_token(&claims, SECRET).unwrap();
            let validated = validate_token(&token, SECRET).unwrap();
            assert_eq!(validated.role, role);
        }
    }
}
