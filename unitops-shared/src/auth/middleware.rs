/// Authentication support for Axum
///
/// This module provides the single authenticate step every protected request
/// goes through: extract the bearer token, validate it, and load the account
/// it names. The result is a typed [`AuthenticatedUser`] injected into
/// request extensions, so handlers and the access policy never re-query the
/// store for identity.
///
/// # Example
///
/// ```no_run
/// use axum::Extension;
/// use unitops_shared::auth::middleware::AuthenticatedUser;
///
/// async fn handler(Extension(user): Extension<AuthenticatedUser>) -> String {
///     format!("Hello, {} ({})", user.name, user.role.as_str())
/// }
/// ```

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use super::jwt::validate_token;
use crate::models::user::{Role, User};

/// Verified identity attached to every authenticated request
///
/// Produced once at the boundary from the token's subject plus one user
/// lookup; all policy decisions operate on this value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    /// Account ID
    pub id: Uuid,

    /// Display name
    pub name: String,

    /// Email address (the token subject)
    pub email: String,

    /// Account role
    pub role: Role,

    /// Business-unit assignment, if any
    pub unit_id: Option<Uuid>,
}

impl From<User> for AuthenticatedUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
            unit_id: user.unit_id,
        }
    }
}

/// Error type for the authentication step
#[derive(Debug)]
pub enum AuthError {
    /// Missing authorization header
    MissingCredentials,

    /// Authorization header is not a bearer token
    InvalidFormat(String),

    /// Token validation failed (bad signature, expired, malformed)
    InvalidToken(String),

    /// Token subject no longer names an account
    UnknownSubject,

    /// Database error during user lookup
    DatabaseError(String),
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        match self {
            AuthError::MissingCredentials => {
                (StatusCode::UNAUTHORIZED, "Missing credentials").into_response()
            }
            AuthError::InvalidFormat(msg) => (StatusCode::BAD_REQUEST, msg).into_response(),
            AuthError::InvalidToken(msg) => (StatusCode::UNAUTHORIZED, msg).into_response(),
            AuthError::UnknownSubject => {
                (StatusCode::UNAUTHORIZED, "Invalid or expired token").into_response()
            }
            AuthError::DatabaseError(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
            }
        }
    }
}

/// Authenticates a bearer token against the user store
///
/// Validates the token (fails closed on any invalid input) and resolves its
/// subject to an account.
///
/// # Errors
///
/// - [`AuthError::InvalidToken`] for a bad signature, expiry, or malformed token
/// - [`AuthError::UnknownSubject`] when the subject email has no account
/// - [`AuthError::DatabaseError`] when the lookup itself fails
///
/// # Example
///
/// ```no_run
/// # use sqlx::PgPool;
/// # use unitops_shared::auth::middleware::{authenticate, AuthError};
/// # async fn example(pool: PgPool) -> Result<(), AuthError> {
/// let user = authenticate(&pool, "eyJ...", "jwt-secret").await?;
/// println!("authenticated {}", user.email);
/// # Ok(())
/// # }
/// ```
pub async fn authenticate(
    pool: &PgPool,
    token: &str,
    secret: &str,
) -> Result<AuthenticatedUser, AuthError> {
    let claims =
        validate_token(token, secret).map_err(|e| AuthError::InvalidToken(e.to_string()))?;

    let user = User::find_by_email(pool, &claims.sub)
        .await
        .map_err(|e| AuthError::DatabaseError(e.to_string()))?
        .ok_or(AuthError::UnknownSubject)?;

    Ok(AuthenticatedUser::from(user))
}

/// Extracts the bearer token from an Authorization header value
///
/// # Errors
///
/// Returns [`AuthError::InvalidFormat`] when the header does not carry a
/// `Bearer ` prefix.
pub fn bearer_token(header_value: &str) -> Result<&str, AuthError> {
    header_value
        .strip_prefix("Bearer ")
        .ok_or_else(|| AuthError::InvalidFormat("Expected Bearer token".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bearer_token_extraction() {
        assert_eq!(bearer_token("Bearer abc123").unwrap(), "abc123");
        assert!(bearer_token("Basic abc123").is_err());
        assert!(bearer_token("abc123").is_err());
    }

    #[test]
    fn test_authenticated_user_from_user() {
        let user = User {
            id: Uuid::new_v4(),
            name: "Jo".to_string(),
            email: "jo@example.com".to_string(),
            role: Role::Employee,
            gender: None,
            unit_id: Some(Uuid::new_v4()),
            password_hash: "$argon2id$...".to_string(),
            created_at: chrono::Utc::now(),
        };

        let auth = AuthenticatedUser::from(user.clone());
        assert_eq!(auth.id, user.id);
        assert_eq!(auth.email, user.email);
        assert_eq!(auth.role, Role::Employee);
        assert_eq!(auth.unit_id, user.unit_id);
    }
}
