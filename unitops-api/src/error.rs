/// Error handling for the API server
///
/// This module provides a unified error type that maps to HTTP responses.
/// All handlers return `Result<T, ApiError>` which converts to the
/// appropriate status code and a JSON body.
///
/// The taxonomy follows the access policy's failure signaling: an absent or
/// invalid token is Unauthorized, an authenticated caller with the wrong role
/// or unit is Forbidden, a missing referenced entity is NotFound, and domain
/// validation failures (duplicate email, insufficient stock, threshold not
/// met) are BadRequest. Duplicate email deliberately reports as BadRequest
/// rather than Conflict.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::fmt;

use unitops_shared::auth::{middleware::AuthError, password::PasswordError, policy::AuthzError};
use unitops_shared::ordering::OrderError;

/// API result type alias
pub type ApiResult<T> = Result<T, ApiError>;

/// Unified API error type
#[derive(Debug)]
pub enum ApiError {
    /// Bad request (400)
    BadRequest(String),

    /// Unauthorized (401)
    Unauthorized(String),

    /// Forbidden (403)
    Forbidden(String),

    /// Not found (404)
    NotFound(String),

    /// Unprocessable entity (422) - request validation errors
    ValidationError(Vec<ValidationErrorDetail>),

    /// Internal server error (500)
    InternalError(String),
}

/// Validation error detail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationErrorDetail {
    /// Field that failed validation
    pub field: String,

    /// Error message
    pub message: String,
}

/// Error response format
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code (e.g., "bad_request", "unauthorized")
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// Optional validation errors
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<ValidationErrorDetail>>,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            ApiError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            ApiError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::ValidationError(errors) => {
                write!(f, "Validation failed: {} errors", errors.len())
            }
            ApiError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message, details) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg, None),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "unauthorized", msg, None),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, "forbidden", msg, None),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg, None),
            ApiError::ValidationError(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "validation_error",
                "Request validation failed".to_string(),
                Some(errors),
            ),
            ApiError::InternalError(msg) => {
                // Log internal errors but don't expose details to clients
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                    None,
                )
            }
        };

        let body = Json(ErrorResponse {
            error: error_code.to_string(),
            message,
            details,
        });

        (status, body).into_response()
    }
}

/// Convert sqlx errors to API errors
impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => ApiError::NotFound("Resource not found".to_string()),
            sqlx::Error::Database(db_err) => {
                // Unique violations surface as domain validation failures
                if let Some(constraint) = db_err.constraint() {
                    if constraint.contains("email") {
                        return ApiError::BadRequest("Email already exists".to_string());
                    }
                    return ApiError::BadRequest(format!("Constraint violation: {}", constraint));
                }

                ApiError::InternalError(format!("Database error: {}", db_err))
            }
            _ => ApiError::InternalError(format!("Database error: {}", err)),
        }
    }
}

/// Convert authentication errors to API errors
impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::MissingCredentials => {
                ApiError::Unauthorized("Missing credentials".to_string())
            }
            AuthError::InvalidFormat(msg) => ApiError::BadRequest(msg),
            AuthError::InvalidToken(_) | AuthError::UnknownSubject => {
                ApiError::Unauthorized("Invalid or expired token".to_string())
            }
            AuthError::DatabaseError(msg) => ApiError::InternalError(msg),
        }
    }
}

/// Convert authorization errors to API errors
impl From<AuthzError> for ApiError {
    fn from(err: AuthzError) -> Self {
        match err {
            AuthzError::RoleDenied { .. } => ApiError::Forbidden(err.to_string()),
            AuthzError::UnitMismatch => ApiError::Forbidden(err.to_string()),
            AuthzError::MissingUnit => ApiError::BadRequest(err.to_string()),
        }
    }
}

/// Convert order engine errors to API errors
impl From<OrderError> for ApiError {
    fn from(err: OrderError) -> Self {
        match err {
            OrderError::UnitNotFound(_) | OrderError::ItemNotFound(_) => {
                ApiError::NotFound(err.to_string())
            }
            OrderError::InsufficientStock { .. }
            | OrderError::InvalidQuantity { .. }
            | OrderError::EmptyOrder => ApiError::BadRequest(err.to_string()),
            OrderError::Database(db_err) => ApiError::from(db_err),
        }
    }
}

/// Convert password errors to API errors
impl From<PasswordError> for ApiError {
    fn from(err: PasswordError) -> Self {
        ApiError::InternalError(format!("Password operation failed: {}", err))
    }
}

/// Convert JWT errors to API errors
impl From<unitops_shared::auth::jwt::JwtError> for ApiError {
    fn from(err: unitops_shared::auth::jwt::JwtError) -> Self {
        match err {
            unitops_shared::auth::jwt::JwtError::Expired => {
                ApiError::Unauthorized("Token expired".to_string())
            }
            unitops_shared::auth::jwt::JwtError::InvalidIssuer { .. } => {
                ApiError::Unauthorized("Invalid token issuer".to_string())
            }
            _ => ApiError::Unauthorized(format!("Invalid token: {}", err)),
        }
    }
}

/// Converts validator failures into a 422 with per-field details
pub fn validation_error(errors: validator::ValidationErrors) -> ApiError {
    let details: Vec<ValidationErrorDetail> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| ValidationErrorDetail {
                field: field.to_string(),
                message: error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| "Validation failed".to_string()),
            })
        })
        .collect();

    ApiError::ValidationError(details)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ApiError::BadRequest("Invalid input".to_string());
        assert_eq!(err.to_string(), "Bad request: Invalid input");

        let err = ApiError::NotFound("User not found".to_string());
        assert_eq!(err.to_string(), "Not found: User not found");
    }

    #[test]
    fn test_validation_error_display() {
        let errors = vec![
            ValidationErrorDetail {
                field: "email".to_string(),
                message: "Invalid email format".to_string(),
            },
            ValidationErrorDetail {
                field: "rating".to_string(),
                message: "Rating must be between 1 and 5".to_string(),
            },
        ];

        let err = ApiError::ValidationError(errors);
        assert_eq!(err.to_string(), "Validation failed: 2 errors");
    }

    #[test]
    fn test_authz_error_mapping() {
        // Wrong role or wrong unit is Forbidden; a missing unit assignment is
        // a domain validation failure
        let err: ApiError = AuthzError::UnitMismatch.into();
        assert!(matches!(err, ApiError::Forbidden(_)));

        let err: ApiError = AuthzError::MissingUnit.into();
        assert!(matches!(err, ApiError::BadRequest(_)));

        let err: ApiError = AuthzError::RoleDenied {
            action: "x",
            required: "admin",
        }
        .into();
        assert!(matches!(err, ApiError::Forbidden(_)));
    }

    #[test]
    fn test_order_error_mapping() {
        let err: ApiError = OrderError::UnitNotFound("X".to_string()).into();
        assert!(matches!(err, ApiError::NotFound(_)));

        let err: ApiError = OrderError::InsufficientStock {
            name: "Widget".to_string(),
            available: 2,
        }
        .into();
        assert!(matches!(err, ApiError::BadRequest(_)));

        let err: ApiError = OrderError::EmptyOrder.into();
        assert!(matches!(err, ApiError::BadRequest(_)));
    }

    #[test]
    fn test_auth_error_mapping() {
        let err: ApiError = AuthError::MissingCredentials.into();
        assert!(matches!(err, ApiError::Unauthorized(_)));

        let err: ApiError = AuthError::InvalidToken("bad".to_string()).into();
        assert!(matches!(err, ApiError::Unauthorized(_)));
    }
}
