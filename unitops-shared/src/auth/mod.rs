/// Authentication and authorization for unitops
///
/// # Modules
///
/// - [`password`]: Argon2id password hashing and verification
/// - [`jwt`]: Bearer token generation and validation
/// - [`middleware`]: Axum middleware producing an [`middleware::AuthenticatedUser`]
/// - [`policy`]: Role and business-unit access rules
///
/// # Example
///
/// ```no_run
/// use unitops_shared::auth::password::{hash_password, verify_password};
/// use unitops_shared::auth::jwt::{create_token, validate_token, Claims};
/// use unitops_shared::models::user::Role;
/// use chrono::Duration;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// // Password authentication
/// let hash = hash_password("user_password")?;
/// assert!(verify_password("user_password", &hash)?);
///
/// // Token generation
/// let claims = Claims::new("user@example.com".to_string(), Role::Customer, Duration::hours(1));
/// let token = create_token(&claims, "secret-key-at-least-32-bytes-long!")?;
/// # Ok(())
/// # }
/// ```

pub mod jwt;
pub mod middleware;
pub mod password;
pub mod policy;
