/// Startup provisioning
///
/// Creates the bootstrap admin account from configuration if no account with
/// that email exists yet. A uniqueness violation from a concurrent bootstrap
/// is the one failure the system swallows: it means the account already
/// exists, which is the desired end state.

use sqlx::PgPool;
use tracing::{info, warn};
use unitops_shared::auth::password::hash_password;
use unitops_shared::models::user::{CreateUser, Role, User};

use crate::config::AdminConfig;

/// Ensures the configured admin account exists
///
/// # Returns
///
/// True if the account was created, false if it already existed
///
/// # Errors
///
/// Returns an error on hashing failures or database errors other than a
/// duplicate-email violation.
pub async fn ensure_admin(pool: &PgPool, admin: &AdminConfig) -> anyhow::Result<bool> {
    if User::find_by_email(pool, &admin.email).await?.is_some() {
        info!(email = %admin.email, "Admin account already exists");
        return Ok(false);
    }

    let password_hash = hash_password(&admin.password)?;

    let result = User::create(
        pool,
        CreateUser {
            name: admin.name.clone(),
            email: admin.email.clone(),
            role: Role::Admin,
            gender: None,
            unit_id: None,
            password_hash,
        },
    )
    .await;

    match result {
        Ok(user) => {
            info!(email = %user.email, "Admin account created");
            Ok(true)
        }
        Err(sqlx::Error::Database(db_err))
            if db_err.constraint().is_some_and(|c| c.contains("email")) =>
        {
            // Lost a race with another instance; the account exists
            warn!(email = %admin.email, "Admin account already exists (concurrent bootstrap)");
            Ok(false)
        }
        Err(e) => Err(e.into()),
    }
}
