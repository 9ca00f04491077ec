/// User model and database operations
///
/// Users carry one of three roles and an optional business-unit assignment.
/// Employees and admins may be assigned to a unit; a customer's unit
/// assignment is never used for scoping.
///
/// # Schema
///
/// ```sql
/// CREATE TYPE user_role AS ENUM ('admin', 'employee', 'customer');
///
/// CREATE TABLE users (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     name VARCHAR(100) NOT NULL,
///     email VARCHAR(150) NOT NULL UNIQUE,
///     role user_role NOT NULL,
///     gender VARCHAR(10),
///     unit_id UUID REFERENCES business_units(id),
///     password_hash VARCHAR(255) NOT NULL,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Account roles
///
/// Stored as the Postgres enum `user_role` and embedded in token claims.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Full CRUD on any unit; sees all orders, feedback, and reports
    Admin,

    /// CRUD and visibility restricted to the assigned business unit
    Employee,

    /// May place orders and leave feedback; no staff surfaces
    Customer,
}

impl Role {
    /// Role as its wire/database string
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Employee => "employee",
            Role::Customer => "customer",
        }
    }

    /// Staff roles see the read-side surfaces (inventory, orders, reports)
    pub fn is_staff(&self) -> bool {
        matches!(self, Role::Admin | Role::Employee)
    }
}

/// User model representing an account
///
/// Passwords are stored as Argon2id hashes, never in plaintext.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Unique user ID (UUID v4)
    pub id: Uuid,

    /// Display name
    pub name: String,

    /// Email address, unique across all users
    pub email: String,

    /// Account role
    pub role: Role,

    /// Optional gender
    pub gender: Option<String>,

    /// Optional business-unit assignment
    pub unit_id: Option<Uuid>,

    /// Argon2id password hash
    pub password_hash: String,

    /// When the account was created
    pub created_at: DateTime<Utc>,
}

/// Input for creating a new user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    /// Display name
    pub name: String,

    /// Email address (must be unique)
    pub email: String,

    /// Account role
    pub role: Role,

    /// Optional gender
    pub gender: Option<String>,

    /// Optional business-unit assignment
    pub unit_id: Option<Uuid>,

    /// Argon2id password hash (NOT a plaintext password!)
    pub password_hash: String,
}

/// Input for updating an existing user
///
/// Only non-None fields are written.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateUser {
    /// New display name
    pub name: Option<String>,

    /// New email address
    pub email: Option<String>,

    /// New password hash
    pub password_hash: Option<String>,

    /// New business-unit assignment
    pub unit_id: Option<Uuid>,

    /// New gender
    pub gender: Option<String>,
}

impl User {
    /// Creates a new user in the database
    ///
    /// # Errors
    ///
    /// Returns an error if the email already exists (unique constraint
    /// violation) or the database is unreachable.
    pub async fn create(pool: &PgPool, data: CreateUser) -> Result<Self, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, email, role, gender, unit_id, password_hash)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, name, email, role, gender, unit_id, password_hash, created_at
            "#,
        )
        .bind(data.name)
        .bind(data.email)
        .bind(data.role)
        .bind(data.gender)
        .bind(data.unit_id)
        .bind(data.password_hash)
        .fetch_one(pool)
        .await?;

        Ok(user)
    }

    /// Finds a user by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, role, gender, unit_id, password_hash, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// Finds a user by email address
    ///
    /// Used by login and by the per-request authentication step.
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, role, gender, unit_id, password_hash, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(pool)
        .await
    }

    /// Finds a user by display name
    ///
    /// The admin login form submits a username rather than an email.
    pub async fn find_by_name(pool: &PgPool, name: &str) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, role, gender, unit_id, password_hash, created_at
            FROM users
            WHERE name = $1
            ORDER BY created_at
            LIMIT 1
            "#,
        )
        .bind(name)
        .fetch_optional(pool)
        .await
    }

    /// Finds a user by ID, constrained to a role
    ///
    /// Employee management endpoints only touch rows with `role = 'employee'`.
    pub async fn find_by_id_and_role(
        pool: &PgPool,
        id: Uuid,
        role: Role,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, role, gender, unit_id, password_hash, created_at
            FROM users
            WHERE id = $1 AND role = $2
            "#,
        )
        .bind(id)
        .bind(role)
        .fetch_optional(pool)
        .await
    }

    /// Checks whether another user already holds this email
    ///
    /// Used before an email change so a duplicate reports as a domain
    /// validation failure rather than a constraint violation.
    pub async fn email_taken_by_other(
        pool: &PgPool,
        email: &str,
        id: Uuid,
    ) -> Result<bool, sqlx::Error> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM users WHERE email = $1 AND id != $2)",
        )
        .bind(email)
        .bind(id)
        .fetch_one(pool)
        .await?;

        Ok(exists)
    }

    /// Updates an existing user
    ///
    /// Only non-None fields in `data` are written.
    ///
    /// # Returns
    ///
    /// The updated user if found, None if the user doesn't exist
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        data: UpdateUser,
    ) -> Result<Option<Self>, sqlx::Error> {
        // Build the update dynamically from the fields that are present
        let mut query = String::from("UPDATE users SET id = id");
        let mut bind_count = 1;

        if data.name.is_some() {
            bind_count += 1;
            query.push_str(&format!(", name = ${}", bind_count));
        }
        if data.email.is_some() {
            bind_count += 1;
            query.push_str(&format!(", email = ${}", bind_count));
        }
        if data.password_hash.is_some() {
            bind_count += 1;
            query.push_str(&format!(", password_hash = ${}", bind_count));
        }
        if data.unit_id.is_some() {
            bind_count += 1;
            query.push_str(&format!(", unit_id = ${}", bind_count));
        }
        if data.gender.is_some() {
            bind_count += 1;
            query.push_str(&format!(", gender = ${}", bind_count));
        }

        query.push_str(
            " WHERE id = $1 RETURNING id, name, email, role, gender, unit_id, password_hash, created_at",
        );

        let mut q = sqlx::query_as::<_, User>(&query).bind(id);

        if let Some(name) = data.name {
            q = q.bind(name);
        }
        if let Some(email) = data.email {
            q = q.bind(email);
        }
        if let Some(password_hash) = data.password_hash {
            q = q.bind(password_hash);
        }
        if let Some(unit_id) = data.unit_id {
            q = q.bind(unit_id);
        }
        if let Some(gender) = data.gender {
            q = q.bind(gender);
        }

        q.fetch_optional(pool).await
    }

    /// Deletes a user by ID
    ///
    /// # Returns
    ///
    /// True if a row was deleted, false if the user didn't exist
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Lists all users with a given role, newest first
    pub async fn list_by_role(pool: &PgPool, role: Role) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, role, gender, unit_id, password_hash, created_at
            FROM users
            WHERE role = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(role)
        .fetch_all(pool)
        .await
    }

    /// Counts users with a given role
    pub async fn count_by_role(pool: &PgPool, role: Role) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE role = $1")
            .bind(role)
            .fetch_one(pool)
            .await
    }

    /// Counts users assigned to a business unit
    pub async fn count_by_unit(pool: &PgPool, unit_id: Uuid) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE unit_id = $1")
            .bind(unit_id)
            .fetch_one(pool)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_as_str() {
        assert_eq!(Role::Admin.as_str(), "admin");
        assert_eq!(Role::Employee.as_str(), "employee");
        assert_eq!(Role::Customer.as_str(), "customer");
    }

    #[test]
    fn test_role_staff() {
        assert!(Role::Admin.is_staff());
        assert!(Role::Employee.is_staff());
        assert!(!Role::Customer.is_staff());
    }

    #[test]
    fn test_role_serde_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
        assert_eq!(
            serde_json::from_str::<Role>("\"customer\"").unwrap(),
            Role::Customer
        );
    }

    #[test]
    fn test_update_user_default() {
        let update = UpdateUser::default();
        assert!(update.name.is_none());
        assert!(update.email.is_none());
        assert!(update.password_hash.is_none());
        assert!(update.unit_id.is_none());
        assert!(update.gender.is_none());
    }

    // Integration tests for database operations live in tests/
}
