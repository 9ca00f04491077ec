/// Database models for unitops
///
/// This module contains all database models and their CRUD operations.
///
/// # Models
///
/// - `user`: Accounts (admin, employee, customer) with optional unit assignment
/// - `business_unit`: Named scoping boundary owning employees and inventory
/// - `inventory`: Stock items per business unit
/// - `order`: Orders and their price-snapshotted line items
/// - `feedback`: Customer feedback per business unit
/// - `notification`: Low-stock notifications
///
/// # Example
///
/// ```no_run
/// use unitops_shared::models::user::{CreateUser, Role, User};
/// use unitops_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
///
/// let new_user = CreateUser {
///     name: "Jane Doe".to_string(),
///     email: "jane@example.com".to_string(),
///     role: Role::Employee,
///     gender: None,
///     unit_id: None,
///     password_hash: "$argon2id$...".to_string(),
/// };
///
/// let user = User::create(&pool, new_user).await?;
/// # Ok(())
/// # }
/// ```

pub mod business_unit;
pub mod feedback;
pub mod inventory;
pub mod notification;
pub mod order;
pub mod user;
