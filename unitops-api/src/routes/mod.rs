/// API route handlers
///
/// This module contains all route handlers organized by resource:
///
/// - `health`: Health check endpoint
/// - `auth`: Login, registration, and admin management
/// - `inventory`: Unit-scoped inventory CRUD
/// - `orders`: Order placement and listing
/// - `feedback`: Customer feedback
/// - `notifications`: Low-stock reporting flow
/// - `reports`: Read-side financial reports

pub mod auth;
pub mod feedback;
pub mod health;
pub mod inventory;
pub mod notifications;
pub mod orders;
pub mod reports;
