/// Authentication and administration endpoints
///
/// # Endpoints
///
/// Public:
/// - `POST /auth/login` - Credential login, returns a bearer token
/// - `POST /auth/register` - Customer self-registration
/// - `POST /auth/admin/login` - Form-encoded login (username/password)
///
/// Authenticated (admin role enforced per handler):
/// - `POST /auth/admin/create-business-unit`
/// - `GET  /auth/admin/list-details`
/// - `POST /auth/admin/create-employee`
/// - `PUT  /auth/admin/update-employee/:employee_id`
/// - `DELETE /auth/admin/delete-employee/:employee_id`
/// - `GET  /auth/admin/list-stats`
/// - `POST /auth/admin/create-inventory`

use crate::{
    app::AppState,
    error::{validation_error, ApiError, ApiResult},
};
use axum::{
    extract::{Path, State},
    Extension, Form, Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use unitops_shared::auth::{
    jwt::{create_token, Claims},
    middleware::AuthenticatedUser,
    password::{hash_password, verify_password},
    policy::require_admin,
};
use unitops_shared::models::{
    business_unit::{BusinessUnit, CreateBusinessUnit},
    inventory::{CreateInventoryItem, InventoryItem},
    user::{CreateUser, Role, UpdateUser, User},
};
use uuid::Uuid;
use validator::Validate;

/// Login request
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// Email address
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Password
    pub password: String,
}

/// Form-encoded admin login request
#[derive(Debug, Deserialize)]
pub struct AdminLoginForm {
    /// Display name of the account
    pub username: String,

    /// Password
    pub password: String,
}

/// Bearer token response
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    /// Signed bearer token
    pub access_token: String,

    /// Always "bearer"
    pub token_type: String,
}

/// Customer registration request
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Display name
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,

    /// Email address
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Password
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,

    /// Optional gender
    #[validate(length(max = 10, message = "Gender must be at most 10 characters"))]
    pub gender: Option<String>,
}

/// Customer registration response
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    /// New account ID
    pub user_id: Uuid,

    /// Signed bearer token
    pub access_token: String,

    /// Always "bearer"
    pub token_type: String,
}

/// User payload without the password hash
#[derive(Debug, Serialize)]
pub struct UserResponse {
    /// Account ID
    pub id: Uuid,

    /// Display name
    pub name: String,

    /// Email address
    pub email: String,

    /// Account role
    pub role: Role,

    /// Optional gender
    pub gender: Option<String>,

    /// Business-unit assignment, if any
    pub unit_id: Option<Uuid>,

    /// When the account was created
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
            gender: user.gender,
            unit_id: user.unit_id,
            created_at: user.created_at,
        }
    }
}

/// Business unit creation request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateBusinessUnitRequest {
    /// Unit name (must be unique)
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,

    /// Physical location
    #[validate(length(min = 1, max = 50, message = "Location must be 1-50 characters"))]
    pub location: String,
}

/// Employee creation request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateEmployeeRequest {
    /// Display name
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,

    /// Email address
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Password
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,

    /// Optional gender
    #[validate(length(max = 10, message = "Gender must be at most 10 characters"))]
    pub gender: Option<String>,

    /// Optional business-unit assignment (must exist)
    pub unit_id: Option<Uuid>,
}

/// Employee update request - only provided fields change
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateEmployeeRequest {
    /// New display name
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: Option<String>,

    /// New email address
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,

    /// New password
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: Option<String>,

    /// New business-unit assignment (must exist)
    pub unit_id: Option<Uuid>,

    /// New gender
    #[validate(length(max = 10, message = "Gender must be at most 10 characters"))]
    pub gender: Option<String>,
}

/// Admin dashboard counters
#[derive(Debug, Serialize)]
pub struct AdminStatsResponse {
    /// Number of employee accounts
    pub total_employees: i64,

    /// Number of business units
    pub total_business_units: i64,
}

/// Inventory item creation request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateInventoryRequest {
    /// Owning business unit (must exist)
    pub unit_id: Uuid,

    /// Item name
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,

    /// Optional description
    #[validate(length(max = 255, message = "Description must be at most 255 characters"))]
    pub description: Option<String>,

    /// Initial stock
    #[validate(range(min = 0, message = "Quantity must be non-negative"))]
    pub quantity: i32,

    /// Restock trigger level
    #[validate(range(min = 0, message = "Reorder level must be non-negative"))]
    pub reorder_level: i32,

    /// Price per unit
    #[validate(range(min = 0.0, message = "Price must be non-negative"))]
    pub price: f64,
}

/// Generic message response for deletions
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    /// Human-readable outcome
    pub message: String,
}

/// Credential login
///
/// Verifies email and password, then issues a bearer token carrying the
/// account's email and role.
///
/// # Errors
///
/// - `401 Unauthorized`: Unknown email or wrong password (indistinguishable)
/// - `422 Unprocessable Entity`: Validation failed
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<TokenResponse>> {
    req.validate().map_err(validation_error)?;

    let user = User::find_by_email(&state.db, &req.email)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Invalid credentials".to_string()))?;

    if !verify_password(&req.password, &user.password_hash)? {
        return Err(ApiError::Unauthorized("Invalid credentials".to_string()));
    }

    let claims = Claims::new(user.email, user.role, state.config.token_ttl());
    let access_token = create_token(&claims, state.jwt_secret())?;

    Ok(Json(TokenResponse {
        access_token,
        token_type: "bearer".to_string(),
    }))
}

/// Form-encoded login
///
/// The admin console submits `application/x-www-form-urlencoded` credentials
/// with the display name as username. Token shape matches [`login`].
///
/// # Errors
///
/// - `401 Unauthorized`: Unknown name or wrong password, no token issued
pub async fn admin_login(
    State(state): State<AppState>,
    Form(form): Form<AdminLoginForm>,
) -> ApiResult<Json<TokenResponse>> {
    let user = User::find_by_name(&state.db, &form.username)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Invalid credentials".to_string()))?;

    if !verify_password(&form.password, &user.password_hash)? {
        return Err(ApiError::Unauthorized("Invalid credentials".to_string()));
    }

    let claims = Claims::new(user.email, user.role, state.config.token_ttl());
    let access_token = create_token(&claims, state.jwt_secret())?;

    Ok(Json(TokenResponse {
        access_token,
        token_type: "bearer".to_string(),
    }))
}

/// Customer self-registration
///
/// Creates a customer account and issues a token so the customer can place
/// orders immediately.
///
/// # Errors
///
/// - `400 Bad Request`: Email already exists
/// - `422 Unprocessable Entity`: Validation failed
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<Json<RegisterResponse>> {
    req.validate().map_err(validation_error)?;

    if User::find_by_email(&state.db, &req.email).await?.is_some() {
        return Err(ApiError::BadRequest("Email already exists".to_string()));
    }

    let password_hash = hash_password(&req.password)?;

    let user = User::create(
        &state.db,
        CreateUser {
            name: req.name,
            email: req.email,
            role: Role::Customer,
            gender: req.gender,
            unit_id: None,
            password_hash,
        },
    )
    .await?;

    let claims = Claims::new(user.email, user.role, state.config.token_ttl());
    let access_token = create_token(&claims, state.jwt_secret())?;

    Ok(Json(RegisterResponse {
        user_id: user.id,
        access_token,
        token_type: "bearer".to_string(),
    }))
}

/// Creates a business unit (admin only)
///
/// # Errors
///
/// - `400 Bad Request`: Unit name already exists
/// - `403 Forbidden`: Caller is not an admin
pub async fn create_business_unit(
    State(state): State<AppState>,
    Extension(current_user): Extension<AuthenticatedUser>,
    Json(req): Json<CreateBusinessUnitRequest>,
) -> ApiResult<Json<BusinessUnit>> {
    require_admin(&current_user)?;
    req.validate().map_err(validation_error)?;

    let unit = BusinessUnit::create(
        &state.db,
        CreateBusinessUnit {
            name: req.name,
            location: req.location,
        },
    )
    .await
    .map_err(|e| match e {
        sqlx::Error::Database(ref db_err) if db_err.constraint().is_some() => {
            ApiError::BadRequest("Business unit name already exists".to_string())
        }
        other => ApiError::from(other),
    })?;

    Ok(Json(unit))
}

/// Lists all employees (admin only)
pub async fn list_employees(
    State(state): State<AppState>,
    Extension(current_user): Extension<AuthenticatedUser>,
) -> ApiResult<Json<Vec<UserResponse>>> {
    require_admin(&current_user)?;

    let employees = User::list_by_role(&state.db, Role::Employee).await?;

    Ok(Json(employees.into_iter().map(UserResponse::from).collect()))
}

/// Creates an employee account (admin only)
///
/// # Errors
///
/// - `400 Bad Request`: Email already exists
/// - `403 Forbidden`: Caller is not an admin
/// - `404 Not Found`: Referenced business unit does not exist
pub async fn create_employee(
    State(state): State<AppState>,
    Extension(current_user): Extension<AuthenticatedUser>,
    Json(req): Json<CreateEmployeeRequest>,
) -> ApiResult<Json<UserResponse>> {
    require_admin(&current_user)?;
    req.validate().map_err(validation_error)?;

    if User::find_by_email(&state.db, &req.email).await?.is_some() {
        return Err(ApiError::BadRequest("Email already exists".to_string()));
    }

    if let Some(unit_id) = req.unit_id {
        BusinessUnit::find_by_id(&state.db, unit_id)
            .await?
            .ok_or_else(|| ApiError::NotFound("Business unit not found".to_string()))?;
    }

    let password_hash = hash_password(&req.password)?;

    let employee = User::create(
        &state.db,
        CreateUser {
            name: req.name,
            email: req.email,
            role: Role::Employee,
            gender: req.gender,
            unit_id: req.unit_id,
            password_hash,
        },
    )
    .await?;

    Ok(Json(UserResponse::from(employee)))
}

/// Updates an employee account (admin only)
///
/// Only provided fields change. An email change is checked against other
/// accounts first; a unit change must name an existing unit.
pub async fn update_employee(
    State(state): State<AppState>,
    Extension(current_user): Extension<AuthenticatedUser>,
    Path(employee_id): Path<Uuid>,
    Json(req): Json<UpdateEmployeeRequest>,
) -> ApiResult<Json<UserResponse>> {
    require_admin(&current_user)?;
    req.validate().map_err(validation_error)?;

    let employee = User::find_by_id_and_role(&state.db, employee_id, Role::Employee)
        .await?
        .ok_or_else(|| ApiError::NotFound("Employee not found".to_string()))?;

    if let Some(ref email) = req.email {
        if User::email_taken_by_other(&state.db, email, employee.id).await? {
            return Err(ApiError::BadRequest("Email already exists".to_string()));
        }
    }

    if let Some(unit_id) = req.unit_id {
        BusinessUnit::find_by_id(&state.db, unit_id)
            .await?
            .ok_or_else(|| ApiError::NotFound("Business unit not found".to_string()))?;
    }

    let password_hash = match req.password {
        Some(ref password) => Some(hash_password(password)?),
        None => None,
    };

    let updated = User::update(
        &state.db,
        employee.id,
        UpdateUser {
            name: req.name,
            email: req.email,
            password_hash,
            unit_id: req.unit_id,
            gender: req.gender,
        },
    )
    .await?
    .ok_or_else(|| ApiError::NotFound("Employee not found".to_string()))?;

    Ok(Json(UserResponse::from(updated)))
}

/// Deletes an employee account (admin only)
pub async fn delete_employee(
    State(state): State<AppState>,
    Extension(current_user): Extension<AuthenticatedUser>,
    Path(employee_id): Path<Uuid>,
) -> ApiResult<Json<MessageResponse>> {
    require_admin(&current_user)?;

    let employee = User::find_by_id_and_role(&state.db, employee_id, Role::Employee)
        .await?
        .ok_or_else(|| ApiError::NotFound("Employee not found".to_string()))?;

    User::delete(&state.db, employee.id).await?;

    Ok(Json(MessageResponse {
        message: "Employee deleted successfully".to_string(),
    }))
}

/// Employee and business-unit counts (admin only)
pub async fn admin_stats(
    State(state): State<AppState>,
    Extension(current_user): Extension<AuthenticatedUser>,
) -> ApiResult<Json<AdminStatsResponse>> {
    require_admin(&current_user)?;

    let total_employees = User::count_by_role(&state.db, Role::Employee).await?;
    let total_business_units = BusinessUnit::count(&state.db).await?;

    Ok(Json(AdminStatsResponse {
        total_employees,
        total_business_units,
    }))
}

/// Creates an inventory item (admin only)
///
/// # Errors
///
/// - `400 Bad Request`: Item name already exists in the unit
/// - `403 Forbidden`: Caller is not an admin
/// - `404 Not Found`: Referenced business unit does not exist
pub async fn create_inventory(
    State(state): State<AppState>,
    Extension(current_user): Extension<AuthenticatedUser>,
    Json(req): Json<CreateInventoryRequest>,
) -> ApiResult<Json<InventoryItem>> {
    require_admin(&current_user)?;
    req.validate().map_err(validation_error)?;

    BusinessUnit::find_by_id(&state.db, req.unit_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Business unit not found".to_string()))?;

    let item = InventoryItem::create(
        &state.db,
        CreateInventoryItem {
            unit_id: req.unit_id,
            name: req.name,
            description: req.description,
            quantity: req.quantity,
            reorder_level: req.reorder_level,
            price: req.price,
        },
    )
    .await
    .map_err(|e| match e {
        sqlx::Error::Database(ref db_err) if db_err.constraint().is_some() => {
            ApiError::BadRequest("Inventory item already exists in this unit".to_string())
        }
        other => ApiError::from(other),
    })?;

    Ok(Json(item))
}
