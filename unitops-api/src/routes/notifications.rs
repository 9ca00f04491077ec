/// Low-stock notification endpoints
///
/// Employees report items in their own unit whose stock has fallen below the
/// fixed threshold of 10 units; each accepted report persists a Notification
/// row. Admins review current low stock across all units.
///
/// # Endpoints
///
/// - `POST /notifications/report-low-inventory` - Employee reports an item
/// - `GET  /notifications/low-inventory` - Admin reviews low stock

use crate::{
    app::AppState,
    error::{validation_error, ApiError, ApiResult},
};
use axum::{extract::State, Extension, Json};
use serde::{Deserialize, Serialize};
use unitops_shared::auth::{
    middleware::AuthenticatedUser,
    policy::{check_unit_access, require_admin, require_employee},
};
use unitops_shared::models::{
    business_unit::BusinessUnit,
    inventory::{InventoryItem, LOW_STOCK_THRESHOLD},
    notification::{CreateNotification, Notification},
    user::User,
};
use uuid::Uuid;
use validator::Validate;

/// Low-inventory report request
#[derive(Debug, Deserialize, Validate)]
pub struct ReportLowInventoryRequest {
    /// Inventory item name
    #[validate(length(min = 1, max = 100, message = "Item name must be 1-100 characters"))]
    pub inventory_name: String,
}

/// Unit and item details attached to an accepted report
#[derive(Debug, Serialize)]
pub struct LowInventoryDetails {
    /// Business unit name
    pub business_unit_name: String,

    /// Business unit location
    pub location: String,

    /// Employees assigned to the unit
    pub total_employees: i64,

    /// Item name
    pub inventory_item_name: String,

    /// Item price
    pub price: f64,

    /// Current stock
    pub quantity: i32,
}

/// Accepted low-inventory report
#[derive(Debug, Serialize)]
pub struct ReportLowInventoryResponse {
    /// Human-readable outcome
    pub message: String,

    /// The persisted notification
    pub notification: Notification,

    /// Unit and item details for the report view
    pub details: LowInventoryDetails,
}

/// One entry in the admin low-stock review
#[derive(Debug, Serialize)]
pub struct LowInventoryEntry {
    /// Item ID
    pub inventory_id: Uuid,

    /// Human-readable summary
    pub message: String,

    /// Business unit name
    pub business_unit_name: String,

    /// Business unit location
    pub location: String,

    /// Employees assigned to the unit
    pub total_employees: i64,

    /// Item name
    pub inventory_item_name: String,

    /// Item price
    pub price: f64,

    /// Current stock
    pub quantity: i32,
}

/// Reports low inventory (employee only)
///
/// The item must belong to the employee's own unit and its stock must
/// actually be below the threshold; otherwise nothing is persisted.
///
/// # Errors
///
/// - `400 Bad Request`: Stock is at or above the threshold - no row created
/// - `403 Forbidden`: Caller is not an employee, or the item belongs to a
///   different unit
/// - `404 Not Found`: Unknown item name
pub async fn report_low_inventory(
    State(state): State<AppState>,
    Extension(current_user): Extension<AuthenticatedUser>,
    Json(req): Json<ReportLowInventoryRequest>,
) -> ApiResult<Json<ReportLowInventoryResponse>> {
    require_employee(&current_user)?;
    req.validate().map_err(validation_error)?;

    let item = InventoryItem::find_by_name(&state.db, &req.inventory_name)
        .await?
        .ok_or_else(|| ApiError::NotFound("Inventory item not found".to_string()))?;

    check_unit_access(&current_user, item.unit_id)?;

    if item.quantity >= LOW_STOCK_THRESHOLD {
        return Err(ApiError::BadRequest(format!(
            "Inventory is not below the low inventory threshold ({})",
            LOW_STOCK_THRESHOLD
        )));
    }

    let notification = Notification::create(
        &state.db,
        CreateNotification {
            inventory_id: item.id,
            message: format!(
                "Inventory for item '{}' is below the reorder level. Current quantity: {}",
                item.name, item.quantity
            ),
        },
    )
    .await?;

    let unit = BusinessUnit::find_by_id(&state.db, item.unit_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Business unit not found".to_string()))?;

    let total_employees = User::count_by_unit(&state.db, unit.id).await?;

    Ok(Json(ReportLowInventoryResponse {
        message: "Low inventory reported successfully".to_string(),
        notification,
        details: LowInventoryDetails {
            business_unit_name: unit.name,
            location: unit.location,
            total_employees,
            inventory_item_name: item.name,
            price: item.price,
            quantity: item.quantity,
        },
    }))
}

/// Reviews current low stock across all units (admin only)
///
/// Built from live inventory levels, not from persisted notifications, so the
/// view always reflects the current stock.
pub async fn low_inventory(
    State(state): State<AppState>,
    Extension(current_user): Extension<AuthenticatedUser>,
) -> ApiResult<Json<Vec<LowInventoryEntry>>> {
    require_admin(&current_user)?;

    let items = InventoryItem::list_low_stock(&state.db).await?;

    let mut entries = Vec::with_capacity(items.len());

    for item in items {
        // Skip items whose unit row has gone missing
        let Some(unit) = BusinessUnit::find_by_id(&state.db, item.unit_id).await? else {
            continue;
        };

        let total_employees = User::count_by_unit(&state.db, unit.id).await?;

        entries.push(LowInventoryEntry {
            inventory_id: item.id,
            message: format!("Low inventory for {} in {}", item.name, unit.name),
            business_unit_name: unit.name,
            location: unit.location,
            total_employees,
            inventory_item_name: item.name,
            price: item.price,
            quantity: item.quantity,
        });
    }

    Ok(Json(entries))
}
