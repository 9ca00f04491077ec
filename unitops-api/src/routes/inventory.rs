/// Inventory endpoints
///
/// Admins see and mutate inventory in any unit; employees only within their
/// assigned unit, independent of request parameters. Mutating requests may
/// name a target unit explicitly via the `unit_name` query parameter; a name
/// that resolves to no unit is a 404 before any policy decision.
///
/// # Endpoints
///
/// - `GET    /inventory` - List (admin: all units, employee: own unit)
/// - `PUT    /inventory/:item_id` - Update quantity/reorder level/price
/// - `DELETE /inventory/:item_id` - Delete
/// - `GET    /inventory/inventory-stats` - Total and low-stock counts

use crate::{
    app::AppState,
    error::{validation_error, ApiError, ApiResult},
};
use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use unitops_shared::auth::{
    middleware::AuthenticatedUser,
    policy::{check_unit_access, unit_scope},
};
use unitops_shared::models::{
    business_unit::BusinessUnit,
    inventory::{InventoryItem, InventoryStats, UpdateInventoryItem},
};
use uuid::Uuid;
use validator::Validate;

/// Optional explicit target unit for mutations
#[derive(Debug, Deserialize)]
pub struct UnitQuery {
    /// Business unit name; must exist when provided
    pub unit_name: Option<String>,
}

/// Inventory update request - only provided fields change
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateInventoryRequest {
    /// New stock quantity
    #[validate(range(min = 0, message = "Quantity must be non-negative"))]
    pub quantity: Option<i32>,

    /// New restock trigger level
    #[validate(range(min = 0, message = "Reorder level must be non-negative"))]
    pub reorder_level: Option<i32>,

    /// New price per unit
    #[validate(range(min = 0.0, message = "Price must be non-negative"))]
    pub price: Option<f64>,
}

/// Generic message response for deletions
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    /// Human-readable outcome
    pub message: String,
}

/// Validates an explicitly named target unit
///
/// Returns 404 when the name resolves to no unit. The policy check against
/// the resource's own unit happens separately; naming a unit never widens an
/// employee's access.
async fn resolve_named_unit(
    state: &AppState,
    unit_name: Option<&str>,
) -> ApiResult<Option<Uuid>> {
    match unit_name {
        Some(name) => {
            let unit = BusinessUnit::find_by_name(&state.db, name)
                .await?
                .ok_or_else(|| ApiError::NotFound("Business unit not found".to_string()))?;
            Ok(Some(unit.id))
        }
        None => Ok(None),
    }
}

/// Lists inventory items scoped by role
pub async fn list_inventory(
    State(state): State<AppState>,
    Extension(current_user): Extension<AuthenticatedUser>,
) -> ApiResult<Json<Vec<InventoryItem>>> {
    let scope = unit_scope(&current_user)?;

    let items = InventoryItem::list(&state.db, scope.filter()).await?;

    Ok(Json(items))
}

/// Updates an inventory item
///
/// # Errors
///
/// - `403 Forbidden`: Employee targeting another unit's item
/// - `404 Not Found`: Item or named unit absent
pub async fn update_inventory_item(
    State(state): State<AppState>,
    Extension(current_user): Extension<AuthenticatedUser>,
    Path(item_id): Path<Uuid>,
    Query(query): Query<UnitQuery>,
    Json(req): Json<UpdateInventoryRequest>,
) -> ApiResult<Json<InventoryItem>> {
    req.validate().map_err(validation_error)?;

    resolve_named_unit(&state, query.unit_name.as_deref()).await?;

    let item = InventoryItem::find_by_id(&state.db, item_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Inventory item not found".to_string()))?;

    check_unit_access(&current_user, item.unit_id)?;

    let updated = InventoryItem::update(
        &state.db,
        item.id,
        UpdateInventoryItem {
            quantity: req.quantity,
            reorder_level: req.reorder_level,
            price: req.price,
        },
    )
    .await?
    .ok_or_else(|| ApiError::NotFound("Inventory item not found".to_string()))?;

    Ok(Json(updated))
}

/// Deletes an inventory item
///
/// # Errors
///
/// - `403 Forbidden`: Employee targeting another unit's item
/// - `404 Not Found`: Item or named unit absent
pub async fn delete_inventory_item(
    State(state): State<AppState>,
    Extension(current_user): Extension<AuthenticatedUser>,
    Path(item_id): Path<Uuid>,
    Query(query): Query<UnitQuery>,
) -> ApiResult<Json<MessageResponse>> {
    resolve_named_unit(&state, query.unit_name.as_deref()).await?;

    let item = InventoryItem::find_by_id(&state.db, item_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Inventory item not found".to_string()))?;

    check_unit_access(&current_user, item.unit_id)?;

    InventoryItem::delete(&state.db, item.id).await?;

    Ok(Json(MessageResponse {
        message: "Inventory item deleted successfully".to_string(),
    }))
}

/// Total and low-stock item counts scoped by role
pub async fn inventory_stats(
    State(state): State<AppState>,
    Extension(current_user): Extension<AuthenticatedUser>,
) -> ApiResult<Json<InventoryStats>> {
    let scope = unit_scope(&current_user)?;

    let stats = InventoryItem::stats(&state.db, scope.filter()).await?;

    Ok(Json(stats))
}
