/// Order endpoints
///
/// Customers place orders against a named business unit; the order engine
/// validates stock, computes the total, deducts quantities, and persists the
/// order atomically. Staff list orders scoped by the access policy.
///
/// # Endpoints
///
/// - `POST /orders/place-order` - Customer places an order
/// - `GET  /orders/list-orders` - Admin: all orders, employee: own unit

use crate::{
    app::AppState,
    error::{validation_error, ApiResult},
};
use axum::{extract::State, Extension, Json};
use serde::Deserialize;
use unitops_shared::auth::{
    middleware::AuthenticatedUser,
    policy::{require_customer, unit_scope},
};
use unitops_shared::models::order::Order;
use unitops_shared::ordering::{self, OrderLine, PlaceOrder};
use validator::Validate;

/// One requested order line
#[derive(Debug, Deserialize, Validate)]
pub struct OrderLineRequest {
    /// Inventory item name within the target unit
    #[validate(length(min = 1, max = 100, message = "Item name must be 1-100 characters"))]
    pub inventory_name: String,

    /// Units requested
    pub quantity: i32,
}

/// Order placement request
#[derive(Debug, Deserialize, Validate)]
pub struct PlaceOrderRequest {
    /// Target business unit, by name
    #[validate(length(min = 1, max = 100, message = "Unit name must be 1-100 characters"))]
    pub unit_name: String,

    /// Free-form order type label
    #[validate(length(min = 1, max = 20, message = "Order type must be 1-20 characters"))]
    pub order_type: String,

    /// Requested lines
    #[validate(nested)]
    pub items: Vec<OrderLineRequest>,
}

/// Places an order (customer only)
///
/// # Errors
///
/// - `400 Bad Request`: Insufficient stock, zero/negative quantity, empty order
/// - `403 Forbidden`: Caller is not a customer
/// - `404 Not Found`: Unknown unit or item name
pub async fn place_order(
    State(state): State<AppState>,
    Extension(current_user): Extension<AuthenticatedUser>,
    Json(req): Json<PlaceOrderRequest>,
) -> ApiResult<Json<Order>> {
    require_customer(&current_user)?;
    req.validate().map_err(validation_error)?;

    let order = ordering::place_order(
        &state.db,
        PlaceOrder {
            customer_id: current_user.id,
            unit_name: req.unit_name,
            order_type: req.order_type,
            items: req
                .items
                .into_iter()
                .map(|line| OrderLine {
                    inventory_name: line.inventory_name,
                    quantity: line.quantity,
                })
                .collect(),
        },
    )
    .await?;

    Ok(Json(order))
}

/// Lists orders scoped by role
pub async fn list_orders(
    State(state): State<AppState>,
    Extension(current_user): Extension<AuthenticatedUser>,
) -> ApiResult<Json<Vec<Order>>> {
    let scope = unit_scope(&current_user)?;

    let orders = Order::list(&state.db, scope.filter()).await?;

    Ok(Json(orders))
}
