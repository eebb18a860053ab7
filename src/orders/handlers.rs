use axum::{
    extract::{Path, State},
    routing::{get, post, put},
    Json, Router,
};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::{
    auth::jwt::AuthUser,
    error::{AppError, FieldViolation},
    orders::{
        dto::{CreateOrderRequest, OrderListResponse, OrderResponse},
        repo::Order,
        status::{OrderStatus, PaymentMethod},
    },
    state::AppState,
};

pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/orders", post(create_order).get(list_orders))
        .route("/orders/:id", get(get_order))
        .route("/orders/:id/cancel", put(cancel_order))
}

fn validate_new_order(payload: &CreateOrderRequest) -> Vec<FieldViolation> {
    let mut violations = Vec::new();
    if payload.items.as_deref().map_or(true, |items| items.is_empty()) {
        violations.push(FieldViolation {
            field: "items",
            message: "No items in order",
        });
    }
    if payload.total_amount.is_none() {
        violations.push(FieldViolation {
            field: "totalAmount",
            message: "Total amount is required",
        });
    }
    if payload
        .delivery_address
        .as_deref()
        .map_or(true, str::is_empty)
    {
        violations.push(FieldViolation {
            field: "deliveryAddress",
            message: "Delivery address is required",
        });
    }
    match payload.payment_method.as_deref() {
        Some(method) if PaymentMethod::parse(method).is_some() => {}
        Some(_) => violations.push(FieldViolation {
            field: "paymentMethod",
            message: "Payment method must be COD, Card or UPI",
        }),
        None => violations.push(FieldViolation {
            field: "paymentMethod",
            message: "Payment method is required",
        }),
    }
    violations
}

/// An order may only be read or cancelled by the user it belongs to.
fn ensure_owner(order: &Order, user_id: Uuid) -> Result<(), AppError> {
    if order.user_id != user_id {
        warn!(order_id = %order.id, user_id = %user_id, "order access by non-owner");
        return Err(AppError::Forbidden);
    }
    Ok(())
}

/// Resolve an order and enforce ownership. Existence is checked before
/// ownership, so a foreign order id yields Not authorized, not 404.
async fn owned_order(state: &AppState, user_id: Uuid, order_id: Uuid) -> Result<Order, AppError> {
    let order = Order::find_by_id(&state.db, order_id)
        .await?
        .ok_or(AppError::NotFound("Order not found"))?;
    ensure_owner(&order, user_id)?;
    Ok(order)
}

/// The submitted total is stored as-is; it is not recomputed from the
/// line prices. The cart is left alone — clearing it is a separate call.
#[instrument(skip(state, payload))]
pub async fn create_order(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<CreateOrderRequest>,
) -> Result<Json<OrderResponse>, AppError> {
    let violations = validate_new_order(&payload);
    if !violations.is_empty() {
        warn!(count = violations.len(), "order rejected");
        return Err(AppError::Validation(violations));
    }

    // Validation guarantees the fields are present.
    let items = payload.items.unwrap_or_default();
    let total_amount = payload.total_amount.unwrap_or_default();
    let delivery_address = payload.delivery_address.unwrap_or_default();
    let payment_method = payload.payment_method.unwrap_or_default();

    let order = Order::create(
        &state.db,
        user_id,
        &items,
        total_amount,
        &delivery_address,
        &payment_method,
    )
    .await?;

    info!(order_id = %order.id, user_id = %user_id, total = total_amount, "order created");
    Ok(Json(OrderResponse {
        success: true,
        order,
    }))
}

#[instrument(skip(state))]
pub async fn list_orders(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<OrderListResponse>, AppError> {
    let orders = Order::list_by_user(&state.db, user_id).await?;
    Ok(Json(OrderListResponse {
        success: true,
        orders,
    }))
}

#[instrument(skip(state))]
pub async fn get_order(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(order_id): Path<Uuid>,
) -> Result<Json<OrderResponse>, AppError> {
    let order = owned_order(&state, user_id, order_id).await?;
    Ok(Json(OrderResponse {
        success: true,
        order,
    }))
}

#[instrument(skip(state))]
pub async fn cancel_order(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(order_id): Path<Uuid>,
) -> Result<Json<OrderResponse>, AppError> {
    let order = owned_order(&state, user_id, order_id).await?;

    let cancellable = OrderStatus::parse(&order.status).is_some_and(OrderStatus::can_cancel);
    if !cancellable {
        return Err(AppError::InvalidState(
            "Order cannot be cancelled at this stage",
        ));
    }

    let order = Order::set_status(&state.db, order_id, OrderStatus::Cancelled).await?;
    info!(order_id = %order.id, user_id = %user_id, "order cancelled");
    Ok(Json(OrderResponse {
        success: true,
        order,
    }))
}
