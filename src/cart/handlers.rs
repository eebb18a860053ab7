use axum::{
    extract::{Path, State},
    routing::{get, post, put},
    Json, Router,
};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::{
    auth::jwt::AuthUser,
    cart::{
        dto::{AddItemRequest, CartResponse, ClearCartResponse, UpdateQuantityRequest},
        lines,
        repo::Cart,
    },
    error::{AppError, FieldViolation},
    state::AppState,
};

pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/cart", get(get_cart).delete(clear_cart))
        .route("/cart/items", post(add_item))
        .route("/cart/items/:line_id", put(update_item).delete(remove_item))
}

fn validate_add_item(payload: &AddItemRequest) -> Vec<FieldViolation> {
    let mut violations = Vec::new();
    if payload.food_item.is_none() {
        violations.push(FieldViolation {
            field: "foodItem",
            message: "Food item is required",
        });
    }
    match payload.quantity {
        Some(q) if q >= 1 => {}
        _ => violations.push(FieldViolation {
            field: "quantity",
            message: "Quantity must be at least 1",
        }),
    }
    if payload.size.as_deref().map_or(true, str::is_empty) {
        violations.push(FieldViolation {
            field: "size",
            message: "Size is required",
        });
    }
    if payload.price.is_none() {
        violations.push(FieldViolation {
            field: "price",
            message: "Price is required",
        });
    }
    violations
}

#[instrument(skip(state))]
pub async fn get_cart(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<CartResponse>, AppError> {
    let cart = Cart::get_or_create(&state.db, user_id).await?;
    Ok(Json(CartResponse {
        success: true,
        cart,
    }))
}

#[instrument(skip(state, payload))]
pub async fn add_item(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<AddItemRequest>,
) -> Result<Json<CartResponse>, AppError> {
    let violations = validate_add_item(&payload);
    if !violations.is_empty() {
        warn!(count = violations.len(), "add to cart rejected");
        return Err(AppError::Validation(violations));
    }

    // Validation guarantees the fields are present.
    let food_item = payload.food_item.unwrap_or_default();
    let quantity = payload.quantity.unwrap_or(1) as u32;
    let size = payload.size.unwrap_or_default();
    let price = payload.price.unwrap_or_default();

    let cart = Cart::get_or_create(&state.db, user_id).await?;
    let mut items = cart.items.0;
    lines::add_line(&mut items, food_item, quantity, size, price);

    let cart = Cart::save_items(&state.db, user_id, &items).await?;
    info!(user_id = %user_id, lines = cart.items.0.len(), "item added to cart");
    Ok(Json(CartResponse {
        success: true,
        cart,
    }))
}

#[instrument(skip(state, payload))]
pub async fn update_item(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(line_id): Path<Uuid>,
    Json(payload): Json<UpdateQuantityRequest>,
) -> Result<Json<CartResponse>, AppError> {
    let cart = Cart::find(&state.db, user_id)
        .await?
        .ok_or(AppError::NotFound("Cart not found"))?;

    let mut items = cart.items.0;
    if !lines::set_quantity(&mut items, line_id, payload.quantity) {
        return Err(AppError::NotFound("Item not found in cart"));
    }

    let cart = Cart::save_items(&state.db, user_id, &items).await?;
    Ok(Json(CartResponse {
        success: true,
        cart,
    }))
}

#[instrument(skip(state))]
pub async fn remove_item(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(line_id): Path<Uuid>,
) -> Result<Json<CartResponse>, AppError> {
    let cart = Cart::find(&state.db, user_id)
        .await?
        .ok_or(AppError::NotFound("Cart not found"))?;

    // Removing an absent line is fine; only a missing cart is an error.
    let mut items = cart.items.0;
    lines::remove_line(&mut items, line_id);

    let cart = Cart::save_items(&state.db, user_id, &items).await?;
    Ok(Json(CartResponse {
        success: true,
        cart,
    }))
}

#[instrument(skip(state))]
pub async fn clear_cart(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<ClearCartResponse>, AppError> {
    Cart::find(&state.db, user_id)
        .await?
        .ok_or(AppError::NotFound("Cart not found"))?;

    Cart::save_items(&state.db, user_id, &[]).await?;
    info!(user_id = %user_id, "cart cleared");
    Ok(Json(ClearCartResponse {
        success: true,
        message: "Cart cleared successfully",
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn add_item_requires_all_fields() {
        let payload = AddItemRequest {
            food_item: None,
            quantity: None,
            size: None,
            price: None,
        };
        let fields: Vec<_> = validate_add_item(&payload)
            .iter()
            .map(|v| v.field)
            .collect();
        assert_eq!(fields, vec!["foodItem", "quantity", "size", "price"]);
    }

    #[test]
    fn add_item_rejects_non_positive_quantity() {
        let payload = AddItemRequest {
            food_item: Some(json!({"id": "pizza-1"})),
            quantity: Some(0),
            size: Some("M".into()),
            price: Some(199.0),
        };
        let violations = validate_add_item(&payload);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].field, "quantity");
    }

    #[test]
    fn complete_add_item_passes_validation() {
        let payload = AddItemRequest {
            food_item: Some(json!({"id": "pizza-1"})),
            quantity: Some(1),
            size: Some("M".into()),
            price: Some(199.0),
        };
        assert!(validate_add_item(&payload).is_empty());
    }
}
