use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::cart::repo::Cart;

/// Fields arrive optional so a missing one becomes a field violation
/// instead of a deserialization rejection.
#[derive(Debug, Deserialize)]
pub struct AddItemRequest {
    #[serde(default, rename = "foodItem")]
    pub food_item: Option<Value>,
    #[serde(default)]
    pub quantity: Option<i64>,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateQuantityRequest {
    pub quantity: i64,
}

#[derive(Debug, Serialize)]
pub struct CartResponse {
    pub success: bool,
    pub cart: Cart,
}

#[derive(Debug, Serialize)]
pub struct ClearCartResponse {
    pub success: bool,
    pub message: &'static str,
}
