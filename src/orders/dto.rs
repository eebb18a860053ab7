use serde::{Deserialize, Serialize};

use crate::orders::repo::{Order, OrderLine};

/// Fields arrive optional so missing ones become field violations instead
/// of deserialization rejections.
#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    #[serde(default)]
    pub items: Option<Vec<OrderLine>>,
    #[serde(default, rename = "totalAmount")]
    pub total_amount: Option<f64>,
    #[serde(default, rename = "deliveryAddress")]
    pub delivery_address: Option<String>,
    #[serde(default, rename = "paymentMethod")]
    pub payment_method: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct OrderResponse {
    pub success: bool,
    pub order: Order,
}

#[derive(Debug, Serialize)]
pub struct OrderListResponse {
    pub success: bool,
    pub orders: Vec<Order>,
}
