use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::{types::Json, FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::orders::status::OrderStatus;

/// One line of an order, snapshotted from the cart at checkout. Immutable
/// once the order row exists.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderLine {
    #[serde(rename = "foodItem")]
    pub food_item: Value,
    pub quantity: u32,
    pub size: String,
    pub price: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Order {
    pub id: Uuid,
    #[serde(rename = "user")]
    pub user_id: Uuid,
    pub items: Json<Vec<OrderLine>>,
    #[serde(rename = "totalAmount")]
    pub total_amount: f64,
    #[serde(rename = "deliveryAddress")]
    pub delivery_address: String,
    #[serde(rename = "paymentMethod")]
    pub payment_method: String,
    pub status: String,
    #[serde(rename = "orderDate")]
    pub order_date: OffsetDateTime,
}

impl Order {
    pub async fn create(
        db: &PgPool,
        user_id: Uuid,
        items: &[OrderLine],
        total_amount: f64,
        delivery_address: &str,
        payment_method: &str,
    ) -> anyhow::Result<Order> {
        let order = sqlx::query_as::<_, Order>(
            r#"
            INSERT INTO orders (user_id, items, total_amount, delivery_address, payment_method)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, user_id, items, total_amount, delivery_address, payment_method,
                      status, order_date
            "#,
        )
        .bind(user_id)
        .bind(Json(items))
        .bind(total_amount)
        .bind(delivery_address)
        .bind(payment_method)
        .fetch_one(db)
        .await?;
        Ok(order)
    }

    /// All orders for a user, newest first.
    pub async fn list_by_user(db: &PgPool, user_id: Uuid) -> anyhow::Result<Vec<Order>> {
        let orders = sqlx::query_as::<_, Order>(
            r#"
            SELECT id, user_id, items, total_amount, delivery_address, payment_method,
                   status, order_date
            FROM orders
            WHERE user_id = $1
            ORDER BY order_date DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(db)
        .await?;
        Ok(orders)
    }

    pub async fn find_by_id(db: &PgPool, id: Uuid) -> anyhow::Result<Option<Order>> {
        let order = sqlx::query_as::<_, Order>(
            r#"
            SELECT id, user_id, items, total_amount, delivery_address, payment_method,
                   status, order_date
            FROM orders
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(order)
    }

    /// `status` is the only field ever mutated after creation.
    pub async fn set_status(db: &PgPool, id: Uuid, status: OrderStatus) -> anyhow::Result<Order> {
        let order = sqlx::query_as::<_, Order>(
            r#"
            UPDATE orders
            SET status = $2
            WHERE id = $1
            RETURNING id, user_id, items, total_amount, delivery_address, payment_method,
                      status, order_date
            "#,
        )
        .bind(id)
        .bind(status.as_str())
        .fetch_one(db)
        .await?;
        Ok(order)
    }
}
