use serde::{Deserialize, Serialize};
use sqlx::{types::Json, FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::cart::lines::CartLine;

/// Cart record; the line sequence lives in a single jsonb column, so every
/// mutation is a whole-row read-modify-write.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Cart {
    #[serde(rename = "user")]
    pub user_id: Uuid,
    pub items: Json<Vec<CartLine>>,
    #[serde(rename = "updatedAt")]
    pub updated_at: OffsetDateTime,
}

impl Cart {
    pub async fn find(db: &PgPool, user_id: Uuid) -> anyhow::Result<Option<Cart>> {
        let cart = sqlx::query_as::<_, Cart>(
            r#"
            SELECT user_id, items, updated_at
            FROM carts
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(db)
        .await?;
        Ok(cart)
    }

    /// Get the user's cart, creating an empty one if absent. The insert is
    /// an upsert against the user_id primary key, so two concurrent first
    /// adds converge on a single row.
    pub async fn get_or_create(db: &PgPool, user_id: Uuid) -> anyhow::Result<Cart> {
        let inserted = sqlx::query_as::<_, Cart>(
            r#"
            INSERT INTO carts (user_id)
            VALUES ($1)
            ON CONFLICT (user_id) DO NOTHING
            RETURNING user_id, items, updated_at
            "#,
        )
        .bind(user_id)
        .fetch_optional(db)
        .await?;

        match inserted {
            Some(cart) => Ok(cart),
            None => {
                let cart = sqlx::query_as::<_, Cart>(
                    r#"
                    SELECT user_id, items, updated_at
                    FROM carts
                    WHERE user_id = $1
                    "#,
                )
                .bind(user_id)
                .fetch_one(db)
                .await?;
                Ok(cart)
            }
        }
    }

    /// Persist a new line sequence and refresh updated_at. Last writer wins
    /// on the whole row.
    pub async fn save_items(
        db: &PgPool,
        user_id: Uuid,
        items: &[CartLine],
    ) -> anyhow::Result<Cart> {
        let cart = sqlx::query_as::<_, Cart>(
            r#"
            UPDATE carts
            SET items = $2, updated_at = now()
            WHERE user_id = $1
            RETURNING user_id, items, updated_at
            "#,
        )
        .bind(user_id)
        .bind(Json(items))
        .fetch_one(db)
        .await?;
        Ok(cart)
    }
}
