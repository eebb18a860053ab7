use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::auth::dto::UpdateProfileRequest;

/// User record in the database.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub location: String,
    pub phone: String,
    pub profile_pic: Option<String>,
    pub created_at: OffsetDateTime,
}

impl User {
    /// Find a user by exact email match.
    pub async fn find_by_email(db: &PgPool, email: &str) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password_hash, location, phone, profile_pic, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    pub async fn find_by_id(db: &PgPool, id: Uuid) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password_hash, location, phone, profile_pic, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    /// Create a new user with an already-hashed password.
    pub async fn create(
        db: &PgPool,
        name: &str,
        email: &str,
        password_hash: &str,
        location: &str,
    ) -> anyhow::Result<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, email, password_hash, location)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, email, password_hash, location, phone, profile_pic, created_at
            "#,
        )
        .bind(name)
        .bind(email)
        .bind(password_hash)
        .bind(location)
        .fetch_one(db)
        .await?;
        Ok(user)
    }

    /// Apply only the provided, non-empty fields. Email and the password
    /// hash are not reachable through this path.
    pub async fn update_profile(
        db: &PgPool,
        id: Uuid,
        update: &UpdateProfileRequest,
    ) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users SET
                name = COALESCE(NULLIF($2, ''), name),
                location = COALESCE(NULLIF($3, ''), location),
                phone = COALESCE(NULLIF($4, ''), phone),
                profile_pic = COALESCE(NULLIF($5, ''), profile_pic)
            WHERE id = $1
            RETURNING id, name, email, password_hash, location, phone, profile_pic, created_at
            "#,
        )
        .bind(id)
        .bind(update.name.clone().unwrap_or_default())
        .bind(update.location.clone().unwrap_or_default())
        .bind(update.phone.clone().unwrap_or_default())
        .bind(update.profile_pic.clone().unwrap_or_default())
        .fetch_optional(db)
        .await?;
        Ok(user)
    }
}
