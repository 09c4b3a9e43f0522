// src/store/users.rs

use sqlx::SqlitePool;

use crate::error::AppError;
use crate::models::user::User;

pub async fn create(pool: &SqlitePool, email: &str, password_hash: &str) -> Result<User, AppError> {
    sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (email, password, created_at)
        VALUES (?, ?, ?)
        RETURNING id, email, password, created_at
        "#,
    )
    .bind(email)
    .bind(password_hash)
    .bind(chrono::Utc::now())
    .fetch_one(pool)
    .await
    .map_err(|e| {
        if e.to_string().contains("UNIQUE constraint") {
            AppError::Conflict(format!("An account for '{email}' already exists"))
        } else {
            tracing::error!("Failed to create user: {:?}", e);
            AppError::StoreWriteFailed(e.to_string())
        }
    })
}

pub async fn find_by_email(pool: &SqlitePool, email: &str) -> Result<Option<User>, AppError> {
    sqlx::query_as::<_, User>(
        "SELECT id, email, password, created_at FROM users WHERE email = ?",
    )
    .bind(email)
    .fetch_optional(pool)
    .await
    .map_err(|e| AppError::StoreReadFailed(e.to_string()))
}
