// src/store/enrollments.rs

use sqlx::SqlitePool;

use crate::error::AppError;
use crate::models::enrollment::Enrollment;

pub async fn create(
    pool: &SqlitePool,
    user_id: i64,
    subject: &str,
    target_tier: &str,
    target_grade: Option<&str>,
) -> Result<Enrollment, AppError> {
    sqlx::query_as::<_, Enrollment>(
        r#"
        INSERT INTO enrollments (user_id, subject, enrolled_at, target_tier, target_grade, status)
        VALUES (?, ?, ?, ?, ?, 'active')
        RETURNING id, user_id, subject, enrolled_at, target_tier, target_grade, status
        "#,
    )
    .bind(user_id)
    .bind(subject)
    .bind(chrono::Utc::now())
    .bind(target_tier)
    .bind(target_grade)
    .fetch_one(pool)
    .await
    .map_err(|e| {
        if e.to_string().contains("UNIQUE constraint") {
            AppError::Conflict(format!("Already enrolled in '{subject}'"))
        } else {
            tracing::error!("Failed to create enrollment: {:?}", e);
            AppError::StoreWriteFailed(e.to_string())
        }
    })
}

pub async fn list_for_user(pool: &SqlitePool, user_id: i64) -> Result<Vec<Enrollment>, AppError> {
    sqlx::query_as::<_, Enrollment>(
        r#"
        SELECT id, user_id, subject, enrolled_at, target_tier, target_grade, status
        FROM enrollments
        WHERE user_id = ?
        ORDER BY enrolled_at DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
    .map_err(|e| AppError::StoreReadFailed(e.to_string()))
}

pub async fn find(
    pool: &SqlitePool,
    user_id: i64,
    subject: &str,
) -> Result<Option<Enrollment>, AppError> {
    sqlx::query_as::<_, Enrollment>(
        r#"
        SELECT id, user_id, subject, enrolled_at, target_tier, target_grade, status
        FROM enrollments
        WHERE user_id = ? AND subject = ?
        "#,
    )
    .bind(user_id)
    .bind(subject)
    .fetch_optional(pool)
    .await
    .map_err(|e| AppError::StoreReadFailed(e.to_string()))
}

/// Updates targets/status; unset fields keep their stored values.
pub async fn update(
    pool: &SqlitePool,
    user_id: i64,
    subject: &str,
    target_tier: Option<&str>,
    target_grade: Option<&str>,
    status: Option<&str>,
) -> Result<Option<Enrollment>, AppError> {
    sqlx::query_as::<_, Enrollment>(
        r#"
        UPDATE enrollments
        SET target_tier = COALESCE(?, target_tier),
            target_grade = COALESCE(?, target_grade),
            status = COALESCE(?, status)
        WHERE user_id = ? AND subject = ?
        RETURNING id, user_id, subject, enrolled_at, target_tier, target_grade, status
        "#,
    )
    .bind(target_tier)
    .bind(target_grade)
    .bind(status)
    .bind(user_id)
    .bind(subject)
    .fetch_optional(pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to update enrollment: {:?}", e);
        AppError::StoreWriteFailed(e.to_string())
    })
}

/// Removes the enrollment and every piece of subject data it owns, in one
/// transaction: attempts, lesson progress and weak spots. Study sessions
/// are per-day across subjects and are left alone.
pub async fn unenroll(pool: &SqlitePool, user_id: i64, subject: &str) -> Result<bool, AppError> {
    let mut tx = pool.begin().await?;

    for table in [
        "question_attempts",
        "lesson_progress",
        "weak_spots",
    ] {
        sqlx::query(&format!(
            "DELETE FROM {table} WHERE user_id = ? AND subject = ?"
        ))
        .bind(user_id)
        .bind(subject)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            tracing::error!("Failed to clear {table} during unenroll: {:?}", e);
            AppError::StoreWriteFailed(e.to_string())
        })?;
    }

    let deleted = sqlx::query("DELETE FROM enrollments WHERE user_id = ? AND subject = ?")
        .bind(user_id)
        .bind(subject)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::StoreWriteFailed(e.to_string()))?;

    tx.commit().await?;

    Ok(deleted.rows_affected() > 0)
}
