// src/store/sessions.rs

use std::collections::HashMap;

use chrono::NaiveDate;
use sqlx::SqlitePool;

use crate::error::AppError;

/// Adds study minutes (and optionally a completed lesson) to today's
/// session row, creating it if the day has none yet.
pub async fn log_study_time(
    pool: &SqlitePool,
    user_id: i64,
    date: NaiveDate,
    minutes: i64,
    completed_lesson: bool,
) -> Result<(), AppError> {
    sqlx::query(
        r#"
        INSERT INTO study_sessions (user_id, date, total_minutes, lessons_completed)
        VALUES (?, ?, ?, ?)
        ON CONFLICT (user_id, date) DO UPDATE SET
            total_minutes = study_sessions.total_minutes + excluded.total_minutes,
            lessons_completed = study_sessions.lessons_completed + excluded.lessons_completed
        "#,
    )
    .bind(user_id)
    .bind(date)
    .bind(minutes)
    .bind(if completed_lesson { 1i64 } else { 0 })
    .execute(pool)
    .await
    .map_err(|e| AppError::StoreWriteFailed(e.to_string()))?;

    Ok(())
}

/// Study minutes per day since `since`, for the streak walk.
pub async fn minutes_by_day(
    pool: &SqlitePool,
    user_id: i64,
    since: NaiveDate,
) -> Result<HashMap<NaiveDate, i64>, AppError> {
    let rows: Vec<(NaiveDate, i64)> = sqlx::query_as(
        r#"
        SELECT date, total_minutes
        FROM study_sessions
        WHERE user_id = ? AND date >= ?
        "#,
    )
    .bind(user_id)
    .bind(since)
    .fetch_all(pool)
    .await
    .map_err(|e| AppError::StoreReadFailed(e.to_string()))?;

    Ok(rows.into_iter().collect())
}
