// src/store/weak_spots.rs

use sqlx::SqlitePool;

use crate::config::{WEAK_SPOT_ACCURACY_THRESHOLD, WEAK_SPOT_MIN_ATTEMPTS};
use crate::error::AppError;
use crate::models::weak_spot::WeakSpot;

/// Folds one attempt into the (topic, subtopic) aggregate atomically.
/// The conflict branch recomputes the running accuracy and the
/// needs_practice flag inside the store, so concurrent submissions cannot
/// lose counts.
pub async fn record_attempt(
    pool: &SqlitePool,
    user_id: i64,
    subject: &str,
    topic: &str,
    subtopic: &str,
    is_correct: bool,
) -> Result<(), AppError> {
    let now = chrono::Utc::now();
    let correct = if is_correct { 1i64 } else { 0 };
    let last_incorrect = if is_correct { None } else { Some(now) };

    sqlx::query(
        r#"
        INSERT INTO weak_spots
            (user_id, subject, topic, subtopic, total_attempts, correct_attempts,
             accuracy_percentage, needs_practice, last_incorrect_at, updated_at)
        VALUES (?, ?, ?, ?, 1, ?, ?, 0, ?, ?)
        ON CONFLICT (user_id, subject, topic, subtopic) DO UPDATE SET
            total_attempts = weak_spots.total_attempts + 1,
            correct_attempts = weak_spots.correct_attempts + excluded.correct_attempts,
            accuracy_percentage = CAST(ROUND(
                100.0 * (weak_spots.correct_attempts + excluded.correct_attempts)
                      / (weak_spots.total_attempts + 1)) AS INTEGER),
            needs_practice = CASE
                WHEN weak_spots.total_attempts + 1 >= ?
                 AND 100.0 * (weak_spots.correct_attempts + excluded.correct_attempts)
                           / (weak_spots.total_attempts + 1) < ?
                THEN 1 ELSE 0 END,
            last_incorrect_at = COALESCE(excluded.last_incorrect_at, weak_spots.last_incorrect_at),
            updated_at = excluded.updated_at
        "#,
    )
    .bind(user_id)
    .bind(subject)
    .bind(topic)
    .bind(subtopic)
    .bind(correct)
    .bind(correct * 100)
    .bind(last_incorrect)
    .bind(now)
    .bind(WEAK_SPOT_MIN_ATTEMPTS)
    .bind(WEAK_SPOT_ACCURACY_THRESHOLD as f64)
    .execute(pool)
    .await
    .map_err(|e| AppError::StoreWriteFailed(e.to_string()))?;

    Ok(())
}

/// Topics currently flagged for practice, worst accuracy first.
pub async fn list_needing_practice(
    pool: &SqlitePool,
    user_id: i64,
    subject: &str,
) -> Result<Vec<WeakSpot>, AppError> {
    sqlx::query_as::<_, WeakSpot>(
        r#"
        SELECT id, user_id, subject, topic, subtopic, total_attempts,
               correct_attempts, accuracy_percentage, needs_practice,
               last_incorrect_at, updated_at
        FROM weak_spots
        WHERE user_id = ? AND subject = ? AND needs_practice = 1
        ORDER BY accuracy_percentage ASC, total_attempts DESC
        "#,
    )
    .bind(user_id)
    .bind(subject)
    .fetch_all(pool)
    .await
    .map_err(|e| AppError::StoreReadFailed(e.to_string()))
}
