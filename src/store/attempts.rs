// src/store/attempts.rs

use sqlx::SqlitePool;

use crate::error::AppError;
use crate::models::attempt::QuestionAttempt;

/// Appends one attempt to the log. Never updates existing rows.
pub async fn insert(
    pool: &SqlitePool,
    user_id: i64,
    subject: &str,
    question_id: &str,
    user_answer: &str,
    is_correct: bool,
    time_taken_seconds: i64,
    practice_type: &str,
) -> Result<(), AppError> {
    sqlx::query(
        r#"
        INSERT INTO question_attempts
            (user_id, subject, question_id, user_answer, is_correct,
             time_taken_seconds, practice_type, attempted_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(user_id)
    .bind(subject)
    .bind(question_id)
    .bind(user_answer)
    .bind(is_correct)
    .bind(time_taken_seconds)
    .bind(practice_type)
    .bind(chrono::Utc::now())
    .execute(pool)
    .await
    .map_err(|e| AppError::StoreWriteFailed(e.to_string()))?;

    Ok(())
}

/// Most recent attempts first.
pub async fn recent(
    pool: &SqlitePool,
    user_id: i64,
    subject: &str,
    limit: i64,
) -> Result<Vec<QuestionAttempt>, AppError> {
    sqlx::query_as::<_, QuestionAttempt>(
        r#"
        SELECT id, user_id, subject, question_id, user_answer, is_correct,
               time_taken_seconds, practice_type, attempted_at
        FROM question_attempts
        WHERE user_id = ? AND subject = ?
        ORDER BY attempted_at DESC, id DESC
        LIMIT ?
        "#,
    )
    .bind(user_id)
    .bind(subject)
    .bind(limit)
    .fetch_all(pool)
    .await
    .map_err(|e| AppError::StoreReadFailed(e.to_string()))
}
