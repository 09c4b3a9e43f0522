// src/store/progress.rs

use sqlx::SqlitePool;

use crate::error::AppError;
use crate::models::progress::LessonProgress;

/// Fully merged row to write. The handler resolves status non-regression
/// and accumulation before calling; the store stays a dumb keyed upsert so
/// concurrent updates are settled by ON CONFLICT, not by the client.
pub struct ProgressUpsert<'a> {
    pub user_id: i64,
    pub subject: &'a str,
    pub lesson_id: i64,
    pub lesson_slug: &'a str,
    pub status: &'a str,
    pub score: Option<i64>,
    pub time_spent_minutes: i64,
    pub attempts: i64,
    pub completed_at: Option<chrono::DateTime<chrono::Utc>>,
}

pub async fn upsert(
    pool: &SqlitePool,
    row: ProgressUpsert<'_>,
) -> Result<LessonProgress, AppError> {
    sqlx::query_as::<_, LessonProgress>(
        r#"
        INSERT INTO lesson_progress
            (user_id, subject, lesson_id, lesson_slug, status, score,
             time_spent_minutes, attempts, completed_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        ON CONFLICT (user_id, subject, lesson_id) DO UPDATE SET
            lesson_slug = excluded.lesson_slug,
            status = excluded.status,
            score = excluded.score,
            time_spent_minutes = excluded.time_spent_minutes,
            attempts = excluded.attempts,
            completed_at = excluded.completed_at,
            updated_at = excluded.updated_at
        RETURNING id, user_id, subject, lesson_id, lesson_slug, status, score,
                  time_spent_minutes, attempts, completed_at, updated_at
        "#,
    )
    .bind(row.user_id)
    .bind(row.subject)
    .bind(row.lesson_id)
    .bind(row.lesson_slug)
    .bind(row.status)
    .bind(row.score)
    .bind(row.time_spent_minutes)
    .bind(row.attempts)
    .bind(row.completed_at)
    .bind(chrono::Utc::now())
    .fetch_one(pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to upsert lesson progress: {:?}", e);
        AppError::StoreWriteFailed(e.to_string())
    })
}

pub async fn find(
    pool: &SqlitePool,
    user_id: i64,
    subject: &str,
    lesson_id: i64,
) -> Result<Option<LessonProgress>, AppError> {
    sqlx::query_as::<_, LessonProgress>(
        r#"
        SELECT id, user_id, subject, lesson_id, lesson_slug, status, score,
               time_spent_minutes, attempts, completed_at, updated_at
        FROM lesson_progress
        WHERE user_id = ? AND subject = ? AND lesson_id = ?
        "#,
    )
    .bind(user_id)
    .bind(subject)
    .bind(lesson_id)
    .fetch_optional(pool)
    .await
    .map_err(|e| AppError::StoreReadFailed(e.to_string()))
}

pub async fn list_for_subject(
    pool: &SqlitePool,
    user_id: i64,
    subject: &str,
) -> Result<Vec<LessonProgress>, AppError> {
    sqlx::query_as::<_, LessonProgress>(
        r#"
        SELECT id, user_id, subject, lesson_id, lesson_slug, status, score,
               time_spent_minutes, attempts, completed_at, updated_at
        FROM lesson_progress
        WHERE user_id = ? AND subject = ?
        ORDER BY lesson_id
        "#,
    )
    .bind(user_id)
    .bind(subject)
    .fetch_all(pool)
    .await
    .map_err(|e| AppError::StoreReadFailed(e.to_string()))
}
