// src/handlers/lessons.rs

use axum::{
    Extension, Json,
    extract::{Path, State},
    response::IntoResponse,
};
use sqlx::SqlitePool;
use validator::Validate;

use crate::{
    content::ContentClient,
    error::AppError,
    models::progress::{LessonOverview, LessonProgress, LessonStatus, UpdateProgressRequest},
    store::{self, progress::ProgressUpsert},
    utils::auth::Claims,
};

/// Lists the subject's lessons from the content manifest, merged with the
/// caller's stored progress. A progress read fault degrades to "everything
/// not started" rather than failing the screen.
pub async fn list_lessons(
    State(pool): State<SqlitePool>,
    State(content): State<ContentClient>,
    Extension(claims): Extension<Claims>,
    Path(subject): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let subject = subject.to_lowercase();
    let manifest = content.load_lessons(&subject).await?;

    let progress = store::progress::list_for_subject(&pool, claims.user_id(), &subject)
        .await
        .unwrap_or_else(|e| {
            tracing::warn!("Progress read failed, serving defaults: {}", e);
            Vec::new()
        });

    let overview: Vec<LessonOverview> = manifest
        .lessons
        .iter()
        .map(|lesson| {
            let row = progress.iter().find(|p| p.lesson_id == lesson.id);
            LessonOverview {
                id: lesson.id,
                slug: lesson.slug.clone(),
                title: lesson.title.clone(),
                is_free: lesson.is_free,
                content_ready: lesson.content_ready,
                status: row.map(|p| p.lesson_status()).unwrap_or_default(),
                score: row.and_then(|p| p.score),
                time_spent_minutes: row.map(|p| p.time_spent_minutes).unwrap_or(0),
            }
        })
        .collect();

    Ok(Json(overview))
}

/// Returns a lesson's instruction screens, parsed out of its markdown.
pub async fn get_instructions(
    State(content): State<ContentClient>,
    Path((subject, slug)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let subject = subject.to_lowercase();
    let instructions = content.load_instructions(&subject, &slug).await?;
    Ok(Json(instructions))
}

/// Records a lesson progress event.
///
/// The stored row is merged with the request before the keyed upsert:
/// status never regresses (completed is terminal), attempts increment, and
/// reported minutes accumulate. Study time also feeds the day's session row
/// for the streak; that write is best-effort.
pub async fn update_progress(
    State(pool): State<SqlitePool>,
    Extension(claims): Extension<Claims>,
    Path((subject, lesson_id)): Path<(String, i64)>,
    Json(payload): Json<UpdateProgressRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::ValidationError(validation_errors.to_string()));
    }

    let subject = subject.to_lowercase();
    let user_id = claims.user_id();

    let existing = store::progress::find(&pool, user_id, &subject, lesson_id)
        .await
        .unwrap_or_else(|e| {
            tracing::warn!("Progress read failed before update: {}", e);
            None
        });

    let current_status = existing
        .as_ref()
        .map(|p| p.lesson_status())
        .unwrap_or_default();
    let merged_status = LessonStatus::merge(current_status, payload.status);
    let newly_completed =
        merged_status == LessonStatus::Completed && current_status != LessonStatus::Completed;

    let added_minutes = payload.time_spent_minutes.unwrap_or(0);
    let time_spent = existing.as_ref().map(|p| p.time_spent_minutes).unwrap_or(0) + added_minutes;
    let attempts = existing.as_ref().map(|p| p.attempts).unwrap_or(0) + 1;
    let score = payload.score.or(existing.as_ref().and_then(|p| p.score));
    let completed_at = if merged_status == LessonStatus::Completed {
        existing
            .as_ref()
            .and_then(|p| p.completed_at)
            .or_else(|| Some(chrono::Utc::now()))
    } else {
        None
    };

    let row = ProgressUpsert {
        user_id,
        subject: &subject,
        lesson_id,
        lesson_slug: &payload.lesson_slug,
        status: merged_status.as_str(),
        score,
        time_spent_minutes: time_spent,
        attempts,
        completed_at,
    };

    let updated = match store::progress::upsert(&pool, row).await {
        Ok(updated) => updated,
        // Progress writes degrade silently: the session carries on with the
        // merged view even if this event was lost.
        Err(e) => {
            tracing::warn!("Progress write failed, continuing: {}", e);
            LessonProgress {
                id: existing.as_ref().map(|p| p.id).unwrap_or(0),
                user_id,
                subject: subject.clone(),
                lesson_id,
                lesson_slug: payload.lesson_slug.clone(),
                status: merged_status.as_str().to_string(),
                score,
                time_spent_minutes: time_spent,
                attempts,
                completed_at,
                updated_at: chrono::Utc::now(),
            }
        }
    };

    if added_minutes > 0 || newly_completed {
        let today = chrono::Utc::now().date_naive();
        if let Err(e) =
            store::sessions::log_study_time(&pool, user_id, today, added_minutes, newly_completed)
                .await
        {
            tracing::warn!("Study session write failed, continuing: {}", e);
        }
    }

    Ok(Json(updated))
}
