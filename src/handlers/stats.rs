// src/handlers/stats.rs

use axum::{
    Extension, Json,
    extract::{Path, State},
    response::IntoResponse,
};
use chrono::Duration;
use sqlx::SqlitePool;

use crate::{
    config::{RECENT_ATTEMPTS_WINDOW, STREAK_WINDOW_DAYS},
    content::ContentClient,
    engine::stats::{StatsInput, compute_stats},
    error::AppError,
    models::enrollment::Tier,
    models::weak_spot::WeakTopic,
    store,
    utils::auth::Claims,
};

/// Aggregated dashboard statistics for one subject.
///
/// Every read here degrades to a safe default on failure, so the response
/// always has the full renderable shape; only total content loss would
/// surface an error, and even the manifest falls back to counting the
/// progress rows we do have.
pub async fn get_stats(
    State(pool): State<SqlitePool>,
    State(content): State<ContentClient>,
    Extension(claims): Extension<Claims>,
    Path(subject): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let subject = subject.to_lowercase();
    let user_id = claims.user_id();

    let tier = store::enrollments::find(&pool, user_id, &subject)
        .await
        .unwrap_or_else(|e| {
            tracing::warn!("Enrollment read failed, assuming Foundation: {}", e);
            None
        })
        .map(|e| e.tier())
        .unwrap_or(Tier::Foundation);

    let progress = store::progress::list_for_subject(&pool, user_id, &subject)
        .await
        .unwrap_or_else(|e| {
            tracing::warn!("Progress read failed, serving zeroed stats: {}", e);
            Vec::new()
        });

    let total_lessons = match content.load_lessons(&subject).await {
        Ok(manifest) => manifest.lessons.len(),
        Err(e) => {
            tracing::warn!("Lesson manifest unavailable for stats: {}", e);
            progress.len()
        }
    };

    let attempts = store::attempts::recent(
        &pool,
        user_id,
        &subject,
        RECENT_ATTEMPTS_WINDOW as i64,
    )
    .await
    .unwrap_or_else(|e| {
        tracing::warn!("Attempt read failed, serving zeroed accuracy: {}", e);
        Vec::new()
    });

    let today = chrono::Utc::now().date_naive();
    let minutes_by_day =
        store::sessions::minutes_by_day(&pool, user_id, today - Duration::days(STREAK_WINDOW_DAYS))
            .await
            .unwrap_or_else(|e| {
                tracing::warn!("Study session read failed, streak defaults to 0: {}", e);
                Default::default()
            });

    let weak_spots = store::weak_spots::list_needing_practice(&pool, user_id, &subject)
        .await
        .unwrap_or_else(|e| {
            tracing::warn!("Weak-spot read failed, serving none: {}", e);
            Vec::new()
        });

    let stats = compute_stats(StatsInput {
        tier,
        total_lessons,
        progress: &progress,
        recent_attempts: &attempts,
        minutes_by_day: &minutes_by_day,
        weak_spots,
        today,
    });

    Ok(Json(stats))
}

/// The subject's weak spots, worst accuracy first (ties broken by the
/// higher attempt count).
pub async fn get_weak_spots(
    State(pool): State<SqlitePool>,
    Extension(claims): Extension<Claims>,
    Path(subject): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let subject = subject.to_lowercase();

    let spots = store::weak_spots::list_needing_practice(&pool, claims.user_id(), &subject).await?;
    let topics: Vec<WeakTopic> = spots.into_iter().map(WeakTopic::from).collect();

    Ok(Json(topics))
}
