// src/handlers/practice.rs

use axum::{
    Extension, Json,
    extract::{Path, State},
    response::IntoResponse,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use sqlx::SqlitePool;
use validator::Validate;

use crate::{
    config::TIMED_SESSION_SECONDS,
    content::ContentClient,
    engine::{evaluator, selector},
    error::AppError,
    models::attempt::{PracticeMode, StartSessionRequest, SubmitAttemptRequest},
    models::question::SessionQuestion,
    store,
    utils::auth::Claims,
};

/// A freshly selected practice session. Answers stay server-side; timed
/// sessions carry their wall-clock allowance for the client countdown.
#[derive(Debug, Serialize)]
pub struct PracticeSessionResponse {
    pub questions: Vec<SessionQuestion>,
    pub mode: PracticeMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_in: Option<u64>,
}

/// Starts a practice session: difficulty-weighted random selection over the
/// subject's question bank.
///
/// Weak-spot mode narrows the pool to flagged (topic, subtopic) pairs; timed
/// mode doubles the count and attaches the countdown allowance. Expiry is
/// enforced by the client session, which force-completes when it hits zero.
pub async fn start_session(
    State(pool): State<SqlitePool>,
    State(content): State<ContentClient>,
    Extension(claims): Extension<Claims>,
    Path(subject): Path<String>,
    Json(payload): Json<StartSessionRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::ValidationError(validation_errors.to_string()));
    }

    let subject = subject.to_lowercase();
    let bank = content.load_bank(&subject).await?;

    let selectable = if payload.mode == PracticeMode::WeakSpot {
        let weak: Vec<(String, String)> =
            store::weak_spots::list_needing_practice(&pool, claims.user_id(), &subject)
                .await
                .unwrap_or_else(|e| {
                    tracing::warn!("Weak-spot read failed, using full bank: {}", e);
                    Vec::new()
                })
                .into_iter()
                .map(|spot| (spot.topic, spot.subtopic))
                .collect();
        selector::restrict_to_weak_topics(&bank.questions, &weak)
    } else {
        bank.questions.clone()
    };

    let count = selector::session_question_count(payload.mode, payload.count.map(|c| c as usize));

    let mut rng = StdRng::from_entropy();
    let selected = selector::select_questions(&selectable, count, &mut rng);

    Ok(Json(PracticeSessionResponse {
        questions: selected.iter().map(SessionQuestion::from).collect(),
        mode: payload.mode,
        expires_in: (payload.mode == PracticeMode::Timed).then_some(TIMED_SESSION_SECONDS),
    }))
}

/// Evaluates a submitted answer and records the attempt.
///
/// Correctness is the evaluator's trimmed exact-string match. The attempt
/// log append and the weak-spot aggregate update are both best-effort: a
/// storage fault is logged and swallowed so the student's session is never
/// interrupted by it.
pub async fn submit_attempt(
    State(pool): State<SqlitePool>,
    State(content): State<ContentClient>,
    Extension(claims): Extension<Claims>,
    Path(subject): Path<String>,
    Json(payload): Json<SubmitAttemptRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::ValidationError(validation_errors.to_string()));
    }

    let answer = payload.answer.trim();
    if answer.is_empty() {
        return Err(AppError::ValidationError(
            "Answer must not be empty".to_string(),
        ));
    }

    let subject = subject.to_lowercase();
    let bank = content.load_bank(&subject).await?;

    // Every recorded attempt must reference a question in the loaded bank.
    let question = bank
        .find(&payload.question_id)
        .ok_or_else(|| AppError::NotFound(format!("Unknown question '{}'", payload.question_id)))?;

    let canonical = bank.canonical_answer(&payload.question_id).ok_or_else(|| {
        AppError::ContentUnavailable(format!(
            "No canonical answer for '{}'",
            payload.question_id
        ))
    })?;

    let result = evaluator::evaluate(canonical, answer);

    let user_id = claims.user_id();
    if let Err(e) = store::attempts::insert(
        &pool,
        user_id,
        &subject,
        &payload.question_id,
        answer,
        result.is_correct,
        payload.time_taken_seconds.unwrap_or(0),
        payload.mode.as_str(),
    )
    .await
    {
        tracing::warn!("Attempt write failed, continuing: {}", e);
    }

    if let Err(e) = store::weak_spots::record_attempt(
        &pool,
        user_id,
        &subject,
        &question.topic,
        &question.section_title,
        result.is_correct,
    )
    .await
    {
        tracing::warn!("Weak-spot update failed, continuing: {}", e);
    }

    Ok(Json(result))
}
