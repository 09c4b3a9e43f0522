// src/handlers/enrollment.rs

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::json;
use sqlx::SqlitePool;
use validator::Validate;

use crate::{
    error::AppError,
    models::enrollment::{EnrollRequest, UpdateEnrollmentRequest},
    store,
    utils::auth::Claims,
};

/// Enrolls the current user in a subject. One enrollment per (user,
/// subject); a second attempt returns 409.
pub async fn enroll(
    State(pool): State<SqlitePool>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<EnrollRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::ValidationError(validation_errors.to_string()));
    }

    let subject = payload.subject.to_lowercase();
    let tier = payload.target_tier.as_deref().unwrap_or("Foundation");

    let enrollment = store::enrollments::create(
        &pool,
        claims.user_id(),
        &subject,
        tier,
        payload.target_grade.as_deref(),
    )
    .await?;

    Ok((StatusCode::CREATED, Json(enrollment)))
}

/// Lists the current user's enrollments, newest first.
pub async fn list_enrollments(
    State(pool): State<SqlitePool>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, AppError> {
    let enrollments = store::enrollments::list_for_user(&pool, claims.user_id()).await?;
    Ok(Json(enrollments))
}

/// Changes an enrollment's target tier/grade or status.
pub async fn update_enrollment(
    State(pool): State<SqlitePool>,
    Extension(claims): Extension<Claims>,
    Path(subject): Path<String>,
    Json(payload): Json<UpdateEnrollmentRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::ValidationError(validation_errors.to_string()));
    }

    let subject = subject.to_lowercase();

    let enrollment = store::enrollments::update(
        &pool,
        claims.user_id(),
        &subject,
        payload.target_tier.as_deref(),
        payload.target_grade.as_deref(),
        payload.status.as_deref(),
    )
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Not enrolled in '{subject}'")))?;

    Ok(Json(enrollment))
}

/// Unenrolls the user and deletes all their subject data: attempts,
/// lesson progress and weak spots go with the enrollment.
pub async fn unenroll(
    State(pool): State<SqlitePool>,
    Extension(claims): Extension<Claims>,
    Path(subject): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let subject = subject.to_lowercase();

    let deleted = store::enrollments::unenroll(&pool, claims.user_id(), &subject).await?;
    if !deleted {
        return Err(AppError::NotFound(format!("Not enrolled in '{subject}'")));
    }

    Ok(Json(json!({ "unenrolled": subject })))
}
