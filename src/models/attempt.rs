// src/models/attempt.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Practice session flavour. Timed doubles the question count; weak-spot
/// narrows the pool to flagged topics. Neither changes the evaluator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PracticeMode {
    #[default]
    Normal,
    Timed,
    WeakSpot,
}

impl PracticeMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            PracticeMode::Normal => "normal",
            PracticeMode::Timed => "timed",
            PracticeMode::WeakSpot => "weak-spot",
        }
    }
}

/// Represents the 'question_attempts' table. Append-only: rows are never
/// mutated, and only unenrollment deletes them.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct QuestionAttempt {
    pub id: i64,
    pub user_id: i64,
    pub subject: String,
    /// Bank key of the attempted question, e.g. "bidmas-12".
    pub question_id: String,
    pub user_answer: String,
    pub is_correct: bool,
    pub time_taken_seconds: i64,
    pub practice_type: String,
    pub attempted_at: chrono::DateTime<chrono::Utc>,
}

/// DTO for starting a practice session.
#[derive(Debug, Deserialize, Validate)]
pub struct StartSessionRequest {
    #[validate(range(min = 1, max = 50))]
    pub count: Option<u32>,
    #[serde(default)]
    pub mode: PracticeMode,
}

/// DTO for submitting an answer to a practice question.
#[derive(Debug, Deserialize, Validate)]
pub struct SubmitAttemptRequest {
    #[validate(length(min = 1, max = 100))]
    pub question_id: String,
    #[validate(length(max = 500))]
    pub answer: String,
    #[validate(range(min = 0, max = 3600))]
    pub time_taken_seconds: Option<i64>,
    #[serde(default)]
    pub mode: PracticeMode,
}

/// Result of evaluating a submitted answer.
#[derive(Debug, Serialize)]
pub struct AttemptResult {
    pub is_correct: bool,
    pub correct_answer: String,
}
