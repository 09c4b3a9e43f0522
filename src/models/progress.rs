// src/models/progress.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Lesson progress lifecycle. Transitions only move forward:
/// not_started -> in_progress -> completed, with completed terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LessonStatus {
    #[default]
    NotStarted,
    InProgress,
    Completed,
}

impl LessonStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LessonStatus::NotStarted => "not_started",
            LessonStatus::InProgress => "in_progress",
            LessonStatus::Completed => "completed",
        }
    }

    pub fn parse_or_default(value: &str) -> Self {
        match value {
            "in_progress" => LessonStatus::InProgress,
            "completed" => LessonStatus::Completed,
            _ => LessonStatus::NotStarted,
        }
    }

    fn rank(&self) -> u8 {
        match self {
            LessonStatus::NotStarted => 0,
            LessonStatus::InProgress => 1,
            LessonStatus::Completed => 2,
        }
    }

    /// Non-regression merge: re-opening a completed lesson never reverts it.
    pub fn merge(current: LessonStatus, requested: LessonStatus) -> LessonStatus {
        if requested.rank() > current.rank() {
            requested
        } else {
            current
        }
    }
}

/// Represents the 'lesson_progress' table.
/// Keyed uniquely by (user_id, subject, lesson_id); written via upsert.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct LessonProgress {
    pub id: i64,
    pub user_id: i64,
    pub subject: String,
    pub lesson_id: i64,
    pub lesson_slug: String,
    pub status: String,
    pub score: Option<i64>,
    pub time_spent_minutes: i64,
    pub attempts: i64,
    pub completed_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl LessonProgress {
    pub fn lesson_status(&self) -> LessonStatus {
        LessonStatus::parse_or_default(&self.status)
    }
}

/// Represents the 'study_sessions' table: one row per (user, day).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct StudySession {
    pub id: i64,
    pub user_id: i64,
    pub date: chrono::NaiveDate,
    pub total_minutes: i64,
    pub lessons_completed: i64,
}

/// DTO for a lesson progress update event.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProgressRequest {
    #[validate(length(min = 1, max = 100))]
    pub lesson_slug: String,
    pub status: LessonStatus,
    #[validate(range(min = 0, max = 100))]
    pub score: Option<i64>,
    /// Additional minutes spent since the last update.
    #[validate(range(min = 0, max = 1440))]
    pub time_spent_minutes: Option<i64>,
}

/// A manifest lesson merged with the caller's stored progress.
#[derive(Debug, Serialize)]
pub struct LessonOverview {
    pub id: i64,
    pub slug: String,
    pub title: String,
    pub is_free: bool,
    pub content_ready: bool,
    pub status: LessonStatus,
    pub score: Option<i64>,
    pub time_spent_minutes: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_never_regresses() {
        assert_eq!(
            LessonStatus::merge(LessonStatus::Completed, LessonStatus::InProgress),
            LessonStatus::Completed
        );
        assert_eq!(
            LessonStatus::merge(LessonStatus::InProgress, LessonStatus::NotStarted),
            LessonStatus::InProgress
        );
    }

    #[test]
    fn status_advances() {
        assert_eq!(
            LessonStatus::merge(LessonStatus::NotStarted, LessonStatus::InProgress),
            LessonStatus::InProgress
        );
        assert_eq!(
            LessonStatus::merge(LessonStatus::InProgress, LessonStatus::Completed),
            LessonStatus::Completed
        );
    }
}
