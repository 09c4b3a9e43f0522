// src/models/enrollment.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Exam difficulty track. Foundation covers grades 1-5, Higher 4-9.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Tier {
    #[default]
    Foundation,
    Higher,
}

impl Tier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Foundation => "Foundation",
            Tier::Higher => "Higher",
        }
    }

    /// Parses a stored tier string, defaulting to Foundation for anything
    /// unrecognised so stats reads always have a usable tier.
    pub fn parse_or_default(value: &str) -> Self {
        match value {
            "Higher" => Tier::Higher,
            _ => Tier::Foundation,
        }
    }
}

/// Represents the 'enrollments' table: one row per (user, subject).
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Enrollment {
    pub id: i64,
    pub user_id: i64,
    pub subject: String,
    pub enrolled_at: chrono::DateTime<chrono::Utc>,
    pub target_tier: String,
    pub target_grade: Option<String>,
    /// 'active', 'paused' or 'completed'.
    pub status: String,
}

impl Enrollment {
    pub fn tier(&self) -> Tier {
        Tier::parse_or_default(&self.target_tier)
    }
}

/// DTO for enrolling in a subject.
#[derive(Debug, Deserialize, Validate)]
pub struct EnrollRequest {
    #[validate(length(min = 1, max = 50))]
    pub subject: String,
    #[validate(custom(function = validate_tier))]
    pub target_tier: Option<String>,
    #[validate(length(max = 50))]
    pub target_grade: Option<String>,
}

/// DTO for changing an enrollment's targets or status.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateEnrollmentRequest {
    #[validate(custom(function = validate_tier))]
    pub target_tier: Option<String>,
    #[validate(length(max = 50))]
    pub target_grade: Option<String>,
    #[validate(custom(function = validate_status))]
    pub status: Option<String>,
}

fn validate_tier(tier: &str) -> Result<(), validator::ValidationError> {
    match tier {
        "Foundation" | "Higher" => Ok(()),
        _ => Err(validator::ValidationError::new("unknown_tier")),
    }
}

fn validate_status(status: &str) -> Result<(), validator::ValidationError> {
    match status {
        "active" | "paused" | "completed" => Ok(()),
        _ => Err(validator::ValidationError::new("unknown_status")),
    }
}
