// src/models/weak_spot.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Represents the 'weak_spots' table: an incrementally maintained accuracy
/// aggregate per (user, subject, topic, subtopic).
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct WeakSpot {
    pub id: i64,
    pub user_id: i64,
    pub subject: String,
    pub topic: String,
    /// Section title within the topic; empty when not applicable.
    pub subtopic: String,
    pub total_attempts: i64,
    pub correct_attempts: i64,
    pub accuracy_percentage: i64,
    pub needs_practice: bool,
    pub last_incorrect_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// Weak-spot entry as surfaced to the dashboard.
#[derive(Debug, Clone, Serialize)]
pub struct WeakTopic {
    pub topic: String,
    pub subtopic: String,
    pub accuracy: i64,
    pub total_attempts: i64,
    pub last_incorrect_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl From<WeakSpot> for WeakTopic {
    fn from(spot: WeakSpot) -> Self {
        WeakTopic {
            topic: spot.topic,
            subtopic: spot.subtopic,
            accuracy: spot.accuracy_percentage,
            total_attempts: spot.total_attempts,
            last_incorrect_at: spot.last_incorrect_at,
        }
    }
}
