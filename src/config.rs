// src/config.rs

use dotenvy::dotenv;
use std::env;

/// Default number of questions in a practice session.
pub const DEFAULT_QUESTION_COUNT: usize = 10;
/// Timed mode doubles the question count.
pub const TIMED_COUNT_MULTIPLIER: usize = 2;
/// Wall-clock allowance for a timed session, in seconds.
pub const TIMED_SESSION_SECONDS: u64 = 15 * 60;
/// Accuracy is computed over the most recent N attempts.
pub const RECENT_ATTEMPTS_WINDOW: usize = 50;
/// Minimum study minutes for a day to count towards the streak.
pub const MIN_STUDY_MINUTES: i64 = 10;
/// The streak walk never looks further back than this.
pub const STREAK_WINDOW_DAYS: i64 = 30;
/// Below this many attempts, grade prediction returns the tier floor.
pub const MIN_ATTEMPTS_FOR_PREDICTION: i64 = 5;
/// A topic needs at least this many attempts before it can be flagged weak.
pub const WEAK_SPOT_MIN_ATTEMPTS: i64 = 3;
/// Accuracy below this percentage flags a topic as needing practice.
pub const WEAK_SPOT_ACCURACY_THRESHOLD: i64 = 70;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub jwt_expiration: u64,
    pub content_base_url: String,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");

        let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET must be set");

        let jwt_expiration = env::var("JWT_EXPIRATION")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(86400);

        let content_base_url = env::var("CONTENT_BASE_URL")
            .unwrap_or_else(|_| "http://127.0.0.1:8080".to_string());

        let rust_log = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        Self {
            database_url,
            jwt_secret,
            jwt_expiration,
            content_base_url,
            rust_log,
        }
    }
}
