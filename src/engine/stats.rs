// src/engine/stats.rs

use std::collections::HashMap;

use chrono::{Duration, NaiveDate};
use serde::Serialize;

use crate::config::{
    MIN_ATTEMPTS_FOR_PREDICTION, MIN_STUDY_MINUTES, RECENT_ATTEMPTS_WINDOW, STREAK_WINDOW_DAYS,
};
use crate::models::attempt::QuestionAttempt;
use crate::models::enrollment::Tier;
use crate::models::progress::{LessonProgress, LessonStatus};
use crate::models::weak_spot::{WeakSpot, WeakTopic};

/// Aggregated per-subject dashboard statistics.
///
/// `Default` is the zeroed fallback shape returned when progress reads fail,
/// so the caller always has something renderable.
#[derive(Debug, Default, Serialize)]
pub struct SubjectStats {
    pub total_lessons: usize,
    pub completed_lessons: usize,
    pub in_progress_lessons: usize,
    pub completion_percentage: i64,
    pub total_time_hours: f64,
    pub questions_attempted: usize,
    pub questions_correct: usize,
    pub accuracy_rate: i64,
    pub streak: u32,
    pub predicted_grade: String,
    pub weakest_topics: Vec<WeakTopic>,
}

/// Inputs to the aggregation pass. Attempts must be ordered newest first.
pub struct StatsInput<'a> {
    pub tier: Tier,
    pub total_lessons: usize,
    pub progress: &'a [LessonProgress],
    pub recent_attempts: &'a [QuestionAttempt],
    pub minutes_by_day: &'a HashMap<NaiveDate, i64>,
    pub weak_spots: Vec<WeakSpot>,
    pub today: NaiveDate,
}

pub fn compute_stats(input: StatsInput<'_>) -> SubjectStats {
    let completed = input
        .progress
        .iter()
        .filter(|p| p.lesson_status() == LessonStatus::Completed)
        .count();
    let in_progress = input
        .progress
        .iter()
        .filter(|p| p.lesson_status() == LessonStatus::InProgress)
        .count();

    let total_minutes: i64 = input.progress.iter().map(|p| p.time_spent_minutes).sum();

    let window = &input.recent_attempts[..input.recent_attempts.len().min(RECENT_ATTEMPTS_WINDOW)];
    let correct = window.iter().filter(|a| a.is_correct).count();
    let accuracy = accuracy_percentage(correct, window.len());

    SubjectStats {
        total_lessons: input.total_lessons,
        completed_lessons: completed,
        in_progress_lessons: in_progress,
        completion_percentage: completion_percentage(completed, input.total_lessons),
        total_time_hours: (total_minutes as f64 / 60.0 * 10.0).round() / 10.0,
        questions_attempted: window.len(),
        questions_correct: correct,
        accuracy_rate: accuracy,
        streak: study_streak(input.minutes_by_day, input.today),
        predicted_grade: predict_grade(accuracy, window.len() as i64, input.tier).to_string(),
        weakest_topics: rank_weak_spots(input.weak_spots)
            .into_iter()
            .map(WeakTopic::from)
            .collect(),
    }
}

/// round(correct / total * 100), clamped to [0, 100]; 0 for an empty window.
pub fn accuracy_percentage(correct: usize, total: usize) -> i64 {
    if total == 0 {
        return 0;
    }
    let pct = (correct as f64 / total as f64 * 100.0).round() as i64;
    pct.clamp(0, 100)
}

fn completion_percentage(completed: usize, total: usize) -> i64 {
    accuracy_percentage(completed, total)
}

/// Consecutive qualifying study days, walking back from today over a 30-day
/// window. A day qualifies at >= 10 study minutes. Today is exempt from
/// breaking the streak so an in-progress day never zeroes it.
pub fn study_streak(minutes_by_day: &HashMap<NaiveDate, i64>, today: NaiveDate) -> u32 {
    let mut streak = 0;
    for offset in 0..STREAK_WINDOW_DAYS {
        let day = today - Duration::days(offset);
        let qualified = minutes_by_day.get(&day).copied().unwrap_or(0) >= MIN_STUDY_MINUTES;

        if qualified {
            streak += 1;
        } else if offset > 0 {
            break;
        }
    }
    streak
}

/// Tier-aware grade prediction, monotonic in accuracy. Below 5 recorded
/// attempts the tier floor is returned regardless of accuracy.
pub fn predict_grade(accuracy: i64, total_attempts: i64, tier: Tier) -> &'static str {
    if total_attempts < MIN_ATTEMPTS_FOR_PREDICTION {
        return match tier {
            Tier::Foundation => "Grade 1",
            Tier::Higher => "Grade 4",
        };
    }

    match tier {
        Tier::Foundation => match accuracy {
            85.. => "Grade 5",
            70.. => "Grade 4",
            55.. => "Grade 3",
            40.. => "Grade 2",
            _ => "Grade 1",
        },
        Tier::Higher => match accuracy {
            90.. => "Grade 9",
            85.. => "Grade 8",
            80.. => "Grade 7",
            70.. => "Grade 6",
            60.. => "Grade 5",
            _ => "Grade 4",
        },
    }
}

/// Orders weak spots worst-first: ascending accuracy, ties broken by the
/// higher attempt count (a low score over many attempts is signal, not
/// noise).
pub fn rank_weak_spots(mut spots: Vec<WeakSpot>) -> Vec<WeakSpot> {
    spots.sort_by(|a, b| {
        a.accuracy_percentage
            .cmp(&b.accuracy_percentage)
            .then(b.total_attempts.cmp(&a.total_attempts))
    });
    spots
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn attempt(is_correct: bool) -> QuestionAttempt {
        QuestionAttempt {
            id: 0,
            user_id: 1,
            subject: "maths".to_string(),
            question_id: "bidmas-1".to_string(),
            user_answer: "4".to_string(),
            is_correct,
            time_taken_seconds: 10,
            practice_type: "normal".to_string(),
            attempted_at: Utc::now(),
        }
    }

    fn spot(topic: &str, accuracy: i64, attempts: i64) -> WeakSpot {
        WeakSpot {
            id: 0,
            user_id: 1,
            subject: "maths".to_string(),
            topic: topic.to_string(),
            subtopic: String::new(),
            total_attempts: attempts,
            correct_attempts: 0,
            accuracy_percentage: accuracy,
            needs_practice: true,
            last_incorrect_at: None,
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn accuracy_of_no_attempts_is_zero() {
        assert_eq!(accuracy_percentage(0, 0), 0);
    }

    #[test]
    fn accuracy_rounds_to_nearest_percent() {
        assert_eq!(accuracy_percentage(1, 3), 33);
        assert_eq!(accuracy_percentage(2, 3), 67);
        assert_eq!(accuracy_percentage(10, 10), 100);
    }

    #[test]
    fn streak_breaks_on_first_unqualified_day_before_today() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 10).unwrap();
        let minutes = HashMap::from([
            (today, 15),
            (today - Duration::days(1), 5),
            (today - Duration::days(2), 20),
        ]);
        assert_eq!(study_streak(&minutes, today), 1);
    }

    #[test]
    fn today_without_study_does_not_zero_the_streak() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 10).unwrap();
        let minutes = HashMap::from([
            (today - Duration::days(1), 30),
            (today - Duration::days(2), 12),
        ]);
        assert_eq!(study_streak(&minutes, today), 2);
    }

    #[test]
    fn streak_is_capped_by_the_window() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 10).unwrap();
        let minutes: HashMap<_, _> = (0..60)
            .map(|offset| (today - Duration::days(offset), 30))
            .collect();
        assert_eq!(study_streak(&minutes, today), STREAK_WINDOW_DAYS as u32);
    }

    #[test]
    fn higher_tier_prediction_reaches_grade_nine() {
        assert_eq!(predict_grade(92, 10, Tier::Higher), "Grade 9");
        assert_eq!(predict_grade(75, 10, Tier::Higher), "Grade 6");
    }

    #[test]
    fn insufficient_data_returns_the_floor_grade() {
        assert_eq!(predict_grade(92, 3, Tier::Higher), "Grade 4");
        assert_eq!(predict_grade(92, 3, Tier::Foundation), "Grade 1");
    }

    #[test]
    fn foundation_bands_are_monotonic() {
        assert_eq!(predict_grade(39, 10, Tier::Foundation), "Grade 1");
        assert_eq!(predict_grade(40, 10, Tier::Foundation), "Grade 2");
        assert_eq!(predict_grade(55, 10, Tier::Foundation), "Grade 3");
        assert_eq!(predict_grade(70, 10, Tier::Foundation), "Grade 4");
        assert_eq!(predict_grade(85, 10, Tier::Foundation), "Grade 5");
    }

    #[test]
    fn weak_spots_rank_lowest_accuracy_first() {
        let ranked = rank_weak_spots(vec![
            spot("fractions", 60, 5),
            spot("bidmas", 20, 4),
            spot("algebra", 20, 9),
        ]);
        let topics: Vec<_> = ranked.iter().map(|s| s.topic.as_str()).collect();
        // Equal accuracy: more attempts is the stronger weakness signal.
        assert_eq!(topics, vec!["algebra", "bidmas", "fractions"]);
    }

    #[test]
    fn compute_stats_aggregates_the_window() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 10).unwrap();
        let attempts: Vec<_> = (0..10).map(|_| attempt(true)).collect();
        let minutes = HashMap::from([(today, 20)]);

        let stats = compute_stats(StatsInput {
            tier: Tier::Higher,
            total_lessons: 20,
            progress: &[],
            recent_attempts: &attempts,
            minutes_by_day: &minutes,
            weak_spots: vec![],
            today,
        });

        assert_eq!(stats.accuracy_rate, 100);
        assert_eq!(stats.questions_attempted, 10);
        assert_eq!(stats.completion_percentage, 0);
        assert_eq!(stats.streak, 1);
        assert_eq!(stats.predicted_grade, "Grade 9");
        assert!(stats.weakest_topics.is_empty());
    }
}
