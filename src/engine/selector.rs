// src/engine/selector.rs

use rand::Rng;
use rand::seq::SliceRandom;

use crate::config::{DEFAULT_QUESTION_COUNT, TIMED_COUNT_MULTIPLIER};
use crate::models::attempt::PracticeMode;
use crate::models::question::BankQuestion;

const EASY_SHARE: f64 = 0.4;
const MEDIUM_SHARE: f64 = 0.4;

/// How many questions a session asks for. Timed mode doubles the total;
/// the other modes leave it alone.
pub fn session_question_count(mode: PracticeMode, requested: Option<usize>) -> usize {
    let base = requested.unwrap_or(DEFAULT_QUESTION_COUNT);
    match mode {
        PracticeMode::Timed => base * TIMED_COUNT_MULTIPLIER,
        _ => base,
    }
}

/// Selects a difficulty-weighted, randomized subset of the pool.
///
/// The pool is partitioned by difficulty, each bucket is shuffled, and the
/// buckets are truncated to quotas of 40% Easy, 40% Medium (rounded up),
/// remainder Hard. The returned sequence is grouped by ascending difficulty
/// tier, never globally shuffled, so sessions start easier and ramp up.
///
/// When the quota arithmetic comes up short against a skewed pool, the
/// remaining slots are backfilled from whichever buckets still have
/// questions, keeping the total at `min(count, pool size)`.
pub fn select_questions<R: Rng>(
    pool: &[BankQuestion],
    count: usize,
    rng: &mut R,
) -> Vec<BankQuestion> {
    let mut buckets: [Vec<BankQuestion>; 3] = [Vec::new(), Vec::new(), Vec::new()];
    for q in pool {
        buckets[q.difficulty.rank() as usize].push(q.clone());
    }
    for bucket in &mut buckets {
        bucket.shuffle(rng);
    }

    let [easy, medium, hard] = &buckets;

    // The Hard bucket absorbs whatever the Easy/Medium quotas could not
    // cover from their pools.
    let easy_take = quota(count, EASY_SHARE).min(easy.len());
    let medium_take = quota(count, MEDIUM_SHARE).min(medium.len());
    let hard_take = count.saturating_sub(easy_take + medium_take).min(hard.len());
    let mut take = [easy_take, medium_take, hard_take];

    // If Hard ran dry too, backfill from the leftover Medium then Easy
    // questions so the session never comes back smaller than the pool can
    // support.
    let target = count.min(pool.len());
    let mut selected: usize = take.iter().sum();
    while selected < target {
        for i in [1usize, 0, 2] {
            if selected < target && take[i] < buckets[i].len() {
                take[i] += 1;
                selected += 1;
            }
        }
    }

    let mut out = Vec::with_capacity(target);
    for (i, bucket) in buckets.iter().enumerate() {
        out.extend_from_slice(&bucket[..take[i]]);
    }
    out
}

/// Restricts the pool to questions whose (topic, subtopic) is flagged as
/// needing practice. An empty flag set leaves the pool untouched, so a user
/// with no weak spots still gets a full session.
pub fn restrict_to_weak_topics(
    pool: &[BankQuestion],
    weak: &[(String, String)],
) -> Vec<BankQuestion> {
    if weak.is_empty() {
        return pool.to_vec();
    }
    pool.iter()
        .filter(|q| {
            weak.iter()
                .any(|(topic, subtopic)| *topic == q.topic && *subtopic == q.section_title)
        })
        .cloned()
        .collect()
}

fn quota(count: usize, share: f64) -> usize {
    (count as f64 * share).ceil() as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::question::Difficulty;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn question(id: i64, difficulty: Difficulty) -> BankQuestion {
        BankQuestion {
            id,
            topic: "BIDMAS".to_string(),
            section_id: difficulty.rank() as i64,
            section_title: format!("Section {}", difficulty.rank()),
            difficulty,
            text: format!("Q{id}"),
        }
    }

    fn pool(easy: usize, medium: usize, hard: usize) -> Vec<BankQuestion> {
        let mut out = Vec::new();
        let mut id = 0;
        for _ in 0..easy {
            id += 1;
            out.push(question(id, Difficulty::Easy));
        }
        for _ in 0..medium {
            id += 1;
            out.push(question(id, Difficulty::Medium));
        }
        for _ in 0..hard {
            id += 1;
            out.push(question(id, Difficulty::Hard));
        }
        out
    }

    fn is_grouped_ascending(selected: &[BankQuestion]) -> bool {
        selected.windows(2).all(|w| w[0].difficulty.rank() <= w[1].difficulty.rank())
    }

    #[test]
    fn balanced_pool_hits_the_quota_split() {
        let mut rng = StdRng::seed_from_u64(7);
        let selected = select_questions(&pool(10, 10, 10), 10, &mut rng);

        assert_eq!(selected.len(), 10);
        let easy = selected.iter().filter(|q| q.difficulty == Difficulty::Easy).count();
        let medium = selected.iter().filter(|q| q.difficulty == Difficulty::Medium).count();
        let hard = selected.iter().filter(|q| q.difficulty == Difficulty::Hard).count();
        assert_eq!((easy, medium, hard), (4, 4, 2));
        assert!(is_grouped_ascending(&selected));
    }

    #[test]
    fn short_pool_returns_everything() {
        let mut rng = StdRng::seed_from_u64(7);
        let selected = select_questions(&pool(2, 2, 1), 10, &mut rng);
        assert_eq!(selected.len(), 5);
        assert!(is_grouped_ascending(&selected));
    }

    #[test]
    fn hard_absorbs_what_the_easier_buckets_cannot_cover() {
        let mut rng = StdRng::seed_from_u64(7);
        let selected = select_questions(&pool(0, 10, 10), 10, &mut rng);

        assert_eq!(selected.len(), 10);
        let medium = selected.iter().filter(|q| q.difficulty == Difficulty::Medium).count();
        let hard = selected.iter().filter(|q| q.difficulty == Difficulty::Hard).count();
        assert_eq!((medium, hard), (4, 6));
    }

    #[test]
    fn skewed_pool_backfills_to_the_requested_total() {
        // Only easy questions available: the 40% quota alone would return 4.
        let mut rng = StdRng::seed_from_u64(7);
        let selected = select_questions(&pool(12, 0, 0), 10, &mut rng);
        assert_eq!(selected.len(), 10);
        assert!(selected.iter().all(|q| q.difficulty == Difficulty::Easy));
    }

    #[test]
    fn partition_sizes_are_stable_across_calls() {
        let bank = pool(8, 8, 8);
        let count_by_tier = |selected: &[BankQuestion]| {
            [
                selected.iter().filter(|q| q.difficulty == Difficulty::Easy).count(),
                selected.iter().filter(|q| q.difficulty == Difficulty::Medium).count(),
                selected.iter().filter(|q| q.difficulty == Difficulty::Hard).count(),
            ]
        };

        let mut rng_a = StdRng::seed_from_u64(1);
        let mut rng_b = StdRng::seed_from_u64(99);
        let a = select_questions(&bank, 10, &mut rng_a);
        let b = select_questions(&bank, 10, &mut rng_b);

        assert_eq!(count_by_tier(&a), count_by_tier(&b));
    }

    #[test]
    fn fixed_seed_is_deterministic() {
        let bank = pool(10, 10, 10);
        let mut rng_a = StdRng::seed_from_u64(42);
        let mut rng_b = StdRng::seed_from_u64(42);

        let a = select_questions(&bank, 10, &mut rng_a);
        let b = select_questions(&bank, 10, &mut rng_b);
        let ids = |s: &[BankQuestion]| s.iter().map(|q| q.id).collect::<Vec<_>>();
        assert_eq!(ids(&a), ids(&b));
    }

    #[test]
    fn timed_mode_doubles_the_count() {
        assert_eq!(session_question_count(PracticeMode::Timed, Some(10)), 20);
        assert_eq!(session_question_count(PracticeMode::Normal, Some(10)), 10);
        assert_eq!(session_question_count(PracticeMode::WeakSpot, None), 10);
    }

    #[test]
    fn weak_topic_filter_narrows_the_pool() {
        let bank = pool(4, 4, 4);
        let weak = vec![("BIDMAS".to_string(), "Section 0".to_string())];
        let narrowed = restrict_to_weak_topics(&bank, &weak);
        assert_eq!(narrowed.len(), 4);
        assert!(narrowed.iter().all(|q| q.difficulty == Difficulty::Easy));

        // No flagged topics: the whole bank stays selectable.
        assert_eq!(restrict_to_weak_topics(&bank, &[]).len(), 12);
    }
}
