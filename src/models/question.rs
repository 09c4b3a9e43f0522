// src/models/question.rs

use serde::{Deserialize, Serialize};

/// Externally assigned difficulty tier on a question's section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Ascending ordering used for the difficulty progression invariant.
    pub fn rank(&self) -> u8 {
        match self {
            Difficulty::Easy => 0,
            Difficulty::Medium => 1,
            Difficulty::Hard => 2,
        }
    }
}

/// A question from the static bank, flattened out of its section grouping.
/// Immutable content; loaded read-only at session start.
#[derive(Debug, Clone, PartialEq)]
pub struct BankQuestion {
    pub id: i64,
    pub topic: String,
    pub section_id: i64,
    pub section_title: String,
    pub difficulty: Difficulty,
    pub text: String,
}

impl BankQuestion {
    /// Stable (topic, id) identity used as the attempt log's question_id.
    pub fn key(&self) -> String {
        format!("{}-{}", self.topic.to_lowercase().replace(' ', "-"), self.id)
    }
}

/// DTO for sending a question to the client (excludes the answer, which
/// lives in a separate map server-side).
#[derive(Debug, Serialize)]
pub struct SessionQuestion {
    pub id: String,
    pub question: String,
    pub topic: String,
    pub subtopic: String,
    pub difficulty: Difficulty,
}

impl From<&BankQuestion> for SessionQuestion {
    fn from(q: &BankQuestion) -> Self {
        SessionQuestion {
            id: q.key(),
            question: q.text.clone(),
            topic: q.topic.clone(),
            subtopic: q.section_title.clone(),
            difficulty: q.difficulty,
        }
    }
}
