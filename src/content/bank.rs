// src/content/bank.rs

use std::collections::HashMap;

use serde::Deserialize;

use crate::models::question::{BankQuestion, Difficulty};

/// A question file: sections grouped by difficulty.
#[derive(Debug, Deserialize)]
pub struct QuestionsDoc {
    pub sections: Vec<SectionDoc>,
}

#[derive(Debug, Deserialize)]
pub struct SectionDoc {
    #[serde(rename = "sectionId")]
    pub section_id: i64,
    #[serde(rename = "sectionTitle")]
    pub section_title: String,
    pub difficulty: Difficulty,
    pub questions: Vec<QuestionDoc>,
}

#[derive(Debug, Deserialize)]
pub struct QuestionDoc {
    pub id: i64,
    pub question: String,
}

/// An answer-key file: id -> canonical answer for one topic.
#[derive(Debug, Deserialize)]
pub struct AnswersDoc {
    pub answers: Vec<AnswerDoc>,
}

#[derive(Debug, Deserialize)]
pub struct AnswerDoc {
    pub id: i64,
    pub answer: serde_json::Value,
}

/// The merged, flat, addressable question pool for one subject.
///
/// Questions keep their `(topic, id)` identity through [`BankQuestion::key`];
/// the answer map is keyed the same way so the evaluator addresses both with
/// the attempt's question_id.
#[derive(Debug, Default)]
pub struct QuestionBank {
    pub questions: Vec<BankQuestion>,
    answers: HashMap<String, String>,
}

impl QuestionBank {
    /// Flattens a section-grouped question file and its answer key into the
    /// bank. No transformation beyond flattening: difficulty stays whatever
    /// the section assigned.
    pub fn merge_set(&mut self, topic: &str, questions: QuestionsDoc, answers: AnswersDoc) {
        for section in questions.sections {
            for q in section.questions {
                self.questions.push(BankQuestion {
                    id: q.id,
                    topic: topic.to_string(),
                    section_id: section.section_id,
                    section_title: section.section_title.clone(),
                    difficulty: section.difficulty,
                    text: q.question,
                });
            }
        }

        let topic_prefix = topic.to_lowercase().replace(' ', "-");
        for a in answers.answers {
            self.answers
                .insert(format!("{topic_prefix}-{}", a.id), canonical_text(&a.answer));
        }
    }

    pub fn find(&self, key: &str) -> Option<&BankQuestion> {
        self.questions.iter().find(|q| q.key() == key)
    }

    pub fn canonical_answer(&self, key: &str) -> Option<&str> {
        self.answers.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

/// Renders a canonical answer to its comparison string. Numbers keep their
/// JSON representation, so an integer 4 compares as "4", never "4.0".
fn canonical_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}
