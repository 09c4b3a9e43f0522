// src/content/lessons.rs

use serde::Deserialize;

/// `/data/{subject}/lessons.json`: lesson metadata plus the index of
/// practice-question files for the subject.
#[derive(Debug, Clone, Deserialize)]
pub struct LessonManifest {
    pub lessons: Vec<LessonMeta>,
    #[serde(default)]
    pub practice: Vec<PracticeSet>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LessonMeta {
    pub id: i64,
    pub slug: String,
    pub title: String,
    #[serde(default, rename = "isFree")]
    pub is_free: bool,
    #[serde(default, rename = "contentReady")]
    pub content_ready: bool,
    #[serde(default, rename = "instructionsFile")]
    pub instructions_file: Option<String>,
}

/// One topic's question/answer file pair, relative to the subject root.
#[derive(Debug, Clone, Deserialize)]
pub struct PracticeSet {
    pub topic: String,
    pub questions: String,
    pub answers: String,
}
