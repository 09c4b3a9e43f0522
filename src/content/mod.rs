// src/content/mod.rs

pub mod bank;
pub mod instructions;
pub mod lessons;

use serde::de::DeserializeOwned;
use url::Url;

use crate::content::bank::QuestionBank;
use crate::content::instructions::LessonInstructions;
use crate::content::lessons::LessonManifest;
use crate::error::AppError;

/// HTTP client for the static content host.
///
/// Content lives under `/data/{subject}/` on a separate host and is fetched
/// read-only at session start. Every failure here is `ContentUnavailable`;
/// nothing content-related is fatal to the process.
#[derive(Clone)]
pub struct ContentClient {
    http: reqwest::Client,
    base: Url,
}

impl ContentClient {
    pub fn new(base_url: &str) -> Result<Self, AppError> {
        let mut base = Url::parse(base_url)
            .map_err(|e| AppError::ContentUnavailable(format!("invalid content base URL: {e}")))?;
        // Url::join drops the last path segment unless the base ends in '/'.
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Ok(Self {
            http: reqwest::Client::new(),
            base,
        })
    }

    fn resolve(&self, path: &str) -> Result<Url, AppError> {
        self.base
            .join(path)
            .map_err(|e| AppError::ContentUnavailable(format!("invalid content path: {e}")))
    }

    async fn fetch_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, AppError> {
        let url = self.resolve(path)?;
        let response = self.http.get(url.clone()).send().await?.error_for_status()?;
        response
            .json::<T>()
            .await
            .map_err(|e| AppError::ContentUnavailable(format!("failed to parse {url}: {e}")))
    }

    async fn fetch_text(&self, path: &str) -> Result<String, AppError> {
        let url = self.resolve(path)?;
        let response = self.http.get(url).send().await?.error_for_status()?;
        Ok(response.text().await?)
    }

    /// Loads the subject's lessons manifest.
    pub async fn load_lessons(&self, subject: &str) -> Result<LessonManifest, AppError> {
        self.fetch_json(&format!("data/{subject}/lessons.json")).await
    }

    /// Loads the subject's full question bank: fetches every practice set
    /// named by the manifest and merges them into one flat collection.
    pub async fn load_bank(&self, subject: &str) -> Result<QuestionBank, AppError> {
        let manifest = self.load_lessons(subject).await?;

        let mut bank = QuestionBank::default();
        for set in &manifest.practice {
            let questions = self
                .fetch_json(&format!("data/{subject}/{}", set.questions))
                .await?;
            let answers = self
                .fetch_json(&format!("data/{subject}/{}", set.answers))
                .await?;
            bank.merge_set(&set.topic, questions, answers);
        }
        Ok(bank)
    }

    /// Loads and parses the instruction screens for a lesson slug.
    pub async fn load_instructions(
        &self,
        subject: &str,
        slug: &str,
    ) -> Result<LessonInstructions, AppError> {
        let manifest = self.load_lessons(subject).await?;
        let lesson = manifest
            .lessons
            .iter()
            .find(|l| l.slug == slug)
            .ok_or_else(|| AppError::NotFound(format!("Unknown lesson '{slug}'")))?;

        let file = lesson.instructions_file.as_deref().ok_or_else(|| {
            AppError::NotFound(format!("Lesson '{slug}' has no instruction content"))
        })?;

        let raw = self
            .fetch_text(&format!("data/{subject}/instructions/{file}"))
            .await?;
        Ok(instructions::parse_instructions(&raw))
    }
}
