//! HTTP content store for artifact trees served from a static host.
//!
//! Fetches the same layout the filesystem store reads, relative to a
//! base URL. A 404 on a lesson artifact maps to "not found", matching
//! the filesystem store's missing-file behavior.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::StatusCode;

use super::store::ContentStore;
use crate::domain::{Lesson, SectionData, SectionKey};

/// Content store backed by a static artifact host
pub struct HttpContentStore {
    client: reqwest::Client,
    base_url: String,
}

impl HttpContentStore {
    /// Create a store over a base URL, e.g. `https://cdn.example.com/library`
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn index_url(&self, key: SectionKey) -> String {
        format!("{}/sections/{}/index.json", self.base_url, key)
    }

    fn lesson_url(&self, key: SectionKey, lesson_id: &str) -> String {
        format!(
            "{}/sections/{}/lessons/{}.json",
            self.base_url, key, lesson_id
        )
    }
}

#[async_trait]
impl ContentStore for HttpContentStore {
    fn name(&self) -> &str {
        "http"
    }

    async fn fetch_section_index(&self, key: SectionKey) -> Result<SectionData> {
        let url = self.index_url(key);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Failed to fetch section index: {}", url))?
            .error_for_status()
            .with_context(|| format!("Section index request rejected: {}", url))?;

        response
            .json()
            .await
            .with_context(|| format!("Failed to parse section index: {}", url))
    }

    async fn fetch_lesson(&self, key: SectionKey, lesson_id: &str) -> Result<Option<Lesson>> {
        let url = self.lesson_url(key, lesson_id);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Failed to fetch lesson: {}", url))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let response = response
            .error_for_status()
            .with_context(|| format!("Lesson request rejected: {}", url))?;

        let lesson = response
            .json()
            .await
            .with_context(|| format!("Failed to parse lesson: {}", url))?;

        Ok(Some(lesson))
    }
}
