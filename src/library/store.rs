//! Content store interfaces for library artifacts.
//!
//! A [`ContentStore`] fetches the two artifact kinds the build step
//! produces: per-section index documents and per-lesson content
//! documents. The resolver is agnostic to the mechanism; this module
//! provides the filesystem store (the normal deployment) and an
//! in-memory store for tests and embedded use. The HTTP store lives in
//! [`crate::library::http`].
//!
//! # Artifact layout (filesystem store)
//!
//! ```text
//! <root>/
//! ├── manifest.json
//! └── sections/
//!     └── <key>/
//!         ├── index.json            # SectionData (stubs only)
//!         └── lessons/
//!             └── <lesson_id>.json  # full Lesson
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio::fs;

use crate::domain::{Lesson, SectionData, SectionKey};

/// Trait for fetching library artifacts
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Human-readable store name, used in logs
    fn name(&self) -> &str;

    /// Fetch the module/lesson-stub index for a section.
    ///
    /// The index never contains lesson bodies; those are a separate,
    /// larger payload fetched per lesson.
    async fn fetch_section_index(&self, key: SectionKey) -> Result<SectionData>;

    /// Fetch one lesson's full document.
    ///
    /// Returns `Ok(None)` when no lesson with this id exists under the
    /// section, so callers can distinguish "not found" from transport
    /// failures.
    async fn fetch_lesson(&self, key: SectionKey, lesson_id: &str) -> Result<Option<Lesson>>;
}

/// Filesystem store reading the built artifact tree
pub struct FsContentStore {
    root: PathBuf,
}

impl FsContentStore {
    /// Create a store over a content root directory
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Content root this store reads from
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn index_path(&self, key: SectionKey) -> PathBuf {
        self.root
            .join("sections")
            .join(key.as_str())
            .join("index.json")
    }

    fn lesson_path(&self, key: SectionKey, lesson_id: &str) -> PathBuf {
        self.root
            .join("sections")
            .join(key.as_str())
            .join("lessons")
            .join(format!("{}.json", lesson_id))
    }
}

#[async_trait]
impl ContentStore for FsContentStore {
    fn name(&self) -> &str {
        "fs"
    }

    async fn fetch_section_index(&self, key: SectionKey) -> Result<SectionData> {
        let path = self.index_path(key);

        let content = fs::read_to_string(&path)
            .await
            .with_context(|| format!("Failed to read section index: {}", path.display()))?;

        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse section index: {}", path.display()))
    }

    async fn fetch_lesson(&self, key: SectionKey, lesson_id: &str) -> Result<Option<Lesson>> {
        let path = self.lesson_path(key, lesson_id);

        // A missing artifact for a well-formed id means the lesson does
        // not exist, not that the fetch failed.
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&path)
            .await
            .with_context(|| format!("Failed to read lesson: {}", path.display()))?;

        let lesson = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse lesson: {}", path.display()))?;

        Ok(Some(lesson))
    }
}

/// In-memory store backed by pre-built documents.
///
/// Used by tests and by callers that embed content directly in the
/// binary instead of shipping an artifact tree.
#[derive(Default)]
pub struct MemoryContentStore {
    sections: HashMap<SectionKey, SectionData>,
    lessons: HashMap<(SectionKey, String), Lesson>,
}

impl MemoryContentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a section index
    pub fn with_section(mut self, key: SectionKey, data: SectionData) -> Self {
        self.sections.insert(key, data);
        self
    }

    /// Insert a lesson document
    pub fn with_lesson(mut self, key: SectionKey, lesson: Lesson) -> Self {
        self.lessons.insert((key, lesson.id.clone()), lesson);
        self
    }
}

#[async_trait]
impl ContentStore for MemoryContentStore {
    fn name(&self) -> &str {
        "memory"
    }

    async fn fetch_section_index(&self, key: SectionKey) -> Result<SectionData> {
        self.sections
            .get(&key)
            .cloned()
            .with_context(|| format!("No index document for section '{}'", key))
    }

    async fn fetch_lesson(&self, key: SectionKey, lesson_id: &str) -> Result<Option<Lesson>> {
        Ok(self.lessons.get(&(key, lesson_id.to_string())).cloned())
    }
}
