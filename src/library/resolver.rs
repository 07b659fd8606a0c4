//! Lazy resolution of section indexes and lesson content.
//!
//! The two operations are independent: a lesson can be resolved once its
//! id is known, without the section index having loaded first. Each
//! successful resolution is cached for the lifetime of the resolver;
//! failures are never cached, so a transport error can be retried.
//!
//! The cache is append-only (entries are added, never invalidated) since
//! library content is immutable for a running session.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::debug;

use super::error::LibraryError;
use super::store::ContentStore;
use crate::domain::{Lesson, SectionData, SectionKey};

/// Resolves library content on demand through a [`ContentStore`]
pub struct Resolver {
    store: Arc<dyn ContentStore>,

    /// Resolved section indexes, keyed by section
    sections: RwLock<HashMap<SectionKey, Arc<SectionData>>>,

    /// Resolved lessons, keyed by (section, lesson id)
    lessons: RwLock<HashMap<(SectionKey, String), Arc<Lesson>>>,
}

impl Resolver {
    /// Create a resolver over a content store
    pub fn new(store: Arc<dyn ContentStore>) -> Self {
        Self {
            store,
            sections: RwLock::new(HashMap::new()),
            lessons: RwLock::new(HashMap::new()),
        }
    }

    /// Parse a caller-supplied section key against the fixed enumeration
    fn parse_key(key: &str) -> Result<SectionKey, LibraryError> {
        key.parse()
            .map_err(|_| LibraryError::UnknownSectionKey(key.to_string()))
    }

    /// Load the module/lesson-stub index for a section.
    ///
    /// Never transfers lesson content bodies; those are fetched per
    /// lesson through [`Resolver::load_lesson_content`].
    pub async fn load_section_index(&self, key: &str) -> Result<Arc<SectionData>, LibraryError> {
        let section = Self::parse_key(key)?;

        if let Some(cached) = self.sections.read().await.get(&section) {
            debug!(section = %section, "section index cache hit");
            return Ok(Arc::clone(cached));
        }

        debug!(section = %section, store = self.store.name(), "fetching section index");
        let data = self
            .store
            .fetch_section_index(section)
            .await
            .map_err(|e| LibraryError::transport(format!("section '{}'", section), e))?;

        let data = Arc::new(data);
        let mut sections = self.sections.write().await;
        // A concurrent load may have won the race; keep the first entry
        // so both callers see the same Arc.
        let entry = sections
            .entry(section)
            .or_insert_with(|| Arc::clone(&data));

        Ok(Arc::clone(entry))
    }

    /// Load one lesson's ordered content-block sequence.
    ///
    /// Independent of [`Resolver::load_section_index`]: it does not
    /// require the section index to be loaded, and a failure here leaves
    /// any previously resolved index untouched.
    pub async fn load_lesson_content(
        &self,
        key: &str,
        lesson_id: &str,
    ) -> Result<Arc<Lesson>, LibraryError> {
        let section = Self::parse_key(key)?;
        let cache_key = (section, lesson_id.to_string());

        if let Some(cached) = self.lessons.read().await.get(&cache_key) {
            debug!(section = %section, lesson_id, "lesson cache hit");
            return Ok(Arc::clone(cached));
        }

        debug!(section = %section, lesson_id, store = self.store.name(), "fetching lesson");
        let lesson = self
            .store
            .fetch_lesson(section, lesson_id)
            .await
            .map_err(|e| {
                LibraryError::transport(format!("lesson '{}/{}'", section, lesson_id), e)
            })?
            .ok_or_else(|| LibraryError::LessonNotFound {
                section,
                lesson_id: lesson_id.to_string(),
            })?;

        let lesson = Arc::new(lesson);
        let mut lessons = self.lessons.write().await;
        let entry = lessons
            .entry(cache_key)
            .or_insert_with(|| Arc::clone(&lesson));

        Ok(Arc::clone(entry))
    }

    /// Whether a section index is already resolved (no fetch triggered)
    pub async fn has_section(&self, section: SectionKey) -> bool {
        self.sections.read().await.contains_key(&section)
    }

    /// Whether a lesson is already resolved (no fetch triggered)
    pub async fn has_lesson(&self, section: SectionKey, lesson_id: &str) -> bool {
        self.lessons
            .read()
            .await
            .contains_key(&(section, lesson_id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ContentBlock, LessonStub, LibraryModule};
    use crate::library::store::MemoryContentStore;

    fn test_resolver() -> Resolver {
        let section = SectionData {
            section: "Reading Comprehension".to_string(),
            modules: vec![LibraryModule {
                id: 21,
                title: "Passage Structure".to_string(),
                category: "Core Skills".to_string(),
                unit: "Unit 1".to_string(),
                description: "Mapping passage architecture".to_string(),
                lessons: vec![LessonStub {
                    id: "21-3".to_string(),
                    title: "Pattern Recognition".to_string(),
                }],
            }],
        };

        let lesson = Lesson {
            id: "21-3".to_string(),
            title: "Pattern Recognition".to_string(),
            content: vec![ContentBlock::H3 {
                text: "Pattern Recognition: Clues in the Passage and Answers".to_string(),
            }],
        };

        let store = MemoryContentStore::new()
            .with_section(SectionKey::Rc, section)
            .with_lesson(SectionKey::Rc, lesson);

        Resolver::new(Arc::new(store))
    }

    #[tokio::test]
    async fn test_unknown_section_key() {
        let resolver = test_resolver();

        let err = resolver.load_section_index("logic-games").await.unwrap_err();
        assert!(matches!(err, LibraryError::UnknownSectionKey(_)));

        let err = resolver
            .load_lesson_content("logic-games", "1-1")
            .await
            .unwrap_err();
        assert!(matches!(err, LibraryError::UnknownSectionKey(_)));
    }

    #[tokio::test]
    async fn test_lesson_load_does_not_require_index() {
        let resolver = test_resolver();

        let lesson = resolver.load_lesson_content("rc", "21-3").await.unwrap();
        assert_eq!(lesson.id, "21-3");

        // No side effect on the section cache
        assert!(!resolver.has_section(SectionKey::Rc).await);
    }

    #[tokio::test]
    async fn test_lesson_not_found() {
        let resolver = test_resolver();
        resolver.load_section_index("rc").await.unwrap();

        let err = resolver
            .load_lesson_content("rc", "nonexistent-id")
            .await
            .unwrap_err();
        assert!(matches!(err, LibraryError::LessonNotFound { .. }));

        // The already-resolved index is untouched
        assert!(resolver.has_section(SectionKey::Rc).await);
    }
}
