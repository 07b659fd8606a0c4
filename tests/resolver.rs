//! Resolver Integration Tests
//!
//! Covers the lazy-resolution contract: caching after first success
//! (verified by fetch-call counts), retry of transport failures, the
//! error taxonomy, and isolation of failures from already-resolved
//! state.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;

use lessonlib::domain::{
    BreakdownLabels, BreakdownRow, ContentBlock, Lesson, LessonStub, LibraryModule, SectionData,
    SectionKey,
};
use lessonlib::library::{ContentStore, LibraryError, MemoryContentStore, Resolver};

/// Store wrapper that counts fetches and can fail the next one
struct InstrumentedStore {
    inner: MemoryContentStore,
    index_fetches: AtomicUsize,
    lesson_fetches: AtomicUsize,
    fail_next: AtomicBool,
}

impl InstrumentedStore {
    fn new(inner: MemoryContentStore) -> Self {
        Self {
            inner,
            index_fetches: AtomicUsize::new(0),
            lesson_fetches: AtomicUsize::new(0),
            fail_next: AtomicBool::new(false),
        }
    }

    fn take_failure(&self) -> Result<()> {
        if self.fail_next.swap(false, Ordering::SeqCst) {
            anyhow::bail!("simulated transport failure");
        }
        Ok(())
    }
}

#[async_trait]
impl ContentStore for InstrumentedStore {
    fn name(&self) -> &str {
        "instrumented"
    }

    async fn fetch_section_index(&self, key: SectionKey) -> Result<SectionData> {
        self.index_fetches.fetch_add(1, Ordering::SeqCst);
        self.take_failure()?;
        self.inner.fetch_section_index(key).await
    }

    async fn fetch_lesson(&self, key: SectionKey, lesson_id: &str) -> Result<Option<Lesson>> {
        self.lesson_fetches.fetch_add(1, Ordering::SeqCst);
        self.take_failure()?;
        self.inner.fetch_lesson(key, lesson_id).await
    }
}

fn rc_lesson_21_3() -> Lesson {
    Lesson {
        id: "21-3".to_string(),
        title: "Pattern Recognition".to_string(),
        content: vec![
            ContentBlock::H3 {
                text: "Pattern Recognition: Clues in the Passage and Answers".to_string(),
            },
            ContentBlock::Paragraph {
                text: "Most passages follow one of a handful of structures.".to_string(),
            },
            ContentBlock::Breakdown {
                labels: BreakdownLabels {
                    title: "Structure Type".to_string(),
                    text: "Identification Strategy".to_string(),
                },
                items: vec![
                    BreakdownRow {
                        title: "Thesis-Support".to_string(),
                        text: "One viewpoint defended throughout.".to_string(),
                        badge: Some("Common".to_string()),
                        badge_color: Some("green".to_string()),
                    },
                    BreakdownRow {
                        title: "Comparative".to_string(),
                        text: "Two viewpoints weighed against each other.".to_string(),
                        badge: None,
                        badge_color: None,
                    },
                    BreakdownRow {
                        title: "Chronological".to_string(),
                        text: "A development traced over time.".to_string(),
                        badge: Some("Rare".to_string()),
                        badge_color: Some("red".to_string()),
                    },
                ],
            },
        ],
    }
}

fn rc_section() -> SectionData {
    SectionData {
        section: "Reading Comprehension".to_string(),
        modules: vec![
            LibraryModule {
                id: 21,
                title: "Passage Structure".to_string(),
                category: "Core Skills".to_string(),
                unit: "Unit 1".to_string(),
                description: "Mapping passage architecture".to_string(),
                lessons: vec![
                    LessonStub {
                        id: "21-1".to_string(),
                        title: "Reading for Structure".to_string(),
                    },
                    LessonStub {
                        id: "21-3".to_string(),
                        title: "Pattern Recognition".to_string(),
                    },
                ],
            },
            LibraryModule {
                id: 22,
                title: "Question Types".to_string(),
                category: "Core Skills".to_string(),
                unit: "Unit 2".to_string(),
                description: "The RC question taxonomy".to_string(),
                lessons: vec![LessonStub {
                    id: "22-1".to_string(),
                    title: "Main Point Questions".to_string(),
                }],
            },
        ],
    }
}

fn instrumented_resolver() -> (Resolver, Arc<InstrumentedStore>) {
    let inner = MemoryContentStore::new()
        .with_section(SectionKey::Rc, rc_section())
        .with_lesson(SectionKey::Rc, rc_lesson_21_3());

    let store = Arc::new(InstrumentedStore::new(inner));
    let dyn_store: Arc<dyn ContentStore> = store.clone();
    (Resolver::new(dyn_store), store)
}

#[tokio::test]
async fn section_index_is_cached_after_first_success() {
    let (resolver, store) = instrumented_resolver();

    let first = resolver.load_section_index("rc").await.unwrap();
    let second = resolver.load_section_index("rc").await.unwrap();

    assert_eq!(*first, *second);
    assert_eq!(store.index_fetches.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn lesson_content_is_cached_after_first_success() {
    let (resolver, store) = instrumented_resolver();

    let first = resolver.load_lesson_content("rc", "21-3").await.unwrap();
    let second = resolver.load_lesson_content("rc", "21-3").await.unwrap();

    assert_eq!(*first, *second);
    assert_eq!(store.lesson_fetches.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn failed_resolution_is_not_cached_and_can_be_retried() {
    let (resolver, store) = instrumented_resolver();

    store.fail_next.store(true, Ordering::SeqCst);
    let err = resolver.load_section_index("rc").await.unwrap_err();
    assert!(matches!(err, LibraryError::Transport { .. }));
    assert!(err.is_retryable());

    // Retry fetches again and succeeds
    let index = resolver.load_section_index("rc").await.unwrap();
    assert_eq!(index.modules.len(), 2);
    assert_eq!(store.index_fetches.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn index_ordering_matches_authoring_and_carries_no_bodies() {
    let (resolver, _) = instrumented_resolver();

    let index = resolver.load_section_index("rc").await.unwrap();

    let module_ids: Vec<u32> = index.modules.iter().map(|m| m.id).collect();
    assert_eq!(module_ids, vec![21, 22]);

    let lesson_ids: Vec<&str> = index.modules[0]
        .lessons
        .iter()
        .map(|l| l.id.as_str())
        .collect();
    assert_eq!(lesson_ids, vec!["21-1", "21-3"]);

    // Stubs only
    let json = serde_json::to_string(&*index).unwrap();
    assert!(!json.contains("\"content\""));
}

#[tokio::test]
async fn lesson_scenario_rc_21_3_returns_sequence_verbatim() {
    let (resolver, _) = instrumented_resolver();

    let lesson = resolver.load_lesson_content("rc", "21-3").await.unwrap();

    assert_eq!(lesson.content.len(), 3);
    assert_eq!(lesson.content[0].tag(), "h3");
    assert_eq!(*lesson, rc_lesson_21_3());

    match &lesson.content[2] {
        ContentBlock::Breakdown { labels, items } => {
            assert_eq!(labels.title, "Structure Type");
            assert_eq!(labels.text, "Identification Strategy");
            assert_eq!(items.len(), 3);
        }
        other => panic!("expected breakdown, got {}", other.tag()),
    }
}

#[tokio::test]
async fn lesson_not_found_leaves_resolved_state_untouched() {
    let (resolver, store) = instrumented_resolver();

    resolver.load_section_index("rc").await.unwrap();

    let err = resolver
        .load_lesson_content("rc", "nonexistent-id")
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        LibraryError::LessonNotFound { section: SectionKey::Rc, ref lesson_id } if lesson_id == "nonexistent-id"
    ));
    assert!(!err.is_retryable());

    // The already-resolved index is still served from cache
    assert!(resolver.has_section(SectionKey::Rc).await);
    resolver.load_section_index("rc").await.unwrap();
    assert_eq!(store.index_fetches.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn unknown_section_key_never_reaches_the_store() {
    let (resolver, store) = instrumented_resolver();

    let err = resolver.load_section_index("logic-games").await.unwrap_err();
    assert!(matches!(err, LibraryError::UnknownSectionKey(ref k) if k == "logic-games"));

    let err = resolver
        .load_lesson_content("logic-games", "1-1")
        .await
        .unwrap_err();
    assert!(matches!(err, LibraryError::UnknownSectionKey(_)));

    assert_eq!(store.index_fetches.load(Ordering::SeqCst), 0);
    assert_eq!(store.lesson_fetches.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn lesson_resolution_is_independent_of_index_resolution() {
    let (resolver, store) = instrumented_resolver();

    let lesson = resolver.load_lesson_content("rc", "21-3").await.unwrap();
    assert!(!lesson.content.is_empty());

    assert_eq!(store.index_fetches.load(Ordering::SeqCst), 0);
    assert_eq!(store.lesson_fetches.load(Ordering::SeqCst), 1);
}
