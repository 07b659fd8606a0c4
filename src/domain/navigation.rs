//! Navigation state for the library UI.
//!
//! Selection is an explicit state machine: catalog → section → module →
//! lesson, with back-actions walking the same path in reverse. Entering
//! a section or lesson yields the resolver call to fire as a
//! [`LoadRequest`]; the UI layer runs it and feeds the completion back
//! through the `apply_*` methods.
//!
//! Completions are guarded against stale targets: a result arriving for
//! a load whose target is no longer the active selection is discarded
//! rather than applied. Failures are scoped to the pane being loaded; a
//! failed lesson load never clears an already-loaded module list.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::catalog::{Lesson, SectionData, SectionKey};
use crate::library::LibraryError;

/// Current selection in the library UI
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "view")]
pub enum NavState {
    /// Section tiles, rendered from the manifest alone
    Catalog,

    /// A section's module list
    SectionOpen { section: SectionKey },

    /// A module's lesson-stub list
    ModuleOpen { section: SectionKey, module_id: u32 },

    /// A lesson's content
    LessonOpen {
        section: SectionKey,
        module_id: u32,
        lesson_id: String,
    },
}

impl NavState {
    /// The section this state is scoped to, if any
    pub fn section(&self) -> Option<SectionKey> {
        match self {
            NavState::Catalog => None,
            NavState::SectionOpen { section }
            | NavState::ModuleOpen { section, .. }
            | NavState::LessonOpen { section, .. } => Some(*section),
        }
    }
}

/// A resolver call a transition asks the UI layer to fire
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadRequest {
    SectionIndex(SectionKey),
    LessonContent(SectionKey, String),
}

/// Status of one pane's in-flight or completed load
#[derive(Debug, Clone, PartialEq)]
pub enum LoadStatus<T> {
    /// Nothing requested for this pane
    Idle,

    /// Request in flight
    Loading,

    /// Resolved successfully
    Ready(T),

    /// Resolution failed; message shown inline in this pane only
    Failed(String),
}

impl<T> LoadStatus<T> {
    pub fn is_ready(&self) -> bool {
        matches!(self, LoadStatus::Ready(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, LoadStatus::Failed(_))
    }

    /// The resolved value, if any
    pub fn ready(&self) -> Option<&T> {
        match self {
            LoadStatus::Ready(value) => Some(value),
            _ => None,
        }
    }
}

/// Navigation state plus the per-pane load state it drives
#[derive(Debug, Clone)]
pub struct LibraryView {
    state: NavState,
    section_index: LoadStatus<Arc<SectionData>>,
    lesson: LoadStatus<Arc<Lesson>>,
}

impl LibraryView {
    /// Start at the catalog
    pub fn new() -> Self {
        Self {
            state: NavState::Catalog,
            section_index: LoadStatus::Idle,
            lesson: LoadStatus::Idle,
        }
    }

    pub fn state(&self) -> &NavState {
        &self.state
    }

    pub fn section_index(&self) -> &LoadStatus<Arc<SectionData>> {
        &self.section_index
    }

    pub fn lesson(&self) -> &LoadStatus<Arc<Lesson>> {
        &self.lesson
    }

    /// Open a section from the catalog (or switch sections). Returns the
    /// index load to fire.
    pub fn open_section(&mut self, section: SectionKey) -> LoadRequest {
        self.state = NavState::SectionOpen { section };
        self.section_index = LoadStatus::Loading;
        self.lesson = LoadStatus::Idle;
        LoadRequest::SectionIndex(section)
    }

    /// Open a module within the current section. The lesson-stub list
    /// comes from the already-loaded index; no load is fired.
    pub fn open_module(&mut self, module_id: u32) {
        if let Some(section) = self.state.section() {
            self.state = NavState::ModuleOpen { section, module_id };
        }
    }

    /// Open a lesson within the current module. Returns the content load
    /// to fire, or `None` when not positioned on a module.
    pub fn open_lesson(&mut self, lesson_id: impl Into<String>) -> Option<LoadRequest> {
        let (section, module_id) = match &self.state {
            NavState::ModuleOpen { section, module_id }
            | NavState::LessonOpen {
                section, module_id, ..
            } => (*section, *module_id),
            _ => return None,
        };

        let lesson_id = lesson_id.into();
        self.state = NavState::LessonOpen {
            section,
            module_id,
            lesson_id: lesson_id.clone(),
        };
        self.lesson = LoadStatus::Loading;

        Some(LoadRequest::LessonContent(section, lesson_id))
    }

    /// Step back one level
    pub fn back(&mut self) {
        match &self.state {
            NavState::Catalog => {}
            NavState::SectionOpen { .. } => {
                self.state = NavState::Catalog;
                self.section_index = LoadStatus::Idle;
                self.lesson = LoadStatus::Idle;
            }
            NavState::ModuleOpen { section, .. } => {
                self.state = NavState::SectionOpen { section: *section };
            }
            NavState::LessonOpen {
                section, module_id, ..
            } => {
                self.state = NavState::ModuleOpen {
                    section: *section,
                    module_id: *module_id,
                };
                self.lesson = LoadStatus::Idle;
            }
        }
    }

    /// Apply a completed section-index load. Discarded when the view has
    /// navigated away from `section` in the meantime.
    pub fn apply_section_index(
        &mut self,
        section: SectionKey,
        result: Result<Arc<SectionData>, LibraryError>,
    ) {
        if self.state.section() != Some(section) {
            return;
        }

        self.section_index = match result {
            Ok(data) => LoadStatus::Ready(data),
            Err(e) => LoadStatus::Failed(e.to_string()),
        };
    }

    /// Apply a completed lesson load. Discarded unless this exact lesson
    /// is still the active selection. A failure touches only the lesson
    /// pane; the module list stays as it was.
    pub fn apply_lesson_content(
        &mut self,
        section: SectionKey,
        lesson_id: &str,
        result: Result<Arc<Lesson>, LibraryError>,
    ) {
        let active = matches!(
            &self.state,
            NavState::LessonOpen {
                section: s,
                lesson_id: l,
                ..
            } if *s == section && l == lesson_id
        );
        if !active {
            return;
        }

        self.lesson = match result {
            Ok(lesson) => LoadStatus::Ready(lesson),
            Err(e) => LoadStatus::Failed(e.to_string()),
        };
    }
}

impl Default for LibraryView {
    fn default() -> Self {
        Self::new()
    }
}
