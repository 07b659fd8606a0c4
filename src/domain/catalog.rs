//! Section, module, and lesson catalog types.
//!
//! The library is a three-level hierarchy: a fixed set of sections, each
//! holding an ordered list of modules, each holding an ordered list of
//! lessons. Ordering is curriculum sequence, not just display order.
//!
//! Index documents carry lesson *stubs* only; lesson bodies live in
//! separate per-lesson artifacts so opening a section never transfers
//! content bodies.

use serde::{Deserialize, Serialize};

use super::block::ContentBlock;

/// Short stable identifier for a top-level curriculum section.
///
/// The set is fixed at build time; a string key outside this enumeration
/// is a caller error (`LibraryError::UnknownSectionKey`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionKey {
    /// Logical Reasoning
    Lr,

    /// Reading Comprehension
    Rc,

    /// Advanced Passages
    Ap,
}

impl SectionKey {
    /// All known sections, in catalog display order
    pub const ALL: [SectionKey; 3] = [SectionKey::Lr, SectionKey::Rc, SectionKey::Ap];

    /// The short key used in artifact paths and manifest entries
    pub fn as_str(&self) -> &'static str {
        match self {
            SectionKey::Lr => "lr",
            SectionKey::Rc => "rc",
            SectionKey::Ap => "ap",
        }
    }

    /// Human-readable section name shown on catalog tiles
    pub fn display_name(&self) -> &'static str {
        match self {
            SectionKey::Lr => "Logical Reasoning",
            SectionKey::Rc => "Reading Comprehension",
            SectionKey::Ap => "Advanced Passages",
        }
    }
}

impl std::fmt::Display for SectionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for SectionKey {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "lr" => Ok(SectionKey::Lr),
            "rc" => Ok(SectionKey::Rc),
            "ap" => Ok(SectionKey::Ap),
            _ => anyhow::bail!("Unknown section key: {}", s),
        }
    }
}

/// A lesson's identity and display name, without its content body.
///
/// Ids are opaque strings unique within a section; the authoring
/// convention is `<moduleId>-<ordinal>` but nothing relies on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LessonStub {
    pub id: String,
    pub title: String,
}

/// A fully resolved lesson: the stub plus its ordered block sequence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lesson {
    pub id: String,
    pub title: String,
    pub content: Vec<ContentBlock>,
}

impl Lesson {
    /// The stub for this lesson
    pub fn stub(&self) -> LessonStub {
        LessonStub {
            id: self.id.clone(),
            title: self.title.clone(),
        }
    }
}

/// A titled grouping of lessons within a section, one curriculum unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LibraryModule {
    /// Module id, unique within its section
    pub id: u32,

    /// Module title, e.g. "Conditional Reasoning"
    pub title: String,

    /// Curriculum category, e.g. "Core Skills"
    pub category: String,

    /// Unit label shown in the module list, e.g. "Unit 3"
    pub unit: String,

    /// One-line module description
    pub description: String,

    /// Ordered lesson stubs; non-empty for authored modules
    pub lessons: Vec<LessonStub>,
}

impl LibraryModule {
    /// Find a lesson stub by id
    pub fn lesson(&self, lesson_id: &str) -> Option<&LessonStub> {
        self.lessons.iter().find(|l| l.id == lesson_id)
    }
}

/// The full index for one section: modules with lesson stubs, no bodies
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionData {
    /// Display name, e.g. "Reading Comprehension"
    pub section: String,

    /// Ordered modules
    pub modules: Vec<LibraryModule>,
}

impl SectionData {
    /// Find a module by id
    pub fn module(&self, module_id: u32) -> Option<&LibraryModule> {
        self.modules.iter().find(|m| m.id == module_id)
    }

    /// Find a lesson stub anywhere in the section
    pub fn lesson(&self, lesson_id: &str) -> Option<&LessonStub> {
        self.modules.iter().find_map(|m| m.lesson(lesson_id))
    }

    /// Total number of lesson stubs across all modules
    pub fn lesson_count(&self) -> usize {
        self.modules.iter().map(|m| m.lessons.len()).sum()
    }
}
