//! Precomputed catalog manifest.
//!
//! The manifest lets the catalog view show per-section module/lesson
//! counts without resolving any section index. It is written once by the
//! build step and treated as advisory display metadata at runtime; the
//! authoritative counts are always recomputed from the resolved
//! `SectionData`. A divergence is a data-integrity bug caught by
//! `lessonlib check`, not a runtime error condition.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::fs;

use crate::domain::{SectionData, SectionKey};

/// Aggregate sizes for one section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionCounts {
    /// Number of modules in the section
    pub modules: usize,

    /// Total number of lessons across the section's modules
    pub lessons: usize,
}

impl SectionCounts {
    /// Authoritative counts recomputed from a resolved index
    pub fn of(data: &SectionData) -> Self {
        Self {
            modules: data.modules.len(),
            lessons: data.lesson_count(),
        }
    }
}

/// Build-time manifest shipped alongside the artifact tree
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    /// Manifest format version
    pub version: u32,

    /// When the build step produced this manifest
    pub generated_at: DateTime<Utc>,

    /// Per-section aggregate counts, keyed by short section key
    pub sections: BTreeMap<String, SectionCounts>,

    /// SHA-256 checksum per artifact, keyed by path relative to the
    /// content root. Used by `lessonlib check`.
    #[serde(default)]
    pub checksums: BTreeMap<String, String>,
}

impl Manifest {
    pub const FILE_NAME: &'static str = "manifest.json";
    pub const VERSION: u32 = 1;

    /// Create an empty manifest stamped now
    pub fn new() -> Self {
        Self {
            version: Self::VERSION,
            generated_at: Utc::now(),
            sections: BTreeMap::new(),
            checksums: BTreeMap::new(),
        }
    }

    /// Load the manifest from a content root
    pub async fn load(root: &Path) -> Result<Self> {
        let path = root.join(Self::FILE_NAME);

        let content = fs::read_to_string(&path)
            .await
            .with_context(|| format!("Failed to read manifest: {}", path.display()))?;

        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse manifest: {}", path.display()))
    }

    /// Save the manifest to a content root
    pub async fn save(&self, root: &Path) -> Result<()> {
        let path = root.join(Self::FILE_NAME);
        let content = serde_json::to_string_pretty(self)?;

        fs::write(&path, content)
            .await
            .with_context(|| format!("Failed to write manifest: {}", path.display()))?;

        Ok(())
    }

    /// Counts for a section, if present
    pub fn counts(&self, key: SectionKey) -> Option<SectionCounts> {
        self.sections.get(key.as_str()).copied()
    }

    /// Record counts for a section
    pub fn set_counts(&mut self, key: SectionKey, counts: SectionCounts) {
        self.sections.insert(key.as_str().to_string(), counts);
    }

    /// Record an artifact checksum
    pub fn set_checksum(&mut self, relative_path: impl Into<String>, checksum: impl Into<String>) {
        self.checksums.insert(relative_path.into(), checksum.into());
    }

    /// Check the manifest's counts for a section against a resolved
    /// index. Returns a description of the mismatch, if any.
    pub fn check_counts(&self, key: SectionKey, data: &SectionData) -> Option<String> {
        let authoritative = SectionCounts::of(data);

        match self.counts(key) {
            None => Some(format!("manifest has no entry for section '{}'", key)),
            Some(recorded) if recorded != authoritative => Some(format!(
                "section '{}': manifest says {} modules / {} lessons, index has {} / {}",
                key, recorded.modules, recorded.lessons, authoritative.modules, authoritative.lessons
            )),
            Some(_) => None,
        }
    }
}

impl Default for Manifest {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{LessonStub, LibraryModule};

    fn sample_section(lessons: usize) -> SectionData {
        SectionData {
            section: "Logical Reasoning".to_string(),
            modules: vec![LibraryModule {
                id: 1,
                title: "Argument Basics".to_string(),
                category: "Foundations".to_string(),
                unit: "Unit 1".to_string(),
                description: "Premises and conclusions".to_string(),
                lessons: (0..lessons)
                    .map(|i| LessonStub {
                        id: format!("1-{}", i + 1),
                        title: format!("Lesson {}", i + 1),
                    })
                    .collect(),
            }],
        }
    }

    #[test]
    fn test_counts_match() {
        let data = sample_section(3);

        let mut manifest = Manifest::new();
        manifest.set_counts(SectionKey::Lr, SectionCounts::of(&data));

        assert_eq!(
            manifest.counts(SectionKey::Lr),
            Some(SectionCounts {
                modules: 1,
                lessons: 3
            })
        );
        assert!(manifest.check_counts(SectionKey::Lr, &data).is_none());
    }

    #[test]
    fn test_counts_mismatch_is_reported() {
        let mut manifest = Manifest::new();
        manifest.set_counts(
            SectionKey::Lr,
            SectionCounts {
                modules: 1,
                lessons: 5,
            },
        );

        let mismatch = manifest.check_counts(SectionKey::Lr, &sample_section(3));
        assert!(mismatch.unwrap().contains("manifest says 1 modules / 5 lessons"));

        assert!(manifest
            .check_counts(SectionKey::Rc, &sample_section(3))
            .unwrap()
            .contains("no entry"));
    }

    #[tokio::test]
    async fn test_save_and_load() {
        let temp = tempfile::TempDir::new().unwrap();

        let mut manifest = Manifest::new();
        manifest.set_counts(
            SectionKey::Rc,
            SectionCounts {
                modules: 4,
                lessons: 18,
            },
        );
        manifest.set_checksum("sections/rc/index.json", "deadbeef");
        manifest.save(temp.path()).await.unwrap();

        let loaded = Manifest::load(temp.path()).await.unwrap();
        assert_eq!(loaded.version, Manifest::VERSION);
        assert_eq!(
            loaded.counts(SectionKey::Rc).unwrap(),
            SectionCounts {
                modules: 4,
                lessons: 18
            }
        );
        assert_eq!(
            loaded.checksums.get("sections/rc/index.json").unwrap(),
            "deadbeef"
        );
    }
}
