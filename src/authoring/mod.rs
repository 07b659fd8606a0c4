//! Offline build step for library content.
//!
//! Authors write one raw section document per section key,
//! `<src>/<key>.json`, with full lesson bodies inline. The build step
//! splits each document into the two runtime artifact kinds:
//!
//! - `sections/<key>/index.json` — the module/lesson-stub index
//! - `sections/<key>/lessons/<id>.json` — one document per lesson
//!
//! and writes `manifest.json` with per-section counts and a SHA-256
//! checksum per artifact. Stub extraction is pure and order-preserving:
//! module and lesson order is curriculum sequence and must survive the
//! split exactly as authored.
//!
//! All of this runs at authoring time; nothing here executes in the
//! reading path.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use glob::glob;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tokio::fs;
use tracing::{info, warn};

use crate::domain::{Lesson, LibraryModule, SectionData, SectionKey};
use crate::library::manifest::{Manifest, SectionCounts};

/// A raw authored module: metadata plus full lessons
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthoredModule {
    pub id: u32,
    pub title: String,
    pub category: String,
    pub unit: String,
    pub description: String,
    pub lessons: Vec<Lesson>,
}

/// A raw authored section document, before stub extraction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionDocument {
    /// Display name, e.g. "Reading Comprehension"
    pub section: String,

    /// Ordered modules with full lesson bodies
    pub modules: Vec<AuthoredModule>,
}

/// Extract the stub index from a raw section document.
///
/// Copies identity/metadata fields verbatim and replaces each lesson's
/// content with its `{id, title}` stub. Deterministic and idempotent.
pub fn extract_index(doc: &SectionDocument) -> SectionData {
    SectionData {
        section: doc.section.clone(),
        modules: doc
            .modules
            .iter()
            .map(|m| LibraryModule {
                id: m.id,
                title: m.title.clone(),
                category: m.category.clone(),
                unit: m.unit.clone(),
                description: m.description.clone(),
                lessons: m.lessons.iter().map(Lesson::stub).collect(),
            })
            .collect(),
    }
}

fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

/// Builds the runtime artifact tree from authored section documents
pub struct Builder {
    src_dir: PathBuf,
    out_dir: PathBuf,
}

impl Builder {
    /// Create a builder over a source and output directory
    pub fn new(src_dir: impl Into<PathBuf>, out_dir: impl Into<PathBuf>) -> Self {
        Self {
            src_dir: src_dir.into(),
            out_dir: out_dir.into(),
        }
    }

    /// Discover authored section documents (`<src>/<key>.json`)
    fn discover(&self) -> Result<Vec<(SectionKey, PathBuf)>> {
        let pattern = self.src_dir.join("*.json");
        let pattern = pattern
            .to_str()
            .context("Authoring source path is not valid UTF-8")?;

        let mut sources = Vec::new();
        for entry in glob(pattern).context("Failed to scan authoring sources")? {
            let path = entry.context("Failed to read authoring source entry")?;
            let stem = path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or_default();

            let key: SectionKey = stem.parse().with_context(|| {
                format!(
                    "Authoring source '{}' is not named after a known section key",
                    path.display()
                )
            })?;

            sources.push((key, path));
        }

        // Stable build order regardless of directory iteration order
        sources.sort_by_key(|(key, _)| *key);
        Ok(sources)
    }

    /// Write one artifact and record its checksum
    async fn write_artifact(
        &self,
        manifest: &mut Manifest,
        relative: &str,
        value: &impl Serialize,
    ) -> Result<()> {
        let path = self.out_dir.join(relative);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let content = serde_json::to_string_pretty(value)?;
        fs::write(&path, &content)
            .await
            .with_context(|| format!("Failed to write artifact: {}", path.display()))?;

        manifest.set_checksum(relative, sha256_hex(content.as_bytes()));
        Ok(())
    }

    /// Build the full artifact tree and manifest.
    ///
    /// Returns the manifest that was written.
    pub async fn build(&self) -> Result<Manifest> {
        let sources = self.discover()?;
        if sources.is_empty() {
            anyhow::bail!(
                "No authoring sources found in {}",
                self.src_dir.display()
            );
        }

        let mut manifest = Manifest::new();

        for (key, path) in sources {
            let raw = fs::read_to_string(&path)
                .await
                .with_context(|| format!("Failed to read section document: {}", path.display()))?;

            let doc: SectionDocument = serde_json::from_str(&raw)
                .with_context(|| format!("Failed to parse section document: {}", path.display()))?;

            let index = extract_index(&doc);
            manifest.set_counts(key, SectionCounts::of(&index));

            self.write_artifact(&mut manifest, &format!("sections/{}/index.json", key), &index)
                .await?;

            let mut lesson_count = 0usize;
            for module in &doc.modules {
                if module.lessons.is_empty() {
                    warn!(section = %key, module_id = module.id, "module has no lessons");
                }
                for lesson in &module.lessons {
                    self.write_artifact(
                        &mut manifest,
                        &format!("sections/{}/lessons/{}.json", key, lesson.id),
                        lesson,
                    )
                    .await?;
                    lesson_count += 1;
                }
            }

            info!(
                section = %key,
                modules = doc.modules.len(),
                lessons = lesson_count,
                "built section"
            );
        }

        manifest.save(&self.out_dir).await?;
        info!(out = %self.out_dir.display(), "wrote manifest");

        Ok(manifest)
    }
}

/// Audit a built artifact tree against its manifest.
///
/// Returns a list of findings; empty means the tree is consistent.
/// Checks per-section counts against the index documents, checksum
/// integrity of every recorded artifact, and that every lesson stub has
/// a matching lesson artifact.
pub async fn verify(root: &Path) -> Result<Vec<String>> {
    let manifest = Manifest::load(root).await?;
    let mut findings = Vec::new();

    for (key_str, _) in &manifest.sections {
        let key: SectionKey = match key_str.parse() {
            Ok(key) => key,
            Err(_) => {
                findings.push(format!("manifest entry '{}' is not a known section key", key_str));
                continue;
            }
        };

        let index_path = root
            .join("sections")
            .join(key.as_str())
            .join("index.json");
        let raw = match fs::read_to_string(&index_path).await {
            Ok(raw) => raw,
            Err(e) => {
                findings.push(format!("missing index for section '{}': {}", key, e));
                continue;
            }
        };

        let index: SectionData = match serde_json::from_str(&raw) {
            Ok(index) => index,
            Err(e) => {
                findings.push(format!("unparseable index for section '{}': {}", key, e));
                continue;
            }
        };

        if let Some(mismatch) = manifest.check_counts(key, &index) {
            findings.push(mismatch);
        }

        for module in &index.modules {
            for stub in &module.lessons {
                let lesson_path = root
                    .join("sections")
                    .join(key.as_str())
                    .join("lessons")
                    .join(format!("{}.json", stub.id));
                if !lesson_path.exists() {
                    findings.push(format!(
                        "lesson '{}/{}' is indexed but has no artifact",
                        key, stub.id
                    ));
                }
            }
        }
    }

    for (relative, recorded) in &manifest.checksums {
        let path = root.join(relative);
        match fs::read(&path).await {
            Ok(bytes) => {
                let actual = sha256_hex(&bytes);
                if &actual != recorded {
                    findings.push(format!("checksum mismatch for {}", relative));
                }
            }
            Err(_) => findings.push(format!("missing artifact {}", relative)),
        }
    }

    Ok(findings)
}
