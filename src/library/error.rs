//! Error taxonomy for library resolution.

use thiserror::Error;

use crate::domain::SectionKey;

/// Errors that can occur while resolving library content
#[derive(Debug, Error)]
pub enum LibraryError {
    /// Requested section key is not in the fixed enumeration. Always a
    /// caller error; not retried.
    #[error("Unknown section key: {0}")]
    UnknownSectionKey(String),

    /// No lesson with this id exists under the section. Same treatment
    /// as an unknown key.
    #[error("Lesson '{lesson_id}' not found in section '{section}'")]
    LessonNotFound {
        section: SectionKey,
        lesson_id: String,
    },

    /// The underlying fetch of a section or lesson artifact failed.
    /// Surfaced with a retry affordance and never cached.
    #[error("Failed to fetch {what}: {source}")]
    Transport {
        what: String,
        #[source]
        source: anyhow::Error,
    },
}

impl LibraryError {
    /// Transport failures may be retried; the other variants are
    /// programming/content errors and retrying cannot help.
    pub fn is_retryable(&self) -> bool {
        matches!(self, LibraryError::Transport { .. })
    }

    pub(crate) fn transport(what: impl Into<String>, source: anyhow::Error) -> Self {
        LibraryError::Transport {
            what: what.into(),
            source,
        }
    }
}
