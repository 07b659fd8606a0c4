//! lessonlib - Learning Library content engine
//!
//! The content backend for an LSAT tutoring Learning Library: a
//! block-based lesson schema, an offline build step that splits authored
//! section documents into lazily loadable artifacts, an async resolver
//! with a per-session cache, and a pure block renderer.
//!
//! # Architecture
//!
//! Content is authored offline and shipped as static JSON artifacts;
//! nothing mutates library content at runtime. The reading path is:
//! manifest (catalog tiles) → section index (modules and lesson stubs)
//! → per-lesson content, each fetched independently and on demand.
//!
//! # Modules
//!
//! - `domain`: Data structures (ContentBlock, catalog, navigation FSM)
//! - `library`: Stores, lazy resolver, manifest, error taxonomy
//! - `render`: Markup expansion and block rendering
//! - `authoring`: Offline build step and tree audit
//! - `cli`: Command-line interface
//!
//! # Usage
//!
//! ```bash
//! # Build the artifact tree from authored section documents
//! lessonlib build --src content-src --out public/library
//!
//! # Browse it
//! lessonlib sections
//! lessonlib modules rc
//! lessonlib show rc 21-3
//!
//! # Audit counts and checksums
//! lessonlib check
//! ```

pub mod authoring;
pub mod cli;
pub mod config;
pub mod domain;
pub mod library;
pub mod render;

// Re-export main types at crate root for convenience
pub use domain::{
    ContentBlock, Lesson, LessonStub, LibraryModule, LibraryView, LoadRequest, LoadStatus,
    NavState, SectionData, SectionKey,
};
pub use library::{
    ContentStore, FsContentStore, HttpContentStore, LibraryError, Manifest, MemoryContentStore,
    Resolver, SectionCounts,
};
pub use render::{render, Rendered};
