//! Domain types for the Learning Library.
//!
//! This module contains the core data structures:
//! - Blocks: the tagged-union lesson content format
//! - Catalog: sections, modules, lesson stubs
//! - Navigation: the selection state machine the UI drives

pub mod block;
pub mod catalog;
pub mod navigation;

pub use block::{BreakdownLabels, BreakdownRow, ContentBlock};
pub use catalog::{Lesson, LessonStub, LibraryModule, SectionData, SectionKey};
pub use navigation::{LibraryView, LoadRequest, LoadStatus, NavState};
