//! Library resolution: stores, lazy resolver, manifest, errors.
//!
//! The library ships as a static artifact tree (see [`store`]); this
//! module fetches those artifacts on demand and caches them for the
//! session. Content is immutable at runtime; the only mutable state here
//! is the resolver's append-only cache.

pub mod error;
pub mod http;
pub mod manifest;
pub mod resolver;
pub mod store;

pub use error::LibraryError;
pub use http::HttpContentStore;
pub use manifest::{Manifest, SectionCounts};
pub use resolver::Resolver;
pub use store::{ContentStore, FsContentStore, MemoryContentStore};
