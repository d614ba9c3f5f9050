//! # Quill Infrastructure
//!
//! Concrete implementations of the ports defined in `quill-core`:
//! the MongoDB post store, an in-memory store used as fallback and test
//! double, and the ammonia-backed sanitizer.

pub mod sanitize;
pub mod store;

pub use sanitize::AmmoniaSanitizer;
pub use store::{InMemoryPostStore, MongoPostStore};
