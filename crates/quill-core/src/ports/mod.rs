//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod sanitizer;
mod store;

pub use sanitizer::Sanitizer;
pub use store::PostStore;
