//! # Quill Core
//!
//! The domain layer of the Quill blog application.
//! This crate contains the Post entity and the ports the web layer
//! depends on, with zero infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;

pub use error::StoreError;
