//! Application state - shared across all handlers.

use std::sync::Arc;

use quill_core::ports::{PostStore, Sanitizer};
use quill_infra::{AmmoniaSanitizer, InMemoryPostStore, MongoPostStore};

use crate::config::AppConfig;
use crate::render::Templates;

/// Shared application state.
///
/// Collaborators are built once at startup and injected into handlers;
/// nothing here is mutable in-process.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<dyn PostStore>,
    pub sanitizer: Arc<dyn Sanitizer>,
    pub templates: Arc<Templates>,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> anyhow::Result<Self> {
        let posts: Arc<dyn PostStore> =
            match MongoPostStore::connect(&config.mongodb_url, &config.mongodb_db).await {
                Ok(store) => Arc::new(store),
                Err(e) => {
                    tracing::error!(
                        "Failed to connect to document store: {}. Using in-memory fallback.",
                        e
                    );
                    Arc::new(InMemoryPostStore::new())
                }
            };

        Ok(Self {
            posts,
            sanitizer: Arc::new(AmmoniaSanitizer),
            templates: Arc::new(Templates::new()?),
        })
    }
}
