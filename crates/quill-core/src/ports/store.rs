use async_trait::async_trait;

use crate::domain::{Post, PostDraft};
use crate::error::StoreError;

/// Document store holding the post collection.
///
/// The store assigns the identifier and the creation timestamp; both are
/// immutable afterwards. Lookups go through the identifier alone.
#[async_trait]
pub trait PostStore: Send + Sync {
    /// Fetch every post, in store-native order.
    async fn find_all(&self) -> Result<Vec<Post>, StoreError>;

    /// Fetch a single post by its identifier.
    async fn find_by_id(&self, id: &str) -> Result<Post, StoreError>;

    /// Persist a new post; the store assigns `id` and `created`.
    async fn insert(&self, draft: PostDraft) -> Result<Post, StoreError>;

    /// Replace the submitted fields of an existing post.
    /// `id` and `created` are never touched.
    async fn update(&self, id: &str, draft: PostDraft) -> Result<(), StoreError>;

    /// Remove a post by its identifier.
    async fn delete(&self, id: &str) -> Result<(), StoreError>;
}
