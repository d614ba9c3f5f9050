//! In-memory post store - used as fallback when MongoDB is unavailable.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use quill_core::domain::{Post, PostDraft};
use quill_core::error::StoreError;
use quill_core::ports::PostStore;

/// Post store using a HashMap behind an async RwLock.
///
/// This is the fallback implementation when the database is not reachable,
/// and the test double for handler tests. Data is lost on process restart.
pub struct InMemoryPostStore {
    posts: RwLock<HashMap<String, Post>>,
}

impl InMemoryPostStore {
    pub fn new() -> Self {
        Self {
            posts: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryPostStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PostStore for InMemoryPostStore {
    async fn find_all(&self) -> Result<Vec<Post>, StoreError> {
        let posts = self.posts.read().await;
        let mut all: Vec<Post> = posts.values().cloned().collect();
        // HashMap order is arbitrary; keep the listing stable.
        all.sort_by(|a, b| a.created.cmp(&b.created).then_with(|| a.id.cmp(&b.id)));
        Ok(all)
    }

    async fn find_by_id(&self, id: &str) -> Result<Post, StoreError> {
        let posts = self.posts.read().await;
        posts.get(id).cloned().ok_or(StoreError::NotFound)
    }

    async fn insert(&self, draft: PostDraft) -> Result<Post, StoreError> {
        let post = Post {
            id: Uuid::new_v4().to_string(),
            title: draft.title,
            image: draft.image,
            body: draft.body,
            created: Utc::now(),
        };

        let mut posts = self.posts.write().await;
        posts.insert(post.id.clone(), post.clone());
        Ok(post)
    }

    async fn update(&self, id: &str, draft: PostDraft) -> Result<(), StoreError> {
        let mut posts = self.posts.write().await;
        let post = posts.get_mut(id).ok_or(StoreError::NotFound)?;

        if let Some(title) = draft.title {
            post.title = Some(title);
        }
        if let Some(image) = draft.image {
            post.image = Some(image);
        }
        if let Some(body) = draft.body {
            post.body = Some(body);
        }
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        let mut posts = self.posts.write().await;
        posts.remove(id).map(|_| ()).ok_or(StoreError::NotFound)
    }
}
