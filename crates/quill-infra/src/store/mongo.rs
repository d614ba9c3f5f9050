//! MongoDB-backed post store.

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{self, Document, doc};
use mongodb::{Client, Collection};
use serde::{Deserialize, Serialize};

use quill_core::domain::{Post, PostDraft};
use quill_core::error::StoreError;
use quill_core::ports::PostStore;

const COLLECTION: &str = "blogs";

/// Wire representation of a post document.
///
/// Kept separate from the domain `Post` so the bson details (`_id`,
/// absent-vs-null fields, bson datetime) stay inside this adapter.
#[derive(Debug, Serialize, Deserialize)]
struct PostDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    id: Option<ObjectId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    body: Option<String>,
    created: bson::DateTime,
}

impl PostDocument {
    fn from_draft(draft: PostDraft) -> Self {
        Self {
            id: None,
            title: draft.title,
            image: draft.image,
            body: draft.body,
            created: bson::DateTime::now(),
        }
    }

    fn into_post(self) -> Post {
        Post {
            id: self.id.map(|oid| oid.to_hex()).unwrap_or_default(),
            title: self.title,
            image: self.image,
            body: self.body,
            created: chrono::DateTime::<chrono::Utc>::from(self.created.to_system_time()),
        }
    }
}

/// Post store backed by a MongoDB collection.
pub struct MongoPostStore {
    posts: Collection<PostDocument>,
}

impl MongoPostStore {
    /// Connect to the database and verify it is reachable.
    ///
    /// The ping keeps connection failures at startup, where the caller can
    /// fall back to the in-memory store, instead of on the first request.
    pub async fn connect(url: &str, db_name: &str) -> Result<Self, StoreError> {
        let client = Client::with_uri_str(url)
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        let db = client.database(db_name);
        db.run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        tracing::info!(db = db_name, "connected to document store");

        Ok(Self {
            posts: db.collection(COLLECTION),
        })
    }

    fn parse_id(id: &str) -> Result<ObjectId, StoreError> {
        ObjectId::parse_str(id).map_err(|_| StoreError::InvalidId(id.to_string()))
    }
}

#[async_trait]
impl PostStore for MongoPostStore {
    async fn find_all(&self) -> Result<Vec<Post>, StoreError> {
        let cursor = self
            .posts
            .find(doc! {})
            .await
            .map_err(|e| StoreError::Query(e.to_string()))?;

        let docs: Vec<PostDocument> = cursor
            .try_collect()
            .await
            .map_err(|e| StoreError::Query(e.to_string()))?;

        Ok(docs.into_iter().map(PostDocument::into_post).collect())
    }

    async fn find_by_id(&self, id: &str) -> Result<Post, StoreError> {
        let oid = Self::parse_id(id)?;

        let doc = self
            .posts
            .find_one(doc! { "_id": oid })
            .await
            .map_err(|e| StoreError::Query(e.to_string()))?;

        doc.map(PostDocument::into_post).ok_or(StoreError::NotFound)
    }

    async fn insert(&self, draft: PostDraft) -> Result<Post, StoreError> {
        let mut doc = PostDocument::from_draft(draft);

        let result = self
            .posts
            .insert_one(&doc)
            .await
            .map_err(|e| StoreError::Query(e.to_string()))?;

        doc.id = result.inserted_id.as_object_id();
        Ok(doc.into_post())
    }

    async fn update(&self, id: &str, draft: PostDraft) -> Result<(), StoreError> {
        let oid = Self::parse_id(id)?;

        // Only the submitted fields go into $set; `_id` and `created`
        // never appear here.
        let mut set = Document::new();
        if let Some(title) = draft.title {
            set.insert("title", title);
        }
        if let Some(image) = draft.image {
            set.insert("image", image);
        }
        if let Some(body) = draft.body {
            set.insert("body", body);
        }
        if set.is_empty() {
            return Ok(());
        }

        let result = self
            .posts
            .update_one(doc! { "_id": oid }, doc! { "$set": set })
            .await
            .map_err(|e| StoreError::Query(e.to_string()))?;

        if result.matched_count == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        let oid = Self::parse_id(id)?;

        let result = self
            .posts
            .delete_one(doc! { "_id": oid })
            .await
            .map_err(|e| StoreError::Query(e.to_string()))?;

        if result.deleted_count == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}
