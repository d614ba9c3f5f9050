use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Post entity - a single blog post.
///
/// The schema is deliberately loose: every field the author fills in is
/// optional, mirroring the schemaless documents the store holds. Only the
/// store-assigned `id` and `created` timestamp are guaranteed to exist.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    pub created: DateTime<Utc>,
}

/// The author-submitted fields of a post.
///
/// Missing fields are forwarded to the store as-is; the store's tolerance
/// decides the outcome. The web layer sanitizes `body` before a draft is
/// handed to the store - `title` and `image` are stored verbatim.
#[derive(Debug, Clone, Default)]
pub struct PostDraft {
    pub title: Option<String>,
    pub image: Option<String>,
    pub body: Option<String>,
}
