//! Post resource handlers.
//!
//! Every operation is a single request/response cycle with exactly one
//! store round-trip. Store failures never surface as error statuses: each
//! handler logs them and falls back to a fixed response - the post index
//! for reads, updates and deletes, the empty creation form for a failed
//! create. A missing post and a failed store are deliberately
//! indistinguishable to the reader.

use actix_web::http::header::{self, ContentType};
use actix_web::{HttpResponse, web};
use minijinja::context;
use serde::Deserialize;

use quill_core::domain::PostDraft;
use quill_core::ports::Sanitizer;

use crate::middleware::error::AppResult;
use crate::state::AppState;

/// Form payload for create and update, submitted as `blog[...]` fields.
#[derive(Debug, Deserialize)]
pub struct BlogForm {
    #[serde(rename = "blog[title]")]
    title: Option<String>,
    #[serde(rename = "blog[image]")]
    image: Option<String>,
    #[serde(rename = "blog[body]")]
    body: Option<String>,
}

impl BlogForm {
    /// Sanitize the body; title and image are stored verbatim.
    fn into_draft(self, sanitizer: &dyn Sanitizer) -> PostDraft {
        PostDraft {
            title: self.title,
            image: self.image,
            body: self.body.map(|b| sanitizer.clean(&b)),
        }
    }
}

fn redirect(location: &str) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, location))
        .finish()
}

fn page(body: String) -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(body)
}

/// GET /
pub async fn root() -> HttpResponse {
    redirect("/blogs")
}

/// GET /blogs
pub async fn index(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts = match state.posts.find_all().await {
        Ok(posts) => posts,
        Err(e) => {
            // Degraded: render the index empty rather than failing the page.
            tracing::error!("Failed to load posts: {}", e);
            Vec::new()
        }
    };

    let html = state.templates.render("index.html", context! { posts })?;
    Ok(page(html))
}

/// GET /blogs/new
pub async fn new_form(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let html = state.templates.render("new.html", context! {})?;
    Ok(page(html))
}

/// POST /blogs
pub async fn create(
    state: web::Data<AppState>,
    form: web::Form<BlogForm>,
) -> AppResult<HttpResponse> {
    let draft = form.into_inner().into_draft(state.sanitizer.as_ref());

    match state.posts.insert(draft).await {
        Ok(post) => {
            tracing::info!(id = %post.id, "post created");
            Ok(redirect("/blogs"))
        }
        Err(e) => {
            // Back to an empty form; the submission is not preserved.
            tracing::error!("Failed to create post: {}", e);
            let html = state.templates.render("new.html", context! {})?;
            Ok(page(html))
        }
    }
}

/// GET /blogs/{id}
pub async fn show(state: web::Data<AppState>, path: web::Path<String>) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    match state.posts.find_by_id(&id).await {
        Ok(post) => {
            let html = state.templates.render("show.html", context! { post })?;
            Ok(page(html))
        }
        Err(e) => {
            tracing::warn!(id = %id, "post lookup failed: {}", e);
            Ok(redirect("/blogs"))
        }
    }
}

/// GET /blogs/{id}/edit
pub async fn edit_form(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    match state.posts.find_by_id(&id).await {
        Ok(post) => {
            let html = state.templates.render("edit.html", context! { post })?;
            Ok(page(html))
        }
        Err(e) => {
            tracing::warn!(id = %id, "post lookup failed: {}", e);
            Ok(redirect("/blogs"))
        }
    }
}

/// PUT /blogs/{id} (via method override on POST)
pub async fn update(
    state: web::Data<AppState>,
    path: web::Path<String>,
    form: web::Form<BlogForm>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let draft = form.into_inner().into_draft(state.sanitizer.as_ref());

    match state.posts.update(&id, draft).await {
        Ok(()) => {
            tracing::info!(id = %id, "post updated");
            Ok(redirect(&format!("/blogs/{id}")))
        }
        Err(e) => {
            tracing::error!(id = %id, "failed to update post: {}", e);
            Ok(redirect("/blogs"))
        }
    }
}

/// DELETE /blogs/{id} (via method override on POST)
pub async fn delete(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    match state.posts.delete(&id).await {
        Ok(()) => tracing::info!(id = %id, "post deleted"),
        Err(e) => tracing::error!(id = %id, "failed to delete post: {}", e),
    }
    Ok(redirect("/blogs"))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_http::Request;
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use async_trait::async_trait;

    use quill_core::domain::Post;
    use quill_core::error::StoreError;
    use quill_core::ports::PostStore;
    use quill_infra::{AmmoniaSanitizer, InMemoryPostStore};

    use super::*;
    use crate::middleware::method_override::MethodOverride;
    use crate::render::Templates;

    fn test_state(posts: Arc<dyn PostStore>) -> AppState {
        AppState {
            posts,
            sanitizer: Arc::new(AmmoniaSanitizer),
            templates: Arc::new(Templates::new().unwrap()),
        }
    }

    macro_rules! test_app {
        ($store:expr) => {
            test::init_service(
                App::new()
                    .wrap(MethodOverride)
                    .app_data(web::Data::new(test_state($store)))
                    .configure(crate::handlers::configure_routes),
            )
            .await
        };
    }

    fn location(res: &actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>) -> &str {
        res.headers()
            .get(header::LOCATION)
            .expect("missing Location header")
            .to_str()
            .unwrap()
    }

    fn post_form(uri: &str, payload: &'static str) -> Request {
        test::TestRequest::post()
            .uri(uri)
            .insert_header(ContentType::form_url_encoded())
            .set_payload(payload)
            .to_request()
    }

    async fn seed(store: &InMemoryPostStore) -> Post {
        store
            .insert(PostDraft {
                title: Some("First".to_string()),
                image: Some("http://x".to_string()),
                body: Some("hello".to_string()),
            })
            .await
            .unwrap()
    }

    /// Store that fails every operation, for the fallback paths.
    struct BrokenStore;

    #[async_trait]
    impl PostStore for BrokenStore {
        async fn find_all(&self) -> Result<Vec<Post>, StoreError> {
            Err(StoreError::Query("down".into()))
        }
        async fn find_by_id(&self, _id: &str) -> Result<Post, StoreError> {
            Err(StoreError::Query("down".into()))
        }
        async fn insert(&self, _draft: PostDraft) -> Result<Post, StoreError> {
            Err(StoreError::Query("down".into()))
        }
        async fn update(&self, _id: &str, _draft: PostDraft) -> Result<(), StoreError> {
            Err(StoreError::Query("down".into()))
        }
        async fn delete(&self, _id: &str) -> Result<(), StoreError> {
            Err(StoreError::Query("down".into()))
        }
    }

    #[actix_rt::test]
    async fn root_redirects_to_post_index() {
        let app = test_app!(Arc::new(InMemoryPostStore::new()));

        let res = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;

        assert_eq!(res.status(), StatusCode::FOUND);
        assert_eq!(location(&res), "/blogs");
    }

    #[actix_rt::test]
    async fn create_persists_title_and_image_verbatim() {
        let store = Arc::new(InMemoryPostStore::new());
        let app = test_app!(store.clone());

        let res = test::call_service(
            &app,
            post_form("/blogs", "blog[title]=A&blog[image]=http://x&blog[body]=hello"),
        )
        .await;

        assert_eq!(res.status(), StatusCode::FOUND);
        assert_eq!(location(&res), "/blogs");

        let all = store.find_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].title.as_deref(), Some("A"));
        assert_eq!(all[0].image.as_deref(), Some("http://x"));
        assert_eq!(all[0].body.as_deref(), Some("hello"));
    }

    #[actix_rt::test]
    async fn script_in_body_is_neutralized_before_storage() {
        let store = Arc::new(InMemoryPostStore::new());
        let app = test_app!(store.clone());

        test::call_service(
            &app,
            post_form("/blogs", "blog[title]=A&blog[body]=<script>bad()</script>hello"),
        )
        .await;

        let all = store.find_all().await.unwrap();
        let body = all[0].body.as_deref().unwrap();
        assert!(!body.contains("<script>"));
        assert!(body.contains("hello"));
    }

    #[actix_rt::test]
    async fn index_lists_created_posts() {
        let store = Arc::new(InMemoryPostStore::new());
        seed(&store).await;
        let app = test_app!(store.clone());

        let res =
            test::call_service(&app, test::TestRequest::get().uri("/blogs").to_request()).await;
        assert_eq!(res.status(), StatusCode::OK);

        let body = test::read_body(res).await;
        let text = std::str::from_utf8(&body).unwrap();
        assert!(text.contains("First"));
    }

    #[actix_rt::test]
    async fn index_renders_empty_when_the_store_is_down() {
        let app = test_app!(Arc::new(BrokenStore));

        let res =
            test::call_service(&app, test::TestRequest::get().uri("/blogs").to_request()).await;
        assert_eq!(res.status(), StatusCode::OK);

        let body = test::read_body(res).await;
        assert!(std::str::from_utf8(&body).unwrap().contains("No posts yet"));
    }

    #[actix_rt::test]
    async fn show_renders_the_post() {
        let store = Arc::new(InMemoryPostStore::new());
        let post = seed(&store).await;
        let app = test_app!(store.clone());

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri(&format!("/blogs/{}", post.id))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);

        let body = test::read_body(res).await;
        let text = std::str::from_utf8(&body).unwrap();
        assert!(text.contains("First"));
        assert!(text.contains("hello"));
    }

    #[actix_rt::test]
    async fn show_unknown_id_redirects_to_index() {
        let app = test_app!(Arc::new(InMemoryPostStore::new()));

        let res = test::call_service(
            &app,
            test::TestRequest::get().uri("/blogs/missing").to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::FOUND);
        assert_eq!(location(&res), "/blogs");
    }

    #[actix_rt::test]
    async fn show_redirects_when_the_store_is_down() {
        let app = test_app!(Arc::new(BrokenStore));

        let res = test::call_service(
            &app,
            test::TestRequest::get().uri("/blogs/any").to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::FOUND);
        assert_eq!(location(&res), "/blogs");
    }

    #[actix_rt::test]
    async fn failed_create_re_renders_the_empty_form() {
        let app = test_app!(Arc::new(BrokenStore));

        let res = test::call_service(&app, post_form("/blogs", "blog[title]=A&blog[body]=x")).await;

        assert_eq!(res.status(), StatusCode::OK);
        let body = test::read_body(res).await;
        let text = std::str::from_utf8(&body).unwrap();
        assert!(text.contains("blog[title]"));
        // The submission is not preserved.
        assert!(!text.contains("value=\"A\""));
    }

    #[actix_rt::test]
    async fn edit_form_unknown_id_redirects_to_index() {
        let app = test_app!(Arc::new(InMemoryPostStore::new()));

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/blogs/missing/edit")
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::FOUND);
        assert_eq!(location(&res), "/blogs");
    }

    #[actix_rt::test]
    async fn update_via_method_override_preserves_id_and_created() {
        let store = Arc::new(InMemoryPostStore::new());
        let post = seed(&store).await;
        let app = test_app!(store.clone());

        let res = test::call_service(
            &app,
            post_form(
                &format!("/blogs/{}?_method=PUT", post.id),
                "blog[title]=Second&blog[image]=http://x&blog[body]=world",
            ),
        )
        .await;

        assert_eq!(res.status(), StatusCode::FOUND);
        assert_eq!(location(&res), format!("/blogs/{}", post.id));

        let updated = store.find_by_id(&post.id).await.unwrap();
        assert_eq!(updated.title.as_deref(), Some("Second"));
        assert_eq!(updated.body.as_deref(), Some("world"));
        assert_eq!(updated.id, post.id);
        assert_eq!(updated.created, post.created);
    }

    #[actix_rt::test]
    async fn update_with_empty_body_stores_sanitized_empty() {
        let store = Arc::new(InMemoryPostStore::new());
        let post = seed(&store).await;
        let app = test_app!(store.clone());

        test::call_service(
            &app,
            post_form(
                &format!("/blogs/{}?_method=PUT", post.id),
                "blog[title]=First&blog[body]=",
            ),
        )
        .await;

        let updated = store.find_by_id(&post.id).await.unwrap();
        assert_eq!(updated.body.as_deref(), Some(""));
        assert_eq!(updated.created, post.created);
    }

    #[actix_rt::test]
    async fn failed_update_redirects_to_index() {
        let app = test_app!(Arc::new(BrokenStore));

        let res = test::call_service(
            &app,
            post_form("/blogs/any?_method=PUT", "blog[title]=Second"),
        )
        .await;

        assert_eq!(res.status(), StatusCode::FOUND);
        assert_eq!(location(&res), "/blogs");
    }

    #[actix_rt::test]
    async fn delete_via_method_override_then_show_redirects() {
        let store = Arc::new(InMemoryPostStore::new());
        let post = seed(&store).await;
        let app = test_app!(store.clone());

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri(&format!("/blogs/{}?_method=DELETE", post.id))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::FOUND);
        assert_eq!(location(&res), "/blogs");

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri(&format!("/blogs/{}", post.id))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::FOUND);
        assert_eq!(location(&res), "/blogs");
    }

    #[actix_rt::test]
    async fn post_without_a_recognized_override_is_not_routed() {
        let store = Arc::new(InMemoryPostStore::new());
        let post = seed(&store).await;
        let app = test_app!(store.clone());

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri(&format!("/blogs/{}?_method=PATCH", post.id))
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }
}
