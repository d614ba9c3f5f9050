//! HTTP handlers and route configuration.

mod blogs;

use actix_web::web;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(blogs::root)).service(
        web::scope("/blogs")
            .route("", web::get().to(blogs::index))
            .route("", web::post().to(blogs::create))
            .route("/new", web::get().to(blogs::new_form))
            .route("/{id}", web::get().to(blogs::show))
            .route("/{id}", web::put().to(blogs::update))
            .route("/{id}", web::delete().to(blogs::delete))
            .route("/{id}/edit", web::get().to(blogs::edit_form)),
    );
}
