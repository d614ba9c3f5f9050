//! Application-level error type.
//!
//! Store failures never reach this type: handlers map them to fixed
//! fallback responses on the spot. The only error a handler can bubble up
//! is a template render failure, which cannot be caused by user input.

use actix_web::{HttpResponse, ResponseError, http::StatusCode, http::header::ContentType};
use thiserror::Error;

use crate::render::RenderError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("render failed: {0}")]
    Render(#[from] RenderError),
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    fn error_response(&self) -> HttpResponse {
        tracing::error!("Internal error: {}", self);
        HttpResponse::build(self.status_code())
            .content_type(ContentType::html())
            .body("<h1>Internal Server Error</h1>")
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;
