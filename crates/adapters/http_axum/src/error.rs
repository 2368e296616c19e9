//! Responses for requests no page answers.

use askama::Template;
use axum::http::{StatusCode, Uri};
use axum::response::{Html, IntoResponse, Response};

/// Not-found page template.
#[derive(Template)]
#[template(path = "not_found.html")]
pub struct NotFoundTemplate {
    refresh_seconds: Option<u64>,
    path: String,
}

impl IntoResponse for NotFoundTemplate {
    fn into_response(self) -> Response {
        (StatusCode::NOT_FOUND, Html(self.to_string())).into_response()
    }
}

/// Router fallback.
pub async fn not_found(uri: Uri) -> NotFoundTemplate {
    tracing::debug!(%uri, "no route");
    NotFoundTemplate {
        refresh_seconds: None,
        path: uri.path().to_string(),
    }
}
