use crate::constants::{APP_JS, INDEX_HTML};
use axum::{
    http::header,
    response::{Html, IntoResponse},
};

/// Landing page.
pub async fn index() -> impl IntoResponse {
    Html(INDEX_HTML)
}

pub async fn app_js() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/javascript; charset=utf-8")],
        APP_JS,
    )
}
