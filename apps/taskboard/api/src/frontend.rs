//! The single-page task board served at `/`.
//!
//! The page learns where the API lives from `window.APP_URL`, which is
//! written into the HTML once when the router is built.

use axum::{
    Router,
    extract::State,
    http::header,
    response::{Html, IntoResponse},
    routing::get,
};
use std::sync::Arc;

const INDEX_HTML: &str = include_str!("../assets/index.html");
const APP_JS: &str = include_str!("../assets/app.js");
const APP_URL_PLACEHOLDER: &str = "<!-- APP_URL -->";

/// `<script>` tag assigning `app_url` to `window.APP_URL`.
///
/// The value is emitted as a JSON string literal with `</` escaped so it
/// cannot close the script element early.
fn app_url_script(app_url: &str) -> Result<String, serde_json::Error> {
    let literal = serde_json::to_string(app_url)?.replace("</", "<\\/");
    Ok(format!("<script>window.APP_URL = {};</script>", literal))
}

pub fn render_index(app_url: &str) -> Result<String, serde_json::Error> {
    Ok(INDEX_HTML.replace(APP_URL_PLACEHOLDER, &app_url_script(app_url)?))
}

/// `GET /` and `GET /assets/app.js`
pub fn router(app_url: &str) -> eyre::Result<Router> {
    let page: Arc<str> = render_index(app_url)?.into();

    Ok(Router::new()
        .route("/", get(index))
        .route("/assets/app.js", get(app_js))
        .with_state(page))
}

async fn index(State(page): State<Arc<str>>) -> Html<String> {
    Html(page.to_string())
}

async fn app_js() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/javascript; charset=utf-8")],
        APP_JS,
    )
}
