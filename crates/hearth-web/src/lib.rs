//! Landing page and static assets, embedded into the binary at build time.

use axum::{
    extract::Path,
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use rust_embed::RustEmbed;
use serde::Serialize;

#[derive(RustEmbed)]
#[folder = "frontend/"]
struct Assets;

/// Files the landing page needs to work.
pub const EXPECTED_ASSETS: [&str; 3] = ["index.html", "script.js", "style.css"];

/// Presence and size of one expected asset.
#[derive(Debug, Clone, Serialize)]
pub struct AssetStatus {
    pub name: String,
    pub exists: bool,
    pub size_bytes: Option<usize>,
}

/// Names of all embedded assets, sorted.
pub fn asset_names() -> Vec<String> {
    let mut names: Vec<String> = Assets::iter().map(|n| n.into_owned()).collect();
    names.sort();
    names
}

pub fn asset_status() -> Vec<AssetStatus> {
    EXPECTED_ASSETS
        .iter()
        .map(|name| {
            let size = Assets::get(name).map(|f| f.data.len());
            AssetStatus {
                name: name.to_string(),
                exists: size.is_some(),
                size_bytes: size,
            }
        })
        .collect()
}

/// `GET /` - the landing page.
pub async fn index() -> Response {
    match Assets::get("index.html") {
        Some(file) => Html(file.data.into_owned()).into_response(),
        None => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Html("<html><body><h1>Error</h1><p>index.html is not embedded</p></body></html>"),
        )
            .into_response(),
    }
}

/// `GET /static/{*path}` - one embedded asset.
pub async fn static_asset(Path(path): Path<String>) -> Response {
    let path = path.trim_start_matches('/');
    let Some(file) = Assets::get(path) else {
        return (StatusCode::NOT_FOUND, "asset not found").into_response();
    };

    let mime = mime_guess::from_path(path).first_or_octet_stream();
    (
        [(header::CONTENT_TYPE, mime.as_ref().to_string())],
        file.data.into_owned(),
    )
        .into_response()
}

/// Routes for the landing page, mergeable into any app router.
pub fn router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/", get(index))
        .route("/static/{*path}", get(static_asset))
}
