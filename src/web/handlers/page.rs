//! Front page handler.

use axum::response::Html;

/// Page shell. The file list is filled in client-side from `/files`.
const INDEX_HTML: &str = include_str!("../../../assets/index.html");

/// GET / - Upload page.
#[utoipa::path(
    get,
    path = "/",
    tag = "page",
    responses(
        (status = 200, description = "Upload page", content_type = "text/html")
    )
)]
pub async fn index_page() -> Html<&'static str> {
    Html(INDEX_HTML)
}
