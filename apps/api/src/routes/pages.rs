use axum::response::Html;

/// GET /
/// Serves the single-page evaluation form. The page posts the resume and
/// job description to /evaluate and renders the returned report.
pub async fn index_handler() -> Html<&'static str> {
    Html(include_str!("../../static/index.html"))
}
