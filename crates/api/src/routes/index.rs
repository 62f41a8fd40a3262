//! Input form page

use axum::response::Html;

/// Form page; it reads the field catalog from `/api/v1/fields`
pub async fn index() -> Html<&'static str> {
    Html(include_str!("../../static/index.html"))
}
