// Site-internal static assets, compiled into the binary

use axum::{
    http::{header, HeaderValue},
    response::IntoResponse,
};

const STYLESHEET: &str = include_str!("../assets/site.css");
const WIDGET_SCRIPT: &str = include_str!("../assets/widget.js");
const CACHE_CONTROL: &str = "public, max-age=3600";

/// GET /_assets/site.css
pub async fn stylesheet() -> impl IntoResponse {
    (
        [
            (header::CONTENT_TYPE, HeaderValue::from_static("text/css; charset=utf-8")),
            (header::CACHE_CONTROL, HeaderValue::from_static(CACHE_CONTROL)),
        ],
        STYLESHEET,
    )
}

/// GET /_assets/widget.js
pub async fn widget_script() -> impl IntoResponse {
    (
        [
            (
                header::CONTENT_TYPE,
                HeaderValue::from_static("text/javascript; charset=utf-8"),
            ),
            (header::CACHE_CONTROL, HeaderValue::from_static(CACHE_CONTROL)),
        ],
        WIDGET_SCRIPT,
    )
}
