use axum::http::Method;
use tower_http::cors::{Any, CorsLayer};

/// Any origin, GET and POST only, no credentials.
pub fn permissive_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any)
        .allow_origin(Any)
}
