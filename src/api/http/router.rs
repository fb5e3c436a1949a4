// src/api/http/router.rs
// HTTP router composition: routes, CORS, request tracing, version header

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;
use tracing::warn;

use super::{
    chat::chat_handler,
    handlers::{health_handler, home_handler},
    quotes::motivational_quotes_handler,
    session::{clear_handler, session_info_handler},
};
use crate::state::AppState;

pub const API_VERSION: &str = "1.0.0";

/// Any origin when `allowed_origins` is empty. An explicit list also
/// allows credentials so the session cookie survives cross-origin calls.
fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    if allowed_origins.is_empty() {
        return cors.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    cors.allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
}

/// Create the router with all endpoints
pub fn create_router(app_state: Arc<AppState>, allowed_origins: &[String]) -> Router {
    let version_header = SetResponseHeaderLayer::if_not_present(
        header::HeaderName::from_static("x-api-version"),
        HeaderValue::from_static(API_VERSION),
    );

    Router::new()
        // Metadata
        .route("/", get(home_handler))
        .route("/health", get(health_handler))

        // Quotes
        .route("/motivational-quotes", post(motivational_quotes_handler))

        // Chat and session bookkeeping
        .route("/chat", post(chat_handler))
        .route("/clear", post(clear_handler))
        .route("/session-info", get(session_info_handler))

        .layer(version_header)
        .layer(cors_layer(allowed_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_origins_are_skipped() {
        // Must not panic on a bad header value
        let _ = cors_layer(&["https://ok.example".to_string(), "bad\norigin".to_string()]);
        let _ = cors_layer(&[]);
    }
}
