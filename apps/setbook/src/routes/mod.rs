pub mod health;
pub mod preview;

use axum::{
    http::{header, HeaderValue},
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;

use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    // Generated files change under the browser; never let it cache them.
    let output = ServiceBuilder::new()
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-store, no-cache, must-revalidate"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::PRAGMA,
            HeaderValue::from_static("no-cache"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::EXPIRES,
            HeaderValue::from_static("0"),
        ))
        .service(ServeDir::new(&state.config.output_dir));

    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/v1/layout/:year/:month/:day",
            get(preview::handle_layout_report),
        )
        .route("/api/v1/regenerate", post(preview::handle_regenerate))
        .nest_service("/output", output)
        .with_state(state)
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
