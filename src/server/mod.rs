//! Viewer web server: static page plus the parcel API.

pub mod routes;
pub mod state;

use axum::routing::get;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

pub use state::AppState;

/// Directory with the page assets: `STATIC_DIR` at runtime, the crate's
/// `static/` otherwise.
pub fn static_dir() -> String {
    std::env::var("STATIC_DIR")
        .unwrap_or_else(|_| format!("{}/static", env!("CARGO_MANIFEST_DIR")))
}

/// Assemble the router.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(routes::serve_index))
        .route("/api/config", get(routes::viewer_config))
        .route("/api/parcel/at-point", get(routes::parcel_at_point))
        .route("/api/parcel/:object_id", get(routes::parcel_select))
        .route("/api/parcels/search", get(routes::owner_search))
        .nest_service("/static", ServeDir::new(static_dir()))
        .with_state(state)
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()).layer(cors))
}
