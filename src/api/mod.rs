//! API module for handling HTTP requests and responses

#[cfg(feature = "api")]
pub(crate) mod extract;
#[cfg(feature = "api")]
pub(crate) mod handlers;
/// Response bodies of the API routes.
#[cfg(feature = "api")]
pub mod responses;

#[cfg(feature = "api")]
use axum::{routing::get, Json, Router};
#[cfg(feature = "api")]
use std::sync::Arc;
#[cfg(feature = "api")]
use tower::ServiceBuilder;
#[cfg(feature = "api")]
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

#[cfg(feature = "api")]
use crate::{build_info, state::AppState};

#[cfg(feature = "api")]
pub(crate) use handlers::*;

#[cfg(feature = "api")]
/// Create the application router with all routes
///
/// Genius routes are served both at the root and under `/genius`.
pub fn create_router() -> Router<Arc<AppState>> {
    // Configure CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_check))
        // Genius
        .route("/:id/lyrics", get(get_lyrics))
        .route("/search", get(search_songs))
        .route("/genius/:id/lyrics", get(get_lyrics))
        .route("/genius/search", get(search_songs))
        // AZLyrics
        .route("/azlyrics/search", get(azlyrics_search))
        .route("/azlyrics/lyrics", get(azlyrics_lyrics))
        .fallback(not_found)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id()),
        )
        .layer(cors)
}

#[cfg(feature = "api")]
/// Health check endpoint
pub async fn health_check() -> Json<responses::HealthResponse> {
    Json(responses::HealthResponse {
        status: "OK",
        version: build_info::PKG_VERSION,
        built_at: build_info::BUILT_TIME_UTC,
    })
}
