//! Router assembly.

use std::path::Path;
use std::sync::Arc;

use axum::{routing::get, Router};
use engine_logging::engine_info;
use giftscan_engine::QueryPipeline;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;

use crate::routes;

#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<QueryPipeline>,
    pub default_limit: usize,
}

impl AppState {
    pub fn new(pipeline: QueryPipeline, default_limit: usize) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
            default_limit,
        }
    }
}

/// - `GET /api/gifts` - filtered owner listing for a model and id range
/// - `GET /ping` - liveness probe
/// - everything else - files under `static_dir`, if it exists
pub fn create_router(state: AppState, static_dir: Option<&Path>) -> Router {
    let router = Router::new()
        .route("/api/gifts", get(routes::list_gifts))
        .route("/ping", get(routes::ping))
        .with_state(state);

    let router = match static_dir {
        Some(dir) if dir.is_dir() => {
            engine_info!("Serving static files from {:?}", dir);
            router.fallback_service(ServeDir::new(dir))
        }
        _ => router,
    };

    router.layer(
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
    )
}
