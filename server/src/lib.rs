//! NetGrid change feed server.
//!
//! Serves the authoritative device collection over HTTP:
//!
//! - `GET /collection` - full bootstrap load
//! - `GET /collection/changes/since/{timestamp}` - incremental changes
//! - `POST /collection` - device registration/update (drives the feed)
//! - `GET /health` - liveness
//!
//! The store is in-memory; the sync contract (superset change windows,
//! graceful degradation on unparseable cursors, cacheable responses) lives
//! in [`handlers`] and [`store`].

pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod store;

use crate::store::DeviceStore;
use axum::Router;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<DeviceStore>,
}

/// Build the application router with tracing and CORS layers.
pub fn app(state: AppState) -> Router {
    routes::create_routes()
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
