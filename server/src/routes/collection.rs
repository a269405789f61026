//! Collection and change feed routes.

use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use netgrid_engine::Device;

use crate::error::{AppError, Result};
use crate::handlers;
use crate::store::DeviceUpsert;
use crate::AppState;

/// Create collection routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/collection", get(list_collection).post(upsert_device))
        .route(
            "/collection/changes/since/{timestamp}",
            get(collection_changes),
        )
}

/// GET /collection - full bootstrap load.
async fn list_collection(State(state): State<AppState>) -> Json<Vec<Device>> {
    Json(handlers::full_collection(&state.store))
}

/// GET /collection/changes/since/{timestamp} - incremental changes.
///
/// A malformed timestamp is answered with a full resync, not an error.
async fn collection_changes(
    State(state): State<AppState>,
    Path(timestamp): Path<String>,
) -> impl IntoResponse {
    let set = handlers::changes_since(&state.store, &timestamp);
    (
        [(header::CACHE_CONTROL, handlers::CHANGES_CACHE_CONTROL)],
        Json(set),
    )
}

/// POST /collection - register or update a device.
async fn upsert_device(
    State(state): State<AppState>,
    Json(request): Json<DeviceUpsert>,
) -> Result<Json<Device>> {
    if request.ip_address.trim().is_empty() {
        return Err(AppError::BadRequest("ip_address is required".to_string()));
    }
    let device = state.store.upsert(request)?;
    Ok(Json(device))
}
