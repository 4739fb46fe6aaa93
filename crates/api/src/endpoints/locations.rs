//! Shelter location endpoints.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use petgallery_common::AppResult;
use petgallery_core::services::location::CreateLocationInput;
use petgallery_db::entities::location;

use crate::{middleware::AppState, response::ApiResponse};

/// List all locations.
async fn list(State(state): State<AppState>) -> AppResult<ApiResponse<Vec<location::Model>>> {
    let locations = state.location_service.list().await?;
    Ok(ApiResponse::ok(locations))
}

/// Fetch one location.
async fn get_location(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<location::Model>> {
    let location = state.location_service.get(&id).await?;
    Ok(ApiResponse::ok(location))
}

/// Create a location.
async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateLocationInput>,
) -> AppResult<ApiResponse<location::Model>> {
    let location = state.location_service.create(input).await?;
    Ok(ApiResponse::ok(location))
}

/// Create the locations router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/{id}", get(get_location))
}
