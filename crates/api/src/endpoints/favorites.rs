//! Favorites endpoints.
//!
//! Every route acts on the authenticated user's own list; there is no
//! admin override here.

use axum::{
    Router,
    extract::{Path, State},
    routing::{get, post},
};
use petgallery_common::AppResult;
use petgallery_db::entities::{favorite, pet};
use serde::Serialize;

use crate::{extractors::AuthUser, middleware::AppState, response::ApiResponse};

/// Whether a pet is in the user's favorites.
#[derive(Debug, Serialize)]
pub struct FavoritedResponse {
    pub is_favorited: bool,
}

/// The bare IDs of the user's favorited pets.
#[derive(Debug, Serialize)]
pub struct FavoriteIdsResponse {
    pub pet_ids: Vec<String>,
}

/// List the user's favorited pets, most recent first.
async fn list(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<pet::Model>>> {
    let pets = state.favorite_service.list_pets(&user.id).await?;
    Ok(ApiResponse::ok(pets))
}

/// List just the IDs of the user's favorited pets.
async fn list_ids(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<FavoriteIdsResponse>> {
    let pet_ids = state.favorite_service.list_pet_ids(&user.id).await?;
    Ok(ApiResponse::ok(FavoriteIdsResponse { pet_ids }))
}

/// Check whether the user has favorited a pet.
async fn check(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(pet_id): Path<String>,
) -> AppResult<ApiResponse<FavoritedResponse>> {
    let is_favorited = state.favorite_service.is_favorited(&user.id, &pet_id).await?;
    Ok(ApiResponse::ok(FavoritedResponse { is_favorited }))
}

/// Add a pet to the user's favorites.
async fn add(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(pet_id): Path<String>,
) -> AppResult<ApiResponse<favorite::Model>> {
    let favorite = state.favorite_service.add(&user.id, &pet_id).await?;
    Ok(ApiResponse::ok(favorite))
}

/// Remove a pet from the user's favorites.
async fn remove(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(pet_id): Path<String>,
) -> AppResult<ApiResponse<()>> {
    state.favorite_service.remove(&user.id, &pet_id).await?;
    Ok(ApiResponse::ok(()))
}

/// Create the favorites router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list))
        .route("/list-ids", get(list_ids))
        .route("/check/{pet_id}", get(check))
        .route("/{pet_id}", post(add).delete(remove))
}
