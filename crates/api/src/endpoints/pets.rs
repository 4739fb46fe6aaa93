//! Pet catalogue endpoints.

use axum::{
    Json, Router,
    extract::{Multipart, Path, Query, State},
    routing::{get, post},
};
use petgallery_common::{AppError, AppResult};
use petgallery_core::services::pet::{CreatePetInput, ListPetsQuery, UpdatePetInput};
use petgallery_db::entities::pet;

use crate::{extractors::AuthUser, middleware::AppState, response::ApiResponse};

/// List pets matching the query filters.
async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListPetsQuery>,
) -> AppResult<ApiResponse<Vec<pet::Model>>> {
    let pets = state.pet_service.list(&query).await?;
    Ok(ApiResponse::ok(pets))
}

/// Fetch one pet.
async fn get_pet(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<pet::Model>> {
    let pet = state.pet_service.get(&id).await?;
    Ok(ApiResponse::ok(pet))
}

/// Submit a pet listing.
async fn create(
    AuthUser(_actor): AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreatePetInput>,
) -> AppResult<ApiResponse<pet::Model>> {
    let pet = state.pet_service.create(input).await?;
    Ok(ApiResponse::ok(pet))
}

/// Update a pet. Admin only.
async fn update(
    AuthUser(actor): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<UpdatePetInput>,
) -> AppResult<ApiResponse<pet::Model>> {
    let pet = state.pet_service.update(&actor, &id, input).await?;
    Ok(ApiResponse::ok(pet))
}

/// Delete a pet together with its applications and favorites. Admin only.
async fn delete(
    AuthUser(actor): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<()>> {
    state.pet_service.delete(&actor, &id).await?;
    Ok(ApiResponse::ok(()))
}

/// Photo upload result.
#[derive(Debug, serde::Serialize)]
pub struct PhotoResponse {
    pub photo_url: String,
}

/// Upload a photo for a pet.
async fn upload_photo(
    AuthUser(_actor): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    mut multipart: Multipart,
) -> AppResult<ApiResponse<PhotoResponse>> {
    // Resolve the pet before writing anything to storage; a 404 must not
    // leave an orphaned file in the upload directory.
    state.pet_service.get(&id).await?;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart body: {e}")))?
    {
        if field.name() == Some("file") {
            let filename = field.file_name().unwrap_or("upload").to_string();
            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(format!("Failed to read upload: {e}")))?;

            let stored = state.media_service.store_photo(&filename, &data).await?;
            let pet = state.pet_service.attach_photo(&id, &stored.url).await?;
            return Ok(ApiResponse::ok(PhotoResponse {
                photo_url: pet.photo_url.unwrap_or(stored.url),
            }));
        }
    }

    Err(AppError::BadRequest("Missing 'file' field".to_string()))
}

/// Create the pets router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/{id}", get(get_pet).patch(update).delete(delete))
        .route("/{id}/photo", post(upload_photo))
}
