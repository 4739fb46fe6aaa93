//! User management endpoints.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use petgallery_common::AppResult;
use petgallery_core::{
    policy,
    services::user::{CreateUserInput, UpdateUserInput},
};

use crate::{
    endpoints::auth::UserResponse, extractors::AuthUser, middleware::AppState,
    response::ApiResponse,
};

/// List all users. Admin only.
async fn list(
    AuthUser(actor): AuthUser,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<UserResponse>>> {
    let users = state.user_service.list(&actor).await?;
    Ok(ApiResponse::ok(users.into_iter().map(Into::into).collect()))
}

/// Fetch one user. Owner or admin only.
async fn get_user(
    AuthUser(actor): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<UserResponse>> {
    policy::ensure_owner_or_admin(&actor, &id)?;
    let user = state.user_service.get(&id).await?;
    Ok(ApiResponse::ok(user.into()))
}

/// Create a user. Admin only.
async fn create(
    AuthUser(actor): AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateUserInput>,
) -> AppResult<ApiResponse<UserResponse>> {
    let user = state.user_service.create(&actor, input).await?;
    Ok(ApiResponse::ok(user.into()))
}

/// Update a user. Owner or admin only.
async fn update(
    AuthUser(actor): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<UpdateUserInput>,
) -> AppResult<ApiResponse<UserResponse>> {
    let user = state.user_service.update(&actor, &id, input).await?;
    Ok(ApiResponse::ok(user.into()))
}

/// Delete a user and everything they own. Admin only.
async fn delete(
    AuthUser(actor): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<()>> {
    state.user_service.delete(&actor, &id).await?;
    Ok(ApiResponse::ok(()))
}

/// Create the users router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/{id}", get(get_user).put(update).delete(delete))
}
