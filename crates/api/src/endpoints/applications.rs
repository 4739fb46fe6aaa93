//! Adoption application endpoints.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};
use petgallery_common::AppResult;
use petgallery_core::services::application::{
    ApplicationFilter, CreateApplicationInput, ReviewApplicationInput,
};
use petgallery_db::{
    entities::application::{self, ApplicationStatus},
    repositories::{ApplicationDetails, StatusCounts},
};
use serde::Deserialize;

use crate::{extractors::AuthUser, middleware::AppState, response::ApiResponse};

/// Listing filters. The `user_id` filter only takes effect for admins.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub user_id: Option<String>,
    pub status: Option<ApplicationStatus>,
}

/// Submit an application.
async fn create(
    AuthUser(actor): AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateApplicationInput>,
) -> AppResult<ApiResponse<application::Model>> {
    let app = state.application_service.create(&actor, input).await?;
    Ok(ApiResponse::ok(app))
}

/// List applications with applicant and pet details.
async fn list(
    AuthUser(actor): AuthUser,
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> AppResult<ApiResponse<Vec<ApplicationDetails>>> {
    let filter = ApplicationFilter {
        user_id: query.user_id,
        status: query.status,
    };
    let apps = state.application_service.list(&actor, &filter).await?;
    Ok(ApiResponse::ok(apps))
}

/// Per-status application counts. Admin only.
async fn stats(
    AuthUser(actor): AuthUser,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<StatusCounts>> {
    let counts = state.application_service.stats(&actor).await?;
    Ok(ApiResponse::ok(counts))
}

/// Fetch one application. Owner or admin only.
async fn get_application(
    AuthUser(actor): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<ApplicationDetails>> {
    let details = state.application_service.get(&actor, &id).await?;
    Ok(ApiResponse::ok(details))
}

/// Review an application or edit its notes. Admin only.
async fn review(
    AuthUser(actor): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<ReviewApplicationInput>,
) -> AppResult<ApiResponse<application::Model>> {
    let app = state.application_service.review(&actor, &id, input).await?;
    Ok(ApiResponse::ok(app))
}

/// Withdraw or remove an application. Owner or admin only.
async fn delete(
    AuthUser(actor): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<()>> {
    state.application_service.delete(&actor, &id).await?;
    Ok(ApiResponse::ok(()))
}

/// Create the applications router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/stats", get(stats))
        .route("/{id}", get(get_application).patch(review).delete(delete))
}
