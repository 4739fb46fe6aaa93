//! API endpoints.

mod applications;
mod auth;
mod favorites;
mod locations;
mod pets;
mod users;

use axum::Router;

use crate::middleware::AppState;

/// Create the API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/users", users::router())
        .nest("/locations", locations::router())
        .nest("/pets", pets::router())
        .nest("/applications", applications::router())
        .nest("/favorites", favorites::router())
}
