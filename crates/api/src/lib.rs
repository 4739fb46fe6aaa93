//! HTTP API layer for the pet adoption backend.
//!
//! - **Endpoints**: auth, users, locations, pets, applications, favorites
//! - **Extractors**: authenticated-user extraction from request extensions
//! - **Middleware**: session-cookie authentication
//!
//! Built on Axum 0.8 with Tower middleware stack.

pub mod endpoints;
pub mod extractors;
pub mod middleware;
pub mod response;

pub use endpoints::router;
pub use middleware::AppState;
