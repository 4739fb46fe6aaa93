//! API integration tests.
//!
//! These tests verify routing, authentication middleware and the cookie
//! contract against a mock database.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
    middleware,
};
use chrono::Utc;
use petgallery_api::{middleware::AppState, router as api_router};
use petgallery_common::{LocalStorage, SessionSigner};
use petgallery_core::services::{
    ApplicationService, FavoriteService, LocationService, MediaService, PetService, UserService,
};
use petgallery_db::{
    entities::{pet, user},
    repositories::{
        ApplicationRepository, FavoriteRepository, LocationRepository, PetRepository,
        UserRepository,
    },
};
use sea_orm::{DatabaseBackend, MockDatabase};
use std::sync::Arc;
use tower::ServiceExt;

fn make_user(id: &str) -> user::Model {
    user::Model {
        id: id.to_string(),
        email: format!("{id}@example.com"),
        password_hash: "$argon2id$fake".to_string(),
        display_name: "Test User".to_string(),
        is_admin: false,
        created_at: Utc::now().into(),
    }
}

fn make_pet(id: &str) -> pet::Model {
    pet::Model {
        id: id.to_string(),
        name: "Max".to_string(),
        species: "dog".to_string(),
        age: 3,
        description: None,
        photo_url: None,
        location_id: "loc1".to_string(),
        status: pet::PetStatus::Approved,
    }
}

/// Build an app backed by the given mock database.
fn create_test_app(db: MockDatabase) -> Router {
    create_test_app_with_uploads(db, std::env::temp_dir().join("petgallery-api-test"))
}

/// Build an app with a dedicated upload directory.
fn create_test_app_with_uploads(db: MockDatabase, upload_dir: std::path::PathBuf) -> Router {
    let db = Arc::new(db.into_connection());

    let user_repo = UserRepository::new(Arc::clone(&db));
    let location_repo = LocationRepository::new(Arc::clone(&db));
    let pet_repo = PetRepository::new(Arc::clone(&db));
    let application_repo = ApplicationRepository::new(Arc::clone(&db));
    let favorite_repo = FavoriteRepository::new(Arc::clone(&db));

    let storage = Arc::new(LocalStorage::new(upload_dir, "/uploads".to_string()));

    let state = AppState {
        user_service: UserService::new(user_repo),
        location_service: LocationService::new(location_repo.clone()),
        pet_service: PetService::new(pet_repo.clone(), location_repo),
        application_service: ApplicationService::new(application_repo, pet_repo.clone()),
        favorite_service: FavoriteService::new(favorite_repo, pet_repo),
        media_service: MediaService::new(storage, 1024 * 1024),
        oauth_service: None,
        session: SessionSigner::new("integration-test-secret", 604_800).unwrap(),
        frontend_url: "http://localhost:5173".to_string(),
    };

    api_router()
        .layer(middleware::from_fn_with_state(
            state.clone(),
            petgallery_api::middleware::auth_middleware,
        ))
        .with_state(state)
}

fn session_token() -> String {
    SessionSigner::new("integration-test-secret", 604_800)
        .unwrap()
        .issue("user1")
        .unwrap()
}

#[tokio::test]
async fn test_unknown_endpoint_returns_404() {
    let app = create_test_app(MockDatabase::new(DatabaseBackend::Postgres));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/nonexistent")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_me_without_cookie_returns_401() {
    let app = create_test_app(MockDatabase::new(DatabaseBackend::Postgres));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/auth/me")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_me_with_valid_cookie_returns_user() {
    let app = create_test_app(
        MockDatabase::new(DatabaseBackend::Postgres).append_query_results([[make_user("user1")]]),
    );

    let response = app
        .oneshot(
            Request::builder()
                .uri("/auth/me")
                .header(header::COOKIE, format!("session={}", session_token()))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_me_with_tampered_cookie_returns_401() {
    let app = create_test_app(MockDatabase::new(DatabaseBackend::Postgres));

    let mut token = session_token();
    token.push('x');
    let response = app
        .oneshot(
            Request::builder()
                .uri("/auth/me")
                .header(header::COOKIE, format!("session={token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_clears_session_cookie() {
    let app = create_test_app(MockDatabase::new(DatabaseBackend::Postgres));

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/auth/logout")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap();
    assert!(set_cookie.starts_with("session="));
    assert!(set_cookie.contains("Max-Age=0"));
}

#[tokio::test]
async fn test_login_unknown_email_returns_401() {
    let app = create_test_app(
        MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<user::Model>::new()]),
    );

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/auth/login")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    r#"{"email":"ghost@example.com","password":"password123"}"#,
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_pets_listing_is_public() {
    let app = create_test_app(
        MockDatabase::new(DatabaseBackend::Postgres).append_query_results([[make_pet("pet1")]]),
    );

    let response = app
        .oneshot(Request::builder().uri("/pets").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_favorites_require_auth() {
    let app = create_test_app(MockDatabase::new(DatabaseBackend::Postgres));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/favorites")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_register_logs_the_new_account_in() {
    let app = create_test_app(
        MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<user::Model>::new()])
            .append_query_results([[make_user("user1")]])
            .append_exec_results([sea_orm::MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }]),
    );

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/auth/register")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    r#"{"email":"user1@example.com","password":"password123","display_name":"Test User"}"#,
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap();
    assert!(set_cookie.starts_with("session="));
    assert!(set_cookie.contains("HttpOnly"));
}

#[tokio::test]
async fn test_register_with_invalid_payload_returns_422() {
    let app = create_test_app(MockDatabase::new(DatabaseBackend::Postgres));

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/auth/register")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    r#"{"email":"not-an-email","password":"short","display_name":""}"#,
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_photo_upload_for_missing_pet_stores_nothing() {
    let upload_dir =
        std::env::temp_dir().join(format!("petgallery-missing-pet-{}", std::process::id()));
    let app = create_test_app_with_uploads(
        MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[make_user("user1")]])
            .append_query_results([Vec::<pet::Model>::new()]),
        upload_dir.clone(),
    );

    let boundary = "test-boundary";
    let body = format!(
        "--{boundary}\r\n\
         Content-Disposition: form-data; name=\"file\"; filename=\"dog.jpg\"\r\n\
         Content-Type: image/jpeg\r\n\r\n\
         fake image bytes\r\n\
         --{boundary}--\r\n"
    );

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/pets/ghost/photo")
                .header(header::COOKIE, format!("session={}", session_token()))
                .header(
                    header::CONTENT_TYPE,
                    format!("multipart/form-data; boundary={boundary}"),
                )
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // The 404 must not leave an orphaned file behind.
    let leftover = std::fs::read_dir(&upload_dir)
        .map(|entries| entries.count())
        .unwrap_or(0);
    assert_eq!(leftover, 0);
}

#[tokio::test]
async fn test_google_login_without_config_redirects_with_error() {
    let app = create_test_app(MockDatabase::new(DatabaseBackend::Postgres));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/auth/google/login")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(response.status().is_redirection());
    let location = response
        .headers()
        .get(header::LOCATION)
        .unwrap()
        .to_str()
        .unwrap();
    assert!(location.contains("error=oauth_failed"));
}
