//! Petgallery server entry point.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method, header},
    middleware,
};
use petgallery_api::{middleware::AppState, router as api_router};
use petgallery_common::{Config, LocalStorage, SessionSigner};
use petgallery_core::services::{
    ApplicationService, FavoriteService, GoogleOAuthService, LocationService, MediaService,
    PetService, UserService,
};
use petgallery_db::repositories::{
    ApplicationRepository, FavoriteRepository, LocationRepository, PetRepository, UserRepository,
};
use tokio::signal;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Waits for a shutdown signal (SIGINT or SIGTERM).
///
/// On Unix systems, this listens for both SIGINT (Ctrl+C) and SIGTERM.
/// On Windows, this only listens for Ctrl+C.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received SIGINT, initiating graceful shutdown...");
        },
        () = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown...");
        },
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "petgallery=debug,tower_http=debug".into()),
        )
        .init();

    info!("Starting petgallery server...");

    // Load configuration
    let config = Config::load()?;

    // Connect to database and run migrations
    let db = petgallery_db::init(&config).await?;
    info!("Connected to database");

    info!("Running database migrations...");
    petgallery_db::migrate(&db).await?;
    info!("Migrations completed");

    let db = Arc::new(db);

    // Initialize repositories
    let user_repo = UserRepository::new(db.clone());
    let location_repo = LocationRepository::new(db.clone());
    let pet_repo = PetRepository::new(db.clone());
    let application_repo = ApplicationRepository::new(db.clone());
    let favorite_repo = FavoriteRepository::new(db.clone());

    // Initialize services
    let user_service = UserService::new(user_repo);
    let location_service = LocationService::new(location_repo.clone());
    let pet_service = PetService::new(pet_repo.clone(), location_repo);
    let application_service = ApplicationService::new(application_repo, pet_repo.clone());
    let favorite_service = FavoriteService::new(favorite_repo, pet_repo);

    let storage = Arc::new(LocalStorage::new(
        config.uploads.dir.clone().into(),
        "/uploads".to_string(),
    ));
    let media_service = MediaService::new(storage, config.uploads.max_bytes);

    let oauth_service = config.google.clone().map(GoogleOAuthService::new);
    if oauth_service.is_none() {
        info!("Google OAuth is not configured; federated login disabled");
    }

    let session = SessionSigner::new(&config.session.secret, config.session.max_age_secs)?;

    let state = AppState {
        user_service,
        location_service,
        pet_service,
        application_service,
        favorite_service,
        media_service,
        oauth_service,
        session,
        frontend_url: config.server.frontend_url.clone(),
    };

    // Body limit leaves headroom over the photo cap for multipart framing.
    let body_limit = usize::try_from(config.uploads.max_bytes.saturating_add(64 * 1024))
        .unwrap_or(usize::MAX);

    let frontend_origin = config.server.frontend_url.parse::<HeaderValue>()?;

    let app = Router::new()
        .nest("/api", api_router())
        .nest_service("/uploads", ServeDir::new(&config.uploads.dir))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            petgallery_api::middleware::auth_middleware,
        ))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(
            // Credentialed cookies rule out wildcard CORS; only the
            // configured frontend origin is allowed.
            CorsLayer::new()
                .allow_origin(frontend_origin)
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PUT,
                    Method::PATCH,
                    Method::DELETE,
                    Method::OPTIONS,
                ])
                .allow_headers([header::CONTENT_TYPE])
                .allow_credentials(true),
        )
        .with_state(state);

    // Start server with graceful shutdown
    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}
