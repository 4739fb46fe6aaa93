//! Authentication endpoints.
//!
//! Sessions ride in an `HttpOnly`, `SameSite=Lax` cookie holding a signed
//! expiring token, set on login and on a successful Google callback.

use axum::{
    Json, Router,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
};
use axum_extra::extract::CookieJar;
use petgallery_common::AppResult;
use petgallery_core::services::user::RegisterInput;
use petgallery_db::entities::user;
use serde::{Deserialize, Serialize};

use crate::{extractors::AuthUser, middleware::AppState, response::ApiResponse};

/// Public view of a user account.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub display_name: String,
    pub is_admin: bool,
    pub created_at: String,
}

impl From<user::Model> for UserResponse {
    fn from(user: user::Model) -> Self {
        Self {
            id: user.id,
            email: user.email,
            display_name: user.display_name,
            is_admin: user.is_admin,
            created_at: user.created_at.to_rfc3339(),
        }
    }
}

/// Login request.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Query parameters Google sends to the callback.
#[derive(Debug, Deserialize)]
pub struct OAuthCallbackQuery {
    pub code: Option<String>,
}

/// Register a new account and log it in right away.
async fn register(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(input): Json<RegisterInput>,
) -> AppResult<(CookieJar, ApiResponse<UserResponse>)> {
    let user = state.user_service.register(input).await?;
    let token = state.session.issue(&user.id)?;
    let jar = jar.add(state.session_cookie(token));

    Ok((jar, ApiResponse::ok(user.into())))
}

/// Log in with email and password, setting the session cookie.
async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(req): Json<LoginRequest>,
) -> AppResult<(CookieJar, ApiResponse<UserResponse>)> {
    let user = state.user_service.login(&req.email, &req.password).await?;
    let token = state.session.issue(&user.id)?;
    let jar = jar.add(state.session_cookie(token));

    Ok((jar, ApiResponse::ok(user.into())))
}

/// Log out, clearing the session cookie.
async fn logout(State(state): State<AppState>, jar: CookieJar) -> (CookieJar, ApiResponse<()>) {
    let jar = jar.add(state.clear_session_cookie());
    (jar, ApiResponse::ok(()))
}

/// Return the currently authenticated user.
async fn me(AuthUser(user): AuthUser) -> ApiResponse<UserResponse> {
    ApiResponse::ok(user.into())
}

/// Redirect the browser to Google's consent screen.
async fn google_login(State(state): State<AppState>) -> Response {
    state.oauth_service.as_ref().map_or_else(
        || oauth_failure_redirect(&state).into_response(),
        |oauth| Redirect::to(&oauth.authorize_url()).into_response(),
    )
}

/// Handle the Google callback.
///
/// Any failure along the way, from a denied consent screen to a broken
/// token exchange, lands the browser back on the frontend login page with
/// an error marker rather than a bare JSON error.
async fn google_callback(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(query): Query<OAuthCallbackQuery>,
) -> Response {
    let (Some(oauth), Some(code)) = (state.oauth_service.as_ref(), query.code.as_deref()) else {
        return oauth_failure_redirect(&state).into_response();
    };

    let profile = match oauth.exchange_code(code).await {
        Ok(profile) => profile,
        Err(e) => {
            tracing::warn!(error = %e, "google code exchange failed");
            return oauth_failure_redirect(&state).into_response();
        }
    };

    let session = async {
        let user = state
            .user_service
            .find_or_create_federated(&profile.email, &profile.name)
            .await?;
        state.session.issue(&user.id)
    }
    .await;

    match session {
        Ok(token) => {
            let jar = jar.add(state.session_cookie(token));
            (jar, Redirect::to(&state.frontend_url)).into_response()
        }
        Err(e) => {
            tracing::warn!(error = %e, "google sign-in failed");
            oauth_failure_redirect(&state).into_response()
        }
    }
}

fn oauth_failure_redirect(state: &AppState) -> Redirect {
    Redirect::to(&format!("{}/login?error=oauth_failed", state.frontend_url))
}

/// Create the auth router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/me", get(me))
        .route("/google/login", get(google_login))
        .route("/google/callback", get(google_callback))
}
