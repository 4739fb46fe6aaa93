//! API middleware and shared state.

use axum::{body::Body, extract::State, http::Request, middleware::Next, response::Response};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use petgallery_common::{SESSION_COOKIE, SessionSigner};
use petgallery_core::services::{
    ApplicationService, FavoriteService, GoogleOAuthService, LocationService, MediaService,
    PetService, UserService,
};

/// Application state shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub user_service: UserService,
    pub location_service: LocationService,
    pub pet_service: PetService,
    pub application_service: ApplicationService,
    pub favorite_service: FavoriteService,
    pub media_service: MediaService,
    /// Absent when the deployment has no Google credentials.
    pub oauth_service: Option<GoogleOAuthService>,
    pub session: SessionSigner,
    /// Where OAuth callbacks send the browser afterwards.
    pub frontend_url: String,
}

impl AppState {
    /// Build the session cookie carrying a freshly signed token.
    #[must_use]
    pub fn session_cookie(&self, token: String) -> Cookie<'static> {
        let max_age = i64::try_from(self.session.max_age_secs()).unwrap_or(i64::MAX);
        Cookie::build((SESSION_COOKIE, token))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .max_age(time::Duration::seconds(max_age))
            .build()
    }

    /// Build an expired session cookie that clears the browser's copy.
    #[must_use]
    pub fn clear_session_cookie(&self) -> Cookie<'static> {
        Cookie::build((SESSION_COOKIE, ""))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .max_age(time::Duration::ZERO)
            .build()
    }
}

/// Session authentication middleware.
///
/// A valid cookie puts the user into request extensions; anything else
/// leaves the request anonymous and lets each handler decide whether
/// authentication is required.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let jar = CookieJar::from_headers(req.headers());
    if let Some(cookie) = jar.get(SESSION_COOKIE)
        && let Ok(user_id) = state.session.verify(cookie.value())
        && let Ok(user) = state.user_service.get(&user_id).await
    {
        req.extensions_mut().insert(user);
    }

    next.run(req).await
}
