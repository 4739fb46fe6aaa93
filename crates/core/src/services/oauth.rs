//! Google OAuth sign-in bridge.
//!
//! Builds the consent URL and exchanges the callback code for the
//! account's verified email and display name. Session issuance happens in
//! the HTTP layer once the profile comes back.

use petgallery_common::{AppError, AppResult, config::GoogleConfig};
use serde::Deserialize;

const AUTHORIZE_ENDPOINT: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const TOKEN_ENDPOINT: &str = "https://oauth2.googleapis.com/token";
const USERINFO_ENDPOINT: &str = "https://www.googleapis.com/oauth2/v2/userinfo";

/// The subset of the Google profile the backend needs.
#[derive(Debug, Clone, Deserialize)]
pub struct GoogleProfile {
    pub email: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Google OAuth client. Configuration is fixed at startup; a deployment
/// without Google credentials simply never constructs one.
#[derive(Clone)]
pub struct GoogleOAuthService {
    config: GoogleConfig,
    http: reqwest::Client,
}

impl GoogleOAuthService {
    /// Create a new Google OAuth client.
    #[must_use]
    pub fn new(config: GoogleConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }

    /// Build the consent-screen URL the browser is redirected to.
    #[must_use]
    pub fn authorize_url(&self) -> String {
        format!(
            "{AUTHORIZE_ENDPOINT}?client_id={}&redirect_uri={}&response_type=code&scope={}",
            urlencoding::encode(&self.config.client_id),
            urlencoding::encode(&self.config.redirect_uri),
            urlencoding::encode("openid email profile"),
        )
    }

    /// Exchange the callback code for the user's profile.
    pub async fn exchange_code(&self, code: &str) -> AppResult<GoogleProfile> {
        let token: TokenResponse = self
            .http
            .post(TOKEN_ENDPOINT)
            .form(&[
                ("code", code),
                ("client_id", self.config.client_id.as_str()),
                ("client_secret", self.config.client_secret.as_str()),
                ("redirect_uri", self.config.redirect_uri.as_str()),
                ("grant_type", "authorization_code"),
            ])
            .send()
            .await
            .map_err(|e| AppError::ExternalService(format!("Token exchange failed: {e}")))?
            .error_for_status()
            .map_err(|e| AppError::ExternalService(format!("Token exchange failed: {e}")))?
            .json()
            .await
            .map_err(|e| AppError::ExternalService(format!("Invalid token response: {e}")))?;

        let profile: GoogleProfile = self
            .http
            .get(USERINFO_ENDPOINT)
            .bearer_auth(&token.access_token)
            .send()
            .await
            .map_err(|e| AppError::ExternalService(format!("Userinfo fetch failed: {e}")))?
            .error_for_status()
            .map_err(|e| AppError::ExternalService(format!("Userinfo fetch failed: {e}")))?
            .json()
            .await
            .map_err(|e| AppError::ExternalService(format!("Invalid userinfo response: {e}")))?;

        if profile.email.is_empty() {
            return Err(AppError::ExternalService(
                "Google profile has no email".to_string(),
            ));
        }

        Ok(profile)
    }
}
