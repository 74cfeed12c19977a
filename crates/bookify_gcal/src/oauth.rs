// --- File: crates/bookify_gcal/src/oauth.rs ---
//! Google OAuth web flow for advisors.
//!
//! Each advisor connects their own account: we send them to Google's
//! consent screen with the advisor id in `state`, exchange the returned
//! code for tokens, and refresh expired access tokens on demand. The app
//! holds one OAuth client registration; advisors only own their tokens.

use bookify_common::http::HTTP_CLIENT;
use bookify_common::models::OAuthTokens;
use bookify_config::OAuthConfig;
use chrono::{Duration, Utc};
use serde::Deserialize;
use tracing::debug;

use crate::error::GcalError;

const AUTH_ENDPOINT: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const TOKEN_ENDPOINT: &str = "https://oauth2.googleapis.com/token";
const USERINFO_ENDPOINT: &str = "https://www.googleapis.com/oauth2/v2/userinfo";

/// Scopes requested on connect: read calendars, write events, read the
/// account email.
const SCOPES: &str = "https://www.googleapis.com/auth/calendar.readonly \
https://www.googleapis.com/auth/calendar.events \
https://www.googleapis.com/auth/userinfo.email";

#[derive(Deserialize, Debug)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<i64>,
    #[serde(default)]
    refresh_token: Option<String>,
}

impl TokenResponse {
    fn into_tokens(self, fallback_refresh: Option<String>) -> OAuthTokens {
        OAuthTokens {
            access_token: self.access_token,
            refresh_token: self.refresh_token.or(fallback_refresh),
            expires_at: self
                .expires_in
                .map(|secs| Utc::now() + Duration::seconds(secs)),
        }
    }
}

#[derive(Deserialize, Debug)]
struct UserInfoResponse {
    #[serde(default)]
    email: Option<String>,
}

/// The app-level OAuth client. Constructed from optional configuration so
/// callers get a uniform `NotConfigured` error instead of missing routes
/// when the operator has not registered a Google client yet.
#[derive(Clone)]
pub struct OAuthClient {
    config: Option<OAuthConfig>,
    redirect_uri: String,
}

impl OAuthClient {
    pub fn new(config: Option<OAuthConfig>, base_url: &str) -> Self {
        let redirect_uri = config
            .as_ref()
            .and_then(|c| c.redirect_uri.clone())
            .unwrap_or_else(|| format!("{}/auth/callback", base_url));
        Self {
            config,
            redirect_uri,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.config.is_some()
    }

    fn credentials(&self) -> Result<&OAuthConfig, GcalError> {
        self.config.as_ref().ok_or(GcalError::NotConfigured)
    }

    /// Consent URL for an advisor. Offline access with forced consent so a
    /// refresh token is always issued; the advisor id rides in `state`.
    pub fn auth_url(&self, advisor_id: &str) -> Result<String, GcalError> {
        let credentials = self.credentials()?;
        let query = serde_urlencoded::to_string([
            ("client_id", credentials.client_id.as_str()),
            ("redirect_uri", self.redirect_uri.as_str()),
            ("response_type", "code"),
            ("scope", SCOPES),
            ("access_type", "offline"),
            ("prompt", "consent"),
            ("state", advisor_id),
        ])
        .map_err(|e| GcalError::UnexpectedResponse(e.to_string()))?;
        Ok(format!("{}?{}", AUTH_ENDPOINT, query))
    }

    async fn token_request(&self, params: &[(&str, &str)]) -> Result<TokenResponse, GcalError> {
        let response = HTTP_CLIENT.post(TOKEN_ENDPOINT).form(params).send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(GcalError::TokenExchange {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response.json().await?)
    }

    /// Exchange the callback code for tokens.
    pub async fn exchange_code(&self, code: &str) -> Result<OAuthTokens, GcalError> {
        let credentials = self.credentials()?;
        let token = self
            .token_request(&[
                ("code", code),
                ("client_id", &credentials.client_id),
                ("client_secret", &credentials.client_secret),
                ("redirect_uri", &self.redirect_uri),
                ("grant_type", "authorization_code"),
            ])
            .await?;
        Ok(token.into_tokens(None))
    }

    /// Mint a fresh access token from the stored refresh token. The refresh
    /// token itself is carried over; Google does not resend it.
    pub async fn refresh(&self, tokens: &OAuthTokens) -> Result<OAuthTokens, GcalError> {
        let credentials = self.credentials()?;
        let refresh_token = tokens
            .refresh_token
            .as_deref()
            .ok_or(GcalError::MissingRefreshToken)?;
        debug!("Refreshing expired Google access token");
        let token = self
            .token_request(&[
                ("refresh_token", refresh_token),
                ("client_id", &credentials.client_id),
                ("client_secret", &credentials.client_secret),
                ("grant_type", "refresh_token"),
            ])
            .await?;
        Ok(token.into_tokens(tokens.refresh_token.clone()))
    }

    /// The email of the connected account, from the userinfo endpoint.
    pub async fn fetch_user_email(&self, access_token: &str) -> Result<String, GcalError> {
        let response = HTTP_CLIENT
            .get(USERINFO_ENDPOINT)
            .bearer_auth(access_token)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(GcalError::Api {
                status: status.as_u16(),
                message,
            });
        }
        let info: UserInfoResponse = response.json().await?;
        info.email
            .ok_or_else(|| GcalError::UnexpectedResponse("userinfo without email".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> OAuthClient {
        OAuthClient::new(
            Some(OAuthConfig {
                client_id: "client-123".to_string(),
                client_secret: "secret".to_string(),
                redirect_uri: None,
            }),
            "http://localhost:3000",
        )
    }

    #[test]
    fn auth_url_carries_advisor_state_and_offline_access() {
        let url = client().auth_url("jane-doe").unwrap();
        assert!(url.starts_with(AUTH_ENDPOINT));
        assert!(url.contains("client_id=client-123"));
        assert!(url.contains("state=jane-doe"));
        assert!(url.contains("access_type=offline"));
        assert!(url.contains("prompt=consent"));
        assert!(url.contains(
            "redirect_uri=http%3A%2F%2Flocalhost%3A3000%2Fauth%2Fcallback"
        ));
    }

    #[test]
    fn explicit_redirect_uri_wins_over_base_url() {
        let client = OAuthClient::new(
            Some(OAuthConfig {
                client_id: "client-123".to_string(),
                client_secret: "secret".to_string(),
                redirect_uri: Some("https://example.com/cb".to_string()),
            }),
            "http://localhost:3000",
        );
        let url = client.auth_url("jane-doe").unwrap();
        assert!(url.contains("redirect_uri=https%3A%2F%2Fexample.com%2Fcb"));
    }

    #[test]
    fn unconfigured_client_refuses_to_build_urls() {
        let client = OAuthClient::new(None, "http://localhost:3000");
        assert!(!client.is_configured());
        assert!(matches!(
            client.auth_url("jane-doe"),
            Err(GcalError::NotConfigured)
        ));
    }

    #[test]
    fn token_response_keeps_previous_refresh_token() {
        let response = TokenResponse {
            access_token: "new-access".to_string(),
            expires_in: Some(3600),
            refresh_token: None,
        };
        let tokens = response.into_tokens(Some("old-refresh".to_string()));
        assert_eq!(tokens.access_token, "new-access");
        assert_eq!(tokens.refresh_token.as_deref(), Some("old-refresh"));
        assert!(tokens.expires_at.is_some());
    }
}
