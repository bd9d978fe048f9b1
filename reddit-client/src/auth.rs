use oauth2::basic::BasicClient;
use oauth2::reqwest::async_http_client;
use oauth2::{AuthUrl, ClientId, ClientSecret, TokenResponse, TokenUrl};
use postwatch_core::{CoreError, SourceFetchError};
use std::time::{Duration, Instant};
use tracing::debug;

const REDDIT_AUTH_URL: &str = "https://www.reddit.com/api/v1/authorize";
const REDDIT_TOKEN_URL: &str = "https://www.reddit.com/api/v1/access_token";

/// Re-exchange this long before the advertised expiry.
const TOKEN_EXPIRY_SLACK: Duration = Duration::from_secs(60);

/// Fallback lifetime when the token endpoint omits `expires_in`.
const DEFAULT_TOKEN_LIFETIME: Duration = Duration::from_secs(3600);

/// App-only bearer token obtained through the client-credentials grant.
#[derive(Debug, Clone)]
pub struct AppToken {
    pub access_token: String,
    pub expires_at: Instant,
}

impl AppToken {
    pub fn needs_refresh(&self) -> bool {
        Instant::now() + TOKEN_EXPIRY_SLACK >= self.expires_at
    }
}

pub(crate) fn build_oauth_client(
    client_id: &str,
    client_secret: &str,
) -> Result<BasicClient, CoreError> {
    let auth_url = AuthUrl::new(REDDIT_AUTH_URL.to_string()).map_err(|e| CoreError::Internal {
        message: format!("invalid Reddit auth URL: {e}"),
    })?;
    let token_url = TokenUrl::new(REDDIT_TOKEN_URL.to_string()).map_err(|e| CoreError::Internal {
        message: format!("invalid Reddit token URL: {e}"),
    })?;

    Ok(BasicClient::new(
        ClientId::new(client_id.to_string()),
        Some(ClientSecret::new(client_secret.to_string())),
        auth_url,
        Some(token_url),
    ))
}

/// Exchange app credentials for a fresh bearer token.
pub(crate) async fn exchange_app_token(oauth: &BasicClient) -> Result<AppToken, CoreError> {
    debug!("Exchanging app credentials for a Reddit token");
    let response = oauth
        .exchange_client_credentials()
        .request_async(async_http_client)
        .await
        .map_err(|e| {
            CoreError::SourceFetch(SourceFetchError::AuthenticationFailed {
                reason: e.to_string(),
            })
        })?;

    let lifetime = response.expires_in().unwrap_or(DEFAULT_TOKEN_LIFETIME);
    Ok(AppToken {
        access_token: response.access_token().secret().clone(),
        expires_at: Instant::now() + lifetime,
    })
}
