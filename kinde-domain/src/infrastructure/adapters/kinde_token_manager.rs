use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;
use tracing::{debug, error, info};

use crate::application::ports::auth::*;
use crate::application::ports::config::{AuthConfig, KindeConfig};
use crate::domain::entities::AccessTokenResponse;
use crate::domain::errors::*;

/// Client-credentials token manager for the Kinde management API
///
/// The cache lock is held for the whole refresh, so concurrent callers that
/// find the token stale wait for a single token request instead of each
/// issuing their own.
pub struct KindeTokenManager {
    token_url: String,
    credentials: ClientCredentials,
    refresh_threshold_seconds: i64,
    client: reqwest::Client,
    cache: Mutex<Option<AuthToken>>,
}

impl KindeTokenManager {
    pub fn new(kinde: &KindeConfig, auth: &AuthConfig) -> Self {
        Self::new_with_client(kinde, auth, reqwest::Client::new())
    }

    pub fn new_with_client(kinde: &KindeConfig, auth: &AuthConfig, client: reqwest::Client) -> Self {
        Self {
            token_url: kinde.get_token_url(),
            credentials: ClientCredentials {
                client_id: kinde.client_id.clone(),
                client_secret: kinde.client_secret.clone(),
                audience: kinde.get_audience(),
            },
            refresh_threshold_seconds: i64::try_from(auth.token_refresh_threshold_seconds)
                .unwrap_or(i64::MAX),
            client,
            cache: Mutex::new(None),
        }
    }

    async fn acquire_token(&self) -> Result<AuthToken, AuthError> {
        let form_data = [
            ("grant_type", "client_credentials"),
            ("client_id", self.credentials.client_id.as_str()),
            ("client_secret", self.credentials.client_secret.as_str()),
            ("audience", self.credentials.audience.as_str()),
        ];

        let response = self
            .client
            .post(&self.token_url)
            .form(&form_data)
            .send()
            .await
            .map_err(|e| AuthError::TokenAcquisitionFailed {
                reason: format!("HTTP request failed: {}", e),
            })?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(AuthError::InvalidCredentials);
        }
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(AuthError::TokenAcquisitionFailed {
                reason: format!("HTTP error {}: {}", status, error_text),
            });
        }

        let raw_token: AccessTokenResponse =
            response
                .json()
                .await
                .map_err(|e| AuthError::TokenAcquisitionFailed {
                    reason: format!("Failed to parse token response: {}", e),
                })?;

        if raw_token.access_token.is_empty() {
            return Err(AuthError::TokenAcquisitionFailed {
                reason: "Token response did not contain an access token".to_string(),
            });
        }

        AuthToken::from_access_token(raw_token.access_token)
    }
}

#[async_trait]
impl TokenManager for KindeTokenManager {
    async fn access_token(&self) -> Result<String, AuthError> {
        let mut cache = self.cache.lock().await;
        let now = Utc::now().timestamp();

        if let Some(token) = cache.as_ref() {
            if token.is_fresh_at(now, self.refresh_threshold_seconds) {
                return Ok(token.access_token.clone());
            }
            debug!(expires_at = token.expires_at, "Cached access token is expiring, refreshing");
        }

        match self.acquire_token().await {
            Ok(token) => {
                info!(
                    client_id = %self.credentials.client_id,
                    expires_at = token.expires_at,
                    "Acquired management API access token"
                );
                let access_token = token.access_token.clone();
                *cache = Some(token);
                Ok(access_token)
            }
            Err(e) => {
                error!(client_id = %self.credentials.client_id, error = %e, "Failed to acquire access token");
                *cache = None;
                Err(e)
            }
        }
    }

    async fn invalidate(&self) {
        self.cache.lock().await.take();
    }
}
