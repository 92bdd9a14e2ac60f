use crate::domain::{entities::AccessToken, errors::AuthError};
use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use std::fmt;

/// A bearer token together with the expiry read from its own claims
#[derive(Clone, PartialEq, Eq)]
pub struct AuthToken {
    pub access_token: String,
    /// Seconds since the Unix epoch
    pub expires_at: i64,
}

impl AuthToken {
    /// Wrap a raw access token, reading `exp` from its payload.
    pub fn from_access_token(access_token: String) -> Result<Self, AuthError> {
        let claims = AccessToken::decode(&access_token)?;
        Ok(Self {
            access_token,
            expires_at: claims.exp,
        })
    }

    /// Whether the token can still be handed out at `now` without entering
    /// the final `threshold_seconds` of its lifetime.
    pub fn is_fresh_at(&self, now: i64, threshold_seconds: i64) -> bool {
        now < self.expires_at - threshold_seconds
    }

    pub fn is_expiring_soon(&self, threshold_seconds: i64) -> bool {
        !self.is_fresh_at(Utc::now().timestamp(), threshold_seconds)
    }

    pub fn expires_at_utc(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.expires_at, 0).single()
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthToken")
            .field("access_token", &"<redacted>")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Client-credentials grant parameters
#[derive(Clone)]
pub struct ClientCredentials {
    pub client_id: String,
    pub client_secret: String,
    pub audience: String,
}

impl fmt::Debug for ClientCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientCredentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("audience", &self.audience)
            .finish()
    }
}

/// Token management port
#[async_trait]
pub trait TokenManager: Send + Sync {
    /// Return a bearer token, refreshing it when it is close to expiry.
    async fn access_token(&self) -> Result<String, AuthError>;

    /// Drop any cached token so the next call acquires a new one.
    async fn invalidate(&self);
}
