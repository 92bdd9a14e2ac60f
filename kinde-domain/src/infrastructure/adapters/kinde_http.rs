use reqwest::Method;
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, instrument, warn};

use super::pagination;
use crate::application::ports::auth::TokenManager;
use crate::application::ports::config::{HttpConfig, KindeConfig};
use crate::domain::entities::PagedResponse;
use crate::domain::errors::{ApiError, DomainError, DomainResult};

/// A single management API call, relative to `{base}/api/v1`
#[derive(Debug, Clone)]
pub struct ApiRequest {
    method: Method,
    path: String,
    query: Vec<(String, String)>,
    next_token: Option<String>,
    body: Option<serde_json::Value>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into().trim_start_matches('/').to_string(),
            query: Vec::new(),
            next_token: None,
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::PATCH, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    pub fn with_next_token(mut self, next_token: Option<String>) -> Self {
        self.next_token = next_token.filter(|token| !token.is_empty());
        self
    }

    /// Attach a JSON body.
    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self, ApiError> {
        let value = serde_json::to_value(body).map_err(|e| ApiError::Serialize {
            api: self.path.clone(),
            message: e.to_string(),
        })?;
        self.body = Some(value);
        Ok(self)
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Resource path, used as the API name in logs and errors
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Query pairs in wire order: the continuation token first, then the
    /// explicit parameters in insertion order.
    pub fn query_pairs(&self) -> Vec<(&str, &str)> {
        self.next_token
            .iter()
            .map(|token| ("next_token", token.as_str()))
            .chain(self.query.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .collect()
    }

    fn is_idempotent(&self) -> bool {
        self.method == Method::GET
    }
}

/// Build the shared reqwest client from HTTP configuration.
pub fn build_http_client(config: &HttpConfig) -> DomainResult<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(config.get_timeout())
        .connect_timeout(config.get_connect_timeout())
        .user_agent(config.user_agent.as_str())
        .build()
        .map_err(|e| DomainError::Configuration {
            message: format!("Failed to build HTTP client: {}", e),
        })
}

/// Executes authenticated requests against the management API
pub struct KindeHttpClient {
    api_url: String,
    client: reqwest::Client,
    tokens: Arc<dyn TokenManager>,
    max_retries: u32,
    retry_delay: Duration,
}

impl KindeHttpClient {
    pub fn new(
        kinde: &KindeConfig,
        http: &HttpConfig,
        client: reqwest::Client,
        tokens: Arc<dyn TokenManager>,
    ) -> Self {
        Self {
            api_url: kinde.get_api_url(),
            client,
            tokens,
            max_retries: http.max_retries,
            retry_delay: http.get_retry_delay(),
        }
    }

    /// Send a request and deserialize its JSON response.
    ///
    /// GET requests are retried on transport errors and 5xx responses.
    #[instrument(skip(self, request), fields(method = %request.method, api = %request.path))]
    pub async fn call<T: DeserializeOwned>(&self, request: &ApiRequest) -> Result<T, ApiError> {
        let mut attempt = 0u32;
        loop {
            match self.send_once(request).await {
                Ok(value) => return Ok(value),
                Err(e) if request.is_idempotent() && e.is_retryable() && attempt < self.max_retries => {
                    attempt += 1;
                    warn!(attempt, error = %e, "Retrying management API call");
                    tokio::time::sleep(self.retry_delay).await;
                }
                Err(e) => {
                    error!(error = %e, "Management API call failed");
                    return Err(e);
                }
            }
        }
    }

    /// Collect every page of a paged resource.
    pub async fn collect_all<P>(&self, request: ApiRequest) -> Result<Vec<P::Item>, ApiError>
    where
        P: PagedResponse + DeserializeOwned,
    {
        pagination::collect_all(|next_token| {
            let page = request.clone().with_next_token(next_token);
            async move { self.call::<P>(&page).await }
        })
        .await
    }

    async fn send_once<T: DeserializeOwned>(&self, request: &ApiRequest) -> Result<T, ApiError> {
        let token = self.tokens.access_token().await?;
        let url = format!("{}/{}", self.api_url, request.path);

        let mut builder = self
            .client
            .request(request.method.clone(), &url)
            .bearer_auth(token);

        let query = request.query_pairs();
        if !query.is_empty() {
            builder = builder.query(&query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| ApiError::Transport {
            api: request.path.clone(),
            message: e.to_string(),
        })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| ApiError::Transport {
            api: request.path.clone(),
            message: format!("Failed to read response body: {}", e),
        })?;

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound {
                api: request.path.clone(),
            });
        }
        if status == reqwest::StatusCode::UNAUTHORIZED {
            self.tokens.invalidate().await;
        }
        if !status.is_success() {
            return Err(ApiError::Http {
                api: request.path.clone(),
                status: status.as_u16(),
                body,
            });
        }

        debug!(status = status.as_u16(), body = %body, "Management API response");

        let payload = if body.trim().is_empty() { "{}" } else { body.as_str() };
        serde_json::from_str(payload).map_err(|e| ApiError::Deserialize {
            api: request.path.clone(),
            message: e.to_string(),
        })
    }
}
