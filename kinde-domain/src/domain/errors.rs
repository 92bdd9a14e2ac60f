use thiserror::Error;
use tracing::warn;

/// Domain-specific errors for Kinde operations
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {field} - {message}")]
    Validation { field: String, message: String },

    #[error("Authentication failed: {reason}")]
    AuthenticationFailed { reason: String },

    #[error("{resource} not found")]
    NotFound { resource: String },

    #[error("External service error: {service} - {message}")]
    ExternalService { service: String, message: String },

    #[error("Serialization error: {message}")]
    Serialization { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl DomainError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        DomainError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// True when the failure means "the resource does not exist" rather than
    /// "the call could not be completed".
    pub fn is_not_found(&self) -> bool {
        matches!(self, DomainError::NotFound { .. })
    }
}

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Degrade a failed operation to an empty value, logging the failure.
///
/// Read paths in an admin UI usually prefer an empty list over an error
/// dialog; write paths should inspect the error instead.
pub trait DomainResultExt<T> {
    fn or_default_logged(self, operation: &str) -> T;
}

impl<T: Default> DomainResultExt<T> for DomainResult<T> {
    fn or_default_logged(self, operation: &str) -> T {
        match self {
            Ok(value) => value,
            Err(e) => {
                warn!(operation, error = %e, "Operation failed, using default value");
                T::default()
            }
        }
    }
}

/// Authentication-specific errors
#[derive(Error, Debug, Clone)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Token acquisition failed: {reason}")]
    TokenAcquisitionFailed { reason: String },

    #[error("Token could not be decoded: {reason}")]
    TokenDecode { reason: String },
}

impl From<AuthError> for DomainError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials => DomainError::AuthenticationFailed {
                reason: "Invalid credentials".to_string(),
            },
            AuthError::TokenAcquisitionFailed { reason } => {
                DomainError::AuthenticationFailed { reason }
            }
            AuthError::TokenDecode { reason } => DomainError::AuthenticationFailed {
                reason: format!("Malformed access token: {reason}"),
            },
        }
    }
}

/// Errors raised while talking to the management API
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("No access token available: {0}")]
    Unauthenticated(#[from] AuthError),

    #[error("Request to {api} failed: {message}")]
    Transport { api: String, message: String },

    #[error("Request to {api} returned HTTP {status}: {body}")]
    Http { api: String, status: u16, body: String },

    #[error("Resource {api} not found")]
    NotFound { api: String },

    #[error("Failed to deserialize response from {api}: {message}")]
    Deserialize { api: String, message: String },

    #[error("Failed to serialize request to {api}: {message}")]
    Serialize { api: String, message: String },
}

impl ApiError {
    /// Transport failures and server errors may succeed on a second attempt.
    pub fn is_retryable(&self) -> bool {
        match self {
            ApiError::Transport { .. } => true,
            ApiError::Http { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

impl From<ApiError> for DomainError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Unauthenticated(auth) => auth.into(),
            ApiError::NotFound { api } => DomainError::NotFound { resource: api },
            ApiError::Deserialize { message, .. } | ApiError::Serialize { message, .. } => {
                DomainError::Serialization { message }
            }
            other @ (ApiError::Transport { .. } | ApiError::Http { .. }) => {
                DomainError::ExternalService {
                    service: "Kinde".to_string(),
                    message: other.to_string(),
                }
            }
        }
    }
}

/// Configuration-specific errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required configuration: {key}")]
    MissingRequired { key: String },

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

impl From<ConfigError> for DomainError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::MissingRequired { key } => DomainError::Configuration {
                message: format!("Missing required configuration: {key}"),
            },
            ConfigError::InvalidValue { key, message } => DomainError::Configuration {
                message: format!("Invalid value for {key}: {message}"),
            },
        }
    }
}
