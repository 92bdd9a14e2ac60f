use crate::domain::errors::{ConfigError, DomainResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Configuration port for accessing application configuration
pub trait ConfigurationPort: Send + Sync {
    /// Get Kinde tenant configuration
    fn get_kinde_config(&self) -> &KindeConfig;

    /// Get authentication configuration
    fn get_auth_config(&self) -> &AuthConfig;

    /// Get HTTP client configuration
    fn get_http_config(&self) -> &HttpConfig;

    /// Get logging configuration
    fn get_logging_config(&self) -> &LoggingConfig;

    /// Validate all configuration
    fn validate(&self) -> DomainResult<()>;

    /// Check if running in development mode
    fn is_development(&self) -> bool;
}

/// Kinde tenant and management API client configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct KindeConfig {
    /// Tenant base URL, e.g. `https://acme.kinde.com`
    pub base_url: String,
    pub client_id: String,
    pub client_secret: String,
    /// Country attached to phone identities
    pub phone_country_id: String,
}

impl KindeConfig {
    pub fn new(
        base_url: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            phone_country_id: DEFAULT_PHONE_COUNTRY_ID.to_string(),
        }
    }

    pub fn validate(&self) -> DomainResult<()> {
        if self.base_url.is_empty() {
            return Err(ConfigError::MissingRequired {
                key: "KINDE_BASE_URL".to_string(),
            }
            .into());
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ConfigError::InvalidValue {
                key: "KINDE_BASE_URL".to_string(),
                message: "Must start with http:// or https://".to_string(),
            }
            .into());
        }

        if self.client_id.is_empty() {
            return Err(ConfigError::MissingRequired {
                key: "KINDE_CLIENT_ID".to_string(),
            }
            .into());
        }

        if self.client_secret.is_empty() {
            return Err(ConfigError::MissingRequired {
                key: "KINDE_CLIENT_SECRET".to_string(),
            }
            .into());
        }

        if self.phone_country_id.is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "KINDE_PHONE_COUNTRY_ID".to_string(),
                message: "Must not be empty".to_string(),
            }
            .into());
        }

        Ok(())
    }

    fn base(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    /// Root of the versioned management API
    pub fn get_api_url(&self) -> String {
        format!("{}/api/v1", self.base())
    }

    pub fn get_token_url(&self) -> String {
        format!("{}/oauth2/token", self.base())
    }

    /// Audience requested for management API tokens
    pub fn get_audience(&self) -> String {
        format!("{}/api", self.base())
    }
}

impl fmt::Debug for KindeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KindeConfig")
            .field("base_url", &self.base_url)
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("phone_country_id", &self.phone_country_id)
            .finish()
    }
}

pub const DEFAULT_PHONE_COUNTRY_ID: &str = "us";

/// Authentication configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Refresh the cached token once fewer than this many seconds remain
    pub token_refresh_threshold_seconds: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_refresh_threshold_seconds: 60,
        }
    }
}

impl AuthConfig {
    pub fn get_refresh_threshold(&self) -> Duration {
        Duration::from_secs(self.token_refresh_threshold_seconds)
    }
}

/// HTTP client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    pub timeout_seconds: u64,
    pub connect_timeout_seconds: u64,
    /// Extra attempts for idempotent requests
    pub max_retries: u32,
    pub retry_delay_ms: u64,
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: 30,
            connect_timeout_seconds: 10,
            max_retries: 2,
            retry_delay_ms: 250,
            user_agent: concat!("kinde-domain/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl HttpConfig {
    pub fn validate(&self) -> DomainResult<()> {
        if self.timeout_seconds == 0 {
            return Err(ConfigError::InvalidValue {
                key: "HTTP_TIMEOUT_SECONDS".to_string(),
                message: "Must be greater than 0".to_string(),
            }
            .into());
        }

        if self.connect_timeout_seconds == 0 {
            return Err(ConfigError::InvalidValue {
                key: "HTTP_CONNECT_TIMEOUT_SECONDS".to_string(),
                message: "Must be greater than 0".to_string(),
            }
            .into());
        }

        Ok(())
    }

    pub fn get_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    pub fn get_connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_seconds)
    }

    pub fn get_retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: LogLevel,
    pub format: LogFormat,
}

/// Log level enumeration
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Trace => write!(f, "trace"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Error => write!(f, "error"),
        }
    }
}

/// Log format enumeration
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Compact,
    Pretty,
    Json,
}

/// Environment-specific configuration
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum Environment {
    #[default]
    Development,
    Test,
    Staging,
    Production,
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Staging => write!(f, "staging"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: Environment,
    pub kinde: KindeConfig,
    pub auth: AuthConfig,
    pub http: HttpConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Configuration with defaults for everything but the tenant
    pub fn new(kinde: KindeConfig) -> Self {
        Self {
            environment: Environment::default(),
            kinde,
            auth: AuthConfig::default(),
            http: HttpConfig::default(),
            logging: LoggingConfig::default(),
        }
    }

    pub fn validate(&self) -> DomainResult<()> {
        self.kinde.validate()?;
        self.http.validate()?;
        Ok(())
    }

    pub fn is_development(&self) -> bool {
        self.environment == Environment::Development
    }

    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }

    /// Load configuration from environment variables
    pub fn from_env() -> DomainResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from any key/value source
    pub fn from_lookup<F>(lookup: F) -> DomainResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .filter(|value| !value.is_empty())
                .ok_or_else(|| ConfigError::MissingRequired {
                    key: key.to_string(),
                })
        };
        let parsed = |key: &str, default: u64| -> Result<u64, ConfigError> {
            match lookup(key) {
                None => Ok(default),
                Some(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
                    key: key.to_string(),
                    message: format!("Expected a non-negative integer, got '{raw}'"),
                }),
            }
        };

        let environment = lookup("ENVIRONMENT")
            .unwrap_or_else(|| "development".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue {
                key: "ENVIRONMENT".to_string(),
                message: "Must be one of: development, test, staging, production".to_string(),
            })?;

        let kinde = KindeConfig {
            base_url: required("KINDE_BASE_URL")?,
            client_id: required("KINDE_CLIENT_ID")?,
            client_secret: required("KINDE_CLIENT_SECRET")?,
            phone_country_id: lookup("KINDE_PHONE_COUNTRY_ID")
                .unwrap_or_else(|| DEFAULT_PHONE_COUNTRY_ID.to_string()),
        };

        let auth = AuthConfig {
            token_refresh_threshold_seconds: parsed("AUTH_TOKEN_REFRESH_THRESHOLD_SECONDS", 60)?,
        };

        let defaults = HttpConfig::default();
        let http = HttpConfig {
            timeout_seconds: parsed("HTTP_TIMEOUT_SECONDS", defaults.timeout_seconds)?,
            connect_timeout_seconds: parsed(
                "HTTP_CONNECT_TIMEOUT_SECONDS",
                defaults.connect_timeout_seconds,
            )?,
            max_retries: parsed("HTTP_MAX_RETRIES", u64::from(defaults.max_retries))?
                .try_into()
                .map_err(|_| ConfigError::InvalidValue {
                    key: "HTTP_MAX_RETRIES".to_string(),
                    message: "Too large".to_string(),
                })?,
            retry_delay_ms: parsed("HTTP_RETRY_DELAY_MS", defaults.retry_delay_ms)?,
            user_agent: lookup("HTTP_USER_AGENT").unwrap_or(defaults.user_agent),
        };

        let logging = LoggingConfig {
            level: lookup("LOG_LEVEL")
                .and_then(|raw| raw.parse().ok())
                .unwrap_or_default(),
            format: lookup("LOG_FORMAT")
                .and_then(|raw| raw.parse().ok())
                .unwrap_or_default(),
        };

        let config = AppConfig {
            environment,
            kinde,
            auth,
            http,
            logging,
        };

        config.validate()?;
        Ok(config)
    }
}

/// String parsing implementations
impl std::str::FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "test" => Ok(Environment::Test),
            "staging" | "stage" => Ok(Environment::Staging),
            "production" | "prod" => Ok(Environment::Production),
            _ => Err(format!("Invalid environment: {s}")),
        }
    }
}

impl std::str::FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(format!("Invalid log level: {s}")),
        }
    }
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "compact" => Ok(LogFormat::Compact),
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            _ => Err(format!("Invalid log format: {s}")),
        }
    }
}
