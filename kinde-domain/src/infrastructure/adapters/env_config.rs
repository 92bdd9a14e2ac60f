use crate::application::ports::{
    AppConfig, AuthConfig, ConfigurationPort, HttpConfig, KindeConfig, LoggingConfig,
};
use crate::domain::errors::DomainResult;

/// Environment-based configuration adapter
#[derive(Debug, Clone)]
pub struct EnvConfigurationAdapter {
    config: AppConfig,
}

impl EnvConfigurationAdapter {
    pub fn new() -> DomainResult<Self> {
        let config = AppConfig::from_env()?;
        Ok(Self { config })
    }

    /// Wrap an already loaded configuration.
    pub fn from_config(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn app_config(&self) -> &AppConfig {
        &self.config
    }
}

impl ConfigurationPort for EnvConfigurationAdapter {
    fn get_kinde_config(&self) -> &KindeConfig {
        &self.config.kinde
    }

    fn get_auth_config(&self) -> &AuthConfig {
        &self.config.auth
    }

    fn get_http_config(&self) -> &HttpConfig {
        &self.config.http
    }

    fn get_logging_config(&self) -> &LoggingConfig {
        &self.config.logging
    }

    fn validate(&self) -> DomainResult<()> {
        self.config.validate()
    }

    fn is_development(&self) -> bool {
        self.config.is_development()
    }
}
