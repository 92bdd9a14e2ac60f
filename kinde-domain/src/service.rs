use std::sync::Arc;
use tracing::info;

use crate::application::ports::{AppConfig, KindeRepository, TokenManager};
use crate::application::services::{
    OrganizationManagementService, RoleManagementService, UserManagementService,
};
use crate::domain::errors::DomainResult;
use crate::infrastructure::adapters::{
    build_http_client, KindeHttpClient, KindeRestAdapter, KindeTokenManager,
};

/// The management services wired against one Kinde tenant
pub struct KindeService {
    pub organizations: OrganizationManagementService,
    pub roles: RoleManagementService,
    pub users: UserManagementService,
}

impl KindeService {
    /// Wire the REST adapter, token manager and services from configuration.
    pub fn from_config(config: &AppConfig) -> DomainResult<Self> {
        config.validate()?;

        let client = build_http_client(&config.http)?;
        let tokens: Arc<dyn TokenManager> = Arc::new(KindeTokenManager::new_with_client(
            &config.kinde,
            &config.auth,
            client.clone(),
        ));
        let http = Arc::new(KindeHttpClient::new(&config.kinde, &config.http, client, tokens));
        let repository: Arc<dyn KindeRepository> = Arc::new(KindeRestAdapter::new(http));

        info!(
            base_url = %config.kinde.base_url,
            environment = %config.environment,
            "Kinde management client ready"
        );
        Ok(Self::new(repository, config))
    }

    /// Build the services over any repository implementation.
    pub fn new(repository: Arc<dyn KindeRepository>, config: &AppConfig) -> Self {
        Self {
            organizations: OrganizationManagementService::new(Arc::clone(&repository)),
            roles: RoleManagementService::new(Arc::clone(&repository)),
            users: UserManagementService::new(repository, config.kinde.phone_country_id.clone()),
        }
    }
}
