use crate::{
    application::ports::*,
    domain::{
        entities::*,
        errors::{DomainError, DomainResult},
    },
};
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Organization management service implementing business use cases
pub struct OrganizationManagementService {
    repository: Arc<dyn KindeRepository>,
}

impl OrganizationManagementService {
    pub fn new(repository: Arc<dyn KindeRepository>) -> Self {
        Self { repository }
    }

    /// Get a specific organization by code
    #[instrument(skip(self), fields(org_code = %code))]
    pub async fn get_organization(&self, code: &str) -> DomainResult<Organization> {
        require("code", code)?;
        self.repository.get_organization(code).await
    }

    /// List all organizations
    #[instrument(skip(self))]
    pub async fn list_organizations(&self) -> DomainResult<Vec<Organization>> {
        info!("Listing all organizations");

        let organizations = self.repository.list_organizations().await?;

        info!("Found {} organizations", organizations.len());
        Ok(organizations)
    }

    /// Create a new organization
    #[instrument(skip(self, organization), fields(name = ?organization.name))]
    pub async fn add_organization(&self, organization: &Organization) -> DomainResult<Response> {
        let response = self.repository.create_organization(organization).await?;
        log_unacknowledged("create organization", &response);
        Ok(response)
    }

    /// Update an existing organization, addressed by its code
    #[instrument(skip(self, organization), fields(org_code = ?organization.code))]
    pub async fn update_organization(&self, organization: &Organization) -> DomainResult<Response> {
        let code = organization
            .code
            .as_deref()
            .filter(|code| !code.is_empty())
            .ok_or_else(|| {
                DomainError::validation("code", "Organization code is required for updates")
            })?;

        let response = self.repository.update_organization(code, organization).await?;
        log_unacknowledged("update organization", &response);
        Ok(response)
    }

    #[instrument(skip(self), fields(org_code = %code))]
    pub async fn delete_organization(&self, code: &str) -> DomainResult<Response> {
        require("code", code)?;
        let response = self.repository.delete_organization(code).await?;
        log_unacknowledged("delete organization", &response);
        Ok(response)
    }

    /// Add users to an organization
    #[instrument(skip(self, request), fields(org_code = %org_code, users = request.users.len()))]
    pub async fn add_organization_users(
        &self,
        org_code: &str,
        request: &OrganizationUsersRequest,
    ) -> DomainResult<Response> {
        require("org_code", org_code)?;
        if request.users.is_empty() {
            return Err(DomainError::validation("users", "At least one user is required"));
        }

        let response = self
            .repository
            .add_organization_users(org_code, request)
            .await?;
        log_unacknowledged("add organization users", &response);
        Ok(response)
    }

    #[instrument(skip(self), fields(org_code = %org_code, user_id = %user_id))]
    pub async fn remove_organization_user(
        &self,
        org_code: &str,
        user_id: &str,
    ) -> DomainResult<Response> {
        require("org_code", org_code)?;
        require("user_id", user_id)?;

        let response = self
            .repository
            .remove_organization_user(org_code, user_id)
            .await?;
        log_unacknowledged("remove organization user", &response);
        Ok(response)
    }
}

fn require(field: &str, value: &str) -> DomainResult<()> {
    if value.is_empty() {
        return Err(DomainError::validation(field, format!("{field} is required")));
    }
    Ok(())
}

fn log_unacknowledged(operation: &str, response: &Response) {
    if !response.is_successful() {
        warn!(
            operation,
            code = ?response.code,
            message = ?response.message,
            "Kinde did not acknowledge the change"
        );
    }
}
