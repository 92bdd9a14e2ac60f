use crate::{
    application::ports::*,
    domain::{entities::*, errors::DomainResult},
};
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Role management service implementing business use cases
pub struct RoleManagementService {
    repository: Arc<dyn KindeRepository>,
}

impl RoleManagementService {
    pub fn new(repository: Arc<dyn KindeRepository>) -> Self {
        Self { repository }
    }

    /// List every role defined for the business
    #[instrument(skip(self))]
    pub async fn list_roles(&self) -> DomainResult<Vec<Role>> {
        let roles = self.repository.list_roles().await?;
        info!("Found {} roles", roles.len());
        Ok(roles)
    }

    /// Roles a user holds within one organization
    #[instrument(skip(self), fields(user_id = %user_id, org_code = %org_code))]
    pub async fn list_user_roles(&self, user_id: &str, org_code: &str) -> DomainResult<Vec<Role>> {
        self.repository.list_user_roles(user_id, org_code).await
    }

    #[instrument(skip(self))]
    pub async fn user_has_role(
        &self,
        user_id: &str,
        org_code: &str,
        role_id: &str,
    ) -> DomainResult<bool> {
        let roles = self.repository.list_user_roles(user_id, org_code).await?;
        Ok(roles.iter().any(|role| role.id.as_deref() == Some(role_id)))
    }

    /// Add or remove a role for a user within an organization.
    ///
    /// Missing identifiers come back as an `Error` response rather than an
    /// `Err`, so a form can show the message directly. Requests that would not
    /// change anything succeed without calling the API.
    #[instrument(skip(self, user, role), fields(user_id = ?user.id, role_id = ?role.id))]
    pub async fn manage_user_role(
        &self,
        user: &User,
        org_code: &str,
        role: &Role,
        remove_role: bool,
    ) -> DomainResult<Response> {
        let user_id = match user.id.as_deref().filter(|id| !id.is_empty()) {
            Some(id) => id,
            None => return Ok(Response::error("User id is required")),
        };
        let role_id = match role.id.as_deref().filter(|id| !id.is_empty()) {
            Some(id) => id,
            None => return Ok(Response::error("Role id is required")),
        };
        if org_code.is_empty() {
            return Ok(Response::error("Organization code is required"));
        }

        let has_role = self.user_has_role(user_id, org_code, role_id).await?;
        if has_role != remove_role {
            info!("Role assignment already in requested state");
            return Ok(Response::ok(if remove_role {
                "User does not have the role"
            } else {
                "User already has the role"
            }));
        }

        let response = if remove_role {
            self.repository
                .remove_user_role(org_code, user_id, role_id)
                .await?
        } else {
            self.repository
                .add_user_role(org_code, user_id, role_id)
                .await?
        };

        if !response.is_successful() {
            warn!(code = ?response.code, message = ?response.message, "Role change was not acknowledged");
        }
        Ok(response)
    }
}
