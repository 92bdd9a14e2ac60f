use async_trait::async_trait;
use std::sync::Arc;

use super::kinde_http::{ApiRequest, KindeHttpClient};
use crate::application::ports::repository::*;
use crate::domain::{entities::*, errors::*};

/// Kinde REST API adapter implementing the KindeRepository port
pub struct KindeRestAdapter {
    http: Arc<KindeHttpClient>,
}

impl KindeRestAdapter {
    pub fn new(http: Arc<KindeHttpClient>) -> Self {
        Self { http }
    }

    fn user_roles_path(org_code: &str, user_id: &str) -> String {
        format!("organizations/{}/users/{}/roles", org_code, user_id)
    }
}

#[async_trait]
impl KindeRepository for KindeRestAdapter {
    // Organization operations
    async fn get_organization(&self, code: &str) -> DomainResult<Organization> {
        let request = ApiRequest::get("organization").query("code", code);
        Ok(self.http.call(&request).await?)
    }

    async fn list_organizations(&self) -> DomainResult<Vec<Organization>> {
        let request = ApiRequest::get("organizations");
        Ok(self
            .http
            .collect_all::<OrganizationsResponse>(request)
            .await?)
    }

    async fn create_organization(&self, organization: &Organization) -> DomainResult<Response> {
        let request = ApiRequest::post("organization").json(organization)?;
        Ok(self.http.call(&request).await?)
    }

    async fn update_organization(
        &self,
        code: &str,
        organization: &Organization,
    ) -> DomainResult<Response> {
        let request = ApiRequest::patch(format!("organization/{}", code)).json(organization)?;
        Ok(self.http.call(&request).await?)
    }

    async fn delete_organization(&self, code: &str) -> DomainResult<Response> {
        let request = ApiRequest::delete(format!("organization/{}", code));
        Ok(self.http.call(&request).await?)
    }

    async fn add_organization_users(
        &self,
        org_code: &str,
        request: &OrganizationUsersRequest,
    ) -> DomainResult<Response> {
        let request = ApiRequest::post(format!("organizations/{}/users", org_code)).json(request)?;
        Ok(self.http.call(&request).await?)
    }

    async fn remove_organization_user(
        &self,
        org_code: &str,
        user_id: &str,
    ) -> DomainResult<Response> {
        let request = ApiRequest::delete(format!("organizations/{}/users/{}", org_code, user_id));
        Ok(self.http.call(&request).await?)
    }

    // Role operations
    async fn list_roles(&self) -> DomainResult<Vec<Role>> {
        let request = ApiRequest::get("roles");
        Ok(self.http.collect_all::<RolesResponse>(request).await?)
    }

    async fn list_user_roles(&self, user_id: &str, org_code: &str) -> DomainResult<Vec<Role>> {
        let request = ApiRequest::get(Self::user_roles_path(org_code, user_id));
        Ok(self.http.collect_all::<RolesResponse>(request).await?)
    }

    async fn add_user_role(
        &self,
        org_code: &str,
        user_id: &str,
        role_id: &str,
    ) -> DomainResult<Response> {
        let body = RoleAssign {
            role_id: role_id.to_string(),
        };
        let request = ApiRequest::post(Self::user_roles_path(org_code, user_id)).json(&body)?;
        Ok(self.http.call(&request).await?)
    }

    async fn remove_user_role(
        &self,
        org_code: &str,
        user_id: &str,
        role_id: &str,
    ) -> DomainResult<Response> {
        let request = ApiRequest::delete(format!(
            "{}/{}",
            Self::user_roles_path(org_code, user_id),
            role_id
        ));
        Ok(self.http.call(&request).await?)
    }

    // User operations
    async fn list_users(&self) -> DomainResult<Vec<User>> {
        let request = ApiRequest::get("users").query("expand", "organizations");
        Ok(self.http.collect_all::<UsersResponse>(request).await?)
    }

    async fn get_user(&self, user_id: &str) -> DomainResult<User> {
        let request = ApiRequest::get("user")
            .query("id", user_id)
            .query("expand", "organizations");
        Ok(self.http.call(&request).await?)
    }

    async fn create_user(&self, request: &UserCreateRequest) -> DomainResult<UserCreateResponse> {
        let request = ApiRequest::post("user").json(request)?;
        Ok(self.http.call(&request).await?)
    }

    async fn update_user(
        &self,
        user_id: &str,
        request: &UserUpdateRequest,
    ) -> DomainResult<User> {
        let request = ApiRequest::patch("user").query("id", user_id).json(request)?;
        Ok(self.http.call(&request).await?)
    }

    async fn delete_user(&self, user_id: &str) -> DomainResult<Response> {
        let request = ApiRequest::delete("user").query("id", user_id);
        Ok(self.http.call(&request).await?)
    }

    // Identity operations
    async fn list_user_identities(&self, user_id: &str) -> DomainResult<Vec<Identity>> {
        let request = ApiRequest::get(format!("users/{}/identities", user_id));
        Ok(self.http.collect_all::<IdentityResponse>(request).await?)
    }

    async fn create_user_identity(
        &self,
        user_id: &str,
        identity: &Identity,
    ) -> DomainResult<IdentityResponse> {
        let request = ApiRequest::post(format!("users/{}/identities", user_id)).json(identity)?;
        Ok(self.http.call(&request).await?)
    }

    async fn delete_identity(&self, identity_id: &str) -> DomainResult<Response> {
        let request = ApiRequest::delete(format!("identities/{}", identity_id));
        Ok(self.http.call(&request).await?)
    }

    // MFA operations
    async fn get_user_mfa(&self, user_id: &str) -> DomainResult<Option<UserMfa>> {
        let request = ApiRequest::get(format!("users/{}/mfa", user_id));
        let response: UserMfaResponse = self.http.call(&request).await?;
        Ok(response.mfa)
    }

    async fn reset_user_mfa(&self, user_id: &str, factor_id: &str) -> DomainResult<Response> {
        let request = ApiRequest::delete(format!("users/{}/mfa/{}", user_id, factor_id));
        Ok(self.http.call(&request).await?)
    }
}
