use crate::domain::{entities::*, errors::DomainResult};
use async_trait::async_trait;

/// Repository port for the Kinde management API
///
/// One method per vendor endpoint. Paged collections come back fully
/// collected; mutating calls return the vendor's status envelope.
#[async_trait]
pub trait KindeRepository: Send + Sync {
    // Organization operations
    async fn get_organization(&self, code: &str) -> DomainResult<Organization>;
    async fn list_organizations(&self) -> DomainResult<Vec<Organization>>;
    async fn create_organization(&self, organization: &Organization) -> DomainResult<Response>;
    async fn update_organization(
        &self,
        code: &str,
        organization: &Organization,
    ) -> DomainResult<Response>;
    async fn delete_organization(&self, code: &str) -> DomainResult<Response>;
    async fn add_organization_users(
        &self,
        org_code: &str,
        request: &OrganizationUsersRequest,
    ) -> DomainResult<Response>;
    async fn remove_organization_user(&self, org_code: &str, user_id: &str)
        -> DomainResult<Response>;

    // Role operations
    async fn list_roles(&self) -> DomainResult<Vec<Role>>;
    async fn list_user_roles(&self, user_id: &str, org_code: &str) -> DomainResult<Vec<Role>>;
    async fn add_user_role(
        &self,
        org_code: &str,
        user_id: &str,
        role_id: &str,
    ) -> DomainResult<Response>;
    async fn remove_user_role(
        &self,
        org_code: &str,
        user_id: &str,
        role_id: &str,
    ) -> DomainResult<Response>;

    // User operations
    async fn list_users(&self) -> DomainResult<Vec<User>>;
    /// The plain user projection; phone is not included.
    async fn get_user(&self, user_id: &str) -> DomainResult<User>;
    async fn create_user(&self, request: &UserCreateRequest) -> DomainResult<UserCreateResponse>;
    async fn update_user(&self, user_id: &str, request: &UserUpdateRequest)
        -> DomainResult<User>;
    async fn delete_user(&self, user_id: &str) -> DomainResult<Response>;

    // Identity operations
    async fn list_user_identities(&self, user_id: &str) -> DomainResult<Vec<Identity>>;
    async fn create_user_identity(
        &self,
        user_id: &str,
        identity: &Identity,
    ) -> DomainResult<IdentityResponse>;
    async fn delete_identity(&self, identity_id: &str) -> DomainResult<Response>;

    // MFA operations
    async fn get_user_mfa(&self, user_id: &str) -> DomainResult<Option<UserMfa>>;
    async fn reset_user_mfa(&self, user_id: &str, factor_id: &str) -> DomainResult<Response>;
}
