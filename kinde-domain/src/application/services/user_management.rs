use crate::{
    application::ports::*,
    domain::{
        entities::*,
        errors::{DomainError, DomainResult},
    },
};
use std::fmt;
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{debug, info, instrument, warn};

/// A step of the user update workflow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateStep {
    EmailIdentity,
    UsernameIdentity,
    PhoneIdentity,
    Profile,
}

impl fmt::Display for UpdateStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpdateStep::EmailIdentity => write!(f, "email identity"),
            UpdateStep::UsernameIdentity => write!(f, "username identity"),
            UpdateStep::PhoneIdentity => write!(f, "phone identity"),
            UpdateStep::Profile => write!(f, "profile"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedStep {
    pub step: UpdateStep,
    pub error: String,
}

/// Result of [`UserManagementService::update_user`]
///
/// `user` is always the state re-read after the update. Steps that failed
/// along the way are listed in `failed_steps`; later steps still ran.
#[derive(Debug, Clone)]
pub struct UserUpdateOutcome {
    pub user: User,
    pub failed_steps: Vec<FailedStep>,
}

impl UserUpdateOutcome {
    pub fn is_complete(&self) -> bool {
        self.failed_steps.is_empty()
    }
}

/// User management service implementing business use cases
pub struct UserManagementService {
    repository: Arc<dyn KindeRepository>,
    phone_country_id: String,
}

impl UserManagementService {
    pub fn new(repository: Arc<dyn KindeRepository>, phone_country_id: impl Into<String>) -> Self {
        Self {
            repository,
            phone_country_id: phone_country_id.into(),
        }
    }

    /// List all users with their organization codes.
    ///
    /// With `include_role_ids`, roles are fetched concurrently for every
    /// user and organization pair and merged before returning.
    #[instrument(skip(self))]
    pub async fn list_users(&self, include_role_ids: bool) -> DomainResult<Vec<User>> {
        info!("Listing users");

        let mut users = self.repository.list_users().await?;
        if include_role_ids {
            self.backfill_role_ids(&mut users).await?;
        }

        info!("Found {} users", users.len());
        Ok(users)
    }

    async fn backfill_role_ids(&self, users: &mut [User]) -> DomainResult<()> {
        let mut tasks = JoinSet::new();

        for (index, user) in users.iter().enumerate() {
            let Some(user_id) = user.id.clone().filter(|id| !id.is_empty()) else {
                continue;
            };
            for org_code in &user.organizations {
                let repository = Arc::clone(&self.repository);
                let user_id = user_id.clone();
                let org_code = org_code.clone();
                tasks.spawn(async move {
                    let roles = repository.list_user_roles(&user_id, &org_code).await;
                    (index, roles)
                });
            }
        }

        debug!(tasks = tasks.len(), "Fetching user roles");

        while let Some(joined) = tasks.join_next().await {
            let (index, roles) = joined.map_err(|e| DomainError::ExternalService {
                service: "Kinde".to_string(),
                message: format!("Role lookup task failed: {}", e),
            })?;

            let user = &mut users[index];
            for role_id in roles?.into_iter().filter_map(|role| role.id) {
                if !user.roles.contains(&role_id) {
                    user.roles.push(role_id);
                }
            }
        }

        Ok(())
    }

    /// Get a user, with the phone number read from their phone identity
    #[instrument(skip(self), fields(user_id = %user_id))]
    pub async fn get_user(&self, user_id: &str) -> DomainResult<User> {
        let (user, _) = self.fetch_user_with_identities(user_id).await?;
        Ok(user)
    }

    async fn fetch_user_with_identities(
        &self,
        user_id: &str,
    ) -> DomainResult<(User, Vec<Identity>)> {
        if user_id.is_empty() {
            return Err(DomainError::validation("id", "User id is required"));
        }

        let mut user = self.repository.get_user(user_id).await?;
        let identities = self.repository.list_user_identities(user_id).await?;

        let phone = find_identity(&identities, IdentityType::Phone).and_then(|i| i.value.clone());
        user.set_phone(phone);

        Ok((user, identities))
    }

    /// Create a user from its email, username and phone
    #[instrument(skip(self, user), fields(email = ?user.email))]
    pub async fn add_user(&self, user: &User) -> DomainResult<UserCreateResponse> {
        if user.email.as_deref().map_or(true, str::is_empty) {
            return Err(DomainError::validation("email", "Email is required to create a user"));
        }

        let request = UserCreateRequest::from_user(user, &self.phone_country_id);
        let response = self.repository.create_user(&request).await?;

        info!(user_id = ?response.id, created = response.is_created, "Created user");
        Ok(response)
    }

    /// Apply changes to a user.
    ///
    /// Email, username and phone are identities, which can only be created
    /// or deleted, so each changed one is replaced. The remaining profile
    /// fields are patched on the user itself, and the result is re-read.
    #[instrument(skip(self, user), fields(user_id = ?user.id))]
    pub async fn update_user(&self, user: &User) -> DomainResult<UserUpdateOutcome> {
        let user_id = user.require_id("update")?;
        let (existing, identities) = self.fetch_user_with_identities(user_id).await?;
        let mut failed_steps = Vec::new();

        if let Some(email) = present(user.email.as_deref()) {
            if Some(email) != existing.email.as_deref() {
                let result = self
                    .add_or_update_user_identity(user_id, &Identity::new(IdentityType::Email, email))
                    .await;
                record(&mut failed_steps, UpdateStep::EmailIdentity, result);
            }
        }

        match present(user.username.as_deref()) {
            None => {
                let result = self.delete_identity_of_type(&identities, IdentityType::Username).await;
                record(&mut failed_steps, UpdateStep::UsernameIdentity, result);
            }
            Some(username) if Some(username) != existing.username.as_deref() => {
                let identity = Identity::new(IdentityType::Username, username);
                let result = self.add_or_update_user_identity(user_id, &identity).await;
                record(&mut failed_steps, UpdateStep::UsernameIdentity, result);
            }
            Some(_) => {}
        }

        let existing_phone = existing.phone().map(normalize_phone);
        match present(user.phone()) {
            None => {
                let result = self.delete_identity_of_type(&identities, IdentityType::Phone).await;
                record(&mut failed_steps, UpdateStep::PhoneIdentity, result);
            }
            Some(phone) if Some(normalize_phone(phone)) != existing_phone => {
                let identity =
                    Identity::phone(normalize_phone(phone), self.phone_country_id.as_str());
                let result = self.add_or_update_user_identity(user_id, &identity).await;
                record(&mut failed_steps, UpdateStep::PhoneIdentity, result);
            }
            Some(_) => {}
        }

        let result = self
            .repository
            .update_user(user_id, &UserUpdateRequest::from(user))
            .await;
        record(&mut failed_steps, UpdateStep::Profile, result);

        let user = self.get_user(user_id).await?;

        if failed_steps.is_empty() {
            info!("Updated user");
        } else {
            warn!(failed = failed_steps.len(), "Updated user with failed steps");
        }

        Ok(UserUpdateOutcome { user, failed_steps })
    }

    async fn delete_identity_of_type(
        &self,
        identities: &[Identity],
        identity_type: IdentityType,
    ) -> DomainResult<()> {
        let existing = find_identity(identities, identity_type).and_then(|i| i.id.as_deref());
        if let Some(identity_id) = existing {
            self.repository.delete_identity(identity_id).await?;
        }
        Ok(())
    }

    #[instrument(skip(self), fields(user_id = %user_id))]
    pub async fn delete_user(&self, user_id: &str) -> DomainResult<Response> {
        if user_id.is_empty() {
            return Err(DomainError::validation("id", "User id is required"));
        }
        self.repository.delete_user(user_id).await
    }

    /// Organizations a user belongs to, fetched one at a time
    #[instrument(skip(self), fields(user_id = %user_id))]
    pub async fn get_user_organizations(&self, user_id: &str) -> DomainResult<Vec<Organization>> {
        let user = self.repository.get_user(user_id).await?;

        let mut organizations = Vec::with_capacity(user.organizations.len());
        for code in &user.organizations {
            organizations.push(self.repository.get_organization(code).await?);
        }
        Ok(organizations)
    }

    #[instrument(skip(self), fields(user_id = %user_id, org_code = %org_code))]
    pub async fn add_user_organization(
        &self,
        user_id: &str,
        org_code: &str,
    ) -> DomainResult<Response> {
        self.repository
            .add_organization_users(org_code, &OrganizationUsersRequest::single(user_id))
            .await
    }

    pub async fn add_user_organizations(
        &self,
        user_id: &str,
        org_codes: &[String],
    ) -> DomainResult<Vec<Response>> {
        let mut responses = Vec::with_capacity(org_codes.len());
        for org_code in org_codes {
            responses.push(self.add_user_organization(user_id, org_code).await?);
        }
        Ok(responses)
    }

    /// Remove a user from each organization in turn, one response per organization
    #[instrument(skip(self, org_codes), fields(user_id = %user_id))]
    pub async fn remove_user_organizations(
        &self,
        user_id: &str,
        org_codes: &[String],
    ) -> DomainResult<Vec<Response>> {
        let mut responses = Vec::with_capacity(org_codes.len());
        for org_code in org_codes {
            responses.push(
                self.repository
                    .remove_organization_user(org_code, user_id)
                    .await?,
            );
        }
        Ok(responses)
    }

    pub async fn list_user_identities(&self, user_id: &str) -> DomainResult<Vec<Identity>> {
        self.repository.list_user_identities(user_id).await
    }

    /// Replace the user's identity of the same type with `identity`.
    ///
    /// Identities cannot be modified in place: any existing identity of the
    /// type is deleted first, then the new one is created.
    #[instrument(skip(self, identity), fields(user_id = %user_id, identity_type = ?identity.identity_type))]
    pub async fn add_or_update_user_identity(
        &self,
        user_id: &str,
        identity: &Identity,
    ) -> DomainResult<IdentityResponse> {
        let identity_type = identity
            .identity_type
            .ok_or_else(|| DomainError::validation("type", "Identity type is required"))?;

        let identities = self.repository.list_user_identities(user_id).await?;
        self.delete_identity_of_type(&identities, identity_type).await?;

        let response = self.repository.create_user_identity(user_id, identity).await?;
        debug!(code = %response.code, "Created {} identity", identity_type);
        Ok(response)
    }

    #[instrument(skip(self))]
    pub async fn delete_identity(&self, identity_id: &str) -> DomainResult<Response> {
        self.repository.delete_identity(identity_id).await
    }

    /// The user's enrolled MFA factor, if any
    #[instrument(skip(self))]
    pub async fn get_user_mfa(&self, user_id: &str) -> DomainResult<Option<UserMfa>> {
        self.repository.get_user_mfa(user_id).await
    }

    #[instrument(skip(self))]
    pub async fn reset_user_mfa(&self, user_id: &str, factor_id: &str) -> DomainResult<Response> {
        self.repository.reset_user_mfa(user_id, factor_id).await
    }
}

fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

fn record<T>(failed_steps: &mut Vec<FailedStep>, step: UpdateStep, result: DomainResult<T>) {
    if let Err(e) = result {
        warn!(%step, error = %e, "User update step failed");
        failed_steps.push(FailedStep {
            step,
            error: e.to_string(),
        });
    }
}
