#![allow(dead_code)]

use async_trait::async_trait;
use kinde_domain::{
    application::ports::repository::KindeRepository,
    domain::{
        entities::*,
        errors::{DomainError, DomainResult},
    },
};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

/// In-memory repository that records every call it receives
#[derive(Default)]
pub struct MockKindeRepository {
    pub users: Arc<Mutex<HashMap<String, User>>>,
    pub identities: Arc<Mutex<HashMap<String, Vec<Identity>>>>, // user id -> identities
    pub organizations: Arc<Mutex<Vec<Organization>>>,
    pub roles: Arc<Mutex<Vec<Role>>>,
    pub user_roles: Arc<Mutex<HashMap<(String, String), Vec<Role>>>>, // (user, org) -> roles
    pub mfa: Arc<Mutex<HashMap<String, UserMfa>>>,
    pub calls: Arc<Mutex<Vec<String>>>,
    pub identity_counter: Arc<Mutex<u32>>,
    pub should_fail: Arc<Mutex<bool>>,         // every operation fails
    pub failing: Arc<Mutex<HashSet<String>>>, // only the named operations fail
}

impl MockKindeRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a user together with its identities. The stored user has no
    /// phone, matching the plain user projection of the API.
    pub fn with_user(self, user: User, identities: Vec<Identity>) -> Self {
        let id = user.id.clone().expect("mock users need an id");
        let mut stored = user;
        stored.set_phone(None);
        self.users.lock().unwrap().insert(id.clone(), stored);
        self.identities.lock().unwrap().insert(id, identities);
        self
    }

    pub fn with_organization(self, organization: Organization) -> Self {
        self.organizations.lock().unwrap().push(organization);
        self
    }

    pub fn with_user_roles(self, user_id: &str, org_code: &str, roles: Vec<Role>) -> Self {
        self.user_roles
            .lock()
            .unwrap()
            .insert((user_id.to_string(), org_code.to_string()), roles);
        self
    }

    pub fn set_should_fail(&self, should_fail: bool) {
        *self.should_fail.lock().unwrap() = should_fail;
    }

    pub fn fail_operation(&self, operation: &str) {
        self.failing.lock().unwrap().insert(operation.to_string());
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of calls to `operation`, ignoring arguments
    pub fn call_count(&self, operation: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|call| call.split(':').next() == Some(operation))
            .count()
    }

    pub fn identities_of(&self, user_id: &str) -> Vec<Identity> {
        self.identities
            .lock()
            .unwrap()
            .get(user_id)
            .cloned()
            .unwrap_or_default()
    }

    fn record(&self, operation: &str, argument: &str) -> DomainResult<()> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("{operation}:{argument}"));

        if *self.should_fail.lock().unwrap() || self.failing.lock().unwrap().contains(operation) {
            Err(DomainError::ExternalService {
                service: "mock-kinde".to_string(),
                message: format!("Mock failure for {operation}"),
            })
        } else {
            Ok(())
        }
    }

    fn next_identity_id(&self) -> String {
        let mut counter = self.identity_counter.lock().unwrap();
        *counter += 1;
        format!("identity-{}", counter)
    }

    fn not_found(resource: &str) -> DomainError {
        DomainError::NotFound {
            resource: resource.to_string(),
        }
    }
}

#[async_trait]
impl KindeRepository for MockKindeRepository {
    async fn get_organization(&self, code: &str) -> DomainResult<Organization> {
        self.record("get_organization", code)?;
        self.organizations
            .lock()
            .unwrap()
            .iter()
            .find(|org| org.code.as_deref() == Some(code))
            .cloned()
            .ok_or_else(|| Self::not_found("organization"))
    }

    async fn list_organizations(&self) -> DomainResult<Vec<Organization>> {
        self.record("list_organizations", "")?;
        Ok(self.organizations.lock().unwrap().clone())
    }

    async fn create_organization(&self, organization: &Organization) -> DomainResult<Response> {
        self.record("create_organization", organization.name.as_deref().unwrap_or_default())?;
        self.organizations.lock().unwrap().push(organization.clone());
        Ok(Response::ok("Organization created"))
    }

    async fn update_organization(
        &self,
        code: &str,
        organization: &Organization,
    ) -> DomainResult<Response> {
        self.record("update_organization", code)?;
        let mut organizations = self.organizations.lock().unwrap();
        let existing = organizations
            .iter_mut()
            .find(|org| org.code.as_deref() == Some(code))
            .ok_or_else(|| Self::not_found("organization"))?;
        *existing = organization.clone();
        Ok(Response {
            code: Some("ORGANIZATION_UPDATED".to_string()),
            message: None,
        })
    }

    async fn delete_organization(&self, code: &str) -> DomainResult<Response> {
        self.record("delete_organization", code)?;
        self.organizations
            .lock()
            .unwrap()
            .retain(|org| org.code.as_deref() != Some(code));
        Ok(Response::ok("Organization deleted"))
    }

    async fn add_organization_users(
        &self,
        org_code: &str,
        request: &OrganizationUsersRequest,
    ) -> DomainResult<Response> {
        self.record("add_organization_users", org_code)?;
        let mut users = self.users.lock().unwrap();
        for member in &request.users {
            if let Some(user) = users.get_mut(&member.id) {
                user.organizations.push(org_code.to_string());
            }
        }
        Ok(Response {
            code: Some("ORGANIZATION_USERS_ADDED".to_string()),
            message: None,
        })
    }

    async fn remove_organization_user(
        &self,
        org_code: &str,
        user_id: &str,
    ) -> DomainResult<Response> {
        self.record("remove_organization_user", &format!("{org_code}/{user_id}"))?;
        if let Some(user) = self.users.lock().unwrap().get_mut(user_id) {
            user.organizations.retain(|code| code != org_code);
        }
        Ok(Response::ok("User removed"))
    }

    async fn list_roles(&self) -> DomainResult<Vec<Role>> {
        self.record("list_roles", "")?;
        Ok(self.roles.lock().unwrap().clone())
    }

    async fn list_user_roles(&self, user_id: &str, org_code: &str) -> DomainResult<Vec<Role>> {
        self.record("list_user_roles", &format!("{org_code}/{user_id}"))?;
        Ok(self
            .user_roles
            .lock()
            .unwrap()
            .get(&(user_id.to_string(), org_code.to_string()))
            .cloned()
            .unwrap_or_default())
    }

    async fn add_user_role(
        &self,
        org_code: &str,
        user_id: &str,
        role_id: &str,
    ) -> DomainResult<Response> {
        self.record("add_user_role", &format!("{org_code}/{user_id}/{role_id}"))?;
        self.user_roles
            .lock()
            .unwrap()
            .entry((user_id.to_string(), org_code.to_string()))
            .or_default()
            .push(Role::new(role_id, role_id));
        Ok(Response {
            code: Some("ROLE_ADDED".to_string()),
            message: None,
        })
    }

    async fn remove_user_role(
        &self,
        org_code: &str,
        user_id: &str,
        role_id: &str,
    ) -> DomainResult<Response> {
        self.record("remove_user_role", &format!("{org_code}/{user_id}/{role_id}"))?;
        if let Some(roles) = self
            .user_roles
            .lock()
            .unwrap()
            .get_mut(&(user_id.to_string(), org_code.to_string()))
        {
            roles.retain(|role| role.id.as_deref() != Some(role_id));
        }
        Ok(Response::ok("Role removed"))
    }

    async fn list_users(&self) -> DomainResult<Vec<User>> {
        self.record("list_users", "")?;
        let mut users: Vec<User> = self.users.lock().unwrap().values().cloned().collect();
        users.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(users)
    }

    async fn get_user(&self, user_id: &str) -> DomainResult<User> {
        self.record("get_user", user_id)?;
        self.users
            .lock()
            .unwrap()
            .get(user_id)
            .cloned()
            .ok_or_else(|| Self::not_found("user"))
    }

    async fn create_user(&self, request: &UserCreateRequest) -> DomainResult<UserCreateResponse> {
        self.record("create_user", &request.identities.len().to_string())?;
        let id = format!("kp_{}", self.users.lock().unwrap().len() + 1);
        let email = request
            .identities
            .iter()
            .find_map(|identity| identity.details.email.clone());
        let mut user = User::default().with_id(id.clone());
        user.email = email;
        user.first_name = request.profile.given_name.clone();
        self.users.lock().unwrap().insert(id.clone(), user);
        Ok(UserCreateResponse {
            id: Some(id),
            is_created: true,
        })
    }

    async fn update_user(&self, user_id: &str, request: &UserUpdateRequest) -> DomainResult<User> {
        self.record("update_user", user_id)?;
        let mut users = self.users.lock().unwrap();
        let user = users.get_mut(user_id).ok_or_else(|| Self::not_found("user"))?;
        user.first_name = request.given_name.clone();
        user.last_name = request.family_name.clone();
        user.is_suspended = request.is_suspended;
        Ok(user.clone())
    }

    async fn delete_user(&self, user_id: &str) -> DomainResult<Response> {
        self.record("delete_user", user_id)?;
        self.users.lock().unwrap().remove(user_id);
        Ok(Response::ok("User deleted"))
    }

    async fn list_user_identities(&self, user_id: &str) -> DomainResult<Vec<Identity>> {
        self.record("list_user_identities", user_id)?;
        Ok(self.identities_of(user_id))
    }

    async fn create_user_identity(
        &self,
        user_id: &str,
        identity: &Identity,
    ) -> DomainResult<IdentityResponse> {
        let identity_type = identity.identity_type.map(|t| t.to_string()).unwrap_or_default();
        self.record("create_user_identity", &format!("{user_id}/{identity_type}"))?;

        let mut created = identity.clone();
        created.id = Some(self.next_identity_id());
        self.identities
            .lock()
            .unwrap()
            .entry(user_id.to_string())
            .or_default()
            .push(created.clone());

        // The plain user projection carries email and username
        if let Some(user) = self.users.lock().unwrap().get_mut(user_id) {
            match identity.identity_type {
                Some(IdentityType::Email) => user.email = identity.value.clone(),
                Some(IdentityType::Username) => user.username = identity.value.clone(),
                _ => {}
            }
        }

        Ok(IdentityResponse {
            code: "IDENTITY_ADDED".to_string(),
            identity: created,
            ..IdentityResponse::default()
        })
    }

    async fn delete_identity(&self, identity_id: &str) -> DomainResult<Response> {
        self.record("delete_identity", identity_id)?;
        let mut identities = self.identities.lock().unwrap();
        let mut removed = None;
        for (user_id, list) in identities.iter_mut() {
            if let Some(position) = list.iter().position(|i| i.id.as_deref() == Some(identity_id)) {
                removed = Some((user_id.clone(), list.remove(position)));
                break;
            }
        }

        let (user_id, identity) = removed.ok_or_else(|| Self::not_found("identity"))?;
        if let Some(user) = self.users.lock().unwrap().get_mut(&user_id) {
            match identity.identity_type {
                Some(IdentityType::Email) => user.email = None,
                Some(IdentityType::Username) => user.username = None,
                _ => {}
            }
        }
        Ok(Response::ok("Identity deleted"))
    }

    async fn get_user_mfa(&self, user_id: &str) -> DomainResult<Option<UserMfa>> {
        self.record("get_user_mfa", user_id)?;
        Ok(self.mfa.lock().unwrap().get(user_id).cloned())
    }

    async fn reset_user_mfa(&self, user_id: &str, factor_id: &str) -> DomainResult<Response> {
        self.record("reset_user_mfa", &format!("{user_id}/{factor_id}"))?;
        self.mfa.lock().unwrap().remove(user_id);
        Ok(Response::ok("MFA reset"))
    }
}

/// Identity as the API lists it
pub fn listed_identity(id: &str, identity_type: IdentityType, value: &str) -> Identity {
    Identity {
        id: Some(id.to_string()),
        ..Identity::new(identity_type, value)
    }
}
