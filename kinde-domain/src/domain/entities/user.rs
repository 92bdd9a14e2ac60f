use super::common::*;
use super::identity::{Identity, IdentityDetail, IdentityType};
use crate::domain::errors::{DomainError, DomainResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Domain entity representing a Kinde user
///
/// The phone number is kept private so every assignment goes through
/// [`User::set_phone`], which strips a leading `+1`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "UserRecord")]
pub struct User {
    pub id: Option<String>,
    pub username: Option<String>,
    pub email: Option<String>,
    phone: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub picture_url: Option<String>,
    pub joined: Option<DateTime<Utc>>,
    pub created: Option<DateTime<Utc>>,
    pub last_login: Option<DateTime<Utc>>,
    pub is_suspended: bool,
    pub is_password_reset_requested: bool,
    pub total_logins: i64,
    pub failed_logins: i64,
    /// Role ids, only populated when explicitly requested
    pub roles: Vec<String>,
    /// Organization codes the user belongs to
    pub organizations: Vec<String>,
}

impl User {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: Some(email.into()),
            ..Self::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.set_phone(Some(phone.into()));
        self
    }

    pub fn with_organization(mut self, org_code: impl Into<String>) -> Self {
        self.organizations.push(org_code.into());
        self
    }

    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }

    pub fn set_phone(&mut self, phone: Option<String>) {
        self.phone = phone.map(|p| normalize_phone(&p));
    }

    /// First organization code, if the user belongs to any
    pub fn organization_code(&self) -> Option<&str> {
        self.organizations.first().map(String::as_str)
    }

    pub fn has_organization_code(&self) -> bool {
        !self.organizations.is_empty()
    }

    /// Id, or a validation error naming the operation that needed it.
    pub fn require_id(&self, operation: &str) -> DomainResult<&str> {
        non_empty(self.id.as_deref()).ok_or_else(|| {
            DomainError::validation(
                "id",
                format!("User id is required for {operation}"),
            )
        })
    }
}

/// Wire shape of a user as returned by `GET user` and `GET users`
#[derive(Debug, Default, Deserialize)]
struct UserRecord {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    username: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    preferred_email: Option<String>,
    #[serde(default)]
    phone: Option<String>,
    #[serde(default)]
    first_name: Option<String>,
    #[serde(default)]
    last_name: Option<String>,
    #[serde(default)]
    given_name: Option<String>,
    #[serde(default)]
    family_name: Option<String>,
    #[serde(default)]
    picture: Option<String>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    joined_on: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    created_on: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    last_signed_in: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "null_as_default")]
    is_suspended: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    is_password_reset_requested: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    total_sign_ins: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    failed_sign_ins: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    roles: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    organizations: Vec<String>,
}

impl From<UserRecord> for User {
    fn from(record: UserRecord) -> Self {
        let mut user = User {
            id: record.id,
            username: record.username,
            email: record.preferred_email.or(record.email),
            phone: None,
            first_name: record.first_name.or(record.given_name),
            last_name: record.last_name.or(record.family_name),
            picture_url: record.picture,
            joined: record.joined_on,
            created: record.created_on,
            last_login: record.last_signed_in,
            is_suspended: record.is_suspended,
            is_password_reset_requested: record.is_password_reset_requested,
            total_logins: record.total_sign_ins,
            failed_logins: record.failed_sign_ins,
            roles: record.roles,
            organizations: record.organizations,
        };
        user.set_phone(record.phone);
        user
    }
}

/// Body of `PATCH user?id=...`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UserUpdateRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub given_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub family_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,
    pub is_suspended: bool,
    pub is_password_reset_requested: bool,
}

impl From<&User> for UserUpdateRequest {
    fn from(user: &User) -> Self {
        Self {
            given_name: user.first_name.clone(),
            family_name: user.last_name.clone(),
            picture: user.picture_url.clone(),
            is_suspended: user.is_suspended,
            is_password_reset_requested: user.is_password_reset_requested,
        }
    }
}

/// Profile block of a user-creation request
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UserProfile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub given_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub family_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,
}

/// Body of `POST user`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UserCreateRequest {
    pub profile: UserProfile,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization_code: Option<String>,
    #[serde(rename = "provided_id", skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    pub identities: Vec<Identity>,
}

impl UserCreateRequest {
    /// Build a creation payload. The email identity is always included;
    /// username and phone identities only when they carry a value.
    pub fn from_user(user: &User, phone_country_id: &str) -> Self {
        let mut identities = vec![Identity::for_creation(
            IdentityType::Email,
            IdentityDetail {
                email: user.email.clone(),
                ..IdentityDetail::default()
            },
        )];

        if let Some(username) = non_empty(user.username.as_deref()) {
            identities.push(Identity::for_creation(
                IdentityType::Username,
                IdentityDetail {
                    username: Some(username.to_string()),
                    ..IdentityDetail::default()
                },
            ));
        }

        if let Some(phone) = non_empty(user.phone()) {
            identities.push(Identity::for_creation(
                IdentityType::Phone,
                IdentityDetail {
                    phone: Some(phone.to_string()),
                    phone_country_id: Some(phone_country_id.to_string()),
                    ..IdentityDetail::default()
                },
            ));
        }

        Self {
            profile: UserProfile {
                given_name: user.first_name.clone(),
                family_name: user.last_name.clone(),
                picture: None,
            },
            organization_code: user.organization_code().map(str::to_string),
            external_id: None,
            identities,
        }
    }
}

/// Response of `POST user`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UserCreateResponse {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(rename = "created", default, deserialize_with = "null_as_default")]
    pub is_created: bool,
}

/// Page of `GET users`
#[derive(Debug, Default, Deserialize)]
pub struct UsersResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub code: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub next_token: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub users: Vec<User>,
}

impl PagedResponse for UsersResponse {
    type Item = User;

    fn into_items(self) -> Vec<User> {
        self.users
    }

    fn next_token(&self) -> Option<&str> {
        non_empty(Some(self.next_token.as_str()))
    }
}

/// Reference to a user when adding members to an organization
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrganizationUser {
    pub id: String,
}

/// Body of `POST organizations/{code}/users`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OrganizationUsersRequest {
    pub users: Vec<OrganizationUser>,
}

impl OrganizationUsersRequest {
    pub fn single(user_id: impl Into<String>) -> Self {
        Self {
            users: vec![OrganizationUser { id: user_id.into() }],
        }
    }
}
