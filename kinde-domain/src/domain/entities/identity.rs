use super::common::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of sign-in identity attached to a user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdentityType {
    Email,
    Username,
    Phone,
    Enterprise,
    Social,
    #[serde(other)]
    Unknown,
}

impl fmt::Display for IdentityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            IdentityType::Email => "email",
            IdentityType::Username => "username",
            IdentityType::Phone => "phone",
            IdentityType::Enterprise => "enterprise",
            IdentityType::Social => "social",
            IdentityType::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

/// Typed identity details, used when identities are created together with a user
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityDetail {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Only needed alongside `phone`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_country_id: Option<String>,
}

impl IdentityDetail {
    pub fn is_empty(&self) -> bool {
        self == &IdentityDetail::default()
    }
}

/// A user identity (email address, username, phone number, social or
/// enterprise login).
///
/// The management API has no update operation for identities; changing one
/// means deleting it and creating a replacement.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub identity_type: Option<IdentityType>,
    /// Required by the create-identity endpoint when the type is phone
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_country_id: Option<String>,
    /// Email, username, phone number or social handle. Responses carry it as `name`.
    #[serde(default, alias = "name", skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_primary: Option<bool>,
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "IdentityDetail::is_empty")]
    pub details: IdentityDetail,
}

impl Identity {
    pub fn new(identity_type: IdentityType, value: impl Into<String>) -> Self {
        Self {
            identity_type: Some(identity_type),
            value: Some(value.into()),
            ..Self::default()
        }
    }

    pub fn phone(value: impl Into<String>, phone_country_id: impl Into<String>) -> Self {
        Self {
            phone_country_id: Some(phone_country_id.into()),
            ..Self::new(IdentityType::Phone, value)
        }
    }

    pub(crate) fn for_creation(identity_type: IdentityType, details: IdentityDetail) -> Self {
        Self {
            identity_type: Some(identity_type),
            details,
            ..Self::default()
        }
    }

    pub fn is_type(&self, identity_type: IdentityType) -> bool {
        self.identity_type == Some(identity_type)
    }
}

/// Find the first identity of a type that can be addressed by id.
pub fn find_identity(identities: &[Identity], identity_type: IdentityType) -> Option<&Identity> {
    identities.iter().find(|i| i.is_type(identity_type))
}

/// Envelope of the identity endpoints: `identity` on create, `identities` on list
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IdentityResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub code: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub next_token: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub identity: Identity,
    #[serde(default, deserialize_with = "null_as_default")]
    pub identities: Vec<Identity>,
}

impl PagedResponse for IdentityResponse {
    type Item = Identity;

    fn into_items(self) -> Vec<Identity> {
        self.identities
    }

    fn next_token(&self) -> Option<&str> {
        non_empty(Some(self.next_token.as_str()))
    }
}
