use super::common::*;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Domain entity representing a Kinde organization
///
/// `is_default` and `created` are read-only; they are never sent back.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(into = "OrganizationPayload")]
pub struct Organization {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub handle: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_default: bool,
    #[serde(default)]
    pub external_id: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_auto_membership_enabled: bool,
    #[serde(rename = "created_on", default, deserialize_with = "lenient_timestamp")]
    pub created: Option<DateTime<Utc>>,
}

impl Organization {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }
}

/// Write shape of an organization.
///
/// `is_allow_registrations` is the deprecated name of the auto-membership
/// flag; the update endpoint still reads it, so both are sent.
#[derive(Debug, Serialize)]
struct OrganizationPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    handle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    external_id: Option<String>,
    is_auto_membership_enabled: bool,
    is_allow_registrations: bool,
}

impl From<Organization> for OrganizationPayload {
    fn from(org: Organization) -> Self {
        Self {
            code: org.code,
            name: org.name,
            handle: org.handle,
            external_id: org.external_id,
            is_auto_membership_enabled: org.is_auto_membership_enabled,
            is_allow_registrations: org.is_auto_membership_enabled,
        }
    }
}

/// Page of `GET organizations`
#[derive(Debug, Default, Deserialize)]
pub struct OrganizationsResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub code: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub next_token: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub organizations: Vec<Organization>,
}

impl PagedResponse for OrganizationsResponse {
    type Item = Organization;

    fn into_items(self) -> Vec<Organization> {
        self.organizations
    }

    fn next_token(&self) -> Option<&str> {
        non_empty(Some(self.next_token.as_str()))
    }
}
