use super::common::*;
use serde::{Deserialize, Serialize};

/// Domain entity representing a Kinde role
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "is_default_role", default, deserialize_with = "null_as_default")]
    pub is_default: bool,
}

impl Role {
    pub fn new(id: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            key: Some(key.into()),
            ..Self::default()
        }
    }
}

/// Body of `POST organizations/{org}/users/{user}/roles`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoleAssign {
    pub role_id: String,
}

/// Page of `GET roles` and `GET organizations/{org}/users/{user}/roles`
#[derive(Debug, Default, Deserialize)]
pub struct RolesResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub code: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub next_token: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub roles: Vec<Role>,
}

impl PagedResponse for RolesResponse {
    type Item = Role;

    fn into_items(self) -> Vec<Role> {
        self.roles
    }

    fn next_token(&self) -> Option<&str> {
        non_empty(Some(self.next_token.as_str()))
    }
}
