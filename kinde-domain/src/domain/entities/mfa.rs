use super::common::*;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A multi-factor authentication method enrolled by a user
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserMfa {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(rename = "type", default)]
    pub mfa_type: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub created_on: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_verified: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub usage_count: i64,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub last_used_on: Option<DateTime<Utc>>,
}

/// Envelope of `GET users/{id}/mfa`
#[derive(Debug, Default, Deserialize)]
pub struct UserMfaResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub code: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
    #[serde(default)]
    pub mfa: Option<UserMfa>,
}
