use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Codes the management API uses to report a successful mutation.
const SUCCESS_CODES: [&str; 3] = ["ok", "updated", "added"];

/// Generic status envelope returned by mutating endpoints
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Response {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            code: Some("OK".to_string()),
            message: Some(message.into()),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            code: Some("Error".to_string()),
            message: Some(message.into()),
        }
    }

    /// A response is successful when its code contains one of the success
    /// markers, ignoring case.
    pub fn is_successful(&self) -> bool {
        match self.code.as_deref() {
            Some(code) if !code.is_empty() => {
                let code = code.to_lowercase();
                SUCCESS_CODES.iter().any(|marker| code.contains(marker))
            }
            _ => false,
        }
    }
}

/// A page of a resource collection.
///
/// Each list envelope names its collection field differently, so the walker
/// reaches items and the continuation token through this trait.
pub trait PagedResponse: Send {
    type Item: Send;

    fn into_items(self) -> Vec<Self::Item>;

    fn next_token(&self) -> Option<&str>;
}

/// Treat an explicit JSON `null` like an absent field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Parse a vendor timestamp, tolerating a missing offset (assumed UTC) and
/// unparseable values (treated as absent).
pub(crate) fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_timestamp))
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

/// Returns `None` for empty strings so optional identity values compare
/// the way a cleared form field does.
pub(crate) fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Strip a leading North American country code.
pub fn normalize_phone(phone: &str) -> String {
    phone.strip_prefix("+1").unwrap_or(phone).to_string()
}
