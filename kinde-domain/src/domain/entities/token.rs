use crate::domain::errors::AuthError;
use base64::{
    alphabet,
    engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
    Engine as _,
};
use serde::{Deserialize, Deserializer, Serialize};

/// URL-safe alphabet that accepts segments with or without `=` padding.
const JWT_SEGMENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Claims carried by a management API access token
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessToken {
    #[serde(default, deserialize_with = "string_or_list")]
    pub aud: Vec<String>,
    #[serde(default)]
    pub azp: Option<String>,
    /// Expiry, seconds since the Unix epoch
    #[serde(default)]
    pub exp: i64,
    #[serde(default, deserialize_with = "string_or_list")]
    pub gty: Vec<String>,
    #[serde(default)]
    pub iat: i64,
    #[serde(default)]
    pub iss: Option<String>,
    #[serde(default)]
    pub jti: Option<String>,
    #[serde(rename = "scope", default)]
    pub scopes: Option<String>,
}

impl AccessToken {
    /// Decode the claims of a JWT without verifying its signature.
    ///
    /// The token comes straight from the token endpoint over TLS and is only
    /// read for its expiry.
    pub fn decode(jwt: &str) -> Result<Self, AuthError> {
        let segments: Vec<&str> = jwt.split('.').collect();
        if segments.len() != 3 {
            return Err(AuthError::TokenDecode {
                reason: format!("expected 3 segments, found {}", segments.len()),
            });
        }

        let payload = JWT_SEGMENT
            .decode(segments[1])
            .map_err(|e| AuthError::TokenDecode {
                reason: format!("invalid base64 payload: {e}"),
            })?;

        serde_json::from_slice(&payload).map_err(|e| AuthError::TokenDecode {
            reason: format!("invalid claims: {e}"),
        })
    }
}

/// Body returned by `POST /oauth2/token`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AccessTokenResponse {
    #[serde(default)]
    pub access_token: String,
    #[serde(default)]
    pub expires_in: Option<i64>,
    #[serde(default)]
    pub scope: Option<String>,
    #[serde(default)]
    pub token_type: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

fn string_or_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<OneOrMany>::deserialize(deserializer)? {
        Some(OneOrMany::One(value)) => vec![value],
        Some(OneOrMany::Many(values)) => values,
        None => Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;

    /// Build an unsigned token whose payload is `claims`.
    fn jwt_with_claims(claims: &serde_json::Value) -> String {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"RS256","typ":"JWT"}"#);
        let payload = URL_SAFE_NO_PAD.encode(claims.to_string());
        format!("{header}.{payload}.signature")
    }

    #[test]
    fn decodes_claims_from_unpadded_payload() {
        let token = jwt_with_claims(&serde_json::json!({
            "aud": ["https://acme.kinde.com/api"],
            "azp": "client",
            "exp": 1_900_000_000,
            "gty": ["client_credentials"],
            "iat": 1_899_996_400,
            "iss": "https://acme.kinde.com",
            "jti": "abc",
            "scope": "read:users",
        }));

        let claims = AccessToken::decode(&token).unwrap();
        assert_eq!(claims.exp, 1_900_000_000);
        assert_eq!(claims.aud, vec!["https://acme.kinde.com/api".to_string()]);
        assert_eq!(claims.scopes.as_deref(), Some("read:users"));
    }

    #[test]
    fn accepts_padded_payload_and_single_audience() {
        let payload = base64::engine::general_purpose::URL_SAFE.encode(r#"{"aud":"x","exp":5}"#);
        let token = format!("h.{payload}.s");
        let claims = AccessToken::decode(&token).unwrap();
        assert_eq!(claims.aud, vec!["x".to_string()]);
        assert_eq!(claims.exp, 5);
    }

    #[test]
    fn rejects_malformed_tokens() {
        assert!(matches!(
            AccessToken::decode("not-a-jwt"),
            Err(AuthError::TokenDecode { .. })
        ));
        assert!(matches!(
            AccessToken::decode("a.!!!.c"),
            Err(AuthError::TokenDecode { .. })
        ));
        let not_json = URL_SAFE_NO_PAD.encode("plain text");
        assert!(matches!(
            AccessToken::decode(&format!("a.{not_json}.c")),
            Err(AuthError::TokenDecode { .. })
        ));
    }
}
