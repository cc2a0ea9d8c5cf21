//! LinkedIn login types.

use crate::profile::ExtendedProfile;
use serde::{Deserialize, Deserializer, Serialize};
use std::time::Duration;

/// Token metadata handed over by the host after its token exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenInfo {
    pub access_token: String,
    pub expires_in: Option<Duration>,
}

impl TokenInfo {
    /// Build token info from the raw `expires_in` string of the token response.
    ///
    /// Anything that is not a base-10 count of seconds leaves the expiry unset.
    pub fn new(access_token: impl Into<String>, expires_in: &str) -> Self {
        Self {
            access_token: access_token.into(),
            expires_in: parse_expiry(expires_in),
        }
    }
}

fn parse_expiry(raw: &str) -> Option<Duration> {
    raw.trim().parse::<u64>().ok().map(Duration::from_secs)
}

/// Identity data needed to establish a signed-in session.
#[derive(Debug, Clone, PartialEq)]
pub struct IdentityFields {
    /// External LinkedIn member id, unset when the document has no `id`.
    pub id: Option<String>,
    pub given_name: Option<String>,
    pub family_name: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub headline: Option<String>,
    pub industry: Option<String>,
    pub public_profile_url: Option<String>,
    pub picture_url: Option<String>,
    /// The profile document as received.
    pub profile: serde_json::Value,
    pub access_token: String,
    pub expires_in: Option<Duration>,
    /// JSON encoding of the [`ExtendedProfile`] projected from the same document.
    pub extended_profile: String,
}

/// Callback payload the host passes to [`crate::LinkedInProvider`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkedInAuthPayload {
    pub access_token: String,
    /// Seconds until expiry as reported by the token endpoint. Numbers are
    /// accepted as well as strings.
    #[serde(default, deserialize_with = "expiry_as_string")]
    pub expires_in: Option<String>,
    /// Profile document fetched from the people endpoint.
    pub profile: serde_json::Value,
}

fn expiry_as_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// Both projections of a LinkedIn login.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkedInAuthentication {
    pub identity: IdentityFields,
    pub profile: ExtendedProfile,
}
