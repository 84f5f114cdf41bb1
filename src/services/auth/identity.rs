use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Caller profile as returned by the identity provider's `/userinfo` endpoint.
///
/// - Built fresh for every request by the token validator, never stored.
/// - `sub` is guaranteed non-empty; every other field is optional on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identity {
    #[serde(deserialize_with = "non_empty")]
    pub sub: String,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub client_id: Option<String>,

    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub nickname: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub email_verified: bool,
    #[serde(default)]
    pub picture: Option<String>,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub identities: Vec<LinkedIdentity>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub app_metadata: AppMetadata,
    #[serde(default, deserialize_with = "null_as_default")]
    pub user_metadata: serde_json::Map<String, serde_json::Value>,
}

/// An upstream account linked to the identity (social login, database connection, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkedIdentity {
    #[serde(default, deserialize_with = "null_as_default")]
    pub connection: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub provider: String,
    #[serde(rename = "isSocial", default, deserialize_with = "null_as_default")]
    pub is_social: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub user_id: String,
}

/// Provider-managed metadata. Only the admin flag is consumed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppMetadata {
    #[serde(default, deserialize_with = "null_as_default")]
    pub admin: bool,
}

impl Identity {
    /// The provider's admin claim, taken verbatim.
    pub fn is_admin(&self) -> bool {
        self.app_metadata.admin
    }
}

// `null` decodes like an absent key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

fn non_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    if s.trim().is_empty() {
        return Err(serde::de::Error::custom("empty 'sub' claim"));
    }
    Ok(s)
}
