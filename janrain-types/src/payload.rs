//! Success payloads, one per remote operation.
//!
//! Each struct names the fields the facade projects out of an `"ok"`
//! response. Missing, `null` or mistyped fields fall back to their
//! defaults; unknown fields are ignored.

use crate::flow::FieldDescriptor;
use crate::lenient;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Payload for operations whose success carries no data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Acknowledged {}

/// `/access/getAccessToken`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccessToken {
    #[serde(rename = "accessToken", deserialize_with = "lenient::text")]
    pub access_token: String,
}

/// `/access/getAuthorizationCode`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthorizationCode {
    #[serde(rename = "authorizationCode", deserialize_with = "lenient::text")]
    pub authorization_code: String,
}

/// `/access/getCreationToken`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CreationToken {
    #[serde(deserialize_with = "lenient::text")]
    pub creation_token: String,
}

/// `/access/getVerificationCode`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VerificationCode {
    #[serde(
        rename(serialize = "verificationCode", deserialize = "verification_code"),
        deserialize_with = "lenient::text"
    )]
    pub verification_code: String,
}

/// `/access/useVerificationCode`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VerifiedEntity {
    #[serde(deserialize_with = "lenient::text")]
    pub uuid: String,
}

/// Signed-in session returned by the native sign-in and social
/// registration calls.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthSession {
    pub capture_user: Value,
    #[serde(deserialize_with = "lenient::text")]
    pub access_token: String,
    #[serde(deserialize_with = "lenient::text")]
    pub authorization_code: String,
}

/// `/oauth/register_native_traditional`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Registration {
    pub capture_user: Value,
    #[serde(deserialize_with = "lenient::text")]
    pub access_token: String,
}

/// `/oauth/token`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrantTokens {
    #[serde(deserialize_with = "lenient::text")]
    pub access_token: String,
    #[serde(deserialize_with = "lenient::count")]
    pub expires_in: u64,
    #[serde(deserialize_with = "lenient::text")]
    pub refresh_token: String,
}

/// `/entity`: the record's attribute map.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EntityRecord {
    #[serde(deserialize_with = "lenient::or_default")]
    pub result: Map<String, Value>,
}

/// `/entity.find`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EntitySearch {
    #[serde(deserialize_with = "lenient::count")]
    pub result_count: u64,
    #[serde(deserialize_with = "lenient::or_default")]
    pub results: Vec<Value>,
}

/// `/entity.create`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EntityCreated {
    #[serde(deserialize_with = "lenient::count")]
    pub id: u64,
    #[serde(deserialize_with = "lenient::text")]
    pub uuid: String,
}

/// One entry of a flow's version history.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowVersion {
    #[serde(deserialize_with = "lenient::text")]
    pub change: String,
    #[serde(deserialize_with = "lenient::text")]
    pub version: String,
}

/// `/config/{app}/flows/{flow}/versions`. The remote sends a bare array.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowVersions {
    pub versions: Vec<FlowVersion>,
}

/// A field reference inside a configured form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldReference {
    #[serde(deserialize_with = "lenient::text")]
    pub name: String,
    #[serde(deserialize_with = "lenient::flag")]
    pub required: bool,
    #[serde(rename = "_self", deserialize_with = "lenient::text")]
    pub self_link: String,
}

/// `/config/{app}/flows/{flow}/forms/{form}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormLayout {
    #[serde(rename = "_self", deserialize_with = "lenient::text")]
    pub self_link: String,
    #[serde(deserialize_with = "lenient::items")]
    pub fields: Vec<FieldReference>,
}

/// `/config/{app}/flows/{flow}/fields/{field}`: the raw descriptor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldConfiguration {
    pub result: Map<String, Value>,
}

/// One API client as listed by `/clients/list`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientDescriptor {
    #[serde(deserialize_with = "lenient::text")]
    pub client_id: String,
    #[serde(deserialize_with = "lenient::text")]
    pub client_secret: String,
    #[serde(deserialize_with = "lenient::text")]
    pub description: String,
    #[serde(deserialize_with = "lenient::texts")]
    pub features: Vec<String>,
    #[serde(deserialize_with = "lenient::texts")]
    pub whitelist: Vec<String>,
}

/// `/clients/list`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientList {
    #[serde(deserialize_with = "lenient::items")]
    pub results: Vec<ClientDescriptor>,
}

/// `/settings/items`: every setting visible to a client.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientSettings {
    #[serde(deserialize_with = "lenient::or_default")]
    pub result: Map<String, Value>,
}

impl ClientSettings {
    /// Returns one setting as text.
    #[must_use]
    pub fn item(&self, name: &str) -> Option<String> {
        match self.result.get(name)? {
            Value::String(text) => Some(text.clone()),
            Value::Null => None,
            other => Some(other.to_string()),
        }
    }
}

/// `/api/v2/get_available_providers`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AvailableProviders {
    #[serde(deserialize_with = "lenient::texts")]
    pub signin: Vec<String>,
    #[serde(deserialize_with = "lenient::texts")]
    pub social: Vec<String>,
    #[serde(deserialize_with = "lenient::texts")]
    pub share: Vec<String>,
}

/// `/api/v2/providers`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Providers {
    #[serde(deserialize_with = "lenient::texts")]
    pub signin: Vec<String>,
    #[serde(deserialize_with = "lenient::texts")]
    pub social: Vec<String>,
    #[serde(rename = "shareWidget")]
    pub share_widget: Value,
}

/// Ordered field descriptors of a form, resolved from the flow document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormFields {
    pub results: Vec<FieldDescriptor>,
}

/// A translated string from the flow document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Translation {
    pub result: Value,
}
