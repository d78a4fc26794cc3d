//! Service responses and the normalized success/error outcome.
//!
//! Every Capture endpoint answers with a JSON document whose `stat` field is
//! `"ok"` on success. Anything else, including a missing `stat`, is a
//! remote rejection. A rejection is data, not an error: it is surfaced as
//! [`Outcome::Failure`] carrying whatever error fields the remote included,
//! with absent fields defaulted so callers never check for missing keys.

use crate::Result;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

/// The `stat` value that marks a successful response.
pub const STAT_OK: &str = "ok";

/// A decoded response body, kept untyped until the caller projects it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServiceResponse(Value);

impl ServiceResponse {
    pub fn new(body: Value) -> Self {
        Self(body)
    }

    #[must_use]
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    #[must_use]
    pub fn into_value(self) -> Value {
        self.0
    }

    /// The `stat` field, when it is a string.
    #[must_use]
    pub fn stat(&self) -> Option<&str> {
        self.0.get("stat").and_then(Value::as_str)
    }

    /// Returns true when the response carries a `stat` field of any kind.
    #[must_use]
    pub fn has_stat(&self) -> bool {
        self.0.get("stat").is_some()
    }

    /// Returns true only for `stat == "ok"`.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.stat() == Some(STAT_OK)
    }

    /// Returns a top-level field, if present.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// Returns a top-level field as text, or an empty string when absent.
    #[must_use]
    pub fn text(&self, name: &str) -> String {
        text_field(&self.0, name)
    }

    /// Decodes the whole body into a success payload.
    pub fn payload<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(T::deserialize(&self.0)?)
    }

    /// Splits on `stat`: the decoded payload on success, the defaulted error
    /// fields otherwise.
    pub fn into_outcome<T: DeserializeOwned>(self) -> Result<Outcome<T>> {
        self.into_outcome_with(ErrorDetails::from_response)
    }

    /// Like [`into_outcome`](Self::into_outcome) with a custom failure shape.
    pub fn into_outcome_with<T, E, F>(self, on_failure: F) -> Result<Outcome<T, E>>
    where
        T: DeserializeOwned,
        F: FnOnce(&ServiceResponse) -> E,
    {
        if self.is_ok() {
            Ok(Outcome::Success(self.payload()?))
        } else {
            Ok(Outcome::Failure(on_failure(&self)))
        }
    }
}

impl From<Value> for ServiceResponse {
    fn from(body: Value) -> Self {
        Self(body)
    }
}

/// Normalized result of a remote operation.
///
/// Serializes flat, with a leading `has_errors` flag, e.g.
/// `{"has_errors": false, "access_token": "..."}`.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T, E = ErrorDetails> {
    Success(T),
    Failure(E),
}

impl<T, E> Outcome<T, E> {
    #[must_use]
    pub fn has_errors(&self) -> bool {
        matches!(self, Self::Failure(_))
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn success(self) -> Option<T> {
        match self {
            Self::Success(payload) => Some(payload),
            Self::Failure(_) => None,
        }
    }

    pub fn failure(self) -> Option<E> {
        match self {
            Self::Success(_) => None,
            Self::Failure(details) => Some(details),
        }
    }

    pub fn as_success(&self) -> Option<&T> {
        match self {
            Self::Success(payload) => Some(payload),
            Self::Failure(_) => None,
        }
    }

    pub fn as_failure(&self) -> Option<&E> {
        match self {
            Self::Success(_) => None,
            Self::Failure(details) => Some(details),
        }
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Outcome<U, E> {
        match self {
            Self::Success(payload) => Outcome::Success(f(payload)),
            Self::Failure(details) => Outcome::Failure(details),
        }
    }

    pub fn into_result(self) -> std::result::Result<T, E> {
        match self {
            Self::Success(payload) => Ok(payload),
            Self::Failure(details) => Err(details),
        }
    }
}

impl<T: Serialize, E: Serialize> Serialize for Outcome<T, E> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let (has_errors, body) = match self {
            Self::Success(payload) => (false, serde_json::to_value(payload)),
            Self::Failure(details) => (true, serde_json::to_value(details)),
        };
        let body = body.map_err(serde::ser::Error::custom)?;

        let mut flat = Map::new();
        flat.insert("has_errors".to_string(), Value::Bool(has_errors));
        match body {
            Value::Object(fields) => flat.extend(fields),
            Value::Null => {}
            other => {
                flat.insert("result".to_string(), other);
            }
        }
        flat.serialize(serializer)
    }
}

/// Error fields projected from a rejected response.
///
/// `code` is kept as the remote sent it (usually a number); the text fields
/// default to `""` and `invalid_fields` to `[]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorDetails {
    pub error: String,
    pub code: Value,
    pub error_description: String,
    pub invalid_fields: Value,
}

impl Default for ErrorDetails {
    fn default() -> Self {
        Self {
            error: String::new(),
            code: Value::String(String::new()),
            error_description: String::new(),
            invalid_fields: Value::Array(Vec::new()),
        }
    }
}

impl ErrorDetails {
    /// Projects the standard error fields, defaulting each absent one.
    pub fn from_response(response: &ServiceResponse) -> Self {
        let body = response.as_value();
        Self {
            error: text_field(body, "error"),
            code: body
                .get("code")
                .filter(|code| !code.is_null())
                .cloned()
                .unwrap_or_else(|| Value::String(String::new())),
            error_description: text_field(body, "error_description"),
            invalid_fields: body
                .get("invalid_fields")
                .filter(|fields| !fields.is_null())
                .cloned()
                .unwrap_or_else(|| Value::Array(Vec::new())),
        }
    }

    /// Like [`from_response`](Self::from_response), folding a top-level
    /// `message` into `invalid_fields` as `{form_name: [message]}` when the
    /// remote reported no field errors of its own.
    pub fn from_form_response(response: &ServiceResponse, form_name: &str) -> Self {
        let mut details = Self::from_response(response);
        let message = response.text("message");
        if !message.is_empty() && is_blank(&details.invalid_fields) {
            let mut fields = Map::new();
            fields.insert(
                form_name.to_string(),
                Value::Array(vec![Value::String(message)]),
            );
            details.invalid_fields = Value::Object(fields);
        }
        details
    }

    /// Configuration API rejections carry an `errors` member instead of
    /// `stat`; it is surfaced through `invalid_fields`.
    pub fn from_configuration_response(response: &ServiceResponse) -> Self {
        let mut details = Self::from_response(response);
        if let Some(errors) = response.field("errors").filter(|e| !e.is_null()) {
            if is_blank(&details.invalid_fields) {
                details.invalid_fields = errors.clone();
            }
        }
        details
    }

    /// A failure produced locally rather than by the remote.
    pub fn local(error: impl Into<String>, error_description: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            error_description: error_description.into(),
            ..Self::default()
        }
    }
}

/// Failure shape of the social sign-in call (`/oauth/auth_native`).
///
/// A rejection there is often a prompt to finish registration: the remote
/// returns the pre-registration fields gathered from the provider, or names
/// the provider an existing account was created with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocialAuthFailure {
    pub code: Value,
    pub error_description: String,
    pub user_data: Value,
    pub request_id: String,
    pub existing_provider: String,
}

impl SocialAuthFailure {
    pub fn from_response(response: &ServiceResponse) -> Self {
        let body = response.as_value();
        Self {
            code: body
                .get("code")
                .filter(|code| !code.is_null())
                .cloned()
                .unwrap_or_else(|| Value::String(String::new())),
            error_description: text_field(body, "error_description"),
            user_data: body
                .get("prereg_fields")
                .filter(|fields| !fields.is_null())
                .cloned()
                .unwrap_or_else(|| Value::Array(Vec::new())),
            request_id: text_field(body, "request_id"),
            existing_provider: text_field(body, "existing_provider"),
        }
    }
}

fn text_field(body: &Value, name: &str) -> String {
    match body.get(name) {
        Some(Value::String(text)) => text.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}
