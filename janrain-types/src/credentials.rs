//! HTTP basic-auth credentials for Capture API clients.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A Capture API client id/secret pair.
///
/// Applications carry two tiers of these: the owner ("full") client used for
/// administrative entity calls, and the public login client scoped to
/// end-user authentication flows.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientCredentials {
    pub client_id: String,
    pub client_secret: String,
}

impl ClientCredentials {
    /// Creates a credential pair.
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }

    /// An explicitly empty pair. The gateway sends no `Authorization` header
    /// for it, which is what the social endpoints require.
    #[must_use]
    pub fn anonymous() -> Self {
        Self {
            client_id: String::new(),
            client_secret: String::new(),
        }
    }

    /// Returns true when both the id and the secret are empty.
    #[must_use]
    pub fn is_anonymous(&self) -> bool {
        self.client_id.is_empty() && self.client_secret.is_empty()
    }
}

impl fmt::Debug for ClientCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientCredentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}
