//! Client configuration.

use crate::error::{JanrainError, JanrainResult};
use janrain_types::ClientCredentials;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Everything the client needs to reach one Capture application.
///
/// All values are supplied by the embedding application; nothing is read
/// from the environment.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JanrainConfig {
    /// Capture server of the application (e.g. `https://myapp.us.janraincapture.com`).
    pub capture_server_url: String,
    /// Configuration API server.
    pub configuration_server_url: String,
    /// CDN endpoint serving static flow assets.
    pub cdn_url: String,
    /// Owner client, used for administrative calls.
    pub full_client_id: String,
    pub full_client_secret: String,
    /// Public login client, used for end-user authentication flows.
    pub login_client_id: String,
    pub login_client_secret: String,
    /// Capture application id.
    pub app_id: String,
    /// Default locale for flows and translations.
    pub locale: String,
    /// Default flow name.
    pub flow_name: String,
    /// Social login realm URL (e.g. `https://myrealm.rpxnow.com`). When unset
    /// it is derived from the login client's `rpx_realm` setting.
    pub rpx_url: Option<String>,
    /// Whole-request timeout. No timeout is applied when unset.
    pub request_timeout_secs: Option<u64>,
}

impl Default for JanrainConfig {
    fn default() -> Self {
        Self {
            capture_server_url: String::new(),
            configuration_server_url: "https://v1.api.us.janrain.com".to_string(),
            cdn_url: "https://ssl-static.janraincapture.com/widget_data/flow.js".to_string(),
            full_client_id: String::new(),
            full_client_secret: String::new(),
            login_client_id: String::new(),
            login_client_secret: String::new(),
            app_id: String::new(),
            locale: "en-US".to_string(),
            flow_name: "standard".to_string(),
            rpx_url: None,
            request_timeout_secs: None,
        }
    }
}

impl JanrainConfig {
    /// Owner client credentials.
    #[must_use]
    pub fn full_client(&self) -> ClientCredentials {
        ClientCredentials::new(&self.full_client_id, &self.full_client_secret)
    }

    /// Login client credentials.
    #[must_use]
    pub fn login_client(&self) -> ClientCredentials {
        ClientCredentials::new(&self.login_client_id, &self.login_client_secret)
    }

    /// Checks that every endpoint and identifier the client builds URLs from
    /// is present.
    pub fn validate(&self) -> JanrainResult<()> {
        let required = [
            ("capture_server_url", &self.capture_server_url),
            ("configuration_server_url", &self.configuration_server_url),
            ("cdn_url", &self.cdn_url),
            ("app_id", &self.app_id),
            ("locale", &self.locale),
            ("flow_name", &self.flow_name),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(JanrainError::InvalidConfig(format!("{name} must not be empty")));
            }
        }
        Ok(())
    }

    /// Builds the HTTP client used when the caller does not supply one.
    pub fn build_client(&self) -> JanrainResult<Client> {
        let mut builder = Client::builder();
        if let Some(secs) = self.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        builder
            .build()
            .map_err(|e| JanrainError::InvalidConfig(format!("failed to create HTTP client: {e}")))
    }
}

impl fmt::Debug for JanrainConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JanrainConfig")
            .field("capture_server_url", &self.capture_server_url)
            .field("configuration_server_url", &self.configuration_server_url)
            .field("cdn_url", &self.cdn_url)
            .field("full_client_id", &self.full_client_id)
            .field("full_client_secret", &"<redacted>")
            .field("login_client_id", &self.login_client_id)
            .field("login_client_secret", &"<redacted>")
            .field("app_id", &self.app_id)
            .field("locale", &self.locale)
            .field("flow_name", &self.flow_name)
            .field("rpx_url", &self.rpx_url)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}
