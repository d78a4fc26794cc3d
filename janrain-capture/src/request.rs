//! HTTP gateway shared by every service module.
//!
//! Each call sends its parameters as an `application/x-www-form-urlencoded`
//! body (also for `GET`), optionally authenticated with HTTP Basic, and
//! decodes the reply as JSON. A decoded reply whose `stat` is present but not
//! `"ok"` is logged at error level and still returned to the caller.

use crate::error::{JanrainError, JanrainResult};
use janrain_types::{ClientCredentials, FormParams, ServiceResponse};
use reqwest::Client;
use reqwest::header::ACCEPT;
use serde_json::Value;
use tracing::{debug, error};

/// Default `Accept` header for Capture calls.
pub const ACCEPT_JSON: &str = "application/json";

/// HTTP verb of a service call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
        }
    }
}

/// One call to a remote service, built by a service module.
#[derive(Debug, Clone)]
pub struct ServiceRequest {
    pub base_url: String,
    pub path: String,
    pub method: Method,
    pub params: FormParams,
    pub credentials: Option<ClientCredentials>,
    pub accept: String,
}

impl ServiceRequest {
    pub fn new(method: Method, base_url: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            path: path.into(),
            method,
            params: FormParams::new(),
            credentials: None,
            accept: ACCEPT_JSON.to_string(),
        }
    }

    pub fn get(base_url: impl Into<String>, path: impl Into<String>) -> Self {
        Self::new(Method::Get, base_url, path)
    }

    pub fn post(base_url: impl Into<String>, path: impl Into<String>) -> Self {
        Self::new(Method::Post, base_url, path)
    }

    #[must_use]
    pub fn params(mut self, params: FormParams) -> Self {
        self.params = params;
        self
    }

    #[must_use]
    pub fn credentials(mut self, credentials: ClientCredentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    #[must_use]
    pub fn accept(mut self, accept: impl Into<String>) -> Self {
        self.accept = accept.into();
        self
    }

    /// Full request URL: base and path joined verbatim.
    pub fn url(&self) -> String {
        format!("{}{}", self.base_url, self.path)
    }

    fn auth(&self) -> Option<&ClientCredentials> {
        self.credentials.as_ref().filter(|c| !c.is_anonymous())
    }
}

/// Sends [`ServiceRequest`]s over a shared [`reqwest::Client`].
#[derive(Debug, Clone)]
pub struct RequestGateway {
    client: Client,
}

impl RequestGateway {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Sends one request and decodes the JSON reply.
    ///
    /// A non-2xx reply that still carries JSON is decoded like any other so
    /// the caller can project its error fields. One that does not is
    /// reported as [`JanrainError::Http`].
    pub async fn send(&self, request: &ServiceRequest) -> JanrainResult<ServiceResponse> {
        let url = request.url();
        debug!(method = request.method.as_str(), %url, "Calling Capture service");

        let mut builder = self
            .client
            .request(request.method.into(), &url)
            .header(ACCEPT, request.accept.as_str())
            .form(&request.params);
        if let Some(credentials) = request.auth() {
            builder = builder.basic_auth(&credentials.client_id, Some(&credentials.client_secret));
        }

        let response = builder
            .send()
            .await
            .map_err(|e| JanrainError::Network(format!("request to {url} failed: {e}")))?;
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| {
                JanrainError::Network(format!("failed to read response from {url}: {e}"))
            })?;

        let body: Value = match serde_json::from_str(&text) {
            Ok(body) => body,
            Err(_) if !status.is_success() => {
                return Err(JanrainError::Http {
                    status: status.as_u16(),
                    body: text,
                });
            }
            Err(e) => return Err(e.into()),
        };

        let body = ServiceResponse::new(body);
        if body.has_stat() && !body.is_ok() {
            error!(
                %url,
                data = %serde_json::to_string(&request.params).unwrap_or_default(),
                method = request.method.as_str(),
                client_id = request.auth().map(|c| c.client_id.as_str()).unwrap_or_default(),
                response = %body.as_value(),
                "Capture call was rejected"
            );
        }
        Ok(body)
    }

    /// Fetches a non-JSON resource, such as a CDN flow asset.
    pub async fn fetch_text(&self, url: &str) -> JanrainResult<String> {
        debug!(%url, "Fetching static asset");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| JanrainError::Network(format!("request to {url} failed: {e}")))?;
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| {
                JanrainError::Network(format!("failed to read response from {url}: {e}"))
            })?;
        if !status.is_success() {
            return Err(JanrainError::Http {
                status: status.as_u16(),
                body: text,
            });
        }
        Ok(text)
    }
}
