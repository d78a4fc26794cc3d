//! Thin per-endpoint wrappers over the [`RequestGateway`].
//!
//! Service methods build the request, pick the credentials the endpoint
//! needs and return the decoded reply untouched. Projecting replies into
//! [`Outcome`](janrain_types::Outcome)s is the facade's job.

pub mod authentication;
pub mod clients;
pub mod configuration;
pub mod engage;
pub mod entity;
pub mod social;

pub use authentication::{Authentication, NativeFlow, TokenGrant};
pub use clients::Clients;
pub use configuration::Configuration;
pub use engage::Engage;
pub use entity::{Entities, EntityKey};
pub use social::Social;

use crate::config::JanrainConfig;
use crate::error::JanrainResult;
use crate::request::{Method, RequestGateway, ServiceRequest};
use janrain_types::ServiceResponse;
use std::sync::Arc;

/// Configuration and transport shared by every service.
#[derive(Debug, Clone)]
pub struct ServiceContext {
    config: Arc<JanrainConfig>,
    gateway: RequestGateway,
}

impl ServiceContext {
    pub fn new(config: Arc<JanrainConfig>, gateway: RequestGateway) -> Self {
        Self { config, gateway }
    }

    pub fn config(&self) -> &JanrainConfig {
        &self.config
    }

    pub fn gateway(&self) -> &RequestGateway {
        &self.gateway
    }

    /// A request against the application's Capture server.
    pub(crate) fn capture(&self, method: Method, path: &str) -> ServiceRequest {
        ServiceRequest::new(method, &self.config.capture_server_url, path)
    }

    pub(crate) async fn send(&self, request: ServiceRequest) -> JanrainResult<ServiceResponse> {
        self.gateway.send(&request).await
    }
}
