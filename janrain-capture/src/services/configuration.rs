//! Configuration API: flow metadata under `/config/{app_id}/flows/{flow}`.
//!
//! These calls go to the configuration server, not the Capture server, and
//! are always signed with the full client.

use super::ServiceContext;
use crate::error::JanrainResult;
use crate::request::ServiceRequest;
use janrain_types::ServiceResponse;

#[derive(Debug, Clone)]
pub struct Configuration {
    ctx: ServiceContext,
}

impl Configuration {
    pub fn new(ctx: ServiceContext) -> Self {
        Self { ctx }
    }

    /// Version history of a flow.
    pub async fn flow_versions(&self, flow_name: &str) -> JanrainResult<ServiceResponse> {
        self.get(&format!("{}/versions", self.flow_path(flow_name))).await
    }

    /// Field layout of one form of a flow.
    pub async fn form_configuration(
        &self,
        form_name: &str,
        flow_name: &str,
    ) -> JanrainResult<ServiceResponse> {
        self.get(&format!("{}/forms/{form_name}", self.flow_path(flow_name)))
            .await
    }

    /// Descriptor of one field of a flow.
    pub async fn field_configuration(
        &self,
        field_name: &str,
        flow_name: &str,
    ) -> JanrainResult<ServiceResponse> {
        self.get(&format!("{}/fields/{field_name}", self.flow_path(flow_name)))
            .await
    }

    fn flow_path(&self, flow_name: &str) -> String {
        format!("/config/{}/flows/{flow_name}", self.ctx.config().app_id)
    }

    async fn get(&self, path: &str) -> JanrainResult<ServiceResponse> {
        let config = self.ctx.config();
        let request = ServiceRequest::get(&config.configuration_server_url, path)
            .credentials(config.full_client());
        self.ctx.send(request).await
    }
}
