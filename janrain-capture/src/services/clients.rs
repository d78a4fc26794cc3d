//! API client administration: `/clients/list` and `/settings/items`.

use super::ServiceContext;
use crate::error::JanrainResult;
use crate::request::Method;
use janrain_types::{ClientCredentials, ServiceResponse};

#[derive(Debug, Clone)]
pub struct Clients {
    ctx: ServiceContext,
}

impl Clients {
    pub fn new(ctx: ServiceContext) -> Self {
        Self { ctx }
    }

    /// Every API client of the application, signed with the full client.
    pub async fn clients_list(&self) -> JanrainResult<ServiceResponse> {
        let request = self
            .ctx
            .capture(Method::Get, "/clients/list")
            .credentials(self.ctx.config().full_client());
        self.ctx.send(request).await
    }

    /// Settings visible to the client that signs the call.
    pub async fn settings_items(
        &self,
        credentials: &ClientCredentials,
    ) -> JanrainResult<ServiceResponse> {
        let request = self
            .ctx
            .capture(Method::Get, "/settings/items")
            .credentials(credentials.clone());
        self.ctx.send(request).await
    }
}
