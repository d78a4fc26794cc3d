//! Social login realm endpoints. These live on the realm host
//! (`https://{realm}.rpxnow.com`) and are called without credentials.

use super::ServiceContext;
use crate::error::JanrainResult;
use crate::request::ServiceRequest;
use janrain_types::{ClientCredentials, ServiceResponse};

#[derive(Debug, Clone)]
pub struct Social {
    ctx: ServiceContext,
}

impl Social {
    pub fn new(ctx: ServiceContext) -> Self {
        Self { ctx }
    }

    /// Providers enabled for sign-in, social and sharing.
    pub async fn get_available_providers(&self, rpx_url: &str) -> JanrainResult<ServiceResponse> {
        self.post(rpx_url, "/api/v2/get_available_providers").await
    }

    /// Provider configuration including the share widget.
    pub async fn providers(&self, rpx_url: &str) -> JanrainResult<ServiceResponse> {
        self.post(rpx_url, "/api/v2/providers").await
    }

    async fn post(&self, rpx_url: &str, path: &str) -> JanrainResult<ServiceResponse> {
        let request =
            ServiceRequest::post(rpx_url, path).credentials(ClientCredentials::anonymous());
        self.ctx.send(request).await
    }
}
