//! Fetches and decodes the static flow asset from the CDN.

use crate::config::JanrainConfig;
use crate::error::JanrainResult;
use crate::request::RequestGateway;
use janrain_types::{FlowDocument, decode_flow_asset};
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::debug;

/// Version label of the newest published flow.
pub const HEAD_VERSION: &str = "HEAD";

/// Accessor for the flow asset of the configured application and flow.
///
/// The `HEAD` document in the configured locale is memoized after the first
/// successful decode. A fetch that decodes to nothing is not remembered and
/// is retried on the next call.
#[derive(Debug)]
pub struct StaticFlow {
    config: Arc<JanrainConfig>,
    gateway: RequestGateway,
    content: OnceCell<FlowDocument>,
}

impl StaticFlow {
    pub fn new(config: Arc<JanrainConfig>, gateway: RequestGateway) -> Self {
        Self {
            config,
            gateway,
            content: OnceCell::new(),
        }
    }

    /// `{cdn_url}:{app_id}:{locale}:{version}:{flow_name}`.
    pub fn asset_url(&self, version: &str, locale: &str) -> String {
        format!(
            "{}:{}:{locale}:{version}:{}",
            self.config.cdn_url, self.config.app_id, self.config.flow_name
        )
    }

    /// The memoized `HEAD` document in the configured locale.
    pub async fn flow_content(&self) -> JanrainResult<Option<&FlowDocument>> {
        let loaded = self
            .content
            .get_or_try_init(|| async {
                match self.fetch(HEAD_VERSION, &self.config.locale).await {
                    Ok(Some(document)) => Ok(document),
                    Ok(None) => Err(None),
                    Err(e) => Err(Some(e)),
                }
            })
            .await;

        match loaded {
            Ok(document) => Ok(Some(document)),
            Err(None) => Ok(None),
            Err(Some(e)) => Err(e),
        }
    }

    /// Fetches a specific version and locale. Never memoized.
    pub async fn flow_by_version_and_locale(
        &self,
        version: &str,
        locale: &str,
    ) -> JanrainResult<Option<FlowDocument>> {
        self.fetch(version, locale).await
    }

    async fn fetch(&self, version: &str, locale: &str) -> JanrainResult<Option<FlowDocument>> {
        let url = self.asset_url(version, locale);
        let raw = self.gateway.fetch_text(&url).await?;
        let document = decode_flow_asset(&raw);
        if document.is_none() {
            debug!(%url, "Flow asset did not decode");
        }
        Ok(document)
    }
}
