//! `/entity*` record endpoints.

use super::ServiceContext;
use crate::error::JanrainResult;
use crate::request::Method;
use janrain_types::{ClientCredentials, FormParams, ServiceResponse};
use serde_json::Value;

/// How `/entity.update` addresses the record to change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntityKey {
    Uuid(String),
    /// A unique attribute and its value, e.g. `email`.
    Attribute { name: String, value: String },
}

impl EntityKey {
    fn apply(&self, params: &mut FormParams) {
        match self {
            Self::Uuid(uuid) => params.insert("uuid", uuid),
            Self::Attribute { name, value } => {
                params.insert("key_attribute", name);
                params.insert("key_value", value);
            }
        }
    }
}

/// Entity endpoints of the Capture server.
#[derive(Debug, Clone)]
pub struct Entities {
    ctx: ServiceContext,
}

impl Entities {
    pub fn new(ctx: ServiceContext) -> Self {
        Self { ctx }
    }

    /// `/entity` for the user an access token belongs to. Unauthenticated.
    pub async fn entity(
        &self,
        access_token: &str,
        type_name: &str,
        method: Method,
    ) -> JanrainResult<ServiceResponse> {
        let params = FormParams::new()
            .with("type_name", type_name)
            .with("access_token", access_token);
        let request = self.ctx.capture(method, "/entity").params(params);
        self.ctx.send(request).await
    }

    /// `/entity` by numeric id, signed with `credentials` or the full client.
    pub async fn entity_by_id(
        &self,
        id: &str,
        type_name: &str,
        method: Method,
        credentials: Option<&ClientCredentials>,
    ) -> JanrainResult<ServiceResponse> {
        let params = FormParams::new().with("type_name", type_name).with("id", id);
        self.signed(method, "/entity", params, credentials).await
    }

    /// `/entity.create`. `attributes` is sent as a JSON document.
    pub async fn entity_create(
        &self,
        attributes: &Value,
        type_name: &str,
        credentials: Option<&ClientCredentials>,
    ) -> JanrainResult<ServiceResponse> {
        let params = FormParams::new()
            .with("type_name", type_name)
            .with("attributes", serde_json::to_string(attributes)?);
        self.signed(Method::Get, "/entity.create", params, credentials).await
    }

    /// `/entity.delete`, signed with the full client.
    pub async fn entity_delete(
        &self,
        uuid: &str,
        type_name: &str,
    ) -> JanrainResult<ServiceResponse> {
        let params = FormParams::new().with("type_name", type_name).with("uuid", uuid);
        self.signed(Method::Get, "/entity.delete", params, None).await
    }

    /// `/entity.deleteAccess`: revokes every access token of the record.
    pub async fn entity_delete_access(
        &self,
        uuid: &str,
        type_name: &str,
    ) -> JanrainResult<ServiceResponse> {
        let params = FormParams::new().with("type_name", type_name).with("uuid", uuid);
        self.signed(Method::Get, "/entity.deleteAccess", params, None).await
    }

    /// `/entity.find`. `attributes` restricts the returned fields and is
    /// sent as a JSON array.
    pub async fn entity_find(
        &self,
        filter: &str,
        type_name: &str,
        attributes: Option<&[&str]>,
        credentials: Option<&ClientCredentials>,
    ) -> JanrainResult<ServiceResponse> {
        let mut params = FormParams::new()
            .with("type_name", type_name)
            .with("filter", filter);
        if let Some(attributes) = attributes {
            params.insert("attributes", serde_json::to_string(attributes)?);
        }
        self.signed(Method::Get, "/entity.find", params, credentials).await
    }

    /// `/entity.update`: merges `attributes` into the addressed record.
    pub async fn entity_update(
        &self,
        key: &EntityKey,
        attributes: &Value,
        type_name: &str,
        credentials: Option<&ClientCredentials>,
    ) -> JanrainResult<ServiceResponse> {
        let mut params = FormParams::new().with("type_name", type_name);
        key.apply(&mut params);
        params.insert("attributes", serde_json::to_string(attributes)?);
        self.signed(Method::Get, "/entity.update", params, credentials).await
    }

    async fn signed(
        &self,
        method: Method,
        path: &str,
        params: FormParams,
        credentials: Option<&ClientCredentials>,
    ) -> JanrainResult<ServiceResponse> {
        let credentials = credentials
            .cloned()
            .unwrap_or_else(|| self.ctx.config().full_client());
        let request = self
            .ctx
            .capture(method, path)
            .params(params)
            .credentials(credentials);
        self.ctx.send(request).await
    }
}
