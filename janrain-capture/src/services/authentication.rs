//! `/access/*` token endpoints and the `/oauth/*` native flows.

use super::ServiceContext;
use crate::error::JanrainResult;
use crate::request::Method;
use janrain_types::{FormParams, ServiceResponse};

/// Client and flow a native (server-to-server) OAuth call runs against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NativeFlow {
    pub client_id: String,
    pub flow: String,
    pub flow_version: String,
    pub locale: String,
}

impl NativeFlow {
    fn params(&self) -> FormParams {
        FormParams::new()
            .with("client_id", &self.client_id)
            .with("flow", &self.flow)
            .with("flow_version", &self.flow_version)
            .with("locale", &self.locale)
    }
}

/// Grant exchanged at `/oauth/token`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenGrant {
    AuthorizationCode { code: String, redirect_uri: String },
    RefreshToken { refresh_token: String },
}

impl TokenGrant {
    pub fn grant_type(&self) -> &'static str {
        match self {
            Self::AuthorizationCode { .. } => "authorization_code",
            Self::RefreshToken { .. } => "refresh_token",
        }
    }

    fn params(&self) -> FormParams {
        let params = FormParams::new().with("grant_type", self.grant_type());
        match self {
            Self::AuthorizationCode { code, redirect_uri } => {
                params.with("code", code).with("redirect_uri", redirect_uri)
            }
            Self::RefreshToken { refresh_token } => params.with("refresh_token", refresh_token),
        }
    }
}

/// Authentication endpoints of the Capture server.
#[derive(Debug, Clone)]
pub struct Authentication {
    ctx: ServiceContext,
}

impl Authentication {
    pub fn new(ctx: ServiceContext) -> Self {
        Self { ctx }
    }

    /// `/access/getAccessToken`, signed with the full client.
    pub async fn get_access_token(
        &self,
        uuid: &str,
        type_name: &str,
        for_client_id: Option<&str>,
    ) -> JanrainResult<ServiceResponse> {
        let mut params = FormParams::new().with("uuid", uuid).with("type_name", type_name);
        if let Some(client_id) = for_client_id {
            params.insert("for_client_id", client_id);
        }
        self.full_client_get("/access/getAccessToken", params).await
    }

    /// `/access/getAuthorizationCode`, signed with the full client.
    pub async fn get_authorization_code(
        &self,
        uuid: &str,
        type_name: &str,
        redirect_uri: &str,
        for_client_id: Option<&str>,
    ) -> JanrainResult<ServiceResponse> {
        let mut params = FormParams::new()
            .with("uuid", uuid)
            .with("type_name", type_name)
            .with("redirect_uri", redirect_uri);
        if let Some(client_id) = for_client_id {
            params.insert("for_client_id", client_id);
        }
        self.full_client_get("/access/getAuthorizationCode", params).await
    }

    /// `/access/getCreationToken`, signed with the full client.
    pub async fn get_creation_token(
        &self,
        type_name: &str,
        lifetime_secs: u64,
        for_client_id: Option<&str>,
    ) -> JanrainResult<ServiceResponse> {
        let mut params = FormParams::new()
            .with("type_name", type_name)
            .with("lifetime", lifetime_secs.to_string());
        if let Some(client_id) = for_client_id {
            params.insert("for_client_id", client_id);
        }
        self.full_client_get("/access/getCreationToken", params).await
    }

    /// `/access/getVerificationCode`, signed with the full client.
    pub async fn get_verification_code(
        &self,
        uuid: &str,
        type_name: &str,
        attribute_name: &str,
    ) -> JanrainResult<ServiceResponse> {
        let params = FormParams::new()
            .with("uuid", uuid)
            .with("type_name", type_name)
            .with("attribute_name", attribute_name);
        self.full_client_get("/access/getVerificationCode", params).await
    }

    /// `/access/useVerificationCode`. Unauthenticated.
    pub async fn use_verification_code(
        &self,
        verification_code: &str,
    ) -> JanrainResult<ServiceResponse> {
        let request = self
            .ctx
            .capture(Method::Get, "/access/useVerificationCode")
            .params(FormParams::new().with("verification_code", verification_code));
        self.ctx.send(request).await
    }

    /// `/oauth/auth_native`: completes a social sign-in.
    ///
    /// `merge_token` is only sent when it is non-empty.
    pub async fn auth_native(
        &self,
        flow: &NativeFlow,
        redirect_uri: &str,
        form_name: &str,
        engage_token: &str,
        merge_token: Option<&str>,
    ) -> JanrainResult<ServiceResponse> {
        let mut params = flow
            .params()
            .with("redirect_uri", redirect_uri)
            .with("response_type", "code_and_token")
            .with("registration_form", form_name)
            .with("token", engage_token);
        if let Some(token) = merge_token.filter(|t| !t.is_empty()) {
            params.insert("merge_token", token);
        }
        self.native_post("/oauth/auth_native", params).await
    }

    /// `/oauth/auth_native_traditional`: sign-in with the user's own
    /// credentials, carried in `form_fields`.
    pub async fn auth_native_traditional(
        &self,
        flow: &NativeFlow,
        redirect_uri: &str,
        form_name: &str,
        form_fields: &FormParams,
    ) -> JanrainResult<ServiceResponse> {
        let mut params = flow
            .params()
            .with("redirect_uri", redirect_uri)
            .with("response_type", "code_and_token")
            .with("form", form_name);
        params.merge(form_fields.iter());
        self.native_post("/oauth/auth_native_traditional", params).await
    }

    /// `/oauth/forgot_password_native`.
    pub async fn forgot_password_native(
        &self,
        flow: &NativeFlow,
        redirect_uri: &str,
        form_name: &str,
        form_fields: &FormParams,
    ) -> JanrainResult<ServiceResponse> {
        self.native_form_post(
            "/oauth/forgot_password_native",
            flow,
            redirect_uri,
            form_name,
            form_fields,
        )
        .await
    }

    /// `/oauth/link_account_native`: attaches a social identity to a signed-in
    /// user.
    pub async fn link_account_native(
        &self,
        flow: &NativeFlow,
        redirect_uri: &str,
        form_name: &str,
        engage_token: &str,
        access_token: &str,
    ) -> JanrainResult<ServiceResponse> {
        let params = flow
            .params()
            .with("redirect_uri", redirect_uri)
            .with("form", form_name)
            .with("token", engage_token)
            .with("access_token", access_token);
        self.native_post("/oauth/link_account_native", params).await
    }

    /// `/oauth/register_native`: social registration.
    pub async fn register_native(
        &self,
        flow: &NativeFlow,
        redirect_uri: &str,
        form_name: &str,
        engage_token: &str,
        form_fields: &FormParams,
    ) -> JanrainResult<ServiceResponse> {
        let mut params = flow
            .params()
            .with("redirect_uri", redirect_uri)
            .with("response_type", "code_and_token")
            .with("form", form_name)
            .with("token", engage_token);
        params.merge(form_fields.iter());
        self.native_post("/oauth/register_native", params).await
    }

    /// `/oauth/register_native_traditional`.
    pub async fn register_native_traditional(
        &self,
        flow: &NativeFlow,
        redirect_uri: &str,
        form_name: &str,
        form_fields: &FormParams,
    ) -> JanrainResult<ServiceResponse> {
        let mut params = flow
            .params()
            .with("redirect_uri", redirect_uri)
            .with("response_type", "code_and_token")
            .with("form", form_name);
        params.merge(form_fields.iter());
        self.native_post("/oauth/register_native_traditional", params).await
    }

    /// `/oauth/token`, signed with the login client.
    pub async fn token(&self, grant: &TokenGrant) -> JanrainResult<ServiceResponse> {
        let request = self
            .ctx
            .capture(Method::Post, "/oauth/token")
            .params(grant.params())
            .credentials(self.ctx.config().login_client());
        self.ctx.send(request).await
    }

    /// `/oauth/unlink_account_native`.
    pub async fn unlink_account_native(
        &self,
        flow: &NativeFlow,
        identifier_to_remove: &str,
        access_token: &str,
    ) -> JanrainResult<ServiceResponse> {
        let mut params = FormParams::new().with("access_token", access_token);
        params.merge(flow.params().iter());
        params.insert("identifier_to_remove", identifier_to_remove);
        self.native_post("/oauth/unlink_account_native", params).await
    }

    /// `/oauth/update_profile_native`, signed with the login client.
    pub async fn update_profile_native(
        &self,
        flow: &NativeFlow,
        form_name: &str,
        access_token: &str,
        form_fields: &FormParams,
    ) -> JanrainResult<ServiceResponse> {
        let mut params = flow
            .params()
            .with("form", form_name)
            .with("access_token", access_token);
        params.merge(form_fields.iter());
        let request = self
            .ctx
            .capture(Method::Post, "/oauth/update_profile_native")
            .params(params)
            .credentials(self.ctx.config().login_client());
        self.ctx.send(request).await
    }

    /// `/oauth/verify_email_native`, signed with the login client.
    pub async fn verify_email_native(
        &self,
        flow: &NativeFlow,
        redirect_uri: &str,
        form_name: &str,
        form_fields: &FormParams,
    ) -> JanrainResult<ServiceResponse> {
        let mut params = flow
            .params()
            .with("redirect_uri", redirect_uri)
            .with("form", form_name);
        params.merge(form_fields.iter());
        let request = self
            .ctx
            .capture(Method::Post, "/oauth/verify_email_native")
            .params(params)
            .credentials(self.ctx.config().login_client());
        self.ctx.send(request).await
    }

    /// Any other form-driven `/oauth/*` endpoint of the flow.
    pub async fn custom_native_call(
        &self,
        path: &str,
        flow: &NativeFlow,
        redirect_uri: &str,
        form_name: &str,
        form_fields: &FormParams,
    ) -> JanrainResult<ServiceResponse> {
        self.native_form_post(path, flow, redirect_uri, form_name, form_fields)
            .await
    }

    async fn native_form_post(
        &self,
        path: &str,
        flow: &NativeFlow,
        redirect_uri: &str,
        form_name: &str,
        form_fields: &FormParams,
    ) -> JanrainResult<ServiceResponse> {
        let mut params = flow
            .params()
            .with("redirect_uri", redirect_uri)
            .with("form", form_name);
        params.merge(form_fields.iter());
        self.native_post(path, params).await
    }

    async fn native_post(&self, path: &str, params: FormParams) -> JanrainResult<ServiceResponse> {
        let request = self.ctx.capture(Method::Post, path).params(params);
        self.ctx.send(request).await
    }

    async fn full_client_get(
        &self,
        path: &str,
        params: FormParams,
    ) -> JanrainResult<ServiceResponse> {
        let request = self
            .ctx
            .capture(Method::Get, path)
            .params(params)
            .credentials(self.ctx.config().full_client());
        self.ctx.send(request).await
    }
}
