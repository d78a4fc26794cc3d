//! The public client: one method per remote operation.
//!
//! Every method returns `Ok(Outcome::Success(..))` when the remote accepted
//! the call and `Ok(Outcome::Failure(..))` when it rejected it. `Err` is
//! reserved for transport and decoding failures.

use crate::config::JanrainConfig;
use crate::error::{JanrainError, JanrainResult};
use crate::flow::{FormConfiguration, HEAD_VERSION, StaticFlow, Translations};
use crate::request::{Method, RequestGateway};
use crate::services::{
    Authentication, Clients, Configuration, Engage, Entities, EntityKey, NativeFlow,
    ServiceContext, Social, TokenGrant,
};
use janrain_types::{
    AccessToken, Acknowledged, AuthSession, AuthorizationCode, AvailableProviders,
    ClientCredentials, ClientList, ClientSettings, CreationToken, EntityCreated, EntityRecord,
    EntitySearch, ErrorDetails, FieldConfiguration, FlowDocument, FlowVersions, FormFields,
    FormLayout, FormParams, GrantTokens, Outcome, Providers, Registration, ServiceResponse,
    SocialAuthFailure, Translation, VerificationCode, VerifiedEntity,
};
use reqwest::Client;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// Client setting naming the social login realm.
const RPX_REALM_SETTING: &str = "rpx_realm";

/// Inputs of a native (server-to-server) form flow call.
///
/// `flow_name` and `locale` override the configured defaults for this call
/// only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NativeForm {
    pub client_id: String,
    pub flow_version: String,
    pub redirect_uri: String,
    pub form_name: String,
    pub fields: FormParams,
    pub flow_name: Option<String>,
    pub locale: Option<String>,
}

impl NativeForm {
    pub fn new(
        client_id: impl Into<String>,
        flow_version: impl Into<String>,
        form_name: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            flow_version: flow_version.into(),
            form_name: form_name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn redirect_uri(mut self, redirect_uri: impl Into<String>) -> Self {
        self.redirect_uri = redirect_uri.into();
        self
    }

    /// Adds one user-entered form value.
    #[must_use]
    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(name, value);
        self
    }

    #[must_use]
    pub fn fields(mut self, fields: FormParams) -> Self {
        self.fields = fields;
        self
    }

    #[must_use]
    pub fn flow_name(mut self, flow_name: impl Into<String>) -> Self {
        self.flow_name = Some(flow_name.into());
        self
    }

    #[must_use]
    pub fn locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }
}

/// Janrain Capture client.
///
/// Cheap to share behind an `Arc`; all methods take `&self`.
#[derive(Debug)]
pub struct Janrain {
    config: Arc<JanrainConfig>,
    authentication: Authentication,
    entities: Entities,
    configuration: Configuration,
    clients: Clients,
    social: Social,
    engage: Engage,
    flow: Arc<StaticFlow>,
    forms: FormConfiguration,
    translations: Translations,
}

impl Janrain {
    /// Validates `config` and builds a client with its own HTTP connection pool.
    pub fn new(config: JanrainConfig) -> JanrainResult<Self> {
        let client = config.build_client()?;
        Self::with_client(config, client)
    }

    /// Like [`new`](Self::new), sending every request through `client`.
    pub fn with_client(config: JanrainConfig, client: Client) -> JanrainResult<Self> {
        config.validate()?;
        debug!(
            capture_server_url = %config.capture_server_url,
            app_id = %config.app_id,
            flow = %config.flow_name,
            "Creating Janrain client"
        );

        let config = Arc::new(config);
        let gateway = RequestGateway::new(client);
        let ctx = ServiceContext::new(Arc::clone(&config), gateway.clone());
        let flow = Arc::new(StaticFlow::new(Arc::clone(&config), gateway));

        Ok(Self {
            authentication: Authentication::new(ctx.clone()),
            entities: Entities::new(ctx.clone()),
            configuration: Configuration::new(ctx.clone()),
            clients: Clients::new(ctx.clone()),
            social: Social::new(ctx),
            engage: Engage::new(&config.app_id),
            forms: FormConfiguration::new(Arc::clone(&flow)),
            translations: Translations::new(Arc::clone(&flow)),
            flow,
            config,
        })
    }

    pub fn config(&self) -> &JanrainConfig {
        &self.config
    }

    /// Raw authentication endpoints, returning undecoded replies.
    pub fn authentication(&self) -> &Authentication {
        &self.authentication
    }

    /// Raw entity endpoints, returning undecoded replies.
    pub fn entities(&self) -> &Entities {
        &self.entities
    }

    /// The flow asset accessor.
    pub fn static_flow(&self) -> &StaticFlow {
        &self.flow
    }

    // ── Access tokens ───────────────────────────────────────────────

    pub async fn get_access_token(
        &self,
        uuid: &str,
        type_name: &str,
        for_client_id: Option<&str>,
    ) -> JanrainResult<Outcome<AccessToken>> {
        let response = self
            .authentication
            .get_access_token(uuid, type_name, for_client_id)
            .await?;
        Ok(response.into_outcome()?)
    }

    pub async fn get_authorization_code(
        &self,
        uuid: &str,
        type_name: &str,
        redirect_uri: &str,
        for_client_id: Option<&str>,
    ) -> JanrainResult<Outcome<AuthorizationCode>> {
        let response = self
            .authentication
            .get_authorization_code(uuid, type_name, redirect_uri, for_client_id)
            .await?;
        Ok(response.into_outcome()?)
    }

    pub async fn get_creation_token(
        &self,
        type_name: &str,
        lifetime_secs: u64,
        for_client_id: Option<&str>,
    ) -> JanrainResult<Outcome<CreationToken>> {
        let response = self
            .authentication
            .get_creation_token(type_name, lifetime_secs, for_client_id)
            .await?;
        Ok(response.into_outcome()?)
    }

    pub async fn get_verification_code(
        &self,
        uuid: &str,
        type_name: &str,
        attribute_name: &str,
    ) -> JanrainResult<Outcome<VerificationCode>> {
        let response = self
            .authentication
            .get_verification_code(uuid, type_name, attribute_name)
            .await?;
        Ok(response.into_outcome()?)
    }

    pub async fn use_verification_code(
        &self,
        verification_code: &str,
    ) -> JanrainResult<Outcome<VerifiedEntity>> {
        let response = self.authentication.use_verification_code(verification_code).await?;
        Ok(response.into_outcome()?)
    }

    /// Exchanges an authorization code or a refresh token at `/oauth/token`.
    pub async fn token(&self, grant: &TokenGrant) -> JanrainResult<Outcome<GrantTokens>> {
        let response = self.authentication.token(grant).await?;
        Ok(response.into_outcome()?)
    }

    // ── Native flows ────────────────────────────────────────────────

    /// Social sign-in with an Engage token. Rejections carry the social
    /// failure shape, including any pre-registration data.
    pub async fn auth_native(
        &self,
        form: &NativeForm,
        engage_token: &str,
        merge_token: Option<&str>,
    ) -> JanrainResult<Outcome<AuthSession, SocialAuthFailure>> {
        let response = self
            .authentication
            .auth_native(
                &self.native_flow(form),
                &form.redirect_uri,
                &form.form_name,
                engage_token,
                merge_token,
            )
            .await?;
        Ok(response.into_outcome_with(SocialAuthFailure::from_response)?)
    }

    pub async fn auth_native_traditional(
        &self,
        form: &NativeForm,
    ) -> JanrainResult<Outcome<AuthSession>> {
        let response = self
            .authentication
            .auth_native_traditional(
                &self.native_flow(form),
                &form.redirect_uri,
                &form.form_name,
                &form.fields,
            )
            .await?;
        Ok(response.into_outcome()?)
    }

    pub async fn forgot_password_native(
        &self,
        form: &NativeForm,
    ) -> JanrainResult<Outcome<Acknowledged>> {
        let response = self
            .authentication
            .forgot_password_native(
                &self.native_flow(form),
                &form.redirect_uri,
                &form.form_name,
                &form.fields,
            )
            .await?;
        Ok(response.into_outcome()?)
    }

    pub async fn link_account_native(
        &self,
        form: &NativeForm,
        engage_token: &str,
        access_token: &str,
    ) -> JanrainResult<Outcome<Acknowledged>> {
        let response = self
            .authentication
            .link_account_native(
                &self.native_flow(form),
                &form.redirect_uri,
                &form.form_name,
                engage_token,
                access_token,
            )
            .await?;
        Ok(response.into_outcome()?)
    }

    pub async fn register_native(
        &self,
        form: &NativeForm,
        engage_token: &str,
    ) -> JanrainResult<Outcome<AuthSession>> {
        let response = self
            .authentication
            .register_native(
                &self.native_flow(form),
                &form.redirect_uri,
                &form.form_name,
                engage_token,
                &form.fields,
            )
            .await?;
        Ok(response.into_outcome()?)
    }

    pub async fn register_native_traditional(
        &self,
        form: &NativeForm,
    ) -> JanrainResult<Outcome<Registration>> {
        let response = self
            .authentication
            .register_native_traditional(
                &self.native_flow(form),
                &form.redirect_uri,
                &form.form_name,
                &form.fields,
            )
            .await?;
        Ok(response.into_outcome()?)
    }

    /// Removes a social identity from the user. Only the client and flow of
    /// `form` are used.
    pub async fn unlink_account_native(
        &self,
        form: &NativeForm,
        identifier_to_remove: &str,
        access_token: &str,
    ) -> JanrainResult<Outcome<Acknowledged>> {
        let response = self
            .authentication
            .unlink_account_native(&self.native_flow(form), identifier_to_remove, access_token)
            .await?;
        Ok(response.into_outcome()?)
    }

    pub async fn update_profile_native(
        &self,
        form: &NativeForm,
        access_token: &str,
    ) -> JanrainResult<Outcome<Acknowledged>> {
        let response = self
            .authentication
            .update_profile_native(
                &self.native_flow(form),
                &form.form_name,
                access_token,
                &form.fields,
            )
            .await?;
        Ok(response.into_outcome()?)
    }

    /// A rejection that only carries a `message` is reported as
    /// `invalid_fields: {form_name: [message]}`.
    pub async fn verify_email_native(
        &self,
        form: &NativeForm,
    ) -> JanrainResult<Outcome<Acknowledged>> {
        let response = self
            .authentication
            .verify_email_native(
                &self.native_flow(form),
                &form.redirect_uri,
                &form.form_name,
                &form.fields,
            )
            .await?;
        Ok(response.into_outcome_with(|r| ErrorDetails::from_form_response(r, &form.form_name))?)
    }

    /// Posts `form` to any other `/oauth/*` endpoint of the flow. Failures
    /// are reported like [`verify_email_native`](Self::verify_email_native).
    pub async fn custom_native_call(
        &self,
        path: &str,
        form: &NativeForm,
    ) -> JanrainResult<Outcome<Acknowledged>> {
        let response = self
            .authentication
            .custom_native_call(
                path,
                &self.native_flow(form),
                &form.redirect_uri,
                &form.form_name,
                &form.fields,
            )
            .await?;
        Ok(response.into_outcome_with(|r| ErrorDetails::from_form_response(r, &form.form_name))?)
    }

    fn native_flow(&self, form: &NativeForm) -> NativeFlow {
        NativeFlow {
            client_id: form.client_id.clone(),
            flow: form.flow_name.clone().unwrap_or_else(|| self.config.flow_name.clone()),
            flow_version: form.flow_version.clone(),
            locale: form.locale.clone().unwrap_or_else(|| self.config.locale.clone()),
        }
    }

    // ── Entities ────────────────────────────────────────────────────

    /// The record an access token belongs to.
    pub async fn entity(
        &self,
        access_token: &str,
        type_name: &str,
    ) -> JanrainResult<Outcome<EntityRecord>> {
        self.entity_with_method(access_token, type_name, Method::Get).await
    }

    /// Like [`entity`](Self::entity), sent with the given HTTP method.
    pub async fn entity_with_method(
        &self,
        access_token: &str,
        type_name: &str,
        method: Method,
    ) -> JanrainResult<Outcome<EntityRecord>> {
        let response = self.entities.entity(access_token, type_name, method).await?;
        Ok(response.into_outcome()?)
    }

    /// A record by numeric id, signed with `credentials` or the full client.
    pub async fn entity_by_id(
        &self,
        id: &str,
        type_name: &str,
        credentials: Option<&ClientCredentials>,
    ) -> JanrainResult<Outcome<EntityRecord>> {
        let response = self
            .entities
            .entity_by_id(id, type_name, Method::Get, credentials)
            .await?;
        Ok(response.into_outcome()?)
    }

    pub async fn entity_create(
        &self,
        attributes: &Value,
        type_name: &str,
        credentials: Option<&ClientCredentials>,
    ) -> JanrainResult<Outcome<EntityCreated>> {
        let response = self.entities.entity_create(attributes, type_name, credentials).await?;
        Ok(response.into_outcome()?)
    }

    pub async fn entity_delete(
        &self,
        uuid: &str,
        type_name: &str,
    ) -> JanrainResult<Outcome<Acknowledged>> {
        let response = self.entities.entity_delete(uuid, type_name).await?;
        Ok(response.into_outcome()?)
    }

    pub async fn entity_delete_access(
        &self,
        uuid: &str,
        type_name: &str,
    ) -> JanrainResult<Outcome<Acknowledged>> {
        let response = self.entities.entity_delete_access(uuid, type_name).await?;
        Ok(response.into_outcome()?)
    }

    pub async fn entity_find(
        &self,
        filter: &str,
        type_name: &str,
        attributes: Option<&[&str]>,
        credentials: Option<&ClientCredentials>,
    ) -> JanrainResult<Outcome<EntitySearch>> {
        let response = self
            .entities
            .entity_find(filter, type_name, attributes, credentials)
            .await?;
        Ok(response.into_outcome()?)
    }

    /// Merges `attributes` into the record with `uuid`.
    pub async fn entity_update(
        &self,
        uuid: &str,
        attributes: &Value,
        type_name: &str,
    ) -> JanrainResult<Outcome<Acknowledged>> {
        self.entity_update_by_key(&EntityKey::Uuid(uuid.to_string()), attributes, type_name, None)
            .await
    }

    pub async fn entity_update_by_key(
        &self,
        key: &EntityKey,
        attributes: &Value,
        type_name: &str,
        credentials: Option<&ClientCredentials>,
    ) -> JanrainResult<Outcome<Acknowledged>> {
        let response = self
            .entities
            .entity_update(key, attributes, type_name, credentials)
            .await?;
        Ok(response.into_outcome()?)
    }

    // ── Flow configuration ──────────────────────────────────────────

    /// Version history of the configured flow.
    pub async fn flow_versions(&self) -> JanrainResult<Outcome<FlowVersions>> {
        let response = self.configuration.flow_versions(&self.config.flow_name).await?;
        configuration_outcome(response, |body| {
            Ok(FlowVersions {
                versions: serde_json::from_value(body)?,
            })
        })
    }

    /// Layout of a form of the configured flow.
    pub async fn form_configuration(&self, form_name: &str) -> JanrainResult<Outcome<FormLayout>> {
        let response = self
            .configuration
            .form_configuration(form_name, &self.config.flow_name)
            .await?;
        configuration_outcome(response, |body| Ok(serde_json::from_value(body)?))
    }

    /// Descriptor of a field of the configured flow.
    pub async fn field_configuration(
        &self,
        field_name: &str,
    ) -> JanrainResult<Outcome<FieldConfiguration>> {
        let response = self
            .configuration
            .field_configuration(field_name, &self.config.flow_name)
            .await?;
        configuration_outcome(response, |body| match body {
            Value::Object(result) => Ok(FieldConfiguration { result }),
            other => Err(janrain_types::Error::UnexpectedShape(format!(
                "field descriptor is not an object: {other}"
            ))
            .into()),
        })
    }

    // ── Clients and settings ────────────────────────────────────────

    pub async fn clients_list(&self) -> JanrainResult<Outcome<ClientList>> {
        let response = self.clients.clients_list().await?;
        Ok(response.into_outcome()?)
    }

    /// Settings visible to `credentials`.
    pub async fn settings_items(
        &self,
        credentials: &ClientCredentials,
    ) -> JanrainResult<Outcome<ClientSettings>> {
        let response = self.clients.settings_items(credentials).await?;
        Ok(response.into_outcome()?)
    }

    /// One setting visible to `credentials`. `None` when the setting is not
    /// defined or the lookup was rejected.
    pub async fn settings_item(
        &self,
        name: &str,
        credentials: &ClientCredentials,
    ) -> JanrainResult<Option<String>> {
        let settings = self.settings_items(credentials).await?;
        Ok(settings.success().and_then(|settings| settings.item(name)))
    }

    // ── Social login ────────────────────────────────────────────────

    pub async fn available_providers(&self) -> JanrainResult<Outcome<AvailableProviders>> {
        let Some(rpx_url) = self.rpx_url().await? else {
            return Ok(Outcome::Failure(missing_realm()));
        };
        let response = self.social.get_available_providers(&rpx_url).await?;
        Ok(response.into_outcome()?)
    }

    pub async fn providers(&self) -> JanrainResult<Outcome<Providers>> {
        let Some(rpx_url) = self.rpx_url().await? else {
            return Ok(Outcome::Failure(missing_realm()));
        };
        let response = self.social.providers(&rpx_url).await?;
        Ok(response.into_outcome()?)
    }

    /// Start URL of a popup social sign-in. `language` defaults to the
    /// configured locale.
    pub async fn social_login_url(
        &self,
        social_media: &str,
        token_url: &str,
        language: Option<&str>,
    ) -> JanrainResult<String> {
        let rpx_url = self
            .rpx_url()
            .await?
            .ok_or_else(|| JanrainError::MissingSetting(RPX_REALM_SETTING.to_string()))?;
        let language = language.unwrap_or(&self.config.locale);
        Ok(self
            .engage
            .social_login_url(&rpx_url, social_media, token_url, language))
    }

    /// The configured realm URL, or the one named by the login client's
    /// `rpx_realm` setting.
    async fn rpx_url(&self) -> JanrainResult<Option<String>> {
        if let Some(url) = &self.config.rpx_url {
            return Ok(Some(url.clone()));
        }
        let realm = self
            .settings_item(RPX_REALM_SETTING, &self.config.login_client())
            .await?;
        Ok(realm
            .filter(|realm| !realm.is_empty())
            .map(|realm| format!("https://{realm}.rpxnow.com")))
    }

    // ── Static flow ─────────────────────────────────────────────────

    /// Fetches the flow document. Defaults to `HEAD` in the configured
    /// locale and is never memoized.
    pub async fn get_flow(
        &self,
        version: Option<&str>,
        locale: Option<&str>,
    ) -> JanrainResult<Option<FlowDocument>> {
        let version = version.unwrap_or(HEAD_VERSION);
        let locale = locale.unwrap_or(&self.config.locale);
        self.flow.flow_by_version_and_locale(version, locale).await
    }

    /// Field descriptors of a form of the memoized flow document.
    pub async fn load_form_configuration(
        &self,
        form_name: &str,
    ) -> JanrainResult<Outcome<FormFields>> {
        self.forms.load(form_name).await
    }

    /// A string field of the memoized flow document.
    pub async fn load_translation(&self, name: &str) -> JanrainResult<Outcome<Translation>> {
        self.translations.load(name).await
    }
}

fn missing_realm() -> ErrorDetails {
    ErrorDetails::local("missing_setting", "the login client has no rpx_realm setting")
}

/// Configuration API replies have no `stat`; a rejection carries an
/// `errors` member instead.
fn configuration_outcome<T>(
    response: ServiceResponse,
    project: impl FnOnce(Value) -> JanrainResult<T>,
) -> JanrainResult<Outcome<T>> {
    let has_errors = response.field("errors").is_some_and(|e| !e.is_null());
    let rejected = has_errors || (response.has_stat() && !response.is_ok());
    if rejected {
        return Ok(Outcome::Failure(ErrorDetails::from_configuration_response(&response)));
    }
    Ok(Outcome::Success(project(response.into_value())?))
}
