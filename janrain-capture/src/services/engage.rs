//! Social login start URLs on the Engage realm host.

use url::form_urlencoded;

/// Builds social login start URLs for one application.
#[derive(Debug, Clone)]
pub struct Engage {
    app_id: String,
}

impl Engage {
    pub fn new(app_id: impl Into<String>) -> Self {
        Self { app_id: app_id.into() }
    }

    /// `{rpx_url}/{social_media}/start?...` for a popup sign-in that posts
    /// its token to `token_url`. No network call is made.
    pub fn social_login_url(
        &self,
        rpx_url: &str,
        social_media: &str,
        token_url: &str,
        language: &str,
    ) -> String {
        let query = form_urlencoded::Serializer::new(String::new())
            .append_pair("language_preference", language)
            .append_pair("token_url", token_url)
            .append_pair("display", "popup")
            .append_pair("applicationId", &self.app_id)
            .finish();
        format!("{rpx_url}/{social_media}/start?{query}")
    }
}
