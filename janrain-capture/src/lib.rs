//! Async client for the Janrain Capture REST API.
//!
//! [`Janrain`] wraps the Capture, Configuration and social login services
//! and the CDN-hosted flow assets. Remote rejections come back as
//! [`Outcome::Failure`] values; only transport and decoding failures are
//! errors.
//!
//! ```no_run
//! # async fn run() -> janrain_capture::JanrainResult<()> {
//! use janrain_capture::{Janrain, JanrainConfig, NativeForm};
//!
//! let janrain = Janrain::new(JanrainConfig {
//!     capture_server_url: "https://myapp.us.janraincapture.com".into(),
//!     app_id: "myapp".into(),
//!     login_client_id: "login-client".into(),
//!     login_client_secret: "login-secret".into(),
//!     ..JanrainConfig::default()
//! })?;
//!
//! let form = NativeForm::new("login-client", "HEAD", "signInForm")
//!     .redirect_uri("https://example.com/")
//!     .field("signInEmailAddress", "jane@example.com")
//!     .field("currentPassword", "hunter2");
//! let outcome = janrain.auth_native_traditional(&form).await?;
//! if let Some(session) = outcome.as_success() {
//!     println!("signed in: {}", session.access_token);
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod facade;
pub mod flow;
pub mod request;
pub mod services;

pub use config::JanrainConfig;
pub use error::{JanrainError, JanrainResult};
pub use facade::{Janrain, NativeForm};
pub use flow::{FormConfiguration, StaticFlow, Translations, HEAD_VERSION};
pub use request::{Method, RequestGateway, ServiceRequest};
pub use services::{EntityKey, NativeFlow, TokenGrant};

pub use janrain_types::{ClientCredentials, ErrorDetails, FormParams, Outcome};
