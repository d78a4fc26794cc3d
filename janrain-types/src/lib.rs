//! Core type definitions for the Janrain Capture client.
//!
//! This crate holds the transport-free value types shared by the client:
//! - Client credentials and ordered form parameters for outbound calls
//! - The `stat`-discriminated service response and its normalized
//!   [`Outcome`] (success payload or defaulted error fields)
//! - Success payloads for each remote operation
//! - The static flow document and the parser that extracts it from the
//!   CDN-hosted JavaScript asset
//!
//! Nothing here performs I/O. The HTTP gateway, service modules and facade
//! live in `janrain-capture`.

mod credentials;
mod flow;
mod lenient;
mod params;
mod payload;
mod response;

pub use credentials::ClientCredentials;
pub use flow::{
    decode_flow_asset, FieldDescriptor, FlowDocument, RENDER_MARKER, RENDER_TRAILER_LEN,
    STATUS_WRAPPER,
};
pub use params::FormParams;
pub use payload::{
    AccessToken, Acknowledged, AuthSession, AuthorizationCode, AvailableProviders,
    ClientDescriptor, ClientList, ClientSettings, CreationToken, EntityCreated, EntityRecord,
    EntitySearch, FieldConfiguration, FieldReference, FlowVersion, FlowVersions, FormFields,
    FormLayout, GrantTokens, Providers, Registration, Translation, VerificationCode,
    VerifiedEntity,
};
pub use response::{ErrorDetails, Outcome, ServiceResponse, SocialAuthFailure, STAT_OK};

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while interpreting remote documents.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("unexpected response shape: {0}")]
    UnexpectedShape(String),
}
