//! CDN-hosted flow assets and the projections built on them.

mod projections;
mod static_flow;

pub use projections::{FormConfiguration, Translations};
pub use static_flow::{HEAD_VERSION, StaticFlow};
