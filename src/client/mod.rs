//! HTTP clients for the external renderer and AI assist services
//!
//! All four flows are plain request/response: no retries, no cancellation,
//! no sequencing tokens. If the same flow is triggered twice for the same
//! target, the last response to resolve wins.

pub mod assist;
pub mod render;

pub use assist::{AssistClient, RephraseSession};
pub use render::RenderClient;

/// Failure taxonomy for the remote flows. Validation failures are caught
/// locally before any request; remote failures carry the service-supplied
/// message when one is available.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("no API key configured")]
    MissingApiKey,
    #[error("no {0} provided")]
    EmptyInput(&'static str),
    #[error("{0}")]
    Remote(String),
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
}

pub type ClientResult<T> = Result<T, ClientError>;
