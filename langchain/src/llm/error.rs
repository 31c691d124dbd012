//! Chat provider failures.

use std::time::Duration;

use thiserror::Error;

/// Failure reported by a [`ChatModel`](super::ChatModel).
///
/// Not retried by the pipeline; a retry policy belongs to the model implementation.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ProviderError {
    /// Missing or rejected credentials.
    #[error("authentication failed: {0}")]
    Authentication(String),

    /// The provider throttled the request.
    #[error("rate limited: {0}")]
    RateLimited(String),

    /// Network or connection failure.
    #[error("transport error: {0}")]
    Transport(String),

    /// The call did not finish within the configured timeout.
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// The request could not be built or was rejected as malformed.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Any other provider-side error.
    #[error("API error: {0}")]
    Api(String),

    /// The provider answered without any choice to read.
    #[error("provider returned no choices")]
    EmptyResponse,
}
