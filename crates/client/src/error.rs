//! Client-side error taxonomy.

/// An error surfaced by the client SDK.
///
/// `Network` is the only transient variant; everything else is terminal
/// and never retried.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ClientError {
    /// A transport-level failure (connection refused, timeout, 5xx).
    #[error("network error: {0}")]
    Network(String),

    /// The server denied the request (401/403). Never retried: retrying an
    /// authorization decision cannot change it and would hammer the gate.
    #[error("access denied: {0}")]
    Denied(String),

    /// The server answered but the payload did not parse.
    #[error("failed to decode response: {0}")]
    Decode(String),

    /// The server rejected the request as invalid (4xx other than auth).
    #[error("request rejected: {0}")]
    Rejected(String),
}

impl ClientError {
    /// Whether a retry could plausibly succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, ClientError::Network(_))
    }
}
