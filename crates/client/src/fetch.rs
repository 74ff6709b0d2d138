//! The transport seam and retry policy.
//!
//! Handlers of cached reads go through the [`Fetch`] trait so tests can
//! script responses without a server. The production implementation is
//! [`HttpFetcher`] on top of `reqwest`.

use std::time::Duration;

use async_trait::async_trait;
use roomspec_core::types::DbId;

use crate::error::ClientError;

/// One GET against the API, as the cache layer sees it.
#[async_trait]
pub trait Fetch: Send + Sync {
    /// Fetch `path` (absolute, e.g. `/api/v1/listings/7`) as `viewer`,
    /// returning the decoded JSON body.
    async fn fetch_json(
        &self,
        path: &str,
        viewer: Option<DbId>,
    ) -> Result<serde_json::Value, ClientError>;
}

/// Production transport on `reqwest`.
pub struct HttpFetcher {
    base_url: String,
    http: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            http: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl Fetch for HttpFetcher {
    async fn fetch_json(
        &self,
        path: &str,
        viewer: Option<DbId>,
    ) -> Result<serde_json::Value, ClientError> {
        let mut request = self.http.get(format!("{}{path}", self.base_url));
        if let Some(user_id) = viewer {
            request = request.header("x-user-id", user_id.to_string());
        }

        let response = request
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        let status = response.status();
        if status.as_u16() == 401 || status.as_u16() == 403 {
            return Err(ClientError::Denied(format!("server returned {status}")));
        }
        if status.is_server_error() {
            return Err(ClientError::Network(format!("server returned {status}")));
        }
        if !status.is_success() {
            return Err(ClientError::Rejected(format!("server returned {status}")));
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Retry policy
// ---------------------------------------------------------------------------

/// How sensitive a query is to serving a wrong answer.
///
/// Catalog reads (listings, entity metadata) tolerate retries; anything
/// feeding an access decision (visibility, purchase status) must fail
/// closed instead of being papered over by a retry loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryClass {
    Catalog,
    Authorization,
}

/// Bounded retry with exponential backoff, transient errors only.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
}

impl RetryPolicy {
    /// The policy for a query class: catalog reads get three attempts with
    /// backoff, authorization-sensitive reads get exactly one.
    pub fn for_class(class: QueryClass) -> Self {
        match class {
            QueryClass::Catalog => Self {
                max_attempts: 3,
                base_delay: Duration::from_millis(200),
            },
            QueryClass::Authorization => Self {
                max_attempts: 1,
                base_delay: Duration::ZERO,
            },
        }
    }

    /// Run `op`, retrying transient failures with doubling delays.
    pub async fn run<T, F, Fut>(&self, mut op: F) -> Result<T, ClientError>
    where
        F: FnMut() -> Fut,
        Fut: std::future::Future<Output = Result<T, ClientError>>,
    {
        let mut delay = self.base_delay;
        let mut attempt = 1;
        loop {
            match op().await {
                Ok(value) => return Ok(value),
                Err(err) if err.is_transient() && attempt < self.max_attempts => {
                    tracing::debug!(attempt, error = %err, "Retrying transient failure");
                    tokio::time::sleep(delay).await;
                    delay *= 2;
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }
}
