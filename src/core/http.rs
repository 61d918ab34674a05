//! JSON-over-HTTP fetch layer with a bounded fixed-delay retry loop.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use backon::{ConstantBuilder, Retryable};
use reqwest::{Client, StatusCode};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::RetryPolicy;

/// Query parameters of one GET request.
pub type QueryParams = [(&'static str, String)];

/// Failure of a single attempt.
#[derive(Debug, Error)]
pub enum AttemptError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("unexpected HTTP status {0}")]
    Status(StatusCode),
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("GET {url} ({params}) failed after {attempts} attempt(s): {source}")]
    Exhausted {
        url: String,
        params: String,
        attempts: usize,
        #[source]
        source: AttemptError,
    },
}

#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    policy: RetryPolicy,
}

impl HttpFetcher {
    pub fn new(policy: RetryPolicy) -> Self {
        Self::with_client(Client::new(), policy)
    }

    pub fn with_client(client: Client, policy: RetryPolicy) -> Self {
        Self { client, policy }
    }

    /// GET `url` and decode the body as JSON.
    ///
    /// Non-2xx statuses, transport errors and undecodable bodies all count as
    /// failed attempts. No schema validation happens here.
    pub async fn get_json(&self, url: &str, params: &QueryParams) -> Result<Value, FetchError> {
        let attempts = AtomicUsize::new(0);
        let counter = &attempts;
        let backoff = ConstantBuilder::default()
            .with_delay(self.policy.delay)
            .with_max_times(self.policy.max_attempts.saturating_sub(1));

        let result = (move || async move {
            counter.fetch_add(1, Ordering::Relaxed);
            self.attempt(url, params).await
        })
        .retry(backoff)
        .sleep(tokio::time::sleep)
        .notify(|err: &AttemptError, delay: Duration| {
            warn!(
                url = %url,
                error = %err,
                retry_in_ms = delay.as_millis() as u64,
                "HttpFetcher: attempt failed, retrying"
            );
        })
        .await;

        result.map_err(|source| FetchError::Exhausted {
            url: url.to_string(),
            params: format_params(params),
            attempts: attempts.load(Ordering::Relaxed),
            source,
        })
    }

    async fn attempt(&self, url: &str, params: &QueryParams) -> Result<Value, AttemptError> {
        debug!(url = %url, params = %format_params(params), "HttpFetcher: GET");
        let response = self
            .client
            .get(url)
            .query(params)
            .timeout(self.policy.timeout)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AttemptError::Status(status));
        }
        Ok(response.json::<Value>().await?)
    }
}

pub fn format_params(params: &QueryParams) -> String {
    params
        .iter()
        .map(|(key, value)| format!("{}={}", key, value))
        .collect::<Vec<_>>()
        .join("&")
}
