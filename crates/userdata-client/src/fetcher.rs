//! The userdata fetch loop.

use crate::config::RetryConfig;
use reqwest::Client as HttpClient;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use url::Url;
use userdata_core::{Result, UserdataError};

/// Default per-attempt request timeout
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default connect timeout; early-boot routing failures should fail fast
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Fetches the raw userdata document from a provisioning endpoint.
///
/// A `Fetcher` holds no per-fetch state: every call to [`fetch`](Self::fetch)
/// starts its own attempt counter and clock, so one instance can be reused
/// or cloned freely.
#[derive(Clone)]
pub struct Fetcher {
    inner: Arc<FetcherInner>,
}

struct FetcherInner {
    http: HttpClient,
    retry: RetryConfig,
}

impl Fetcher {
    /// Create a fetcher with the given retry policy and default settings
    pub fn new(retry: RetryConfig) -> Result<Self> {
        FetcherBuilder::new(retry).build()
    }

    /// Create a builder for custom configuration
    #[must_use]
    pub fn builder(retry: RetryConfig) -> FetcherBuilder {
        FetcherBuilder::new(retry)
    }

    /// The retry policy this fetcher applies
    #[must_use]
    pub fn retry_config(&self) -> &RetryConfig {
        &self.inner.retry
    }

    /// Fetch the document at `endpoint`, retrying until success or until
    /// the retry budget is spent.
    pub async fn fetch(&self, endpoint: &str) -> Result<Vec<u8>> {
        self.fetch_with_cancel(endpoint, &CancellationToken::new())
            .await
    }

    /// Like [`fetch`](Self::fetch), but returns
    /// [`UserdataError::Cancelled`] as soon as `cancel` fires, whether a
    /// request is in flight or the loop is waiting between attempts.
    pub async fn fetch_with_cancel(
        &self,
        endpoint: &str,
        cancel: &CancellationToken,
    ) -> Result<Vec<u8>> {
        let url = Url::parse(endpoint)
            .map_err(|e| UserdataError::InvalidUrl(format!("{endpoint}: {e}")))?;
        let retry = &self.inner.retry;
        let started = Instant::now();
        let mut attempt: u32 = 0;

        loop {
            attempt = attempt.saturating_add(1);
            debug!(attempt, endpoint = %url, "requesting userdata");

            let remaining = retry.remaining(started.elapsed());
            let outcome = tokio::select! {
                biased;
                () = cancel.cancelled() => {
                    warn!(attempt, endpoint = %url, "userdata fetch cancelled mid-request");
                    return Err(UserdataError::Cancelled { attempts: attempt - 1 });
                }
                outcome = self.attempt(&url, remaining) => outcome,
            };

            let error = match outcome {
                Ok(body) => {
                    info!(attempt, endpoint = %url, bytes = body.len(), "fetched userdata");
                    return Ok(body);
                }
                Err(e) => e,
            };

            let delay = retry.delay_for(attempt);
            if retry.is_exhausted(attempt, started.elapsed().saturating_add(delay)) {
                warn!(attempt, endpoint = %url, error = %error, "userdata fetch attempt failed, giving up");
                return Err(UserdataError::FetchExhausted {
                    attempts: attempt,
                    source: Box::new(error),
                });
            }

            warn!(
                attempt,
                endpoint = %url,
                error = %error,
                retry_in_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                "userdata fetch attempt failed"
            );

            tokio::select! {
                biased;
                () = cancel.cancelled() => {
                    warn!(attempt, endpoint = %url, "userdata fetch cancelled while waiting to retry");
                    return Err(UserdataError::Cancelled { attempts: attempt });
                }
                () = tokio::time::sleep(delay) => {}
            }
        }
    }

    /// One attempt, capped to whatever is left of the overall deadline
    async fn attempt(&self, url: &Url, remaining: Option<Duration>) -> Result<Vec<u8>> {
        match remaining {
            Some(limit) => tokio::time::timeout(limit, self.request(url))
                .await
                .unwrap_or_else(|_| {
                    Err(UserdataError::Transport(
                        "request cut short by retry deadline".into(),
                    ))
                }),
            None => self.request(url).await,
        }
    }

    async fn request(&self, url: &Url) -> Result<Vec<u8>> {
        let response = self
            .inner
            .http
            .get(url.clone())
            .send()
            .await
            .map_err(|e| UserdataError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            debug!(status = status.as_u16(), "provisioning endpoint returned an error status");
            return Err(UserdataError::HttpStatus {
                code: status.as_u16(),
            });
        }

        // A body that fails half way is a failed attempt, never a short document.
        let body = response
            .bytes()
            .await
            .map_err(|e| UserdataError::Transport(format!("reading response body: {e}")))?;

        Ok(body.to_vec())
    }
}

impl std::fmt::Debug for Fetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Fetcher")
            .field("retry", &self.inner.retry)
            .finish_non_exhaustive()
    }
}

/// Builder for configuring a [`Fetcher`]
pub struct FetcherBuilder {
    retry: RetryConfig,
    timeout: Duration,
    connect_timeout: Duration,
    user_agent: String,
}

impl FetcherBuilder {
    /// Create a new builder with the given retry policy
    #[must_use]
    pub fn new(retry: RetryConfig) -> Self {
        Self {
            retry,
            timeout: DEFAULT_TIMEOUT,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            user_agent: format!("userdata-rs/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    /// Set the per-attempt request timeout
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the per-attempt connect timeout
    #[must_use]
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Set the User-Agent header
    #[must_use]
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = agent.into();
        self
    }

    /// Replace the retry policy
    #[must_use]
    pub fn retry(mut self, config: RetryConfig) -> Self {
        self.retry = config;
        self
    }

    /// Build the fetcher
    pub fn build(self) -> Result<Fetcher> {
        self.retry.validate()?;

        let http = HttpClient::builder()
            .timeout(self.timeout)
            .connect_timeout(self.connect_timeout)
            .user_agent(&self.user_agent)
            .build()
            .map_err(|e| UserdataError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Fetcher {
            inner: Arc::new(FetcherInner {
                http,
                retry: self.retry,
            }),
        })
    }
}
