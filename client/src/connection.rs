use anyhow::{Context, Result};
use std::time::Duration;

use crate::url::ReplayUrl;

/// Backoff between failed fetch attempts
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_attempts: usize,
    pub initial_delay: Duration,
    pub max_delay: Duration,
    pub backoff_multiplier: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(5),
            backoff_multiplier: 2.0,
        }
    }
}

impl RetryPolicy {
    /// Delay to wait after a failed attempt
    pub fn next_delay(&self, delay: Duration) -> Duration {
        Duration::from_secs_f64(delay.as_secs_f64() * self.backoff_multiplier).min(self.max_delay)
    }
}

/// HTTP settings for fetching replays
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub timeout: Duration,
    pub user_agent: String,
    pub retry: RetryPolicy,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(15),
            user_agent: concat!("recap/", env!("CARGO_PKG_VERSION")).to_string(),
            retry: RetryPolicy::default(),
        }
    }
}

pub struct Connection {
    http: reqwest::Client,
    retry: RetryPolicy,
}

impl Connection {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            retry: config.retry.clone(),
        })
    }

    async fn get_text(&self, url: &str) -> Result<String> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .with_context(|| format!("Request to {} failed", url))?
            .error_for_status()?;

        response
            .text()
            .await
            .with_context(|| format!("Failed to read response body from {}", url))
    }

    /// Download a replay's raw log, retrying transient failures
    pub async fn fetch_log(&self, replay: &ReplayUrl) -> Result<String> {
        let url = replay.log_url();
        let mut delay = self.retry.initial_delay;
        let mut attempt = 1;

        loop {
            match self.get_text(&url).await {
                Ok(text) => return Ok(text),
                Err(e) => {
                    let client_error = e
                        .downcast_ref::<reqwest::Error>()
                        .and_then(|e| e.status())
                        .is_some_and(|status| status.is_client_error());
                    if client_error || attempt >= self.retry.max_attempts {
                        return Err(e).with_context(|| {
                            format!("Failed to fetch {} after {} attempt(s)", url, attempt)
                        });
                    }

                    tracing::warn!(
                        attempt = attempt,
                        max_attempts = self.retry.max_attempts,
                        error = %e,
                        "Replay fetch failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                    delay = self.retry.next_delay(delay);
                }
            }
        }
    }
}
