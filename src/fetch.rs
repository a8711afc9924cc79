use std::time::{Duration, Instant};

use reqwest::Client;
use tracing::debug;

use crate::error::ScrapeError;
use crate::settings::Settings;

/// Blocking-in-sequence page fetcher. One request at a time, no retries.
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    pub fn new(settings: &Settings) -> Result<Self, ScrapeError> {
        let mut builder = Client::builder().user_agent(settings.user_agent.clone());
        if let Some(secs) = settings.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        Ok(Fetcher {
            client: builder.build()?,
        })
    }

    /// Fetch the listing page. Any non-success status is fatal for the run.
    pub async fn listing(&self, url: &str) -> Result<String, ScrapeError> {
        let (status, body) = self.get(url).await?;
        if !status.is_success() {
            return Err(ScrapeError::ListingStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(body)
    }

    /// Fetch a single post page. A non-success status fails only this post.
    pub async fn post(&self, url: &str) -> Result<String, ScrapeError> {
        let (status, body) = self.get(url).await?;
        if !status.is_success() {
            return Err(ScrapeError::DetailStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(body)
    }

    async fn get(&self, url: &str) -> Result<(reqwest::StatusCode, String), ScrapeError> {
        let start = Instant::now();
        let response = self.client.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;
        debug!(
            %url,
            status = status.as_u16(),
            bytes = body.len(),
            latency_ms = start.elapsed().as_millis() as u64,
            "Fetched page"
        );
        Ok((status, body))
    }
}
