use reqwest::Client;

use super::{FetchError, ScraperConfig, TastingEvent};
use crate::scrapers::parser::extract_events_from_html;

/// Fetches the tastings listing page. One attempt per call, no retries.
pub struct TastingScraper {
    client: Client,
}

impl TastingScraper {
    pub fn new(config: ScraperConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent)
            .gzip(true)
            .deflate(true)
            .brotli(true)
            .build()
            .map_err(FetchError::Client)?;

        Ok(Self { client })
    }

    pub async fn fetch_events(&self, url: &str) -> Result<Vec<TastingEvent>, FetchError> {
        tracing::info!("Fetching tasting events from {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::from_request(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status,
            });
        }

        let body = response.text().await.map_err(|source| FetchError::Body {
            url: url.to_string(),
            source,
        })?;

        let events = extract_events_from_html(&body);
        tracing::debug!("Parsed {} product cards from {}", events.len(), url);

        Ok(events)
    }
}
