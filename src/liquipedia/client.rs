use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::Client;
use tracing::debug;
use url::Url;

use crate::tournaments::MarkupSource;

/// Fetches listing pages from Liquipedia over HTTPS.
///
/// Liquipedia asks scrapers to identify themselves and accept gzip, so the
/// client always sends a descriptive `User-Agent` and has gzip enabled.
#[derive(Clone)]
pub struct LiquipediaClient {
    http: Client,
}

impl LiquipediaClient {
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("text/html"));
        let http = Client::builder()
            .user_agent(user_agent)
            .default_headers(headers)
            .gzip(true)
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(LiquipediaClient { http })
    }
}

#[async_trait]
impl MarkupSource for LiquipediaClient {
    async fn fetch(&self, url: &Url) -> Result<String> {
        debug!("GET {}", url);
        let resp = self
            .http
            .get(url.clone())
            .send()
            .await
            .context("Liquipedia request failed")?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            anyhow::bail!(
                "Liquipedia returned {} for {}: {}",
                status,
                url,
                body.chars().take(200).collect::<String>()
            );
        }

        resp.text().await.context("Failed to read Liquipedia response body")
    }

    fn name(&self) -> &str {
        "Liquipedia"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_builds() {
        let client = LiquipediaClient::new("tournament-calendar/test", Duration::from_secs(5)).unwrap();
        assert_eq!(client.name(), "Liquipedia");
    }
}
