use anyhow::Result;
use async_trait::async_trait;
use url::Url;

/// Anything that can hand back the markup of a listing page.
#[async_trait]
pub trait MarkupSource: Send + Sync {
    /// Fetch the page body at `url`.
    async fn fetch(&self, url: &Url) -> Result<String>;

    /// Human-readable name for logging.
    fn name(&self) -> &str;
}

/// Sink for recoverable per-row parse failures.
pub trait FailureReporter: Send + Sync {
    fn report_parse_failure(&self);
}
