//! Single-page HTTP fetcher.
//!
//! Issues one GET against the target URL and classifies the outcome:
//! HTTP 200 yields the body exactly as received, any other status is a
//! uniform fetch failure, and transport errors (DNS, TLS, timeout)
//! propagate as [`WebAuditError::Network`].

use std::time::Duration;

use reqwest::Client;
use tracing::{debug, instrument};
use url::Url;

use webaudit_shared::{Result, WebAuditError};

/// User-Agent string for fetch requests.
const USER_AGENT: &str = concat!("webaudit/", env!("CARGO_PKG_VERSION"));

/// Outcome of fetching the target page.
#[derive(Debug, Clone)]
pub enum FetchOutcome {
    /// HTTP 200 with the response body forwarded unmodified.
    Ok { status: u16, body: String },
    /// Any non-200 status. Downstream treats all of these as one failure
    /// class, so no per-status detail is kept beyond the code itself.
    HttpError { status: u16 },
}

/// HTTP client wrapper for the single page fetch.
pub struct PageFetcher {
    client: Client,
}

impl PageFetcher {
    /// Create a fetcher with the default client settings.
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .redirect(reqwest::redirect::Policy::limited(5))
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| WebAuditError::Network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client })
    }

    /// Fetch the page at `url` with one GET request.
    #[instrument(skip(self), fields(url = %url))]
    pub async fn fetch(&self, url: &Url) -> Result<FetchOutcome> {
        debug!("fetching page");

        let response = self
            .client
            .get(url.as_str())
            .send()
            .await
            .map_err(|e| WebAuditError::Network(format!("{url}: {e}")))?;

        let status = response.status().as_u16();

        if status != 200 {
            debug!(status, "non-200 response");
            return Ok(FetchOutcome::HttpError { status });
        }

        let body = response
            .text()
            .await
            .map_err(|e| WebAuditError::Network(format!("{url}: body read failed: {e}")))?;

        debug!(body_len = body.len(), "page fetched");

        Ok(FetchOutcome::Ok { status, body })
    }
}
