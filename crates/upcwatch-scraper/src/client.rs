//! HTTP client for the target site's search and product pages.
//!
//! Transient failures (429, network errors, 5xx) retry with exponential
//! backoff. The anti-automation interstitial is a separate mechanism: it
//! arrives as a 200 with a signature `<title>`, and gets exactly one
//! delayed re-fetch per occurrence before [`ScraperError::Blocked`] is
//! returned: a bounded state machine, not a loop.

use std::time::Duration;

use rand::Rng;
use reqwest::Client;

use upcwatch_core::AppConfig;

use crate::error::ScraperError;
use crate::page;
use crate::retry::retry_with_backoff;

/// A fetched page: the final URL after redirects and the raw HTML body.
#[derive(Debug)]
pub struct FetchedPage {
    pub url: String,
    pub html: String,
}

/// States of the per-fetch block handling machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BlockState {
    /// First fetch of the page.
    Fetching,
    /// Interstitial seen once; exactly one delayed re-fetch remains.
    Retrying,
}

pub struct SiteClient {
    client: Client,
    base_url: String,
    max_retries: u32,
    backoff_base_secs: u64,
    blocked_retry_delay_secs: u64,
    inter_request_delay_ms: u64,
    delay_jitter_ms: u64,
}

impl SiteClient {
    /// Builds a `SiteClient` from the run configuration: timeout,
    /// user-agent, optional proxy, retry and politeness policy.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed (invalid proxy URL, TLS setup failure).
    pub fn new(config: &AppConfig) -> Result<Self, ScraperError> {
        let mut builder = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(&config.user_agent);

        if let Some(proxy_url) = &config.http_proxy {
            builder = builder.proxy(reqwest::Proxy::all(proxy_url)?);
        }

        Ok(Self {
            client: builder.build()?,
            base_url: config.search_base_url.trim_end_matches('/').to_owned(),
            max_retries: config.max_retries,
            backoff_base_secs: config.retry_backoff_base_secs,
            blocked_retry_delay_secs: config.blocked_retry_delay_secs,
            inter_request_delay_ms: config.inter_request_delay_ms,
            delay_jitter_ms: config.delay_jitter_ms,
        })
    }

    /// The search URL for a zero-padded UPC.
    #[must_use]
    pub fn search_url(&self, padded_upc: &str) -> String {
        format!("{}/s?k={padded_upc}", self.base_url)
    }

    /// Fetches the first search-results page for a zero-padded UPC.
    ///
    /// # Errors
    ///
    /// Propagates fetch errors after retries; [`ScraperError::Blocked`]
    /// when the interstitial survives its single delayed re-fetch.
    pub async fn fetch_search_page(&self, padded_upc: &str) -> Result<FetchedPage, ScraperError> {
        let url = self.search_url(padded_upc);
        self.fetch_page(&url).await
    }

    /// Fetches a candidate product page by absolute URL.
    ///
    /// # Errors
    ///
    /// Same contract as [`SiteClient::fetch_search_page`].
    pub async fn fetch_product_page(&self, url: &str) -> Result<FetchedPage, ScraperError> {
        self.fetch_page(url).await
    }

    /// Sleeps the politeness delay plus random jitter. Called by the
    /// orchestrator between navigations.
    pub async fn politeness_pause(&self) {
        let jitter_ms = if self.delay_jitter_ms == 0 {
            0
        } else {
            rand::rng().random_range(0..=self.delay_jitter_ms)
        };
        let total = self.inter_request_delay_ms.saturating_add(jitter_ms);
        if total > 0 {
            tokio::time::sleep(Duration::from_millis(total)).await;
        }
    }

    async fn fetch_page(&self, url: &str) -> Result<FetchedPage, ScraperError> {
        let mut state = BlockState::Fetching;
        loop {
            let page = self.fetch_html(url).await?;
            if !page::is_blocked(&page.html) {
                return Ok(page);
            }
            match state {
                BlockState::Fetching => {
                    tracing::warn!(
                        url,
                        delay_secs = self.blocked_retry_delay_secs,
                        "blocking interstitial detected, waiting and re-fetching once"
                    );
                    tokio::time::sleep(Duration::from_secs(self.blocked_retry_delay_secs)).await;
                    state = BlockState::Retrying;
                }
                BlockState::Retrying => {
                    return Err(ScraperError::Blocked { url: page.url });
                }
            }
        }
    }

    async fn fetch_html(&self, url: &str) -> Result<FetchedPage, ScraperError> {
        retry_with_backoff(self.max_retries, self.backoff_base_secs, || async move {
            let response = self
                .client
                .get(url)
                .header(
                    reqwest::header::ACCEPT,
                    "text/html,application/xhtml+xml;q=0.9,*/*;q=0.8",
                )
                .header(reqwest::header::ACCEPT_LANGUAGE, "en-US,en;q=0.9")
                .send()
                .await?;

            let status = response.status();
            let final_url = response.url().to_string();

            if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                let retry_after_secs = response
                    .headers()
                    .get(reqwest::header::RETRY_AFTER)
                    .and_then(|v| v.to_str().ok())
                    .and_then(|s| s.parse::<u64>().ok())
                    .unwrap_or(60);
                return Err(ScraperError::RateLimited {
                    url: final_url,
                    retry_after_secs,
                });
            }

            if !status.is_success() {
                return Err(ScraperError::UnexpectedStatus {
                    status: status.as_u16(),
                    url: final_url,
                });
            }

            let html = response.text().await?;
            Ok(FetchedPage {
                url: final_url,
                html,
            })
        })
        .await
    }
}
