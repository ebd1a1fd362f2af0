// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Pipeline orchestration: headers, bootstrap, then data fetch
//!
//! Each `fetch_tenders` call is an independent sequential pipeline with
//! its own fabricated headers and session; nothing mutable is shared
//! across invocations, so concurrent callers never contend.

use std::time::Duration;

use url::Url;

use super::backoff::BackoffPolicy;
use super::fetch::{fetch_page, PageQuery, TenderPage};
use super::headers::HeaderSet;
use super::session::{bootstrap, SessionCredential};
use crate::error::Result;
use crate::http::{HttpClient, HttpClientConfig, DEFAULT_TIMEOUT};

/// Default portal instance (Ministry of Health LPSE)
pub const DEFAULT_BASE_URL: &str = "https://spse.inaproc.id/kemkes";

/// Scraper configuration
#[derive(Debug, Clone)]
pub struct ScraperConfig {
    /// Portal base URL, e.g. `https://spse.inaproc.id/kemkes`
    pub base_url: String,
    /// Per-request timeout ceiling
    pub timeout: Duration,
    /// Bootstrap retry budget; `max_retries + 1` attempts total
    pub max_retries: u32,
    /// Backoff policy for bootstrap retries
    pub backoff: BackoffPolicy,
    /// Proxy URL
    pub proxy: Option<String>,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            max_retries: 3,
            backoff: BackoffPolicy::default(),
            proxy: None,
        }
    }
}

impl ScraperConfig {
    /// Create a new scraper config
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the portal base URL
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the bootstrap retry budget
    pub fn max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Set the backoff policy
    pub fn backoff(mut self, backoff: BackoffPolicy) -> Self {
        self.backoff = backoff;
        self
    }

    /// Set a proxy
    pub fn proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }
}

/// Two-phase tender listing fetcher
pub struct Scraper {
    client: HttpClient,
    config: ScraperConfig,
}

impl Scraper {
    /// Create a scraper with the given configuration
    pub fn new(config: ScraperConfig) -> Result<Self> {
        let client = HttpClient::with_config(HttpClientConfig {
            timeout: config.timeout,
            proxy: config.proxy.clone(),
            ..Default::default()
        })?;
        Ok(Self { client, config })
    }

    /// Create a scraper against the default portal
    pub fn with_defaults() -> Result<Self> {
        Self::new(ScraperConfig::default())
    }

    /// Landing page URL (`{base}/lelang`)
    pub fn landing_url(&self) -> Result<Url> {
        let base = self.config.base_url.trim_end_matches('/');
        Ok(Url::parse(&format!("{}/lelang", base))?)
    }

    /// Listing data URL (`{base}/dt/lelang?tahun={year}`)
    pub fn data_url(&self, year: i32) -> Result<Url> {
        let base = self.config.base_url.trim_end_matches('/');
        Ok(Url::parse(&format!("{}/dt/lelang?tahun={}", base, year))?)
    }

    /// Run the full pipeline for one pagination request
    ///
    /// Fabricates one header set, bootstraps a fresh session with it, then
    /// posts the DataTables payload reusing the same headers. The phases
    /// are strictly ordered; the token from phase one feeds phase two.
    pub async fn fetch_tenders(&self, query: &PageQuery) -> Result<TenderPage> {
        let headers = HeaderSet::random();
        tracing::debug!(user_agent = headers.user_agent(), "headers fabricated");

        let landing = self.landing_url()?;
        let session = self.bootstrap_session(&landing, &headers).await?;

        let data_url = self.data_url(query.year)?;
        fetch_page(&self.client, &data_url, &landing, &session, &headers, query).await
    }

    /// Run only the bootstrap phase
    pub async fn bootstrap_session(
        &self,
        landing_url: &Url,
        headers: &HeaderSet,
    ) -> Result<SessionCredential> {
        bootstrap(
            &self.client,
            landing_url,
            headers,
            self.config.max_retries,
            &self.config.backoff,
        )
        .await
    }

    /// Get scraper configuration
    pub fn config(&self) -> &ScraperConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_builders() {
        let scraper = Scraper::new(
            ScraperConfig::new().base_url("https://spse.inaproc.id/kemkes/"),
        )
        .unwrap();

        assert_eq!(
            scraper.landing_url().unwrap().as_str(),
            "https://spse.inaproc.id/kemkes/lelang"
        );
        assert_eq!(
            scraper.data_url(2025).unwrap().as_str(),
            "https://spse.inaproc.id/kemkes/dt/lelang?tahun=2025"
        );
    }

    #[test]
    fn test_config_builder() {
        let config = ScraperConfig::new()
            .base_url("https://spse.inaproc.id/pu")
            .max_retries(5)
            .timeout(Duration::from_secs(20));

        assert_eq!(config.base_url, "https://spse.inaproc.id/pu");
        assert_eq!(config.max_retries, 5);
        assert_eq!(config.timeout, Duration::from_secs(20));
    }
}
