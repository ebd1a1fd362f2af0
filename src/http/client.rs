// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTTP client implementation

use std::time::{Duration, Instant};

use reqwest::redirect::Policy;
use reqwest::Client;
use url::Url;

use super::{Response, DEFAULT_TIMEOUT, FORM_CONTENT_TYPE};
use crate::error::{Error, Result};

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Per-request timeout ceiling; in-flight requests are aborted on expiry
    pub timeout: Duration,
    /// Maximum redirects to follow
    pub max_redirects: usize,
    /// Accept invalid certificates (dangerous!)
    pub accept_invalid_certs: bool,
    /// Proxy URL
    pub proxy: Option<String>,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            max_redirects: 10,
            accept_invalid_certs: false,
            proxy: None,
        }
    }
}

/// HTTP client used by both phases of the fetch pipeline
///
/// No cookie store and no default browser headers; every header on the
/// wire comes from the fabricated [`HeaderSet`](crate::scrape::HeaderSet)
/// or from the phase-specific extras passed by the caller.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    config: HttpClientConfig,
}

impl HttpClient {
    /// Create a new HTTP client with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(HttpClientConfig::default())
    }

    /// Create a new HTTP client with custom configuration
    pub fn with_config(config: HttpClientConfig) -> Result<Self> {
        let mut builder = Client::builder()
            .timeout(config.timeout)
            .redirect(Policy::limited(config.max_redirects))
            .danger_accept_invalid_certs(config.accept_invalid_certs);

        if let Some(ref proxy_url) = config.proxy {
            builder = builder.proxy(
                reqwest::Proxy::all(proxy_url)
                    .map_err(|e| Error::Config(format!("invalid proxy URL: {}", e)))?,
            );
        }

        let client = builder
            .build()
            .map_err(|e| Error::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    /// Execute a GET request with the given headers
    pub async fn get(&self, url: &Url, headers: &[(&str, &str)]) -> Result<Response> {
        let mut builder = self.client.get(url.clone());
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        self.execute(url, builder).await
    }

    /// Execute a POST with a pre-encoded form body and the given headers
    ///
    /// The body must already be URL-encoded; Content-Type and an exact
    /// Content-Length are set here.
    pub async fn post_form(
        &self,
        url: &Url,
        body: String,
        headers: &[(&str, &str)],
    ) -> Result<Response> {
        let content_length = body.len().to_string();
        let mut builder = self
            .client
            .post(url.clone())
            .header(super::headers::CONTENT_TYPE, FORM_CONTENT_TYPE)
            .header(super::headers::CONTENT_LENGTH, content_length);
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        self.execute(url, builder.body(body)).await
    }

    async fn execute(&self, url: &Url, builder: reqwest::RequestBuilder) -> Result<Response> {
        let start = Instant::now();

        let response = builder
            .send()
            .await
            .map_err(|e| Error::from_reqwest(url.as_str(), e))?;

        let status = response.status();
        let headers = response.headers().clone();
        let final_url = response.url().clone();

        let body = response
            .bytes()
            .await
            .map_err(|e| Error::from_reqwest(url.as_str(), e))?;

        let response_time = start.elapsed().as_millis() as u64;
        Ok(Response::new(status, headers, body, final_url, response_time))
    }

    /// Get client configuration
    pub fn config(&self) -> &HttpClientConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = HttpClient::new().unwrap();
        assert_eq!(client.config().timeout, DEFAULT_TIMEOUT);
    }

    #[test]
    fn test_invalid_proxy_rejected() {
        let config = HttpClientConfig {
            proxy: Some("not a url".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            HttpClient::with_config(config),
            Err(Error::Config(_))
        ));
    }
}
