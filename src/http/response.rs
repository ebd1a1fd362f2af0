// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTTP response types

use bytes::Bytes;
use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use url::Url;

use crate::error::Result;

/// Owned HTTP response snapshot
#[derive(Debug, Clone)]
pub struct Response {
    /// Response status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Response body
    pub body: Bytes,
    /// Final URL (after redirects)
    pub url: Url,
    /// Response time in milliseconds
    pub response_time_ms: u64,
}

impl Response {
    /// Create a new response
    pub fn new(
        status: StatusCode,
        headers: HeaderMap,
        body: Bytes,
        url: Url,
        response_time_ms: u64,
    ) -> Self {
        Self {
            status,
            headers,
            body,
            url,
            response_time_ms,
        }
    }

    /// Check if status is success (2xx)
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Get status code as u16
    pub fn status_code(&self) -> u16 {
        self.status.as_u16()
    }

    /// Get body as text, lossy conversion
    pub fn text_lossy(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Parse body as JSON
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_slice(&self.body).map_err(crate::error::Error::from)
    }

    /// Get a header value
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Get all values for a header
    pub fn header_all(&self, name: &str) -> Vec<&str> {
        self.headers
            .get_all(name)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .collect()
    }

    /// Get Set-Cookie headers
    pub fn set_cookies(&self) -> Vec<&str> {
        self.header_all(super::headers::SET_COOKIE)
    }

    /// Get body length
    pub fn body_len(&self) -> usize {
        self.body.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    #[test]
    fn test_response_status() {
        let resp = Response::new(
            StatusCode::OK,
            HeaderMap::new(),
            Bytes::new(),
            Url::parse("https://example.com").unwrap(),
            100,
        );
        assert!(resp.is_success());
        assert_eq!(resp.status_code(), 200);
    }

    #[test]
    fn test_set_cookies_all_values() {
        let mut headers = HeaderMap::new();
        headers.append("set-cookie", HeaderValue::from_static("sid=xyz"));
        headers.append("set-cookie", HeaderValue::from_static("lang=id"));

        let resp = Response::new(
            StatusCode::OK,
            headers,
            Bytes::new(),
            Url::parse("https://example.com").unwrap(),
            100,
        );
        assert_eq!(resp.set_cookies(), vec!["sid=xyz", "lang=id"]);
    }

    #[test]
    fn test_json_parse() {
        let resp = Response::new(
            StatusCode::OK,
            HeaderMap::new(),
            Bytes::from(r#"{"recordsTotal": 42}"#),
            Url::parse("https://example.com").unwrap(),
            100,
        );
        let value: serde_json::Value = resp.json().unwrap();
        assert_eq!(value["recordsTotal"], 42);
    }
}
