// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Caller-facing response contract
//!
//! Framework-free modeling of the thin HTTP boundary: CORS headers on
//! every response, immediate empty-body answer to OPTIONS preflights, and
//! the success/error JSON envelopes around the pass-through tender page.

use chrono::Utc;
use serde_json::json;

use super::query::ListingQuery;
use crate::error::Error;
use crate::scrape::{Scraper, TenderPage};

/// A boundary response ready for whatever router exposes this
#[derive(Debug, Clone)]
pub struct ApiResponse {
    /// HTTP status code
    pub status: u16,
    /// Response headers, CORS included
    pub headers: Vec<(&'static str, String)>,
    /// Response body; empty for preflights
    pub body: String,
}

impl ApiResponse {
    /// Look up a header value by name
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// CORS headers attached to every response
fn cors_headers() -> Vec<(&'static str, String)> {
    vec![
        ("access-control-allow-origin", "*".to_string()),
        (
            "access-control-allow-methods",
            "GET, POST, OPTIONS".to_string(),
        ),
        ("access-control-allow-headers", "Content-Type".to_string()),
    ]
}

/// Answer a CORS preflight: 200, no body
pub fn preflight_response() -> ApiResponse {
    ApiResponse {
        status: 200,
        headers: cors_headers(),
        body: String::new(),
    }
}

/// Wrap a fetched page in the success envelope
pub fn success_response(page: TenderPage, query: &ListingQuery) -> ApiResponse {
    let envelope = json!({
        "success": true,
        "data": page,
        "metadata": {
            "year": query.year,
            "pageNumber": query.page_number,
            "pageSize": query.page_size,
            "timestamp": Utc::now().to_rfc3339(),
        },
    });

    let mut headers = cors_headers();
    headers.push(("content-type", "application/json".to_string()));
    ApiResponse {
        status: 200,
        headers,
        body: envelope.to_string(),
    }
}

/// Wrap a pipeline failure in the error envelope
pub fn error_response(status: u16, err: &Error) -> ApiResponse {
    let envelope = json!({
        "success": false,
        "error": err.to_string(),
        "timestamp": Utc::now().to_rfc3339(),
    });

    let mut headers = cors_headers();
    headers.push(("content-type", "application/json".to_string()));
    ApiResponse {
        status,
        headers,
        body: envelope.to_string(),
    }
}

/// Handle one inbound request
///
/// OPTIONS short-circuits without touching the network; GET and POST run
/// the pipeline, accepting parameters from the query string or a
/// form-encoded body; anything else is a 405 error envelope.
pub async fn handle(
    scraper: &Scraper,
    method: &str,
    query_string: &str,
    body: &str,
) -> ApiResponse {
    match method {
        "OPTIONS" => preflight_response(),
        "GET" | "POST" => {
            let query = ListingQuery::from_request(query_string, body);
            match scraper.fetch_tenders(&query.to_page_query()).await {
                Ok(page) => success_response(page, &query),
                Err(err) => {
                    tracing::error!(error = %err, "listing fetch failed");
                    error_response(500, &err)
                }
            }
        }
        other => error_response(405, &Error::other(format!("method {} not allowed", other))),
    }
}
