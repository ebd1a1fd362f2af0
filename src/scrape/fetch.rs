// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Paginated data fetch against the DataTables listing endpoint
//!
//! Builds the fixed six-column payload the endpoint requires, posts it
//! with the bootstrapped token and cookie, and passes the JSON response
//! through untouched. Failures here are not retried internally.

use url::form_urlencoded;
use url::Url;

use super::headers::HeaderSet;
use super::session::SessionCredential;
use crate::error::{body_preview, Error, Result};
use crate::http::{headers as h, HttpClient};

/// Number of column descriptors the endpoint expects
const COLUMN_COUNT: usize = 6;

/// Column index the fixed sort directive targets
const SORT_COLUMN: usize = 5;

/// Pass-through tender listing page as returned by the portal
///
/// Expected to contain `recordsTotal`, `recordsFiltered` and a `data`
/// array, but none of those keys are assumed or validated.
pub type TenderPage = serde_json::Value;

/// Caller-supplied pagination request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageQuery {
    /// Budget year the listing is filtered by
    pub year: i32,
    /// 1-based page number; also echoed as the DataTables `draw` counter
    pub page_number: u32,
    /// Rows per page
    pub page_size: u32,
}

impl PageQuery {
    /// Create a validated page query
    pub fn new(year: i32, page_number: u32, page_size: u32) -> Result<Self> {
        if page_number < 1 {
            return Err(Error::config("pageNumber must be >= 1"));
        }
        if page_size < 1 {
            return Err(Error::config("pageSize must be >= 1"));
        }
        Ok(Self {
            year,
            page_number,
            page_size,
        })
    }

    /// Zero-based row offset for the DataTables `start` field
    pub fn start(&self) -> u64 {
        u64::from(self.page_number - 1) * u64::from(self.page_size)
    }
}

/// Build the ordered DataTables form payload
///
/// Column 3 (the action column on the listing table) is the only one the
/// endpoint marks non-searchable and non-orderable.
pub fn build_payload(query: &PageQuery, token: &str) -> Vec<(String, String)> {
    let mut pairs = Vec::with_capacity(COLUMN_COUNT * 6 + 8);
    pairs.push(("draw".to_string(), query.page_number.to_string()));

    for col in 0..COLUMN_COUNT {
        let flags = if col == 3 { "false" } else { "true" };
        pairs.push((format!("columns[{}][data]", col), col.to_string()));
        pairs.push((format!("columns[{}][name]", col), String::new()));
        pairs.push((format!("columns[{}][searchable]", col), flags.to_string()));
        pairs.push((format!("columns[{}][orderable]", col), flags.to_string()));
        pairs.push((format!("columns[{}][search][value]", col), String::new()));
        pairs.push((
            format!("columns[{}][search][regex]", col),
            "false".to_string(),
        ));
    }

    pairs.push(("order[0][column]".to_string(), SORT_COLUMN.to_string()));
    pairs.push(("order[0][dir]".to_string(), "desc".to_string()));
    pairs.push(("start".to_string(), query.start().to_string()));
    pairs.push(("length".to_string(), query.page_size.to_string()));
    pairs.push(("search[value]".to_string(), String::new()));
    pairs.push(("search[regex]".to_string(), "false".to_string()));
    pairs.push(("authenticityToken".to_string(), token.to_string()));
    pairs
}

/// URL-encode a payload into a form body
pub fn encode_form(pairs: &[(String, String)]) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (name, value) in pairs {
        serializer.append_pair(name, value);
    }
    serializer.finish()
}

/// POST the pagination payload and parse the listing response
///
/// The session cookie rides verbatim on the Cookie header (omitted when
/// empty), the landing page is the Referer, and the request is marked as
/// an XHR from the portal's own origin.
pub async fn fetch_page(
    client: &HttpClient,
    data_url: &Url,
    landing_url: &Url,
    session: &SessionCredential,
    headers: &HeaderSet,
    query: &PageQuery,
) -> Result<TenderPage> {
    let body = encode_form(&build_payload(query, &session.token));
    let origin = data_url.origin().ascii_serialization();

    let mut request_headers: Vec<(&str, &str)> = headers.as_pairs().to_vec();
    if !session.cookie.is_empty() {
        request_headers.push((h::COOKIE, session.cookie.as_str()));
    }
    request_headers.push((h::REFERER, landing_url.as_str()));
    request_headers.push((h::ORIGIN, origin.as_str()));
    request_headers.push((h::X_REQUESTED_WITH, "XMLHttpRequest"));

    let response = client.post_form(data_url, body, &request_headers).await?;

    if !response.is_success() {
        return Err(Error::HttpStatus {
            url: data_url.to_string(),
            status: response.status_code(),
            body_preview: body_preview(&response.text_lossy()),
        });
    }

    let page: TenderPage =
        serde_json::from_slice(&response.body).map_err(|e| Error::MalformedResponse {
            reason: e.to_string(),
            body_preview: body_preview(&response.text_lossy()),
        })?;

    tracing::debug!(
        records_total = page.get("recordsTotal").and_then(|v| v.as_u64()),
        records_filtered = page.get("recordsFiltered").and_then(|v| v.as_u64()),
        rows = page.get("data").and_then(|v| v.as_array()).map(|a| a.len()),
        "listing page fetched"
    );

    Ok(page)
}
