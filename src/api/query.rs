// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Inbound query parsing for the listing endpoint
//!
//! Accepts the parameter aliases the original callers use and falls back
//! to defaults on anything missing or malformed.

use url::form_urlencoded;

use crate::scrape::PageQuery;

/// Default budget year
pub const DEFAULT_YEAR: i32 = 2025;
/// Default page number
pub const DEFAULT_PAGE_NUMBER: u32 = 1;
/// Default page size
pub const DEFAULT_PAGE_SIZE: u32 = 5;

/// Parsed inbound listing query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListingQuery {
    pub year: i32,
    pub page_number: u32,
    pub page_size: u32,
}

impl Default for ListingQuery {
    fn default() -> Self {
        Self {
            year: DEFAULT_YEAR,
            page_number: DEFAULT_PAGE_NUMBER,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl ListingQuery {
    /// Parse from name/value pairs; unknown names are ignored
    ///
    /// `pageNumber`/`page` and `pageSize`/`size` are aliases, first
    /// recognizable value wins. Values below 1 fall back to defaults.
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let mut query = Self::default();
        let mut page_seen = false;
        let mut size_seen = false;
        let mut year_seen = false;

        for (name, value) in pairs {
            match name {
                "year" if !year_seen => {
                    if let Ok(year) = value.parse::<i32>() {
                        query.year = year;
                        year_seen = true;
                    }
                }
                "pageNumber" | "page" if !page_seen => {
                    if let Ok(page) = value.parse::<u32>() {
                        if page >= 1 {
                            query.page_number = page;
                            page_seen = true;
                        }
                    }
                }
                "pageSize" | "size" if !size_seen => {
                    if let Ok(size) = value.parse::<u32>() {
                        if size >= 1 {
                            query.page_size = size;
                            size_seen = true;
                        }
                    }
                }
                _ => {}
            }
        }

        query
    }

    /// Parse from a raw query string
    pub fn from_query_string(query_string: &str) -> Self {
        Self::from_request(query_string, "")
    }

    /// Parse from a query string and a form-encoded request body
    ///
    /// Query parameters take precedence; body pairs fill in whatever the
    /// query string left unset.
    pub fn from_request(query_string: &str, body: &str) -> Self {
        let mut pairs: Vec<(String, String)> = form_urlencoded::parse(query_string.as_bytes())
            .into_owned()
            .collect();
        pairs.extend(form_urlencoded::parse(body.as_bytes()).into_owned());
        Self::from_pairs(pairs.iter().map(|(n, v)| (n.as_str(), v.as_str())))
    }

    /// Convert to the pipeline's pagination request
    pub fn to_page_query(self) -> PageQuery {
        // Values are already clamped to >= 1 during parsing
        PageQuery {
            year: self.year,
            page_number: self.page_number,
            page_size: self.page_size,
        }
    }
}
