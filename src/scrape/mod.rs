// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Core two-phase fetch pipeline
//!
//! Header fabrication, session bootstrap with classified retry backoff,
//! and the DataTables pagination fetch.

mod backoff;
mod fetch;
mod headers;
mod pipeline;
mod session;
mod token;

pub use backoff::BackoffPolicy;
pub use fetch::{build_payload, encode_form, fetch_page, PageQuery, TenderPage};
pub use headers::HeaderSet;
pub use pipeline::{Scraper, ScraperConfig, DEFAULT_BASE_URL};
pub use session::{bootstrap, SessionCredential};
pub use token::{extract_token, TokenMatcher};
