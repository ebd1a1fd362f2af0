// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Thin caller boundary: query parsing, CORS and response envelopes

mod query;
mod service;

pub use query::{ListingQuery, DEFAULT_PAGE_NUMBER, DEFAULT_PAGE_SIZE, DEFAULT_YEAR};
pub use service::{error_response, handle, preflight_response, success_response, ApiResponse};
