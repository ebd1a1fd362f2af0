// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTTP transport layer for the fetch pipeline
//!
//! Thin wrapper over reqwest with an explicit per-request timeout ceiling.
//! Cookies are never stored by the client; the pipeline forwards them
//! verbatim between the two phases.

mod client;
mod response;

pub use client::{HttpClient, HttpClientConfig};
pub use response::Response;

use std::time::Duration;

/// Hard ceiling for any single outbound request
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Common HTTP headers
pub mod headers {
    pub const ACCEPT: &str = "accept";
    pub const ACCEPT_LANGUAGE: &str = "accept-language";
    pub const ACCEPT_ENCODING: &str = "accept-encoding";
    pub const CONTENT_TYPE: &str = "content-type";
    pub const CONTENT_LENGTH: &str = "content-length";
    pub const COOKIE: &str = "cookie";
    pub const SET_COOKIE: &str = "set-cookie";
    pub const USER_AGENT: &str = "user-agent";
    pub const REFERER: &str = "referer";
    pub const ORIGIN: &str = "origin";
    pub const X_REQUESTED_WITH: &str = "x-requested-with";
}

/// Content type sent on the DataTables POST
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded; charset=UTF-8";
