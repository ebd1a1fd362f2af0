// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! # spse-fetch - SPSE Tender Listing Fetcher
//!
//! Retrieves paginated tender listings from an SPSE procurement portal by
//! emulating its browser-driven session flow: GET the landing page for an
//! anti-forgery token and session cookie, then POST a DataTables-style
//! pagination payload carrying both.
//!
//! ## Features
//!
//! - Two-phase pipeline: session bootstrap, then data fetch
//! - Multi-pattern token extraction with fixed priority order
//! - Classified retry backoff: 403 cooldown, 429 cooldown, linear backoff
//!   with per-attempt jitter
//! - Randomized, internally consistent browser-like headers
//! - Pass-through JSON result, bounded body previews in errors
//!
//! ## Example
//!
//! ```rust,no_run
//! use spse_fetch::{PageQuery, Scraper, ScraperConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let scraper = Scraper::new(ScraperConfig::new()
//!         .base_url("https://spse.inaproc.id/kemkes"))?;
//!
//!     let page = scraper.fetch_tenders(&PageQuery::new(2025, 1, 5)?).await?;
//!     println!("total: {:?}", page.get("recordsTotal"));
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod error;
pub mod http;
pub mod scrape;

// Re-exports for convenience

// Pipeline
pub use scrape::{
    BackoffPolicy, HeaderSet, PageQuery, Scraper, ScraperConfig, SessionCredential, TenderPage,
    DEFAULT_BASE_URL,
};

// Errors
pub use error::{Error, FailureClass, Result};

// HTTP
pub use http::{HttpClient, HttpClientConfig, Response};

// Boundary
pub use api::{ApiResponse, ListingQuery};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
