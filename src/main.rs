// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! spse-fetch CLI
//!
//! Runs the two-phase pipeline for one pagination request and prints the
//! caller-facing JSON envelope.

use std::env;
use std::process::ExitCode;

use anyhow::{bail, Context};

use spse_fetch::api::{self, ListingQuery};
use spse_fetch::{Scraper, ScraperConfig, DEFAULT_BASE_URL};

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("spse_fetch=info".parse().unwrap()),
        )
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage();
        return ExitCode::from(1);
    }

    match args[1].as_str() {
        "fetch" => fetch_listing(&args[2..]).await,
        "--help" | "-h" | "help" => {
            print_usage();
            ExitCode::SUCCESS
        }
        "--version" | "-v" | "version" => {
            println!("spse-fetch {}", env!("CARGO_PKG_VERSION"));
            ExitCode::SUCCESS
        }
        cmd => {
            eprintln!("Unknown command: {}", cmd);
            print_usage();
            ExitCode::from(1)
        }
    }
}

fn print_usage() {
    println!(
        r#"spse-fetch - SPSE Tender Listing Fetcher

USAGE:
    spse-fetch <COMMAND> [OPTIONS]

COMMANDS:
    fetch           Fetch one page of the tender listing
    help            Show this help message
    version         Show version information

FETCH OPTIONS:
    --base <url>    Portal base URL (default: {base})
    --year <n>      Budget year (default: 2025)
    --page <n>      Page number, 1-based (default: 1)
    --size <n>      Rows per page (default: 5)
    --retries <n>   Bootstrap retry budget (default: 3)

EXAMPLES:
    spse-fetch fetch --year 2025 --page 1 --size 5
    spse-fetch fetch --base https://spse.inaproc.id/pu --page 2
"#,
        base = DEFAULT_BASE_URL
    );
}

fn parse_fetch_args(args: &[String]) -> anyhow::Result<(ScraperConfig, ListingQuery)> {
    let mut config = ScraperConfig::new();
    let mut query = ListingQuery::default();

    let mut iter = args.iter();
    while let Some(flag) = iter.next() {
        let value = iter
            .next()
            .with_context(|| format!("missing value for {}", flag))?;
        match flag.as_str() {
            "--base" => config = config.base_url(value),
            "--year" => {
                query.year = value
                    .parse()
                    .with_context(|| format!("invalid year: {}", value))?;
            }
            "--page" => {
                let page: u32 = value
                    .parse()
                    .with_context(|| format!("invalid page: {}", value))?;
                if page < 1 {
                    bail!("page must be >= 1");
                }
                query.page_number = page;
            }
            "--size" => {
                let size: u32 = value
                    .parse()
                    .with_context(|| format!("invalid size: {}", value))?;
                if size < 1 {
                    bail!("size must be >= 1");
                }
                query.page_size = size;
            }
            "--retries" => {
                config = config.max_retries(
                    value
                        .parse()
                        .with_context(|| format!("invalid retry count: {}", value))?,
                );
            }
            other => bail!("unknown option: {}", other),
        }
    }

    Ok((config, query))
}

async fn fetch_listing(args: &[String]) -> ExitCode {
    let (config, query) = match parse_fetch_args(args) {
        Ok(parsed) => parsed,
        Err(e) => {
            eprintln!("{:#}", e);
            return ExitCode::from(1);
        }
    };

    let scraper = match Scraper::new(config) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Failed to create scraper: {}", e);
            return ExitCode::from(1);
        }
    };

    match scraper.fetch_tenders(&query.to_page_query()).await {
        Ok(page) => {
            let response = api::success_response(page, &query);
            println!("{}", response.body);
            ExitCode::SUCCESS
        }
        Err(e) => {
            let response = api::error_response(500, &e);
            eprintln!("{}", response.body);
            ExitCode::from(1)
        }
    }
}
