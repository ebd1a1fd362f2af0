// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! End-to-end pipeline scenarios against a mock portal

use std::time::{Duration, Instant};

use serde_json::json;
use wiremock::matchers::{body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use spse_fetch::api;
use spse_fetch::error::Error;
use spse_fetch::{BackoffPolicy, PageQuery, Scraper, ScraperConfig};

fn test_scraper(base_url: &str, max_retries: u32) -> Scraper {
    Scraper::new(
        ScraperConfig::new()
            .base_url(base_url)
            .max_retries(max_retries)
            .backoff(BackoffPolicy::immediate()),
    )
    .unwrap()
}

const LANDING_BODY: &str = r#"<html><script>
var tahun = 2025;
authenticityToken = 'abc123';
</script></html>"#;

#[tokio::test]
async fn fetches_listing_with_bootstrapped_session() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/lelang"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(LANDING_BODY)
                .insert_header("set-cookie", "sid=xyz"),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/dt/lelang"))
        .and(query_param("tahun", "2025"))
        .and(header("cookie", "sid=xyz"))
        .and(header("x-requested-with", "XMLHttpRequest"))
        .and(body_string_contains("authenticityToken=abc123"))
        .and(body_string_contains("start=5"))
        .and(body_string_contains("length=5"))
        .and(body_string_contains("order%5B0%5D%5Bdir%5D=desc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "draw": 2,
            "recordsTotal": 40,
            "recordsFiltered": 40,
            "data": [["1", "Pembangunan Gedung", "Konstruksi", "", "1.2M", "2025-01-01"]],
        })))
        .expect(1)
        .mount(&server)
        .await;

    let scraper = test_scraper(&server.uri(), 0);
    let page = scraper
        .fetch_tenders(&PageQuery::new(2025, 2, 5).unwrap())
        .await
        .unwrap();

    assert_eq!(page["recordsTotal"], 40);
    assert_eq!(page["data"].as_array().unwrap().len(), 1);

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);
}

#[tokio::test]
async fn bootstrap_extracts_token_and_cookie() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/lelang"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("authenticityToken = 'abc123';")
                .insert_header("set-cookie", "sid=xyz"),
        )
        .mount(&server)
        .await;

    let scraper = test_scraper(&server.uri(), 0);
    let landing = scraper.landing_url().unwrap();
    let headers = spse_fetch::HeaderSet::random();
    let session = scraper.bootstrap_session(&landing, &headers).await.unwrap();

    assert_eq!(session.token, "abc123");
    assert_eq!(session.cookie, "sid=xyz");
}

#[tokio::test]
async fn missing_cookie_yields_empty_cookie() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/lelang"))
        .respond_with(ResponseTemplate::new(200).set_body_string("authenticityToken = 'aa';"))
        .mount(&server)
        .await;

    let scraper = test_scraper(&server.uri(), 0);
    let landing = scraper.landing_url().unwrap();
    let headers = spse_fetch::HeaderSet::random();
    let session = scraper.bootstrap_session(&landing, &headers).await.unwrap();

    assert_eq!(session.token, "aa");
    assert!(session.cookie.is_empty());
}

#[tokio::test]
async fn retry_budget_is_exact() {
    let server = MockServer::start().await;

    // Always fails; with max_retries = 2 exactly 3 GETs must happen
    Mock::given(method("GET"))
        .and(path("/lelang"))
        .respond_with(ResponseTemplate::new(500))
        .expect(3)
        .mount(&server)
        .await;

    let scraper = test_scraper(&server.uri(), 2);
    let err = scraper
        .fetch_tenders(&PageQuery::new(2025, 1, 5).unwrap())
        .await
        .unwrap_err();

    match err {
        Error::Bootstrap { attempts, source } => {
            assert_eq!(attempts, 3);
            assert!(matches!(*source, Error::HttpStatus { status: 500, .. }));
        }
        other => panic!("expected Bootstrap, got {:?}", other),
    }
}

#[tokio::test]
async fn timeout_aborts_request_and_counts_against_budget() {
    let server = MockServer::start().await;

    // Responds far beyond the client ceiling; every attempt must be
    // aborted and accounted as a retryable transport failure
    Mock::given(method("GET"))
        .and(path("/lelang"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(LANDING_BODY)
                .set_delay(Duration::from_secs(5)),
        )
        .expect(2)
        .mount(&server)
        .await;

    let scraper = Scraper::new(
        ScraperConfig::new()
            .base_url(&server.uri())
            .timeout(Duration::from_millis(200))
            .max_retries(1)
            .backoff(BackoffPolicy::immediate()),
    )
    .unwrap();

    let err = scraper
        .fetch_tenders(&PageQuery::new(2025, 1, 5).unwrap())
        .await
        .unwrap_err();

    match err {
        Error::Bootstrap { attempts, source } => {
            assert_eq!(attempts, 2);
            assert!(matches!(*source, Error::Transport { .. }));
        }
        other => panic!("expected Bootstrap, got {:?}", other),
    }
}

#[tokio::test]
async fn blocked_attempts_trigger_extended_cooldown() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/lelang"))
        .respond_with(ResponseTemplate::new(403))
        .up_to_n_times(2)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/lelang"))
        .respond_with(ResponseTemplate::new(200).set_body_string(LANDING_BODY))
        .mount(&server)
        .await;

    // Only the 403 cooldown contributes delay, so total wall time proves
    // the previous failure's class reached the backoff computation
    let cooldown = Duration::from_millis(400);
    let scraper = Scraper::new(
        ScraperConfig::new()
            .base_url(&server.uri())
            .max_retries(3)
            .backoff(BackoffPolicy {
                base: Duration::ZERO,
                blocked_cooldown: cooldown,
                rate_limit_cooldown: Duration::ZERO,
                max_jitter: Duration::ZERO,
            }),
    )
    .unwrap();

    let started = Instant::now();
    let landing = scraper.landing_url().unwrap();
    let headers = spse_fetch::HeaderSet::random();
    let session = scraper.bootstrap_session(&landing, &headers).await.unwrap();
    let elapsed = started.elapsed();

    assert_eq!(session.token, "abc123");
    // Two 403s mean two cooldown waits before attempts 1 and 2
    assert!(
        elapsed >= cooldown * 2,
        "expected at least {:?} of cooldown, pipeline took {:?}",
        cooldown * 2,
        elapsed
    );
}

#[tokio::test]
async fn recovers_after_two_blocked_attempts() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/lelang"))
        .respond_with(ResponseTemplate::new(403))
        .up_to_n_times(2)
        .expect(2)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/lelang"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("authenticityToken = 'abc123';")
                .insert_header("set-cookie", "sid=xyz"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let scraper = test_scraper(&server.uri(), 3);
    let landing = scraper.landing_url().unwrap();
    let headers = spse_fetch::HeaderSet::random();
    let session = scraper.bootstrap_session(&landing, &headers).await.unwrap();

    assert_eq!(session.token, "abc123");
}

#[tokio::test]
async fn token_not_found_is_retried_then_surfaced() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/lelang"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>no token here</html>"))
        .expect(2)
        .mount(&server)
        .await;

    let scraper = test_scraper(&server.uri(), 1);
    let landing = scraper.landing_url().unwrap();
    let headers = spse_fetch::HeaderSet::random();
    let err = scraper
        .bootstrap_session(&landing, &headers)
        .await
        .unwrap_err();

    match err {
        Error::Bootstrap { source, .. } => {
            assert!(matches!(
                *source,
                Error::TokenNotFound { status: 200, .. }
            ));
        }
        other => panic!("expected Bootstrap, got {:?}", other),
    }
}

#[tokio::test]
async fn malformed_data_response_keeps_bounded_preview() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/lelang"))
        .respond_with(ResponseTemplate::new(200).set_body_string("authenticityToken = 'abc123';"))
        .mount(&server)
        .await;

    let junk = format!("<html>{}</html>", "x".repeat(2000));
    Mock::given(method("POST"))
        .and(path("/dt/lelang"))
        .respond_with(ResponseTemplate::new(200).set_body_string(junk))
        .mount(&server)
        .await;

    let scraper = test_scraper(&server.uri(), 0);
    let err = scraper
        .fetch_tenders(&PageQuery::new(2025, 1, 5).unwrap())
        .await
        .unwrap_err();

    match err {
        Error::MalformedResponse { body_preview, .. } => {
            assert!(body_preview.chars().count() <= spse_fetch::error::BODY_PREVIEW_CHARS + 1);
        }
        other => panic!("expected MalformedResponse, got {:?}", other),
    }
}

#[tokio::test]
async fn data_endpoint_error_status_propagates() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/lelang"))
        .respond_with(ResponseTemplate::new(200).set_body_string("authenticityToken = 'abc123';"))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/dt/lelang"))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
        .mount(&server)
        .await;

    let scraper = test_scraper(&server.uri(), 0);
    let err = scraper
        .fetch_tenders(&PageQuery::new(2025, 1, 5).unwrap())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::HttpStatus { status: 502, .. }));
}

#[tokio::test]
async fn options_preflight_short_circuits() {
    // The scraper is never contacted for OPTIONS
    let scraper = test_scraper("http://127.0.0.1:1", 0);
    let resp = api::handle(&scraper, "OPTIONS", "", "").await;

    assert_eq!(resp.status, 200);
    assert!(resp.body.is_empty());
    assert_eq!(resp.header("access-control-allow-origin"), Some("*"));
    assert_eq!(
        resp.header("access-control-allow-methods"),
        Some("GET, POST, OPTIONS")
    );
    assert_eq!(
        resp.header("access-control-allow-headers"),
        Some("Content-Type")
    );
}

#[tokio::test]
async fn handle_wraps_success_and_failure() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/lelang"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("authenticityToken = 'abc123';")
                .insert_header("set-cookie", "sid=xyz"),
        )
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/dt/lelang"))
        .and(query_param("tahun", "2024"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "recordsTotal": 7, "recordsFiltered": 7, "data": [],
        })))
        .mount(&server)
        .await;

    let scraper = test_scraper(&server.uri(), 0);
    let resp = api::handle(&scraper, "GET", "year=2024&page=2&size=10", "").await;
    assert_eq!(resp.status, 200);
    let body: serde_json::Value = serde_json::from_str(&resp.body).unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["recordsTotal"], 7);
    assert_eq!(body["metadata"]["year"], 2024);
    assert_eq!(body["metadata"]["pageNumber"], 2);
    assert_eq!(body["metadata"]["pageSize"], 10);

    // POST with the parameters in a form body instead of the query string
    let resp = api::handle(&scraper, "POST", "", "year=2024&page=2&size=10").await;
    assert_eq!(resp.status, 200);
    let body: serde_json::Value = serde_json::from_str(&resp.body).unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["metadata"]["year"], 2024);
    assert_eq!(body["metadata"]["pageNumber"], 2);

    // Unreachable portal surfaces as a 500 error envelope
    let dead = test_scraper("http://127.0.0.1:1", 0);
    let resp = api::handle(&dead, "POST", "", "").await;
    assert_eq!(resp.status, 500);
    let body: serde_json::Value = serde_json::from_str(&resp.body).unwrap();
    assert_eq!(body["success"], false);
    assert!(body["error"].is_string());
}
