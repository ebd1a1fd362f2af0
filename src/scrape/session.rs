// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Session bootstrap against the listing landing page
//!
//! One GET per attempt; 200 goes to token extraction, everything else is
//! classified and retried under the backoff policy until the budget runs
//! out, at which point the last error surfaces wrapped in
//! [`Error::Bootstrap`].

use tokio::time::sleep;
use url::Url;

use super::backoff::BackoffPolicy;
use super::headers::HeaderSet;
use super::token::extract_token;
use crate::error::{body_preview, Error, Result};
use crate::http::HttpClient;

/// Token and cookie for one upstream session
///
/// Produced once per pipeline invocation and consumed exactly once by the
/// data fetch; never persisted or reused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionCredential {
    /// Anti-forgery token extracted from the landing page
    pub token: String,
    /// Cookie header value, forwarded verbatim; may be empty
    pub cookie: String,
}

/// Acquire a session credential from the landing page
///
/// Runs up to `max_retries + 1` attempts. Each attempt sleeps a random
/// jitter first; retries additionally wait the classified backoff delay.
pub async fn bootstrap(
    client: &HttpClient,
    landing_url: &Url,
    headers: &HeaderSet,
    max_retries: u32,
    policy: &BackoffPolicy,
) -> Result<SessionCredential> {
    let mut last_err: Option<Error> = None;

    for attempt in 0..=max_retries {
        let backoff = policy.delay_before(
            attempt,
            last_err.as_ref().and_then(|e| e.failure_class()),
        );
        if !backoff.is_zero() {
            tracing::debug!(attempt, delay_ms = backoff.as_millis() as u64, "backing off");
            sleep(backoff).await;
        }

        let jitter = policy.jitter(&mut rand::thread_rng());
        if !jitter.is_zero() {
            sleep(jitter).await;
        }

        match attempt_once(client, landing_url, headers).await {
            Ok(credential) => {
                tracing::info!(
                    attempt,
                    token_prefix = %credential.token.chars().take(10).collect::<String>(),
                    has_cookie = !credential.cookie.is_empty(),
                    "session bootstrapped"
                );
                return Ok(credential);
            }
            Err(err) => {
                tracing::warn!(attempt, error = %err, "bootstrap attempt failed");
                last_err = Some(err);
            }
        }
    }

    Err(Error::Bootstrap {
        attempts: max_retries + 1,
        source: Box::new(
            last_err.unwrap_or_else(|| Error::other("bootstrap loop executed no attempts")),
        ),
    })
}

async fn attempt_once(
    client: &HttpClient,
    landing_url: &Url,
    headers: &HeaderSet,
) -> Result<SessionCredential> {
    let response = client.get(landing_url, headers.as_pairs()).await?;
    let status = response.status_code();

    match status {
        200 => {}
        403 => {
            return Err(Error::Blocked {
                url: landing_url.to_string(),
                status,
            })
        }
        429 => {
            return Err(Error::RateLimited {
                url: landing_url.to_string(),
            })
        }
        _ => {
            return Err(Error::HttpStatus {
                url: landing_url.to_string(),
                status,
                body_preview: body_preview(&response.text_lossy()),
            })
        }
    }

    // Some responses omit set-cookie entirely; an empty cookie is valid
    let cookie = response.set_cookies().join("; ");
    let body = response.text_lossy();

    match extract_token(&body) {
        Some((pattern, token)) => {
            tracing::debug!(pattern, "token pattern matched");
            Ok(SessionCredential { token, cookie })
        }
        None => Err(Error::TokenNotFound {
            status,
            body_len: body.len(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credential_equality() {
        let a = SessionCredential {
            token: "abc123".to_string(),
            cookie: "sid=xyz".to_string(),
        };
        let b = a.clone();
        assert_eq!(a, b);
    }
}
