// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Error types for the SPSE fetch pipeline
//!
//! Failures carry structured classification data so retry policy can be
//! driven by a [`FailureClass`] instead of matching on message text.
//! Response bodies never travel in errors beyond a bounded preview.

use thiserror::Error;

/// Result type alias for spse-fetch operations
pub type Result<T> = std::result::Result<T, Error>;

/// Maximum characters of upstream body kept in an error
pub const BODY_PREVIEW_CHARS: usize = 200;

/// Main error type for the fetch pipeline
#[derive(Error, Debug)]
pub enum Error {
    /// Connection or timeout failure before a response arrived
    #[error("transport error for {url}: {reason}")]
    Transport { url: String, reason: String },

    /// The portal answered 403, which signals automated-traffic detection
    #[error("blocked by {url} (HTTP {status})")]
    Blocked { url: String, status: u16 },

    /// The portal answered 429
    #[error("rate limited by {url}")]
    RateLimited { url: String },

    /// Any other non-2xx response
    #[error("HTTP {status} from {url}")]
    HttpStatus {
        url: String,
        status: u16,
        body_preview: String,
    },

    /// No extraction pattern matched the landing page body
    #[error("no anti-forgery token found (status {status}, body {body_len} bytes)")]
    TokenNotFound { status: u16, body_len: usize },

    /// The data endpoint returned a body that is not well-formed JSON
    #[error("malformed data response: {reason}")]
    MalformedResponse {
        reason: String,
        body_preview: String,
    },

    /// Session bootstrap exhausted its retry budget
    #[error("session bootstrap failed after {attempts} attempts: {source}")]
    Bootstrap {
        attempts: u32,
        #[source]
        source: Box<Error>,
    },

    /// URL parsing failed
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

/// Classification of a retryable bootstrap failure
///
/// Drives the next-delay computation in the backoff state machine; a 403
/// gets a longer forced cooldown than a generic transient failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureClass {
    /// Connection error or timeout
    Transport,
    /// 403 from the portal
    Blocked,
    /// 429 from the portal
    RateLimited,
    /// Other non-2xx status
    HttpStatus,
    /// 200 body with no recognizable token
    TokenMissing,
}

impl Error {
    /// Create a transport error
    pub fn transport(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::Transport {
            url: url.into(),
            reason: reason.into(),
        }
    }

    /// Create a config error
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }

    /// Create a generic error
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Convert a reqwest failure into a transport error for `url`
    ///
    /// Timeouts are treated the same as connection failures for retry
    /// accounting; the distinction survives in the reason text only.
    pub fn from_reqwest(url: &str, err: reqwest::Error) -> Self {
        let reason = if err.is_timeout() {
            "request timed out".to_string()
        } else if err.is_connect() {
            format!("connection failed: {}", err)
        } else {
            err.to_string()
        };
        Error::Transport {
            url: url.to_string(),
            reason,
        }
    }

    /// Classification for backoff purposes, if this failure is retryable
    pub fn failure_class(&self) -> Option<FailureClass> {
        match self {
            Error::Transport { .. } => Some(FailureClass::Transport),
            Error::Blocked { .. } => Some(FailureClass::Blocked),
            Error::RateLimited { .. } => Some(FailureClass::RateLimited),
            Error::HttpStatus { .. } => Some(FailureClass::HttpStatus),
            Error::TokenNotFound { .. } => Some(FailureClass::TokenMissing),
            _ => None,
        }
    }

    /// Check if this failure may be retried within the bootstrap budget
    pub fn is_retryable(&self) -> bool {
        self.failure_class().is_some()
    }

    /// Get HTTP status code if available
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Error::Blocked { status, .. } => Some(*status),
            Error::RateLimited { .. } => Some(429),
            Error::HttpStatus { status, .. } => Some(*status),
            Error::TokenNotFound { status, .. } => Some(*status),
            Error::Bootstrap { source, .. } => source.status_code(),
            _ => None,
        }
    }
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::Other(s)
    }
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Error::Other(s.to_string())
    }
}

/// Truncate an upstream body to a bounded, char-safe preview
pub(crate) fn body_preview(body: &str) -> String {
    if body.chars().count() <= BODY_PREVIEW_CHARS {
        body.to_string()
    } else {
        let head: String = body.chars().take(BODY_PREVIEW_CHARS).collect();
        format!("{}…", head)
    }
}
