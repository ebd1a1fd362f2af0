// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Anti-forgery token extraction
//!
//! An ordered chain of independent matchers run against the landing page
//! body; the first one that captures wins and later patterns are never
//! consulted. Matchers may capture in their first or second group (the
//! quote-style alternations use two).

use lazy_static::lazy_static;
use regex::Regex;

/// A single candidate extraction pattern
pub struct TokenMatcher {
    /// Short identifier used in logs
    pub name: &'static str,
    pattern: Regex,
}

impl TokenMatcher {
    fn new(name: &'static str, pattern: &str) -> Self {
        Self {
            name,
            pattern: Regex::new(pattern).expect("token pattern must compile"),
        }
    }

    /// Run this matcher, returning the first non-empty capture group
    pub fn capture(&self, body: &str) -> Option<String> {
        let caps = self.pattern.captures(body)?;
        caps.iter()
            .skip(1)
            .flatten()
            .next()
            .map(|m| m.as_str().to_string())
    }
}

lazy_static! {
    /// Extraction patterns in fixed priority order
    static ref TOKEN_MATCHERS: Vec<TokenMatcher> = vec![
        // SPSE inline script assignment, the shape the portal actually serves
        TokenMatcher::new(
            "inline-script",
            r"authenticityToken\s*=\s*'([a-f0-9]+)'",
        ),
        // Hidden form field, either quote style
        TokenMatcher::new(
            "hidden-field",
            r#"<input[^>]+name=["']authenticityToken["'][^>]*value=(?:"([^"]+)"|'([^']+)')"#,
        ),
        // Token embedded in a JSON blob
        TokenMatcher::new(
            "json-field",
            r#""authenticityToken"\s*:\s*"([^"]+)""#,
        ),
        // Generically named CSRF input
        TokenMatcher::new(
            "csrf-field",
            r#"name=["'](?:csrf[-_]token|_csrf)["'][^>]*value=(?:"([^"]+)"|'([^']+)')"#,
        ),
        // Rails-style meta tag
        TokenMatcher::new(
            "meta-tag",
            r#"<meta\s+name=["']csrf-token["']\s+content=["']([^"']+)["']"#,
        ),
    ];
}

/// Run the matcher chain against a landing page body
///
/// Returns the winning matcher's name alongside the captured token.
pub fn extract_token(body: &str) -> Option<(&'static str, String)> {
    TOKEN_MATCHERS
        .iter()
        .find_map(|m| m.capture(body).map(|token| (m.name, token)))
}
