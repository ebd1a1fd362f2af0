// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Browser-like header fabrication
//!
//! One User-Agent is chosen uniformly at random per pipeline invocation
//! and paired with a fixed companion set so the two phases of a request
//! look like they came from the same simulated client. Every fabricated
//! set carries the same header names; only the UA-correlated values vary.

use rand::seq::SliceRandom;
use rand::Rng;

/// A User-Agent candidate with its correlated client-hint values
struct UaProfile {
    user_agent: &'static str,
    sec_ch_ua: &'static str,
    platform: &'static str,
}

/// Chrome-family desktop profiles spanning Windows, macOS and Linux.
/// Staying within one browser family keeps the client-hint block
/// structurally identical across choices.
static UA_POOL: &[UaProfile] = &[
    UaProfile {
        user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
        sec_ch_ua: "\"Not_A Brand\";v=\"8\", \"Chromium\";v=\"120\", \"Google Chrome\";v=\"120\"",
        platform: "\"Windows\"",
    },
    UaProfile {
        user_agent: "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
        sec_ch_ua: "\"Not_A Brand\";v=\"8\", \"Chromium\";v=\"120\", \"Google Chrome\";v=\"120\"",
        platform: "\"macOS\"",
    },
    UaProfile {
        user_agent: "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
        sec_ch_ua: "\"Not_A Brand\";v=\"8\", \"Chromium\";v=\"120\", \"Google Chrome\";v=\"120\"",
        platform: "\"Linux\"",
    },
    UaProfile {
        user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/119.0.0.0 Safari/537.36",
        sec_ch_ua: "\"Google Chrome\";v=\"119\", \"Chromium\";v=\"119\", \"Not?A_Brand\";v=\"24\"",
        platform: "\"Windows\"",
    },
];

/// Ordered set of request headers shared by both pipeline phases
#[derive(Debug, Clone)]
pub struct HeaderSet {
    pairs: Vec<(&'static str, &'static str)>,
}

impl HeaderSet {
    /// Fabricate a header set from an explicit entropy source
    ///
    /// Pure with respect to `rng`, so header sets are deterministic under
    /// a seeded generator in tests.
    pub fn fabricate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let profile = UA_POOL
            .choose(rng)
            .expect("user-agent pool is never empty");

        Self {
            pairs: vec![
                ("user-agent", profile.user_agent),
                (
                    "accept",
                    "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8",
                ),
                ("accept-language", "en-US,en;q=0.9,id;q=0.8"),
                ("accept-encoding", "gzip, deflate, br"),
                ("dnt", "1"),
                ("connection", "keep-alive"),
                ("upgrade-insecure-requests", "1"),
                ("sec-ch-ua", profile.sec_ch_ua),
                ("sec-ch-ua-mobile", "?0"),
                ("sec-ch-ua-platform", profile.platform),
            ],
        }
    }

    /// Fabricate a header set from the thread-local RNG
    pub fn random() -> Self {
        Self::fabricate(&mut rand::thread_rng())
    }

    /// Header names in wire order
    pub fn names(&self) -> Vec<&'static str> {
        self.pairs.iter().map(|(name, _)| *name).collect()
    }

    /// Look up a header value by name
    pub fn get(&self, name: &str) -> Option<&'static str> {
        self.pairs
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| *v)
    }

    /// The chosen User-Agent
    pub fn user_agent(&self) -> &'static str {
        self.get("user-agent").unwrap_or_default()
    }

    /// Borrow as name/value pairs for the HTTP client
    pub fn as_pairs(&self) -> &[(&'static str, &'static str)] {
        &self.pairs
    }
}
