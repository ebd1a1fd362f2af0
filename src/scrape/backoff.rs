// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Classified retry backoff for session bootstrap
//!
//! The delay before an attempt is a deterministic function of the attempt
//! number and the previous failure's [`FailureClass`], plus a small random
//! jitter that applies to every attempt (including the first) so retries
//! do not form a fixed-interval fingerprint.

use std::time::Duration;

use rand::Rng;

use crate::error::FailureClass;

/// Backoff policy knobs
#[derive(Debug, Clone)]
pub struct BackoffPolicy {
    /// Linear backoff base; attempt `k` waits `base * k`
    pub base: Duration,
    /// Extra forced cooldown after a 403
    pub blocked_cooldown: Duration,
    /// Extra cooldown after a 429
    pub rate_limit_cooldown: Duration,
    /// Upper bound on the per-attempt random jitter
    pub max_jitter: Duration,
}

impl Default for BackoffPolicy {
    fn default() -> Self {
        Self {
            base: Duration::from_secs(1),
            blocked_cooldown: Duration::from_secs(8),
            rate_limit_cooldown: Duration::from_secs(4),
            max_jitter: Duration::from_millis(400),
        }
    }
}

impl BackoffPolicy {
    /// Zero-delay policy for tests
    pub fn immediate() -> Self {
        Self {
            base: Duration::ZERO,
            blocked_cooldown: Duration::ZERO,
            rate_limit_cooldown: Duration::ZERO,
            max_jitter: Duration::ZERO,
        }
    }

    /// Deterministic delay before `attempt` (0-based), given what the
    /// previous attempt died of. Attempt 0 never waits here; jitter is
    /// drawn separately.
    pub fn delay_before(&self, attempt: u32, last_failure: Option<FailureClass>) -> Duration {
        if attempt == 0 {
            return Duration::ZERO;
        }

        let mut delay = self.base * attempt;
        match last_failure {
            Some(FailureClass::Blocked) => delay += self.blocked_cooldown,
            Some(FailureClass::RateLimited) => delay += self.rate_limit_cooldown,
            _ => {}
        }
        delay
    }

    /// Random jitter applied before every attempt
    pub fn jitter<R: Rng + ?Sized>(&self, rng: &mut R) -> Duration {
        let max_ms = self.max_jitter.as_millis() as u64;
        if max_ms == 0 {
            return Duration::ZERO;
        }
        Duration::from_millis(rng.gen_range(0..=max_ms))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_first_attempt_has_no_backoff() {
        let policy = BackoffPolicy::default();
        assert_eq!(
            policy.delay_before(0, Some(FailureClass::Blocked)),
            Duration::ZERO
        );
    }

    #[test]
    fn test_backoff_monotonic_in_attempt() {
        let policy = BackoffPolicy::default();
        let mut previous = Duration::ZERO;
        for attempt in 1..10 {
            let delay = policy.delay_before(attempt, Some(FailureClass::Transport));
            assert!(delay >= previous, "delay shrank at attempt {}", attempt);
            previous = delay;
        }
    }

    #[test]
    fn test_blocked_cooldown_exceeds_generic() {
        let policy = BackoffPolicy::default();
        let generic = policy.delay_before(1, Some(FailureClass::Transport));
        let blocked = policy.delay_before(1, Some(FailureClass::Blocked));
        let limited = policy.delay_before(1, Some(FailureClass::RateLimited));
        assert!(blocked > generic);
        assert!(limited > generic);
        assert!(blocked > limited);
    }

    #[test]
    fn test_jitter_bounded() {
        let policy = BackoffPolicy::default();
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..100 {
            assert!(policy.jitter(&mut rng) <= policy.max_jitter);
        }
    }

    #[test]
    fn test_immediate_policy_never_waits() {
        let policy = BackoffPolicy::immediate();
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(
            policy.delay_before(5, Some(FailureClass::Blocked)),
            Duration::ZERO
        );
        assert_eq!(policy.jitter(&mut rng), Duration::ZERO);
    }
}
