//! Per-connection cooldown gate for transcript submissions.

use std::collections::HashMap;

/// Minimum gap between accepted submissions from one connection.
pub const COOLDOWN_MS: i64 = 15_000;

/// Tracks the last accepted submission time per connection.
///
/// Keyed by connection id, not speaker id, so a reconnecting client
/// starts with a fresh allowance. Time is a parameter so the gate is
/// testable without a clock.
#[derive(Debug, Clone)]
pub struct RateLimiter {
    last_accepted: HashMap<String, i64>,
    cooldown_ms: i64,
}

impl RateLimiter {
    pub fn new(cooldown_ms: i64) -> Self {
        Self {
            last_accepted: HashMap::new(),
            cooldown_ms,
        }
    }

    /// Gate a submission from `connection_id` at `now_ms`.
    ///
    /// The first submission from a connection is always allowed. Later
    /// ones are allowed once the full cooldown has elapsed since the
    /// last accepted submission. Accepted submissions update the
    /// record; denied ones do not, so the cooldown never extends.
    pub fn allow(&mut self, connection_id: &str, now_ms: i64) -> bool {
        if let Some(&last) = self.last_accepted.get(connection_id) {
            if now_ms - last < self.cooldown_ms {
                return false;
            }
        }
        self.last_accepted.insert(connection_id.to_string(), now_ms);
        true
    }

    /// Drop the record for a disconnected connection.
    pub fn forget(&mut self, connection_id: &str) {
        self.last_accepted.remove(connection_id);
    }

    /// Number of connections currently tracked.
    pub fn tracked_connections(&self) -> usize {
        self.last_accepted.len()
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(COOLDOWN_MS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_submission_allowed() {
        let mut limiter = RateLimiter::default();
        assert!(limiter.allow("conn-1", 1_000_000));
    }

    #[test]
    fn test_submission_within_cooldown_denied() {
        let mut limiter = RateLimiter::default();
        assert!(limiter.allow("conn-1", 1_000_000));
        assert!(!limiter.allow("conn-1", 1_000_000 + 5_000));
        assert!(!limiter.allow("conn-1", 1_000_000 + 14_999));
    }

    #[test]
    fn test_submission_after_cooldown_allowed() {
        let mut limiter = RateLimiter::default();
        assert!(limiter.allow("conn-1", 1_000_000));
        assert!(limiter.allow("conn-1", 1_000_000 + 15_001));
    }

    #[test]
    fn test_cooldown_boundary_is_inclusive() {
        let mut limiter = RateLimiter::default();
        assert!(limiter.allow("conn-1", 1_000_000));
        // Exactly the cooldown has elapsed.
        assert!(limiter.allow("conn-1", 1_000_000 + 15_000));
    }

    #[test]
    fn test_denied_submission_does_not_extend_cooldown() {
        let mut limiter = RateLimiter::default();
        assert!(limiter.allow("conn-1", 1_000_000));
        assert!(!limiter.allow("conn-1", 1_000_000 + 10_000));
        // Measured from the accepted submission, not the denied one.
        assert!(limiter.allow("conn-1", 1_000_000 + 15_000));
    }

    #[test]
    fn test_connections_tracked_independently() {
        let mut limiter = RateLimiter::default();
        assert!(limiter.allow("conn-1", 1_000_000));
        assert!(limiter.allow("conn-2", 1_000_001));
        assert!(!limiter.allow("conn-1", 1_000_002));
        assert_eq!(limiter.tracked_connections(), 2);
    }

    #[test]
    fn test_forget_resets_allowance() {
        let mut limiter = RateLimiter::default();
        assert!(limiter.allow("conn-1", 1_000_000));
        limiter.forget("conn-1");
        assert_eq!(limiter.tracked_connections(), 0);
        assert!(limiter.allow("conn-1", 1_000_001));
    }

    #[test]
    fn test_custom_cooldown() {
        let mut limiter = RateLimiter::new(100);
        assert!(limiter.allow("conn-1", 0));
        assert!(!limiter.allow("conn-1", 99));
        assert!(limiter.allow("conn-1", 100));
    }
}
