//! Sliding-window rate limiter keyed by client identity.
//!
//! Each client owns a queue of the instants at which it was admitted. A
//! request is admitted while fewer than `limit` of those instants fall inside
//! the trailing window. State lives in a sharded concurrent map, so the
//! prune, check and append for one client happen under that client's shard
//! lock and concurrent requests cannot both slip past the limit.

use dashmap::DashMap;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Key used when a request carries no client identity.
pub const ANONYMOUS_CLIENT: &str = "anonymous";

/// A thread-safe sliding-window rate limiter.
///
/// Cloning is cheap and clones share state, like `Arc`.
#[derive(Clone)]
pub struct RateLimiter {
    entries: Arc<DashMap<String, VecDeque<Instant>>>,
    limit: usize,
    window: Duration,
    /// Run a full sweep every this many admissions (0 disables it)
    cleanup_every: u64,
    admitted_total: Arc<AtomicU64>,
}

impl RateLimiter {
    /// Create a limiter admitting `limit` requests per client per `window`.
    pub fn new(limit: usize, window: Duration) -> Self {
        Self {
            entries: Arc::new(DashMap::new()),
            limit,
            window,
            cleanup_every: 0,
            admitted_total: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Sweep expired clients after every `n` admitted requests.
    pub fn with_cleanup_every(mut self, n: u64) -> Self {
        self.cleanup_every = n;
        self
    }

    /// Try to admit a request from `identifier`.
    ///
    /// Returns `false` without recording anything when the client already
    /// has `limit` requests inside the window.
    pub fn admit(&self, identifier: Option<&str>) -> bool {
        self.admit_at(identifier, Instant::now())
    }

    /// [`admit`](Self::admit) with an explicit clock reading.
    pub fn admit_at(&self, identifier: Option<&str>, now: Instant) -> bool {
        let admitted = {
            let mut timestamps = self.entries.entry(key(identifier)).or_default();
            prune(&mut timestamps, now, self.window);

            if timestamps.len() >= self.limit {
                false
            } else {
                timestamps.push_back(now);
                true
            }
        };

        if admitted && self.cleanup_every > 0 {
            let count = self.admitted_total.fetch_add(1, Ordering::Relaxed) + 1;
            if count % self.cleanup_every == 0 {
                self.cleanup_at(now);
            }
        }

        if !admitted {
            tracing::debug!(
                client = %key(identifier),
                limit = self.limit,
                "Rate limit reached"
            );
        }

        admitted
    }

    /// Requests `identifier` may still make in the current window.
    pub fn remaining(&self, identifier: Option<&str>) -> usize {
        self.remaining_at(identifier, Instant::now())
    }

    /// [`remaining`](Self::remaining) with an explicit clock reading.
    pub fn remaining_at(&self, identifier: Option<&str>, now: Instant) -> usize {
        let used = self
            .entries
            .get(key(identifier).as_str())
            .map(|timestamps| {
                timestamps
                    .iter()
                    .filter(|t| now.saturating_duration_since(**t) < self.window)
                    .count()
            })
            .unwrap_or(0);

        self.limit.saturating_sub(used)
    }

    /// Forget everything about one client.
    pub fn reset(&self, identifier: Option<&str>) {
        self.entries.remove(key(identifier).as_str());
    }

    /// Prune every client and drop those with nothing left in the window.
    pub fn cleanup(&self) {
        self.cleanup_at(Instant::now());
    }

    /// [`cleanup`](Self::cleanup) with an explicit clock reading.
    pub fn cleanup_at(&self, now: Instant) {
        let before = self.entries.len();
        self.entries.retain(|_, timestamps| {
            prune(timestamps, now, self.window);
            !timestamps.is_empty()
        });

        let removed = before.saturating_sub(self.entries.len());
        if removed > 0 {
            tracing::debug!(removed, remaining = self.entries.len(), "Rate limiter sweep");
        }
    }

    /// Number of clients currently tracked (including ones not yet swept).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn window(&self) -> Duration {
        self.window
    }
}

impl std::fmt::Debug for RateLimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateLimiter")
            .field("limit", &self.limit)
            .field("window", &self.window)
            .field("clients", &self.len())
            .finish()
    }
}

fn key(identifier: Option<&str>) -> String {
    identifier.unwrap_or(ANONYMOUS_CLIENT).to_string()
}

/// Drop timestamps that are a full window or more in the past.
fn prune(timestamps: &mut VecDeque<Instant>, now: Instant, window: Duration) {
    while let Some(oldest) = timestamps.front() {
        if now.saturating_duration_since(*oldest) >= window {
            timestamps.pop_front();
        } else {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    const WINDOW: Duration = Duration::from_secs(60);

    #[test]
    fn test_admits_up_to_limit() {
        let limiter = RateLimiter::new(3, WINDOW);
        let t0 = Instant::now();

        assert!(limiter.admit_at(Some("a"), t0));
        assert!(limiter.admit_at(Some("a"), t0 + Duration::from_secs(1)));
        assert!(limiter.admit_at(Some("a"), t0 + Duration::from_secs(2)));
        assert!(!limiter.admit_at(Some("a"), t0 + Duration::from_secs(3)));
        assert!(!limiter.admit_at(Some("a"), t0 + Duration::from_secs(59)));
    }

    #[test]
    fn test_readmits_when_oldest_leaves_window() {
        let limiter = RateLimiter::new(2, WINDOW);
        let t0 = Instant::now();

        assert!(limiter.admit_at(Some("a"), t0));
        assert!(limiter.admit_at(Some("a"), t0 + Duration::from_secs(10)));
        assert!(!limiter.admit_at(Some("a"), t0 + Duration::from_secs(59)));

        // Oldest (t0) is exactly one window old
        assert!(limiter.admit_at(Some("a"), t0 + WINDOW));
        // The t0+10s entry is still inside
        assert!(!limiter.admit_at(Some("a"), t0 + Duration::from_secs(65)));
        assert!(limiter.admit_at(Some("a"), t0 + Duration::from_secs(70)));
    }

    #[test]
    fn test_rejection_is_not_recorded() {
        let limiter = RateLimiter::new(1, WINDOW);
        let t0 = Instant::now();

        assert!(limiter.admit_at(Some("a"), t0));
        for s in 1..50 {
            assert!(!limiter.admit_at(Some("a"), t0 + Duration::from_secs(s)));
        }
        // Only the first admission counts against the window
        assert!(limiter.admit_at(Some("a"), t0 + WINDOW));
    }

    #[test]
    fn test_clients_are_independent() {
        let limiter = RateLimiter::new(1, WINDOW);
        let t0 = Instant::now();

        assert!(limiter.admit_at(Some("a"), t0));
        assert!(limiter.admit_at(Some("b"), t0));
        assert!(!limiter.admit_at(Some("a"), t0));
    }

    #[test]
    fn test_missing_identifier_is_one_client() {
        let limiter = RateLimiter::new(1, WINDOW);
        let t0 = Instant::now();

        assert!(limiter.admit_at(None, t0));
        assert!(!limiter.admit_at(None, t0));
        assert!(!limiter.admit_at(Some(ANONYMOUS_CLIENT), t0));
        assert!(limiter.admit_at(Some("named"), t0));
    }

    #[test]
    fn test_remaining() {
        let limiter = RateLimiter::new(3, WINDOW);
        let t0 = Instant::now();

        assert_eq!(limiter.remaining_at(Some("a"), t0), 3);
        limiter.admit_at(Some("a"), t0);
        limiter.admit_at(Some("a"), t0);
        assert_eq!(limiter.remaining_at(Some("a"), t0), 1);
        limiter.admit_at(Some("a"), t0);
        limiter.admit_at(Some("a"), t0);
        assert_eq!(limiter.remaining_at(Some("a"), t0), 0);
        assert_eq!(limiter.remaining_at(Some("a"), t0 + WINDOW), 3);
        // remaining never creates entries
        assert_eq!(limiter.remaining_at(Some("ghost"), t0), 3);
        assert_eq!(limiter.len(), 1);
    }

    #[test]
    fn test_reset() {
        let limiter = RateLimiter::new(1, WINDOW);
        let t0 = Instant::now();

        assert!(limiter.admit_at(Some("a"), t0));
        assert!(!limiter.admit_at(Some("a"), t0));
        limiter.reset(Some("a"));
        assert!(limiter.admit_at(Some("a"), t0));
    }

    #[test]
    fn test_cleanup_removes_expired_clients() {
        let limiter = RateLimiter::new(5, WINDOW);
        let t0 = Instant::now();

        limiter.admit_at(Some("old"), t0);
        limiter.admit_at(Some("fresh"), t0 + Duration::from_secs(30));
        assert_eq!(limiter.len(), 2);

        limiter.cleanup_at(t0 + Duration::from_secs(61));
        assert_eq!(limiter.len(), 1);
        assert_eq!(limiter.remaining_at(Some("fresh"), t0 + Duration::from_secs(61)), 4);

        limiter.cleanup_at(t0 + Duration::from_secs(200));
        assert!(limiter.is_empty());
    }

    #[test]
    fn test_opportunistic_cleanup() {
        let limiter = RateLimiter::new(5, WINDOW).with_cleanup_every(2);
        let t0 = Instant::now();

        limiter.admit_at(Some("a"), t0);
        limiter.admit_at(Some("b"), t0 + Duration::from_secs(100));
        // Second admission triggered a sweep that dropped "a"
        assert_eq!(limiter.len(), 1);
    }

    #[test]
    fn test_clone_shares_state() {
        let limiter = RateLimiter::new(1, WINDOW);
        let clone = limiter.clone();
        let t0 = Instant::now();

        assert!(limiter.admit_at(Some("a"), t0));
        assert!(!clone.admit_at(Some("a"), t0));
    }

    #[test]
    fn test_concurrent_admissions_respect_limit() {
        let limiter = RateLimiter::new(10, WINDOW);

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let limiter = limiter.clone();
                thread::spawn(move || (0..50).filter(|_| limiter.admit(Some("shared"))).count())
            })
            .collect();

        let admitted: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();
        assert_eq!(admitted, 10);
    }

    #[test]
    fn test_debug_format() {
        let limiter = RateLimiter::new(5, WINDOW);
        let debug_str = format!("{:?}", limiter);
        assert!(debug_str.contains("RateLimiter"));
        assert!(debug_str.contains("limit"));
    }
}
