//! Best-effort sliding-window limiter for the ask path.
//!
//! Per-process only: counters reset on restart and are not shared across
//! processes. Keys combine session id and client address so one noisy
//! client cannot starve a session's other player.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::{Duration, Instant};

use dashmap::DashMap;
use uuid::Uuid;

/// Injectable time source so tests can drive the window deterministically.
pub trait Clock: Send + Sync {
    /// Monotonic elapsed time since some fixed origin.
    fn now(&self) -> Duration;
}

struct SystemClock {
    origin: Instant,
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

pub struct AskRateLimiter {
    limit: usize,
    window: Duration,
    clock: Arc<dyn Clock>,
    buckets: DashMap<(Uuid, String), VecDeque<Duration>>,
}

impl AskRateLimiter {
    pub fn new(limit: u32, window_seconds: u64) -> AskRateLimiter {
        Self::with_clock(
            limit,
            window_seconds,
            Arc::new(SystemClock {
                origin: Instant::now(),
            }),
        )
    }

    pub fn with_clock(limit: u32, window_seconds: u64, clock: Arc<dyn Clock>) -> AskRateLimiter {
        AskRateLimiter {
            limit: limit as usize,
            window: Duration::from_secs(window_seconds),
            clock,
            buckets: DashMap::new(),
        }
    }

    /// Record one request. Returns `Err(retry_after_seconds)` when the
    /// window is full; the rejected request is not recorded.
    pub fn check(&self, session_id: Uuid, client_ip: Option<&str>) -> Result<(), u64> {
        let key = (session_id, client_ip.unwrap_or("unknown").to_string());
        let now = self.clock.now();
        let window_start = now.saturating_sub(self.window);

        let mut bucket = self.buckets.entry(key).or_default();
        while bucket.front().is_some_and(|&t| t <= window_start) {
            bucket.pop_front();
        }

        if bucket.len() >= self.limit {
            let oldest = *bucket.front().expect("bucket is non-empty at the limit");
            let retry_after = (oldest + self.window).saturating_sub(now);
            return Err(retry_after.as_secs().max(1));
        }

        bucket.push_back(now);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    struct ManualClock(Mutex<Duration>);

    impl ManualClock {
        fn advance(&self, by: Duration) {
            *self.0.lock().unwrap() += by;
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> Duration {
            *self.0.lock().unwrap()
        }
    }

    fn limiter(limit: u32, window: u64) -> (AskRateLimiter, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock(Mutex::new(Duration::from_secs(1000))));
        (
            AskRateLimiter::with_clock(limit, window, clock.clone()),
            clock,
        )
    }

    #[test]
    fn allows_up_to_the_limit_then_rejects() {
        let (limiter, _clock) = limiter(3, 60);
        let session = Uuid::new_v4();
        for _ in 0..3 {
            assert!(limiter.check(session, Some("10.0.0.1")).is_ok());
        }
        let retry_after = limiter.check(session, Some("10.0.0.1")).unwrap_err();
        assert!(retry_after >= 1);
    }

    #[test]
    fn window_slides_with_the_clock() {
        let (limiter, clock) = limiter(2, 60);
        let session = Uuid::new_v4();
        limiter.check(session, Some("ip")).unwrap();
        limiter.check(session, Some("ip")).unwrap();
        assert!(limiter.check(session, Some("ip")).is_err());

        clock.advance(Duration::from_secs(61));
        assert!(limiter.check(session, Some("ip")).is_ok());
    }

    #[test]
    fn retry_after_counts_down_to_the_oldest_entry() {
        let (limiter, clock) = limiter(1, 60);
        let session = Uuid::new_v4();
        limiter.check(session, Some("ip")).unwrap();

        clock.advance(Duration::from_secs(40));
        let retry_after = limiter.check(session, Some("ip")).unwrap_err();
        assert_eq!(retry_after, 20);
    }

    #[test]
    fn buckets_are_keyed_per_session_and_client() {
        let (limiter, _clock) = limiter(1, 60);
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        limiter.check(a, Some("ip")).unwrap();
        limiter.check(b, Some("ip")).unwrap();
        limiter.check(a, Some("other-ip")).unwrap();
        assert!(limiter.check(a, Some("ip")).is_err());
    }

    #[test]
    fn missing_client_ip_shares_one_bucket() {
        let (limiter, _clock) = limiter(1, 60);
        let session = Uuid::new_v4();
        limiter.check(session, None).unwrap();
        assert!(limiter.check(session, None).is_err());
    }
}
