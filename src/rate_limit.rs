use std::time::{Duration, Instant};

use dashmap::DashMap;

const WINDOW: Duration = Duration::from_secs(15 * 60);
const MAX_FAILURES: u32 = 5;

/// Per-username login brute force limiter.
pub struct LoginRateLimiter {
    /// username -> (failed_count, window_start)
    entries: DashMap<String, (u32, Instant)>,
}

impl Default for LoginRateLimiter {
    fn default() -> Self {
        Self::new()
    }
}

impl LoginRateLimiter {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    /// Check if login attempt is allowed. 5 failures per 15 minutes.
    /// Does NOT increment the counter — call `record_failure()` on invalid credentials.
    pub fn check(&self, username: &str) -> Result<(), u64> {
        let now = Instant::now();

        let Some(entry) = self.entries.get(&username.to_lowercase()) else {
            return Ok(());
        };

        let (count, start) = entry.value();

        if now.duration_since(*start) > WINDOW {
            return Ok(());
        }

        if *count >= MAX_FAILURES {
            let elapsed = now.duration_since(*start).as_secs();
            return Err(WINDOW.as_secs().saturating_sub(elapsed));
        }

        Ok(())
    }

    /// Record a failed login attempt for the given username.
    pub fn record_failure(&self, username: &str) {
        let now = Instant::now();

        let mut entry = self.entries.entry(username.to_lowercase()).or_insert((0, now));
        let (count, start) = entry.value_mut();

        if now.duration_since(*start) > WINDOW {
            *count = 1;
            *start = now;
        } else {
            *count += 1;
        }
    }

    /// Forget failures after a successful login.
    pub fn reset(&self, username: &str) {
        self.entries.remove(&username.to_lowercase());
    }

    pub fn cleanup(&self, max_age: Duration) {
        let now = Instant::now();
        self.entries.retain(|_, (_, start)| now.duration_since(*start) < max_age);
    }
}
