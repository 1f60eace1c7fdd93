//! Request pacing for the collector
//!
//! A single [`RateGate`] is owned by the collector and consulted before every
//! outbound request, retries included. It replaces hidden module-level "time
//! of last request" state with an explicit object.

use std::time::Duration;
use tokio::time::Instant;

/// Enforces a minimum interval between the starts of consecutive requests
#[derive(Debug)]
pub struct RateGate {
    min_interval: Duration,
    last_request: Option<Instant>,
}

impl RateGate {
    /// Creates a gate with the given minimum interval
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_request: None,
        }
    }

    /// Calculates the time until the next request may start
    ///
    /// Returns None if a request can start now, or the duration to wait
    /// otherwise.
    pub fn time_until_ready(&self, now: Instant) -> Option<Duration> {
        if let Some(last) = self.last_request {
            let elapsed = now.duration_since(last);
            if elapsed < self.min_interval {
                return Some(self.min_interval - elapsed);
            }
        }
        None
    }

    /// Waits out the remaining interval, then stamps the request start
    pub async fn wait_turn(&mut self) {
        if let Some(wait) = self.time_until_ready(Instant::now()) {
            tracing::debug!("Pacing: waiting {:?} before next request", wait);
            tokio::time::sleep(wait).await;
        }
        self.last_request = Some(Instant::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ready_immediately_with_no_history() {
        let gate = RateGate::new(Duration::from_millis(1000));
        assert!(gate.time_until_ready(Instant::now()).is_none());
    }

    #[test]
    fn test_not_ready_right_after_request() {
        let mut gate = RateGate::new(Duration::from_millis(1000));
        let now = Instant::now();
        gate.last_request = Some(now);

        let wait = gate.time_until_ready(now);
        assert_eq!(wait, Some(Duration::from_millis(1000)));

        // 400ms later there is still 600ms to go
        let soon = now + Duration::from_millis(400);
        assert_eq!(gate.time_until_ready(soon), Some(Duration::from_millis(600)));
    }

    #[test]
    fn test_ready_after_interval_elapsed() {
        let mut gate = RateGate::new(Duration::from_millis(1000));
        let now = Instant::now();
        gate.last_request = Some(now);

        let later = now + Duration::from_millis(1100);
        assert!(gate.time_until_ready(later).is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_turn_spaces_request_starts() {
        let interval = Duration::from_millis(500);
        let mut gate = RateGate::new(interval);

        gate.wait_turn().await;
        let first = Instant::now();

        gate.wait_turn().await;
        let second = Instant::now();

        assert!(second.duration_since(first) >= interval);
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_turn_does_not_wait_when_interval_passed() {
        let mut gate = RateGate::new(Duration::from_millis(100));

        gate.wait_turn().await;
        tokio::time::sleep(Duration::from_millis(200)).await;

        let before = Instant::now();
        gate.wait_turn().await;
        assert_eq!(Instant::now(), before);
    }
}
