//! Minimum-interval send throttle

use std::time::{Duration, Instant};

use parking_lot::Mutex;

/// Allows one send per `min_interval`.
///
/// The last-sent timestamp is read and updated under a single lock, so two
/// racing callers can never both pass inside the same window.
#[derive(Debug)]
pub struct SendThrottle {
    min_interval: Duration,
    last_sent: Mutex<Option<Instant>>,
}

impl SendThrottle {
    pub const fn new(min_interval: Duration) -> Self {
        Self { min_interval, last_sent: Mutex::new(None) }
    }

    /// Claim the next send slot if the window has passed.
    pub fn try_acquire(&self) -> bool {
        self.try_acquire_at(Instant::now())
    }

    pub fn try_acquire_at(&self, now: Instant) -> bool {
        let mut last_sent = self.last_sent.lock();
        let allowed = last_sent
            .map_or(true, |previous| now.saturating_duration_since(previous) >= self.min_interval);
        if allowed {
            *last_sent = Some(now);
        }
        allowed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_send_is_allowed() {
        let throttle = SendThrottle::new(Duration::from_secs(5));
        assert!(throttle.try_acquire());
    }

    #[test]
    fn sends_inside_window_are_suppressed() {
        let throttle = SendThrottle::new(Duration::from_secs(5));
        let start = Instant::now();

        assert!(throttle.try_acquire_at(start));
        assert!(!throttle.try_acquire_at(start + Duration::from_secs(1)));
        assert!(!throttle.try_acquire_at(start + Duration::from_millis(4_999)));
        assert!(throttle.try_acquire_at(start + Duration::from_secs(5)));
        assert!(!throttle.try_acquire_at(start + Duration::from_secs(6)));
    }
}
