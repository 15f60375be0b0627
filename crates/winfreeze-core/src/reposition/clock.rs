use std::time::{Duration, Instant};

/// Time source and sleep primitive for the retry loop.
pub trait Clock {
    fn now(&self) -> Instant;

    /// Block the calling thread for `duration`.
    fn sleep(&self, duration: Duration);
}

/// Monotonic wall clock with a blocking thread sleep.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_clock_sleep_advances_now() {
        let clock = SystemClock;
        let before = clock.now();
        clock.sleep(Duration::from_millis(5));
        assert!(clock.now().duration_since(before) >= Duration::from_millis(5));
    }
}
