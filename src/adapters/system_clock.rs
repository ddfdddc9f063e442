//! std-based clock adapter for Linux-class hosts.

use std::time::{Duration, Instant};

use crate::ports::Clock;

/// Monotonic millisecond clock backed by [`Instant`], sleeping via
/// [`std::thread::sleep`].
pub struct SystemClock {
    epoch: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            epoch: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        self.epoch.elapsed().as_millis() as u64
    }

    fn delay_ms(&mut self, ms: u32) {
        std::thread::sleep(Duration::from_millis(u64::from(ms)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn now_is_monotonic() {
        let mut clock = SystemClock::new();
        let a = clock.now_ms();
        clock.delay_ms(2);
        let b = clock.now_ms();
        assert!(b >= a + 2);
    }
}
