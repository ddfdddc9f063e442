//! Scripted port doubles for host-side testing.
//!
//! The engine is generic over [`RegisterBus`] and [`Clock`], so the whole
//! state machine runs on a development host with conversions injected here —
//! no hardware, no feature flags. Used by the crate's own unit and
//! integration tests; exported so downstream applications can drive their
//! control loops the same way.

use std::collections::VecDeque;

use crate::ports::{Clock, RegisterBus};
use crate::registers::{REG_CONFIG, REG_CONVERSION};

/// Register transport double that records config writes and replays scripted
/// conversion results.
pub struct MockBus {
    /// Every value written to the config register, in order.
    pub config_writes: Vec<u16>,
    queue: VecDeque<u16>,
    fallback: u16,
}

impl MockBus {
    /// Every conversion read returns the same register value.
    pub fn constant(value: u16) -> Self {
        Self {
            config_writes: Vec::new(),
            queue: VecDeque::new(),
            fallback: value,
        }
    }

    /// Conversion reads consume `values` in order, then return the last one.
    pub fn sequence(values: &[u16]) -> Self {
        Self {
            config_writes: Vec::new(),
            queue: values.iter().copied().collect(),
            fallback: values.last().copied().unwrap_or(0),
        }
    }

    /// Script conversions from signed 12-bit codes (left-justified the way
    /// the ADS1015 presents them in the conversion register).
    pub fn from_raw_codes(codes: &[i16]) -> Self {
        let values: Vec<u16> = codes.iter().map(|&c| (c << 4) as u16).collect();
        Self::sequence(&values)
    }

    /// Number of conversions the sampler has performed.
    pub fn conversions_read(&self) -> usize {
        self.config_writes.len()
    }
}

impl RegisterBus for MockBus {
    fn write_register(&mut self, reg: u8, value: u16) {
        if reg == REG_CONFIG {
            self.config_writes.push(value);
        }
    }

    fn read_register(&mut self, reg: u8) -> u16 {
        if reg == REG_CONVERSION {
            self.queue.pop_front().unwrap_or(self.fallback)
        } else {
            0
        }
    }
}

/// Manually advanced monotonic clock. `delay_ms` advances time instead of
/// sleeping, so blocking paths (settling delay, stabilizer pause) run
/// instantly under test.
pub struct MockClock {
    now: u64,
    /// Total milliseconds spent in `delay_ms`.
    pub slept_ms: u64,
}

impl MockClock {
    pub fn new() -> Self {
        Self { now: 0, slept_ms: 0 }
    }

    /// Move time forward without sleeping.
    pub fn advance(&mut self, ms: u64) {
        self.now += ms;
    }
}

impl Default for MockClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MockClock {
    fn now_ms(&self) -> u64 {
        self.now
    }

    fn delay_ms(&mut self, ms: u32) {
        self.now += u64::from(ms);
        self.slept_ms += u64::from(ms);
    }
}
