//! Port traits — the boundary between the measurement engine and the host.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ MeasurementEngine (domain)
//! ```
//!
//! Driven adapters (the I²C bus, the host clock) implement these traits.
//! The engine consumes them via generics, so the domain core never touches
//! hardware directly and the whole state machine runs unmodified under test
//! with scripted doubles.

// ───────────────────────────────────────────────────────────────
// Register bus port (driven adapter: I2C hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Two-wire register transport at a fixed device address.
///
/// The engine assumes synchronous, always-succeeding semantics: transport
/// failures are not modeled at this layer and collapse to zero reads.
/// Implementations that can observe bus errors should surface them through
/// their own channels (logging, counters) — the engine will treat the zero
/// like any other sample.
pub trait RegisterBus {
    /// Write a 16-bit value to the named register.
    fn write_register(&mut self, reg: u8, value: u16);

    /// Read a 16-bit value from the named register.
    fn read_register(&mut self, reg: u8) -> u16;
}

// ───────────────────────────────────────────────────────────────
// Clock port (driven adapter: host timing → domain)
// ───────────────────────────────────────────────────────────────

/// Monotonic millisecond clock plus a blocking sleep.
///
/// `now_ms` paces the sample interval inside the non-blocking poll loop.
/// `delay_ms` is used only for the fixed conversion settling delay and the
/// stabilizer pause — the two documented blocking points.
pub trait Clock {
    /// Milliseconds since an arbitrary monotonic epoch.
    fn now_ms(&self) -> u64;

    /// Block the calling thread for `ms` milliseconds.
    fn delay_ms(&mut self, ms: u32);
}
