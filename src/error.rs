//! Advisory error taxonomy for measurements.
//!
//! All variants are clamping or validation advisories, never fatal: the
//! engine always produces a usable value and returns to idle. The engine
//! keeps a single latest-wins error slot (`Option<ReadingError>`); `None`
//! means the last completed operation stayed in range.

use core::fmt;

/// Why the last reading was clamped, or why a temperature was rejected.
///
/// All variants are `Copy` so they pass through the poll loop without
/// allocation. Bus-level failures are deliberately absent — the transport
/// boundary does not model them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadingError {
    /// Calibrated pH mapped below 0; value clamped to 0.
    PhLow,
    /// Calibrated pH mapped above 14; value clamped to 14.
    PhHigh,
    /// Calibrated ORP mapped below 0 mV; value clamped to 0.
    OrpLow,
    /// Calibrated ORP mapped above 1000 mV; value clamped to 1000.
    OrpHigh,
    /// `set_temperature` was called with a value outside [0, 50] °C; the
    /// stored temperature was left unchanged.
    TemperatureInvalid,
}

impl fmt::Display for ReadingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PhLow => write!(f, "pH below 0, clamped"),
            Self::PhHigh => write!(f, "pH above 14, clamped"),
            Self::OrpLow => write!(f, "ORP below 0 mV, clamped"),
            Self::OrpHigh => write!(f, "ORP above 1000 mV, clamped"),
            Self::TemperatureInvalid => write!(f, "temperature outside 0-50 C, rejected"),
        }
    }
}
