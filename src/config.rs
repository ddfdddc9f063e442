//! Reading request configuration.
//!
//! A [`ReadingConfig`] describes one measurement cycle and is immutable once
//! the cycle starts. Out-of-range fields are clamped at `start_reading`
//! rather than rejected — the engine never refuses a request for sizing
//! reasons.

use serde::{Deserialize, Serialize};

/// What is being measured. Selects the calibration record, compensation
/// eligibility (pH only) and the output range check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MeasurementKind {
    /// pH, 0-14 output range.
    Ph,
    /// Oxidation-reduction potential, 0-1000 mV output range.
    Orp,
}

/// Configuration for one measurement cycle.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ReadingConfig {
    /// Measurement kind.
    pub kind: MeasurementKind,
    /// Samples to collect; clamped to `[1, MAX_SAMPLES]` at start.
    pub samples: usize,
    /// Minimum spacing between samples. Zero samples on every poll.
    pub interval_ms: u32,
    /// Rolling-average ring size; clamped to `[1, MAX_AVG_BUFFER]` at start.
    pub avg_buffer: usize,
}

impl Default for ReadingConfig {
    fn default() -> Self {
        Self {
            kind: MeasurementKind::Ph,
            samples: 10,
            interval_ms: 10,
            avg_buffer: 1,
        }
    }
}
