//! Non-blocking pH and ORP measurement engine for the ADS1015 12-bit ADC.
//!
//! Drives an ADS1015 over any embedded-hal 1.0 I²C bus to produce calibrated
//! pH and oxidation-reduction-potential readings, optionally temperature
//! compensated to the 25 °C reference. The core is a cooperative,
//! poll-driven state machine: the caller's scheduling loop stays in control
//! and the engine never blocks beyond the fixed 1 ms conversion settling
//! delay (the operator-attended calibration stabilizer is the one
//! documented exception).
//!
//! - Two-point linear calibration per measurement kind; uncalibrated
//!   records pass raw millivolts through unmodified.
//! - Range validation with advisory clamping errors (pH 0-14,
//!   ORP 0-1000 mV) — never fatal, the engine always returns to idle.
//! - Hardware sits behind the [`ports`] traits, so the entire state machine
//!   runs on a development host with the [`testing`] doubles.
//!
//! ```
//! use phx_ads1015::testing::{MockBus, MockClock};
//! use phx_ads1015::{Gain, MeasurementEngine, MeasurementKind, MeasurementState, ReadingConfig};
//!
//! // Scripted conversions stand in for the hardware; on a real target use
//! // adapters::I2cRegisterBus over your HAL's I2C plus a monotonic clock.
//! let bus = MockBus::from_raw_codes(&[150, 160, 155]);
//! let mut engine = MeasurementEngine::new(bus, MockClock::new());
//! engine.set_gain(Gain::One);
//! engine.begin();
//!
//! engine.start_reading(ReadingConfig {
//!     kind: MeasurementKind::Ph,
//!     samples: 3,
//!     interval_ms: 0,
//!     avg_buffer: 1,
//! });
//! while engine.state() != MeasurementState::Idle {
//!     engine.update_reading(); // call from your own loop
//! }
//!
//! // No calibration set yet, so the raw millivolt mean passes through.
//! assert!((engine.last_reading() - 310.0).abs() < 1e-3);
//! assert_eq!(engine.last_error(), None);
//! ```

#![deny(unused_must_use)]

pub mod adapters;
pub mod adc;
pub mod calibration;
pub mod compensation;
pub mod config;
pub mod engine;
pub mod error;
pub mod ports;
pub mod registers;
pub mod testing;

pub use calibration::Calibration;
pub use config::{MeasurementKind, ReadingConfig};
pub use engine::{
    MAX_AVG_BUFFER, MAX_SAMPLES, MeasurementEngine, MeasurementState, STABILITY_THRESHOLD,
};
pub use error::ReadingError;
pub use registers::Gain;
