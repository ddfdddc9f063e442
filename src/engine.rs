//! Measurement state machine.
//!
//! Classic embedded poll-driven design: the caller's scheduling loop invokes
//! [`MeasurementEngine::update_reading`] repeatedly and the engine performs
//! bounded, non-blocking work per call.
//!
//! ```text
//!            start_reading()            buffer full
//!   ┌──────┐ ─────────────▶ ┌────────────┐ ─────────▶ ┌────────────┐
//!   │ Idle │                │ Collecting │            │ Processing │
//!   └──────┘ ◀───────────── └────────────┘            └────────────┘
//!        ▲     cancel()            │  cancel()               │
//!        └──────────────────────────┴─── one-shot poll ──────┘
//! ```
//!
//! Collecting self-loops until `samples` voltages are buffered, pacing on
//! the monotonic clock; Processing always finishes within a single poll:
//! finite-filtered mean, millivolt scaling, two-point calibration, optional
//! pH temperature compensation, range clamp, then back to Idle with the
//! result in the single-writer last-reading slot.
//!
//! The sole intentionally blocking entry point is
//! [`stabilized_calibration`](MeasurementEngine::stabilized_calibration),
//! which is an operator-attended setup step.

use heapless::Vec;
use log::{debug, info, warn};

use crate::adc::Ads1015;
use crate::calibration::Calibration;
use crate::compensation::{self, TemperatureSetting};
use crate::config::{MeasurementKind, ReadingConfig};
use crate::error::ReadingError;
use crate::ports::{Clock, RegisterBus};
use crate::registers::Gain;

/// Fixed capacity of the sample buffer; requests above it are clamped.
pub const MAX_SAMPLES: usize = 256;
/// Largest rolling-average ring the engine will size.
pub const MAX_AVG_BUFFER: usize = 10;
/// Two stabilizer readings must each lie within this band of their average.
pub const STABILITY_THRESHOLD: f32 = 0.5;

const STABILIZER_SAMPLES: usize = 100;
const STABILIZER_INTERVAL_MS: u32 = 10;
const STABILIZER_PAUSE_MS: u32 = 500;
const STABILIZER_POLL_MS: u32 = 1;

/// Where the engine is in its measurement cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeasurementState {
    /// Ready for a new measurement.
    Idle,
    /// Collecting samples at the configured cadence.
    Collecting,
    /// Converting the collected buffer into a result (single poll).
    Processing,
}

/// Poll-driven pH/ORP measurement engine.
///
/// One logical measurement in flight at a time; the Idle-state guard in
/// [`start_reading`](Self::start_reading) is the unit of exclusion — no
/// synchronization primitives are involved. The last-reading/last-error slot
/// has a single writer (the Processing phase plus the temperature setter)
/// and may be read at any time, returning the previous cycle's result while
/// a new cycle is in flight.
pub struct MeasurementEngine<B, C> {
    adc: Ads1015<B>,
    clock: C,

    state: MeasurementState,
    config: ReadingConfig,
    target_samples: usize,
    samples: Vec<f32, MAX_SAMPLES>,
    last_sample_ms: u64,

    ring: [f32; MAX_AVG_BUFFER],
    ring_len: usize,
    ring_head: usize,
    ring_count: usize,

    reading_complete: bool,
    last_reading: f32,
    last_error: Option<ReadingError>,

    ph_cal: Calibration,
    orp_cal: Calibration,
    temperature: TemperatureSetting,
}

impl<B: RegisterBus, C: Clock> MeasurementEngine<B, C> {
    /// Construct an engine over a register transport and a host clock.
    ///
    /// Both calibration records start at their uncalibrated factory defaults,
    /// so readings pass through as raw millivolts until
    /// [`set_calibration`](Self::set_calibration) is called.
    pub fn new(bus: B, clock: C) -> Self {
        Self {
            adc: Ads1015::new(bus),
            clock,
            state: MeasurementState::Idle,
            config: ReadingConfig::default(),
            target_samples: 0,
            samples: Vec::new(),
            last_sample_ms: 0,
            ring: [0.0; MAX_AVG_BUFFER],
            ring_len: 1,
            ring_head: 0,
            ring_count: 0,
            reading_complete: false,
            last_reading: 0.0,
            last_error: None,
            ph_cal: Calibration::PH_DEFAULT,
            orp_cal: Calibration::ORP_DEFAULT,
            temperature: TemperatureSetting::default(),
        }
    }

    /// Log readiness. Bus initialisation is the transport owner's job; the
    /// engine itself needs no setup traffic.
    pub fn begin(&self) {
        info!(
            "measurement engine ready (gain {:?}, ±{:.3} V)",
            self.adc.gain(),
            self.adc.gain().full_scale_volts()
        );
    }

    /// Select the ADC full-scale voltage range for subsequent samples.
    pub fn set_gain(&mut self, gain: Gain) {
        self.adc.set_gain(gain);
    }

    /// The currently selected gain setting.
    pub fn gain(&self) -> Gain {
        self.adc.gain()
    }

    // -----------------------------------------------------------------------
    // Measurement cycle
    // -----------------------------------------------------------------------

    /// Begin a new measurement cycle.
    ///
    /// Only honoured from Idle; a request while a cycle is in flight is
    /// silently ignored — no queueing, no error. On accept the sample buffer
    /// and completion/error slots are reset and the rolling ring is sized to
    /// `avg_buffer` (re-sizing discards its contents; a matching size
    /// retains them so consecutive cycles keep averaging).
    pub fn start_reading(&mut self, config: ReadingConfig) {
        if self.state != MeasurementState::Idle {
            debug!("start_reading ignored: measurement in progress");
            return;
        }

        let target = config.samples.clamp(1, MAX_SAMPLES);
        if target != config.samples {
            warn!("sample count {} clamped to {}", config.samples, target);
        }

        let ring_len = config.avg_buffer.clamp(1, MAX_AVG_BUFFER);
        if ring_len != self.ring_len {
            self.ring_len = ring_len;
            self.ring_head = 0;
            self.ring_count = 0;
        }

        self.config = config;
        self.target_samples = target;
        self.samples.clear();
        self.reading_complete = false;
        self.last_error = None;
        self.state = MeasurementState::Collecting;
        debug!(
            "collecting {} {:?} samples at {} ms spacing",
            target, config.kind, config.interval_ms
        );
    }

    /// Advance the state machine by one poll.
    ///
    /// Collecting acquires at most one sample per call (none if the interval
    /// has not elapsed); Processing runs to completion and lands back in
    /// Idle. Idle polls are no-ops. Never blocks beyond the fixed 1 ms
    /// conversion settling delay.
    pub fn update_reading(&mut self) {
        match self.state {
            MeasurementState::Idle => {}
            MeasurementState::Collecting => {
                let elapsed = self.clock.now_ms().saturating_sub(self.last_sample_ms);
                if elapsed >= u64::from(self.config.interval_ms) {
                    let raw = self.adc.read_single_ended(0, &mut self.clock);
                    let volts = f32::from(raw) * self.adc.gain().full_scale_volts() / 2048.0;
                    // Capacity is MAX_SAMPLES and target_samples is clamped
                    // to it, so the push cannot overflow.
                    let _ = self.samples.push(volts);
                    self.last_sample_ms = self.clock.now_ms();

                    if self.samples.len() >= self.target_samples {
                        self.state = MeasurementState::Processing;
                    }
                }
            }
            MeasurementState::Processing => self.process(),
        }
    }

    /// Abort the current cycle, if any.
    ///
    /// Releases the sample buffer, clears the completion flag and error slot
    /// and forces Idle. Cancelling a non-active measurement is not an error.
    pub fn cancel(&mut self) {
        self.samples.clear();
        self.state = MeasurementState::Idle;
        self.reading_complete = false;
        self.last_error = None;
        debug!("measurement cancelled");
    }

    // -----------------------------------------------------------------------
    // Calibration
    // -----------------------------------------------------------------------

    /// Replace the calibration record for `kind`.
    pub fn set_calibration(&mut self, kind: MeasurementKind, cal: Calibration) {
        info!(
            "{:?} calibration set: {:.3} mV -> {:.3}, {:.3} mV -> {:.3}",
            kind, cal.ref1_mv, cal.ref1_value, cal.ref2_mv, cal.ref2_value
        );
        match kind {
            MeasurementKind::Ph => self.ph_cal = cal,
            MeasurementKind::Orp => self.orp_cal = cal,
        }
    }

    /// The calibration record currently applied to `kind`.
    pub fn calibration(&self, kind: MeasurementKind) -> Calibration {
        match kind {
            MeasurementKind::Ph => self.ph_cal,
            MeasurementKind::Orp => self.orp_cal,
        }
    }

    /// Take a stable reference reading for calibration, in millivolts.
    ///
    /// Runs pairs of full 100-sample measurement cycles, 500 ms apart, until
    /// both readings of a pair lie within [`STABILITY_THRESHOLD`] of their
    /// average, then returns that average. **Blocks the caller** — this is
    /// the one intentionally blocking entry point, meant for the
    /// operator-attended calibration procedure, never for a time-critical
    /// loop. Repeats indefinitely while the probe output drifts.
    pub fn stabilized_calibration(&mut self, kind: MeasurementKind) -> f32 {
        let config = ReadingConfig {
            kind,
            samples: STABILIZER_SAMPLES,
            interval_ms: STABILIZER_INTERVAL_MS,
            avg_buffer: 1,
        };

        info!("stabilized {:?} calibration reading started", kind);
        loop {
            let first = self.run_to_completion(config);
            self.clock.delay_ms(STABILIZER_PAUSE_MS);
            let second = self.run_to_completion(config);

            let average = (first + second) / 2.0;
            if (average - first).abs() < STABILITY_THRESHOLD
                && (average - second).abs() < STABILITY_THRESHOLD
            {
                info!("stabilized {:?} reading: {:.3} mV", kind, average);
                return average;
            }
            debug!(
                "readings not stable ({:.3} / {:.3}), repeating",
                first, second
            );
        }
    }

    // -----------------------------------------------------------------------
    // Temperature compensation
    // -----------------------------------------------------------------------

    /// Enable or disable temperature compensation for pH readings.
    pub fn set_temperature_compensation(&mut self, enabled: bool) {
        self.temperature.enabled = enabled;
    }

    /// Whether pH readings are temperature-compensated.
    pub fn temperature_compensation_enabled(&self) -> bool {
        self.temperature.enabled
    }

    /// Store the ambient temperature used for compensation.
    ///
    /// Values outside [0, 50] °C are rejected: the stored temperature is
    /// left unchanged, the shared error slot is set to
    /// [`ReadingError::TemperatureInvalid`] and `false` is returned. A valid
    /// value clears that error (and only that error) from the slot.
    pub fn set_temperature(&mut self, celsius: f32) -> bool {
        if !compensation::temperature_in_range(celsius) {
            warn!(
                "temperature {:.1} C outside 0-50 C band, keeping {:.1} C",
                celsius, self.temperature.celsius
            );
            self.last_error = Some(ReadingError::TemperatureInvalid);
            return false;
        }

        self.temperature.celsius = celsius;
        if self.last_error == Some(ReadingError::TemperatureInvalid) {
            self.last_error = None;
        }
        true
    }

    /// The stored ambient temperature.
    pub fn temperature(&self) -> f32 {
        self.temperature.celsius
    }

    // -----------------------------------------------------------------------
    // Result slot
    // -----------------------------------------------------------------------

    /// Current state of the measurement cycle.
    pub fn state(&self) -> MeasurementState {
        self.state
    }

    /// Whether the most recently started measurement has produced a result.
    pub fn is_complete(&self) -> bool {
        self.reading_complete
    }

    /// Result of the last completed cycle (pH units, ORP millivolts, or raw
    /// millivolts when uncalibrated). Readable at any time; mid-cycle it is
    /// the previous cycle's value.
    pub fn last_reading(&self) -> f32 {
        self.last_reading
    }

    /// Advisory error for the last completed operation, or `None`.
    pub fn last_error(&self) -> Option<ReadingError> {
        self.last_error
    }

    /// Mean of the results retained in the rolling ring, or `None` before
    /// the first completed cycle.
    pub fn rolling_average(&self) -> Option<f32> {
        if self.ring_count == 0 {
            return None;
        }
        let sum: f32 = self.ring[..self.ring_count].iter().sum();
        Some(sum / self.ring_count as f32)
    }

    // -----------------------------------------------------------------------
    // Internal
    // -----------------------------------------------------------------------

    /// Drive a measurement to completion synchronously (stabilizer path).
    /// Paces polls with the host sleep so the bus is not hammered while the
    /// sample interval elapses.
    fn run_to_completion(&mut self, config: ReadingConfig) -> f32 {
        self.start_reading(config);
        while self.state != MeasurementState::Idle {
            self.update_reading();
            self.clock.delay_ms(STABILIZER_POLL_MS);
        }
        self.last_reading
    }

    /// One-shot Processing phase: always lands back in Idle.
    fn process(&mut self) {
        let mut sum = 0.0f32;
        let mut valid = 0usize;
        for &v in &self.samples {
            if v.is_finite() {
                sum += v;
                valid += 1;
            }
        }

        if valid == 0 {
            // Masks a dead transport as a benign zero reading. Kept for
            // compatibility with existing calibration tooling.
            warn!("no valid samples in buffer, reporting 0 with no error");
            self.last_reading = 0.0;
            self.finish_cycle();
            return;
        }

        let mv = sum / valid as f32 * 1000.0;
        let cal = self.calibration(self.config.kind);

        let value = if cal.is_calibrated() {
            let mut mapped = cal.apply(mv);
            if self.config.kind == MeasurementKind::Ph
                && self.temperature.enabled
                && compensation::temperature_in_range(self.temperature.celsius)
            {
                mapped = compensation::compensate(mapped, self.temperature.celsius);
            }
            self.validate_range(mapped)
        } else {
            // Uncalibrated record: raw millivolt mean passes through with no
            // range validation.
            self.last_error = None;
            mv
        };

        self.last_reading = value;
        self.push_rolling(value);
        info!("{:?} reading complete: {:.3}", self.config.kind, value);
        self.finish_cycle();
    }

    fn validate_range(&mut self, value: f32) -> f32 {
        let (low, high, low_err, high_err) = match self.config.kind {
            MeasurementKind::Ph => (0.0, 14.0, ReadingError::PhLow, ReadingError::PhHigh),
            MeasurementKind::Orp => (0.0, 1000.0, ReadingError::OrpLow, ReadingError::OrpHigh),
        };

        if value < low {
            warn!(
                "{:?} reading {:.3} below range, clamped to {:.0}",
                self.config.kind, value, low
            );
            self.last_error = Some(low_err);
            low
        } else if value > high {
            warn!(
                "{:?} reading {:.3} above range, clamped to {:.0}",
                self.config.kind, value, high
            );
            self.last_error = Some(high_err);
            high
        } else {
            self.last_error = None;
            value
        }
    }

    fn finish_cycle(&mut self) {
        self.samples.clear();
        self.reading_complete = true;
        self.state = MeasurementState::Idle;
    }

    fn push_rolling(&mut self, value: f32) {
        self.ring[self.ring_head] = value;
        self.ring_head = (self.ring_head + 1) % self.ring_len;
        if self.ring_count < self.ring_len {
            self.ring_count += 1;
        }
    }

    /// Test hook: load the sample buffer directly and force Processing.
    #[cfg(test)]
    fn inject_processing(&mut self, kind: MeasurementKind, samples: &[f32]) {
        self.config.kind = kind;
        self.samples.clear();
        for &s in samples {
            let _ = self.samples.push(s);
        }
        self.state = MeasurementState::Processing;
    }
}
