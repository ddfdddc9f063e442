//! Two-point linear calibration records.
//!
//! One record per measurement kind maps measured millivolts onto the domain
//! scale (pH units or ORP millivolts). A record whose two reference points
//! coincide is "uncalibrated" and the engine passes raw millivolts through
//! unmodified, which is what a freshly constructed engine does until the
//! operator runs a calibration.

use serde::{Deserialize, Serialize};

use crate::config::MeasurementKind;

/// Two reference points below which a record counts as uncalibrated.
const UNCALIBRATED_EPSILON_MV: f32 = 0.001;

/// Two-point calibration data for one measurement kind.
///
/// The engine never persists these; serde derives exist so the application
/// can store and restore records across power cycles.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Calibration {
    /// First calibration point, measured millivolts.
    pub ref1_mv: f32,
    /// Second calibration point, measured millivolts.
    pub ref2_mv: f32,
    /// Known value at the first point (pH 4 / 475 mV by convention).
    pub ref1_value: f32,
    /// Known value at the second point (pH 7 / 650 mV by convention).
    pub ref2_value: f32,
}

impl Calibration {
    /// Factory default for pH: reference values 4 and 7, no measured points.
    pub const PH_DEFAULT: Self = Self {
        ref1_mv: 0.0,
        ref2_mv: 0.0,
        ref1_value: 4.0,
        ref2_value: 7.0,
    };

    /// Factory default for ORP: reference values 475 and 650 mV, no measured
    /// points.
    pub const ORP_DEFAULT: Self = Self {
        ref1_mv: 0.0,
        ref2_mv: 0.0,
        ref1_value: 475.0,
        ref2_value: 650.0,
    };

    /// The uncalibrated factory default for `kind`.
    pub const fn default_for(kind: MeasurementKind) -> Self {
        match kind {
            MeasurementKind::Ph => Self::PH_DEFAULT,
            MeasurementKind::Orp => Self::ORP_DEFAULT,
        }
    }

    /// Whether both reference points have been measured.
    ///
    /// Coincident points would make the linear mapping divide by zero, so
    /// they mark the record as uncalibrated instead.
    pub fn is_calibrated(&self) -> bool {
        (self.ref2_mv - self.ref1_mv).abs() > UNCALIBRATED_EPSILON_MV
    }

    /// Map measured millivolts through the two-point line.
    ///
    /// Exact at both endpoints: `apply(ref1_mv) == ref1_value` and
    /// `apply(ref2_mv) == ref2_value`. Callers must check
    /// [`is_calibrated`](Self::is_calibrated) first.
    pub fn apply(&self, mv: f32) -> f32 {
        self.ref1_value
            + (self.ref2_value - self.ref1_value) * (mv - self.ref1_mv)
                / (self.ref2_mv - self.ref1_mv)
    }
}
