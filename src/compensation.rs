//! Temperature compensation for pH readings.
//!
//! Glass-electrode slope varies with absolute temperature, pivoting around
//! the temperature-insensitive pH-7 point. Readings are normalized to the
//! 25 °C reference so calibrations taken at different ambient temperatures
//! stay comparable. Applies to pH only — ORP is reported uncompensated.

use serde::{Deserialize, Serialize};

/// Reference temperature readings are normalized to.
pub const REFERENCE_TEMP_C: f32 = 25.0;
/// Lowest ambient temperature the setter accepts.
pub const TEMP_MIN_C: f32 = 0.0;
/// Highest ambient temperature the setter accepts.
pub const TEMP_MAX_C: f32 = 50.0;

const KELVIN_OFFSET: f32 = 273.15;

/// Process-lifetime temperature state held by the engine.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TemperatureSetting {
    /// Last accepted ambient temperature.
    pub celsius: f32,
    /// Whether pH readings are compensated at all.
    pub enabled: bool,
}

impl Default for TemperatureSetting {
    fn default() -> Self {
        Self {
            celsius: REFERENCE_TEMP_C,
            enabled: false,
        }
    }
}

/// Whether `celsius` lies in the accepted [0, 50] °C band (inclusive).
pub fn temperature_in_range(celsius: f32) -> bool {
    (TEMP_MIN_C..=TEMP_MAX_C).contains(&celsius)
}

/// Normalize a pH reading taken at `celsius` to the 25 °C reference.
///
/// `compensated = (raw_ph − 7) · (273.15 + celsius) / (273.15 + 25) + 7`
///
/// The pH-7 point maps unchanged; deviation from it scales by the ratio of
/// absolute temperatures. Identity at exactly 25 °C.
pub fn compensate(raw_ph: f32, celsius: f32) -> f32 {
    (raw_ph - 7.0) * (KELVIN_OFFSET + celsius) / (KELVIN_OFFSET + REFERENCE_TEMP_C) + 7.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_at_reference_temperature() {
        for ph in [0.0, 4.0, 7.0, 7.5, 14.0] {
            assert!((compensate(ph, 25.0) - ph).abs() < 1e-6);
        }
    }

    #[test]
    fn ph_seven_is_the_pivot() {
        for t in [0.0, 10.0, 30.0, 50.0] {
            assert!((compensate(7.0, t) - 7.0).abs() < 1e-6);
        }
    }

    #[test]
    fn scales_deviation_by_absolute_temperature_ratio() {
        // (7.5 - 7) * 303.15 / 298.15 + 7
        let expected = 0.5 * (273.15 + 30.0) / (273.15 + 25.0) + 7.0;
        assert!((compensate(7.5, 30.0) - expected).abs() < 1e-6);
        assert!((compensate(7.5, 30.0) - 7.508_385).abs() < 1e-4);
    }

    #[test]
    fn colder_than_reference_shrinks_deviation() {
        let compensated = compensate(9.0, 10.0);
        assert!(compensated < 9.0);
        assert!(compensated > 7.0);
    }

    #[test]
    fn range_band_is_inclusive() {
        assert!(temperature_in_range(0.0));
        assert!(temperature_in_range(50.0));
        assert!(temperature_in_range(25.0));
        assert!(!temperature_in_range(-0.01));
        assert!(!temperature_in_range(50.01));
        assert!(!temperature_in_range(f32::NAN));
    }

    #[test]
    fn default_setting_is_reference_and_disabled() {
        let s = TemperatureSetting::default();
        assert!((s.celsius - REFERENCE_TEMP_C).abs() < f32::EPSILON);
        assert!(!s.enabled);
    }
}
