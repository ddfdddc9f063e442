//! ADS1015 register map and configuration bit fields.
//!
//! Single source of truth — the sampler and adapters reference this module
//! rather than hard-coding register values. Values match the ADS1015
//! datasheet (SBAS473) config-register layout.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// I2C addresses (selected by the ADDR pin)
// ---------------------------------------------------------------------------

/// ADDR pin tied to GND.
pub const ADDRESS_GND: u8 = 0x48;
/// ADDR pin tied to VDD.
pub const ADDRESS_VDD: u8 = 0x49;
/// ADDR pin tied to SDA.
pub const ADDRESS_SDA: u8 = 0x4A;
/// ADDR pin tied to SCL.
pub const ADDRESS_SCL: u8 = 0x4B;

// ---------------------------------------------------------------------------
// Pointer register
// ---------------------------------------------------------------------------

/// Conversion result register.
pub const REG_CONVERSION: u8 = 0x00;
/// Configuration register.
pub const REG_CONFIG: u8 = 0x01;

// ---------------------------------------------------------------------------
// Config register bit fields
// ---------------------------------------------------------------------------

/// Start a single conversion (OS bit).
pub const CONFIG_OS_SINGLE: u16 = 0x8000;
/// Single-ended input on AIN0; channels 1-3 add 0x1000 per channel.
pub const CONFIG_MUX_SINGLE_0: u16 = 0x4000;
/// Stride between consecutive single-ended mux selections.
pub const CONFIG_MUX_CHANNEL_STRIDE: u16 = 0x1000;
/// Continuous conversion mode.
pub const CONFIG_MODE_CONTINUOUS: u16 = 0x0000;
/// 1600 samples per second data rate.
pub const CONFIG_DR_1600SPS: u16 = 0x0080;

// ---------------------------------------------------------------------------
// Programmable gain amplifier
// ---------------------------------------------------------------------------

/// Full-scale input range of the programmable gain amplifier.
///
/// Higher gain digitizes a smaller voltage span at finer resolution. The
/// raw-code-to-volts scale factor is `full_scale_volts() / 2048.0` (signed
/// 12-bit codes).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Gain {
    /// ±6.144 V range (gain 2/3). Power-on default.
    #[default]
    TwoThirds,
    /// ±4.096 V range (gain 1).
    One,
    /// ±2.048 V range (gain 2).
    Two,
    /// ±1.024 V range (gain 4).
    Four,
    /// ±0.512 V range (gain 8).
    Eight,
    /// ±0.256 V range (gain 16).
    Sixteen,
}

impl Gain {
    /// All gain settings, widest range first.
    pub const ALL: [Self; 6] = [
        Self::TwoThirds,
        Self::One,
        Self::Two,
        Self::Four,
        Self::Eight,
        Self::Sixteen,
    ];

    /// PGA bits for the config register.
    pub const fn config_bits(self) -> u16 {
        match self {
            Self::TwoThirds => 0x0000,
            Self::One => 0x0200,
            Self::Two => 0x0400,
            Self::Four => 0x0600,
            Self::Eight => 0x0800,
            Self::Sixteen => 0x0A00,
        }
    }

    /// Full-scale voltage span for this gain setting.
    pub const fn full_scale_volts(self) -> f32 {
        match self {
            Self::TwoThirds => 6.144,
            Self::One => 4.096,
            Self::Two => 2.048,
            Self::Four => 1.024,
            Self::Eight => 0.512,
            Self::Sixteen => 0.256,
        }
    }
}
