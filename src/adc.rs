//! ADS1015 channel sampler.
//!
//! Configures the programmable gain amplifier and triggers one single-ended
//! conversion per call. This layer has no error path: an out-of-range
//! channel and a transport failure both read as zero, and surfacing real bus
//! errors is the transport adapter's job.

use log::trace;

use crate::ports::{Clock, RegisterBus};
use crate::registers::{
    CONFIG_DR_1600SPS, CONFIG_MODE_CONTINUOUS, CONFIG_MUX_CHANNEL_STRIDE, CONFIG_MUX_SINGLE_0,
    CONFIG_OS_SINGLE, Gain, REG_CONFIG, REG_CONVERSION,
};

/// Conversion settling delay after a config write, in milliseconds.
///
/// A deliberate approximation: at 1600 SPS a conversion completes in well
/// under 1 ms, and the sampler does not poll the OS bit for
/// conversion-complete signaling. Callers needing tighter timing accuracy
/// should not rely on this layer.
pub const SETTLING_DELAY_MS: u32 = 1;

/// Low-level sampler over the register transport.
pub struct Ads1015<B> {
    bus: B,
    gain: Gain,
}

impl<B: RegisterBus> Ads1015<B> {
    /// Wrap a register transport. Gain starts at the power-on default
    /// (±6.144 V).
    pub fn new(bus: B) -> Self {
        Self {
            bus,
            gain: Gain::default(),
        }
    }

    /// Select the full-scale voltage range for subsequent conversions.
    pub fn set_gain(&mut self, gain: Gain) {
        self.gain = gain;
    }

    /// The currently selected gain setting.
    pub fn gain(&self) -> Gain {
        self.gain
    }

    /// Trigger one single-ended conversion on `channel` (0-3) and return the
    /// signed 12-bit result.
    ///
    /// Channels outside 0-3 return 0 without touching the bus. No retries:
    /// a transport failure is indistinguishable from a legitimate zero
    /// reading here.
    pub fn read_single_ended(&mut self, channel: u8, clock: &mut impl Clock) -> i16 {
        if channel > 3 {
            return 0;
        }

        let config = self.gain.config_bits()
            | CONFIG_MODE_CONTINUOUS
            | CONFIG_DR_1600SPS
            | (CONFIG_MUX_SINGLE_0 + u16::from(channel) * CONFIG_MUX_CHANNEL_STRIDE)
            | CONFIG_OS_SINGLE;

        self.bus.write_register(REG_CONFIG, config);
        clock.delay_ms(SETTLING_DELAY_MS);

        // Result is left-justified in the 16-bit register; arithmetic shift
        // keeps the sign of the 12-bit code.
        let raw = (self.bus.read_register(REG_CONVERSION) as i16) >> 4;
        trace!("adc ch{}: raw={}", channel, raw);
        raw
    }

    /// Test hook: inspect the underlying transport double.
    #[cfg(test)]
    pub(crate) fn bus_ref(&self) -> &B {
        &self.bus
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MockBus, MockClock};

    #[test]
    fn out_of_range_channel_reads_zero_without_bus_traffic() {
        let mut adc = Ads1015::new(MockBus::constant(0x7FF0));
        let mut clock = MockClock::new();
        assert_eq!(adc.read_single_ended(4, &mut clock), 0);
        assert!(adc.bus.config_writes.is_empty());
    }

    #[test]
    fn config_word_selects_channel_and_gain() {
        let mut adc = Ads1015::new(MockBus::constant(0));
        adc.set_gain(Gain::One);
        let mut clock = MockClock::new();
        adc.read_single_ended(2, &mut clock);

        let config = adc.bus.config_writes[0];
        assert_eq!(config & 0x8000, CONFIG_OS_SINGLE, "start flag set");
        assert_eq!(config & 0x7000, 0x6000, "mux selects single-ended AIN2");
        assert_eq!(config & 0x0E00, Gain::One.config_bits());
        assert_eq!(config & 0x00E0, CONFIG_DR_1600SPS);
    }

    #[test]
    fn conversion_is_right_shifted_to_twelve_bits() {
        // 100 << 4 in the conversion register.
        let mut adc = Ads1015::new(MockBus::constant(100 << 4));
        let mut clock = MockClock::new();
        assert_eq!(adc.read_single_ended(0, &mut clock), 100);
    }

    #[test]
    fn negative_codes_keep_their_sign() {
        let raw: i16 = -100;
        let mut adc = Ads1015::new(MockBus::constant((raw << 4) as u16));
        let mut clock = MockClock::new();
        assert_eq!(adc.read_single_ended(0, &mut clock), -100);
    }

    #[test]
    fn settling_delay_advances_the_clock() {
        let mut adc = Ads1015::new(MockBus::constant(0));
        let mut clock = MockClock::new();
        adc.read_single_ended(0, &mut clock);
        assert_eq!(clock.now_ms(), u64::from(SETTLING_DELAY_MS));
    }
}
