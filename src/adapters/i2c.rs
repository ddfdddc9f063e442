//! embedded-hal I²C adapter for the [`RegisterBus`] port.

use embedded_hal::i2c::I2c;
use log::warn;

use crate::ports::RegisterBus;

/// Register transport over an embedded-hal 1.0 I²C bus.
///
/// Register writes send `[reg, hi, lo]`; register reads write the pointer
/// byte then read two bytes, big-endian. The engine's transport contract is
/// always-succeeding, so bus errors are logged and collapse to a dropped
/// write or a zero read — indistinguishable from a legitimate zero
/// conversion, exactly as the sampler layer documents.
pub struct I2cRegisterBus<I> {
    i2c: I,
    address: u8,
}

impl<I: I2c> I2cRegisterBus<I> {
    /// Wrap an I²C bus targeting the device at `address` (7-bit).
    pub fn new(i2c: I, address: u8) -> Self {
        Self { i2c, address }
    }

    /// The device address this adapter talks to.
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Release the underlying bus.
    pub fn release(self) -> I {
        self.i2c
    }
}

impl<I: I2c> RegisterBus for I2cRegisterBus<I> {
    fn write_register(&mut self, reg: u8, value: u16) {
        let bytes = [reg, (value >> 8) as u8, (value & 0xFF) as u8];
        if let Err(e) = self.i2c.write(self.address, &bytes) {
            warn!("i2c write to reg 0x{:02x} failed: {:?}", reg, e);
        }
    }

    fn read_register(&mut self, reg: u8) -> u16 {
        let mut buf = [0u8; 2];
        if let Err(e) = self.i2c.write_read(self.address, &[reg], &mut buf) {
            warn!("i2c read of reg 0x{:02x} failed: {:?}", reg, e);
            return 0;
        }
        u16::from_be_bytes(buf)
    }
}
