//! Driven adapters implementing the [`ports`](crate::ports) traits.
//!
//! [`I2cRegisterBus`] binds the register transport to any embedded-hal 1.0
//! I²C implementation; [`SystemClock`] provides host timing on std targets.

mod i2c;
mod system_clock;

pub use i2c::I2cRegisterBus;
pub use system_clock::SystemClock;
