// Licensed under the Apache-2.0 license

//! # I2C Hardware Abstraction Traits
//!
//! Two small traits split the controller into the part that owns the
//! hardware state and the part that moves bytes.
//!
//! ```text
//! I2cHardwareCore (lifecycle: reset, configure, bind, capabilities)
//!     └── I2cMaster (batched message transfer)
//! ```
//!
//! The facade in [`crate::i2c::i2c_controller`] is generic over `I2cMaster`,
//! so it can drive the real controller or a test double.

use crate::i2c::common::{Capabilities, Message};
use embedded_hal::i2c::SevenBitAddress;

/// Error returned by a batch transfer, with how far the batch got.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BatchError<E> {
    /// Messages fully completed before the failing one.
    pub completed: usize,
    pub error: E,
}

/// Core I2C hardware interface providing lifecycle operations.
pub trait I2cHardwareCore {
    /// Hardware-specific error type that implements embedded-hal error traits
    type Error: embedded_hal::i2c::Error + core::fmt::Debug;

    /// Bring the controller to a known state: reset, then load the static
    /// configuration.
    fn init(&mut self);

    /// Point the controller at a target device.
    fn bind(&mut self, addr: SevenBitAddress);

    /// Transfer modes the hardware supports. Static, no register access.
    fn capabilities(&self) -> Capabilities;
}

/// I2C master operations.
///
/// # Examples
///
/// ```rust,no_run
/// use mt7621_ddk::i2c::{I2cMaster, Message};
///
/// fn read_eeprom<T: I2cMaster>(i2c: &mut T) -> Result<[u8; 4], T::Error> {
///     let offset = [0x00];
///     let mut data = [0u8; 4];
///     let mut msgs = [Message::write(0x50, &offset), Message::read(0x50, &mut data)];
///     i2c.transfer(&mut msgs).map_err(|e| e.error)?;
///     Ok(data)
/// }
/// ```
pub trait I2cMaster: I2cHardwareCore {
    /// Execute `msgs` in order as one batch.
    ///
    /// Returns the number of messages completed, which is `msgs.len()` on
    /// success.
    ///
    /// # Errors
    ///
    /// Stops at the first failing message. The returned [`BatchError`] carries
    /// the error and the count of messages completed before it; the failing
    /// message's buffer may be partially written.
    fn transfer(&mut self, msgs: &mut [Message<'_>]) -> Result<usize, BatchError<Self::Error>>;

    /// Write `bytes` to the device at `addr`.
    ///
    /// # Errors
    ///
    /// See [`I2cMaster::transfer`].
    fn write(&mut self, addr: SevenBitAddress, bytes: &[u8]) -> Result<(), Self::Error> {
        self.transfer(&mut [Message::write(addr, bytes)])
            .map(|_| ())
            .map_err(|e| e.error)
    }

    /// Fill `buffer` from the device at `addr`.
    ///
    /// # Errors
    ///
    /// See [`I2cMaster::transfer`].
    fn read(&mut self, addr: SevenBitAddress, buffer: &mut [u8]) -> Result<(), Self::Error> {
        self.transfer(&mut [Message::read(addr, buffer)])
            .map(|_| ())
            .map_err(|e| e.error)
    }

    /// Write `bytes`, then read into `buffer`, in a single batch.
    ///
    /// # Errors
    ///
    /// See [`I2cMaster::transfer`].
    fn write_read(
        &mut self,
        addr: SevenBitAddress,
        bytes: &[u8],
        buffer: &mut [u8],
    ) -> Result<(), Self::Error> {
        self.transfer(&mut [Message::write(addr, bytes), Message::read(addr, buffer)])
            .map(|_| ())
            .map_err(|e| e.error)
    }
}
