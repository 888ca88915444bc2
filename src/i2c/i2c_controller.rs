// Licensed under the Apache-2.0 license

//! High-level I2C adapter for MT7621 `SoCs`.
//!
//! This module is the boundary the rest of the system calls: batched message
//! execution, a static capability query, and the embedded-hal `I2c` trait.
//! It owns exactly one controller and is used from one caller at a time.

use crate::common::{Logger, NoOpLogger};
use crate::i2c::common::{Capabilities, Message};
use crate::i2c::traits::{BatchError, I2cMaster};
use embedded_hal::i2c::{Operation, SevenBitAddress};
use heapless::{String, Vec};

/// Longest adapter name kept; longer names are truncated.
pub const ADAPTER_NAME_LEN: usize = 48;

/// Operations grouped into one batch by `I2c::transaction`.
pub const MAX_BATCH: usize = 16;

pub struct I2cController<H: I2cMaster, L: Logger = NoOpLogger> {
    pub hardware: H,
    pub logger: L,
    name: String<ADAPTER_NAME_LEN>,
    bus_number: u8,
}

impl<H: I2cMaster, L: Logger> I2cController<H, L> {
    pub fn new(hardware: H, bus_number: u8, name: &str, logger: L) -> Self {
        let mut truncated = String::new();
        for c in name.chars() {
            if truncated.push(c).is_err() {
                break;
            }
        }
        Self {
            hardware,
            logger,
            name: truncated,
            bus_number,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn bus_number(&self) -> u8 {
        self.bus_number
    }

    /// Run `msgs` in order after one controller reset, configure and bind.
    ///
    /// An empty batch touches no hardware and returns `Ok(0)`.
    ///
    /// # Errors
    ///
    /// Returns the first failure together with the number of messages that
    /// completed before it.
    pub fn execute_batch(
        &mut self,
        msgs: &mut [Message<'_>],
    ) -> Result<usize, BatchError<H::Error>> {
        if msgs.is_empty() {
            return Ok(0);
        }
        self.hardware.transfer(msgs).inspect_err(|e| {
            self.logger.error(format_args!(
                "{}: completed {} of {} messages: {:?}",
                self.name,
                e.completed,
                msgs.len(),
                e.error
            ));
        })
    }

    /// Supported transfer modes. Static; no hardware access.
    #[must_use]
    pub fn query_capabilities(&self) -> Capabilities {
        self.hardware.capabilities()
    }

    /// Tear down the adapter, handing back the controller.
    pub fn release(self) -> H {
        self.hardware
    }
}

impl<H: I2cMaster, L: Logger> embedded_hal::i2c::ErrorType for I2cController<H, L> {
    type Error = H::Error;
}

impl<H: I2cMaster, L: Logger> embedded_hal::i2c::I2c for I2cController<H, L> {
    fn read(&mut self, addr: SevenBitAddress, buffer: &mut [u8]) -> Result<(), Self::Error> {
        self.execute_batch(&mut [Message::read(addr, buffer)])
            .map(|_| ())
            .map_err(|e| e.error)
    }

    fn write(&mut self, addr: SevenBitAddress, bytes: &[u8]) -> Result<(), Self::Error> {
        self.execute_batch(&mut [Message::write(addr, bytes)])
            .map(|_| ())
            .map_err(|e| e.error)
    }

    fn write_read(
        &mut self,
        addr: SevenBitAddress,
        bytes: &[u8],
        buffer: &mut [u8],
    ) -> Result<(), Self::Error> {
        self.execute_batch(&mut [Message::write(addr, bytes), Message::read(addr, buffer)])
            .map(|_| ())
            .map_err(|e| e.error)
    }

    fn transaction(
        &mut self,
        addr: SevenBitAddress,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        // The controller has no repeated start; long transactions are split
        // into consecutive batches.
        for chunk in operations.chunks_mut(MAX_BATCH) {
            let mut batch: Vec<Message<'_>, MAX_BATCH> = Vec::new();
            for op in chunk.iter_mut() {
                let msg = match op {
                    Operation::Read(buf) => Message::read(addr, buf),
                    Operation::Write(bytes) => Message::write(addr, bytes),
                };
                // chunks_mut never yields more than MAX_BATCH operations
                let _ = batch.push(msg);
            }
            self.execute_batch(&mut batch).map_err(|e| e.error)?;
        }
        Ok(())
    }
}
