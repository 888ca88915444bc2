// Licensed under the Apache-2.0 license

//! Polled data phase of a single message.
//!
//! Reads are split into 16-byte blocks, each with its own byte count and read
//! start. Writes go out as one transaction: the start command follows the
//! first data byte, and every byte waits for the transmit register to drain.
//! Every wait is bounded by the controller's poll budget. Empty payloads are
//! refused; the byte counter has no encoding for them.

use crate::common::Logger;
use crate::i2c::common::{Message, Payload, WaitStage};
use crate::i2c::mt7621_i2c::{Error, Mt7621I2c};
use crate::i2c::registers::{
    RegisterIo, CMD_READ, CMD_WRITE, READ_BLOCK, REG_BYTECNT, REG_DATAIN, REG_DATAOUT,
    REG_STARTXFR, REG_STATUS, STATUS_ACKERR, STATUS_BUSY, STATUS_DATARDY, STATUS_SDOEMPTY,
};
use crate::syscon::ResetControl;

impl WaitStage {
    fn describe(self) -> &'static str {
        match self {
            WaitStage::Idle => "idle",
            WaitStage::RxReady => "rx ready",
            WaitStage::TxEmpty => "tx empty",
        }
    }

    /// Whether `status` ends this wait.
    fn satisfied(self, status: u32) -> bool {
        match self {
            WaitStage::Idle => status & STATUS_BUSY == 0,
            WaitStage::RxReady => status & STATUS_DATARDY != 0,
            WaitStage::TxEmpty => status & STATUS_SDOEMPTY != 0,
        }
    }
}

/// Byte-count register value for an `len`-byte transaction (`len >= 1`).
fn byte_count(len: usize) -> u32 {
    u32::try_from(len.saturating_sub(1)).unwrap_or(u32::MAX)
}

impl<R: RegisterIo, RST: ResetControl, L: Logger> Mt7621I2c<R, RST, L> {
    /// Run the data phase of `msg` on the already configured and bound
    /// controller.
    pub(crate) fn transfer_message(&mut self, msg: &mut Message<'_>) -> Result<(), Error> {
        match msg.payload_mut() {
            Payload::Read(buf) => self.read_blocks(buf),
            Payload::Write(bytes) => self.write_bytes(bytes),
        }
    }

    fn read_blocks(&mut self, buf: &mut [u8]) -> Result<(), Error> {
        if buf.is_empty() {
            return Err(Error::EmptyMessage);
        }

        // Last chunk is the remainder; an exact multiple has no remainder block.
        for block in buf.chunks_mut(READ_BLOCK) {
            self.wait_for(WaitStage::Idle)?;
            self.regs.write32(REG_BYTECNT, byte_count(block.len()));
            self.regs.write32(REG_STARTXFR, CMD_READ);

            for byte in block.iter_mut() {
                self.wait_for(WaitStage::RxReady)?;
                *byte = self.regs.read32(REG_DATAIN) as u8;
            }
        }
        Ok(())
    }

    fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), Error> {
        let Some((&first, rest)) = bytes.split_first() else {
            return Err(Error::EmptyMessage);
        };
        self.wait_for(WaitStage::Idle)?;

        self.regs.write32(REG_BYTECNT, byte_count(bytes.len()));
        self.regs.write32(REG_DATAOUT, u32::from(first));
        self.regs.write32(REG_STARTXFR, CMD_WRITE);
        self.wait_for(WaitStage::TxEmpty)?;

        for &byte in rest {
            self.regs.write32(REG_DATAOUT, u32::from(byte));
            self.wait_for(WaitStage::TxEmpty)?;
        }
        Ok(())
    }

    /// Busy-poll the status register until `stage` is satisfied or the poll
    /// budget runs out.
    fn wait_for(&mut self, stage: WaitStage) -> Result<(), Error> {
        for _ in 0..self.poll_budget {
            let status = self.regs.read32(REG_STATUS);
            // Ack error can be raised together with tx empty; it wins.
            if self.config.ack_check && status & STATUS_ACKERR != 0 {
                self.logger
                    .error(format_args!("i2c: no ack while waiting for {}", stage.describe()));
                return Err(Error::Nack);
            }
            if stage.satisfied(status) {
                return Ok(());
            }
        }
        self.logger
            .error(format_args!("i2c: wait for {} timeout", stage.describe()));
        Err(Error::Timeout(stage))
    }
}
