// Licensed under the Apache-2.0 license

//! MT7621 SM0 I2C master controller.
//!
//! The controller is reset and reprogrammed at the start of every batch, then
//! bound to the target device. Data movement lives in
//! [`crate::i2c::transfer`].

use crate::common::{Logger, NoOpLogger};
use crate::i2c::common::{AddressMode, Capabilities, I2cConfig, Message, WaitStage};
use crate::i2c::registers::{
    sm0ctl0, RegisterIo, CFG_DEFAULT, REG_ADDR, REG_CONFIG, REG_DEVADDR, REG_SM0CTL0,
    REG_SM0_IS_AUTOMODE,
};
use crate::i2c::system_setup::I2cSystemSetup;
use crate::i2c::traits::{BatchError, I2cHardwareCore, I2cMaster};
use crate::syscon::ResetControl;
use embedded_hal::i2c::{ErrorKind, NoAcknowledgeSource, SevenBitAddress};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// A busy-poll ran out of budget.
    Timeout(WaitStage),
    /// The target did not acknowledge. Only reported with `ack_check` enabled.
    Nack,
    /// 10-bit addressing was requested.
    UnsupportedAddressMode,
    /// 7-bit address outside `0..=0x7F`.
    InvalidAddress(u8),
    /// Zero-length read or write. The byte counter cannot express it, and
    /// without data no start is issued, so the target would never be
    /// addressed.
    EmptyMessage,
    /// The register window could not be mapped.
    AllocationFailure,
    /// The device node is not an MT7621 I2C controller.
    NoMatch,
}

impl embedded_hal::i2c::Error for Error {
    fn kind(&self) -> ErrorKind {
        match self {
            Error::Nack => ErrorKind::NoAcknowledge(NoAcknowledgeSource::Unknown),
            _ => ErrorKind::Other,
        }
    }
}

/// Transfer modes of the SM0 controller: plain I2C and SMBus emulation,
/// without quick command (the byte counter cannot express a zero-length write).
pub const CAPABILITIES: Capabilities =
    Capabilities::I2C.union(Capabilities::SMBUS_EMUL.difference(Capabilities::SMBUS_QUICK));

pub struct Mt7621I2c<R: RegisterIo, RST: ResetControl, L: Logger = NoOpLogger> {
    pub(crate) regs: R,
    reset_line: RST,
    pub(crate) config: I2cConfig,
    pub(crate) logger: L,
    pub(crate) poll_budget: u32,
}

impl<R: RegisterIo, RST: ResetControl, L: Logger> Mt7621I2c<R, RST, L> {
    pub fn new(regs: R, reset_line: RST, config: I2cConfig, logger: L) -> Self {
        let poll_budget = config.poll_budget();
        Self {
            regs,
            reset_line,
            config,
            logger,
            poll_budget,
        }
    }

    /// Tear down, handing back the register window and reset line.
    pub fn release(self) -> (R, RST) {
        (self.regs, self.reset_line)
    }

    #[must_use]
    pub fn config(&self) -> &I2cConfig {
        &self.config
    }

    #[must_use]
    pub fn poll_budget(&self) -> u32 {
        self.poll_budget
    }

    pub fn reset(&mut self) {
        I2cSystemSetup::reset_i2c_peripheral(&mut self.reset_line);
    }

    pub fn configure(&mut self) {
        self.regs.write32(REG_CONFIG, CFG_DEFAULT);
        self.regs
            .write32(REG_SM0CTL0, sm0ctl0(self.config.clock_divider));
        self.regs.write32(REG_SM0_IS_AUTOMODE, 1);
    }

    fn validate(msg: &Message<'_>) -> Result<SevenBitAddress, Error> {
        if msg.address_mode() == AddressMode::TenBit {
            return Err(Error::UnsupportedAddressMode);
        }
        let addr = u8::try_from(msg.address()).unwrap_or(u8::MAX);
        if addr > 0x7F {
            return Err(Error::InvalidAddress(addr));
        }
        if msg.is_empty() {
            return Err(Error::EmptyMessage);
        }
        Ok(addr)
    }
}

impl<R: RegisterIo, RST: ResetControl, L: Logger> I2cHardwareCore for Mt7621I2c<R, RST, L> {
    type Error = Error;

    fn init(&mut self) {
        self.reset();
        self.configure();
    }

    fn bind(&mut self, addr: SevenBitAddress) {
        self.regs.write32(REG_DEVADDR, u32::from(addr));
        // Address phase is disabled in CFG_DEFAULT; keep the sub-address clear.
        self.regs.write32(REG_ADDR, 0);
    }

    fn capabilities(&self) -> Capabilities {
        CAPABILITIES
    }
}

impl<R: RegisterIo, RST: ResetControl, L: Logger> I2cMaster for Mt7621I2c<R, RST, L> {
    fn transfer(&mut self, msgs: &mut [Message<'_>]) -> Result<usize, BatchError<Error>> {
        let total = msgs.len();
        let mut bound: Option<SevenBitAddress> = None;

        for (completed, msg) in msgs.iter_mut().enumerate() {
            let addr = Self::validate(msg).map_err(|error| {
                self.logger
                    .error(format_args!("i2c: message {completed} rejected: {error:?}"));
                BatchError { completed, error }
            })?;

            match bound {
                None => {
                    self.logger.debug(format_args!(
                        "i2c: batch of {total} message(s), device 0x{addr:02x}"
                    ));
                    self.init();
                    self.bind(addr);
                }
                Some(prev) if prev != addr => self.bind(addr),
                Some(_) => {}
            }
            bound = Some(addr);

            self.transfer_message(msg)
                .map_err(|error| BatchError { completed, error })?;
        }

        Ok(total)
    }
}
