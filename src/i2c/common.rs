// Licensed under the Apache-2.0 license

//! Common types and constants for the MT7621 I2C driver modules.
//!
//! This module provides the shared configuration, message and capability
//! definitions used across the controller, transfer engine and facade.

use crate::i2c::registers::SM0_CLK_DIV_MAX;
use embedded_hal::i2c::{SevenBitAddress, TenBitAddress};
use fugit::HertzU32;

/// Divider the controller has always shipped with.
pub const DEFAULT_CLOCK_DIVIDER: u16 = 333;
/// Poll iterations per unit of clock divider.
pub const DEFAULT_POLL_MULTIPLIER: u32 = 30;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[repr(u32)]
pub enum I2cSpeed {
    Standard = 100_000,
    Fast = 400_000,
    FastPlus = 1_000_000,
}

impl I2cSpeed {
    #[must_use]
    pub fn frequency(self) -> HertzU32 {
        HertzU32::from_raw(self as u32)
    }
}

pub struct I2cConfig {
    pub clock_divider: u16,
    pub poll_multiplier: u32,
    pub ack_check: bool,
}

impl Default for I2cConfig {
    fn default() -> Self {
        I2cConfigBuilder::new().build()
    }
}

impl I2cConfig {
    /// Iteration bound shared by every busy/ready/empty wait.
    #[must_use]
    pub fn poll_budget(&self) -> u32 {
        u32::from(self.clock_divider.max(1)).saturating_mul(self.poll_multiplier.max(1))
    }

    /// SCL rate produced by this divider from the given source clock.
    #[must_use]
    pub fn bus_frequency(&self, source: HertzU32) -> HertzU32 {
        source / u32::from(self.clock_divider.max(1))
    }
}

pub struct I2cConfigBuilder {
    clock_divider: u16,
    poll_multiplier: u32,
    ack_check: bool,
}

impl Default for I2cConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl I2cConfigBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            clock_divider: DEFAULT_CLOCK_DIVIDER,
            poll_multiplier: DEFAULT_POLL_MULTIPLIER,
            ack_check: false,
        }
    }
    #[must_use]
    pub fn clock_divider(mut self, divider: u16) -> Self {
        self.clock_divider = divider.clamp(1, SM0_CLK_DIV_MAX);
        self
    }
    /// Pick the smallest divider that keeps SCL at or below `speed`.
    #[must_use]
    pub fn speed(self, source: HertzU32, speed: I2cSpeed) -> Self {
        let target = speed.frequency().raw();
        let divider = source.raw().div_ceil(target);
        self.clock_divider(u16::try_from(divider).unwrap_or(SM0_CLK_DIV_MAX))
    }
    /// Polls per divider unit; at least one, so every wait reads status.
    #[must_use]
    pub fn poll_multiplier(mut self, multiplier: u32) -> Self {
        self.poll_multiplier = multiplier.max(1);
        self
    }
    /// Fail fast on the status ack-error bit instead of waiting out the poll budget.
    #[must_use]
    pub fn ack_check(mut self, enabled: bool) -> Self {
        self.ack_check = enabled;
        self
    }
    #[must_use]
    pub fn build(self) -> I2cConfig {
        I2cConfig {
            clock_divider: self.clock_divider,
            poll_multiplier: self.poll_multiplier,
            ack_check: self.ack_check,
        }
    }
}

/// Busy-poll stage that ran out of budget.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum WaitStage {
    /// Bus never went idle.
    Idle,
    /// A read byte never arrived.
    RxReady,
    /// A written byte never drained.
    TxEmpty,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AddressMode {
    SevenBit,
    TenBit,
}

pub enum Payload<'a> {
    Read(&'a mut [u8]),
    Write(&'a [u8]),
}

/// One logical I2C transaction: one device, one direction, one buffer.
pub struct Message<'a> {
    address: u16,
    mode: AddressMode,
    payload: Payload<'a>,
}

impl<'a> Message<'a> {
    #[must_use]
    pub fn read(address: SevenBitAddress, buffer: &'a mut [u8]) -> Self {
        Self {
            address: u16::from(address),
            mode: AddressMode::SevenBit,
            payload: Payload::Read(buffer),
        }
    }

    #[must_use]
    pub fn write(address: SevenBitAddress, bytes: &'a [u8]) -> Self {
        Self {
            address: u16::from(address),
            mode: AddressMode::SevenBit,
            payload: Payload::Write(bytes),
        }
    }

    #[must_use]
    pub fn read_ten_bit(address: TenBitAddress, buffer: &'a mut [u8]) -> Self {
        Self {
            address,
            mode: AddressMode::TenBit,
            payload: Payload::Read(buffer),
        }
    }

    #[must_use]
    pub fn write_ten_bit(address: TenBitAddress, bytes: &'a [u8]) -> Self {
        Self {
            address,
            mode: AddressMode::TenBit,
            payload: Payload::Write(bytes),
        }
    }

    #[must_use]
    pub fn address(&self) -> u16 {
        self.address
    }

    #[must_use]
    pub fn address_mode(&self) -> AddressMode {
        self.mode
    }

    #[must_use]
    pub fn is_read(&self) -> bool {
        matches!(self.payload, Payload::Read(_))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        match &self.payload {
            Payload::Read(buf) => buf.len(),
            Payload::Write(bytes) => bytes.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn payload_mut(&mut self) -> &mut Payload<'a> {
        &mut self.payload
    }
}

/// Transfer modes an adapter supports, as a bit set.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Capabilities(u32);

impl Capabilities {
    pub const I2C: Self = Self(1 << 0);
    pub const TEN_BIT_ADDR: Self = Self(1 << 1);
    pub const PROTOCOL_MANGLING: Self = Self(1 << 2);
    pub const SMBUS_PEC: Self = Self(1 << 3);
    pub const NOSTART: Self = Self(1 << 4);
    pub const SLAVE: Self = Self(1 << 5);
    pub const SMBUS_QUICK: Self = Self(1 << 16);
    pub const SMBUS_READ_BYTE: Self = Self(1 << 17);
    pub const SMBUS_WRITE_BYTE: Self = Self(1 << 18);
    pub const SMBUS_READ_BYTE_DATA: Self = Self(1 << 19);
    pub const SMBUS_WRITE_BYTE_DATA: Self = Self(1 << 20);
    pub const SMBUS_READ_WORD_DATA: Self = Self(1 << 21);
    pub const SMBUS_WRITE_WORD_DATA: Self = Self(1 << 22);
    pub const SMBUS_PROC_CALL: Self = Self(1 << 23);
    pub const SMBUS_WRITE_BLOCK_DATA: Self = Self(1 << 25);
    pub const SMBUS_READ_I2C_BLOCK: Self = Self(1 << 26);
    pub const SMBUS_WRITE_I2C_BLOCK: Self = Self(1 << 27);

    /// Every SMBus transaction a plain I2C master can emulate.
    pub const SMBUS_EMUL: Self = Self(
        Self::SMBUS_QUICK.0
            | Self::SMBUS_READ_BYTE.0
            | Self::SMBUS_WRITE_BYTE.0
            | Self::SMBUS_READ_BYTE_DATA.0
            | Self::SMBUS_WRITE_BYTE_DATA.0
            | Self::SMBUS_READ_WORD_DATA.0
            | Self::SMBUS_WRITE_WORD_DATA.0
            | Self::SMBUS_PROC_CALL.0
            | Self::SMBUS_WRITE_BLOCK_DATA.0
            | Self::SMBUS_READ_I2C_BLOCK.0
            | Self::SMBUS_WRITE_I2C_BLOCK.0
            | Self::SMBUS_PEC.0,
    );

    #[must_use]
    pub const fn empty() -> Self {
        Self(0)
    }

    #[must_use]
    pub const fn bits(self) -> u32 {
        self.0
    }

    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    #[must_use]
    pub const fn difference(self, other: Self) -> Self {
        Self(self.0 & !other.0)
    }

    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}
