// Licensed under the Apache-2.0 license

//! MT7621 I2C driver module.
//!
//! This module provides the polled I2C master driver for the MT7621 `SoC`
//! SM0 controller, designed for bare-metal and `no_std` environments. It
//! integrates the hardware-specific controller with embedded-hal compatible
//! abstractions.

pub mod common;
pub mod hardware_instantiation;
pub mod i2c_controller;
pub mod mt7621_i2c;
pub mod registers;
pub mod system_setup;
pub mod traits;
mod transfer;

#[cfg(test)]
pub(crate) mod sim;

pub use common::{
    AddressMode, Capabilities, I2cConfig, I2cConfigBuilder, I2cSpeed, Message, Payload, WaitStage,
};
pub use i2c_controller::I2cController;
pub use mt7621_i2c::{Error, Mt7621I2c};
pub use traits::{BatchError, I2cHardwareCore, I2cMaster};
