// Licensed under the Apache-2.0 license

//! I2C System Setup Helper
//!
//! Probe-time and teardown-time system control for the I2C block: clock gate
//! and reset line, kept apart from the per-batch controller lifecycle.

use crate::common::Logger;
use crate::syscon::{ClockControl, ResetControl};

/// Helper for I2C system control operations
pub struct I2cSystemSetup;

impl I2cSystemSetup {
    /// Bring the I2C block out of reset with its clock running.
    ///
    /// Order: clock on, reset asserted, reset released.
    pub fn initialize_i2c_system<C, R, L>(clock: &mut C, reset_line: &mut R, logger: &mut L)
    where
        C: ClockControl,
        R: ResetControl,
        L: Logger,
    {
        clock.enable();
        reset_line.pulse();
        logger.debug(format_args!("i2c: clock enabled, reset released"));
    }

    /// Reset the I2C block only, leaving its clock untouched.
    pub fn reset_i2c_peripheral<R: ResetControl>(reset_line: &mut R) {
        reset_line.pulse();
    }

    /// Gate the I2C clock at teardown.
    pub fn shut_down_i2c_system<C, L>(clock: &mut C, logger: &mut L)
    where
        C: ClockControl,
        L: Logger,
    {
        clock.disable();
        logger.debug(format_args!("i2c: clock gated"));
    }
}
