// Licensed under the Apache-2.0 license

//! # I2C adapter instantiation for MT7621
//!
//! Turns a discovered device node into a ready adapter and back again.
//!
//! Bus enumeration happens elsewhere; this module receives the node's
//! compatible string, bus number, name and memory resource, and:
//!
//! 1. rejects nodes this driver does not handle,
//! 2. maps the register window, refusing windows that cannot hold the SM0
//!    register block,
//! 3. runs the probe-time system setup (clock on, reset pulse),
//! 4. wraps the controller in the [`I2cController`] facade.
//!
//! ```rust,ignore
//! let node = DeviceNode {
//!     compatible: "ralink,i2c-mt7621",
//!     id: 0,
//!     name: "1e000900.i2c",
//!     resource: Some(MemResource { base: 0xbe00_0900, len: 0x100 }),
//! };
//! let mut adapter = unsafe {
//!     instantiate_hardware(&node, &mut clock, reset, I2cConfig::default(), NoOpLogger {})
//! }?;
//! adapter.write(0x50, &[0x00, 0x42])?;
//! ```

use crate::common::Logger;
use crate::i2c::common::I2cConfig;
use crate::i2c::i2c_controller::I2cController;
use crate::i2c::mt7621_i2c::{Error, Mt7621I2c};
use crate::i2c::registers::{MmioWindow, RegisterIo};
use crate::i2c::system_setup::I2cSystemSetup;
use crate::syscon::{ClockControl, ResetControl};

/// Device-tree compatible strings handled by this driver.
pub const COMPATIBLE: &[&str] = &["ralink,i2c-mt7621"];

/// Memory resource of a discovered device.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MemResource {
    pub base: usize,
    pub len: usize,
}

/// A discovered platform device.
#[derive(Copy, Clone, Debug)]
pub struct DeviceNode<'a> {
    pub compatible: &'a str,
    /// Bus number the adapter is registered under.
    pub id: u8,
    pub name: &'a str,
    pub resource: Option<MemResource>,
}

/// Adapter over a controller whose registers are reached through `R`.
pub type Mt7621Adapter<R, RST, L> = I2cController<Mt7621I2c<R, RST, L>, L>;

#[must_use]
pub fn matches(compatible: &str) -> bool {
    COMPATIBLE.contains(&compatible)
}

/// Probe `node` and build its adapter on an already mapped register window.
///
/// # Errors
///
/// [`Error::NoMatch`] if the node is not an MT7621 I2C controller. Nothing is
/// touched in that case.
pub fn instantiate_with_registers<R, RST, C, L>(
    node: &DeviceNode<'_>,
    regs: R,
    clock: &mut C,
    mut reset_line: RST,
    config: I2cConfig,
    mut logger: L,
) -> Result<Mt7621Adapter<R, RST, L>, Error>
where
    R: RegisterIo,
    RST: ResetControl,
    C: ClockControl,
    L: Logger + Clone,
{
    if !matches(node.compatible) {
        return Err(Error::NoMatch);
    }

    I2cSystemSetup::initialize_i2c_system(clock, &mut reset_line, &mut logger);

    logger.debug(format_args!("{}: loaded as i2c-{}", node.name, node.id));
    let hardware = Mt7621I2c::new(regs, reset_line, config, logger.clone());
    Ok(I2cController::new(hardware, node.id, node.name, logger))
}

/// Probe `node`, mapping its memory resource directly.
///
/// # Errors
///
/// [`Error::NoMatch`] for a foreign node, [`Error::AllocationFailure`] when
/// the node has no memory resource or the window cannot be used.
///
/// # Safety
///
/// The node's memory resource must describe a device mapping that is valid
/// for the adapter's lifetime and not accessed through any other path.
pub unsafe fn instantiate_hardware<RST, C, L>(
    node: &DeviceNode<'_>,
    clock: &mut C,
    reset_line: RST,
    config: I2cConfig,
    mut logger: L,
) -> Result<Mt7621Adapter<MmioWindow, RST, L>, Error>
where
    RST: ResetControl,
    C: ClockControl,
    L: Logger + Clone,
{
    if !matches(node.compatible) {
        return Err(Error::NoMatch);
    }
    let Some(res) = node.resource else {
        logger.error(format_args!("{}: no memory resource", node.name));
        return Err(Error::AllocationFailure);
    };
    // SAFETY: forwarded from the caller's contract.
    let Some(window) = (unsafe { MmioWindow::new(res.base as *mut u32, res.len) }) else {
        logger.error(format_args!(
            "{}: unusable register window {:#x}+{:#x}",
            node.name, res.base, res.len
        ));
        return Err(Error::AllocationFailure);
    };

    instantiate_with_registers(node, window, clock, reset_line, config, logger)
}

/// Tear an adapter down: gate the clock and hand back the register window and
/// reset line.
pub fn remove<R, RST, C, L>(adapter: Mt7621Adapter<R, RST, L>, clock: &mut C) -> (R, RST)
where
    R: RegisterIo,
    RST: ResetControl,
    C: ClockControl,
    L: Logger,
{
    let mut logger = adapter.logger;
    let hardware = adapter.hardware;
    I2cSystemSetup::shut_down_i2c_system(clock, &mut logger);
    hardware.release()
}
