// Licensed under the Apache-2.0 license

//! MT7621 SM0 register map and raw window access.

use core::ptr::{self, NonNull};

pub const REG_CONFIG: usize = 0x00;
pub const REG_CLKDIV: usize = 0x04;
pub const REG_DEVADDR: usize = 0x08;
pub const REG_ADDR: usize = 0x0C;
pub const REG_DATAOUT: usize = 0x10;
pub const REG_DATAIN: usize = 0x14;
pub const REG_STATUS: usize = 0x18;
pub const REG_STARTXFR: usize = 0x1C;
pub const REG_BYTECNT: usize = 0x20;
pub const REG_SM0_IS_AUTOMODE: usize = 0x28;
pub const REG_SM0CTL0: usize = 0x40;

/// Bytes a mapped window must cover to reach every register above.
pub const REG_WINDOW_LEN: usize = REG_SM0CTL0 + 4;

// Status register bits
pub const STATUS_BUSY: u32 = 1 << 0;
pub const STATUS_SDOEMPTY: u32 = 1 << 1;
pub const STATUS_DATARDY: u32 = 1 << 2;
pub const STATUS_ACKERR: u32 = 1 << 3;
pub const STATUS_STARTERR: u32 = 1 << 4;

// Config register fields
pub const CFG_ADDRLEN_8: u32 = 7 << 5;
pub const CFG_DEVADLEN_7: u32 = 6 << 2;
pub const CFG_ADDRDIS: u32 = 1 << 1;
pub const CFG_DEVADDIS: u32 = 1 << 0;
pub const CFG_DEFAULT: u32 = CFG_ADDRLEN_8 | CFG_DEVADLEN_7 | CFG_ADDRDIS;

// SM0CTL0 fields
pub const SM0_ODRAIN: u32 = 1 << 31;
pub const SM0_VSYNC_MODE: u32 = 1 << 28;
pub const SM0_CLK_DIV_SHIFT: u32 = 16;
pub const SM0_CLK_DIV_MAX: u16 = 0x7FFF;
pub const SM0_WAIT_LEVEL: u32 = 1 << 6;
pub const SM0_EN: u32 = 1 << 1;

pub const CMD_WRITE: u32 = 0x00;
pub const CMD_READ: u32 = 0x01;

/// Largest transfer one read start can cover.
pub const READ_BLOCK: usize = 16;

/// Mode-control word for a given SCL divider.
#[must_use]
pub const fn sm0ctl0(clock_divider: u16) -> u32 {
    SM0_ODRAIN
        | SM0_VSYNC_MODE
        | ((clock_divider as u32) << SM0_CLK_DIV_SHIFT)
        | SM0_WAIT_LEVEL
        | SM0_EN
}

/// 32-bit register access at a byte offset.
///
/// Reads take `&mut self`: reading `REG_DATAIN` pops the receive FIFO.
pub trait RegisterIo {
    fn read32(&mut self, offset: usize) -> u32;
    fn write32(&mut self, offset: usize, value: u32);
}

impl<T: RegisterIo + ?Sized> RegisterIo for &mut T {
    fn read32(&mut self, offset: usize) -> u32 {
        (**self).read32(offset)
    }

    fn write32(&mut self, offset: usize, value: u32) {
        (**self).write32(offset, value);
    }
}

/// A mapped MMIO register window.
pub struct MmioWindow {
    base: NonNull<u32>,
    len: usize,
}

impl MmioWindow {
    /// Wrap a mapped register window.
    ///
    /// Returns `None` when the base is null or misaligned, or when the window
    /// is too short to hold the SM0 register block.
    ///
    /// # Safety
    ///
    /// `base..base + len` must be a device mapping that stays valid and
    /// exclusively owned by the returned value for its whole lifetime.
    pub unsafe fn new(base: *mut u32, len: usize) -> Option<Self> {
        let base = NonNull::new(base)?;
        if base.as_ptr().align_offset(core::mem::align_of::<u32>()) != 0 || len < REG_WINDOW_LEN {
            return None;
        }
        Some(Self { base, len })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn reg(&self, offset: usize) -> Option<*mut u32> {
        if offset % 4 != 0 || offset + 4 > self.len {
            return None;
        }
        // SAFETY: offset is in bounds of the mapping promised by `new`.
        Some(unsafe { self.base.as_ptr().add(offset / 4) })
    }
}

impl RegisterIo for MmioWindow {
    fn read32(&mut self, offset: usize) -> u32 {
        match self.reg(offset) {
            // SAFETY: `reg` only yields aligned pointers inside the window.
            Some(reg) => unsafe { ptr::read_volatile(reg) },
            None => 0,
        }
    }

    fn write32(&mut self, offset: usize, value: u32) {
        if let Some(reg) = self.reg(offset) {
            // SAFETY: `reg` only yields aligned pointers inside the window.
            unsafe { ptr::write_volatile(reg, value) }
        }
    }
}
