// Licensed under the Apache-2.0 license

//! Host-side model of the SM0 controller for unit tests.
//!
//! `SimController` answers register accesses the way the hardware does for
//! the polled transfer path, with loopback devices behind it: a write stores
//! the payload and rewinds the device's read pointer, reads stream the stored
//! bytes back (0xFF past the end). Faults can be injected per test.

use crate::common::Logger;
use crate::i2c::registers::{
    RegisterIo, CMD_READ, CMD_WRITE, REG_BYTECNT, REG_CONFIG, REG_DATAIN, REG_DATAOUT, REG_DEVADDR,
    REG_STARTXFR, REG_STATUS, REG_WINDOW_LEN, STATUS_ACKERR, STATUS_BUSY, STATUS_DATARDY,
    STATUS_SDOEMPTY,
};
use crate::syscon::ResetControl;
use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::rc::Rc;

#[derive(Default)]
pub struct LoopbackDevice {
    pub data: Vec<u8>,
    cursor: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Xfer {
    Idle,
    Read,
    Write { remaining: usize },
    /// Target never answered; nothing moves until the next reset.
    Stalled,
}

/// A start command as seen by the controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Start {
    pub command: u32,
    pub byte_count: u32,
    pub device: u32,
}

pub struct SimController {
    shadow: [u32; REG_WINDOW_LEN / 4],
    pub devices: HashMap<u8, LoopbackDevice>,
    pub writes: Vec<(usize, u32)>,
    pub reads: usize,
    pub status_reads: usize,
    pub starts: Vec<Start>,
    /// Busy bit sticks once this many starts have been issued.
    pub stuck_busy_after: Option<usize>,
    /// Read starts never deliver data.
    pub drop_rx: bool,
    xfer: Xfer,
    rx_fifo: VecDeque<u8>,
    held_tx: Option<u8>,
    ack_error: bool,
}

impl SimController {
    pub fn new() -> Self {
        Self {
            shadow: [0; REG_WINDOW_LEN / 4],
            devices: HashMap::new(),
            writes: Vec::new(),
            reads: 0,
            status_reads: 0,
            starts: Vec::new(),
            stuck_busy_after: None,
            drop_rx: false,
            xfer: Xfer::Idle,
            rx_fifo: VecDeque::new(),
            held_tx: None,
            ack_error: false,
        }
    }

    /// Controller with loopback devices at `addrs`.
    pub fn with_devices(addrs: &[u8]) -> Self {
        let mut sim = Self::new();
        for &addr in addrs {
            sim.devices.insert(addr, LoopbackDevice::default());
        }
        sim
    }

    pub fn register(&self, offset: usize) -> u32 {
        self.shadow[offset / 4]
    }

    pub fn writes_to(&self, offset: usize) -> Vec<u32> {
        self.writes
            .iter()
            .filter(|(off, _)| *off == offset)
            .map(|&(_, value)| value)
            .collect()
    }

    pub fn device(&self, addr: u8) -> &LoopbackDevice {
        &self.devices[&addr]
    }

    /// Forget recorded accesses, keeping device contents.
    pub fn clear_log(&mut self) {
        self.writes.clear();
        self.starts.clear();
        self.reads = 0;
        self.status_reads = 0;
    }

    fn bound_device(&self) -> u8 {
        self.shadow[REG_DEVADDR / 4] as u8
    }

    fn busy_stuck(&self) -> bool {
        self.stuck_busy_after
            .is_some_and(|after| self.starts.len() >= after)
    }

    fn start(&mut self, command: u32) {
        let byte_count = self.shadow[REG_BYTECNT / 4];
        let device = self.bound_device();
        self.starts.push(Start {
            command,
            byte_count,
            device: u32::from(device),
        });

        let len = byte_count.wrapping_add(1) as usize;
        let Some(dev) = self.devices.get_mut(&device) else {
            self.ack_error = true;
            self.xfer = Xfer::Stalled;
            return;
        };

        match command {
            CMD_READ => {
                if self.drop_rx {
                    self.xfer = Xfer::Stalled;
                    return;
                }
                for _ in 0..len {
                    let byte = dev.data.get(dev.cursor).copied().unwrap_or(0xFF);
                    dev.cursor += 1;
                    self.rx_fifo.push_back(byte);
                }
                self.xfer = Xfer::Read;
            }
            CMD_WRITE => {
                dev.data.clear();
                dev.cursor = 0;
                self.xfer = Xfer::Write { remaining: len };
                self.shift_out();
            }
            _ => {}
        }
    }

    fn shift_out(&mut self) {
        let Xfer::Write { remaining } = self.xfer else {
            return;
        };
        let Some(byte) = self.held_tx.take() else {
            return;
        };
        let device = self.bound_device();
        if let Some(dev) = self.devices.get_mut(&device) {
            dev.data.push(byte);
        }
        self.xfer = if remaining <= 1 {
            Xfer::Idle
        } else {
            Xfer::Write {
                remaining: remaining - 1,
            }
        };
    }

    fn status(&self) -> u32 {
        let mut status = 0;
        let active = match self.xfer {
            Xfer::Idle => false,
            Xfer::Read => !self.rx_fifo.is_empty(),
            Xfer::Write { .. } | Xfer::Stalled => true,
        };
        if active || self.busy_stuck() {
            status |= STATUS_BUSY;
        }
        if self.held_tx.is_none() {
            status |= STATUS_SDOEMPTY;
        }
        if !self.rx_fifo.is_empty() {
            status |= STATUS_DATARDY;
        }
        if self.ack_error {
            status |= STATUS_ACKERR;
        }
        status
    }
}

impl RegisterIo for SimController {
    fn read32(&mut self, offset: usize) -> u32 {
        self.reads += 1;
        match offset {
            REG_STATUS => {
                self.status_reads += 1;
                self.status()
            }
            REG_DATAIN => {
                let byte = self.rx_fifo.pop_front().unwrap_or(0);
                if self.rx_fifo.is_empty() && self.xfer == Xfer::Read {
                    self.xfer = Xfer::Idle;
                }
                u32::from(byte)
            }
            _ => self.shadow[offset / 4],
        }
    }

    fn write32(&mut self, offset: usize, value: u32) {
        self.writes.push((offset, value));
        self.shadow[offset / 4] = value;
        match offset {
            REG_DATAOUT => {
                self.held_tx = Some(value as u8);
                if self.xfer != Xfer::Stalled {
                    self.shift_out();
                }
            }
            REG_STARTXFR => self.start(value),
            // Reprogramming the config word follows a reset pulse.
            REG_CONFIG => {
                self.xfer = Xfer::Idle;
                self.rx_fifo.clear();
                self.held_tx = None;
                self.ack_error = false;
            }
            _ => {}
        }
    }
}

/// Reset line that counts pulses.
#[derive(Clone, Default)]
pub struct CountingReset {
    pub asserts: Rc<Cell<usize>>,
    pub deasserts: Rc<Cell<usize>>,
}

impl ResetControl for CountingReset {
    fn assert(&mut self) {
        self.asserts.set(self.asserts.get() + 1);
    }

    fn deassert(&mut self) {
        self.deasserts.set(self.deasserts.get() + 1);
    }
}

/// Logger that keeps every line for inspection.
#[derive(Clone, Default)]
pub struct RecordingLogger {
    pub lines: Rc<RefCell<Vec<String>>>,
}

impl RecordingLogger {
    pub fn errors(&self) -> Vec<String> {
        self.lines
            .borrow()
            .iter()
            .filter_map(|line| line.strip_prefix("error: ").map(String::from))
            .collect()
    }
}

impl Logger for RecordingLogger {
    fn debug(&mut self, args: fmt::Arguments<'_>) {
        self.lines.borrow_mut().push(format!("debug: {args}"));
    }

    fn error(&mut self, args: fmt::Arguments<'_>) {
        self.lines.borrow_mut().push(format!("error: {args}"));
    }
}

#[derive(Default)]
pub struct CountingClock {
    pub enabled: bool,
    pub enables: usize,
    pub disables: usize,
}

impl crate::syscon::ClockControl for CountingClock {
    fn enable(&mut self) {
        self.enabled = true;
        self.enables += 1;
    }

    fn disable(&mut self) {
        self.enabled = false;
        self.disables += 1;
    }
}
