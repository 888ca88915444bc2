// Licensed under the Apache-2.0 license

//! System-controller capabilities consumed by peripheral drivers.
//!
//! The reset controller and clock gates live outside this crate. Drivers only
//! see these two handles, one per managed hardware block.

/// Reset line of a single hardware block.
///
/// Implementations are expected to complete synchronously; any failure to
/// reach the reset controller is a platform bring-up concern.
pub trait ResetControl {
    fn assert(&mut self);
    fn deassert(&mut self);

    /// Pulse the line: assert, then release.
    fn pulse(&mut self) {
        self.assert();
        self.deassert();
    }
}

/// Clock gate of a single hardware block.
pub trait ClockControl {
    fn enable(&mut self);
    fn disable(&mut self);
}

impl<T: ResetControl + ?Sized> ResetControl for &mut T {
    fn assert(&mut self) {
        (**self).assert();
    }

    fn deassert(&mut self) {
        (**self).deassert();
    }

    fn pulse(&mut self) {
        (**self).pulse();
    }
}

impl<T: ClockControl + ?Sized> ClockControl for &mut T {
    fn enable(&mut self) {
        (**self).enable();
    }

    fn disable(&mut self) {
        (**self).disable();
    }
}

/// Placeholder for blocks whose reset line is not wired to software.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoReset;

impl ResetControl for NoReset {
    fn assert(&mut self) {}
    fn deassert(&mut self) {}
}
