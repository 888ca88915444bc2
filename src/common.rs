// Licensed under the Apache-2.0 license

//! Crate-wide logging hooks.
//!
//! Drivers take a `Logger` type parameter and report through it. The default
//! `NoOpLogger` compiles away; `UartLogger` writes one line per event to any
//! `embedded_io::Write` sink (typically the console UART).

use core::fmt;
use embedded_io::Write;

/// Sink for driver diagnostics.
pub trait Logger {
    fn debug(&mut self, args: fmt::Arguments<'_>);
    fn error(&mut self, args: fmt::Arguments<'_>);
}

/// Logger that drops everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoOpLogger {}

impl Logger for NoOpLogger {
    fn debug(&mut self, _args: fmt::Arguments<'_>) {}
    fn error(&mut self, _args: fmt::Arguments<'_>) {}
}

/// Line-oriented logger over a byte sink.
///
/// Write errors are ignored: a failing console must never fail a bus transfer.
pub struct UartLogger<W: Write> {
    writer: W,
    verbose: bool,
}

impl<W: Write> UartLogger<W> {
    /// Logger that emits errors only.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            verbose: false,
        }
    }

    /// Logger that also emits debug events.
    pub fn verbose(writer: W) -> Self {
        Self {
            writer,
            verbose: true,
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn emit(&mut self, tag: &str, args: fmt::Arguments<'_>) {
        let _ = write!(self.writer, "[{tag}] {args}\r\n");
    }
}

impl<W: Write> Logger for UartLogger<W> {
    fn debug(&mut self, args: fmt::Arguments<'_>) {
        if self.verbose {
            self.emit("dbg", args);
        }
    }

    fn error(&mut self, args: fmt::Arguments<'_>) {
        self.emit("err", args);
    }
}
