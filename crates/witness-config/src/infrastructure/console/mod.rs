//! Operator console: line input, hidden secret input, and messages.
//!
//! The application layer only talks to the [`Console`] trait so the whole
//! interactive flow can run against [`mock::ScriptedConsole`] in tests.
//!
//! # Blocking
//!
//! Every read blocks the process until the operator presses Enter.  There
//! are no timeouts.  An interrupt (Ctrl+C) terminates the process during the
//! read; nothing has been written at that point.

use std::io;

pub mod mock;
pub mod terminal;

pub use mock::ScriptedConsole;
pub use terminal::TerminalConsole;

/// Line-oriented operator I/O.
pub trait Console {
    /// Shows `prompt` and reads one line, without the trailing newline.
    ///
    /// Returns `Ok(None)` when input is closed (end of file).
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>>;

    /// Like [`Console::read_line`], but the typed text is not echoed.
    fn read_secret(&mut self, prompt: &str) -> io::Result<Option<String>>;

    /// Prints an informational line.
    fn say(&mut self, message: &str) -> io::Result<()>;

    /// Prints a warning or error line.
    fn warn(&mut self, message: &str) -> io::Result<()>;
}
