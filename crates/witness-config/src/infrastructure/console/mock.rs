//! Scripted console for unit and integration testing.
//!
//! Replays a fixed list of input lines and records every prompt and message,
//! so tests can drive the interactive flow without a terminal.

use std::collections::VecDeque;
use std::io;

use super::Console;

/// A [`Console`] that answers prompts from a script.
///
/// Once the script is exhausted every read returns `Ok(None)`, the same as
/// a closed stdin.
#[derive(Debug, Default)]
pub struct ScriptedConsole {
    pub(crate) inputs: VecDeque<String>,
    /// Every prompt shown, with `true` when it was a hidden (secret) read.
    pub prompts: Vec<(String, bool)>,
    /// Lines passed to [`Console::say`].
    pub output: Vec<String>,
    /// Lines passed to [`Console::warn`].
    pub warnings: Vec<String>,
    /// When set, [`Console::warn`] fails like a closed stderr.
    pub broken_warnings: bool,
}

impl ScriptedConsole {
    /// Creates a console that will answer with `lines`, in order.
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            inputs: lines.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Number of scripted lines not consumed yet.
    pub fn remaining(&self) -> usize {
        self.inputs.len()
    }

    /// Everything printed, informational and warnings, in one string.
    pub fn transcript(&self) -> String {
        let mut all = self.output.clone();
        all.extend(self.warnings.iter().cloned());
        all.join("\n")
    }

    fn next(&mut self, prompt: &str, secret: bool) -> Option<String> {
        self.prompts.push((prompt.to_string(), secret));
        self.inputs.pop_front()
    }
}

impl Console for ScriptedConsole {
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        Ok(self.next(prompt, false))
    }

    fn read_secret(&mut self, prompt: &str) -> io::Result<Option<String>> {
        Ok(self.next(prompt, true))
    }

    fn say(&mut self, message: &str) -> io::Result<()> {
        self.output.push(message.to_string());
        Ok(())
    }

    fn warn(&mut self, message: &str) -> io::Result<()> {
        if self.broken_warnings {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "warning stream closed"));
        }
        self.warnings.push(message.to_string());
        Ok(())
    }
}
