//! [`Console`] backed by the process's stdin, stdout and stderr.

use std::io::{self, BufRead, IsTerminal, Write};

use super::Console;

/// The real terminal.
///
/// Secrets are read with `rpassword` when stdin is a terminal.  When stdin
/// is piped there is nothing to hide, so the line is read normally.
///
/// `rpassword` reports Ctrl-D the same as an empty line, so on a terminal
/// end of input at the signing-key prompt accepts the default instead of
/// returning `None`.  Piped input still reports end of input.
#[derive(Debug, Default)]
pub struct TerminalConsole;

impl TerminalConsole {
    pub fn new() -> Self {
        Self
    }
}

impl Console for TerminalConsole {
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        let mut stdout = io::stdout().lock();
        stdout.write_all(prompt.as_bytes())?;
        stdout.flush()?;

        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(strip_newline(line)))
    }

    fn read_secret(&mut self, prompt: &str) -> io::Result<Option<String>> {
        if io::stdin().is_terminal() {
            rpassword::prompt_password(prompt).map(Some)
        } else {
            self.read_line(prompt)
        }
    }

    fn say(&mut self, message: &str) -> io::Result<()> {
        writeln!(io::stdout().lock(), "{message}")
    }

    fn warn(&mut self, message: &str) -> io::Result<()> {
        writeln!(io::stderr().lock(), "{message}")
    }
}

fn strip_newline(mut line: String) -> String {
    while line.ends_with(['\n', '\r']) {
        line.pop();
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_newline_handles_lf_and_crlf() {
        assert_eq!(strip_newline("abc\n".to_string()), "abc");
        assert_eq!(strip_newline("abc\r\n".to_string()), "abc");
        assert_eq!(strip_newline("abc".to_string()), "abc");
    }

    #[test]
    fn test_strip_newline_keeps_inner_whitespace() {
        assert_eq!(strip_newline(" a b \n".to_string()), " a b ");
    }
}
