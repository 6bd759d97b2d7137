//! Command-line surface and dispatch.
//!
//! ```text
//! witness-config                                        interactive setup
//! witness-config --quick <ACCOUNT> <KEY> [INTERVAL] [NODES]
//! witness-config --help | -h
//! witness-config --version | -V
//! ```
//!
//! # Environment variable overrides
//!
//! | Variable              | Default   | Description                   |
//! |-----------------------|-----------|-------------------------------|
//! | `WITNESS_CONFIG_PATH` | `.env`    | Store file the bot reads      |
//! | `WITNESS_WALLET_DIR`  | `.wallet` | Bot wallet-state directory    |
//! | `RUST_LOG`            | `warn`    | Log filter (written to stderr)|
//!
//! CLI args take precedence when both are present.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};

use crate::application::{run_interactive, run_quick, summary, Outcome};
use crate::infrastructure::console::Console;
use crate::infrastructure::storage::{ConfigStore, DEFAULT_STORE_FILE};
use crate::infrastructure::wallet_state::{WalletState, DEFAULT_WALLET_DIR};

/// Configures the witness feed-price bot.
///
/// Without arguments, asks for each setting interactively, offering the
/// current values as defaults.
#[derive(Debug, Parser)]
#[command(name = "witness-config", version)]
pub struct Cli {
    /// Configure without prompts: <ACCOUNT> <KEY> [INTERVAL] [NODES].
    ///
    /// INTERVAL defaults to 10min; NODES is a comma-separated URL list and
    /// defaults to the built-in endpoints.
    #[arg(
        long,
        num_args = 0..=4,
        value_names = ["ACCOUNT", "KEY", "INTERVAL", "NODES"]
    )]
    pub quick: Option<Vec<String>>,

    /// Configuration store written for the bot.
    #[arg(long, value_name = "PATH", default_value = DEFAULT_STORE_FILE, env = "WITNESS_CONFIG_PATH")]
    pub config: PathBuf,

    /// Wallet-state directory purged when the signing key changes.
    #[arg(long, value_name = "PATH", default_value = DEFAULT_WALLET_DIR, env = "WITNESS_WALLET_DIR")]
    pub wallet_dir: PathBuf,
}

/// Process exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exit {
    /// Written, cancelled, or help/version shown.
    Success,
    /// Unknown option, or missing/invalid quick-mode argument.
    Usage,
}

impl Exit {
    pub fn code(self) -> u8 {
        match self {
            Exit::Success => 0,
            Exit::Usage => 1,
        }
    }
}

impl From<Exit> for ExitCode {
    fn from(exit: Exit) -> Self {
        ExitCode::from(exit.code())
    }
}

/// Which acquisition path the arguments select.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Interactive,
    Quick(Vec<String>),
}

impl Cli {
    pub fn mode(&self) -> Mode {
        match &self.quick {
            Some(args) => Mode::Quick(args.clone()),
            None => Mode::Interactive,
        }
    }
}

/// Parses `args`, or prints help/version/usage and returns the exit status.
pub fn parse_args<I, T>(args: I) -> Result<Cli, Exit>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(args).map_err(|e| {
        // Printing can only fail on a closed stdout/stderr; the exit status
        // is all that matters then.
        let _ = e.print();
        exit_for_parse_error(e.kind())
    })
}

/// Help and version are successful exits; every other parse error is usage.
pub fn exit_for_parse_error(kind: ErrorKind) -> Exit {
    match kind {
        ErrorKind::DisplayHelp
        | ErrorKind::DisplayVersion
        | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => Exit::Success,
        _ => Exit::Usage,
    }
}

/// Runs the path selected by `cli`.
///
/// # Errors
///
/// Store I/O failures and closed input; these end the process with a
/// non-zero status through `main`.
pub fn run<C: Console>(cli: Cli, console: &mut C) -> anyhow::Result<Exit> {
    let store = ConfigStore::new(&cli.config);
    let wallet = WalletState::new(&cli.wallet_dir);

    match cli.mode() {
        Mode::Interactive => {
            match run_interactive(console, &store, &wallet).context("interactive setup failed")? {
                Outcome::Written { .. } => {
                    console.say("\nRestart the bot for the new configuration to take effect.")?;
                }
                Outcome::Cancelled => {}
            }
            Ok(Exit::Success)
        }
        Mode::Quick(args) => match run_quick(&args, &store) {
            Ok((record, report)) => {
                for line in summary::written_lines(&record, &report) {
                    console.say(&line)?;
                }
                Ok(Exit::Success)
            }
            Err(e) if e.is_usage() => {
                console.warn(&format!("error: {e}"))?;
                console.warn(&Cli::command().render_usage().to_string())?;
                Ok(Exit::Usage)
            }
            Err(e) => Err(e).context("quick setup failed"),
        },
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
