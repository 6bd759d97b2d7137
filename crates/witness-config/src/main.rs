//! witness-config — entry point.
//!
//! Writes the configuration store read by the witness feed-price bot.
//!
//! # Usage
//!
//! ```text
//! witness-config [OPTIONS]
//!
//! Options:
//!   --quick <ACCOUNT> <KEY> [INTERVAL] [NODES]  Configure without prompts
//!   --config <PATH>       Store file [default: .env]
//!   --wallet-dir <PATH>   Wallet-state directory [default: .wallet]
//!   -h, --help            Print help
//!   -V, --version         Print version
//! ```
//!
//! # Exit status
//!
//! | Status | Meaning                                                    |
//! |--------|------------------------------------------------------------|
//! | 0      | written, cancelled at the confirmation prompt, or help     |
//! | 1      | unknown option, missing/invalid quick argument, I/O error  |

use std::process::ExitCode;

use tracing::info;
use tracing_subscriber::EnvFilter;

use witness_config::cli::{self, Exit};
use witness_config::infrastructure::console::TerminalConsole;

fn main() -> anyhow::Result<ExitCode> {
    // Logs go to stderr so they never interleave with prompts on stdout.
    // Level is overridden by `RUST_LOG`.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = match cli::parse_args(std::env::args_os()) {
        Ok(cli) => cli,
        Err(exit) => return Ok(exit.into()),
    };
    info!(config = %cli.config.display(), quick = cli.quick.is_some(), "witness-config starting");

    let mut console = TerminalConsole::new();
    let exit = cli::run(cli, &mut console)?;
    if exit != Exit::Success {
        info!(?exit, "witness-config finished with usage error");
    }
    Ok(exit.into())
}
