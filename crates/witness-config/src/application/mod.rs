//! Application layer: the two acquisition paths and the post-write hook.
//!
//! Use cases orchestrate the pure core (`witness-config-core`) and talk to
//! the outside world only through the infrastructure types they are handed.
//!
//! - **`interactive`**  – prompt-by-prompt acquisition with defaults from the
//!   prior store; the default path.
//! - **`quick`**        – one-shot acquisition from positional arguments.
//! - **`key_rotation`** – after an interactive write, offers to purge wallet
//!   state that still holds the old signing key.
//! - **`summary`**      – masked, human-readable record summaries.

use std::io;

use thiserror::Error;

use crate::infrastructure::storage::StoreError;

pub mod interactive;
pub mod key_rotation;
pub mod quick;
pub mod summary;

pub use interactive::{run_interactive, Outcome};
pub use key_rotation::{handle_key_rotation, CleanupOutcome, KeyRotation};
pub use quick::{build_quick, run_quick, QuickError};

/// Failures that end an interactive run.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Standard input reached end of file before the flow finished.
    #[error("input closed before the configuration was complete; nothing was written")]
    InputClosed,

    #[error("console I/O failed: {0}")]
    Console(#[from] io::Error),

    #[error(transparent)]
    Store(#[from] StoreError),
}
