//! The bot runtime's encrypted wallet directory.
//!
//! The runtime imports the signing key into this directory on first start.
//! When the key changes the directory holds a stale key and must be removed
//! so the runtime rebuilds it.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::info;

/// Default wallet-state directory, relative to the working directory.
pub const DEFAULT_WALLET_DIR: &str = ".wallet";

/// Result of [`WalletState::purge`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PurgeOutcome {
    Removed,
    NotPresent,
}

/// Location of the wallet state.
#[derive(Debug, Clone)]
pub struct WalletState {
    dir: PathBuf,
}

impl WalletState {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path(&self) -> &Path {
        &self.dir
    }

    pub fn exists(&self) -> bool {
        fs::symlink_metadata(&self.dir).is_ok()
    }

    /// Removes the wallet state if present.
    ///
    /// A symlink is removed without following it.
    ///
    /// # Errors
    ///
    /// Propagates removal failures other than "not found".
    pub fn purge(&self) -> io::Result<PurgeOutcome> {
        let metadata = match fs::symlink_metadata(&self.dir) {
            Ok(m) => m,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(PurgeOutcome::NotPresent),
            Err(e) => return Err(e),
        };

        if metadata.is_dir() {
            fs::remove_dir_all(&self.dir)?;
        } else {
            fs::remove_file(&self.dir)?;
        }
        info!(path = %self.dir.display(), "wallet state removed");
        Ok(PurgeOutcome::Removed)
    }
}
