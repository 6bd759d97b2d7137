//! Post-write hook: offer to purge wallet state after a signing-key change.
//!
//! The bot runtime keeps an encrypted copy of the signing key in its wallet
//! directory.  If the key in the store changes, that copy is stale.  After a
//! successful interactive write, [`KeyRotation::detect`] compares the key
//! loaded before the prompts ran with the key just written; when they differ
//! the operator is asked whether to remove the wallet state now.
//!
//! The cleanup is best effort: the new store is already committed, so a
//! failure here is reported but never fails the run.

use tracing::{info, warn};
use witness_config_core::mask_secret;

use crate::infrastructure::console::Console;
use crate::infrastructure::wallet_state::{PurgeOutcome, WalletState};

use super::SessionError;

/// A committed change of signing key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyRotation {
    previous_masked: String,
    current_masked: String,
}

impl KeyRotation {
    /// Fires when a non-empty prior key differs from the newly written one.
    pub fn detect(prior: Option<&str>, written: &str) -> Option<Self> {
        let prior = prior.filter(|k| !k.is_empty())?;
        (prior != written).then(|| Self {
            previous_masked: mask_secret(prior),
            current_masked: mask_secret(written),
        })
    }
}

/// What the hook ended up doing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CleanupOutcome {
    Removed,
    NothingToRemove,
    Declined,
    /// Removal was attempted and failed; the message was shown to the operator.
    Failed(String),
}

/// Warns about the key change and, on confirmation, purges `wallet`.
///
/// Blank input counts as yes.  End of input counts as no.
///
/// # Errors
///
/// Only console failures are returned; removal failures become
/// [`CleanupOutcome::Failed`].
pub fn handle_key_rotation<C: Console>(
    console: &mut C,
    rotation: &KeyRotation,
    wallet: &WalletState,
) -> Result<CleanupOutcome, SessionError> {
    info!(
        previous = %rotation.previous_masked,
        current = %rotation.current_masked,
        "signing key changed"
    );
    console.warn(&format!(
        "⚠ The signing key changed ({} → {}).",
        rotation.previous_masked, rotation.current_masked
    ))?;
    console.warn(&format!(
        "  Wallet state in {} still holds the old key and must be rebuilt.",
        wallet.path().display()
    ))?;

    let answer = console.read_line("Clean wallet state now? [Y/n]: ")?;
    let confirmed = matches!(answer.as_deref().map(str::trim), Some(a) if !a.starts_with(['n', 'N']));
    if !confirmed {
        console.say("Wallet state left in place. Remove it before restarting the bot.")?;
        return Ok(CleanupOutcome::Declined);
    }

    match wallet.purge() {
        Ok(PurgeOutcome::Removed) => {
            console.say(&format!("✓ Removed {}", wallet.path().display()))?;
            Ok(CleanupOutcome::Removed)
        }
        Ok(PurgeOutcome::NotPresent) => {
            console.say("No wallet state found; nothing to clean.")?;
            Ok(CleanupOutcome::NothingToRemove)
        }
        Err(e) => {
            warn!(path = %wallet.path().display(), error = %e, "wallet state removal failed");
            let message = format!("could not remove {}: {e}", wallet.path().display());
            console.warn(&format!("✗ {message}"))?;
            Ok(CleanupOutcome::Failed(message))
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
