//! Interactive acquisition: drives the prompt [`Session`] over a [`Console`].
//!
//! ```text
//! load prior store ──► Defaults + prior key
//!        │
//!        ▼
//!   ┌─► prompt ──► read line ──► Session::feed ──┬─ error ──► print, ask again ─┐
//!   └────────────────────────────────────────────┴─ Continue ◄──────────────────┘
//!                                                 ├─ Cancelled ──► no write, exit 0
//!                                                 └─ Complete  ──► write ──► key-rotation hook
//! ```
//!
//! End of input at any prompt aborts with [`SessionError::InputClosed`]
//! before anything is written.

use tracing::{debug, info, warn};
use witness_config_core::prompt::{interval_menu, prompt_text};
use witness_config_core::{ConfigurationRecord, Defaults, Progress, Session, Step};

use crate::infrastructure::console::Console;
use crate::infrastructure::storage::{ConfigStore, WriteReport};
use crate::infrastructure::wallet_state::WalletState;

use super::key_rotation::{handle_key_rotation, CleanupOutcome, KeyRotation};
use super::summary::{record_lines, written_lines};
use super::SessionError;

/// How an interactive run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Written {
        record: ConfigurationRecord,
        report: WriteReport,
        /// `None` when the signing key did not change.
        cleanup: Option<CleanupOutcome>,
    },
    Cancelled,
}

/// Runs the full interactive flow against `store`.
///
/// # Errors
///
/// [`SessionError::InputClosed`] on end of input, [`SessionError::Console`]
/// on terminal failures, [`SessionError::Store`] when the store cannot be
/// read or written.  Rejected input is never an error: it is reported and
/// the same prompt is shown again.
pub fn run_interactive<C: Console>(
    console: &mut C,
    store: &ConfigStore,
    wallet: &WalletState,
) -> Result<Outcome, SessionError> {
    let existing = store.load_existing()?;
    let prior_key = existing
        .as_ref()
        .and_then(|e| e.prior_key())
        .map(str::to_string);

    console.say("Witness feed bot configuration")?;
    match &existing {
        Some(partial) if partial.is_empty() => console.say(&format!(
            "{} holds no witness settings yet; starting fresh.",
            store.path().display()
        ))?,
        Some(_) => console.say(&format!(
            "Existing configuration found in {}. Press Enter to keep a value.",
            store.path().display()
        ))?,
        None => {}
    }

    let mut session = Session::new(Defaults::from_existing(existing));
    let mut announced = None;

    let record = loop {
        let step = session.step();
        if announced != Some(step) {
            introduce(console, &session)?;
            announced = Some(step);
        }

        let prompt = prompt_text(step, session.defaults());
        let line = if step.is_secret() {
            console.read_secret(&prompt)?
        } else {
            console.read_line(&prompt)?
        };
        let line = line.ok_or(SessionError::InputClosed)?;

        match session.feed(&line) {
            Ok(Progress::Continue) => {}
            Ok(Progress::Complete(record)) => break record,
            Ok(Progress::Cancelled) => {
                info!("configuration cancelled by operator");
                console.say("Cancelled. No changes were made.")?;
                return Ok(Outcome::Cancelled);
            }
            Err(e) => {
                debug!(?step, error = %e, "input rejected");
                console.warn(&format!("✗ {e}"))?;
            }
        }
    };

    let report = store.write(&record)?;
    for line in written_lines(&record, &report) {
        console.say(&line)?;
    }

    // The store is committed; hook failures are reported, not propagated.
    let cleanup = KeyRotation::detect(prior_key.as_deref(), &record.signing_key).map(|rotation| {
        handle_key_rotation(console, &rotation, wallet).unwrap_or_else(|e| {
            warn!(error = %e, "wallet cleanup prompt failed after the store was written");
            CleanupOutcome::Failed(e.to_string())
        })
    });

    Ok(Outcome::Written {
        record,
        report,
        cleanup,
    })
}

/// Prints the heading (and menu or summary) shown once when a step begins.
fn introduce<C: Console>(console: &mut C, session: &Session) -> Result<(), SessionError> {
    match session.step() {
        Step::Account => console.say("\n── Witness account ──")?,
        Step::SigningKey => {
            console.say("\n── Signing key ──")?;
            console.say("Your private active or signing key (WIF). Input is hidden.")?;
        }
        Step::Interval => {
            console.say("\n── Feed interval ──")?;
            for line in interval_menu(session.defaults()) {
                console.say(&line)?;
            }
        }
        Step::RpcNodes => {
            console.say("\n── RPC nodes ──")?;
            console.say("Endpoints in failover order. Leave blank to keep the listed value.")?;
        }
        Step::Confirm => {
            console.say("\n── Summary ──")?;
            if let Some(record) = session.draft().finish() {
                for line in record_lines(&record) {
                    console.say(&line)?;
                }
            }
        }
    }
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;

    use super::*;
    use crate::infrastructure::console::ScriptedConsole;
    use uuid::Uuid;

    const KEY: &str = "5JbVhzSegwLwLpRqUkTPfh7Ap7NjHzDw5qe4ZBsDAdWWcBnbU1R";

    fn scratch() -> (PathBuf, ConfigStore, WalletState) {
        let root = std::env::temp_dir().join(format!("witness_interactive_test_{}", Uuid::new_v4()));
        fs::create_dir_all(&root).unwrap();
        let store = ConfigStore::new(root.join(".env"));
        let wallet = WalletState::new(root.join(".wallet"));
        (root, store, wallet)
    }

    #[test]
    fn test_completed_run_reports_written_record() {
        // Arrange
        let (root, store, wallet) = scratch();
        let mut console = ScriptedConsole::new(["@alice", KEY, "1", "", "Y"]);

        // Act
        let outcome = run_interactive(&mut console, &store, &wallet).unwrap();

        // Assert
        let Outcome::Written { record, report, cleanup } = outcome else {
            panic!("expected a write");
        };
        assert_eq!(record.witness_account, "alice");
        assert_eq!(report.path, store.path());
        assert_eq!(report.backup, None);
        assert_eq!(cleanup, None);
        fs::remove_dir_all(&root).ok();
    }

    #[test]
    fn test_interval_menu_is_shown_once_despite_retries() {
        let (root, store, wallet) = scratch();
        let mut console = ScriptedConsole::new(["alice", KEY, "9", "0", "2", "", ""]);

        run_interactive(&mut console, &store, &wallet).unwrap();

        let menus = console.output.iter().filter(|l| l.contains("── Feed interval")).count();
        assert_eq!(menus, 1);
        assert_eq!(console.warnings.len(), 2);
        fs::remove_dir_all(&root).ok();
    }

    #[test]
    fn test_existing_store_is_announced() {
        let (root, store, wallet) = scratch();
        fs::write(store.path(), "HIVE_WITNESS_ACCOUNT=carol\n").unwrap();
        let mut console = ScriptedConsole::new(["", KEY, "", "", "n"]);

        let outcome = run_interactive(&mut console, &store, &wallet).unwrap();

        assert_eq!(outcome, Outcome::Cancelled);
        assert!(console.output.iter().any(|l| l.contains("Existing configuration found")));
        assert!(console.prompts[0].0.contains("[carol]"));
        fs::remove_dir_all(&root).ok();
    }

    #[test]
    fn test_console_failure_in_key_hook_keeps_the_write() {
        // Arrange: a prior store with a different key, and a console whose warnings fail
        let (root, store, wallet) = scratch();
        fs::write(
            store.path(),
            "HIVE_SIGNING_PRIVATE_KEY=5HueCGU8rMjxEXxiPuD5BDku4MkFqeZyd4dZ1jvhTVqvbTLvyTJ\n",
        )
        .unwrap();
        fs::create_dir_all(wallet.path()).unwrap();
        let mut console = ScriptedConsole {
            broken_warnings: true,
            ..ScriptedConsole::new(["alice", KEY, "", "", ""])
        };

        // Act
        let outcome = run_interactive(&mut console, &store, &wallet).unwrap();

        // Assert
        let Outcome::Written { cleanup, .. } = outcome else {
            panic!("expected a write");
        };
        assert!(matches!(cleanup, Some(CleanupOutcome::Failed(_))));
        assert!(fs::read_to_string(store.path()).unwrap().contains(KEY));
        assert!(wallet.path().exists(), "nothing is purged without an answer");
        fs::remove_dir_all(&root).ok();
    }

    #[test]
    fn test_store_without_known_keys_is_treated_as_fresh() {
        let (root, store, wallet) = scratch();
        fs::write(store.path(), "# unrelated\nOTHER=1\n").unwrap();
        let mut console = ScriptedConsole::new(["alice", KEY, "", "", "n"]);

        run_interactive(&mut console, &store, &wallet).unwrap();

        assert!(console.output.iter().any(|l| l.contains("starting fresh")));
        assert!(!console.output.iter().any(|l| l.contains("Existing configuration found")));
        fs::remove_dir_all(&root).ok();
    }

    #[test]
    fn test_summary_precedes_confirmation() {
        let (root, store, wallet) = scratch();
        let mut console = ScriptedConsole::new(["alice", KEY, "", "", "n"]);

        run_interactive(&mut console, &store, &wallet).unwrap();

        assert!(console.output.iter().any(|l| l.contains("Witness account : @alice")));
        assert!(console.output.iter().any(|l| l.contains("5JbV...bU1R")));
        assert!(!store.path().exists());
        fs::remove_dir_all(&root).ok();
    }
}
