//! The interactive acquisition flow as a pure state machine.
//!
//! ```text
//! Account ──► SigningKey ──► Interval ──► RpcNodes ──► Confirm ──► done
//!    ↺            ↺             ↺             ↺           │
//!  (invalid or blank-without-default input re-prompts)    └─ "n…" ──► cancelled
//! ```
//!
//! [`transition`] maps `(step, input)` to the next step plus a record patch,
//! or to an [`InputError`] that the caller prints before asking again.  There
//! is no retry limit.  [`Session`] accumulates the patches so the whole flow
//! can be driven line by line without a terminal.

use thiserror::Error;

use crate::domain::interval::{FeedInterval, MENU};
use crate::domain::record::{
    mask_secret, ConfigurationRecord, PartialConfigurationRecord, RpcNodes,
};
use crate::domain::validation::{check_account, check_signing_key, normalize_account, ValidationError};

/// One prompt of the interactive flow, in the order they are asked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Account,
    SigningKey,
    Interval,
    RpcNodes,
    Confirm,
}

impl Step {
    /// The step that follows this one; `None` after [`Step::Confirm`].
    pub fn next(self) -> Option<Step> {
        match self {
            Step::Account => Some(Step::SigningKey),
            Step::SigningKey => Some(Step::Interval),
            Step::Interval => Some(Step::RpcNodes),
            Step::RpcNodes => Some(Step::Confirm),
            Step::Confirm => None,
        }
    }

    /// Input for this step must be read without echo.
    pub fn is_secret(self) -> bool {
        self == Step::SigningKey
    }
}

/// Why a line of input was rejected.  The step is asked again.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("{0} is required")]
    Required(&'static str),

    #[error(transparent)]
    Invalid(#[from] ValidationError),

    #[error("the saved {field} is no longer valid ({source}); please enter a new one")]
    InvalidDefault {
        field: &'static str,
        source: ValidationError,
    },

    #[error("invalid choice {0:?}; enter a number from 1 to {len}", len = MENU.len())]
    MenuChoice(String),

    #[error("enter at least one RPC node URL, or leave blank for the default list")]
    NoNodes,

    #[error("configuration is incomplete; starting over")]
    Incomplete,
}

/// A single field value produced by a successful step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Patch {
    Account(String),
    SigningKey(String),
    Interval(FeedInterval),
    RpcNodes(RpcNodes),
}

/// Result of feeding one accepted line to [`transition`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// Store `patch` and move on to `next`.
    Advance { patch: Patch, next: Step },
    /// The operator approved the summary.
    Confirmed,
    /// The operator declined at the confirmation step.
    Cancelled,
}

/// Values offered when the operator leaves a prompt blank.
///
/// Built once from the prior store; empty stored values count as absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Defaults {
    pub account: Option<String>,
    pub signing_key: Option<String>,
    /// Always present: unknown or missing values map to `10min`.
    pub interval: FeedInterval,
    pub rpc_nodes: Option<RpcNodes>,
}

impl Defaults {
    pub fn from_existing(existing: Option<PartialConfigurationRecord>) -> Self {
        let existing = existing.unwrap_or_default();
        let non_empty = |v: Option<String>| v.filter(|s| !s.trim().is_empty());
        Self {
            interval: FeedInterval::closest_to(existing.feed_interval.as_deref()),
            rpc_nodes: existing.rpc_nodes.as_deref().and_then(RpcNodes::parse),
            account: non_empty(existing.witness_account),
            signing_key: non_empty(existing.signing_key),
        }
    }

    /// The menu number selected by blank input at the interval step.
    pub fn interval_choice(&self) -> usize {
        self.interval.menu_choice().unwrap_or(2)
    }
}

/// Decides what one line of input does at `step`.
///
/// # Errors
///
/// Returns an [`InputError`] when the input (or the default it falls back
/// to) is not acceptable; the caller reports it and asks the same step again.
pub fn transition(step: Step, input: &str, defaults: &Defaults) -> Result<Transition, InputError> {
    let input = input.trim();
    let advance = |patch: Patch| -> Result<Transition, InputError> {
        Ok(Transition::Advance {
            patch,
            next: step.next().unwrap_or(Step::Confirm),
        })
    };

    match step {
        Step::Account => {
            let account = if input.is_empty() {
                let default = defaults.account.as_deref().ok_or(InputError::Required("witness account"))?;
                check_account(default).map_err(|source| InputError::InvalidDefault {
                    field: "witness account",
                    source,
                })?;
                default
            } else {
                let account = normalize_account(input);
                check_account(account)?;
                account
            };
            advance(Patch::Account(account.to_string()))
        }

        Step::SigningKey => {
            let key = if input.is_empty() {
                let default = defaults.signing_key.as_deref().ok_or(InputError::Required("signing key"))?;
                check_signing_key(default).map_err(|source| InputError::InvalidDefault {
                    field: "signing key",
                    source,
                })?;
                default
            } else {
                check_signing_key(input)?;
                input
            };
            advance(Patch::SigningKey(key.to_string()))
        }

        Step::Interval => {
            let interval = if input.is_empty() {
                FeedInterval::from_menu_choice(defaults.interval_choice()).unwrap_or_default()
            } else {
                input
                    .parse::<usize>()
                    .ok()
                    .and_then(FeedInterval::from_menu_choice)
                    .ok_or_else(|| InputError::MenuChoice(input.to_string()))?
            };
            advance(Patch::Interval(interval))
        }

        Step::RpcNodes => {
            let nodes = if input.is_empty() {
                defaults.rpc_nodes.clone().unwrap_or_default()
            } else {
                RpcNodes::parse(input).ok_or(InputError::NoNodes)?
            };
            advance(Patch::RpcNodes(nodes))
        }

        Step::Confirm => {
            if input.starts_with(['n', 'N']) {
                Ok(Transition::Cancelled)
            } else {
                Ok(Transition::Confirmed)
            }
        }
    }
}

/// The prompt line shown for `step`, including the default when there is one.
///
/// Signing keys are only ever shown masked.
pub fn prompt_text(step: Step, defaults: &Defaults) -> String {
    match step {
        Step::Account => match &defaults.account {
            Some(account) => format!("Witness account [{account}]: "),
            None => "Witness account (e.g. @alice): ".to_string(),
        },
        Step::SigningKey => match &defaults.signing_key {
            Some(key) => format!("Private signing key [{}]: ", mask_secret(key)),
            None => "Private signing key (starts with 5): ".to_string(),
        },
        Step::Interval => format!("Choose 1-{} [{}]: ", MENU.len(), defaults.interval_choice()),
        Step::RpcNodes => match &defaults.rpc_nodes {
            Some(nodes) => format!("RPC nodes, comma-separated [{nodes}]: "),
            None => format!("RPC nodes, comma-separated [{}]: ", RpcNodes::default()),
        },
        Step::Confirm => "Save this configuration? [Y/n]: ".to_string(),
    }
}

/// The numbered interval menu, one line per choice.
pub fn interval_menu(defaults: &Defaults) -> Vec<String> {
    MENU.iter()
        .enumerate()
        .map(|(i, interval)| {
            let choice = i + 1;
            let mut line = format!("  {choice}) {interval}");
            if *interval == FeedInterval::TenMinutes {
                line.push_str(" (recommended)");
            }
            if choice == defaults.interval_choice() {
                line.push_str(" [current]");
            }
            line
        })
        .collect()
}

/// Fields gathered so far.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    pub witness_account: Option<String>,
    pub signing_key: Option<String>,
    pub feed_interval: Option<FeedInterval>,
    pub rpc_nodes: Option<RpcNodes>,
}

impl Draft {
    pub fn apply(&mut self, patch: Patch) {
        match patch {
            Patch::Account(v) => self.witness_account = Some(v),
            Patch::SigningKey(v) => self.signing_key = Some(v),
            Patch::Interval(v) => self.feed_interval = Some(v),
            Patch::RpcNodes(v) => self.rpc_nodes = Some(v),
        }
    }

    /// The complete record once all four fields are set.
    pub fn finish(&self) -> Option<ConfigurationRecord> {
        Some(ConfigurationRecord {
            witness_account: self.witness_account.clone()?,
            signing_key: self.signing_key.clone()?,
            feed_interval: self.feed_interval.clone()?,
            rpc_nodes: self.rpc_nodes.clone()?,
        })
    }
}

/// What the caller should do after feeding a line to a [`Session`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Progress {
    /// Ask [`Session::step`] next.
    Continue,
    /// The operator confirmed; write this record.
    Complete(ConfigurationRecord),
    /// The operator declined; write nothing.
    Cancelled,
}

/// Drives [`transition`] across the whole flow, accumulating a [`Draft`].
#[derive(Debug, Clone)]
pub struct Session {
    step: Step,
    defaults: Defaults,
    draft: Draft,
}

impl Session {
    pub fn new(defaults: Defaults) -> Self {
        Self {
            step: Step::Account,
            defaults,
            draft: Draft::default(),
        }
    }

    /// The step awaiting input.
    pub fn step(&self) -> Step {
        self.step
    }

    pub fn defaults(&self) -> &Defaults {
        &self.defaults
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    /// Feeds one line of input to the current step.
    ///
    /// # Errors
    ///
    /// Returns the [`InputError`] to report; the session stays on the same
    /// step (or, for [`InputError::Incomplete`], restarts from the account).
    pub fn feed(&mut self, input: &str) -> Result<Progress, InputError> {
        match transition(self.step, input, &self.defaults)? {
            Transition::Advance { patch, next } => {
                self.draft.apply(patch);
                self.step = next;
                Ok(Progress::Continue)
            }
            Transition::Confirmed => match self.draft.finish() {
                Some(record) => Ok(Progress::Complete(record)),
                None => {
                    self.step = Step::Account;
                    Err(InputError::Incomplete)
                }
            },
            Transition::Cancelled => Ok(Progress::Cancelled),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
