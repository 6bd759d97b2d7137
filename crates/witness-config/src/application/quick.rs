//! Non-interactive configuration from positional arguments.
//!
//! ```text
//! --quick <account> <key> [interval] [nodes]
//! ```
//!
//! The account (a leading `@` is stripped) and the key are required and
//! validated; a missing or malformed one fails immediately.  The interval and
//! node list are taken as given: a value outside the menu is written verbatim
//! and only logged.  The post-write wallet hook never runs on this path.

use thiserror::Error;
use tracing::warn;
use witness_config_core::{
    check_account, check_signing_key, normalize_account, ConfigurationRecord, FeedInterval,
    RpcNodes, ValidationError,
};

use crate::infrastructure::storage::{ConfigStore, StoreError, WriteReport};

/// Why the quick path refused its arguments.
#[derive(Debug, Error)]
pub enum QuickError {
    #[error("missing <account> argument")]
    MissingAccount,

    #[error("missing <key> argument")]
    MissingSigningKey,

    #[error("invalid {field}: {source}")]
    Invalid {
        field: &'static str,
        source: ValidationError,
    },

    #[error("{field} must be a single line")]
    LineBreak { field: &'static str },

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl QuickError {
    /// Argument problems that warrant printing usage.
    pub fn is_usage(&self) -> bool {
        !matches!(self, QuickError::Store(_))
    }
}

/// Builds a record from `account key [interval] [nodes]`.
///
/// # Errors
///
/// [`QuickError::MissingAccount`] / [`QuickError::MissingSigningKey`] when a
/// required argument is absent or blank, [`QuickError::Invalid`] when it is
/// malformed, [`QuickError::LineBreak`] when the interval or node list spans
/// more than one line.
pub fn build_quick(args: &[String]) -> Result<ConfigurationRecord, QuickError> {
    let arg = |i: usize| args.get(i).map(|s| s.trim()).filter(|s| !s.is_empty());

    // Each value is rendered as one `KEY=value` line; a line break would let
    // the unchecked fields inject assignments for the validated ones.
    for (index, field) in [(2, "interval"), (3, "RPC node list")] {
        if arg(index).is_some_and(|v| v.contains(['\r', '\n'])) {
            return Err(QuickError::LineBreak { field });
        }
    }

    let account = normalize_account(arg(0).ok_or(QuickError::MissingAccount)?);
    let key = arg(1).ok_or(QuickError::MissingSigningKey)?;

    check_account(account).map_err(|source| QuickError::Invalid {
        field: "account",
        source,
    })?;
    check_signing_key(key).map_err(|source| QuickError::Invalid {
        field: "signing key",
        source,
    })?;

    let feed_interval = match arg(2) {
        None => FeedInterval::default(),
        Some(text) => FeedInterval::from_label(text).unwrap_or_else(|| {
            warn!(interval = text, "interval is not one of the menu values; writing it as given");
            FeedInterval::Custom(text.to_string())
        }),
    };
    let rpc_nodes = arg(3).and_then(RpcNodes::parse).unwrap_or_default();

    Ok(ConfigurationRecord {
        witness_account: account.to_string(),
        signing_key: key.to_string(),
        feed_interval,
        rpc_nodes,
    })
}

/// Builds the record and writes it to `store`.
///
/// # Errors
///
/// Any [`QuickError`]; nothing is written when the arguments are rejected.
pub fn run_quick(
    args: &[String],
    store: &ConfigStore,
) -> Result<(ConfigurationRecord, WriteReport), QuickError> {
    let record = build_quick(args)?;
    let report = store.write(&record)?;
    Ok((record, report))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
