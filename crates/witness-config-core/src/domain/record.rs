//! The configuration record and its raw, unvalidated counterpart.
//!
//! [`ConfigurationRecord`] is what gets written to the store.
//! [`PartialConfigurationRecord`] is what gets *read* from a prior store: raw
//! text, possibly incomplete, possibly no longer valid.  It is only ever used
//! to offer defaults and is never written back as-is.

use std::fmt;

use super::interval::FeedInterval;

/// Endpoints used when the operator supplies none, in failover order.
pub const DEFAULT_RPC_NODES: [&str; 3] = [
    "https://api.hive.blog",
    "https://api.deathwing.me",
    "https://hive-api.arcange.eu",
];

/// Ordered list of RPC endpoint URLs; the first entry is tried first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RpcNodes(Vec<String>);

impl RpcNodes {
    /// Splits a comma-separated list, trimming entries and dropping empty ones.
    ///
    /// Returns `None` when no non-empty entry remains.  URLs are not checked.
    pub fn parse(text: &str) -> Option<Self> {
        let nodes: Vec<String> = text
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        if nodes.is_empty() {
            None
        } else {
            Some(Self(nodes))
        }
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Comma-joined textual form, as stored on disk.
    pub fn joined(&self) -> String {
        self.0.join(",")
    }
}

impl Default for RpcNodes {
    fn default() -> Self {
        Self(DEFAULT_RPC_NODES.iter().map(|s| s.to_string()).collect())
    }
}

impl fmt::Display for RpcNodes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.joined())
    }
}

/// A complete configuration, ready to be written.
#[derive(Clone, PartialEq, Eq)]
pub struct ConfigurationRecord {
    /// Witness account name, without a leading `@`.
    pub witness_account: String,
    /// WIF private signing key.
    pub signing_key: String,
    pub feed_interval: FeedInterval,
    pub rpc_nodes: RpcNodes,
}

impl ConfigurationRecord {
    /// The signing key in its displayable, masked form.
    pub fn masked_key(&self) -> String {
        mask_secret(&self.signing_key)
    }
}

// Hand-written so the signing key never reaches a log line.
impl fmt::Debug for ConfigurationRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigurationRecord")
            .field("witness_account", &self.witness_account)
            .field("signing_key", &self.masked_key())
            .field("feed_interval", &self.feed_interval)
            .field("rpc_nodes", &self.rpc_nodes)
            .finish()
    }
}

/// Raw values recovered from a prior store.  Any field may be missing.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct PartialConfigurationRecord {
    pub witness_account: Option<String>,
    pub signing_key: Option<String>,
    pub feed_interval: Option<String>,
    pub rpc_nodes: Option<String>,
}

impl PartialConfigurationRecord {
    /// `true` when no recognized key was found.
    pub fn is_empty(&self) -> bool {
        self.witness_account.is_none()
            && self.signing_key.is_none()
            && self.feed_interval.is_none()
            && self.rpc_nodes.is_none()
    }

    /// The previous signing key, if one was stored and non-empty.
    pub fn prior_key(&self) -> Option<&str> {
        self.signing_key.as_deref().filter(|k| !k.is_empty())
    }

    /// Rebuilds a full record when every field is present, without validating.
    ///
    /// Interval text that is not a menu label is kept as
    /// [`FeedInterval::Custom`].
    pub fn to_record(&self) -> Option<ConfigurationRecord> {
        let interval = self.feed_interval.as_deref()?;
        Some(ConfigurationRecord {
            witness_account: self.witness_account.clone()?,
            signing_key: self.signing_key.clone()?,
            feed_interval: FeedInterval::from_label(interval)
                .unwrap_or_else(|| FeedInterval::Custom(interval.to_string())),
            rpc_nodes: RpcNodes::parse(self.rpc_nodes.as_deref()?)?,
        })
    }
}

impl From<&ConfigurationRecord> for PartialConfigurationRecord {
    fn from(record: &ConfigurationRecord) -> Self {
        Self {
            witness_account: Some(record.witness_account.clone()),
            signing_key: Some(record.signing_key.clone()),
            feed_interval: Some(record.feed_interval.label().to_string()),
            rpc_nodes: Some(record.rpc_nodes.joined()),
        }
    }
}

impl fmt::Debug for PartialConfigurationRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PartialConfigurationRecord")
            .field("witness_account", &self.witness_account)
            .field("signing_key", &self.signing_key.as_deref().map(mask_secret))
            .field("feed_interval", &self.feed_interval)
            .field("rpc_nodes", &self.rpc_nodes)
            .finish()
    }
}

/// Shows the first and last four characters of a secret: `5Jb1...xYz9`.
///
/// Secrets shorter than eight characters are fully hidden as `****`.
pub fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() < 8 {
        return "****".to_string();
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}...{tail}")
}

// ── Tests ─────────────────────────────────────────────────────────────────────
