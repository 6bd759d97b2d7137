//! Text format of the persisted configuration store.
//!
//! Line-oriented `KEY=value` assignments with a canonical comment header:
//! ```text
//! # ...header...
//! HIVE_WITNESS_ACCOUNT=alice
//! HIVE_SIGNING_PRIVATE_KEY=5J...
//! HIVE_RPC_NODES=https://a,https://b
//! FEED_INTERVAL=10min
//! ```
//!
//! [`render`] is the single place that knows this layout; [`parse`] is its
//! tolerant inverse.  Anything the parser does not recognize is dropped, so a
//! re-render never preserves foreign content from a prior file.

use tracing::trace;

use crate::domain::record::{ConfigurationRecord, PartialConfigurationRecord};

/// Store key holding the witness account name.
pub const KEY_ACCOUNT: &str = "HIVE_WITNESS_ACCOUNT";
/// Store key holding the WIF signing key.
pub const KEY_SIGNING_KEY: &str = "HIVE_SIGNING_PRIVATE_KEY";
/// Store key holding the comma-separated RPC node list.
pub const KEY_RPC_NODES: &str = "HIVE_RPC_NODES";
/// Store key holding the feed interval label.
pub const KEY_FEED_INTERVAL: &str = "FEED_INTERVAL";

/// Renders `record` as the complete store file contents.
pub fn render(record: &ConfigurationRecord) -> String {
    format!(
        "\
# Witness feed-price bot configuration
# Generated by witness-config. Re-run it to change these values;
# manual edits are replaced on the next run.

# ── Witness identity ──────────────────────────────────────────────
# Account the feed is published for (no leading @).
{KEY_ACCOUNT}={account}

# Private signing key (WIF). Keep this file readable by its owner only.
{KEY_SIGNING_KEY}={key}

# ── Network ───────────────────────────────────────────────────────
# RPC endpoints in failover order, comma-separated.
{KEY_RPC_NODES}={nodes}

# ── Schedule ──────────────────────────────────────────────────────
# One of: 3min, 10min, 30min, 1hour, 6hour
{KEY_FEED_INTERVAL}={interval}
",
        account = record.witness_account,
        key = record.signing_key,
        nodes = record.rpc_nodes.joined(),
        interval = record.feed_interval.label(),
    )
}

/// Extracts the four recognized keys from store text.
///
/// Tolerates comments, blank lines, unknown keys, lines without `=`, an
/// `export ` prefix, whitespace around keys and values, and one pair of
/// matching surrounding quotes.  When a key repeats, the last value wins.
/// Values are returned raw and unvalidated.
pub fn parse(text: &str) -> PartialConfigurationRecord {
    let mut partial = PartialConfigurationRecord::default();

    for (number, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let line = line.strip_prefix("export ").unwrap_or(line);
        let Some((key, value)) = line.split_once('=') else {
            trace!(line = number + 1, "skipping store line without '='");
            continue;
        };
        let value = unquote(value.trim()).to_string();

        let slot = match key.trim() {
            KEY_ACCOUNT => &mut partial.witness_account,
            KEY_SIGNING_KEY => &mut partial.signing_key,
            KEY_RPC_NODES => &mut partial.rpc_nodes,
            KEY_FEED_INTERVAL => &mut partial.feed_interval,
            other => {
                trace!(line = number + 1, key = other, "ignoring unrecognized store key");
                continue;
            }
        };
        *slot = Some(value);
    }

    partial
}

/// Strips one pair of matching single or double quotes.
fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}

// ── Tests ─────────────────────────────────────────────────────────────────────
