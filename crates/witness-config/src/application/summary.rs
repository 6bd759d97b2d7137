//! Human-readable summaries of a record.  The signing key is always masked.

use witness_config_core::{mask_secret, ConfigurationRecord};

use crate::infrastructure::storage::WriteReport;

/// Lines describing `record`, shown before confirmation and after writing.
pub fn record_lines(record: &ConfigurationRecord) -> Vec<String> {
    vec![
        format!("  Witness account : @{}", record.witness_account),
        format!("  Signing key     : {}", mask_secret(&record.signing_key)),
        format!("  Feed interval   : {}", record.feed_interval),
        format!("  RPC nodes       : {}", record.rpc_nodes),
    ]
}

/// Lines reporting a completed write.
pub fn written_lines(record: &ConfigurationRecord, report: &WriteReport) -> Vec<String> {
    let mut lines = vec![format!("✓ Configuration saved to {}", report.path.display())];
    if let Some(backup) = &report.backup {
        lines.push(format!("  Previous configuration backed up to {}", backup.display()));
    }
    lines.extend(record_lines(record));
    lines
}
