//! Well-formedness rules for witness account names and WIF signing keys.
//!
//! Both checks are pure string inspections: no normalization, no I/O, no
//! cryptography.  A key that passes [`check_signing_key`] is only *shaped*
//! like a WIF private key; its checksum is never verified here.
//!
//! # Account names
//!
//! ```text
//! 3..=16 chars, [a-z0-9.-]
//! first char:  a-z
//! last char:   a-z or 0-9
//! never "..", never "--"
//! ```
//!
//! # Signing keys
//!
//! ```text
//! 51 chars: '5' + one of {H, J, K} + 49 base58 chars
//! base58 = 1-9, A-Z without I/O, a-z without l
//! ```

use thiserror::Error;

/// Minimum account name length in characters.
pub const ACCOUNT_MIN_LEN: usize = 3;
/// Maximum account name length in characters.
pub const ACCOUNT_MAX_LEN: usize = 16;
/// Exact length of a WIF-encoded signing key.
pub const SIGNING_KEY_LEN: usize = 51;

/// Base58 alphabet used by WIF keys (no `0`, `O`, `I`, `l`).
const BASE58_ALPHABET: &str = "123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

/// The specific rule an account name or signing key violates.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("account name must be {ACCOUNT_MIN_LEN}-{ACCOUNT_MAX_LEN} characters long (got {0})")]
    AccountLength(usize),

    #[error("account name may only contain lowercase letters, digits, '.' and '-' (found {0:?})")]
    AccountCharacter(char),

    #[error("account name must start with a lowercase letter")]
    AccountStart,

    #[error("account name must end with a lowercase letter or digit")]
    AccountEnd,

    #[error("account name must not contain \"..\" or \"--\"")]
    AccountRepeatedSeparator,

    #[error("signing key must be exactly {SIGNING_KEY_LEN} characters long (got {0})")]
    KeyLength(usize),

    #[error("signing key must start with 5H, 5J or 5K")]
    KeyPrefix,

    #[error("signing key contains a character outside the base58 alphabet ({0:?})")]
    KeyCharacter(char),
}

/// Returns `true` iff `s` is a well-formed witness account name.
///
/// Case-sensitive; a leading `@` is *not* stripped here (see
/// [`normalize_account`]).
pub fn is_valid_account(s: &str) -> bool {
    check_account(s).is_ok()
}

/// Returns `true` iff `s` is shaped like a 51-character WIF private key.
pub fn is_valid_signing_key(s: &str) -> bool {
    check_signing_key(s).is_ok()
}

/// Checks `s` against the account rules and reports the first violation.
///
/// # Errors
///
/// Returns the [`ValidationError`] describing the first rule that failed.
pub fn check_account(s: &str) -> Result<(), ValidationError> {
    let len = s.chars().count();
    if !(ACCOUNT_MIN_LEN..=ACCOUNT_MAX_LEN).contains(&len) {
        return Err(ValidationError::AccountLength(len));
    }

    if let Some(bad) = s
        .chars()
        .find(|c| !(c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '.' || *c == '-'))
    {
        return Err(ValidationError::AccountCharacter(bad));
    }

    // Past the charset check every char is ASCII, so byte indexing is safe.
    let bytes = s.as_bytes();
    if !bytes[0].is_ascii_lowercase() {
        return Err(ValidationError::AccountStart);
    }
    let last = bytes[bytes.len() - 1];
    if !(last.is_ascii_lowercase() || last.is_ascii_digit()) {
        return Err(ValidationError::AccountEnd);
    }

    if s.contains("..") || s.contains("--") {
        return Err(ValidationError::AccountRepeatedSeparator);
    }

    Ok(())
}

/// Checks `s` against the WIF key shape and reports the first violation.
///
/// # Errors
///
/// Returns the [`ValidationError`] describing the first rule that failed.
pub fn check_signing_key(s: &str) -> Result<(), ValidationError> {
    let len = s.chars().count();
    if len != SIGNING_KEY_LEN {
        return Err(ValidationError::KeyLength(len));
    }

    let mut chars = s.chars();
    let prefix_ok = chars.next() == Some('5') && matches!(chars.next(), Some('H' | 'J' | 'K'));
    if !prefix_ok {
        return Err(ValidationError::KeyPrefix);
    }

    if let Some(bad) = chars.find(|c| !BASE58_ALPHABET.contains(*c)) {
        return Err(ValidationError::KeyCharacter(bad));
    }

    Ok(())
}

/// Trims surrounding whitespace and strips a single leading `@`.
///
/// Operators often paste the account as `@name`; both forms are accepted.
pub fn normalize_account(input: &str) -> &str {
    let trimmed = input.trim();
    trimmed.strip_prefix('@').unwrap_or(trimmed)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
