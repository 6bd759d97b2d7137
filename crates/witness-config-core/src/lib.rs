//! # witness-config-core
//!
//! Pure building blocks for provisioning the witness feed-price bot: the
//! configuration record, its validation rules, the text format of the
//! persisted store, and the interactive prompt flow as a state machine.
//!
//! Nothing here reads the terminal or touches the file system; the
//! `witness-config` crate wires these pieces to real I/O.
//!
//! - **`domain`** – [`ConfigurationRecord`], [`FeedInterval`], [`RpcNodes`]
//!   and the account / signing key rules.
//! - **`format`** – [`render`] and [`parse`] for the `KEY=value` store file.
//! - **`prompt`** – the `Account → SigningKey → Interval → RpcNodes → Confirm`
//!   state machine and its [`Session`] driver.

pub mod domain;
pub mod format;
pub mod prompt;

pub use domain::interval::FeedInterval;
pub use domain::record::{mask_secret, ConfigurationRecord, PartialConfigurationRecord, RpcNodes};
pub use domain::validation::{
    check_account, check_signing_key, is_valid_account, is_valid_signing_key, normalize_account,
    ValidationError,
};
pub use format::{parse, render};
pub use prompt::{Defaults, InputError, Progress, Session, Step};
