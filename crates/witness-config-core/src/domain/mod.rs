//! Domain layer: the configuration record and the rules it must satisfy.
//!
//! Nothing in here touches the file system or the terminal.
//!
//! - **`validation`** – account name and signing key well-formedness.
//! - **`interval`**   – the five publishing intervals and their menu numbers.
//! - **`record`**     – the complete record, the raw prior record, RPC node
//!   lists and secret masking.

pub mod interval;
pub mod record;
pub mod validation;
