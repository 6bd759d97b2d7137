//! witness-config library crate.
//!
//! Collects, validates and persists the settings the witness feed-price bot
//! runs with: witness account, signing key, feed interval and RPC nodes.
//!
//! # Architecture
//!
//! ```text
//! main.rs ──► cli          parse flags, pick a path, map to an exit code
//!               │
//!               ▼
//!         application/    interactive · quick · key_rotation · summary
//!               │
//!               ▼
//!         infrastructure/ console · storage · wallet_state
//!
//! witness-config-core     validation · record · store format · prompt machine
//! ```
//!
//! # Layer rules
//!
//! - `witness-config-core` has no I/O at all.
//! - `application` uses the infrastructure types it is handed and never
//!   reads the terminal directly, so tests drive it with `ScriptedConsole`.
//! - `infrastructure` owns every file-system and terminal call.

/// Application layer: acquisition paths and the post-write hook.
pub mod application;

/// Command-line parsing and dispatch.
pub mod cli;

/// Infrastructure layer: console, store file and wallet state.
pub mod infrastructure;
