//! On-disk text format of the configuration store.

pub mod env_file;

pub use env_file::{parse, render};
