//! Infrastructure layer: everything that touches the terminal or the disk.
//!
//! - **`console`**      – operator input/output, with a scripted mock.
//! - **`storage`**      – reading, backing up and replacing the store file.
//! - **`wallet_state`** – removing the runtime's stale wallet directory.

pub mod console;
pub mod storage;
pub mod wallet_state;
