//! Persistence: the program-state save file.
//!
//! # Invariants
//! - Fields are written one scalar per line in a fixed order.
//! - Loading never fails on short or damaged content; unread fields keep
//!   their current values.

pub mod codec;
pub mod store;

pub use codec::{decode_into, encode, DecodeReport, FIELD_COUNT};
pub use store::{PersistError, StateFile, DEFAULT_STATE_PATH, STATE_FILE_NAME};
