//! Talking to the Perforce server
//!
//! - `P4Runner` - the one-operation capability the advisor depends on
//! - `P4Command` - runner that shells out to the `p4` client
//! - `ztag` - decoder for tagged command output
//! - `effective_access` - what the full table really grants a user or group

mod access;
mod command;
mod runner;
pub mod ztag;

#[cfg(test)]
pub(crate) mod fake;

pub use access::{effective_access, Principal};
pub use command::P4Command;
pub use runner::{error_record, is_error, record, P4Runner, Record, CODE_ERROR, CODE_FIELD, DATA_FIELD};
