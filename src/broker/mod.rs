//! p4broker filter glue
//!
//! - `input` - read the intercepted `p4 access` command from stdin
//! - `output` - write the RESPOND / REJECT reply to stdout

pub mod input;
pub mod output;

pub use input::TriggerArgs;
pub use output::{reject, respond};
