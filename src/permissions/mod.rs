//! Permission levels and requested access
//!
//! `PermissionLevel` is the fixed ranking of levels the server reports:
//! none < list < read < branch < open < write < review < admin < super.
//! `AccessRequest` is what a user asks for (read or write) and knows which
//! rule levels are worth recommending for it.
//!
//! ## Example
//!
//! ```rust
//! use p4access::permissions::{AccessRequest, PermissionLevel};
//!
//! let req: AccessRequest = "read".parse().unwrap();
//! assert!(req.accepts(PermissionLevel::Open));
//! assert!(!req.accepts(PermissionLevel::Write));
//! ```

mod level;
mod request;

pub use level::{rank, PermissionLevel};
pub use request::AccessRequest;
