//! Group advice for users missing access
//!
//! ## Example
//!
//! ```rust,ignore
//! use p4access::advisor::Advisor;
//! use p4access::p4::P4Command;
//! use std::sync::Arc;
//!
//! let advisor = Advisor::new(Arc::new(P4Command::new()));
//! let advice = advisor.advise_path("bob", "//depot/project/...", "write").await?;
//! for candidate in &advice.candidates {
//!     println!("{} ({} owners)", candidate.group(), candidate.owners.len());
//! }
//! ```

mod advice;
mod owners;

pub use advice::{Advice, Advisor, Candidate};
pub use owners::{resolve_owners, resolve_user, Owner, OwnerNames};
