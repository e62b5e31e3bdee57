//! Protections table handling
//!
//! - `Protections::fetch` / `Protections::parse` - read `p4 protects -a`
//! - `Protections::filter` - group lines that really grant the request
//! - `sort` - order candidates by path specificity

mod filter;
pub mod sort;
mod table;

pub use table::{specificity, Protection, Protections};
