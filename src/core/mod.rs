//! Core types shared by the advisory engine
//!
//! - `AccessError` / `AccessResult` - Error types

pub mod error;

pub use error::{AccessError, AccessResult};
