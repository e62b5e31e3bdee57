pub mod core;
pub mod permissions;
pub mod protections;
pub mod advisor;

// Server access
pub mod p4;

// Filter program plumbing
pub mod broker;
pub mod config;
pub mod logging;
