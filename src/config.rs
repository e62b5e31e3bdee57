//! Configuration
//!
//! Read from `P4ACCESS_*` environment variables. Connection settings left
//! empty are not passed to `p4`, which then falls back on its own
//! environment and P4CONFIG files.

use std::path::PathBuf;

use crate::core::{AccessError, AccessResult};

/// Prefix for every environment variable we read
pub const ENV_PREFIX: &str = "P4ACCESS_";

/// Runtime configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Server address (P4ACCESS_P4PORT)
    pub p4_port: String,

    /// User to query as (P4ACCESS_P4USER)
    pub p4_user: String,

    /// Client workspace (P4ACCESS_P4CLIENT)
    pub p4_client: String,

    /// Client binary (P4ACCESS_P4BIN)
    pub p4_bin: String,

    /// Log file (P4ACCESS_LOG)
    pub log_file: PathBuf,

    /// Show underlying errors to users (P4ACCESS_LEAK)
    pub leak: bool,
}

fn default_p4_bin() -> String {
    "p4".to_string()
}

fn default_log_file() -> PathBuf {
    PathBuf::from("output.log")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            p4_port: String::new(),
            p4_user: String::new(),
            p4_client: String::new(),
            p4_bin: default_p4_bin(),
            log_file: default_log_file(),
            leak: false,
        }
    }
}

impl Config {
    /// Load from the process environment
    pub fn from_env() -> AccessResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using `lookup` to resolve full variable names
    pub fn from_lookup<F>(lookup: F) -> AccessResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(&format!("{}{}", ENV_PREFIX, name));
        let mut config = Self::default();

        if let Some(v) = get("P4PORT") {
            config.p4_port = v;
        }
        if let Some(v) = get("P4USER") {
            config.p4_user = v;
        }
        if let Some(v) = get("P4CLIENT") {
            config.p4_client = v;
        }
        if let Some(v) = get("P4BIN").filter(|v| !v.is_empty()) {
            config.p4_bin = v;
        }
        if let Some(v) = get("LOG").filter(|v| !v.is_empty()) {
            config.log_file = PathBuf::from(v);
        }
        if let Some(v) = get("LEAK") {
            config.leak = parse_bool(&v)
                .ok_or_else(|| AccessError::Config(format!("{}LEAK: '{}' is not a boolean", ENV_PREFIX, v)))?;
        }

        Ok(config)
    }

    /// Set the server address
    pub fn with_port(mut self, port: impl Into<String>) -> Self {
        self.p4_port = port.into();
        self
    }

    /// Set the user to query as
    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.p4_user = user.into();
        self
    }

    /// Set the client workspace
    pub fn with_client(mut self, client: impl Into<String>) -> Self {
        self.p4_client = client.into();
        self
    }

    /// Set the log file
    pub fn with_log_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_file = path.into();
        self
    }

    /// Set whether users see underlying errors
    pub fn with_leak(mut self, leak: bool) -> Self {
        self.leak = leak;
        self
    }
}

fn parse_bool(v: &str) -> Option<bool> {
    match v.trim().to_ascii_lowercase().as_str() {
        "1" | "t" | "true" | "yes" | "on" => Some(true),
        "0" | "f" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}
