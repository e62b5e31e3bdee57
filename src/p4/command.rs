//! Runner backed by the `p4` command line client
//!
//! Commands run with `-ztag` so output comes back as tagged text that
//! [`super::ztag`] can decode. Nothing is cached between calls.

use anyhow::{Context, Result};
use async_trait::async_trait;
use std::process::Stdio;
use tokio::process::Command;

use super::runner::{error_record, P4Runner, Record};
use super::ztag;
use crate::config::Config;

/// Default client binary
const DEFAULT_P4_BIN: &str = "p4";

/// Runs p4 commands as child processes
#[derive(Debug, Clone)]
pub struct P4Command {
    /// Client binary to execute
    bin: String,
    /// Server address (P4PORT), empty to inherit
    port: String,
    /// User to run as (P4USER), empty to inherit
    user: String,
    /// Client workspace (P4CLIENT), empty to inherit
    client: String,
}

impl P4Command {
    /// Create a runner that inherits connection settings from the p4 environment
    pub fn new() -> Self {
        Self {
            bin: DEFAULT_P4_BIN.to_string(),
            port: String::new(),
            user: String::new(),
            client: String::new(),
        }
    }

    /// Create a runner from configuration
    pub fn from_config(config: &Config) -> Self {
        Self {
            bin: config.p4_bin.clone(),
            port: config.p4_port.clone(),
            user: config.p4_user.clone(),
            client: config.p4_client.clone(),
        }
    }

    /// Set the client binary
    pub fn with_bin(mut self, bin: impl Into<String>) -> Self {
        self.bin = bin.into();
        self
    }

    /// Global flags plus `-ztag` plus the command itself
    fn command_line(&self, args: &[&str]) -> Vec<String> {
        let mut line = Vec::new();
        for (flag, value) in [("-p", &self.port), ("-u", &self.user), ("-c", &self.client)] {
            if !value.is_empty() {
                line.push(flag.to_string());
                line.push(value.clone());
            }
        }
        line.push("-ztag".to_string());
        line.extend(args.iter().map(|a| a.to_string()));
        line
    }
}

impl Default for P4Command {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl P4Runner for P4Command {
    async fn run(&self, args: &[&str]) -> Result<Vec<Record>> {
        let line = self.command_line(args);
        tracing::debug!("Executing: {} {}", self.bin, line.join(" "));

        let output = Command::new(&self.bin)
            .args(&line)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .with_context(|| format!("Failed to run {} {}", self.bin, args.join(" ")))?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);

        let mut records = ztag::parse(&stdout);

        // Server errors land on stderr; surface them as error records
        let stderr = stderr.trim();
        if !stderr.is_empty() {
            records.push(error_record(stderr));
        } else if !output.status.success() {
            records.push(error_record(format!(
                "{} exited with {}",
                self.bin, output.status
            )));
        }

        tracing::debug!("{} returned {} records", args.join(" "), records.len());

        Ok(records)
    }
}
