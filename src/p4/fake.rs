//! In-memory runner for tests

use anyhow::Result;
use std::collections::HashMap;
use std::sync::Mutex;

use super::runner::{record, P4Runner, Record};

/// Answers p4 commands from canned responses and remembers what was asked
#[derive(Default)]
pub struct FakeRunner {
    responses: HashMap<Vec<String>, Vec<Record>>,
    failures: HashMap<Vec<String>, String>,
    calls: Mutex<Vec<Vec<String>>>,
}

fn key(args: &[&str]) -> Vec<String> {
    args.iter().map(|a| a.to_string()).collect()
}

impl FakeRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Respond to `args` with `records`
    pub fn on(mut self, args: &[&str], records: Vec<Record>) -> Self {
        self.responses.insert(key(args), records);
        self
    }

    /// Fail `args` as if p4 could not be run
    pub fn failing(mut self, args: &[&str], message: impl Into<String>) -> Self {
        self.failures.insert(key(args), message.into());
        self
    }

    /// `protects -M -u <user> <path>` answers `level`
    pub fn user_access(self, user: &str, path: &str, level: &str) -> Self {
        self.on(
            &["protects", "-M", "-u", user, path],
            vec![record([("permMax", level)])],
        )
    }

    /// `protects -M -g <group> <path>` answers `level`
    pub fn group_access(self, group: &str, path: &str, level: &str) -> Self {
        self.on(
            &["protects", "-M", "-g", group, path],
            vec![record([("permMax", level)])],
        )
    }

    /// `group -o` lists `owners`, each resolvable through `user -o`
    pub fn group_owners(mut self, group: &str, owners: &[(&str, &str, &str)]) -> Self {
        let mut spec = record([("Group", group)]);
        for (i, (user, full_name, email)) in owners.iter().enumerate() {
            spec.insert(format!("Owners{}", i), user.to_string());
            self = self.on(
                &["user", "-o", *user],
                vec![record([("User", *user), ("FullName", *full_name), ("Email", *email)])],
            );
        }
        self.on(&["group", "-o", group], vec![spec])
    }

    /// Every command run so far
    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl P4Runner for FakeRunner {
    async fn run(&self, args: &[&str]) -> Result<Vec<Record>> {
        let args = key(args);
        self.calls.lock().unwrap().push(args.clone());

        if let Some(message) = self.failures.get(&args) {
            return Err(anyhow::anyhow!("{}", message));
        }

        self.responses
            .get(&args)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("unexpected p4 command: {}", args.join(" ")))
    }
}
