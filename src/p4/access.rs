//! Effective access queries
//!
//! `p4 protects -M` reports the highest level the full table actually
//! grants a user or group at a path, exclusions included. The advisor
//! trusts this answer over its own reading of the table.

use super::runner::{is_error, P4Runner, DATA_FIELD};
use crate::core::{AccessError, AccessResult};
use crate::permissions::PermissionLevel;

/// Who an effective access query is about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Principal<'a> {
    User(&'a str),
    Group(&'a str),
}

impl<'a> Principal<'a> {
    fn flag(&self) -> &'static str {
        match self {
            Principal::User(_) => "-u",
            Principal::Group(_) => "-g",
        }
    }

    fn name(&self) -> &'a str {
        match self {
            Principal::User(name) | Principal::Group(name) => *name,
        }
    }
}

/// Highest permission `principal` holds at `path`
///
/// A response without `permMax` means no access at all.
pub async fn effective_access(
    runner: &dyn P4Runner,
    principal: Principal<'_>,
    path: &str,
) -> AccessResult<PermissionLevel> {
    let records = runner
        .run(&["protects", "-M", principal.flag(), principal.name(), path])
        .await
        .map_err(|e| {
            tracing::error!(
                "Failed to run protects for {:?} to path {}: {}",
                principal,
                path,
                e
            );
            AccessError::oracle(e)
        })?;

    // p4 may append stderr after good output, so any error record wins
    if let Some(error) = records.iter().find(|r| is_error(r)) {
        let data = error.get(DATA_FIELD).cloned().unwrap_or_default();
        return Err(AccessError::Oracle(data));
    }
    let Some(first) = records.first() else {
        return Ok(PermissionLevel::None);
    };

    let level = PermissionLevel::parse_or_none(first.get("permMax").map(String::as_str))?;
    tracing::debug!("{:?} has {} at {}", principal, level, path);
    Ok(level)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::p4::fake::FakeRunner;
    use crate::p4::{error_record, record};

    #[tokio::test]
    async fn test_user_access() {
        let runner = FakeRunner::new().user_access("usr", "//depot/path/afile", "super");
        let level = effective_access(&runner, Principal::User("usr"), "//depot/path/afile")
            .await
            .unwrap();
        assert_eq!(level, PermissionLevel::Super);
    }

    #[tokio::test]
    async fn test_group_access_uses_group_flag() {
        let runner = FakeRunner::new().group_access("devs", "//depot/...", "write");
        let level = effective_access(&runner, Principal::Group("devs"), "//depot/...")
            .await
            .unwrap();
        assert_eq!(level, PermissionLevel::Write);
        assert_eq!(
            runner.calls(),
            vec![vec!["protects", "-M", "-g", "devs", "//depot/..."]]
        );
    }

    #[tokio::test]
    async fn test_missing_perm_max_is_none() {
        let runner = FakeRunner::new()
            .on(&["protects", "-M", "-u", "usr", "//a/..."], vec![record([("x", "y")])])
            .on(&["protects", "-M", "-u", "usr", "//b/..."], vec![]);

        for path in ["//a/...", "//b/..."] {
            let level = effective_access(&runner, Principal::User("usr"), path).await.unwrap();
            assert_eq!(level, PermissionLevel::None);
        }
    }

    #[tokio::test]
    async fn test_error_record_is_oracle_error() {
        let runner = FakeRunner::new().on(
            &["protects", "-M", "-u", "usr", "//notreal/path/afile"],
            vec![error_record("//notreal/... - must refer to client 'NP-B-BATES'.")],
        );
        let err = effective_access(&runner, Principal::User("usr"), "//notreal/path/afile")
            .await
            .unwrap_err();
        assert!(matches!(err, AccessError::Oracle(_)));
    }

    #[tokio::test]
    async fn test_trailing_error_record_is_oracle_error() {
        let runner = FakeRunner::new().on(
            &["protects", "-M", "-g", "devs", "//depot/..."],
            vec![
                record([("permMax", "super")]),
                error_record("Protections table is empty."),
            ],
        );
        let err = effective_access(&runner, Principal::Group("devs"), "//depot/...")
            .await
            .unwrap_err();
        assert!(matches!(err, AccessError::Oracle(ref data) if data == "Protections table is empty."));
    }

    #[tokio::test]
    async fn test_runner_failure_is_oracle_error() {
        let runner = FakeRunner::new().failing(
            &["protects", "-M", "-u", "usr", "//depot/..."],
            "exit status 1",
        );
        let err = effective_access(&runner, Principal::User("usr"), "//depot/...")
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Access lookup failed: exit status 1");
    }

    #[tokio::test]
    async fn test_unknown_level() {
        let runner = FakeRunner::new().user_access("usr", "//depot/...", "owner");
        let err = effective_access(&runner, Principal::User("usr"), "//depot/...")
            .await
            .unwrap_err();
        assert!(matches!(err, AccessError::UnknownLevel(_)));
    }
}
