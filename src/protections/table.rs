//! Protections table parsing
//!
//! Turns the records of `p4 protects -a <path>` into [`Protection`] lines,
//! in table order.

use regex::Regex;
use serde::Serialize;

use crate::core::{AccessError, AccessResult};
use crate::p4::{is_error, P4Runner, Record, DATA_FIELD};
use crate::permissions::PermissionLevel;

/// Server message for a path outside every depot and client view
const NO_SUCH_AREA: &str = r"^(?s)(.*?) - must refer to client";

/// Number of non-empty `/` separated segments in a depot path
pub fn specificity(path: &str) -> usize {
    path.split('/').filter(|s| !s.is_empty()).count()
}

/// One line of a protections table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Protection {
    permission: PermissionLevel,
    host: String,
    principal: String,
    is_group: bool,
    line: u32,
    path: String,
    unmapped: bool,
    specificity: usize,
}

impl Protection {
    /// Create a protection granting `permission` on `path` to a user
    pub fn new(
        permission: PermissionLevel,
        principal: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        let path = path.into();
        Self {
            permission,
            host: "*".to_string(),
            principal: principal.into(),
            is_group: false,
            line: 0,
            specificity: specificity(&path),
            path,
            unmapped: false,
        }
    }

    /// Mark the principal as a group
    pub fn group(mut self) -> Self {
        self.is_group = true;
        self
    }

    /// Mark this line as an exclusion
    pub fn unmap(mut self) -> Self {
        self.unmapped = true;
        self
    }

    /// Set the host restriction
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Set the 1-based table line
    pub fn with_line(mut self, line: u32) -> Self {
        self.line = line;
        self
    }

    fn from_record(record: &Record) -> AccessResult<Self> {
        let field = |name: &str| record.get(name).cloned().unwrap_or_default();

        let permission = PermissionLevel::parse_or_none(record.get("perm").map(String::as_str))?;
        let line = match record.get("line") {
            Some(v) => v.trim().parse::<u32>().map_err(|_| {
                AccessError::MalformedRecord(format!("line '{}' is not a number", v))
            })?,
            None => 0,
        };

        let mut prot = Protection::new(permission, field("user"), field("depotFile"))
            .with_host(field("host"))
            .with_line(line);
        prot.is_group = record.contains_key("isgroup");
        prot.unmapped = record.contains_key("unmap");
        Ok(prot)
    }

    pub fn permission(&self) -> PermissionLevel {
        self.permission
    }

    /// User or group the line applies to
    pub fn principal(&self) -> &str {
        &self.principal
    }

    pub fn is_group(&self) -> bool {
        self.is_group
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Whether this line takes access away instead of granting it
    pub fn is_unmapped(&self) -> bool {
        self.unmapped
    }

    pub fn specificity(&self) -> usize {
        self.specificity
    }

    /// Whether this line hands out access to a group
    pub fn grants_to_group(&self) -> bool {
        self.is_group && !self.unmapped
    }
}

/// An ordered protections table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Protections(Vec<Protection>);

impl Protections {
    /// Fetch and parse the table that applies to `path`
    pub async fn fetch(runner: &dyn P4Runner, path: &str) -> AccessResult<Self> {
        let records = runner
            .run(&["protects", "-a", path])
            .await
            .map_err(|e| {
                tracing::error!("Failed to get protects for {}: {}", path, e);
                AccessError::TableFetch(e.to_string())
            })?;

        let prots = Self::parse(&records)?;
        if prots.is_empty() {
            tracing::warn!("No protections apply to {}", path);
        }
        tracing::info!("Loaded {} protections for {}", prots.len(), path);
        Ok(prots)
    }

    /// Parse raw records, stopping at the first error record
    pub fn parse(records: &[Record]) -> AccessResult<Self> {
        let mut prots = Vec::with_capacity(records.len());
        for record in records {
            if is_error(record) {
                return Err(parse_error(record)?);
            }
            prots.push(Protection::from_record(record)?);
        }
        Ok(Self(prots))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Protection> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Protection] {
        &self.0
    }
}

impl From<Vec<Protection>> for Protections {
    fn from(prots: Vec<Protection>) -> Self {
        Self(prots)
    }
}

/// Turn an error record into the error it describes
fn parse_error(record: &Record) -> AccessResult<AccessError> {
    let Some(data) = record.get(DATA_FIELD) else {
        return Ok(AccessError::TableFetch(format!(
            "error record without data: {:?}",
            record
        )));
    };

    let no_such_area = Regex::new(NO_SUCH_AREA)
        .map_err(|e| AccessError::TableFetch(format!("bad error pattern: {}", e)))?;
    if let Some(caps) = no_such_area.captures(data) {
        let path = caps.get(1).map(|m| m.as_str().trim()).unwrap_or_default();
        return Ok(AccessError::PathNotFound(path.to_string()));
    }

    Ok(AccessError::TableFetch(format!("Unknown error, {}", data)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::p4::fake::FakeRunner;
    use crate::p4::{error_record, record};

    #[test]
    fn test_specificity() {
        assert_eq!(specificity("//..."), 1);
        assert_eq!(specificity("//depot/..."), 2);
        assert_eq!(specificity("//depot/path/to/afile"), 4);
        assert_eq!(specificity(""), 0);
    }

    #[test]
    fn test_parse_user_line() {
        let records = vec![record([
            ("perm", "super"),
            ("host", "host"),
            ("user", "user"),
            ("line", "1"),
            ("depotFile", "//..."),
        ])];

        let prots = Protections::parse(&records).unwrap();
        assert_eq!(
            prots,
            Protections::from(vec![Protection::new(PermissionLevel::Super, "user", "//...")
                .with_host("host")
                .with_line(1)])
        );
        let prot = &prots.as_slice()[0];
        assert!(!prot.is_group());
        assert!(!prot.is_unmapped());
        assert_eq!(prot.specificity(), 1);

        // host is only carried through to the logged advice
        let json = serde_json::to_value(prot).unwrap();
        assert_eq!(json["host"], "host");
    }

    #[test]
    fn test_parse_group_flag() {
        let records = vec![record([
            ("perm", "super"),
            ("host", "host"),
            ("user", "grp"),
            ("isgroup", ""),
            ("line", "1"),
            ("depotFile", "//..."),
        ])];

        let prots = Protections::parse(&records).unwrap();
        assert!(prots.as_slice()[0].is_group());
        assert!(prots.as_slice()[0].grants_to_group());
    }

    #[test]
    fn test_parse_keeps_order_and_unmap() {
        let records = vec![
            record([
                ("perm", "super"),
                ("host", "host"),
                ("user", "user"),
                ("line", "1"),
                ("depotFile", "//..."),
            ]),
            record([
                ("perm", "list"),
                ("host", "*"),
                ("unmap", ""),
                ("user", "user"),
                ("line", "2"),
                ("depotFile", "//depot/..."),
            ]),
        ];

        let prots = Protections::parse(&records).unwrap();
        let lines: Vec<u32> = prots.iter().map(|p| p.line()).collect();
        assert_eq!(lines, vec![1, 2]);
        assert!(!prots.as_slice()[0].is_unmapped());
        assert!(prots.as_slice()[1].is_unmapped());
        assert_eq!(prots.as_slice()[1].specificity(), 2);
    }

    #[test]
    fn test_missing_fields_default() {
        let prots = Protections::parse(&[record([("user", "bob")])]).unwrap();
        let prot = &prots.as_slice()[0];
        assert_eq!(prot.permission(), PermissionLevel::None);
        assert_eq!(prot.line(), 0);
        assert_eq!(prot.path(), "");
        assert_eq!(prot.specificity(), 0);
    }

    #[test]
    fn test_unknown_level_rejected() {
        let err = Protections::parse(&[record([("perm", "owner"), ("line", "1")])]).unwrap_err();
        assert!(matches!(err, AccessError::UnknownLevel(ref l) if l == "owner"));
    }

    #[test]
    fn test_bad_line_rejected() {
        let err = Protections::parse(&[record([("perm", "read"), ("line", "x")])]).unwrap_err();
        assert!(matches!(err, AccessError::MalformedRecord(_)));
    }

    #[test]
    fn test_no_such_area() {
        let records = vec![error_record("//notreal/... - must refer to client 'NP-B-BATES'.")];
        let err = Protections::parse(&records).unwrap_err();
        assert!(matches!(err, AccessError::PathNotFound(ref p) if p == "//notreal/..."));
        assert_eq!(
            err.to_string(),
            "No such area '//notreal/...', please check your path"
        );
    }

    #[test]
    fn test_error_record_short_circuits() {
        let records = vec![
            record([("perm", "read"), ("line", "1"), ("depotFile", "//...")]),
            error_record("Perforce password (P4PASSWD) invalid or unset."),
            record([("perm", "bogus")]),
        ];
        let err = Protections::parse(&records).unwrap_err();
        assert!(matches!(err, AccessError::TableFetch(ref m) if m.contains("P4PASSWD")));
    }

    #[tokio::test]
    async fn test_fetch() {
        let runner = FakeRunner::new().on(
            &["protects", "-a", "//depot/path/afile.txt"],
            vec![record([
                ("perm", "write"),
                ("host", "*"),
                ("user", "devs"),
                ("isgroup", ""),
                ("line", "1"),
                ("depotFile", "//depot/..."),
            ])],
        );

        let prots = Protections::fetch(&runner, "//depot/path/afile.txt").await.unwrap();
        assert_eq!(prots.len(), 1);
        assert_eq!(prots.as_slice()[0].principal(), "devs");
    }

    #[tokio::test]
    async fn test_fetch_empty_table() {
        let runner = FakeRunner::new().on(&["protects", "-a", "//depot/..."], vec![]);

        let prots = Protections::fetch(&runner, "//depot/...").await.unwrap();
        assert!(prots.is_empty());
        assert_eq!(prots.len(), 0);
    }

    #[tokio::test]
    async fn test_fetch_failure() {
        let runner = FakeRunner::new().failing(
            &["protects", "-a", "//depot/..."],
            "connect to server failed",
        );

        let err = Protections::fetch(&runner, "//depot/...").await.unwrap_err();
        assert!(matches!(err, AccessError::TableFetch(ref m) if m == "connect to server failed"));
    }
}
