//! Requested access and the rule levels that can satisfy it

use serde::Serialize;
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use super::level::PermissionLevel;
use crate::core::AccessError;

/// Access a user can ask for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessRequest {
    Read,
    Write,
}

impl AccessRequest {
    /// The permission level the user needs to end up with
    pub fn level(self) -> PermissionLevel {
        match self {
            AccessRequest::Read => PermissionLevel::Read,
            AccessRequest::Write => PermissionLevel::Write,
        }
    }

    /// Rule levels worth recommending for this request
    ///
    /// Read is satisfied by a `read` or `open` rule. Write only by an exact
    /// `write` rule: `admin` and `super` rules are never suggested.
    pub fn acceptable(self) -> RangeInclusive<PermissionLevel> {
        match self {
            AccessRequest::Read => PermissionLevel::Read..=PermissionLevel::Open,
            AccessRequest::Write => PermissionLevel::Write..=PermissionLevel::Write,
        }
    }

    /// Whether a rule at `level` falls in the acceptable range
    pub fn accepts(self, level: PermissionLevel) -> bool {
        self.acceptable().contains(&level)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AccessRequest::Read => "read",
            AccessRequest::Write => "write",
        }
    }
}

impl FromStr for AccessRequest {
    type Err = AccessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "read" => Ok(AccessRequest::Read),
            "write" => Ok(AccessRequest::Write),
            other => Err(AccessError::InvalidRequest(other.to_string())),
        }
    }
}

impl fmt::Display for AccessRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
