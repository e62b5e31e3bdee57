//! Permission levels as reported by `p4 protects`
//!
//! Ranks follow the server's native bit values. Only their relative order
//! matters here, so gaps between ranks are fine.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::core::{AccessError, AccessResult};

/// A named permission level from the protections table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionLevel {
    /// Grants no access
    None,
    /// Grants list access
    List,
    /// Grants read access
    Read,
    /// Grants ability to branch/integ from, used with unmaps
    Branch,
    /// Grants open access
    Open,
    /// Grants write access
    Write,
    /// Grants review access
    Review,
    /// Grants admin access
    Admin,
    /// Grants super-user access
    Super,
}

/// Every level, lowest first
const LEVELS: [PermissionLevel; 9] = [
    PermissionLevel::None,
    PermissionLevel::List,
    PermissionLevel::Read,
    PermissionLevel::Branch,
    PermissionLevel::Open,
    PermissionLevel::Write,
    PermissionLevel::Review,
    PermissionLevel::Admin,
    PermissionLevel::Super,
];

impl PermissionLevel {
    /// Numeric rank used for comparisons
    pub fn rank(self) -> u8 {
        match self {
            PermissionLevel::None => 0x00,
            PermissionLevel::List => 0x01,
            PermissionLevel::Read => 0x02,
            PermissionLevel::Branch => 0x04,
            PermissionLevel::Open => 0x08,
            PermissionLevel::Write => 0x10,
            PermissionLevel::Review => 0x20,
            PermissionLevel::Admin => 0x40,
            PermissionLevel::Super => 0x80,
        }
    }

    /// Name as printed by the server
    pub fn name(self) -> &'static str {
        match self {
            PermissionLevel::None => "none",
            PermissionLevel::List => "list",
            PermissionLevel::Read => "read",
            PermissionLevel::Branch => "branch",
            PermissionLevel::Open => "open",
            PermissionLevel::Write => "write",
            PermissionLevel::Review => "review",
            PermissionLevel::Admin => "admin",
            PermissionLevel::Super => "super",
        }
    }

    /// Parse an optional field, treating an absent level as `none`
    pub fn parse_or_none(name: Option<&str>) -> AccessResult<Self> {
        match name {
            Some(name) => name.parse(),
            None => Ok(PermissionLevel::None),
        }
    }

    /// Check if this level grants at least the required level
    pub fn satisfies(self, required: PermissionLevel) -> bool {
        self.rank() >= required.rank()
    }
}

/// Rank of a named level, failing for names outside the known set
pub fn rank(name: &str) -> AccessResult<u8> {
    name.parse::<PermissionLevel>().map(PermissionLevel::rank)
}

impl FromStr for PermissionLevel {
    type Err = AccessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LEVELS
            .into_iter()
            .find(|level| level.name() == s)
            .ok_or_else(|| AccessError::UnknownLevel(s.to_string()))
    }
}

impl PartialOrd for PermissionLevel {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PermissionLevel {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.rank().cmp(&other.rank())
    }
}

impl fmt::Display for PermissionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
