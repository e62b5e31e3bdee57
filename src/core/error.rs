//! Advisory error types

use thiserror::Error;

/// Errors that can occur while producing an access advisory
#[derive(Error, Debug)]
pub enum AccessError {
    /// Requested access level is neither read nor write
    #[error("Must request either read or write access, got '{0}'")]
    InvalidRequest(String),

    /// A table or oracle response named a permission level we don't know
    #[error("Unknown permission level: {0}")]
    UnknownLevel(String),

    /// The protections table could not be retrieved
    #[error("Failed to get protections: {0}")]
    TableFetch(String),

    /// The queried path does not map to any known area
    #[error("No such area '{0}', please check your path")]
    PathNotFound(String),

    /// Filtering left no group worth recommending
    #[error("No matching groups found, try again with a more specific path")]
    NoMatchingGroup,

    /// Effective access lookup failed
    #[error("Access lookup failed: {0}")]
    Oracle(String),

    /// Group or user lookup failed
    #[error("Owner lookup failed: {0}")]
    Resolver(String),

    /// A protections record carried a field we couldn't parse
    #[error("Malformed protections record: {0}")]
    MalformedRecord(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Trigger input from the broker was incomplete
    #[error("Invalid broker input: {0}")]
    BrokerInput(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AccessError {
    /// Wrap an effective access lookup failure
    pub fn oracle(err: impl std::fmt::Display) -> Self {
        AccessError::Oracle(err.to_string())
    }

    /// Wrap an owner lookup failure
    pub fn resolver(err: impl std::fmt::Display) -> Self {
        AccessError::Resolver(err.to_string())
    }

    /// Whether the message is meant for the requesting user rather than an admin
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            AccessError::InvalidRequest(_)
                | AccessError::PathNotFound(_)
                | AccessError::NoMatchingGroup
        )
    }
}

/// Result type alias for advisory operations
pub type AccessResult<T> = Result<T, AccessError>;
