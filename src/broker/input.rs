//! Filter program input
//!
//! p4broker hands a filter program the intercepted command as `key: value`
//! lines on stdin. For `p4 access <read|write> <path>` the interesting keys
//! are `user`, `Arg0` and `Arg1`.

use std::collections::HashMap;
use std::io::BufRead;

use crate::core::{AccessError, AccessResult};

/// The request behind one `p4 access` command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerArgs {
    pub user: String,
    pub req_access: String,
    pub path: String,
}

/// Parse broker `key: value` lines
pub fn read_fields(reader: impl BufRead) -> AccessResult<HashMap<String, String>> {
    let mut fields = HashMap::new();
    for line in reader.lines() {
        let line = line?;
        if let Some((key, value)) = line.split_once(':') {
            fields.insert(key.trim().to_string(), value.trim().to_string());
        }
    }
    Ok(fields)
}

impl TriggerArgs {
    /// Pull the request out of broker fields
    pub fn from_fields(fields: &HashMap<String, String>) -> AccessResult<Self> {
        let get = |key: &str| {
            fields
                .get(key)
                .filter(|v| !v.is_empty())
                .cloned()
                .ok_or_else(|| AccessError::BrokerInput(format!("missing '{}'", key)))
        };

        Ok(Self {
            user: get("user")?,
            req_access: get("Arg0")?,
            path: get("Arg1")?,
        })
    }

    /// Read the request from broker input
    pub fn read(reader: impl BufRead) -> AccessResult<Self> {
        let fields = read_fields(reader)?;
        Self::from_fields(&fields)
    }
}
