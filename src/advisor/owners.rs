//! Group owner lookup
//!
//! Group specs list owners as `Owners0`, `Owners1`, ... with no count, so
//! the names are read by probing increasing indices until one is missing.

use serde::Serialize;

use crate::core::{AccessError, AccessResult};
use crate::p4::{is_error, P4Runner, Record, DATA_FIELD};

/// Someone who can add a user to a group
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Owner {
    pub user: String,
    pub full_name: String,
    pub email: String,
}

impl Owner {
    pub fn new(
        user: impl Into<String>,
        full_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            user: user.into(),
            full_name: full_name.into(),
            email: email.into(),
        }
    }
}

/// Owner names from a group spec, in declared order
///
/// Takes the spec by value; once exhausted it stays exhausted.
#[derive(Debug)]
pub struct OwnerNames {
    spec: Record,
    next: usize,
    done: bool,
}

impl OwnerNames {
    pub fn new(spec: Record) -> Self {
        Self {
            spec,
            next: 0,
            done: false,
        }
    }
}

impl Iterator for OwnerNames {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if self.done {
            return None;
        }
        match self.spec.remove(&format!("Owners{}", self.next)) {
            Some(name) => {
                self.next += 1;
                Some(name)
            }
            None => {
                self.done = true;
                None
            }
        }
    }
}

impl std::iter::FusedIterator for OwnerNames {}

/// First record of a lookup, or the failure it reports
fn first_record(records: Vec<Record>, what: &str) -> AccessResult<Option<Record>> {
    let Some(first) = records.into_iter().next() else {
        return Ok(None);
    };
    if is_error(&first) {
        let data = first.get(DATA_FIELD).cloned().unwrap_or_default();
        return Err(AccessError::Resolver(format!("{}: {}", what, data)));
    }
    Ok(Some(first))
}

/// Look up one user's full name and email
///
/// Missing fields come back empty rather than failing.
pub async fn resolve_user(runner: &dyn P4Runner, user: &str) -> AccessResult<Owner> {
    let records = runner
        .run(&["user", "-o", user])
        .await
        .map_err(AccessError::resolver)?;

    let spec = first_record(records, user)?.unwrap_or_default();
    let field = |name: &str| spec.get(name).cloned().unwrap_or_default();

    Ok(Owner::new(user, field("FullName"), field("Email")))
}

/// Resolve every owner of `group`, in the order the group spec lists them
pub async fn resolve_owners(runner: &dyn P4Runner, group: &str) -> AccessResult<Vec<Owner>> {
    let records = runner
        .run(&["group", "-o", group])
        .await
        .map_err(AccessError::resolver)?;

    let Some(spec) = first_record(records, group)? else {
        return Ok(Vec::new());
    };

    let mut owners = Vec::new();
    for user in OwnerNames::new(spec) {
        owners.push(resolve_user(runner, &user).await?);
    }

    tracing::debug!("Group {} has {} owners", group, owners.len());
    Ok(owners)
}
