//! The advisor
//!
//! One call, one pipeline:
//!
//! 1. Reject anything but read or write
//! 2. Stop early if the user already has the access
//! 3. Filter the table down to confirmed group lines
//! 4. Sort by specificity and keep every line tied for the top spot
//! 5. Attach owners, dropping groups nobody owns
//!
//! No state survives between calls.

use serde::Serialize;
use std::sync::Arc;

use super::owners::{resolve_owners, Owner};
use crate::core::{AccessError, AccessResult};
use crate::p4::{effective_access, P4Runner, Principal};
use crate::permissions::AccessRequest;
use crate::protections::{sort, Protection, Protections};

/// A group worth joining and who to ask
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Candidate {
    /// The table line that grants the access
    pub protection: Protection,
    /// Owners of the group, in declared order
    pub owners: Vec<Owner>,
}

impl Candidate {
    /// The group to join
    pub fn group(&self) -> &str {
        self.protection.principal()
    }
}

/// Result of one advisory
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Advice {
    pub user: String,
    pub path: String,
    pub access: AccessRequest,
    /// Best groups first
    pub candidates: Vec<Candidate>,
    /// Extra note for the user, empty if there is nothing to say
    pub context: String,
}

impl Advice {
    fn already_has_access(user: &str, path: &str, access: AccessRequest) -> Self {
        Self {
            user: user.to_string(),
            path: path.to_string(),
            access,
            candidates: Vec::new(),
            context: format!("User already has {} access or higher to {}", access, path),
        }
    }

    /// Names of the recommended groups, best first
    pub fn groups(&self) -> Vec<&str> {
        self.candidates.iter().map(Candidate::group).collect()
    }
}

/// Works out which groups a user should join
pub struct Advisor {
    runner: Arc<dyn P4Runner>,
}

impl Advisor {
    /// Create an advisor that asks the server through `runner`
    pub fn new(runner: Arc<dyn P4Runner>) -> Self {
        Self { runner }
    }

    /// Fetch the table for `path` and advise on it
    pub async fn advise_path(&self, user: &str, path: &str, req: &str) -> AccessResult<Advice> {
        let table = Protections::fetch(self.runner.as_ref(), path).await?;
        self.advise(user, path, req, &table).await
    }

    /// Advise `user` on which groups grant `req` access to `path`
    pub async fn advise(
        &self,
        user: &str,
        path: &str,
        req: &str,
        table: &Protections,
    ) -> AccessResult<Advice> {
        let access: AccessRequest = req.parse()?;
        let runner = self.runner.as_ref();

        tracing::info!("Advising {} on {} access to {}", user, access, path);

        let current = effective_access(runner, Principal::User(user), path).await?;
        if current.satisfies(access.level()) {
            tracing::info!("{} already has {} at {}", user, current, path);
            return Ok(Advice::already_has_access(user, path, access));
        }

        let filtered = table.filter(runner, path, access).await?;
        let sorted = sort::by_specificity(filtered);
        let best = sort::most_specific(&sorted);
        if best.is_empty() {
            return Err(AccessError::NoMatchingGroup);
        }

        let mut candidates = Vec::with_capacity(best.len());
        for prot in best {
            let owners = resolve_owners(runner, prot.principal()).await?;
            if owners.is_empty() {
                tracing::warn!("Group {} has no owners, not recommending it", prot.principal());
                continue;
            }
            candidates.push(Candidate {
                protection: prot.clone(),
                owners,
            });
        }

        if candidates.is_empty() {
            return Err(AccessError::NoMatchingGroup);
        }

        tracing::info!(
            "Recommending {} group(s) for {} access to {}",
            candidates.len(),
            access,
            path
        );

        Ok(Advice {
            user: user.to_string(),
            path: path.to_string(),
            access,
            candidates,
            context: String::new(),
        })
    }
}
