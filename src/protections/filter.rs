//! Candidate selection
//!
//! Picks the group lines of a table that could plausibly grant the
//! requested access at a path. The table only suggests candidates: each one
//! is confirmed against the server's effective access before it is kept,
//! since later lines (exclusions in particular) can take away what an
//! earlier line appears to grant.

use super::table::{specificity, Protection, Protections};
use crate::core::AccessResult;
use crate::p4::{effective_access, P4Runner, Principal};
use crate::permissions::AccessRequest;

impl Protections {
    /// Lines whose group would actually give `req` at `path`
    ///
    /// Visits the table last line first, so later lines come out first.
    pub async fn filter(
        &self,
        runner: &dyn P4Runner,
        path: &str,
        req: AccessRequest,
    ) -> AccessResult<Vec<Protection>> {
        let path_specificity = specificity(path);
        let mut out = Vec::new();

        for prot in self.iter().rev() {
            if !prot.grants_to_group() {
                continue;
            }

            // A line for a deeper path than the one asked about doesn't apply
            if prot.specificity() > path_specificity {
                tracing::trace!(
                    "Skipping line {}: {} is deeper than {}",
                    prot.line(),
                    prot.path(),
                    path
                );
                continue;
            }

            if !req.accepts(prot.permission()) {
                continue;
            }

            let granted = effective_access(runner, Principal::Group(prot.principal()), path).await?;
            if granted.satisfies(req.level()) {
                out.push(prot.clone());
            } else {
                tracing::debug!(
                    "Group {} (line {}) only has {} at {}, dropping",
                    prot.principal(),
                    prot.line(),
                    granted,
                    path
                );
            }
        }

        tracing::info!("{} of {} lines grant {} to a group", out.len(), self.len(), req);
        Ok(out)
    }
}
