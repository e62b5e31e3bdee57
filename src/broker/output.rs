//! Filter program replies
//!
//! p4broker reads `action:` and `message:` lines from our stdout. Every
//! outcome, failures included, is a RESPOND or REJECT the user sees.

use std::fmt::Write;

use crate::advisor::Advice;
use crate::core::AccessError;

/// Shown instead of internal failures unless leaking is enabled
const SUPPORT_MESSAGE: &str = "Failed to get protections, please contact support";

fn quote(message: &str) -> String {
    format!("\"{}\"", message.replace('"', "\\\""))
}

/// Message body listing the recommended groups
pub fn advice_message(advice: &Advice) -> String {
    let mut out = String::new();
    if !advice.context.is_empty() {
        out.push_str(&advice.context);
        out.push('\n');
    }

    for candidate in &advice.candidates {
        let _ = writeln!(
            out,
            "Group {} grants {} access to the path {}",
            candidate.group(),
            advice.access,
            advice.path
        );
        let _ = writeln!(out, "To join, please contact one of the group owners:");
        for owner in &candidate.owners {
            let _ = writeln!(out, "    {} <{}> ({})", owner.full_name, owner.email, owner.user);
        }
    }

    out.trim_end().to_string()
}

/// Reply for a successful advisory
pub fn respond(advice: &Advice) -> String {
    format!("action: RESPOND\nmessage: {}\n", quote(&advice_message(advice)))
}

/// Reply for a failed advisory
///
/// Internal failures are hidden behind a support message unless `leak` is set.
pub fn reject(err: &AccessError, leak: bool) -> String {
    let message = if leak || err.is_user_facing() {
        format!("Failing, error received:\n{}", err)
    } else {
        SUPPORT_MESSAGE.to_string()
    };
    format!("action: REJECT\nmessage: {}\n", quote(&message))
}
