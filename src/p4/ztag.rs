//! Decoder for `p4 -ztag` output
//!
//! Tagged output looks like:
//!
//! ```text
//! ... perm write
//! ... host *
//! ... user P_writers
//! ... isgroup
//! ... line 3
//! ... depotFile //depot/...
//!
//! ... perm read
//! ```
//!
//! Records are separated by blank lines. A bare `... key` is a flag with an
//! empty value. Lines without the `... ` prefix continue the previous value,
//! so a blank line only ends a record when the next tag repeats a key the
//! record already has. Blank lines inside a multi-line value are kept.

use super::runner::Record;

const TAG_PREFIX: &str = "... ";

/// Split tagged output into records
pub fn parse(output: &str) -> Vec<Record> {
    let mut records = Vec::new();
    let mut current = Record::new();
    let mut last_key: Option<String> = None;
    let mut blank_lines = 0;

    for line in output.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                blank_lines += 1;
            }
            continue;
        }

        if let Some(tagged) = line.strip_prefix(TAG_PREFIX) {
            let (key, value) = match tagged.split_once(' ') {
                Some((key, value)) => (key, value),
                None => (tagged, ""),
            };
            if blank_lines > 0 && current.contains_key(key) {
                records.push(std::mem::take(&mut current));
            }
            blank_lines = 0;
            current.insert(key.to_string(), value.to_string());
            last_key = Some(key.to_string());
        } else if let Some(value) = last_key.as_ref().and_then(|key| current.get_mut(key)) {
            for _ in 0..=blank_lines {
                value.push('\n');
            }
            value.push_str(line);
            blank_lines = 0;
        } else {
            tracing::debug!("Skipping untagged line: {}", line);
        }
    }

    if !current.is_empty() {
        records.push(current);
    }

    records
}
