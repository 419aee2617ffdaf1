//! Phase 3: Hierarchy Resolver
//!
//! Reconstructs the ancestry of a line from indentation alone. No stack is
//! carried across the document: each lookup scans backward from the line,
//! accepting only scope-opening keys that are strictly shallower than both the
//! line itself and the last accepted ancestor.

use crate::classify::ClassifiedLine;

/// Return the keys of every ancestor of `lines[index]`, root first.
pub fn ancestors(lines: &[ClassifiedLine], index: usize) -> Vec<String> {
    let Some(prev) = index.checked_sub(1) else {
        return Vec::new();
    };

    let current = lines[index].indent;
    let mut cursor = lines[prev].indent;
    let mut path = Vec::new();

    for pos in (0..=prev).rev() {
        let candidate = &lines[pos];
        if !candidate.opens_scope() {
            continue;
        }

        // The immediate predecessor only has to be shallower than the line;
        // anything earlier must also be shallower than the last ancestor found.
        let accepted = if pos == prev {
            candidate.indent < current
        } else {
            candidate.indent < cursor && candidate.indent < current
        };

        if accepted {
            cursor = candidate.indent;
            if let Some(key) = &candidate.key {
                path.push(key.clone());
            }
            // Nothing is shallower than the left margin
            if cursor == 0 {
                break;
            }
        }
    }

    path.reverse();
    path
}
