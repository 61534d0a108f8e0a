//! Final result shaping shared by both selection strategies.

use crate::Candidate;
use std::collections::BTreeSet;

/// Defensive dedup by id (first occurrence wins), then hard-truncate to `limit`.
///
/// The round allocator never emits a duplicate on its own; this guard exists so
/// that a malformed pool (repeated ids) can never inflate the result past the
/// contract: length ≤ `limit`, no id repeats.
#[must_use]
pub fn finalize(picked: Vec<Candidate>, limit: usize) -> Vec<Candidate> {
    let mut seen = BTreeSet::<String>::new();
    let mut out: Vec<Candidate> = Vec::with_capacity(picked.len().min(limit));
    for c in picked {
        if out.len() == limit {
            break;
        }
        if seen.insert(c.id.clone()) {
            out.push(c);
        }
    }
    out
}
