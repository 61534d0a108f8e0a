//! Deterministic hashing helpers for tie-breaks and "randomized" ordering.
//!
//! This module intentionally does **not** provide cryptographic guarantees; it
//! exists so that equal-score candidates land in a stable, seed-dependent total
//! order that every process computes identically.  Replacing this with a
//! language RNG or an unordered-map iteration order would break the
//! reproducibility contract the rest of the crate depends on.

use std::cmp::Ordering;

/// Polynomial rolling hash, truncated to 32 bits at each step.
///
/// `h = h * 31 + byte` with wrapping arithmetic; the empty string hashes to 0.
/// Cheap, total, and stable across platforms.
#[must_use]
pub fn poly_hash32(s: &str) -> u32 {
    let mut h: u32 = 0;
    for b in s.as_bytes() {
        h = h.wrapping_mul(31).wrapping_add(u32::from(*b));
    }
    h
}

/// Seed-dependent strict total order over candidate ids.
///
/// Each side is hashed as `"{id}{seed}"` with [`poly_hash32`] and the hashes
/// compared; on the rare collision the lexicographic id order decides, so no
/// unresolved tie can remain.  Changing the seed reshuffles equal-score
/// candidates; ids themselves never change rank under the same seed.
#[must_use]
pub fn tie_break(a_id: &str, b_id: &str, seed: u32) -> Ordering {
    let ha = poly_hash32(&format!("{a_id}{seed}"));
    let hb = poly_hash32(&format!("{b_id}{seed}"));
    ha.cmp(&hb).then_with(|| a_id.cmp(b_id))
}
