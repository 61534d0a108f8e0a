//! Fine-group bucketing for the ranked strategy.
//!
//! Buckets are call-scoped: built, consumed by the round allocator, and
//! dropped.  `BTreeMap` keeps bucket iteration order independent of hash-map
//! internals, which matters because the round pools are assembled by walking
//! the buckets.

use crate::stable_hash::tie_break;
use crate::{normalize_group_key, Candidate};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Score key with `NaN` pinned to the bottom of the order.
pub(crate) fn score_key(score: f64) -> f64 {
    if score.is_nan() {
        f64::NEG_INFINITY
    } else {
        score
    }
}

/// Ranking comparator: score descending, then seeded tie-break on id.
pub(crate) fn rank_cmp(a: &Candidate, b: &Candidate, seed: u32) -> Ordering {
    score_key(b.score)
        .total_cmp(&score_key(a.score))
        .then_with(|| tie_break(&a.id, &b.id, seed))
}

/// Partition candidates into per-fine-group buckets, each sorted score-desc
/// with ties resolved by the call's seed.
///
/// No candidate is ever dropped here: blank or missing fine groups route to
/// the [`crate::MISCELLANEOUS`] bucket.
#[must_use]
pub fn index_by_fine_group<'a>(
    candidates: &'a [Candidate],
    seed: u32,
) -> BTreeMap<String, Vec<&'a Candidate>> {
    let mut buckets: BTreeMap<String, Vec<&Candidate>> = BTreeMap::new();
    for c in candidates {
        buckets
            .entry(normalize_group_key(&c.fine_group))
            .or_default()
            .push(c);
    }
    for bucket in buckets.values_mut() {
        bucket.sort_by(|a, b| rank_cmp(a, b, seed));
    }
    buckets
}
