//! Order-preserving diversification for already-ranked lists.
//!
//! Some callers hold a list that is already in desirability order (editorial
//! picks, a feed page, an upstream ranker's output) with no numeric score and
//! only one level of grouping.  This strategy spreads groups without touching
//! the caller's order: first one item per distinct group, then backfill, both
//! passes in original order.

use crate::{normalize_group_key, Candidate, MISCELLANEOUS};
use std::collections::BTreeSet;

/// Diversify an already-ordered list: one item per distinct group key first,
/// then backfill in original order until `limit`.
///
/// The group key is normalized with [`crate::normalize_group_key`], so raw
/// labels are fine.  Fast paths keep the equivalence exact: when only one
/// distinct group exists, or the list already fits the limit, the output is
/// the (truncated) input copy.
///
/// # Example
///
/// ```rust
/// use medley::diversify_ordered;
///
/// let items = vec![("a1", "a"), ("a2", "a"), ("b1", "b"), ("b2", "b"), ("c1", "c"), ("a3", "a")];
/// let out = diversify_ordered(&items, 5, |it| it.1.to_string());
/// let ids: Vec<&str> = out.iter().map(|it| it.0).collect();
/// assert_eq!(ids, vec!["a1", "b1", "c1", "a2", "b2"]);
/// ```
#[must_use]
pub fn diversify_ordered<T, F>(items: &[T], limit: usize, get_group_key: F) -> Vec<T>
where
    T: Clone,
    F: Fn(&T) -> String,
{
    if limit == 0 || items.is_empty() {
        return Vec::new();
    }
    if items.len() <= limit {
        return items.to_vec();
    }

    let keys: Vec<String> = items
        .iter()
        .map(|item| normalize_group_key(&get_group_key(item)))
        .collect();
    let distinct: BTreeSet<&str> = keys.iter().map(String::as_str).collect();
    if distinct.len() <= 1 {
        return items[..limit].to_vec();
    }

    let mut selected = vec![false; items.len()];
    let mut out: Vec<T> = Vec::with_capacity(limit);

    // Pass 1: first item per distinct group, in original order.
    let mut seen_groups = BTreeSet::<&str>::new();
    for (i, key) in keys.iter().enumerate() {
        if out.len() == limit {
            break;
        }
        if seen_groups.insert(key.as_str()) {
            selected[i] = true;
            out.push(items[i].clone());
        }
    }

    // Pass 2: backfill anything not yet selected, in original order.
    for (i, item) in items.iter().enumerate() {
        if out.len() == limit {
            break;
        }
        if !selected[i] {
            selected[i] = true;
            out.push(item.clone());
        }
    }

    out
}

/// Default group key for [`Candidate`] lists: fine group, else coarse group,
/// else [`MISCELLANEOUS`].
#[must_use]
pub fn candidate_group_key(c: &Candidate) -> String {
    if !c.fine_group.trim().is_empty() {
        return normalize_group_key(&c.fine_group);
    }
    if !c.coarse_group.trim().is_empty() {
        return normalize_group_key(&c.coarse_group);
    }
    MISCELLANEOUS.to_string()
}

/// [`diversify_ordered`] over candidates with the [`candidate_group_key`]
/// fallback chain.
#[must_use]
pub fn diversify_ordered_candidates(items: &[Candidate], limit: usize) -> Vec<Candidate> {
    diversify_ordered(items, limit, candidate_group_key)
}
