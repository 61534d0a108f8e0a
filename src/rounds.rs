//! Three-round greedy allocation: breadth across fine groups before depth,
//! under a coarse-group cap that is strict in the early rounds and relaxed in
//! the last.
//!
//! Each round is an independent function over `(buckets, running coarse
//! counts, seed)` that appends to a partial result and reports what it did as
//! a [`RoundTrace`], so rounds are unit-testable in isolation and the explain
//! surface falls out of the same computation the plain entry point runs.
//!
//! Cap semantics worth stating precisely:
//! - In the winners and runners-up rounds a candidate whose coarse group is
//!   already at the strict cap is skipped outright for that round — it is
//!   *not* deferred to the relaxed remainder round.
//! - The remainder round's adjacency rule only reorders; it never overrides
//!   the coarse cap and never drops a candidate that had room.

use crate::finalize::finalize;
use crate::index::{index_by_fine_group, rank_cmp};
use crate::{normalize_group_key, Candidate, SelectionRequest};
use std::collections::BTreeMap;

/// Which fill round produced a trace entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SelectionRound {
    /// Round 1: each bucket's best candidate, strict cap.
    Winners,
    /// Round 2: each bucket's second-ranked candidate, strict cap.
    RunnersUp,
    /// Round 3: everything at bucket position ≥ 3, relaxed cap.
    Remainder,
}

/// Audit record of one fill round: what it considered, appended, and skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoundTrace {
    /// The round this trace describes.
    pub round: SelectionRound,
    /// Candidate ids in the round's pool, in consideration order.
    pub pool: Vec<String>,
    /// Ids appended to the result, in append order.
    pub appended: Vec<String>,
    /// Ids skipped because their coarse group was at the round's cap.
    pub skipped_at_cap: Vec<String>,
}

/// Output of [`select_ranked_diverse_explain`]: the chosen candidates plus a
/// per-round audit trail.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SelectionExplain {
    /// Chosen candidates, in final order (length ≤ the request's limit).
    pub chosen: Vec<Candidate>,
    /// One trace per round that ran (rounds stop once the limit is reached).
    pub rounds: Vec<RoundTrace>,
}

type Buckets<'a> = BTreeMap<String, Vec<&'a Candidate>>;
type CoarseCounts = BTreeMap<String, usize>;

fn coarse_count(counts: &CoarseCounts, key: &str) -> usize {
    counts.get(key).copied().unwrap_or(0)
}

fn record_pick(c: &Candidate, coarse: String, result: &mut Vec<Candidate>, counts: &mut CoarseCounts) {
    *counts.entry(coarse).or_insert(0) += 1;
    result.push(c.clone());
}

/// Every bucket's candidate at position `rank`, sorted score-desc + tie-break.
fn rank_pool<'a>(buckets: &Buckets<'a>, rank: usize, seed: u32) -> Vec<&'a Candidate> {
    let mut pool: Vec<&Candidate> = buckets
        .values()
        .filter_map(|bucket| bucket.get(rank).copied())
        .collect();
    pool.sort_by(|a, b| rank_cmp(a, b, seed));
    pool
}

/// Everything at bucket position ≥ 3, flattened and sorted score-desc + tie-break.
fn remainder_pool<'a>(buckets: &Buckets<'a>, seed: u32) -> Vec<&'a Candidate> {
    let mut pool: Vec<&Candidate> = buckets
        .values()
        .flat_map(|bucket| bucket.iter().skip(2).copied())
        .collect();
    pool.sort_by(|a, b| rank_cmp(a, b, seed));
    pool
}

/// Shared fill for the strict-cap rounds: append in pool order while under the
/// limit; a candidate whose coarse group is at `cap` is permanently skipped
/// for this round.
fn capped_fill(
    round: SelectionRound,
    pool: Vec<&Candidate>,
    result: &mut Vec<Candidate>,
    counts: &mut CoarseCounts,
    limit: usize,
    cap: usize,
) -> RoundTrace {
    let mut trace = RoundTrace {
        round,
        pool: pool.iter().map(|c| c.id.clone()).collect(),
        appended: Vec::new(),
        skipped_at_cap: Vec::new(),
    };
    for c in pool {
        if result.len() >= limit {
            break;
        }
        let coarse = normalize_group_key(&c.coarse_group);
        if coarse_count(counts, &coarse) >= cap {
            trace.skipped_at_cap.push(c.id.clone());
            continue;
        }
        trace.appended.push(c.id.clone());
        record_pick(c, coarse, result, counts);
    }
    trace
}

/// Round 1: each bucket's best candidate, under the strict coarse cap.
pub(crate) fn winners_round(
    buckets: &Buckets<'_>,
    result: &mut Vec<Candidate>,
    counts: &mut CoarseCounts,
    limit: usize,
    strict_cap: usize,
    seed: u32,
) -> RoundTrace {
    let pool = rank_pool(buckets, 0, seed);
    capped_fill(SelectionRound::Winners, pool, result, counts, limit, strict_cap)
}

/// Round 2: each bucket's second-ranked candidate, under the strict coarse cap.
/// Buckets with fewer than two entries contribute nothing.
pub(crate) fn runners_up_round(
    buckets: &Buckets<'_>,
    result: &mut Vec<Candidate>,
    counts: &mut CoarseCounts,
    limit: usize,
    strict_cap: usize,
    seed: u32,
) -> RoundTrace {
    let pool = rank_pool(buckets, 1, seed);
    capped_fill(SelectionRound::RunnersUp, pool, result, counts, limit, strict_cap)
}

/// Round 3: the remainder, under the relaxed coarse cap, with a soft adjacency
/// rule — when the next candidate shares a fine group with the previously
/// appended item, a single bounded forward scan looks for an eligible
/// candidate in a different fine group and appends that one instead.  If no
/// alternative exists the same-group candidate is appended anyway: the rule
/// reorders, it never drops.
pub(crate) fn remainder_round(
    buckets: &Buckets<'_>,
    result: &mut Vec<Candidate>,
    counts: &mut CoarseCounts,
    limit: usize,
    relaxed_cap: usize,
    seed: u32,
) -> RoundTrace {
    let pool = remainder_pool(buckets, seed);
    let mut trace = RoundTrace {
        round: SelectionRound::Remainder,
        pool: pool.iter().map(|c| c.id.clone()).collect(),
        appended: Vec::new(),
        skipped_at_cap: Vec::new(),
    };

    let mut used = vec![false; pool.len()];
    let mut i = 0;
    while result.len() < limit && i < pool.len() {
        if used[i] {
            i += 1;
            continue;
        }
        let next = pool[i];
        let next_coarse = normalize_group_key(&next.coarse_group);
        if coarse_count(counts, &next_coarse) >= relaxed_cap {
            // Counts only grow, so an at-cap candidate can never become
            // eligible later in this round.
            used[i] = true;
            trace.skipped_at_cap.push(next.id.clone());
            i += 1;
            continue;
        }

        let next_fine = normalize_group_key(&next.fine_group);
        let last_fine = result.last().map(|c| normalize_group_key(&c.fine_group));
        let mut pick = i;
        if last_fine.as_deref() == Some(next_fine.as_str()) {
            // One forward pass over the rest of the pool; candidates passed
            // over here are not consumed and get their own turn later.
            for (j, alt) in pool.iter().enumerate().skip(i + 1) {
                if used[j] {
                    continue;
                }
                if normalize_group_key(&alt.fine_group) == next_fine {
                    continue;
                }
                if coarse_count(counts, &normalize_group_key(&alt.coarse_group)) >= relaxed_cap {
                    continue;
                }
                pick = j;
                break;
            }
        }

        let chosen = pool[pick];
        used[pick] = true;
        trace.appended.push(chosen.id.clone());
        record_pick(chosen, normalize_group_key(&chosen.coarse_group), result, counts);
        if pick == i {
            i += 1;
        }
        // When an alternative was appended, `pool[i]` stays pending and is
        // reconsidered next iteration, now against a different last fine group.
    }
    trace
}

/// Select a bounded, diversified list from a scored candidate pool.
///
/// Three rounds fill the result — per-fine-group winners, runners-up, then the
/// remainder — preferring breadth (distinct fine groups) over depth, while a
/// running per-coarse-group count never exceeds the active cap (strict in
/// rounds 1–2, relaxed in round 3).  The result is deduplicated by id and
/// truncated to `request.limit`.
///
/// Deterministic: identical candidates + identical request ⇒ identical order,
/// on every call, on every instance.  A result shorter than `limit` means the
/// pool was exhausted and is a valid outcome.
///
/// # Example
///
/// ```rust
/// use medley::{select_ranked_diverse, Candidate, SelectionRequest};
///
/// let pool = vec![
///     Candidate::new("espresso-bar", 0.95, "cafe", "food"),
///     Candidate::new("corner-cafe", 0.90, "cafe", "food"),
///     Candidate::new("thai-place", 0.85, "thai", "food"),
///     Candidate::new("book-nook", 0.60, "bookstore", "retail"),
/// ];
/// let picked = select_ranked_diverse(&pool, &SelectionRequest::with_limit(3));
/// assert_eq!(picked.len(), 3);
/// // Breadth first: one per fine group before any second cafe.
/// assert_eq!(picked[0].id, "espresso-bar");
/// assert!(picked.iter().any(|c| c.id == "book-nook"));
/// ```
#[must_use]
pub fn select_ranked_diverse(candidates: &[Candidate], request: &SelectionRequest) -> Vec<Candidate> {
    select_ranked_diverse_explain(candidates, request).chosen
}

/// [`select_ranked_diverse`] with a per-round audit trail.
#[must_use]
pub fn select_ranked_diverse_explain(
    candidates: &[Candidate],
    request: &SelectionRequest,
) -> SelectionExplain {
    let limit = request.limit;
    if limit == 0 || candidates.is_empty() {
        return SelectionExplain {
            chosen: Vec::new(),
            rounds: Vec::new(),
        };
    }

    let (strict, relaxed) = request.effective_caps();
    let seed = request.seed;
    let buckets = index_by_fine_group(candidates, seed);

    let mut chosen: Vec<Candidate> = Vec::with_capacity(limit.min(candidates.len()));
    let mut counts = CoarseCounts::new();
    let mut rounds = Vec::with_capacity(3);

    rounds.push(winners_round(&buckets, &mut chosen, &mut counts, limit, strict, seed));
    if chosen.len() < limit {
        rounds.push(runners_up_round(&buckets, &mut chosen, &mut counts, limit, strict, seed));
    }
    if chosen.len() < limit {
        rounds.push(remainder_round(&buckets, &mut chosen, &mut counts, limit, relaxed, seed));
    }

    SelectionExplain {
        chosen: finalize(chosen, limit),
        rounds,
    }
}
