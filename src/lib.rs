//! `medley`: deterministic, diversity-constrained selection primitives.
//!
//! Designed for "featured list" problems: you have a pool of scored candidates
//! (places, posts, offers — anything carrying a precomputed quality score and a
//! category label) and you want a bounded, diversified slice of it: breadth
//! across categories before depth within any one of them, with output that is
//! exactly reproducible for a given candidate snapshot and time window across
//! independently scaled server instances.
//!
//! **Goals:**
//! - **Deterministic by default**: same candidates + same request (same seed) →
//!   the same ordered output, on every call, on every instance.  "Randomness"
//!   is a seeded polynomial hash, never an RNG, so horizontally scaled
//!   processes agree without coordination.
//! - **Breadth before depth**: the ranked strategy fills in three rounds —
//!   per-category winners first, runners-up second, everything else last —
//!   under a coarse-category cap that is strict early and relaxed late.
//! - **Total**: selection never fails for well-typed input.  Malformed knobs
//!   are clamped, blank group labels fall back to [`MISCELLANEOUS`], and a
//!   result shorter than the requested limit is a valid outcome, not an error.
//! - **Stateless**: every input is supplied per call and every intermediate
//!   structure is call-scoped.  Nothing is persisted, cached, or shared.
//!
//! **Selection strategies:**
//! - [`select_ranked_diverse`] / [`select_ranked_diverse_explain`]: the
//!   three-round greedy fill over scored candidates with fine/coarse grouping.
//! - [`diversify_ordered`] / [`diversify_ordered_candidates`]: a score-free
//!   alternative for callers that already hold a desirability-ordered list —
//!   one item per group, then backfill in original order.
//! - [`short_window_seed`] / [`daily_seed`] / [`derive_seed_at`]: rotation
//!   window seed derivation, so equal-score tie-breaks hold stable for a time
//!   bucket and then advance.
//!
//! **Non-goals:**
//! - No candidate scoring, data fetching, caching, or geolocation: callers
//!   supply a materialized, already-scored pool.
//! - No cross-user fairness — diversity holds within a single call only.
//! - No cryptographic randomness; the hashes here are for reproducible
//!   tie-breaking, nothing else.
//! - No transport or persistence; translating query parameters into a
//!   [`SelectionRequest`] and serializing results is the calling layer's job.

#![forbid(unsafe_code)]

mod stable_hash;
pub use stable_hash::*;

mod seed;
pub use seed::*;

mod index;
pub use index::*;

mod rounds;
pub use rounds::*;

mod finalize;
pub use finalize::*;

mod ordered;
pub use ordered::*;

/// Sentinel group label for candidates with a blank or missing category.
pub const MISCELLANEOUS: &str = "miscellaneous";

/// Normalize a raw group label: trim, case-fold, blank → [`MISCELLANEOUS`].
///
/// Both selection strategies and their callers share this so that `"Cafés "`,
/// `"cafés"`, and `"CAFÉS"` land in the same bucket.
#[must_use]
pub fn normalize_group_key(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        MISCELLANEOUS.to_string()
    } else {
        trimmed.to_lowercase()
    }
}

/// A scored selection candidate.
///
/// `id` must be unique within one call; scores may tie (ties are resolved by a
/// seeded hash so the order is still total).  Group labels are normalized with
/// [`normalize_group_key`] before use, so callers may pass them raw.
///
/// Equality compares `score` by bit pattern, so a `NaN`-scored candidate is
/// equal to a copy of itself — selection results stay comparable over the full
/// input domain.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Candidate {
    /// Opaque id, unique within one call.
    pub id: String,
    /// Precomputed quality score (higher = better).  `NaN` sorts last.
    pub score: f64,
    /// Most specific category label (e.g. a subcategory).
    pub fine_group: String,
    /// Broader category the fine group rolls up into.
    pub coarse_group: String,
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.score.to_bits() == other.score.to_bits()
            && self.fine_group == other.fine_group
            && self.coarse_group == other.coarse_group
    }
}

impl Candidate {
    /// Convenience constructor.
    pub fn new(
        id: impl Into<String>,
        score: f64,
        fine_group: impl Into<String>,
        coarse_group: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            score,
            fine_group: fine_group.into(),
            coarse_group: coarse_group.into(),
        }
    }
}

/// Parameters for one ranked-diverse selection call.
///
/// Malformed values are clamped, never rejected: a strict cap of zero behaves
/// as one, and `max_per_coarse_relaxed < max_per_coarse_strict` behaves as if
/// relaxed were equal to strict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SelectionRequest {
    /// Maximum number of candidates to return.  Zero yields an empty result.
    pub limit: usize,
    /// Coarse-group cap applied in the winners and runners-up rounds.
    pub max_per_coarse_strict: usize,
    /// Coarse-group cap applied in the remainder round.  Clamped to ≥ strict.
    pub max_per_coarse_relaxed: usize,
    /// Tie-break seed, typically from [`short_window_seed`] or [`daily_seed`].
    pub seed: u32,
}

impl Default for SelectionRequest {
    fn default() -> Self {
        Self {
            limit: 0,
            max_per_coarse_strict: 2,
            max_per_coarse_relaxed: 3,
            seed: 0,
        }
    }
}

impl SelectionRequest {
    /// Default caps and seed with the given `limit`.
    #[must_use]
    pub fn with_limit(limit: usize) -> Self {
        Self {
            limit,
            ..Self::default()
        }
    }

    /// Caps after clamping: strict ≥ 1, relaxed ≥ strict.
    pub(crate) fn effective_caps(&self) -> (usize, usize) {
        let strict = self.max_per_coarse_strict.max(1);
        let relaxed = self.max_per_coarse_relaxed.max(strict);
        (strict, relaxed)
    }
}
