//! Rotation-window seed derivation.
//!
//! A seed is a function of (time bucket, location key) and nothing else: every
//! process that agrees on the clock and the key derives the same seed, so
//! equal-score tie-breaks hold stable for the duration of the bucket and then
//! advance together across the fleet.  The bucket index is ephemeral — it is
//! recomputed on every call and never persisted.

use crate::stable_hash::poly_hash32;
use std::time::{SystemTime, UNIX_EPOCH};

/// Multiplier mixing the rotation bucket into the seed.
const LARGE_PRIME: u32 = 2_654_435_761;

/// One minute in milliseconds.
pub const MINUTE_MS: u64 = 60_000;

/// One day in milliseconds — the bucket duration used by [`daily_seed`].
pub const DAY_MS: u64 = 86_400_000;

/// Derive a seed from an explicit timestamp.
///
/// `bucket = now_ms / bucket_duration_ms` (a zero duration is treated as 1),
/// the location key is trimmed and lower-cased before hashing (empty is fine
/// and hashes to 0), and the two are combined in wrapping 32-bit arithmetic.
///
/// Same bucket + same key ⇒ same seed, always, on every instance.  This is the
/// determinism contract the selection strategies depend on.
///
/// # Example
///
/// ```rust
/// use medley::{derive_seed_at, MINUTE_MS};
///
/// let window = 10 * MINUTE_MS;
/// let a = derive_seed_at(1_700_000_000_000, window, "Portland, OR");
/// let b = derive_seed_at(1_700_000_000_000 + window / 2, window, "portland, or ");
/// assert_eq!(a, b, "same bucket, same (normalized) key → same seed");
/// ```
#[must_use]
pub fn derive_seed_at(now_ms: u64, bucket_duration_ms: u64, location_key: &str) -> u32 {
    let bucket = (now_ms / bucket_duration_ms.max(1)) as u32;
    let location_hash = poly_hash32(&location_key.trim().to_lowercase());
    bucket.wrapping_mul(LARGE_PRIME).wrapping_add(location_hash)
}

/// Derive a seed from the current wall clock.
///
/// A clock before the Unix epoch degrades to timestamp 0 rather than erroring;
/// the function stays total.
#[must_use]
pub fn derive_seed(bucket_duration_ms: u64, location_key: &str) -> u32 {
    derive_seed_at(now_ms(), bucket_duration_ms, location_key)
}

/// Short rotation window preset: a bucket of `bucket_minutes` minutes.
///
/// Zero minutes is treated as one.
#[must_use]
pub fn short_window_seed(bucket_minutes: u64, location_key: &str) -> u32 {
    derive_seed(bucket_minutes.max(1).saturating_mul(MINUTE_MS), location_key)
}

/// Daily rotation window preset: the seed advances once per UTC day.
#[must_use]
pub fn daily_seed(location_key: &str) -> u32 {
    derive_seed(DAY_MS, location_key)
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
