//! Jittered linear retry.
//!
//! Throttles repeated expensive checks (pathfinding to a point of interest,
//! line-of-sight to a target) against a candidate that keeps failing,
//! without blacklisting it for good:
//!
//! ```text
//! mark_attempt(now):  delay = min(delay + U[min_increase, max_increase), max_delay)
//!                     next_eligible = now + delay
//! should_retry(now):  now >= next_eligible
//! is_still_valid(now): now - previous_attempt < max_delay
//! ```
//!
//! A candidate that has not been attempted for `max_delay` ticks is stale
//! and is evicted by [`RetryMap::purge_stale`], after which it is eligible
//! immediately with a fresh delay.

use std::collections::hash_map::Entry;
use std::hash::Hash;

use brain_core::{EntityRng, Tick};
use rustc_hash::FxHashMap;
use tracing::trace;

use crate::{BehaviorError, BehaviorResult};

// ── RetryPolicy ───────────────────────────────────────────────────────────────

/// Growth and cap of the retry delay, in ticks.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RetryPolicy {
    /// Smallest per-attempt increase (inclusive).
    pub min_increase: u64,
    /// Largest per-attempt increase (exclusive, unless equal to the minimum).
    pub max_increase: u64,
    /// Cap on the delay, and the staleness horizon.
    pub max_delay:    u64,
}

impl RetryPolicy {
    pub fn new(min_increase: u64, max_increase: u64, max_delay: u64) -> BehaviorResult<Self> {
        if min_increase > max_increase {
            return Err(BehaviorError::Config(format!(
                "retry increase lower bound {min_increase} exceeds upper bound {max_increase}"
            )));
        }
        if max_delay == 0 {
            return Err(BehaviorError::Config("retry max_delay must be positive".into()));
        }
        Ok(Self { min_increase, max_increase, max_delay })
    }

    fn sample_increase(self, rng: &mut EntityRng) -> u64 {
        if self.min_increase >= self.max_increase {
            return self.min_increase;
        }
        rng.gen_range(self.min_increase..self.max_increase)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self { min_increase: 40, max_increase: 80, max_delay: 400 }
    }
}

// ── JitteredRetry ─────────────────────────────────────────────────────────────

/// Retry bookkeeping for one candidate.
#[derive(Clone, Debug)]
pub struct JitteredRetry {
    policy:           RetryPolicy,
    previous_attempt: Tick,
    next_eligible:    Tick,
    current_delay:    u64,
}

impl JitteredRetry {
    /// A candidate never attempted: delay 0, eligible from tick 0.
    pub fn new(policy: RetryPolicy) -> Self {
        Self {
            policy,
            previous_attempt: Tick::ZERO,
            next_eligible:    Tick::ZERO,
            current_delay:    0,
        }
    }

    /// A candidate whose first attempt (and failure) happens at `now`.
    pub fn first_attempt(policy: RetryPolicy, now: Tick, rng: &mut EntityRng) -> Self {
        let mut retry = Self::new(policy);
        retry.mark_attempt(now, rng);
        retry
    }

    pub fn mark_attempt(&mut self, now: Tick, rng: &mut EntityRng) {
        self.previous_attempt = now;
        let grown = self.current_delay + self.policy.sample_increase(rng);
        self.current_delay = grown.min(self.policy.max_delay);
        self.next_eligible = now + self.current_delay;
    }

    #[inline]
    pub fn should_retry(&self, now: Tick) -> bool {
        now >= self.next_eligible
    }

    #[inline]
    pub fn is_still_valid(&self, now: Tick) -> bool {
        now.saturating_since(self.previous_attempt) < self.policy.max_delay
    }

    #[inline]
    pub fn current_delay(&self) -> u64 {
        self.current_delay
    }

    #[inline]
    pub fn previous_attempt(&self) -> Tick {
        self.previous_attempt
    }

    #[inline]
    pub fn next_eligible(&self) -> Tick {
        self.next_eligible
    }
}

// ── RetryMap ──────────────────────────────────────────────────────────────────

/// Per-candidate [`JitteredRetry`] entries owned by one behavior instance.
///
/// Typical use inside a behavior's start check:
///
/// ```rust,ignore
/// self.retries.purge_stale(ctx.now);
/// let candidates: Vec<BlockPos> = nearby_pois
///     .filter(|p| self.retries.is_eligible(p, ctx.now))
///     .collect();
/// for pos in candidates {
///     if reachable(pos) {
///         self.retries.forget(&pos);
///         claim(pos);
///         break;
///     }
///     self.retries.record_failure(pos, ctx.now, ctx.rng);
/// }
/// ```
#[derive(Clone, Debug)]
pub struct RetryMap<K> {
    policy:  RetryPolicy,
    entries: FxHashMap<K, JitteredRetry>,
}

impl<K: Hash + Eq> Default for RetryMap<K> {
    fn default() -> Self {
        Self::new(RetryPolicy::default())
    }
}

impl<K: Hash + Eq> RetryMap<K> {
    pub fn new(policy: RetryPolicy) -> Self {
        Self { policy, entries: FxHashMap::default() }
    }

    /// Evict entries whose last attempt is `max_delay` or more ticks old.
    /// Returns the number evicted.
    pub fn purge_stale(&mut self, now: Tick) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, r| r.is_still_valid(now));
        let evicted = before - self.entries.len();
        if evicted > 0 {
            trace!(tick = now.0, evicted, "stale retry candidates evicted");
        }
        evicted
    }

    /// `true` if `key` has no entry or its delay has elapsed.
    pub fn is_eligible(&self, key: &K, now: Tick) -> bool {
        self.entries.get(key).is_none_or(|r| r.should_retry(now))
    }

    /// Record a failed attempt at `key`, creating the entry if needed.
    pub fn record_failure(&mut self, key: K, now: Tick, rng: &mut EntityRng) {
        let policy = self.policy;
        match self.entries.entry(key) {
            Entry::Occupied(mut e) => e.get_mut().mark_attempt(now, rng),
            Entry::Vacant(e) => {
                e.insert(JitteredRetry::first_attempt(policy, now, rng));
            }
        }
    }

    /// Drop the entry for `key` (e.g. after it finally succeeded).
    pub fn forget(&mut self, key: &K) -> Option<JitteredRetry> {
        self.entries.remove(key)
    }

    pub fn get(&self, key: &K) -> Option<&JitteredRetry> {
        self.entries.get(key)
    }

    pub fn policy(&self) -> RetryPolicy {
        self.policy
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
