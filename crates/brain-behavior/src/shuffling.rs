//! `ShufflingList`: weighted random ordering without replacement.
//!
//! # Algorithm
//!
//! `shuffle` draws `u ~ U[0, 1)` per entry and sorts ascending by
//!
//! ```text
//! sort_key = -(u ^ (1 / weight))
//! ```
//!
//! (Efraimidis–Spirakis weighted sampling).  The entry in front is chosen
//! with probability proportional to its weight, the next one proportionally
//! among the rest, and so on, so one shuffle yields a full weighted total
//! order rather than a single draw.  Iteration afterwards ignores weights.
//!
//! Not synchronised: never shuffle while an iterator is live (the borrow
//! checker enforces this for safe code).

use brain_core::EntityRng;

use crate::{BehaviorError, BehaviorResult};

struct WeightedEntry<T> {
    data:     T,
    weight:   u32,
    /// Scratch value, meaningful only between a shuffle and the next `add`.
    sort_key: f64,
}

/// A list of `(item, weight)` pairs with weighted reshuffling.
pub struct ShufflingList<T> {
    entries: Vec<WeightedEntry<T>>,
}

impl<T> Default for ShufflingList<T> {
    fn default() -> Self {
        Self { entries: Vec::new() }
    }
}

impl<T> ShufflingList<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self { entries: Vec::with_capacity(capacity) }
    }

    /// Append `data` with a fixed positive `weight`.
    ///
    /// # Panics
    /// Panics if `weight == 0`.
    pub fn add(&mut self, data: T, weight: u32) -> &mut Self {
        if let Err(e) = self.try_add(data, weight) {
            panic!("{e}");
        }
        self
    }

    /// Fallible [`add`][Self::add].
    pub fn try_add(&mut self, data: T, weight: u32) -> BehaviorResult<()> {
        if weight == 0 {
            return Err(BehaviorError::ZeroWeight);
        }
        self.entries.push(WeightedEntry { data, weight, sort_key: 0.0 });
        Ok(())
    }

    /// Re-randomize the order, biased toward heavier entries.
    pub fn shuffle(&mut self, rng: &mut EntityRng) -> &mut Self {
        for entry in &mut self.entries {
            let u: f64 = rng.random();
            entry.sort_key = -u.powf(1.0 / entry.weight as f64);
        }
        self.entries.sort_by(|a, b| a.sort_key.total_cmp(&b.sort_key));
        self
    }

    /// Items in current order.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.entries.iter().map(|e| &e.data)
    }

    /// Mutable items in current order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> + '_ {
        self.entries.iter_mut().map(|e| &mut e.data)
    }

    /// `(item, weight)` pairs in current order.
    pub fn weighted(&self) -> impl Iterator<Item = (&T, u32)> + '_ {
        self.entries.iter().map(|e| (&e.data, e.weight))
    }

    /// Sum of all weights.
    pub fn total_weight(&self) -> u64 {
        self.entries.iter().map(|e| e.weight as u64).sum()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T> FromIterator<(T, u32)> for ShufflingList<T> {
    /// # Panics
    /// Panics if any weight is zero.
    fn from_iter<I: IntoIterator<Item = (T, u32)>>(iter: I) -> Self {
        let mut list = ShufflingList::new();
        for (data, weight) in iter {
            list.add(data, weight);
        }
        list
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for ShufflingList<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.entries.iter().map(|e| (&e.data, e.weight)))
            .finish()
    }
}
