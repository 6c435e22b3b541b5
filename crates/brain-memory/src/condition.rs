//! `EntryCondition`: the declarative memory precondition of a node.

use crate::{Memory, MemoryKey, MemoryKeyId, MemoryStatus};

/// Ordered mapping from memory key to required presence state.
///
/// Keys keep their insertion order (useful in debug output); requiring the
/// same key twice replaces the earlier requirement.
///
/// ```rust
/// use brain_memory::{EntryCondition, MemoryKey};
///
/// const WALK_TARGET: MemoryKey<u64> = MemoryKey::new(0, "walk_target");
/// const ATTACK_TARGET: MemoryKey<u32> = MemoryKey::new(1, "attack_target");
///
/// let cond = EntryCondition::new()
///     .absent(WALK_TARGET)
///     .present(ATTACK_TARGET);
/// assert_eq!(cond.len(), 2);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntryCondition {
    requirements: Vec<(MemoryKeyId, MemoryStatus)>,
}

impl EntryCondition {
    /// A condition with no requirements (always satisfied).
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the requirement for `key`.
    pub fn require(mut self, key: impl Into<MemoryKeyId>, status: MemoryStatus) -> Self {
        self.insert(key.into(), status);
        self
    }

    pub fn present<T: 'static>(self, key: MemoryKey<T>) -> Self {
        self.require(key, MemoryStatus::ValuePresent)
    }

    pub fn absent<T: 'static>(self, key: MemoryKey<T>) -> Self {
        self.require(key, MemoryStatus::ValueAbsent)
    }

    pub fn registered<T: 'static>(self, key: MemoryKey<T>) -> Self {
        self.require(key, MemoryStatus::Registered)
    }

    /// `true` if every requirement holds against `memory`.
    pub fn is_satisfied_by(&self, memory: &Memory) -> bool {
        self.requirements
            .iter()
            .all(|&(key, status)| memory.has(key, status))
    }

    /// The required status for `key`, if any.
    pub fn status_of(&self, key: impl Into<MemoryKeyId>) -> Option<MemoryStatus> {
        let key = key.into();
        self.requirements
            .iter()
            .find(|(k, _)| *k == key)
            .map(|&(_, s)| s)
    }

    pub fn iter(&self) -> impl Iterator<Item = (MemoryKeyId, MemoryStatus)> + '_ {
        self.requirements.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.requirements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requirements.is_empty()
    }

    fn insert(&mut self, key: MemoryKeyId, status: MemoryStatus) {
        match self.requirements.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = status,
            None => self.requirements.push((key, status)),
        }
    }
}

impl FromIterator<(MemoryKeyId, MemoryStatus)> for EntryCondition {
    fn from_iter<I: IntoIterator<Item = (MemoryKeyId, MemoryStatus)>>(iter: I) -> Self {
        let mut cond = EntryCondition::new();
        for (key, status) in iter {
            cond.insert(key, status);
        }
        cond
    }
}
