//! `Memory`: one entity's typed fact store.
//!
//! The scheduler core needs five operations from it: `has`, `get`, `set`,
//! `set_with_expiry` and `erase`.  Absence is a normal answer everywhere;
//! nothing here fails because a value is missing.

use rustc_hash::FxHashMap;
use tracing::trace;

use crate::slot::Slot;
use crate::{MemoryError, MemoryKey, MemoryKeyId, MemoryResult, MemoryStatus};

/// Per-entity memory.  Build with [`MemoryBuilder`][crate::MemoryBuilder].
///
/// Only keys registered at build time are legal.  `set` on an unregistered
/// key is ignored, `get` returns `None`, and `has` answers `false` for every
/// [`MemoryStatus`].
pub struct Memory {
    slots: FxHashMap<MemoryKeyId, Slot>,
}

impl Memory {
    pub(crate) fn from_slots(slots: FxHashMap<MemoryKeyId, Slot>) -> Self {
        Self { slots }
    }

    // ── Presence ──────────────────────────────────────────────────────────

    /// `true` if `key` is a legal slot for this entity.
    #[inline]
    pub fn is_registered(&self, key: impl Into<MemoryKeyId>) -> bool {
        self.slots.contains_key(&key.into())
    }

    /// Check `key` against a required presence state.
    pub fn has(&self, key: impl Into<MemoryKeyId>, status: MemoryStatus) -> bool {
        let Some(slot) = self.slots.get(&key.into()) else {
            return false;
        };
        match status {
            MemoryStatus::Registered   => true,
            MemoryStatus::ValuePresent => slot.has_value(),
            MemoryStatus::ValueAbsent  => !slot.has_value(),
        }
    }

    /// Shorthand for `has(key, MemoryStatus::ValuePresent)`.
    #[inline]
    pub fn has_value(&self, key: impl Into<MemoryKeyId>) -> bool {
        self.has(key, MemoryStatus::ValuePresent)
    }

    // ── Reads ─────────────────────────────────────────────────────────────

    /// Fallible read distinguishing "unregistered" from "absent".
    pub fn try_get<T: 'static>(&self, key: MemoryKey<T>) -> MemoryResult<Option<&T>> {
        self.slot(key)?.get::<T>()
    }

    /// The value stored under `key`, or `None` if absent or unregistered.
    ///
    /// # Panics
    /// Panics if the slot was registered with a different value type.  Two
    /// keys sharing one id is a programming error.
    pub fn get<T: 'static>(&self, key: MemoryKey<T>) -> Option<&T> {
        match self.try_get(key) {
            Ok(value) => value,
            Err(MemoryError::Unregistered { .. }) => None,
            Err(e) => panic!("{e}"),
        }
    }

    /// Mutable access to the value under `key`.
    ///
    /// # Panics
    /// As for [`get`][Self::get].
    pub fn get_mut<T: 'static>(&mut self, key: MemoryKey<T>) -> Option<&mut T> {
        let slot = self.slots.get_mut(&key.id())?;
        match slot.get_mut::<T>() {
            Ok(value) => value,
            Err(e) => panic!("{e}"),
        }
    }

    /// Remaining lifetime of an expirable value, `None` if the value is
    /// absent or never expires.
    pub fn time_until_expiry(&self, key: impl Into<MemoryKeyId>) -> Option<u64> {
        self.slots
            .get(&key.into())
            .and_then(|s| s.stored.as_ref())
            .and_then(|s| s.ttl)
    }

    // ── Writes ────────────────────────────────────────────────────────────

    /// Store `value` with no expiry.  Ignored if `key` is unregistered.
    pub fn set<T: 'static>(&mut self, key: MemoryKey<T>, value: T) {
        self.put(key, value, None);
    }

    /// Store `value` for `ttl` ticks of [`tick`][Self::tick].
    ///
    /// A `ttl` of 0 stores nothing and erases any previous value.
    pub fn set_with_expiry<T: 'static>(&mut self, key: MemoryKey<T>, value: T, ttl: u64) {
        if ttl == 0 {
            self.erase(key);
            return;
        }
        self.put(key, value, Some(ttl));
    }

    /// `Some(v)` stores `v`, `None` erases.
    pub fn set_optional<T: 'static>(&mut self, key: MemoryKey<T>, value: Option<T>) {
        match value {
            Some(v) => self.set(key, v),
            None => self.erase(key),
        }
    }

    /// Clear the value under `key`.  The slot stays registered.
    pub fn erase(&mut self, key: impl Into<MemoryKeyId>) {
        if let Some(slot) = self.slots.get_mut(&key.into()) {
            slot.stored = None;
        }
    }

    /// Remove and return the value under `key`.
    ///
    /// # Panics
    /// As for [`get`][Self::get].
    pub fn take<T: 'static>(&mut self, key: MemoryKey<T>) -> Option<T> {
        let slot = self.slots.get_mut(&key.id())?;
        match slot.take::<T>() {
            Ok(value) => value,
            Err(e) => panic!("{e}"),
        }
    }

    /// Erase every value; registrations are kept.
    pub fn clear(&mut self) {
        for slot in self.slots.values_mut() {
            slot.stored = None;
        }
    }

    // ── Expiry ────────────────────────────────────────────────────────────

    /// Advance every expirable value by one tick and erase those that ran
    /// out.  Returns the number of values forgotten.
    pub fn tick(&mut self) -> usize {
        let mut forgotten = 0;
        for (id, slot) in self.slots.iter_mut() {
            if slot.tick_expiry() {
                trace!(memory = slot.name, key = id.0, "memory expired");
                slot.stored = None;
                forgotten += 1;
            }
        }
        forgotten
    }

    // ── Metadata ──────────────────────────────────────────────────────────

    /// Number of registered keys.
    pub fn registered_count(&self) -> usize {
        self.slots.len()
    }

    /// Number of keys currently holding a value.
    pub fn value_count(&self) -> usize {
        self.slots.values().filter(|s| s.has_value()).count()
    }

    /// Debug name of a registered key.
    pub fn key_name(&self, key: impl Into<MemoryKeyId>) -> Option<&'static str> {
        self.slots.get(&key.into()).map(|s| s.name)
    }

    fn slot<T: 'static>(&self, key: MemoryKey<T>) -> MemoryResult<&Slot> {
        self.slots.get(&key.id()).ok_or(MemoryError::Unregistered {
            id:   key.id(),
            name: key.name(),
        })
    }

    fn put<T: 'static>(&mut self, key: MemoryKey<T>, value: T, ttl: Option<u64>) {
        let Some(slot) = self.slots.get_mut(&key.id()) else {
            return;
        };
        if let Err(e) = slot.put(value, ttl) {
            panic!("{e}");
        }
    }
}

impl std::fmt::Debug for Memory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut present: Vec<&'static str> = self
            .slots
            .values()
            .filter(|s| s.has_value())
            .map(|s| s.name)
            .collect();
        present.sort_unstable();
        f.debug_struct("Memory")
            .field("registered", &self.slots.len())
            .field("present", &present)
            .finish()
    }
}
