//! Memory keys and the presence vocabulary used by entry conditions.

use std::fmt;
use std::marker::PhantomData;

// ── MemoryKeyId ───────────────────────────────────────────────────────────────

/// Type-erased memory key.
///
/// Entry conditions and erase lists mix keys of different value types, so
/// they hold `MemoryKeyId`s.  Obtain one from a typed key with
/// [`MemoryKey::id`] or `MemoryKeyId::from(key)`.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MemoryKeyId(pub u16);

impl fmt::Display for MemoryKeyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MemoryKeyId({})", self.0)
    }
}

// ── MemoryKey<T> ──────────────────────────────────────────────────────────────

/// A typed memory key.
///
/// Keys are plain constants declared by the application:
///
/// ```rust
/// use brain_memory::MemoryKey;
///
/// pub const HOME: MemoryKey<(i32, i32, i32)> = MemoryKey::new(0, "home");
/// pub const HUNGRY: MemoryKey<()> = MemoryKey::new(1, "hungry");
/// ```
///
/// Two keys must never share an id with different value types; the
/// [`MemoryBuilder`][crate::MemoryBuilder] rejects such a registration.
pub struct MemoryKey<T: 'static> {
    id:       MemoryKeyId,
    name:     &'static str,
    _phantom: PhantomData<fn() -> T>,
}

impl<T: 'static> Copy for MemoryKey<T> {}

impl<T: 'static> Clone for MemoryKey<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: 'static> MemoryKey<T> {
    pub const fn new(id: u16, name: &'static str) -> Self {
        Self {
            id: MemoryKeyId(id),
            name,
            _phantom: PhantomData,
        }
    }

    #[inline]
    pub fn id(self) -> MemoryKeyId {
        self.id
    }

    #[inline]
    pub fn name(self) -> &'static str {
        self.name
    }
}

impl<T: 'static> From<MemoryKey<T>> for MemoryKeyId {
    #[inline]
    fn from(key: MemoryKey<T>) -> MemoryKeyId {
        key.id
    }
}

impl<T: 'static> PartialEq for MemoryKey<T> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<T: 'static> Eq for MemoryKey<T> {}

impl<T: 'static> fmt::Debug for MemoryKey<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MemoryKey({}, {:?})", self.id.0, self.name)
    }
}

// ── MemoryStatus ──────────────────────────────────────────────────────────────

/// Required presence state for one key of an entry condition.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MemoryStatus {
    /// The slot must hold a value.
    ValuePresent,
    /// The slot must be empty.
    ValueAbsent,
    /// The key must be a legal slot for this entity, value or not.
    Registered,
}

impl fmt::Display for MemoryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MemoryStatus::ValuePresent => "present",
            MemoryStatus::ValueAbsent  => "absent",
            MemoryStatus::Registered   => "registered",
        };
        f.write_str(s)
    }
}
