//! Fluent builder for constructing a [`Memory`].
//!
//! # Usage
//!
//! ```rust
//! use brain_memory::{MemoryBuilder, MemoryKey, MemoryStatus};
//!
//! const HOME: MemoryKey<u64> = MemoryKey::new(0, "home");
//! const ANGRY_AT: MemoryKey<u32> = MemoryKey::new(1, "angry_at");
//!
//! let layout = MemoryBuilder::new().register(HOME).register(ANGRY_AT);
//!
//! // One layout per entity type; clone it for every entity.
//! let memory = layout.clone().build().unwrap();
//! assert!(memory.has(HOME, MemoryStatus::ValueAbsent));
//! ```

use rustc_hash::FxHashMap;

use crate::slot::Slot;
use crate::{Memory, MemoryError, MemoryKey, MemoryKeyId, MemoryResult};

/// Registration record kept until `build`.
#[derive(Clone)]
struct Registration {
    id:        MemoryKeyId,
    make_slot: fn(&'static str) -> Slot,
    name:      &'static str,
    type_id:   std::any::TypeId,
    type_name: &'static str,
}

/// Fluent builder for [`Memory`].
///
/// The builder is `Clone` so an entity type's key layout can be declared
/// once and stamped out per entity.
#[derive(Clone, Default)]
pub struct MemoryBuilder {
    keys: Vec<Registration>,
}

impl MemoryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `key` a legal slot.  Registering the same key twice is a no-op.
    pub fn register<T: 'static>(mut self, key: MemoryKey<T>) -> Self {
        self.keys.push(Registration {
            id:        key.id(),
            make_slot: Slot::new::<T>,
            name:      key.name(),
            type_id:   std::any::TypeId::of::<T>(),
            type_name: std::any::type_name::<T>(),
        });
        self
    }

    /// Number of registrations recorded so far (duplicates included).
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Build an empty [`Memory`] with every registered slot absent.
    ///
    /// Fails with [`MemoryError::TypeConflict`] if one id was registered
    /// with two different value types.
    pub fn build(self) -> MemoryResult<Memory> {
        let mut slots: FxHashMap<MemoryKeyId, Slot> = FxHashMap::default();
        for reg in self.keys {
            if let Some(existing) = slots.get(&reg.id) {
                if existing.type_id != reg.type_id {
                    return Err(MemoryError::TypeConflict {
                        id:     reg.id,
                        first:  existing.type_name,
                        second: reg.type_name,
                    });
                }
                continue;
            }
            slots.insert(reg.id, (reg.make_slot)(reg.name));
        }
        Ok(Memory::from_slots(slots))
    }
}
