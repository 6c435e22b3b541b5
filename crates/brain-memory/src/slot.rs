//! Type-erased value slots.
//!
//! # Design
//!
//! Each registered key owns one [`Slot`].  The slot records the value type
//! the key was registered with, so reads through a key of the wrong type
//! are caught as [`MemoryError::TypeMismatch`] instead of silently failing
//! a downcast.  A stored value optionally carries a countdown in ticks;
//! [`Slot::tick_expiry`] decrements it and reports when it runs out.

use std::any::{Any, TypeId};

use crate::{MemoryError, MemoryResult};

/// A stored value plus its remaining lifetime (`None` = never expires).
pub(crate) struct StoredValue {
    pub(crate) value: Box<dyn Any>,
    pub(crate) ttl:   Option<u64>,
}

/// One registered memory key's storage.
pub(crate) struct Slot {
    pub(crate) name:      &'static str,
    pub(crate) type_id:   TypeId,
    pub(crate) type_name: &'static str,
    pub(crate) stored:    Option<StoredValue>,
}

impl Slot {
    pub(crate) fn new<T: 'static>(name: &'static str) -> Self {
        Self {
            name,
            type_id:   TypeId::of::<T>(),
            type_name: std::any::type_name::<T>(),
            stored:    None,
        }
    }

    #[inline]
    pub(crate) fn has_value(&self) -> bool {
        self.stored.is_some()
    }

    pub(crate) fn check_type<T: 'static>(&self) -> MemoryResult<()> {
        if self.type_id == TypeId::of::<T>() {
            Ok(())
        } else {
            Err(MemoryError::TypeMismatch {
                name:      self.name,
                stored:    self.type_name,
                requested: std::any::type_name::<T>(),
            })
        }
    }

    pub(crate) fn get<T: 'static>(&self) -> MemoryResult<Option<&T>> {
        self.check_type::<T>()?;
        Ok(self
            .stored
            .as_ref()
            .and_then(|s| s.value.downcast_ref::<T>()))
    }

    pub(crate) fn get_mut<T: 'static>(&mut self) -> MemoryResult<Option<&mut T>> {
        self.check_type::<T>()?;
        Ok(self
            .stored
            .as_mut()
            .and_then(|s| s.value.downcast_mut::<T>()))
    }

    pub(crate) fn put<T: 'static>(&mut self, value: T, ttl: Option<u64>) -> MemoryResult<()> {
        self.check_type::<T>()?;
        self.stored = Some(StoredValue { value: Box::new(value), ttl });
        Ok(())
    }

    pub(crate) fn take<T: 'static>(&mut self) -> MemoryResult<Option<T>> {
        self.check_type::<T>()?;
        Ok(self
            .stored
            .take()
            .and_then(|s| s.value.downcast::<T>().ok())
            .map(|b| *b))
    }

    /// Advance an expirable value by one tick.
    ///
    /// Returns `true` if the value has expired and should be erased.
    pub(crate) fn tick_expiry(&mut self) -> bool {
        match self.stored.as_mut().and_then(|s| s.ttl.as_mut()) {
            Some(ttl) => {
                *ttl = ttl.saturating_sub(1);
                *ttl == 0
            }
            None => false,
        }
    }
}
