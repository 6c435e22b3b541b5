//! Identifiers for the two things a brain is keyed by: the entity that owns
//! it and the activities its behaviors are grouped under.

use std::fmt;

macro_rules! id_newtype {
    ($(#[$attr:meta])* $name:ident($inner:ty), $prefix:literal) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "serde", serde(transparent))]
        pub struct $name(pub $inner);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "#{}"), self.0)
            }
        }

        impl From<$inner> for $name {
            #[inline]
            fn from(raw: $inner) -> Self {
                $name(raw)
            }
        }
    };
}

id_newtype! {
    /// The entity a brain belongs to.  A population holds at most one brain
    /// per id and ticks them in id order.
    EntityId(u32), "entity"
}

id_newtype! {
    /// An application-defined activity (idle, work, rest, panic...).
    ///
    /// Activities are plain labels: what they mean is decided by which
    /// behaviors the application registers under them.
    ActivityId(u16), "activity"
}
