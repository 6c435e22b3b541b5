//! Integer block coordinates.
//!
//! Behaviors that remember places (points of interest, unreachable targets)
//! key their bookkeeping by `BlockPos`.  `as_long` packs a position into one
//! `u64` for compact hash keys.

use std::fmt;

/// A cell in the integer world grid.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BlockPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

const XZ_BITS: u32 = 26;
const Y_BITS: u32 = 12;
const XZ_MASK: u64 = (1 << XZ_BITS) - 1;
const Y_MASK: u64 = (1 << Y_BITS) - 1;

impl BlockPos {
    pub const ZERO: BlockPos = BlockPos { x: 0, y: 0, z: 0 };

    #[inline]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Position shifted by `(dx, dy, dz)`, clamped to the `i32` grid.
    #[inline]
    pub fn offset(self, dx: i32, dy: i32, dz: i32) -> Self {
        Self::new(
            self.x.saturating_add(dx),
            self.y.saturating_add(dy),
            self.z.saturating_add(dz),
        )
    }

    /// Squared Euclidean distance between block corners, saturating at
    /// `i64::MAX` for points at opposite ends of the grid.
    pub fn dist_sqr(self, other: BlockPos) -> i64 {
        let sq = |a: i32, b: i32| {
            let d = i64::from(a) - i64::from(b);
            d.saturating_mul(d)
        };
        sq(self.x, other.x)
            .saturating_add(sq(self.y, other.y))
            .saturating_add(sq(self.z, other.z))
    }

    /// `true` if `other` is within `radius` blocks (inclusive, Euclidean).
    #[inline]
    pub fn closer_than(self, other: BlockPos, radius: i64) -> bool {
        self.dist_sqr(other) <= radius.saturating_mul(radius)
    }

    /// Pack into 64 bits: 26 bits x, 26 bits z, 12 bits y (two's complement).
    ///
    /// Coordinates outside ±2^25 horizontally or ±2^11 vertically alias.
    pub fn as_long(self) -> u64 {
        ((self.x as u64 & XZ_MASK) << (XZ_BITS + Y_BITS))
            | ((self.z as u64 & XZ_MASK) << Y_BITS)
            | (self.y as u64 & Y_MASK)
    }

    /// Inverse of [`as_long`][Self::as_long].
    pub fn from_long(packed: u64) -> Self {
        let x = sign_extend((packed >> (XZ_BITS + Y_BITS)) & XZ_MASK, XZ_BITS);
        let z = sign_extend((packed >> Y_BITS) & XZ_MASK, XZ_BITS);
        let y = sign_extend(packed & Y_MASK, Y_BITS);
        Self::new(x, y, z)
    }
}

#[inline]
fn sign_extend(value: u64, bits: u32) -> i32 {
    let shift = 64 - bits;
    (((value << shift) as i64) >> shift) as i32
}

impl fmt::Display for BlockPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}, {}]", self.x, self.y, self.z)
    }
}
