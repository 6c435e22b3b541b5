//! Per-entity random source.
//!
//! Every brain owns one `EntityRng`, seeded from the run seed and its entity
//! id.  Behaviors draw all of their randomness (durations, shuffles, retry
//! jitter, ticker intervals) from the generator lent to them with the tick,
//! so a whole run replays exactly from a single `u64`.

use rand::distributions::uniform::{SampleRange, SampleUniform};
use rand::distributions::{Distribution, Standard};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::EntityId;

/// Golden-ratio increment; spreads adjacent entity ids across the seed space.
const SEED_SPREAD: u64 = 0x9e37_79b9_7f4a_7c15;

/// Deterministic generator owned by one brain.
#[derive(Clone, Debug)]
pub struct EntityRng {
    entity: EntityId,
    rng:    SmallRng,
}

impl EntityRng {
    pub fn new(run_seed: u64, entity: EntityId) -> Self {
        let seed = run_seed ^ u64::from(entity.0).wrapping_mul(SEED_SPREAD);
        Self { entity, rng: SmallRng::seed_from_u64(seed) }
    }

    /// The entity this generator was seeded for.
    #[inline]
    pub fn entity(&self) -> EntityId {
        self.entity
    }

    #[inline]
    pub fn random<T>(&mut self) -> T
    where
        Standard: Distribution<T>,
    {
        self.rng.r#gen()
    }

    /// Uniform draw from `range`; both `a..b` and `a..=b` are accepted.
    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: SampleUniform,
        R: SampleRange<T>,
    {
        self.rng.gen_range(range)
    }

    /// `true` with probability `p`, clamped into `[0, 1]`.
    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.rng.gen_bool(p.clamp(0.0, 1.0))
    }
}
