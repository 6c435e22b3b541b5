//! The `Population` struct and its tick loop.

use brain_core::{BrainError, EntityId, SimClock, SimConfig, Tick};
use tracing::{debug, info};

use crate::{Brain, BrainObserver, SimError, SimResult};

/// A world plus every brain acting in it.
///
/// Each tick, brains are ticked one after another in ascending `EntityId`
/// order, each with exclusive access to the world.  An entity's behaviors
/// therefore see every change made by lower ids earlier in the same tick,
/// and a run is fully reproducible from `SimConfig::seed`.
pub struct Population<W> {
    /// Total ticks, start tick and seed.
    pub config: SimConfig,

    /// Tracks the current tick.
    pub clock: SimClock,

    /// Application world state, lent to every behavior through its context.
    pub world: W,

    /// Sorted by `EntityId`.
    brains: Vec<Brain<W>>,
}

impl<W> Population<W> {
    pub fn new(config: SimConfig, world: W) -> Self {
        Self {
            clock: config.make_clock(),
            config,
            world,
            brains: Vec::new(),
        }
    }

    /// Add a brain.  Fails if its entity already has one.
    pub fn insert(&mut self, brain: Brain<W>) -> SimResult<()> {
        match self.brains.binary_search_by_key(&brain.entity(), |b| b.entity()) {
            Ok(_) => Err(SimError::DuplicateEntity(brain.entity())),
            Err(at) => {
                self.brains.insert(at, brain);
                Ok(())
            }
        }
    }

    /// Remove an entity's brain, force-stopping its running behaviors first.
    pub fn remove(&mut self, entity: EntityId) -> SimResult<Brain<W>> {
        let at = self.position(entity)?;
        let mut brain = self.brains.remove(at);
        brain.stop_all(&mut self.world, self.clock.now());
        Ok(brain)
    }

    pub fn brain(&self, entity: EntityId) -> SimResult<&Brain<W>> {
        let at = self.position(entity)?;
        Ok(&self.brains[at])
    }

    pub fn brain_mut(&mut self, entity: EntityId) -> SimResult<&mut Brain<W>> {
        let at = self.position(entity)?;
        Ok(&mut self.brains[at])
    }

    /// Brains in ascending `EntityId` order.
    pub fn brains(&self) -> impl Iterator<Item = &Brain<W>> + '_ {
        self.brains.iter()
    }

    pub fn brains_mut(&mut self) -> impl Iterator<Item = &mut Brain<W>> + '_ {
        self.brains.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.brains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.brains.is_empty()
    }

    fn position(&self, entity: EntityId) -> SimResult<usize> {
        self.brains
            .binary_search_by_key(&entity, |b| b.entity())
            .map_err(|_| SimError::Core(BrainError::EntityNotFound(entity)))
    }

    // ── Tick loop ─────────────────────────────────────────────────────────

    /// Run from the current tick to `config.end_tick()`.
    pub fn run<O: BrainObserver>(&mut self, observer: &mut O) {
        let end = self.config.end_tick();
        info!(
            brains = self.brains.len(),
            from = self.clock.now().0,
            to = end.0,
            "population run started"
        );
        while self.clock.now() < end {
            self.step(observer);
        }
        observer.on_run_end(self.clock.now());
    }

    /// Run exactly `n` ticks from the current position (ignores `end_tick`).
    pub fn run_ticks<O: BrainObserver>(&mut self, n: u64, observer: &mut O) {
        for _ in 0..n {
            self.step(observer);
        }
    }

    /// Process the current tick and advance the clock.  Returns the number
    /// of brains that thought.
    pub fn step<O: BrainObserver>(&mut self, observer: &mut O) -> usize {
        let now: Tick = self.clock.now();
        observer.on_tick_start(now);
        let mut thought = 0;
        for brain in &mut self.brains {
            if brain.tick(&mut self.world, now, observer) {
                thought += 1;
            }
        }
        observer.on_tick_end(now, thought);
        debug!(tick = now.0, thought, "tick complete");
        self.clock.advance();
        thought
    }

    /// Force-stop every behavior of every brain.
    pub fn stop_all(&mut self) {
        let now = self.clock.now();
        for brain in &mut self.brains {
            brain.stop_all(&mut self.world, now);
        }
    }
}
