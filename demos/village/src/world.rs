//! Village state shared by every villager, and the JSON run configuration.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result, ensure};
use brain_behavior::{DurationRange, RetryPolicy};
use brain_core::{BlockPos, EntityId, SimConfig, Tick};
use serde::{Deserialize, Serialize};

// ── Configuration ─────────────────────────────────────────────────────────────

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BedSpec {
    pub pos:       BlockPos,
    /// Unreachable beds are found but every path check to them fails.
    pub reachable: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct VillageConfig {
    pub sim:               SimConfig,
    pub villagers:         u32,
    pub think_every_ticks: u32,
    /// Ticks per day; night runs from `night_start` to the end of the day.
    pub day_length:        u64,
    pub night_start:       u64,
    pub idle_duration:     DurationRange,
    pub bed_retry:         RetryPolicy,
    pub beds:              Vec<BedSpec>,
}

impl Default for VillageConfig {
    fn default() -> Self {
        let bed = |x, reachable| BedSpec { pos: BlockPos::new(x, 64, 10), reachable };
        Self {
            sim:               SimConfig { start_tick: 0, total_ticks: 2_400, seed: 42 },
            villagers:         6,
            think_every_ticks: 2,
            day_length:        1_200,
            night_start:       800,
            idle_duration:     DurationRange { min: 40, max: 120 },
            bed_retry:         RetryPolicy::default(),
            beds:              vec![bed(0, true), bed(6, true), bed(12, true), bed(18, false)],
        }
    }
}

impl VillageConfig {
    /// Read a config file, or fall back to the defaults when `path` is `None`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config: VillageConfig = match path {
            None => VillageConfig::default(),
            Some(p) => {
                let file = std::fs::File::open(p)
                    .with_context(|| format!("opening config {}", p.display()))?;
                serde_json::from_reader(std::io::BufReader::new(file))
                    .with_context(|| format!("parsing config {}", p.display()))?
            }
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        ensure!(self.day_length > 0, "day_length must be positive");
        ensure!(
            self.night_start < self.day_length,
            "night_start {} must fall inside the {}-tick day",
            self.night_start,
            self.day_length
        );
        ensure!(
            self.idle_duration.min <= self.idle_duration.max,
            "idle_duration min exceeds max"
        );
        ensure!(
            self.bed_retry.min_increase <= self.bed_retry.max_increase && self.bed_retry.max_delay > 0,
            "bed_retry is inconsistent: {:?}",
            self.bed_retry
        );
        Ok(())
    }

    pub fn is_night(&self, now: Tick) -> bool {
        now.0 % self.day_length >= self.night_start
    }
}

// ── Village ───────────────────────────────────────────────────────────────────

/// The world handle lent to every behavior.
#[derive(Debug, Default)]
pub struct Village {
    pub beds:        BTreeMap<BlockPos, Option<EntityId>>,
    pub reachable:   Vec<BlockPos>,
    pub positions:   BTreeMap<EntityId, BlockPos>,
    pub is_night:    bool,
    pub path_checks: u64,
    pub greetings:   u64,
    pub hums:        u64,
}

impl Village {
    pub fn from_config(config: &VillageConfig) -> Self {
        let mut village = Village::default();
        for bed in &config.beds {
            village.beds.insert(bed.pos, None);
            if bed.reachable {
                village.reachable.push(bed.pos);
            }
        }
        for e in 0..config.villagers {
            village.positions.insert(EntityId(e), BlockPos::new(e as i32 * 3, 64, 0));
        }
        village
    }

    pub fn position(&self, entity: EntityId) -> BlockPos {
        self.positions.get(&entity).copied().unwrap_or_default()
    }

    pub fn bed_owner(&self, bed: BlockPos) -> Option<EntityId> {
        self.beds.get(&bed).copied().flatten()
    }

    pub fn can_reach(&self, bed: BlockPos) -> bool {
        self.reachable.contains(&bed)
    }
}
