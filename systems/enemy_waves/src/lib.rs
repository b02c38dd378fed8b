#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic wave system that populates each new battle with scaled enemies.

use std::collections::HashSet;

use kitchen_tactics_core::{BoardGrid, CellCoord, Command, Event, IngredientKind, UnitView};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Configuration parameters required to construct the wave system.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    rng_seed: u64,
    wave_cap: u32,
    wave_base: u32,
    level_divisor_tenths: u32,
    boss_level: Option<u32>,
    placement_attempts: u32,
    spawn_columns: u32,
}

impl Config {
    /// Creates the standard wave scaling seeded with `rng_seed`.
    #[must_use]
    pub const fn new(rng_seed: u64) -> Self {
        Self {
            rng_seed,
            wave_cap: 6,
            wave_base: 3,
            level_divisor_tenths: 12,
            boss_level: Some(5),
            placement_attempts: 8,
            spawn_columns: 3,
        }
    }

    /// Overrides the battle level on which the boss joins, or disables it.
    #[must_use]
    pub const fn with_boss_level(mut self, boss_level: Option<u32>) -> Self {
        self.boss_level = boss_level;
        self
    }

    /// Number of trash enemies a wave at `level` aims to place.
    #[must_use]
    pub const fn enemy_count(&self, level: u32) -> u32 {
        let scaled = self.wave_base.saturating_add(level / 2);
        if scaled < self.wave_cap {
            scaled
        } else {
            self.wave_cap
        }
    }

    /// Level every enemy of a wave at `level` is upgraded to.
    #[must_use]
    pub const fn target_level(&self, level: u32) -> u32 {
        if self.level_divisor_tenths == 0 {
            return level;
        }
        let scaled = level.saturating_mul(10) / self.level_divisor_tenths;
        if scaled > 1 {
            scaled
        } else {
            1
        }
    }
}

/// Pure system that answers every battle start with enemy spawn commands.
#[derive(Debug)]
pub struct EnemyWaves {
    config: Config,
    rng: ChaCha8Rng,
}

impl EnemyWaves {
    /// Creates a new wave system using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            config,
            rng: ChaCha8Rng::seed_from_u64(config.rng_seed),
        }
    }

    /// Consumes world events and the unit view to emit spawn commands.
    pub fn handle(
        &mut self,
        events: &[Event],
        units: &UnitView,
        grid: BoardGrid,
        out: &mut Vec<Command>,
    ) {
        for event in events {
            if let Event::BattleStarted { level } = event {
                self.spawn_wave(*level, units, grid, out);
            }
        }
    }

    fn spawn_wave(
        &mut self,
        level: u32,
        units: &UnitView,
        grid: BoardGrid,
        out: &mut Vec<Command>,
    ) {
        if grid.columns() == 0 || grid.rows() == 0 {
            return;
        }
        let mut occupied: HashSet<CellCoord> =
            units.iter().filter_map(|unit| unit.cell()).collect();
        let target_level = self.config.target_level(level);

        // The boss corner is claimed before any trash is placed.
        if self.config.boss_level == Some(level) {
            let corner = CellCoord::new(grid.columns() - 1, grid.rows() - 1);
            if occupied.insert(corner) {
                out.push(Command::SpawnEnemy {
                    kind: IngredientKind::KitchenDemon,
                    cell: corner,
                    level: target_level,
                });
            }
        }

        for _ in 0..self.config.enemy_count(level) {
            let Some(cell) = self.find_free_cell(grid, &occupied) else {
                continue;
            };
            let _ = occupied.insert(cell);
            out.push(Command::SpawnEnemy {
                kind: IngredientKind::Trash,
                cell,
                level: target_level,
            });
        }
    }

    /// Random cell in the spawn columns, giving up after the configured attempts.
    fn find_free_cell(
        &mut self,
        grid: BoardGrid,
        occupied: &HashSet<CellCoord>,
    ) -> Option<CellCoord> {
        let width = self.config.spawn_columns.clamp(1, grid.columns());
        let first_column = grid.columns() - width;
        for _ in 0..self.config.placement_attempts {
            let cell = CellCoord::new(
                first_column + self.rng.gen_range(0..width),
                self.rng.gen_range(0..grid.rows()),
            );
            if !occupied.contains(&cell) {
                return Some(cell);
            }
        }
        None
    }
}
