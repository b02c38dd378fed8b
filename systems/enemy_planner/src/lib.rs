#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic enemy planner that decides each activated enemy's step and strike.
//!
//! Every enemy chases the nearest unit of the opposing side by Manhattan
//! distance, takes at most one greedy step toward it and strikes when the
//! target ends up adjacent. There is no pathfinding: an enemy boxed in by
//! blockers simply stalls.

use kitchen_tactics_core::{
    BoardGrid, CellCoord, Command, EnemyPlan, Event, UnitId, UnitSnapshot, UnitView,
    NEIGHBOR_SCAN_ORDER,
};

/// Reach of an enemy strike.
const STRIKE_RANGE: u32 = 1;

/// Pure system that answers enemy activations with plans.
#[derive(Debug, Default)]
pub struct EnemyPlanner {
    plans_issued: u64,
}

impl EnemyPlanner {
    /// Creates a planner with no history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Consumes world events and the unit view to emit plan commands.
    pub fn handle(
        &mut self,
        events: &[Event],
        units: &UnitView,
        grid: BoardGrid,
        out: &mut Vec<Command>,
    ) {
        for event in events {
            if let Event::EnemyActivated { unit } = event {
                let plan = plan_for(*unit, units, grid);
                self.plans_issued = self.plans_issued.saturating_add(1);
                out.push(Command::ExecuteEnemyPlan { plan });
            }
        }
    }

    /// Number of plans emitted so far.
    #[must_use]
    pub fn plans_issued(&self) -> u64 {
        self.plans_issued
    }
}

/// Decides the step and strike for a single enemy.
#[must_use]
pub fn plan_for(enemy: UnitId, units: &UnitView, grid: BoardGrid) -> EnemyPlan {
    let idle = EnemyPlan::idle(enemy);
    let Some(attacker) = units.get(enemy) else {
        return idle;
    };
    let Some(origin) = attacker.cell() else {
        return idle;
    };
    let Some((target, target_cell)) = nearest_opponent(attacker, origin, units) else {
        return idle;
    };

    let mut position = origin;
    let mut step = None;
    if origin.manhattan_distance(target_cell) > STRIKE_RANGE {
        step = greedy_step(origin, target_cell, units, grid);
        if let Some(cell) = step {
            position = cell;
        }
    }

    let strike = (position.manhattan_distance(target_cell) <= STRIKE_RANGE).then_some(target.id);
    EnemyPlan {
        unit: enemy,
        step,
        strike,
    }
}

/// Closest unit of the opposing side. Ties go to the first unit in roster order.
fn nearest_opponent<'a>(
    attacker: &UnitSnapshot,
    origin: CellCoord,
    units: &'a UnitView,
) -> Option<(&'a UnitSnapshot, CellCoord)> {
    let mut best: Option<(&UnitSnapshot, CellCoord, u32)> = None;
    for candidate in units.owned_by(attacker.owner.opponent()) {
        let Some(cell) = candidate.cell() else {
            continue;
        };
        let distance = origin.manhattan_distance(cell);
        if best.map_or(true, |(_, _, closest)| distance < closest) {
            best = Some((candidate, cell, distance));
        }
    }
    best.map(|(unit, cell, _)| (unit, cell))
}

/// Free orthogonal neighbour closest to the target, scanning right, left,
/// down, up and keeping the first minimum.
fn greedy_step(
    origin: CellCoord,
    target: CellCoord,
    units: &UnitView,
    grid: BoardGrid,
) -> Option<CellCoord> {
    let mut best: Option<(CellCoord, u32)> = None;
    for direction in NEIGHBOR_SCAN_ORDER {
        let Some(cell) = grid.neighbor(origin, direction) else {
            continue;
        };
        if units.at(cell).is_some() {
            continue;
        }
        let distance = cell.manhattan_distance(target);
        if best.map_or(true, |(_, closest)| distance < closest) {
            best = Some((cell, distance));
        }
    }
    best.map(|(cell, _)| cell)
}
