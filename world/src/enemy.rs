//! Sequencing of the enemy phase: one enemy at a time, in roster order.

use kitchen_tactics_core::{CellCoord, EnemyPlan, Event, Owner, Phase, Placement, UnitId};

use crate::{combat, schedule::Deferred, World};

impl World {
    pub(crate) fn begin_enemy_phase(&mut self) {
        self.enemy_queue = self.roster.ids_owned_by(Owner::Enemy).into();
        self.activate_next_enemy();
    }

    /// Arms the pacing timer for the next enemy able to act, or the phase tail
    /// once the queue is exhausted or no player unit is left to fight.
    pub(crate) fn activate_next_enemy(&mut self) {
        if self.roster.count(Owner::Player) == 0 {
            self.enemy_queue.clear();
        }
        while let Some(id) = self.enemy_queue.pop_front() {
            let ready = self
                .roster
                .get(id)
                .is_some_and(|unit| unit.owner == Owner::Enemy && !unit.is_turn_over());
            if ready {
                self.schedule
                    .arm(self.rules.timing.enemy_pacing, Deferred::ActivateEnemy(id));
                return;
            }
        }
        self.schedule.arm(
            self.rules.timing.enemy_phase_tail,
            Deferred::FinishEnemyPhase,
        );
    }

    pub(crate) fn activate_enemy(&mut self, id: UnitId, out_events: &mut Vec<Event>) {
        let alive = self
            .roster
            .get(id)
            .is_some_and(|unit| !unit.is_turn_over());
        if alive {
            self.awaiting_plan = Some(id);
            out_events.push(Event::EnemyActivated { unit: id });
        } else {
            self.activate_next_enemy();
        }
    }

    /// Applies the plan for the enemy currently awaiting one.
    ///
    /// An invalid step is dropped but the strike is still attempted from the
    /// enemy's current cell.
    pub(crate) fn execute_enemy_plan(&mut self, plan: EnemyPlan, out_events: &mut Vec<Event>) {
        if self.turn.phase != Phase::EnemyActing || self.awaiting_plan != Some(plan.unit) {
            return;
        }
        self.awaiting_plan = None;

        let moved = plan
            .step
            .is_some_and(|step| self.step_enemy(plan.unit, step, out_events));

        match plan.strike {
            Some(target) if moved => self.schedule.arm(
                self.rules.timing.enemy_step_pause,
                Deferred::EnemyStrike {
                    unit: plan.unit,
                    target,
                },
            ),
            Some(target) => {
                self.enemy_strike(plan.unit, target, out_events);
                self.activate_next_enemy();
            }
            None => self.activate_next_enemy(),
        }
    }

    fn step_enemy(&mut self, id: UnitId, step: CellCoord, out_events: &mut Vec<Event>) -> bool {
        if !self.grid.contains(step) || self.roster.is_occupied(step) {
            return false;
        }
        let Some(unit) = self.roster.get_mut(id) else {
            return false;
        };
        let Some(from) = unit.placement.cell() else {
            return false;
        };
        if from.manhattan_distance(step) != 1 {
            return false;
        }
        unit.placement = Placement::Board(step);
        unit.has_moved = true;
        out_events.push(Event::UnitMoved {
            unit: id,
            from,
            to: step,
        });
        true
    }

    /// Flat hit for the enemy's attack against an adjacent player unit.
    pub(crate) fn enemy_strike(&mut self, id: UnitId, target: UnitId, out_events: &mut Vec<Event>) {
        let Some(enemy) = self.roster.get(id) else {
            return;
        };
        let Some(victim) = self.roster.get(target) else {
            return;
        };
        let in_reach = match (enemy.placement.cell(), victim.placement.cell()) {
            (Some(from), Some(to)) => from.manhattan_distance(to) <= 1,
            _ => false,
        };
        if victim.owner != enemy.owner.opponent() || !in_reach {
            return;
        }
        let power = enemy.attack;
        if let Some(enemy) = self.roster.get_mut(id) {
            enemy.has_attacked = true;
        }
        combat::deal_damage(&mut self.roster, target, power, out_events);
    }

    /// Ends the enemy phase: either the battle is won or every unit is reset
    /// and control returns to the player.
    pub(crate) fn finish_enemy_phase(&mut self, out_events: &mut Vec<Event>) {
        self.enemy_queue.clear();
        if self.check_victory() {
            return;
        }
        for unit in self.roster.all_mut() {
            unit.reset_turn();
        }
        self.set_side(Owner::Player, out_events);
        self.enter_phase(Phase::Idle, out_events);
    }
}
