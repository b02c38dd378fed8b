#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Kitchen Tactics.

mod combat;
mod enemy;
mod progression;
mod recipes;
mod roster;
mod rules;
mod schedule;
mod turn;
mod unit;

use std::{collections::VecDeque, time::Duration};

use kitchen_tactics_core::{BoardGrid, Command, Event, Placement, UnitId, WELCOME_BANNER};

pub use recipes::RecipeBook;
pub use rules::{Deployment, Rules, Timing};
pub use unit::BaseStats;

use progression::Economy;
use roster::Roster;
use schedule::{Deferred, Schedule};
use turn::TurnState;

/// Represents the authoritative Kitchen Tactics world state.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    rules: Rules,
    grid: BoardGrid,
    roster: Roster,
    turn: TurnState,
    economy: Economy,
    schedule: Schedule,
    enemy_queue: VecDeque<UnitId>,
    awaiting_plan: Option<UnitId>,
}

impl World {
    /// Creates a world at the start of the first battle.
    #[must_use]
    pub fn new(rules: Rules) -> Self {
        let grid = BoardGrid::new(rules.columns, rules.rows);
        let mut roster = Roster::new();
        for deployment in &rules.opening {
            if grid.contains(deployment.cell) && !roster.is_occupied(deployment.cell) {
                let _ = roster.spawn(
                    deployment.kind,
                    deployment.owner,
                    Placement::Board(deployment.cell),
                );
            }
        }
        Self {
            banner: WELCOME_BANNER,
            economy: Economy::new(rules.starting_gold),
            rules,
            grid,
            roster,
            turn: TurnState::new(),
            schedule: Schedule::new(),
            enemy_queue: VecDeque::new(),
            awaiting_plan: None,
        }
    }

    /// Drains the timer for `dt`, running every effect whose delay elapsed.
    ///
    /// Unspent time carries over into the next window. The loop stops while
    /// an enemy waits for its plan so the planner answers before time moves on.
    fn advance_time(&mut self, dt: Duration, out_events: &mut Vec<Event>) {
        let mut budget = dt;
        while self.awaiting_plan.is_none() {
            let Some((effect, leftover)) = self.schedule.advance(budget) else {
                break;
            };
            budget = leftover;
            self.run_deferred(effect, out_events);
        }
    }

    fn run_deferred(&mut self, effect: Deferred, out_events: &mut Vec<Event>) {
        match effect {
            Deferred::ResolveAction(action) => self.resolve_action(action, out_events),
            Deferred::OpenShop => self.open_shop(out_events),
            Deferred::BeginEnemyPhase => self.begin_enemy_phase(),
            Deferred::ActivateEnemy(unit) => self.activate_enemy(unit, out_events),
            Deferred::EnemyStrike { unit, target } => {
                self.enemy_strike(unit, target, out_events);
                self.activate_next_enemy();
            }
            Deferred::FinishEnemyPhase => self.finish_enemy_phase(out_events),
        }
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new(Rules::default())
    }
}

/// Applies the provided command to the world, mutating state deterministically.
///
/// Commands that are not valid in the current state are ignored and emit
/// nothing, with the single exception of an out-of-zone bench deployment which
/// reports [`Event::DeploymentRejected`].
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::Tick { dt } => {
            out_events.push(Event::TimeAdvanced { dt });
            world.advance_time(dt, out_events);
        }
        Command::SelectCell { cell } => {
            if world.accepts_player_input() {
                world.select_cell(cell, out_events);
            }
        }
        Command::HoverCell { cell } => {
            if world.accepts_player_input() {
                world.hover(cell);
            }
        }
        Command::ClickBenchSlot { index } => {
            if world.accepts_player_input() {
                world.click_bench_slot(index, out_events);
            }
        }
        Command::ChooseAction { action } => {
            if world.accepts_player_input() {
                world.choose_action(action, out_events);
            }
        }
        Command::Cancel => {
            if world.accepts_player_input() {
                world.cancel(out_events);
            }
        }
        Command::Wait => {
            if world.accepts_player_input() {
                world.wait(out_events);
            }
        }
        Command::EndTurn => {
            if world.accepts_player_input() {
                world.end_turn(out_events);
            }
        }
        Command::RerollShop => {
            if world.accepts_shop_input() {
                world.reroll_shop(out_events);
            }
        }
        Command::BuyCard { card } => {
            if world.accepts_shop_input() {
                world.buy_card(card, out_events);
            }
        }
        Command::AdvanceBattle => {
            if world.accepts_shop_input() {
                world.advance_battle(out_events);
            }
        }
        Command::ExecuteEnemyPlan { plan } => world.execute_enemy_plan(plan, out_events),
        Command::StockShop { kinds } => world.stock_shop(kinds, out_events),
        Command::SpawnEnemy { kind, cell, level } => {
            world.spawn_enemy(kind, cell, level, out_events);
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use kitchen_tactics_core::{
        ActionMenu, BoardGrid, CellCoord, CutInSnapshot, GhostPreview, Highlight,
        HighlightIntent, Owner, Phase, RecipeHint, ShopCard, UnitId, UnitSnapshot, UnitView,
    };

    use super::{schedule::Deferred, RecipeBook, Rules, World};

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Rules the world was created with.
    #[must_use]
    pub fn rules(world: &World) -> &Rules {
        &world.rules
    }

    /// Board dimensions.
    #[must_use]
    pub fn grid(world: &World) -> BoardGrid {
        world.grid
    }

    /// Active phase of the turn controller.
    #[must_use]
    pub fn phase(world: &World) -> Phase {
        world.turn.phase
    }

    /// Side that owns the turn.
    #[must_use]
    pub fn side(world: &World) -> Owner {
        world.turn.side
    }

    /// Reports whether a deferred effect is pending, freezing player input.
    #[must_use]
    pub fn is_input_frozen(world: &World) -> bool {
        !world.schedule.is_idle()
    }

    /// Currently selected unit, if any.
    #[must_use]
    pub fn selected(world: &World) -> Option<UnitId> {
        world.turn.selection.map(|selection| selection.unit)
    }

    /// Captures a read-only view of the deployed units in roster order.
    #[must_use]
    pub fn unit_view(world: &World) -> UnitView {
        UnitView::from_snapshots(
            world
                .roster
                .board()
                .iter()
                .map(|unit| unit.snapshot())
                .collect(),
        )
    }

    /// Bench units in display order.
    #[must_use]
    pub fn bench_view(world: &World) -> Vec<UnitSnapshot> {
        world
            .roster
            .bench()
            .iter()
            .map(|unit| unit.snapshot())
            .collect()
    }

    /// Looks up a unit on the board or the bench.
    #[must_use]
    pub fn unit(world: &World, id: UnitId) -> Option<UnitSnapshot> {
        world
            .roster
            .get(id)
            .or_else(|| {
                world
                    .roster
                    .bench_position(id)
                    .and_then(|index| world.roster.bench_unit(index))
            })
            .map(|unit| unit.snapshot())
    }

    /// First deployed unit in roster order standing on `cell`.
    #[must_use]
    pub fn unit_at(world: &World, cell: CellCoord) -> Option<UnitSnapshot> {
        world.roster.at(cell).map(|unit| unit.snapshot())
    }

    /// Number of enemies still on the board.
    #[must_use]
    pub fn enemies_remaining(world: &World) -> usize {
        world.roster.count(Owner::Enemy)
    }

    /// Cells the current phase accepts clicks on, with their intent.
    #[must_use]
    pub fn highlights(world: &World) -> &[Highlight] {
        &world.turn.highlights
    }

    /// Cells an area skill would reach from the hovered target.
    #[must_use]
    pub fn splash_preview(world: &World) -> Vec<Highlight> {
        world
            .turn
            .splash
            .iter()
            .map(|cell| Highlight {
                cell: *cell,
                intent: HighlightIntent::Splash,
            })
            .collect()
    }

    /// Recipe a move to the hovered cell would enable.
    #[must_use]
    pub fn ghost_preview(world: &World) -> Option<GhostPreview> {
        world.turn.ghost
    }

    /// Cell under the pointer, if it is on the board.
    #[must_use]
    pub fn hovered(world: &World) -> Option<CellCoord> {
        world.turn.hover
    }

    /// Descriptor of the running skill cut-in.
    #[must_use]
    pub fn cut_in(world: &World) -> Option<CutInSnapshot> {
        let cut_in = world.turn.cut_in?;
        let progress_permille = match world.schedule.pending() {
            Some(Deferred::ResolveAction(_)) => world.schedule.progress_permille(),
            _ => 1000,
        };
        Some(CutInSnapshot {
            source: cut_in.source,
            partner: cut_in.partner,
            recipe_name: cut_in.recipe.name(),
            progress_permille,
        })
    }

    /// Options offered by the action menu, while it is open.
    #[must_use]
    pub fn action_menu(world: &World) -> Option<ActionMenu> {
        world.action_menu()
    }

    /// Cards in the current shop offer.
    #[must_use]
    pub fn shop_offer(world: &World) -> &[ShopCard] {
        &world.economy.offer
    }

    /// Gold available to the player.
    #[must_use]
    pub fn gold(world: &World) -> u32 {
        world.economy.gold
    }

    /// Current battle level, starting at one.
    #[must_use]
    pub fn battle_level(world: &World) -> u32 {
        world.economy.level
    }

    /// Adjacent same-side pairs that form a recipe.
    #[must_use]
    pub fn recipe_hints(world: &World) -> Vec<RecipeHint> {
        world
            .rules
            .recipes
            .detect_all(&world.grid, world.roster.board())
    }

    /// Recipe catalog in use.
    #[must_use]
    pub fn recipe_book(world: &World) -> &RecipeBook {
        &world.rules.recipes
    }

    /// Enemy waiting for a planner decision, if any.
    #[must_use]
    pub fn awaiting_enemy(world: &World) -> Option<UnitId> {
        world.awaiting_plan
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kitchen_tactics_core::{IngredientKind, Owner, Phase};

    #[test]
    fn opening_layout_places_five_units() {
        let world = World::default();
        let view = query::unit_view(&world);
        assert_eq!(view.iter().count(), 5);
        assert_eq!(view.owned_by(Owner::Player).count(), 2);
        assert_eq!(query::enemies_remaining(&world), 3);
        assert_eq!(query::gold(&world), 10);
        assert_eq!(query::battle_level(&world), 1);
        assert_eq!(query::phase(&world), Phase::Idle);
        assert_eq!(query::side(&world), Owner::Player);
        assert_eq!(query::welcome_banner(&world), WELCOME_BANNER);
    }

    #[test]
    fn opening_skips_cells_off_the_board() {
        let rules = Rules {
            columns: 5,
            ..Rules::default()
        };
        let world = World::new(rules);
        let view = query::unit_view(&world);
        assert!(view
            .iter()
            .all(|unit| unit.cell().is_some_and(|cell| cell.column() < 5)));
        assert_eq!(view.owned_by(Owner::Enemy).count(), 2);
    }

    #[test]
    fn opening_pair_is_hinted() {
        let world = World::default();
        let hints = query::recipe_hints(&world);
        assert_eq!(hints.len(), 1);
        assert!(hints[0]
            .recipe
            .matches(IngredientKind::Potato, IngredientKind::Pork));
    }

    #[test]
    fn tick_reports_elapsed_time() {
        let mut world = World::default();
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::Tick {
                dt: Duration::from_millis(16),
            },
            &mut events,
        );
        assert_eq!(
            events,
            vec![Event::TimeAdvanced {
                dt: Duration::from_millis(16)
            }]
        );
    }
}
