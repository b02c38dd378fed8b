#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Game session that owns one world together with every system that answers it.
//!
//! Adapters talk to a [`Session`] instead of wiring systems themselves: each
//! input command is applied to the world and the resulting events are pumped
//! through the enemy planner, the shop and the wave generator until no system
//! has anything left to say.

mod config;

use std::time::Duration;

use kitchen_tactics_core::{ActionKind, CardId, CellCoord, Command, Cue, Event};
use kitchen_tactics_system_enemy_planner::EnemyPlanner;
use kitchen_tactics_system_enemy_waves::{self as waves, EnemyWaves};
use kitchen_tactics_system_shop::{self as shop, Shop};
use kitchen_tactics_world::{self as world, query, World};
use tracing::{debug, info, trace};

pub use config::{ConfigError, SessionConfig, MIN_COLUMNS};

/// Mixed into the session seed so the wave generator does not mirror the shop draws.
const WAVE_SEED_SALT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Upper bound on system round trips triggered by a single command.
const MAX_PUMP_ROUNDS: usize = 64;

/// One running game.
#[derive(Debug)]
pub struct Session {
    world: World,
    planner: EnemyPlanner,
    shop: Shop,
    waves: EnemyWaves,
    log: Vec<Event>,
    cues: Vec<Cue>,
}

impl Session {
    /// Validates the configuration and starts the first battle.
    pub fn new(config: SessionConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let seed = config.seed;
        info!(
            seed,
            columns = config.rules.columns,
            rows = config.rules.rows,
            "session started"
        );
        Ok(Self {
            world: World::new(config.rules),
            planner: EnemyPlanner::new(),
            shop: Shop::new(shop::Config::new(seed)),
            waves: EnemyWaves::new(waves::Config::new(seed ^ WAVE_SEED_SALT)),
            log: Vec::new(),
            cues: Vec::new(),
        })
    }

    /// Read-only access for [`query`] functions.
    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Every event emitted since the session started.
    #[must_use]
    pub fn events(&self) -> &[Event] {
        &self.log
    }

    /// Takes the presentation cues fired since the last drain.
    pub fn drain_cues(&mut self) -> Vec<Cue> {
        std::mem::take(&mut self.cues)
    }

    /// Applies `command` and pumps the systems until they fall silent.
    ///
    /// Returns every event produced along the way. Commands the world refuses
    /// produce nothing.
    pub fn submit(&mut self, command: Command) -> Vec<Event> {
        let label = command_label(&command);
        let silent = updates_without_events(&command);
        let mut events = Vec::new();
        world::apply(&mut self.world, command, &mut events);
        if events.is_empty() {
            if silent {
                trace!(command = label, hovered = ?query::hovered(&self.world), "pointer moved");
            } else {
                debug!(command = label, phase = ?query::phase(&self.world), "command ignored");
            }
            return events;
        }

        let mut produced = Vec::new();
        for _ in 0..MAX_PUMP_ROUNDS {
            if events.is_empty() {
                break;
            }
            self.observe(&events);

            let units = query::unit_view(&self.world);
            let grid = query::grid(&self.world);
            let mut commands = Vec::new();
            self.planner.handle(&events, &units, grid, &mut commands);
            self.shop.handle(&events, &mut commands);
            self.waves.handle(&events, &units, grid, &mut commands);

            produced.append(&mut events);
            for command in commands {
                world::apply(&mut self.world, command, &mut events);
            }
        }
        if !events.is_empty() {
            self.observe(&events);
            produced.append(&mut events);
        }
        produced
    }

    /// Selects, moves, deploys or targets depending on the current phase.
    pub fn select_cell(&mut self, cell: CellCoord) -> Vec<Event> {
        self.submit(Command::SelectCell { cell })
    }

    /// Moves the pointer, refreshing hover previews.
    pub fn hover_cell(&mut self, cell: Option<CellCoord>) -> Vec<Event> {
        self.submit(Command::HoverCell { cell })
    }

    /// Picks a bench unit, or answers a pending merge with it.
    pub fn click_bench_slot(&mut self, index: usize) -> Vec<Event> {
        self.submit(Command::ClickBenchSlot { index })
    }

    /// Chooses an entry of the open action menu.
    pub fn choose_action(&mut self, action: ActionKind) -> Vec<Event> {
        self.submit(Command::ChooseAction { action })
    }

    /// Backs out of the current selection step.
    pub fn cancel(&mut self) -> Vec<Event> {
        self.submit(Command::Cancel)
    }

    /// Ends the selected unit's turn without acting.
    pub fn wait(&mut self) -> Vec<Event> {
        self.submit(Command::Wait)
    }

    /// Hands control to the enemy.
    pub fn end_turn(&mut self) -> Vec<Event> {
        self.submit(Command::EndTurn)
    }

    /// Pays to redraw the shop offer.
    pub fn reroll_shop(&mut self) -> Vec<Event> {
        self.submit(Command::RerollShop)
    }

    /// Buys a card from the shop offer.
    pub fn buy_card(&mut self, card: CardId) -> Vec<Event> {
        self.submit(Command::BuyCard { card })
    }

    /// Leaves the shop and starts the next battle.
    pub fn advance_battle(&mut self) -> Vec<Event> {
        self.submit(Command::AdvanceBattle)
    }

    /// Advances simulated time.
    pub fn tick(&mut self, dt: Duration) -> Vec<Event> {
        self.submit(Command::Tick { dt })
    }

    /// Ticks in `step` increments until pending effects have all run.
    ///
    /// Gives up after `max_steps` ticks so an adapter cannot hang on a
    /// zero-length step.
    pub fn settle(&mut self, step: Duration, max_steps: usize) -> Vec<Event> {
        let mut produced = Vec::new();
        for _ in 0..max_steps {
            if !query::is_input_frozen(&self.world) && query::awaiting_enemy(&self.world).is_none()
            {
                break;
            }
            produced.extend(self.tick(step));
        }
        produced
    }

    fn observe(&mut self, events: &[Event]) {
        for event in events {
            match event {
                Event::PhaseChanged { phase } => debug!(?phase, "phase changed"),
                Event::TurnChanged { side } => debug!(?side, "turn changed"),
                Event::BattleStarted { level } => info!(level, "battle started"),
                Event::ShopOpened { gold, level } => info!(gold, level, "shop opened"),
                Event::CueTriggered { cue } => self.cues.push(*cue),
                Event::TimeAdvanced { .. } => {}
                other => trace!(event = ?other, "event"),
            }
        }
        self.log.extend_from_slice(events);
    }
}

/// Commands that change only presentation state and never emit events.
fn updates_without_events(command: &Command) -> bool {
    matches!(command, Command::HoverCell { .. })
}

fn command_label(command: &Command) -> &'static str {
    match command {
        Command::Tick { .. } => "tick",
        Command::SelectCell { .. } => "select_cell",
        Command::HoverCell { .. } => "hover_cell",
        Command::ClickBenchSlot { .. } => "click_bench_slot",
        Command::ChooseAction { .. } => "choose_action",
        Command::Cancel => "cancel",
        Command::Wait => "wait",
        Command::EndTurn => "end_turn",
        Command::RerollShop => "reroll_shop",
        Command::BuyCard { .. } => "buy_card",
        Command::AdvanceBattle => "advance_battle",
        Command::ExecuteEnemyPlan { .. } => "execute_enemy_plan",
        Command::StockShop { .. } => "stock_shop",
        Command::SpawnEnemy { .. } => "spawn_enemy",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kitchen_tactics_core::Phase;

    #[test]
    fn invalid_config_is_refused() {
        let mut config = SessionConfig::new(1);
        config.rules.rows = 0;
        assert_eq!(Session::new(config).err(), Some(ConfigError::NoRows));
    }

    #[test]
    fn ignored_commands_produce_nothing() {
        let mut session = Session::new(SessionConfig::new(1)).unwrap();
        assert!(session.reroll_shop().is_empty());
        assert!(session.cancel().is_empty());
        assert!(session.events().is_empty());
    }

    #[test]
    fn hover_is_not_treated_as_ignored() {
        assert!(updates_without_events(&Command::HoverCell { cell: None }));
        assert!(!updates_without_events(&Command::Cancel));

        let mut session = Session::new(SessionConfig::new(1)).unwrap();
        let _ = session.select_cell(CellCoord::new(1, 1));
        let events = session.hover_cell(Some(CellCoord::new(2, 1)));

        assert!(events.is_empty());
        assert_eq!(
            query::hovered(session.world()),
            Some(CellCoord::new(2, 1))
        );
    }

    #[test]
    fn settle_runs_pending_effects() {
        let mut session = Session::new(SessionConfig::new(1)).unwrap();
        let _ = session.end_turn();
        assert!(query::is_input_frozen(session.world()));

        let _ = session.settle(Duration::from_millis(100), 200);

        assert!(!query::is_input_frozen(session.world()));
        assert_eq!(query::phase(session.world()), Phase::Idle);
    }

    #[test]
    fn settle_gives_up_on_zero_steps() {
        let mut session = Session::new(SessionConfig::new(1)).unwrap();
        let _ = session.end_turn();
        let events = session.settle(Duration::ZERO, 0);
        assert!(events.is_empty());
        assert!(query::is_input_frozen(session.world()));
    }
}
