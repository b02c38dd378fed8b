//! Win detection, the shop economy and battle-to-battle carry-over.

use kitchen_tactics_core::{
    CardId, CellCoord, Cue, Event, IngredientKind, Owner, Phase, Placement, ShopCard,
};

use crate::{schedule::Deferred, World};

/// Gold, battle level and the current shop offer.
#[derive(Debug)]
pub(crate) struct Economy {
    pub(crate) gold: u32,
    pub(crate) level: u32,
    pub(crate) offer: Vec<ShopCard>,
    next_card_id: CardId,
}

impl Economy {
    pub(crate) fn new(gold: u32) -> Self {
        Self {
            gold,
            level: 1,
            offer: Vec::new(),
            next_card_id: CardId::new(0),
        }
    }

    fn allocate_card(&mut self) -> CardId {
        let id = self.next_card_id;
        self.next_card_id = CardId::new(id.get().saturating_add(1));
        id
    }

    fn spend(&mut self, amount: u32) -> bool {
        match self.gold.checked_sub(amount) {
            Some(rest) => {
                self.gold = rest;
                true
            }
            None => false,
        }
    }
}

/// Compact block survivors are placed into: two columns wide, filling rows
/// from the top-left corner.
pub(crate) fn survivor_cell(index: usize) -> Option<CellCoord> {
    let column = u32::try_from(index % 2).ok()?;
    let row = u32::try_from(index / 2).ok()?;
    Some(CellCoord::new(column, row))
}

impl World {
    /// Schedules the shop once the enemy roster is empty. Returns whether it did.
    pub(crate) fn check_victory(&mut self) -> bool {
        if self.turn.phase == Phase::Shop
            || !self.schedule.is_idle()
            || self.roster.count(Owner::Enemy) > 0
        {
            return false;
        }
        self.schedule
            .arm(self.rules.timing.win_grace, Deferred::OpenShop);
        true
    }

    pub(crate) fn open_shop(&mut self, out_events: &mut Vec<Event>) {
        self.economy.gold = self.economy.gold.saturating_add(self.rules.victory_bonus);
        self.set_side(Owner::Player, out_events);
        self.enter_phase(Phase::Shop, out_events);
        out_events.push(Event::ShopOpened {
            gold: self.economy.gold,
            level: self.economy.level,
        });
        out_events.push(Event::CueTriggered { cue: Cue::Win });
        out_events.push(Event::ShopRestockRequested);
    }

    pub(crate) fn accepts_shop_input(&self) -> bool {
        self.turn.phase == Phase::Shop && self.schedule.is_idle()
    }

    pub(crate) fn reroll_shop(&mut self, out_events: &mut Vec<Event>) {
        if self.economy.spend(self.rules.reroll_cost) {
            out_events.push(Event::ShopRestockRequested);
        }
    }

    pub(crate) fn stock_shop(&mut self, kinds: Vec<IngredientKind>, out_events: &mut Vec<Event>) {
        if self.turn.phase != Phase::Shop {
            return;
        }
        let cost = self.rules.card_cost;
        let cards: Vec<ShopCard> = kinds
            .into_iter()
            .map(|kind| ShopCard {
                id: self.economy.allocate_card(),
                kind,
                cost,
            })
            .collect();
        self.economy.offer = cards.clone();
        out_events.push(Event::ShopStocked { cards });
    }

    pub(crate) fn buy_card(&mut self, card: CardId, out_events: &mut Vec<Event>) {
        let Some(index) = self.economy.offer.iter().position(|offer| offer.id == card) else {
            return;
        };
        let bought = self.economy.offer[index];
        if !self.economy.spend(bought.cost) {
            return;
        }
        let _ = self.economy.offer.remove(index);
        let unit = self
            .roster
            .spawn(bought.kind, Owner::Player, Placement::Bench)
            .id;
        out_events.push(Event::CardPurchased { card, unit });
    }

    /// Starts the next battle: survivors regroup in the top-left block at full
    /// health with fresh turns and cleared cooldowns. Survivors that do not fit
    /// on the board go back to the bench.
    pub(crate) fn advance_battle(&mut self, out_events: &mut Vec<Event>) {
        self.economy.level = self.economy.level.saturating_add(1);
        let survivors = self
            .roster
            .take_board()
            .into_iter()
            .filter(|unit| unit.owner == Owner::Player);
        for (index, mut unit) in survivors.enumerate() {
            unit.hp = unit.max_hp;
            unit.reset_turn();
            unit.recipe_cooldown = 0;
            match survivor_cell(index).filter(|cell| self.grid.contains(*cell)) {
                Some(cell) => {
                    unit.placement = Placement::Board(cell);
                    self.roster.push_board(unit);
                }
                None => self.roster.push_bench(unit),
            }
        }
        self.economy.offer.clear();
        self.set_side(Owner::Player, out_events);
        self.enter_phase(Phase::Idle, out_events);
        out_events.push(Event::BattleStarted {
            level: self.economy.level,
        });
    }

    pub(crate) fn spawn_enemy(
        &mut self,
        kind: IngredientKind,
        cell: CellCoord,
        level: u32,
        out_events: &mut Vec<Event>,
    ) {
        if self.turn.phase == Phase::Shop
            || !self.grid.contains(cell)
            || self.roster.is_occupied(cell)
        {
            return;
        }
        let unit = self
            .roster
            .spawn(kind, Owner::Enemy, Placement::Board(cell));
        while unit.level < level {
            unit.upgrade();
        }
        out_events.push(Event::EnemySpawned {
            unit: unit.id,
            kind,
            cell,
            level: unit.level,
        });
    }
}
