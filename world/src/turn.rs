//! Player-side phases of the turn controller: selection, movement, the action
//! menu, targeting and the hand-off to the enemy side.
//!
//! Every transition goes through [`World::enter_phase`], which drops all
//! highlight and targeting scratch so click handlers never trust stale cells.

use kitchen_tactics_core::{
    ActionKind, ActionMenu, CellCoord, Cue, EffectKind, Event, GhostPreview, Highlight,
    HighlightIntent, IngredientKind, Owner, Phase, Placement, Recipe, SkillOffer, UnitId,
    NEIGHBOR_SCAN_ORDER, PARTNER_SCAN_ORDER,
};

use crate::{combat, schedule::Deferred, unit::Unit, World};

/// Where the selected unit stood when it was picked up.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Origin {
    Board(CellCoord),
    Bench(usize),
}

/// Snapshot taken on selection so a cancel can restore the unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Selection {
    pub(crate) unit: UnitId,
    pub(crate) origin: Origin,
    pub(crate) had_moved: bool,
}

/// Action chosen from the menu while a target is being picked.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct PreparedAction {
    pub(crate) action: ActionKind,
    pub(crate) skill: Option<SkillOffer>,
}

impl PreparedAction {
    fn effect(&self) -> Option<EffectKind> {
        self.skill.map(|offer| offer.recipe.effect())
    }
}

/// Action whose flags are committed and whose effect waits for the animation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct CommittedAction {
    pub(crate) source: UnitId,
    pub(crate) target: UnitId,
    pub(crate) skill: Option<SkillOffer>,
    pub(crate) power: u32,
}

/// Cut-in currently playing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct CutIn {
    pub(crate) source: IngredientKind,
    pub(crate) partner: IngredientKind,
    pub(crate) recipe: Recipe,
}

#[derive(Debug)]
pub(crate) struct TurnState {
    pub(crate) phase: Phase,
    pub(crate) side: Owner,
    pub(crate) selection: Option<Selection>,
    pub(crate) prepared: Option<PreparedAction>,
    pub(crate) highlights: Vec<Highlight>,
    pub(crate) splash: Vec<CellCoord>,
    pub(crate) ghost: Option<GhostPreview>,
    pub(crate) hover: Option<CellCoord>,
    pub(crate) cut_in: Option<CutIn>,
}

impl TurnState {
    pub(crate) fn new() -> Self {
        Self {
            phase: Phase::Idle,
            side: Owner::Player,
            selection: None,
            prepared: None,
            highlights: Vec::new(),
            splash: Vec::new(),
            ghost: None,
            hover: None,
            cut_in: None,
        }
    }

    fn clear_scratch(&mut self) {
        self.prepared = None;
        self.highlights.clear();
        self.splash.clear();
        self.ghost = None;
    }

    fn intent_at(&self, cell: CellCoord) -> Option<HighlightIntent> {
        self.highlights
            .iter()
            .find(|highlight| highlight.cell == cell)
            .map(|highlight| highlight.intent)
    }
}

impl World {
    /// Player commands are honoured only on the player's turn, outside
    /// animation windows, in one of the interactive phases.
    pub(crate) fn accepts_player_input(&self) -> bool {
        self.turn.side == Owner::Player
            && self.schedule.is_idle()
            && matches!(
                self.turn.phase,
                Phase::Idle | Phase::Move | Phase::ActionSelect | Phase::Targeting
            )
    }

    pub(crate) fn enter_phase(&mut self, phase: Phase, out_events: &mut Vec<Event>) {
        self.turn.clear_scratch();
        if self.turn.phase != phase {
            self.turn.phase = phase;
            out_events.push(Event::PhaseChanged { phase });
        }
    }

    pub(crate) fn set_side(&mut self, side: Owner, out_events: &mut Vec<Event>) {
        if self.turn.side != side {
            self.turn.side = side;
            out_events.push(Event::TurnChanged { side });
        }
    }

    fn clear_selection(&mut self, out_events: &mut Vec<Event>) {
        if self.turn.selection.take().is_some() {
            out_events.push(Event::SelectionCleared);
        }
    }

    /// Selected unit, wherever it currently lives.
    pub(crate) fn selected_unit(&self) -> Option<&Unit> {
        let selection = self.turn.selection?;
        self.roster.get(selection.unit).or_else(|| {
            self.roster
                .bench_position(selection.unit)
                .and_then(|index| self.roster.bench_unit(index))
        })
    }

    pub(crate) fn select_cell(&mut self, cell: CellCoord, out_events: &mut Vec<Event>) {
        if !self.grid.contains(cell) {
            return;
        }
        match self.turn.phase {
            Phase::Idle => self.select_board_unit(cell, out_events),
            Phase::Move => self.choose_destination(cell, out_events),
            Phase::Targeting => self.confirm_target(cell, out_events),
            _ => {}
        }
    }

    fn select_board_unit(&mut self, cell: CellCoord, out_events: &mut Vec<Event>) {
        let Some(unit) = self.roster.at(cell) else {
            return;
        };
        if unit.owner != Owner::Player || unit.is_turn_over() {
            return;
        }
        let selection = Selection {
            unit: unit.id,
            origin: Origin::Board(cell),
            had_moved: unit.has_moved,
        };
        let next = if unit.has_moved {
            Phase::ActionSelect
        } else {
            Phase::Move
        };
        self.turn.selection = Some(selection);
        out_events.push(Event::UnitSelected {
            unit: selection.unit,
        });
        self.enter_phase(next, out_events);
        if next == Phase::Move {
            self.turn.highlights = self.move_highlights(selection.unit);
        }
    }

    /// Picks up a bench unit for deployment. Also switches away from a board
    /// unit that was selected but has not moved yet.
    pub(crate) fn click_bench_slot(&mut self, index: usize, out_events: &mut Vec<Event>) {
        if !matches!(self.turn.phase, Phase::Idle | Phase::Move) {
            return;
        }
        let Some(unit) = self.roster.bench_unit(index) else {
            return;
        };
        let selection = Selection {
            unit: unit.id,
            origin: Origin::Bench(index),
            had_moved: false,
        };
        self.clear_selection(out_events);
        self.turn.selection = Some(selection);
        out_events.push(Event::UnitSelected {
            unit: selection.unit,
        });
        self.enter_phase(Phase::Move, out_events);
        self.turn.highlights = self.deploy_highlights(selection.unit);
    }

    fn move_highlights(&self, id: UnitId) -> Vec<Highlight> {
        let Some(unit) = self.roster.get(id) else {
            return Vec::new();
        };
        let Some(origin) = unit.placement.cell() else {
            return Vec::new();
        };
        self.grid
            .cells_within(origin, unit.move_range)
            .filter_map(|cell| {
                if cell == origin {
                    return Some(Highlight {
                        cell,
                        intent: HighlightIntent::Destination,
                    });
                }
                let intent = match self.roster.at(cell) {
                    None => HighlightIntent::Destination,
                    Some(other) if unit.can_merge_with(other) => HighlightIntent::Merge,
                    Some(_) => return None,
                };
                Some(Highlight { cell, intent })
            })
            .collect()
    }

    fn deploy_highlights(&self, id: UnitId) -> Vec<Highlight> {
        let Some(unit) = self
            .roster
            .bench_position(id)
            .and_then(|index| self.roster.bench_unit(index))
        else {
            return Vec::new();
        };
        let deploy_columns = self.rules.deploy_columns;
        self.grid
            .cells()
            .filter(|cell| cell.column() < deploy_columns)
            .filter_map(|cell| {
                let intent = match self.roster.at(cell) {
                    None => HighlightIntent::Deploy,
                    Some(other) if unit.can_merge_with(other) => HighlightIntent::Merge,
                    Some(_) => return None,
                };
                Some(Highlight { cell, intent })
            })
            .collect()
    }

    fn choose_destination(&mut self, cell: CellCoord, out_events: &mut Vec<Event>) {
        let Some(selection) = self.turn.selection else {
            return;
        };
        let intent = self.turn.intent_at(cell);
        match selection.origin {
            Origin::Bench(_) => {
                if cell.column() >= self.rules.deploy_columns {
                    out_events.push(Event::DeploymentRejected {
                        unit: selection.unit,
                        cell,
                    });
                    return;
                }
                match intent {
                    Some(HighlightIntent::Merge) => self.merge_into(selection.unit, cell, out_events),
                    Some(HighlightIntent::Deploy) => {
                        self.deploy_selected(selection.unit, cell, out_events);
                    }
                    _ => {}
                }
            }
            Origin::Board(from) => match intent {
                Some(HighlightIntent::Merge) => self.merge_into(selection.unit, cell, out_events),
                Some(HighlightIntent::Destination) => {
                    self.relocate_selected(selection.unit, from, cell, out_events);
                }
                _ => {
                    self.clear_selection(out_events);
                    self.enter_phase(Phase::Idle, out_events);
                }
            },
        }
    }

    fn relocate_selected(
        &mut self,
        id: UnitId,
        from: CellCoord,
        to: CellCoord,
        out_events: &mut Vec<Event>,
    ) {
        let Some(unit) = self.roster.get_mut(id) else {
            return;
        };
        unit.placement = Placement::Board(to);
        unit.has_moved = true;
        if from != to {
            out_events.push(Event::UnitMoved { unit: id, from, to });
        }
        self.enter_phase(Phase::ActionSelect, out_events);
    }

    fn deploy_selected(&mut self, id: UnitId, cell: CellCoord, out_events: &mut Vec<Event>) {
        if !self.roster.deploy(id, cell) {
            return;
        }
        if let Some(unit) = self.roster.get_mut(id) {
            unit.has_moved = true;
        }
        out_events.push(Event::UnitDeployed { unit: id, cell });
        self.enter_phase(Phase::ActionSelect, out_events);
    }

    fn merge_into(&mut self, source: UnitId, cell: CellCoord, out_events: &mut Vec<Event>) {
        let Some(survivor) = self.roster.at(cell).map(|unit| unit.id) else {
            return;
        };
        if survivor == source || self.roster.discard(source).is_none() {
            return;
        }
        let Some(target) = self.roster.get_mut(survivor) else {
            return;
        };
        target.upgrade();
        target.exhaust();
        out_events.push(Event::UnitsMerged {
            survivor,
            consumed: source,
            level: target.level,
        });
        out_events.push(Event::CueTriggered { cue: Cue::Merge });
        self.clear_selection(out_events);
        self.enter_phase(Phase::Idle, out_events);
    }

    /// Options offered for the selected unit while the action menu is open.
    pub(crate) fn action_menu(&self) -> Option<ActionMenu> {
        if self.turn.phase != Phase::ActionSelect {
            return None;
        }
        let unit = self.roster.get(self.turn.selection?.unit)?;
        let attack = !unit.has_attacked;
        let skill = if attack { self.skill_offer(unit) } else { None };
        Some(ActionMenu {
            unit: unit.id,
            attack,
            skill,
        })
    }

    /// First adjacent partner, in scan order, that forms a recipe with `unit`
    /// while both are off cooldown.
    fn skill_offer(&self, unit: &Unit) -> Option<SkillOffer> {
        if unit.recipe_cooldown > 0 {
            return None;
        }
        let cell = unit.placement.cell()?;
        PARTNER_SCAN_ORDER.iter().find_map(|direction| {
            let partner = self.roster.at(self.grid.neighbor(cell, *direction)?)?;
            if partner.id == unit.id || partner.owner != unit.owner || partner.recipe_cooldown > 0 {
                return None;
            }
            let recipe = self.rules.recipes.find(unit.kind, partner.kind)?;
            Some(SkillOffer {
                partner: partner.id,
                recipe,
                power: recipe.power(unit.attack, partner.attack),
            })
        })
    }

    pub(crate) fn choose_action(&mut self, action: ActionKind, out_events: &mut Vec<Event>) {
        let Some(menu) = self.action_menu() else {
            return;
        };
        let Some(unit) = self.roster.get(menu.unit) else {
            return;
        };
        let Some(origin) = unit.placement.cell() else {
            return;
        };
        let (prepared, range) = match action {
            ActionKind::Attack if menu.attack => (
                PreparedAction {
                    action,
                    skill: None,
                },
                unit.attack_range,
            ),
            ActionKind::Skill => match menu.skill {
                Some(offer) => (
                    PreparedAction {
                        action,
                        skill: Some(offer),
                    },
                    self.rules.skill_range,
                ),
                None => return,
            },
            ActionKind::Attack => return,
        };
        let highlights = self
            .grid
            .cells_within(origin, range)
            .map(|cell| Highlight {
                cell,
                intent: HighlightIntent::Target,
            })
            .collect();
        self.enter_phase(Phase::Targeting, out_events);
        self.turn.prepared = Some(prepared);
        self.turn.highlights = highlights;
    }

    fn confirm_target(&mut self, cell: CellCoord, out_events: &mut Vec<Event>) {
        let (Some(selection), Some(prepared)) = (self.turn.selection, self.turn.prepared) else {
            return;
        };
        let supportive = prepared.effect().is_some_and(EffectKind::is_supportive);
        let target = self
            .roster
            .at(cell)
            .filter(|_| self.turn.intent_at(cell).is_some())
            .filter(|target| {
                self.roster
                    .get(selection.unit)
                    .is_some_and(|source| target.owner != source.owner || supportive)
            })
            .map(|target| target.id);
        let Some(target) = target else {
            self.enter_phase(Phase::ActionSelect, out_events);
            return;
        };
        self.commit_action(selection.unit, prepared, target, out_events);
    }

    /// Writes the turn flags before any animation starts, then defers the effect.
    fn commit_action(
        &mut self,
        source: UnitId,
        prepared: PreparedAction,
        target: UnitId,
        out_events: &mut Vec<Event>,
    ) {
        let partner_kind = prepared
            .skill
            .and_then(|offer| self.roster.get(offer.partner))
            .map(|partner| partner.kind);
        let Some(unit) = self.roster.get_mut(source) else {
            return;
        };
        unit.has_attacked = true;
        unit.has_moved = true;
        let power = prepared.skill.map_or(unit.attack, |offer| offer.power);
        let source_kind = unit.kind;

        out_events.push(Event::ActionCommitted {
            source,
            action: prepared.action,
            target,
        });
        let delay = match (prepared.skill, partner_kind) {
            (Some(offer), Some(partner)) => {
                out_events.push(Event::CutInStarted {
                    source,
                    partner: offer.partner,
                    recipe: offer.recipe,
                });
                self.turn.cut_in = Some(CutIn {
                    source: source_kind,
                    partner,
                    recipe: offer.recipe,
                });
                self.rules.timing.cut_in
            }
            _ => self.rules.timing.attack_bump,
        };
        self.clear_selection(out_events);
        self.enter_phase(Phase::ResolvingAnimation, out_events);
        self.schedule.arm(
            delay,
            Deferred::ResolveAction(CommittedAction {
                source,
                target,
                skill: prepared.skill,
                power,
            }),
        );
    }

    pub(crate) fn resolve_action(&mut self, action: CommittedAction, out_events: &mut Vec<Event>) {
        let effect = match action.skill {
            Some(offer) => {
                for id in [action.source, offer.partner] {
                    if let Some(unit) = self.roster.get_mut(id) {
                        unit.recipe_cooldown = unit.max_recipe_cooldown;
                    }
                }
                out_events.push(Event::CueTriggered { cue: Cue::Skill });
                offer.recipe.effect()
            }
            None => EffectKind::Damage,
        };
        self.turn.cut_in = None;
        combat::resolve_effect(
            &mut self.roster,
            &self.grid,
            effect,
            action.target,
            action.power,
            out_events,
        );
        self.enter_phase(Phase::Idle, out_events);
        let _ = self.check_victory();
    }

    pub(crate) fn wait(&mut self, out_events: &mut Vec<Event>) {
        if self.turn.phase != Phase::ActionSelect {
            return;
        }
        let Some(selection) = self.turn.selection else {
            return;
        };
        if let Some(unit) = self.roster.get_mut(selection.unit) {
            unit.exhaust();
        }
        self.clear_selection(out_events);
        self.enter_phase(Phase::Idle, out_events);
    }

    pub(crate) fn cancel(&mut self, out_events: &mut Vec<Event>) {
        match self.turn.phase {
            Phase::Move => {
                self.clear_selection(out_events);
                self.enter_phase(Phase::Idle, out_events);
            }
            Phase::ActionSelect => {
                self.restore_selection(out_events);
                self.clear_selection(out_events);
                self.enter_phase(Phase::Idle, out_events);
            }
            Phase::Targeting => self.enter_phase(Phase::ActionSelect, out_events),
            _ => {}
        }
    }

    /// Puts the selected unit back where it was picked up.
    fn restore_selection(&mut self, out_events: &mut Vec<Event>) {
        let Some(selection) = self.turn.selection else {
            return;
        };
        match selection.origin {
            Origin::Board(origin) => {
                let Some(unit) = self.roster.get_mut(selection.unit) else {
                    return;
                };
                if let Some(current) = unit.placement.cell() {
                    if current != origin {
                        out_events.push(Event::UnitMoved {
                            unit: selection.unit,
                            from: current,
                            to: origin,
                        });
                    }
                }
                unit.placement = Placement::Board(origin);
                unit.has_moved = selection.had_moved;
            }
            Origin::Bench(index) => {
                if !self.roster.return_to_bench(selection.unit, index) {
                    return;
                }
                if let Some(unit) = self
                    .roster
                    .all_mut()
                    .find(|unit| unit.id == selection.unit)
                {
                    unit.has_moved = false;
                }
                out_events.push(Event::UnitBenched {
                    unit: selection.unit,
                });
            }
        }
    }

    pub(crate) fn end_turn(&mut self, out_events: &mut Vec<Event>) {
        self.clear_selection(out_events);
        for unit in self.roster.board_mut() {
            if unit.owner == Owner::Player {
                unit.recipe_cooldown = unit.recipe_cooldown.saturating_sub(1);
            }
        }
        self.set_side(Owner::Enemy, out_events);
        self.enter_phase(Phase::EnemyActing, out_events);
        self.schedule
            .arm(self.rules.timing.enemy_phase_delay, Deferred::BeginEnemyPhase);
    }

    /// Recomputes the hover previews for the current phase.
    pub(crate) fn hover(&mut self, cell: Option<CellCoord>) {
        self.turn.hover = cell.filter(|cell| self.grid.contains(*cell));
        self.turn.ghost = None;
        self.turn.splash.clear();
        let Some(cell) = self.turn.hover else {
            return;
        };
        match self.turn.phase {
            Phase::Move => self.turn.ghost = self.ghost_preview(cell),
            Phase::Targeting => self.turn.splash = self.splash_preview(cell),
            _ => {}
        }
    }

    /// Recipe a move of the selected unit to `cell` would enable.
    fn ghost_preview(&self, cell: CellCoord) -> Option<GhostPreview> {
        if !matches!(
            self.turn.intent_at(cell),
            Some(HighlightIntent::Destination | HighlightIntent::Deploy)
        ) {
            return None;
        }
        let unit = self.selected_unit()?;
        if unit.recipe_cooldown > 0 {
            return None;
        }
        NEIGHBOR_SCAN_ORDER.iter().find_map(|direction| {
            let neighbor = self.roster.at(self.grid.neighbor(cell, *direction)?)?;
            if neighbor.id == unit.id
                || neighbor.owner != Owner::Player
                || neighbor.recipe_cooldown > 0
            {
                return None;
            }
            let recipe = self.rules.recipes.find(unit.kind, neighbor.kind)?;
            Some(GhostPreview { cell, recipe })
        })
    }

    /// Cells an area skill aimed at `cell` would reach.
    fn splash_preview(&self, cell: CellCoord) -> Vec<CellCoord> {
        let is_area = self
            .turn
            .prepared
            .and_then(|prepared| prepared.effect())
            .is_some_and(|effect| effect == EffectKind::Aoe);
        if !is_area || self.turn.intent_at(cell).is_none() {
            return Vec::new();
        }
        std::iter::once(cell)
            .chain(
                NEIGHBOR_SCAN_ORDER
                    .iter()
                    .filter_map(|direction| self.grid.neighbor(cell, *direction)),
            )
            .collect()
    }
}
