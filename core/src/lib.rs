#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Kitchen Tactics engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing player input, the world validates and executes those commands via
//! its `apply` entry point, and then broadcasts [`Event`] values for systems and
//! presentation layers to react to. Systems consume event streams, query
//! immutable snapshots, and respond exclusively with new command batches.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Kitchen Tactics.";

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Advances the simulation clock by the provided delta time.
    Tick {
        /// Duration of simulated time that elapsed since the previous tick.
        dt: Duration,
    },
    /// Player clicked a board cell.
    SelectCell {
        /// Cell that received the click.
        cell: CellCoord,
    },
    /// Player pointer moved over a board cell, or left the board.
    HoverCell {
        /// Hovered cell, `None` when the pointer is outside the board.
        cell: Option<CellCoord>,
    },
    /// Player clicked a bench slot.
    ClickBenchSlot {
        /// Zero-based slot index in bench display order.
        index: usize,
    },
    /// Player picked an entry from the action menu.
    ChooseAction {
        /// Action the selected unit should prepare.
        action: ActionKind,
    },
    /// Player backed out of the current selection.
    Cancel,
    /// Player ended the selected unit's turn without acting.
    Wait,
    /// Player handed control to the enemy side.
    EndTurn,
    /// Player paid to redraw the shop offer.
    RerollShop,
    /// Player bought a card from the shop offer.
    BuyCard {
        /// Identifier of the card to purchase.
        card: CardId,
    },
    /// Player left the shop for the next battle.
    AdvanceBattle,
    /// Executes the decision an enemy planner produced for the active enemy.
    ExecuteEnemyPlan {
        /// Planned step and strike for the active enemy.
        plan: EnemyPlan,
    },
    /// Replaces the shop offer with freshly drawn cards.
    StockShop {
        /// Ingredient kinds drawn for the new offer, in display order.
        kinds: Vec<IngredientKind>,
    },
    /// Places a new enemy unit on the board.
    SpawnEnemy {
        /// Kind of unit to create.
        kind: IngredientKind,
        /// Cell the enemy should occupy.
        cell: CellCoord,
        /// Level the enemy should be upgraded to before the battle starts.
        level: u32,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
    },
    /// Announces that the turn controller entered a new phase.
    PhaseChanged {
        /// Phase that became active.
        phase: Phase,
    },
    /// Announces that control passed to the other side.
    TurnChanged {
        /// Side that now owns the turn.
        side: Owner,
    },
    /// Confirms that a player unit was selected.
    UnitSelected {
        /// Identifier of the selected unit.
        unit: UnitId,
    },
    /// Confirms that the current selection was dropped.
    SelectionCleared,
    /// Confirms that a unit relocated between two board cells.
    UnitMoved {
        /// Identifier of the unit that moved.
        unit: UnitId,
        /// Cell the unit occupied before moving.
        from: CellCoord,
        /// Cell the unit occupies after moving.
        to: CellCoord,
    },
    /// Confirms that a bench unit entered the board.
    UnitDeployed {
        /// Identifier of the deployed unit.
        unit: UnitId,
        /// Cell the unit now occupies.
        cell: CellCoord,
    },
    /// Confirms that a unit was returned to the bench by a cancelled deployment.
    UnitBenched {
        /// Identifier of the benched unit.
        unit: UnitId,
    },
    /// Confirms that two identical units fused into one upgraded unit.
    UnitsMerged {
        /// Unit that received the upgrade.
        survivor: UnitId,
        /// Unit that was consumed by the merge.
        consumed: UnitId,
        /// Level of the survivor after the merge.
        level: u32,
    },
    /// Reports that a bench deployment targeted a cell outside the deploy zone.
    DeploymentRejected {
        /// Bench unit that attempted to deploy.
        unit: UnitId,
        /// Cell that was clicked.
        cell: CellCoord,
    },
    /// Confirms that a unit committed to an action against a target.
    ActionCommitted {
        /// Unit performing the action.
        source: UnitId,
        /// Kind of action being performed.
        action: ActionKind,
        /// Unit receiving the action.
        target: UnitId,
    },
    /// Announces the start of a skill cut-in window.
    CutInStarted {
        /// Unit that triggered the skill.
        source: UnitId,
        /// Adjacent partner contributing to the skill.
        partner: UnitId,
        /// Recipe being performed.
        recipe: Recipe,
    },
    /// Reports damage applied to a unit.
    UnitDamaged {
        /// Unit that lost health.
        unit: UnitId,
        /// Health removed after defense was applied.
        amount: u32,
        /// Health remaining after the hit.
        remaining: u32,
    },
    /// Reports healing applied to a unit.
    UnitHealed {
        /// Unit that recovered health.
        unit: UnitId,
        /// Health actually restored after clamping to the maximum.
        amount: u32,
    },
    /// Reports shield health granted to a unit.
    UnitShielded {
        /// Unit that received the shield.
        unit: UnitId,
        /// Health added on top of the current value.
        amount: u32,
    },
    /// Reports that a unit will skip its next turn.
    UnitStunned {
        /// Unit that was stunned.
        unit: UnitId,
    },
    /// Reports that a unit reached zero health and left the roster.
    UnitDefeated {
        /// Unit that was removed.
        unit: UnitId,
        /// Side the unit belonged to.
        owner: Owner,
    },
    /// Announces that an enemy is ready for its planner decision.
    EnemyActivated {
        /// Enemy awaiting a plan.
        unit: UnitId,
    },
    /// Announces that the battle was won and the shop opened.
    ShopOpened {
        /// Gold available after the victory bonus.
        gold: u32,
        /// Battle level that was just cleared.
        level: u32,
    },
    /// Requests that a new shop offer be drawn.
    ShopRestockRequested,
    /// Confirms that the shop offer was replaced.
    ShopStocked {
        /// Cards in the new offer.
        cards: Vec<ShopCard>,
    },
    /// Confirms that a card was bought and its unit placed on the bench.
    CardPurchased {
        /// Card that left the offer.
        card: CardId,
        /// Bench unit created from the card.
        unit: UnitId,
    },
    /// Announces that a new battle level began.
    BattleStarted {
        /// Battle level that started.
        level: u32,
    },
    /// Confirms that an enemy was placed on the board.
    EnemySpawned {
        /// Identifier assigned to the new enemy.
        unit: UnitId,
        /// Kind of the new enemy.
        kind: IngredientKind,
        /// Cell the enemy occupies.
        cell: CellCoord,
        /// Level reached after upgrades.
        level: u32,
    },
    /// Discrete trigger for audio and visual effect collaborators.
    CueTriggered {
        /// Cue that fired.
        cue: Cue,
    },
}

/// Named triggers consumed by audio and effect layers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cue {
    /// A unit took damage.
    Hit,
    /// Two units merged.
    Merge,
    /// A recipe skill resolved.
    Skill,
    /// The battle was won.
    Win,
}

/// Finite states of the turn controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Player turn with nothing selected.
    Idle,
    /// A player unit is selected and choosing a destination.
    Move,
    /// The action menu is open for the selected unit.
    ActionSelect,
    /// The selected unit is choosing a target for a prepared action.
    Targeting,
    /// A committed action is waiting for its animation window to elapse.
    ResolvingAnimation,
    /// Enemies are acting one after another.
    EnemyActing,
    /// The battle was won and the shop is open.
    Shop,
}

/// Side a unit fights for, also used to express whose turn it is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Owner {
    /// Units controlled through player input.
    Player,
    /// Units controlled by the enemy planner.
    Enemy,
}

impl Owner {
    /// Returns the opposing side.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Self::Player => Self::Enemy,
            Self::Enemy => Self::Player,
        }
    }
}

/// Ingredient types that make up every unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum IngredientKind {
    /// Sturdy tank.
    Potato,
    /// Balanced brawler.
    Pork,
    /// Long-range skirmisher.
    Tomato,
    /// Fast and fragile.
    Egg,
    /// Mid-range fighter.
    Onion,
    /// Slow defensive unit.
    Garlic,
    /// Disposable enemy grunt.
    Trash,
    /// Boss enemy.
    KitchenDemon,
}

impl IngredientKind {
    /// Kinds that can be drawn by the shop.
    pub const SHOP_POOL: [Self; 6] = [
        Self::Potato,
        Self::Pork,
        Self::Tomato,
        Self::Egg,
        Self::Onion,
        Self::Garlic,
    ];

    /// Lowercase display label of the ingredient.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Potato => "potato",
            Self::Pork => "pork",
            Self::Tomato => "tomato",
            Self::Egg => "egg",
            Self::Onion => "onion",
            Self::Garlic => "garlic",
            Self::Trash => "trash",
            Self::KitchenDemon => "kitchen_demon",
        }
    }
}

/// Effect produced by a recipe skill.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectKind {
    /// Single-target damage.
    Damage,
    /// Single-target healing capped at maximum health.
    Heal,
    /// Damage to the target and same-side orthogonal neighbours.
    Aoe,
    /// Damage plus a one-turn stun.
    Stun,
    /// Uncapped bonus health.
    Shield,
}

impl EffectKind {
    /// Reports whether the effect may target units on the caster's own side.
    #[must_use]
    pub const fn is_supportive(self) -> bool {
        matches!(self, Self::Heal | Self::Shield)
    }
}

/// Scale applied to fixed-point [`PowerRatio`] values.
pub const POWER_RATIO_SCALE: u32 = 10;

/// Recipe power multiplier expressed in tenths.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PowerRatio(u32);

impl PowerRatio {
    /// Creates a ratio from a value expressed in tenths (`25` is `2.5x`).
    #[must_use]
    pub const fn from_tenths(tenths: u32) -> Self {
        Self(tenths)
    }

    /// Underlying value in tenths.
    #[must_use]
    pub const fn tenths(&self) -> u32 {
        self.0
    }

    /// Scales `base` by the ratio, rounding down.
    #[must_use]
    pub const fn apply(&self, base: u32) -> u32 {
        base.saturating_mul(self.0) / POWER_RATIO_SCALE
    }
}

/// Immutable two-ingredient fusion rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Recipe {
    name: &'static str,
    ingredients: (IngredientKind, IngredientKind),
    ratio: PowerRatio,
    effect: EffectKind,
}

impl Recipe {
    /// Creates a new recipe definition.
    #[must_use]
    pub const fn new(
        name: &'static str,
        ingredients: (IngredientKind, IngredientKind),
        ratio: PowerRatio,
        effect: EffectKind,
    ) -> Self {
        Self {
            name,
            ingredients,
            ratio,
            effect,
        }
    }

    /// Display name of the dish.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Unordered ingredient pair.
    #[must_use]
    pub const fn ingredients(&self) -> (IngredientKind, IngredientKind) {
        self.ingredients
    }

    /// Power multiplier applied to the combined attack of both partners.
    #[must_use]
    pub const fn ratio(&self) -> PowerRatio {
        self.ratio
    }

    /// Effect produced when the recipe resolves.
    #[must_use]
    pub const fn effect(&self) -> EffectKind {
        self.effect
    }

    /// Reports whether the recipe combines `first` and `second` in either order.
    #[must_use]
    pub fn matches(&self, first: IngredientKind, second: IngredientKind) -> bool {
        let (a, b) = self.ingredients;
        (a == first && b == second) || (a == second && b == first)
    }

    /// Reports whether `kind` is one of the ingredients.
    #[must_use]
    pub fn uses(&self, kind: IngredientKind) -> bool {
        self.ingredients.0 == kind || self.ingredients.1 == kind
    }

    /// Returns the ingredient paired with `kind`, if `kind` takes part in the recipe.
    #[must_use]
    pub fn partner_of(&self, kind: IngredientKind) -> Option<IngredientKind> {
        let (a, b) = self.ingredients;
        if a == kind {
            Some(b)
        } else if b == kind {
            Some(a)
        } else {
            None
        }
    }

    /// Power of the skill when performed by units with the provided attack values.
    #[must_use]
    pub const fn power(&self, source_attack: u32, partner_attack: u32) -> u32 {
        self.ratio.apply(source_attack.saturating_add(partner_attack))
    }
}

/// Action prepared from the action menu.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    /// Plain attack using the unit's own attack and range.
    Attack,
    /// Recipe skill performed with an adjacent partner.
    Skill,
}

/// Cardinal directions on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Toward decreasing row indices.
    North,
    /// Toward increasing column indices.
    East,
    /// Toward increasing row indices.
    South,
    /// Toward decreasing column indices.
    West,
}

impl Direction {
    /// Column and row offsets of a single step.
    #[must_use]
    pub const fn offset(self) -> (i64, i64) {
        match self {
            Self::North => (0, -1),
            Self::East => (1, 0),
            Self::South => (0, 1),
            Self::West => (-1, 0),
        }
    }
}

/// Order in which skill partners are searched around the selected unit.
pub const PARTNER_SCAN_ORDER: [Direction; 4] = [
    Direction::South,
    Direction::North,
    Direction::East,
    Direction::West,
];

/// Order in which neighbouring cells are considered for steps, splashes and previews.
pub const NEIGHBOR_SCAN_ORDER: [Direction; 4] = [
    Direction::East,
    Direction::West,
    Direction::South,
    Direction::North,
];

/// Unique identifier assigned to a unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UnitId(u32);

impl UnitId {
    /// Creates a new unit identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a shop card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(u32);

impl CardId {
    /// Creates a new card identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the card identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Location of a single board cell expressed as column and row coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new board cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Computes the Manhattan distance between two cell coordinates.
    #[must_use]
    pub fn manhattan_distance(self, other: CellCoord) -> u32 {
        self.column().abs_diff(other.column()) + self.row().abs_diff(other.row())
    }
}

/// Fixed-size rectangular board used as a bounds oracle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoardGrid {
    columns: u32,
    rows: u32,
}

impl BoardGrid {
    /// Creates a board with the provided dimensions.
    #[must_use]
    pub const fn new(columns: u32, rows: u32) -> Self {
        Self { columns, rows }
    }

    /// Number of columns on the board.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of rows on the board.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Reports whether the signed coordinate pair lies on the board.
    #[must_use]
    pub const fn is_valid(&self, column: i64, row: i64) -> bool {
        column >= 0 && row >= 0 && column < self.columns as i64 && row < self.rows as i64
    }

    /// Reports whether the cell lies on the board.
    #[must_use]
    pub const fn contains(&self, cell: CellCoord) -> bool {
        cell.column < self.columns && cell.row < self.rows
    }

    /// Converts a signed coordinate pair into a cell when it lies on the board.
    #[must_use]
    pub fn cell_at(&self, column: i64, row: i64) -> Option<CellCoord> {
        if self.is_valid(column, row) {
            Some(CellCoord::new(
                u32::try_from(column).ok()?,
                u32::try_from(row).ok()?,
            ))
        } else {
            None
        }
    }

    /// Returns the on-board neighbour of `cell` in `direction`.
    #[must_use]
    pub fn neighbor(&self, cell: CellCoord, direction: Direction) -> Option<CellCoord> {
        let (dx, dy) = direction.offset();
        self.cell_at(i64::from(cell.column) + dx, i64::from(cell.row) + dy)
    }

    /// Iterates every cell in column-major order.
    pub fn cells(&self) -> impl Iterator<Item = CellCoord> {
        let rows = self.rows;
        (0..self.columns).flat_map(move |column| (0..rows).map(move |row| CellCoord::new(column, row)))
    }

    /// Iterates every cell within `range` Manhattan distance of `origin`, column-major.
    pub fn cells_within(&self, origin: CellCoord, range: u32) -> impl Iterator<Item = CellCoord> {
        self.cells()
            .filter(move |cell| cell.manhattan_distance(origin) <= range)
    }
}

/// Where a unit currently lives.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Placement {
    /// Deployed on the board at the contained cell.
    Board(CellCoord),
    /// Waiting on the bench, not yet deployed.
    Bench,
}

impl Placement {
    /// Board cell of the unit, if deployed.
    #[must_use]
    pub const fn cell(&self) -> Option<CellCoord> {
        match self {
            Self::Board(cell) => Some(*cell),
            Self::Bench => None,
        }
    }
}

/// Single card offered by the shop.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShopCard {
    /// Identifier used to buy the card.
    pub id: CardId,
    /// Ingredient kind of the unit the card creates.
    pub kind: IngredientKind,
    /// Gold required to buy the card.
    pub cost: u32,
}

/// Decision produced by an enemy planner for a single enemy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EnemyPlan {
    /// Enemy the plan belongs to.
    pub unit: UnitId,
    /// Orthogonal cell to step into before striking, if any.
    pub step: Option<CellCoord>,
    /// Player unit to strike after the optional step, if any.
    pub strike: Option<UnitId>,
}

impl EnemyPlan {
    /// Plan that neither moves nor strikes.
    #[must_use]
    pub const fn idle(unit: UnitId) -> Self {
        Self {
            unit,
            step: None,
            strike: None,
        }
    }
}

/// Visual intent attached to a highlighted cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HighlightIntent {
    /// Empty cell (or the unit's own cell) the selected unit may move to.
    Destination,
    /// Cell holding an identical unit the selected unit may merge into.
    Merge,
    /// Cell inside the bench deployment zone.
    Deploy,
    /// Cell inside the prepared action's range.
    Target,
    /// Cell that an area skill would splash.
    Splash,
}

/// Highlighted cell exposed to presentation layers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Highlight {
    /// Highlighted cell.
    pub cell: CellCoord,
    /// Reason the cell is highlighted.
    pub intent: HighlightIntent,
}

/// Immutable representation of a single unit's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UnitSnapshot {
    /// Unique identifier assigned to the unit.
    pub id: UnitId,
    /// Ingredient kind of the unit.
    pub kind: IngredientKind,
    /// Side the unit fights for.
    pub owner: Owner,
    /// Board cell or bench.
    pub placement: Placement,
    /// Upgrade level, starting at one.
    pub level: u32,
    /// Current health.
    pub hp: u32,
    /// Maximum health restored by heals.
    pub max_hp: u32,
    /// Attack power.
    pub attack: u32,
    /// Flat damage reduction.
    pub defense: u32,
    /// Maximum Manhattan distance of a move.
    pub move_range: u32,
    /// Maximum Manhattan distance of a plain attack.
    pub attack_range: u32,
    /// Whether the unit moved this turn.
    pub has_moved: bool,
    /// Whether the unit acted this turn.
    pub has_attacked: bool,
    /// Turns the unit still has to skip.
    pub stunned_turns: u32,
    /// Turns remaining before the unit may join another recipe.
    pub recipe_cooldown: u32,
    /// Cooldown applied after the unit joins a recipe.
    pub max_recipe_cooldown: u32,
}

impl UnitSnapshot {
    /// Board cell of the unit, if deployed.
    #[must_use]
    pub const fn cell(&self) -> Option<CellCoord> {
        self.placement.cell()
    }

    /// Reports whether the unit has nothing left to do this turn.
    #[must_use]
    pub const fn is_turn_over(&self) -> bool {
        (self.has_moved && self.has_attacked) || self.stunned_turns > 0
    }
}

/// Read-only snapshot describing all deployed units in roster order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UnitView {
    snapshots: Vec<UnitSnapshot>,
}

impl UnitView {
    /// Creates a new unit view, preserving the provided roster order.
    #[must_use]
    pub fn from_snapshots(snapshots: Vec<UnitSnapshot>) -> Self {
        Self { snapshots }
    }

    /// Iterator over the captured snapshots in roster order.
    pub fn iter(&self) -> impl Iterator<Item = &UnitSnapshot> {
        self.snapshots.iter()
    }

    /// Looks up a unit by identifier.
    #[must_use]
    pub fn get(&self, id: UnitId) -> Option<&UnitSnapshot> {
        self.snapshots.iter().find(|snapshot| snapshot.id == id)
    }

    /// Returns the first unit in roster order standing on `cell`.
    #[must_use]
    pub fn at(&self, cell: CellCoord) -> Option<&UnitSnapshot> {
        self.snapshots
            .iter()
            .find(|snapshot| snapshot.cell() == Some(cell))
    }

    /// Iterates the units belonging to `owner`, in roster order.
    pub fn owned_by(&self, owner: Owner) -> impl Iterator<Item = &UnitSnapshot> {
        self.snapshots
            .iter()
            .filter(move |snapshot| snapshot.owner == owner)
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<UnitSnapshot> {
        self.snapshots
    }
}

/// Skill currently offered by the action menu.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SkillOffer {
    /// Adjacent partner that would join the skill.
    pub partner: UnitId,
    /// Recipe formed with the partner.
    pub recipe: Recipe,
    /// Power the skill would resolve with.
    pub power: u32,
}

/// Options presented while the action menu is open.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ActionMenu {
    /// Unit the menu belongs to.
    pub unit: UnitId,
    /// Whether a plain attack is available.
    pub attack: bool,
    /// Skill available with the first compatible adjacent partner.
    pub skill: Option<SkillOffer>,
}

/// Descriptor of the running skill cut-in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CutInSnapshot {
    /// Kind of the unit that triggered the skill.
    pub source: IngredientKind,
    /// Kind of the partner.
    pub partner: IngredientKind,
    /// Display name of the recipe.
    pub recipe_name: &'static str,
    /// Elapsed share of the cut-in window in thousandths.
    pub progress_permille: u32,
}

/// Preview of the recipe a move to the hovered cell would enable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GhostPreview {
    /// Hovered destination.
    pub cell: CellCoord,
    /// Recipe formed with a neighbour of the destination.
    pub recipe: Recipe,
}

/// Pair of adjacent same-side units that form a recipe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RecipeHint {
    /// Left or upper unit of the pair.
    pub first: UnitId,
    /// Right or lower unit of the pair.
    pub second: UnitId,
    /// Recipe the pair forms.
    pub recipe: Recipe,
}
