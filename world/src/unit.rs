//! Unit state, base statistics and lifecycle transitions.

use kitchen_tactics_core::{IngredientKind, Owner, Placement, UnitId, UnitSnapshot};

/// Recipe cooldown applied to every unit after it joins a skill.
const DEFAULT_RECIPE_COOLDOWN: u32 = 2;

/// Level-one statistics of an ingredient kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BaseStats {
    /// Maximum health.
    pub max_hp: u32,
    /// Attack power.
    pub attack: u32,
    /// Flat damage reduction.
    pub defense: u32,
    /// Maximum move distance.
    pub move_range: u32,
    /// Maximum plain attack distance.
    pub attack_range: u32,
}

impl BaseStats {
    const DEFAULT: Self = Self {
        max_hp: 20,
        attack: 3,
        defense: 0,
        move_range: 3,
        attack_range: 1,
    };

    /// Looks up the level-one statistics of `kind`.
    #[must_use]
    pub const fn of(kind: IngredientKind) -> Self {
        let base = Self::DEFAULT;
        match kind {
            IngredientKind::Trash => Self {
                max_hp: 25,
                attack: 5,
                defense: 1,
                move_range: 1,
                ..base
            },
            IngredientKind::KitchenDemon => Self {
                max_hp: 70,
                attack: 8,
                defense: 2,
                move_range: 1,
                ..base
            },
            IngredientKind::Egg => Self {
                max_hp: 12,
                attack: 1,
                defense: 0,
                move_range: 4,
                ..base
            },
            IngredientKind::Onion => Self {
                max_hp: 22,
                attack: 2,
                defense: 1,
                move_range: 3,
                attack_range: 2,
            },
            IngredientKind::Garlic => Self {
                max_hp: 18,
                attack: 1,
                defense: 2,
                move_range: 2,
                ..base
            },
            IngredientKind::Pork => Self {
                max_hp: 28,
                attack: 4,
                defense: 1,
                move_range: 3,
                ..base
            },
            IngredientKind::Potato => Self {
                max_hp: 40,
                attack: 2,
                defense: 2,
                move_range: 2,
                ..base
            },
            IngredientKind::Tomato => Self {
                max_hp: 18,
                attack: 2,
                defense: 0,
                move_range: 3,
                attack_range: 3,
            },
        }
    }
}

/// Unit stored inside the world, identified by handle rather than value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Unit {
    pub(crate) id: UnitId,
    pub(crate) kind: IngredientKind,
    pub(crate) owner: Owner,
    pub(crate) placement: Placement,
    pub(crate) level: u32,
    pub(crate) hp: u32,
    pub(crate) max_hp: u32,
    pub(crate) attack: u32,
    pub(crate) defense: u32,
    pub(crate) move_range: u32,
    pub(crate) attack_range: u32,
    pub(crate) has_moved: bool,
    pub(crate) has_attacked: bool,
    pub(crate) stunned_turns: u32,
    pub(crate) recipe_cooldown: u32,
    pub(crate) max_recipe_cooldown: u32,
}

impl Unit {
    /// Creates a fresh level-one unit at full health.
    pub(crate) fn new(id: UnitId, kind: IngredientKind, owner: Owner, placement: Placement) -> Self {
        let stats = BaseStats::of(kind);
        Self {
            id,
            kind,
            owner,
            placement,
            level: 1,
            hp: stats.max_hp,
            max_hp: stats.max_hp,
            attack: stats.attack,
            defense: stats.defense,
            move_range: stats.move_range,
            attack_range: stats.attack_range,
            has_moved: false,
            has_attacked: false,
            stunned_turns: 0,
            recipe_cooldown: 0,
            max_recipe_cooldown: DEFAULT_RECIPE_COOLDOWN,
        }
    }

    /// Clears the per-turn flags and consumes one turn of stun.
    pub(crate) fn reset_turn(&mut self) {
        self.has_moved = false;
        self.has_attacked = false;
        self.stunned_turns = self.stunned_turns.saturating_sub(1);
    }

    pub(crate) fn is_turn_over(&self) -> bool {
        (self.has_moved && self.has_attacked) || self.stunned_turns > 0
    }

    /// Raises the level by one, scaling health and attack by 1.5 and healing fully.
    pub(crate) fn upgrade(&mut self) {
        self.level = self.level.saturating_add(1);
        self.max_hp = scale_by_three_halves(self.max_hp);
        self.attack = scale_by_three_halves(self.attack);
        self.defense = self.defense.saturating_add(1);
        self.hp = self.max_hp;
    }

    /// Ends the unit's turn without consuming stun.
    pub(crate) fn exhaust(&mut self) {
        self.has_moved = true;
        self.has_attacked = true;
    }

    /// Reports whether `other` is an identical unit this one may merge with.
    pub(crate) fn can_merge_with(&self, other: &Unit) -> bool {
        self.id != other.id
            && self.owner == other.owner
            && self.kind == other.kind
            && self.level == other.level
    }

    pub(crate) fn snapshot(&self) -> UnitSnapshot {
        UnitSnapshot {
            id: self.id,
            kind: self.kind,
            owner: self.owner,
            placement: self.placement,
            level: self.level,
            hp: self.hp,
            max_hp: self.max_hp,
            attack: self.attack,
            defense: self.defense,
            move_range: self.move_range,
            attack_range: self.attack_range,
            has_moved: self.has_moved,
            has_attacked: self.has_attacked,
            stunned_turns: self.stunned_turns,
            recipe_cooldown: self.recipe_cooldown,
            max_recipe_cooldown: self.max_recipe_cooldown,
        }
    }
}

fn scale_by_three_halves(value: u32) -> u32 {
    value.saturating_mul(3) / 2
}
