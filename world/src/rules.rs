//! Tunable constants that shape a game.

use std::time::Duration;

use kitchen_tactics_core::{CellCoord, IngredientKind, Owner};

use crate::recipes::RecipeBook;

/// Lengths of the animation windows during which input is frozen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Timing {
    /// Skill cut-in shown before a recipe resolves.
    pub cut_in: Duration,
    /// Bump animation before a plain attack resolves.
    pub attack_bump: Duration,
    /// Delay between the last enemy falling and the shop opening.
    pub win_grace: Duration,
    /// Delay between ending the player turn and the first enemy activation.
    pub enemy_phase_delay: Duration,
    /// Pacing before each enemy acts.
    pub enemy_pacing: Duration,
    /// Pause between an enemy step and its strike.
    pub enemy_step_pause: Duration,
    /// Tail after the last enemy before control returns to the player.
    pub enemy_phase_tail: Duration,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            cut_in: Duration::from_millis(1200),
            attack_bump: Duration::from_millis(300),
            win_grace: Duration::from_millis(500),
            enemy_phase_delay: Duration::from_millis(1000),
            enemy_pacing: Duration::from_millis(300),
            enemy_step_pause: Duration::from_millis(300),
            enemy_phase_tail: Duration::from_millis(500),
        }
    }
}

impl Timing {
    /// Timing with every window collapsed to zero, handy for scripted runs.
    #[must_use]
    pub const fn instant() -> Self {
        Self {
            cut_in: Duration::ZERO,
            attack_bump: Duration::ZERO,
            win_grace: Duration::ZERO,
            enemy_phase_delay: Duration::ZERO,
            enemy_pacing: Duration::ZERO,
            enemy_step_pause: Duration::ZERO,
            enemy_phase_tail: Duration::ZERO,
        }
    }

    /// Longest single window, enough for one tick to drain any pending effect.
    #[must_use]
    pub fn longest(&self) -> Duration {
        [
            self.cut_in,
            self.attack_bump,
            self.win_grace,
            self.enemy_phase_delay,
            self.enemy_pacing,
            self.enemy_step_pause,
            self.enemy_phase_tail,
        ]
        .into_iter()
        .max()
        .unwrap_or(Duration::ZERO)
    }
}

/// Unit placed on the board when a world is created.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Deployment {
    /// Ingredient kind of the unit.
    pub kind: IngredientKind,
    /// Side the unit fights for.
    pub owner: Owner,
    /// Starting cell.
    pub cell: CellCoord,
}

impl Deployment {
    const fn new(kind: IngredientKind, owner: Owner, column: u32, row: u32) -> Self {
        Self {
            kind,
            owner,
            cell: CellCoord::new(column, row),
        }
    }
}

const OPENING: [Deployment; 5] = [
    Deployment::new(IngredientKind::Potato, Owner::Player, 1, 1),
    Deployment::new(IngredientKind::Pork, Owner::Player, 1, 2),
    Deployment::new(IngredientKind::Trash, Owner::Enemy, 4, 1),
    Deployment::new(IngredientKind::Trash, Owner::Enemy, 5, 3),
    Deployment::new(IngredientKind::Trash, Owner::Enemy, 4, 2),
];

/// Every constant the world consults while applying commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rules {
    /// Board width in cells.
    pub columns: u32,
    /// Board height in cells.
    pub rows: u32,
    /// Recipes available to skills, previews and hints.
    pub recipes: RecipeBook,
    /// Units placed before the first battle. Cells off the board are skipped.
    pub opening: Vec<Deployment>,
    /// Gold available at the start of the game.
    pub starting_gold: u32,
    /// Gold awarded when a battle is won.
    pub victory_bonus: u32,
    /// Gold charged for redrawing the shop offer.
    pub reroll_cost: u32,
    /// Gold charged for each shop card.
    pub card_cost: u32,
    /// Number of leftmost columns bench units may deploy into.
    pub deploy_columns: u32,
    /// Targeting range of recipe skills.
    pub skill_range: u32,
    /// Animation windows.
    pub timing: Timing,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            columns: 6,
            rows: 6,
            recipes: RecipeBook::standard(),
            opening: OPENING.to_vec(),
            starting_gold: 10,
            victory_bonus: 10,
            reroll_cost: 2,
            card_cost: 3,
            deploy_columns: 3,
            skill_range: 3,
            timing: Timing::default(),
        }
    }
}
