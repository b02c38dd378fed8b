//! Static catalog of two-ingredient fusion rules.

use kitchen_tactics_core::{
    BoardGrid, Direction, EffectKind, IngredientKind, PowerRatio, Recipe, RecipeHint,
};

use crate::unit::Unit;

const STANDARD_RECIPES: [Recipe; 5] = [
    Recipe::new(
        "Braised Pork with Potato",
        (IngredientKind::Potato, IngredientKind::Pork),
        PowerRatio::from_tenths(25),
        EffectKind::Damage,
    ),
    Recipe::new(
        "Tomato Scrambled Eggs",
        (IngredientKind::Tomato, IngredientKind::Egg),
        PowerRatio::from_tenths(20),
        EffectKind::Heal,
    ),
    Recipe::new(
        "Stir-fried Pork with Onion",
        (IngredientKind::Pork, IngredientKind::Onion),
        PowerRatio::from_tenths(20),
        EffectKind::Aoe,
    ),
    Recipe::new(
        "Fried Onion Rings",
        (IngredientKind::Potato, IngredientKind::Onion),
        PowerRatio::from_tenths(10),
        EffectKind::Stun,
    ),
    Recipe::new(
        "Garlic Mashed Potato",
        (IngredientKind::Potato, IngredientKind::Garlic),
        PowerRatio::from_tenths(25),
        EffectKind::Stun,
    ),
];

/// Ordered, extensible list of recipes. Lookups return the first match.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecipeBook {
    recipes: Vec<Recipe>,
}

impl RecipeBook {
    /// Creates a book from an explicit recipe list.
    #[must_use]
    pub fn new(recipes: Vec<Recipe>) -> Self {
        Self { recipes }
    }

    /// The five dishes shipped with the game.
    #[must_use]
    pub fn standard() -> Self {
        Self::new(STANDARD_RECIPES.to_vec())
    }

    /// All recipes in catalog order.
    #[must_use]
    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    /// Finds the recipe combining the two kinds, regardless of argument order.
    #[must_use]
    pub fn find(&self, first: IngredientKind, second: IngredientKind) -> Option<Recipe> {
        self.recipes
            .iter()
            .copied()
            .find(|recipe| recipe.matches(first, second))
    }

    /// Reports whether the two kinds form any recipe.
    #[must_use]
    pub fn is_compatible(&self, first: IngredientKind, second: IngredientKind) -> bool {
        self.find(first, second).is_some()
    }

    /// Recipes that use `kind` as one of their ingredients.
    pub fn recipes_for(&self, kind: IngredientKind) -> impl Iterator<Item = &Recipe> {
        self.recipes.iter().filter(move |recipe| recipe.uses(kind))
    }

    /// Lists adjacent same-side pairs that form a recipe.
    ///
    /// Only the right and lower neighbour of each unit are inspected so every
    /// pair is reported once.
    pub(crate) fn detect_all(&self, grid: &BoardGrid, units: &[Unit]) -> Vec<RecipeHint> {
        let mut hints = Vec::new();
        for unit in units {
            let Some(cell) = unit.placement.cell() else {
                continue;
            };
            for direction in [Direction::East, Direction::South] {
                let Some(neighbor_cell) = grid.neighbor(cell, direction) else {
                    continue;
                };
                let Some(neighbor) = units
                    .iter()
                    .find(|other| other.placement.cell() == Some(neighbor_cell))
                else {
                    continue;
                };
                if neighbor.owner != unit.owner {
                    continue;
                }
                if let Some(recipe) = self.find(unit.kind, neighbor.kind) {
                    hints.push(RecipeHint {
                        first: unit.id,
                        second: neighbor.id,
                        recipe,
                    });
                }
            }
        }
        hints
    }
}

impl Default for RecipeBook {
    fn default() -> Self {
        Self::standard()
    }
}
