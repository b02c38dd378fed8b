//! ASCII rendering of the board, bench and shop.

use std::fmt::Write as _;

use kitchen_tactics_core::{CellCoord, HighlightIntent, IngredientKind, Owner, UnitSnapshot};
use kitchen_tactics_world::{query, RecipeBook, World};

fn code(kind: IngredientKind) -> &'static str {
    match kind {
        IngredientKind::Potato => "po",
        IngredientKind::Pork => "pk",
        IngredientKind::Tomato => "to",
        IngredientKind::Egg => "eg",
        IngredientKind::Onion => "on",
        IngredientKind::Garlic => "ga",
        IngredientKind::Trash => "tr",
        IngredientKind::KitchenDemon => "kd",
    }
}

/// Player units are upper case, enemies lower case.
fn unit_glyph(unit: &UnitSnapshot) -> String {
    let glyph = code(unit.kind);
    match unit.owner {
        Owner::Player => glyph.to_ascii_uppercase(),
        Owner::Enemy => glyph.to_owned(),
    }
}

fn empty_glyph(intent: Option<HighlightIntent>) -> &'static str {
    match intent {
        Some(HighlightIntent::Destination) => "::",
        Some(HighlightIntent::Deploy) => "++",
        Some(HighlightIntent::Merge) => "<>",
        Some(HighlightIntent::Target) => "!!",
        Some(HighlightIntent::Splash) => "**",
        None => " .",
    }
}

/// Dishes a card of `kind` could cook, as `partner -> dish`.
fn card_hints(book: &RecipeBook, kind: IngredientKind) -> Vec<String> {
    book.recipes_for(kind)
        .filter_map(|recipe| {
            recipe
                .partner_of(kind)
                .map(|partner| format!("{} -> {}", partner.label(), recipe.name()))
        })
        .collect()
}

/// Renders the full screen as text.
pub(crate) fn render(world: &World) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "battle {}  gold {}  turn {:?}  phase {:?}",
        query::battle_level(world),
        query::gold(world),
        query::side(world),
        query::phase(world)
    );

    let grid = query::grid(world);
    let highlights = query::highlights(world);
    let splash = query::splash_preview(world);
    let _ = write!(out, "   ");
    for column in 0..grid.columns() {
        let _ = write!(out, " {column:>2}");
    }
    out.push('\n');
    for row in 0..grid.rows() {
        let _ = write!(out, "{row:>2} ");
        for column in 0..grid.columns() {
            let cell = CellCoord::new(column, row);
            let glyph = match query::unit_at(world, cell) {
                Some(unit) => unit_glyph(&unit),
                None => {
                    let intent = splash
                        .iter()
                        .chain(highlights)
                        .find(|highlight| highlight.cell == cell)
                        .map(|highlight| highlight.intent);
                    empty_glyph(intent).to_owned()
                }
            };
            let _ = write!(out, " {glyph}");
        }
        out.push('\n');
    }

    let bench = query::bench_view(world);
    if !bench.is_empty() {
        let slots: Vec<String> = bench
            .iter()
            .enumerate()
            .map(|(index, unit)| format!("{index}:{} L{}", unit.kind.label(), unit.level))
            .collect();
        let _ = writeln!(out, "bench  {}", slots.join("  "));
    }

    if let Some(menu) = query::action_menu(world) {
        let skill = menu
            .skill
            .map(|offer| format!("{} ({})", offer.recipe.name(), offer.power))
            .unwrap_or_else(|| "-".to_owned());
        let _ = writeln!(out, "menu   attack: {}  skill: {skill}", menu.attack);
    }

    if let Some(cut_in) = query::cut_in(world) {
        let _ = writeln!(
            out,
            "cut-in {} {}%",
            cut_in.recipe_name,
            cut_in.progress_permille / 10
        );
    }

    let offer = query::shop_offer(world);
    if !offer.is_empty() {
        let cards: Vec<String> = offer
            .iter()
            .enumerate()
            .map(|(index, card)| format!("{index}:{} ${}", card.kind.label(), card.cost))
            .collect();
        let _ = writeln!(out, "shop   {}", cards.join("  "));
        for (index, card) in offer.iter().enumerate() {
            let hints = card_hints(query::recipe_book(world), card.kind);
            if !hints.is_empty() {
                let _ = writeln!(out, "       {index}: {}", hints.join(", "));
            }
        }
    }

    for hint in query::recipe_hints(world) {
        let _ = writeln!(out, "combo  {}", hint.recipe.name());
    }
    out
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use kitchen_tactics_core::{ActionKind, Command};
    use kitchen_tactics_world::{self as world, Deployment, Rules};

    use super::*;

    #[test]
    fn opening_board_shows_both_sides() {
        let world = World::default();
        let text = render(&world);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "battle 1  gold 10  turn Player  phase Idle");
        assert_eq!(lines[3], " 1   . PO  .  . tr  .");
        assert_eq!(lines[4], " 2   . PK  .  . tr  .");
        assert!(text.contains("combo  Braised Pork with Potato"));
    }

    #[test]
    fn card_hints_pair_partner_with_dish() {
        let book = RecipeBook::standard();
        assert_eq!(
            card_hints(&book, IngredientKind::Potato),
            vec![
                "pork -> Braised Pork with Potato",
                "onion -> Fried Onion Rings",
                "garlic -> Garlic Mashed Potato",
            ]
        );
        assert!(card_hints(&book, IngredientKind::Trash).is_empty());
    }

    #[test]
    fn shop_lists_dishes_for_each_card() {
        let rules = Rules {
            opening: vec![
                Deployment {
                    kind: IngredientKind::Potato,
                    owner: Owner::Player,
                    cell: CellCoord::new(1, 1),
                },
                Deployment {
                    kind: IngredientKind::Pork,
                    owner: Owner::Player,
                    cell: CellCoord::new(1, 2),
                },
                Deployment {
                    kind: IngredientKind::Egg,
                    owner: Owner::Enemy,
                    cell: CellCoord::new(2, 1),
                },
            ],
            ..Rules::default()
        };
        let mut world = World::new(rules);
        let script = [
            Command::SelectCell {
                cell: CellCoord::new(1, 1),
            },
            Command::SelectCell {
                cell: CellCoord::new(1, 1),
            },
            Command::ChooseAction {
                action: ActionKind::Skill,
            },
            Command::SelectCell {
                cell: CellCoord::new(2, 1),
            },
            Command::Tick {
                dt: Duration::from_millis(2000),
            },
            Command::StockShop {
                kinds: vec![IngredientKind::Tomato, IngredientKind::Garlic],
            },
        ];
        let mut events = Vec::new();
        for command in script {
            world::apply(&mut world, command, &mut events);
        }

        let text = render(&world);
        assert!(text.contains("shop   0:tomato $3  1:garlic $3"));
        assert!(text.contains("       0: egg -> Tomato Scrambled Eggs"));
        assert!(text.contains("       1: potato -> Garlic Mashed Potato"));
    }
}
