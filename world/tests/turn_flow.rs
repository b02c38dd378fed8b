use std::time::Duration;

use kitchen_tactics_core::{
    ActionKind, CellCoord, Command, Cue, EffectKind, EnemyPlan, Event, HighlightIntent,
    IngredientKind, Owner, Phase, PowerRatio, Recipe, UnitId,
};
use kitchen_tactics_world::{self as world, query, Deployment, RecipeBook, Rules, Timing, World};

fn send(world: &mut World, command: Command) -> Vec<Event> {
    let mut events = Vec::new();
    world::apply(world, command, &mut events);
    events
}

fn tick(world: &mut World, millis: u64) -> Vec<Event> {
    send(
        world,
        Command::Tick {
            dt: Duration::from_millis(millis),
        },
    )
}

fn click(world: &mut World, column: u32, row: u32) -> Vec<Event> {
    send(
        world,
        Command::SelectCell {
            cell: CellCoord::new(column, row),
        },
    )
}

fn hp_at(world: &World, column: u32, row: u32) -> Option<u32> {
    query::unit_at(world, CellCoord::new(column, row)).map(|unit| unit.hp)
}

fn deployment(kind: IngredientKind, owner: Owner, column: u32, row: u32) -> Deployment {
    Deployment {
        kind,
        owner,
        cell: CellCoord::new(column, row),
    }
}

#[test]
fn potato_and_pork_skill_deals_fourteen_damage() {
    let mut world = World::default();

    let _ = click(&mut world, 1, 1);
    assert_eq!(query::phase(&world), Phase::Move);
    let _ = click(&mut world, 1, 1);
    assert_eq!(query::phase(&world), Phase::ActionSelect);

    let menu = query::action_menu(&world).expect("menu open");
    assert!(menu.attack);
    let offer = menu.skill.expect("pork is below potato");
    assert_eq!(offer.power, 15);
    assert!(offer
        .recipe
        .matches(IngredientKind::Potato, IngredientKind::Pork));

    let _ = send(
        &mut world,
        Command::ChooseAction {
            action: ActionKind::Skill,
        },
    );
    assert_eq!(query::phase(&world), Phase::Targeting);

    let committed = click(&mut world, 4, 1);
    assert!(committed
        .iter()
        .any(|event| matches!(event, Event::CutInStarted { .. })));
    assert_eq!(query::phase(&world), Phase::ResolvingAnimation);
    assert_eq!(hp_at(&world, 4, 1), Some(25));

    let resolved = tick(&mut world, 1200);
    assert!(resolved.contains(&Event::CueTriggered { cue: Cue::Skill }));
    assert!(resolved.contains(&Event::UnitDamaged {
        unit: UnitId::new(2),
        amount: 14,
        remaining: 11,
    }));
    assert_eq!(hp_at(&world, 4, 1), Some(11));
    assert_eq!(query::phase(&world), Phase::Idle);

    let potato = query::unit_at(&world, CellCoord::new(1, 1)).expect("potato");
    let pork = query::unit_at(&world, CellCoord::new(1, 2)).expect("pork");
    assert_eq!(potato.recipe_cooldown, 2);
    assert_eq!(pork.recipe_cooldown, 2);
    assert!(potato.is_turn_over());
}

#[test]
fn input_is_frozen_during_cut_in() {
    let mut world = World::default();
    let _ = click(&mut world, 1, 1);
    let _ = click(&mut world, 1, 1);
    let _ = send(
        &mut world,
        Command::ChooseAction {
            action: ActionKind::Skill,
        },
    );
    let _ = click(&mut world, 4, 1);

    let _ = tick(&mut world, 600);
    let cut_in = query::cut_in(&world).expect("cut-in running");
    assert_eq!(cut_in.progress_permille, 500);
    assert_eq!(cut_in.source, IngredientKind::Potato);
    assert_eq!(cut_in.partner, IngredientKind::Pork);

    assert!(click(&mut world, 1, 2).is_empty());
    assert!(send(&mut world, Command::EndTurn).is_empty());
    assert!(send(&mut world, Command::Cancel).is_empty());
    assert_eq!(query::selected(&world), None);

    let _ = tick(&mut world, 600);
    assert!(query::cut_in(&world).is_none());
    assert!(!query::is_input_frozen(&world));
}

#[test]
fn cancel_restores_position_after_intermediate_previews() {
    let mut world = World::default();
    let pork_id = query::unit_at(&world, CellCoord::new(1, 2))
        .expect("pork")
        .id;

    let _ = click(&mut world, 1, 2);
    for column in 0..4 {
        let _ = send(
            &mut world,
            Command::HoverCell {
                cell: Some(CellCoord::new(column, 3)),
            },
        );
    }
    let moved = click(&mut world, 2, 3);
    assert!(moved.contains(&Event::UnitMoved {
        unit: pork_id,
        from: CellCoord::new(1, 2),
        to: CellCoord::new(2, 3),
    }));

    let _ = send(
        &mut world,
        Command::ChooseAction {
            action: ActionKind::Attack,
        },
    );
    assert_eq!(query::phase(&world), Phase::Targeting);
    let _ = send(&mut world, Command::Cancel);
    assert_eq!(query::phase(&world), Phase::ActionSelect);
    let _ = send(&mut world, Command::Cancel);

    let pork = query::unit(&world, pork_id).expect("pork");
    assert_eq!(pork.cell(), Some(CellCoord::new(1, 2)));
    assert!(!pork.has_moved);
    assert_eq!(query::phase(&world), Phase::Idle);
    assert!(query::highlights(&world).is_empty());
}

#[test]
fn clicking_outside_highlights_cancels_a_board_selection() {
    let mut world = World::default();
    let _ = click(&mut world, 1, 1);
    assert!(!query::highlights(&world).is_empty());

    let events = click(&mut world, 5, 5);

    assert!(events.contains(&Event::SelectionCleared));
    assert_eq!(query::phase(&world), Phase::Idle);
    assert!(query::highlights(&world).is_empty());
}

#[test]
fn move_highlights_include_own_cell_and_skip_occupied() {
    let mut world = World::default();
    let _ = click(&mut world, 1, 1);
    let highlights = query::highlights(&world);

    assert!(highlights
        .iter()
        .any(|highlight| highlight.cell == CellCoord::new(1, 1)
            && highlight.intent == HighlightIntent::Destination));
    assert!(!highlights
        .iter()
        .any(|highlight| highlight.cell == CellCoord::new(1, 2)));
    assert!(highlights
        .iter()
        .all(|highlight| highlight.cell.manhattan_distance(CellCoord::new(1, 1)) <= 2));
}

#[test]
fn invalid_target_returns_to_action_menu() {
    let mut world = World::default();
    let _ = click(&mut world, 1, 2);
    let _ = click(&mut world, 1, 2);
    let _ = send(
        &mut world,
        Command::ChooseAction {
            action: ActionKind::Attack,
        },
    );

    let _ = click(&mut world, 1, 1);

    assert_eq!(query::phase(&world), Phase::ActionSelect);
    assert!(query::highlights(&world).is_empty());
    let pork = query::unit_at(&world, CellCoord::new(1, 2)).expect("pork");
    assert!(!pork.has_attacked);
}

#[test]
fn cancel_while_targeting_reopens_the_menu() {
    let mut world = World::default();
    let _ = click(&mut world, 1, 1);
    let _ = click(&mut world, 1, 1);
    let _ = send(
        &mut world,
        Command::ChooseAction {
            action: ActionKind::Skill,
        },
    );
    assert_eq!(query::phase(&world), Phase::Targeting);

    let _ = send(&mut world, Command::Cancel);

    assert_eq!(query::phase(&world), Phase::ActionSelect);
    assert_eq!(query::selected(&world), Some(UnitId::new(0)));
    assert!(query::action_menu(&world).is_some());
}

#[test]
fn wait_ends_the_unit_turn() {
    let mut world = World::default();
    let _ = click(&mut world, 1, 1);
    let _ = click(&mut world, 1, 1);
    let _ = send(&mut world, Command::Wait);

    assert_eq!(query::phase(&world), Phase::Idle);
    let potato = query::unit_at(&world, CellCoord::new(1, 1)).expect("potato");
    assert!(potato.is_turn_over());
    assert!(click(&mut world, 1, 1).is_empty());
}

#[test]
fn area_skill_spares_the_other_side() {
    let rules = Rules {
        opening: vec![
            deployment(IngredientKind::Pork, Owner::Player, 1, 1),
            deployment(IngredientKind::Onion, Owner::Player, 1, 2),
            deployment(IngredientKind::Trash, Owner::Enemy, 3, 1),
            deployment(IngredientKind::Trash, Owner::Enemy, 4, 1),
            deployment(IngredientKind::Potato, Owner::Player, 2, 1),
            deployment(IngredientKind::Egg, Owner::Player, 3, 2),
        ],
        ..Rules::default()
    };
    let mut world = World::new(rules);

    let _ = click(&mut world, 1, 1);
    let _ = click(&mut world, 1, 1);
    let offer = query::action_menu(&world)
        .and_then(|menu| menu.skill)
        .expect("onion below pork");
    assert_eq!(offer.recipe.effect(), EffectKind::Aoe);
    assert_eq!(offer.power, 12);
    let _ = send(
        &mut world,
        Command::ChooseAction {
            action: ActionKind::Skill,
        },
    );

    let _ = send(
        &mut world,
        Command::HoverCell {
            cell: Some(CellCoord::new(3, 1)),
        },
    );
    assert_eq!(query::splash_preview(&world).len(), 5);

    let _ = click(&mut world, 3, 1);
    let _ = tick(&mut world, 1200);

    assert_eq!(hp_at(&world, 3, 1), Some(14));
    assert_eq!(hp_at(&world, 4, 1), Some(14));
    assert_eq!(hp_at(&world, 2, 1), Some(40));
    assert_eq!(hp_at(&world, 3, 2), Some(12));
}

#[test]
fn shield_overshoots_maximum_health() {
    let book = RecipeBook::new(vec![Recipe::new(
        "Egg Custard Guard",
        (IngredientKind::Tomato, IngredientKind::Egg),
        PowerRatio::from_tenths(20),
        EffectKind::Shield,
    )]);
    let rules = Rules {
        recipes: book,
        opening: vec![
            deployment(IngredientKind::Tomato, Owner::Player, 1, 1),
            deployment(IngredientKind::Egg, Owner::Player, 1, 2),
            deployment(IngredientKind::Trash, Owner::Enemy, 5, 5),
        ],
        ..Rules::default()
    };
    let mut world = World::new(rules);

    let _ = click(&mut world, 1, 1);
    let _ = click(&mut world, 1, 1);
    let _ = send(
        &mut world,
        Command::ChooseAction {
            action: ActionKind::Skill,
        },
    );
    let _ = click(&mut world, 1, 2);
    let _ = tick(&mut world, 1200);

    let egg = query::unit_at(&world, CellCoord::new(1, 2)).expect("egg");
    assert_eq!(egg.hp, 18);
    assert_eq!(egg.max_hp, 12);
}

#[test]
fn ghost_preview_names_recipe_at_destination() {
    let rules = Rules {
        opening: vec![
            deployment(IngredientKind::Potato, Owner::Player, 0, 0),
            deployment(IngredientKind::Pork, Owner::Player, 2, 1),
            deployment(IngredientKind::Trash, Owner::Enemy, 5, 5),
        ],
        ..Rules::default()
    };
    let mut world = World::new(rules);

    let _ = click(&mut world, 2, 1);
    let _ = send(
        &mut world,
        Command::HoverCell {
            cell: Some(CellCoord::new(1, 0)),
        },
    );

    let ghost = query::ghost_preview(&world).expect("potato is west of the hovered cell");
    assert_eq!(ghost.cell, CellCoord::new(1, 0));
    assert!(ghost
        .recipe
        .matches(IngredientKind::Potato, IngredientKind::Pork));

    let _ = send(&mut world, Command::HoverCell { cell: None });
    assert!(query::ghost_preview(&world).is_none());
}

#[test]
fn enemy_phase_runs_one_enemy_at_a_time() {
    let rules = Rules {
        timing: Timing::instant(),
        ..Rules::default()
    };
    let mut world = World::new(rules);

    let handed_over = send(&mut world, Command::EndTurn);
    assert!(handed_over.contains(&Event::TurnChanged { side: Owner::Enemy }));
    assert_eq!(query::phase(&world), Phase::EnemyActing);
    assert!(click(&mut world, 1, 1).is_empty());

    let activated = tick(&mut world, 0);
    assert!(activated.contains(&Event::EnemyActivated {
        unit: UnitId::new(2)
    }));
    assert_eq!(query::awaiting_enemy(&world), Some(UnitId::new(2)));

    let wrong = send(
        &mut world,
        Command::ExecuteEnemyPlan {
            plan: EnemyPlan::idle(UnitId::new(3)),
        },
    );
    assert!(wrong.is_empty());

    let stepped = send(
        &mut world,
        Command::ExecuteEnemyPlan {
            plan: EnemyPlan {
                unit: UnitId::new(2),
                step: Some(CellCoord::new(3, 1)),
                strike: None,
            },
        },
    );
    assert!(stepped.contains(&Event::UnitMoved {
        unit: UnitId::new(2),
        from: CellCoord::new(4, 1),
        to: CellCoord::new(3, 1),
    }));

    for expected in [3, 4] {
        let events = tick(&mut world, 0);
        assert!(events.contains(&Event::EnemyActivated {
            unit: UnitId::new(expected)
        }));
        let _ = send(
            &mut world,
            Command::ExecuteEnemyPlan {
                plan: EnemyPlan::idle(UnitId::new(expected)),
            },
        );
    }

    let finished = tick(&mut world, 0);
    assert!(finished.contains(&Event::TurnChanged {
        side: Owner::Player
    }));
    assert_eq!(query::phase(&world), Phase::Idle);
    let trash = query::unit(&world, UnitId::new(2)).expect("trash");
    assert!(!trash.has_moved);
}

#[test]
fn enemy_strike_waits_for_step_pause() {
    let rules = Rules {
        opening: vec![
            deployment(IngredientKind::Potato, Owner::Player, 1, 1),
            deployment(IngredientKind::Trash, Owner::Enemy, 3, 1),
        ],
        ..Rules::default()
    };
    let mut world = World::new(rules);
    let potato = UnitId::new(0);
    let trash = UnitId::new(1);

    let _ = send(&mut world, Command::EndTurn);
    assert!(tick(&mut world, 999)
        .iter()
        .all(|event| !matches!(event, Event::EnemyActivated { .. })));
    let _ = tick(&mut world, 301);
    assert_eq!(query::awaiting_enemy(&world), Some(trash));

    let _ = send(
        &mut world,
        Command::ExecuteEnemyPlan {
            plan: EnemyPlan {
                unit: trash,
                step: Some(CellCoord::new(2, 1)),
                strike: Some(potato),
            },
        },
    );
    assert_eq!(query::unit(&world, potato).map(|unit| unit.hp), Some(40));

    let struck = tick(&mut world, 300);
    assert!(struck.contains(&Event::UnitDamaged {
        unit: potato,
        amount: 3,
        remaining: 37,
    }));
}

#[test]
fn stunned_enemy_skips_exactly_one_turn() {
    let rules = Rules {
        timing: Timing::instant(),
        opening: vec![
            deployment(IngredientKind::Potato, Owner::Player, 1, 1),
            deployment(IngredientKind::Onion, Owner::Player, 1, 2),
            deployment(IngredientKind::Trash, Owner::Enemy, 2, 1),
        ],
        ..Rules::default()
    };
    let mut world = World::new(rules);
    let trash = UnitId::new(2);

    let _ = click(&mut world, 1, 1);
    let _ = click(&mut world, 1, 1);
    let _ = send(
        &mut world,
        Command::ChooseAction {
            action: ActionKind::Skill,
        },
    );
    let _ = click(&mut world, 2, 1);
    let _ = tick(&mut world, 0);
    assert_eq!(
        query::unit(&world, trash).map(|unit| unit.stunned_turns),
        Some(1)
    );

    let _ = send(&mut world, Command::EndTurn);
    let skipped = tick(&mut world, 0);
    assert!(!skipped
        .iter()
        .any(|event| matches!(event, Event::EnemyActivated { .. })));
    assert_eq!(query::phase(&world), Phase::Idle);

    let _ = send(&mut world, Command::EndTurn);
    let acted = tick(&mut world, 0);
    assert!(acted.contains(&Event::EnemyActivated { unit: trash }));
}

/// Runs the enemy phase to completion with every enemy standing still.
fn settle_idle_enemies(world: &mut World) {
    for _ in 0..64 {
        if let Some(unit) = query::awaiting_enemy(world) {
            let _ = send(
                world,
                Command::ExecuteEnemyPlan {
                    plan: EnemyPlan::idle(unit),
                },
            );
        } else if query::is_input_frozen(world) {
            let _ = tick(world, 0);
        } else {
            break;
        }
    }
    assert_eq!(query::side(world), Owner::Player);
    assert_eq!(query::phase(world), Phase::Idle);
}

#[test]
fn partner_below_wins_over_other_neighbours() {
    let rules = Rules {
        opening: vec![
            deployment(IngredientKind::Potato, Owner::Player, 1, 1),
            deployment(IngredientKind::Pork, Owner::Player, 1, 2),
            deployment(IngredientKind::Garlic, Owner::Player, 1, 0),
            deployment(IngredientKind::Onion, Owner::Player, 2, 1),
            deployment(IngredientKind::Trash, Owner::Enemy, 4, 4),
        ],
        ..Rules::default()
    };
    let mut world = World::new(rules);

    let _ = click(&mut world, 1, 1);
    let _ = click(&mut world, 1, 1);

    let offer = query::action_menu(&world)
        .and_then(|menu| menu.skill)
        .expect("three partners in reach");
    assert_eq!(offer.recipe.name(), "Braised Pork with Potato");
    assert_eq!(offer.partner, UnitId::new(1));
}

#[test]
fn partner_above_comes_before_the_sides() {
    let rules = Rules {
        opening: vec![
            deployment(IngredientKind::Potato, Owner::Player, 1, 1),
            deployment(IngredientKind::Garlic, Owner::Player, 1, 0),
            deployment(IngredientKind::Onion, Owner::Player, 2, 1),
            deployment(IngredientKind::Trash, Owner::Enemy, 4, 4),
        ],
        ..Rules::default()
    };
    let mut world = World::new(rules);

    let _ = click(&mut world, 1, 1);
    let _ = click(&mut world, 1, 1);

    let offer = query::action_menu(&world)
        .and_then(|menu| menu.skill)
        .expect("garlic above");
    assert_eq!(offer.recipe.name(), "Garlic Mashed Potato");
    assert_eq!(offer.partner, UnitId::new(1));
}

#[test]
fn skill_returns_after_two_turn_ends() {
    let rules = Rules {
        timing: Timing::instant(),
        opening: vec![
            deployment(IngredientKind::Potato, Owner::Player, 1, 1),
            deployment(IngredientKind::Pork, Owner::Player, 1, 2),
            deployment(IngredientKind::Trash, Owner::Enemy, 2, 1),
        ],
        ..Rules::default()
    };
    let mut world = World::new(rules);

    let _ = click(&mut world, 1, 1);
    let _ = click(&mut world, 1, 1);
    let _ = send(
        &mut world,
        Command::ChooseAction {
            action: ActionKind::Skill,
        },
    );
    let _ = click(&mut world, 2, 1);
    let _ = tick(&mut world, 0);
    assert_eq!(hp_at(&world, 2, 1), Some(11));

    let _ = send(&mut world, Command::EndTurn);
    settle_idle_enemies(&mut world);

    let _ = click(&mut world, 1, 1);
    let _ = click(&mut world, 1, 1);
    let menu = query::action_menu(&world).expect("menu open");
    assert!(menu.attack);
    assert_eq!(menu.skill, None);
    let potato = query::unit_at(&world, CellCoord::new(1, 1)).expect("potato");
    assert_eq!(potato.recipe_cooldown, 1);
    let _ = send(&mut world, Command::Cancel);
    assert_eq!(query::phase(&world), Phase::Idle);

    let _ = send(&mut world, Command::EndTurn);
    settle_idle_enemies(&mut world);

    let _ = click(&mut world, 1, 1);
    let _ = click(&mut world, 1, 1);
    let offer = query::action_menu(&world)
        .and_then(|menu| menu.skill)
        .expect("cooldown spent");
    assert_eq!(offer.recipe.name(), "Braised Pork with Potato");
}
