use std::{
    collections::hash_map::DefaultHasher,
    hash::{Hash, Hasher},
    time::Duration,
};

use kitchen_tactics_core::{ActionKind, CellCoord, Command, IngredientKind, Owner};
use kitchen_tactics_session::{Session, SessionConfig};
use kitchen_tactics_world::{query, Deployment, Rules};

#[test]
fn same_seed_replays_identically() {
    let first = replay(17);
    let second = replay(17);

    assert_eq!(first, second, "replay diverged between runs");
    assert_eq!(first.fingerprint(), second.fingerprint());
}

#[test]
fn different_seeds_draw_different_offers() {
    let first = replay(17);
    let second = replay(18);

    assert_ne!(first.offers, second.offers);
}

fn replay(seed: u64) -> ReplayOutcome {
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
    let mut session = Session::new(SessionConfig { rules, seed }).unwrap();
    let mut offers = Vec::new();

    for command in opening_script() {
        let _ = session.submit(command);
    }
    offers.push(offer_kinds(&session));
    for _ in 0..3 {
        let _ = session.reroll_shop();
        offers.push(offer_kinds(&session));
    }
    let _ = session.advance_battle();
    let _ = session.end_turn();
    let _ = session.settle(Duration::from_millis(100), 200);

    let units = query::unit_view(session.world())
        .into_vec()
        .into_iter()
        .map(|unit| (unit.id, unit.kind, unit.cell(), unit.hp, unit.level))
        .collect();
    let events = session
        .events()
        .iter()
        .map(|event| format!("{event:?}"))
        .collect();

    ReplayOutcome {
        offers,
        units,
        events,
    }
}

fn offer_kinds(session: &Session) -> Vec<IngredientKind> {
    query::shop_offer(session.world())
        .iter()
        .map(|card| card.kind)
        .collect()
}

fn opening_script() -> Vec<Command> {
    vec![
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
            dt: Duration::from_millis(1200),
        },
        Command::Tick {
            dt: Duration::from_millis(500),
        },
    ]
}

type UnitState = (
    kitchen_tactics_core::UnitId,
    IngredientKind,
    Option<CellCoord>,
    u32,
    u32,
);

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct ReplayOutcome {
    offers: Vec<Vec<IngredientKind>>,
    units: Vec<UnitState>,
    events: Vec<String>,
}

impl ReplayOutcome {
    fn fingerprint(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.hash(&mut hasher);
        hasher.finish()
    }
}
