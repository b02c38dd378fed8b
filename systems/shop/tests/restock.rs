use std::time::Duration;

use kitchen_tactics_core::{
    ActionKind, CellCoord, Command, Event, IngredientKind, Owner, Phase, ShopCard,
};
use kitchen_tactics_system_shop::{Config, Shop, OFFER_SIZE};
use kitchen_tactics_world::{self as world, query, Deployment, Rules, World};

/// Feeds world events through the shop until no commands are left.
fn pump(world: &mut World, shop: &mut Shop, command: Command) -> Vec<Event> {
    let mut log = Vec::new();
    let mut queue = vec![command];
    while !queue.is_empty() {
        let mut events = Vec::new();
        for command in queue.drain(..) {
            world::apply(world, command, &mut events);
        }
        shop.handle(&events, &mut queue);
        log.extend(events);
    }
    log
}

fn click(column: u32, row: u32) -> Command {
    Command::SelectCell {
        cell: CellCoord::new(column, row),
    }
}

fn shop_world(shop: &mut Shop) -> World {
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
    let _ = pump(&mut world, shop, click(1, 1));
    let _ = pump(&mut world, shop, click(1, 1));
    let _ = pump(
        &mut world,
        shop,
        Command::ChooseAction {
            action: ActionKind::Skill,
        },
    );
    let _ = pump(&mut world, shop, click(2, 1));
    let _ = pump(
        &mut world,
        shop,
        Command::Tick {
            dt: Duration::from_millis(2000),
        },
    );
    assert_eq!(query::phase(&world), Phase::Shop);
    world
}

fn stocked_cards(events: &[Event]) -> Vec<ShopCard> {
    events
        .iter()
        .filter_map(|event| match event {
            Event::ShopStocked { cards } => Some(cards.clone()),
            _ => None,
        })
        .last()
        .unwrap_or_default()
}

#[test]
fn entering_the_shop_stocks_an_offer() {
    let mut shop = Shop::new(Config::new(3));
    let world = shop_world(&mut shop);

    assert_eq!(shop.restocks(), 1);
    assert_eq!(query::shop_offer(&world).len(), OFFER_SIZE);
    assert!(query::shop_offer(&world)
        .iter()
        .all(|card| card.cost == query::rules(&world).card_cost));
}

#[test]
fn reroll_replaces_the_whole_offer() {
    let mut shop = Shop::new(Config::new(3));
    let mut world = shop_world(&mut shop);
    let before: Vec<_> = query::shop_offer(&world).iter().map(|card| card.id).collect();

    let events = pump(&mut world, &mut shop, Command::RerollShop);
    let after = stocked_cards(&events);

    assert_eq!(after.len(), OFFER_SIZE);
    assert!(after.iter().all(|card| !before.contains(&card.id)));
    assert_eq!(query::gold(&world), 18);
    assert_eq!(shop.restocks(), 2);
}

#[test]
fn same_seed_stocks_same_kinds() {
    let mut first_shop = Shop::new(Config::new(11));
    let mut second_shop = Shop::new(Config::new(11));
    let first = shop_world(&mut first_shop);
    let second = shop_world(&mut second_shop);

    let kinds = |world: &World| -> Vec<IngredientKind> {
        query::shop_offer(world).iter().map(|card| card.kind).collect()
    };
    assert_eq!(kinds(&first), kinds(&second));
}
