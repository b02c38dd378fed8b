#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic shop system that draws ingredient offers whenever the world asks for a restock.

use kitchen_tactics_core::{Command, Event, IngredientKind};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Number of cards in a fresh offer.
pub const OFFER_SIZE: usize = 3;

/// Configuration parameters required to construct the shop system.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    rng_seed: u64,
    offer_size: usize,
}

impl Config {
    /// Creates a configuration drawing the standard offer size from `rng_seed`.
    #[must_use]
    pub const fn new(rng_seed: u64) -> Self {
        Self {
            rng_seed,
            offer_size: OFFER_SIZE,
        }
    }

    /// Overrides the number of cards drawn per restock.
    #[must_use]
    pub const fn with_offer_size(mut self, offer_size: usize) -> Self {
        self.offer_size = offer_size;
        self
    }
}

/// Pure system answering restock requests with freshly drawn offers.
#[derive(Debug)]
pub struct Shop {
    rng: ChaCha8Rng,
    offer_size: usize,
    restocks: u64,
}

impl Shop {
    /// Creates a new shop system using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(config.rng_seed),
            offer_size: config.offer_size,
            restocks: 0,
        }
    }

    /// Consumes world events and emits one stock command per restock request.
    pub fn handle(&mut self, events: &[Event], out: &mut Vec<Command>) {
        for event in events {
            if matches!(event, Event::ShopRestockRequested) {
                let kinds = self.draw_offer();
                self.restocks = self.restocks.saturating_add(1);
                out.push(Command::StockShop { kinds });
            }
        }
    }

    /// Number of offers drawn so far.
    #[must_use]
    pub fn restocks(&self) -> u64 {
        self.restocks
    }

    fn draw_offer(&mut self) -> Vec<IngredientKind> {
        let pool = IngredientKind::SHOP_POOL;
        (0..self.offer_size)
            .map(|_| pool[self.rng.gen_range(0..pool.len())])
            .collect()
    }
}
