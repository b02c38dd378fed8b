#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that plays Kitchen Tactics from a text script.

mod render;
mod script;

use std::{
    fs,
    io::{self, Read},
    path::PathBuf,
    time::Duration,
};

use anyhow::{Context, Result};
use clap::Parser;
use kitchen_tactics_core::{Cue, Owner, Phase, ShopCard, UnitSnapshot};
use kitchen_tactics_session::{Session, SessionConfig};
use kitchen_tactics_world::{query, Rules};
use serde::Serialize;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use script::{ScriptLine, Step};

/// Tick length used by `settle`.
const SETTLE_STEP: Duration = Duration::from_millis(50);
/// Upper bound on `settle` ticks, generous enough for a full enemy phase.
const SETTLE_LIMIT: usize = 10_000;

/// Command-line arguments accepted by the Kitchen Tactics binary.
#[derive(Debug, Parser)]
#[command(name = "kitchen-tactics", about = "Grid tactics with ingredient fusions")]
struct CliArgs {
    /// Seed for shop and wave draws; random when omitted.
    #[arg(long)]
    seed: Option<u64>,
    /// Board width in cells.
    #[arg(long, default_value_t = 6)]
    columns: u32,
    /// Board height in cells.
    #[arg(long, default_value_t = 6)]
    rows: u32,
    /// Script to play; read from stdin when omitted.
    #[arg(long)]
    script: Option<PathBuf>,
    /// Print a JSON report instead of the final board.
    #[arg(long)]
    json: bool,
}

/// Final state written with `--json`.
#[derive(Debug, Serialize)]
struct Report {
    seed: u64,
    battle_level: u32,
    gold: u32,
    phase: Phase,
    side: Owner,
    units: Vec<UnitSnapshot>,
    bench: Vec<UnitSnapshot>,
    shop: Vec<ShopCard>,
    events: usize,
    cues: Vec<Cue>,
}

/// Entry point for the Kitchen Tactics command-line interface.
fn main() -> Result<()> {
    init_tracing();
    let args = CliArgs::parse();
    let seed = args.seed.unwrap_or_else(rand::random);

    let config = SessionConfig {
        rules: Rules {
            columns: args.columns,
            rows: args.rows,
            ..Rules::default()
        },
        seed,
    };
    let mut session = Session::new(config).context("invalid board configuration")?;

    let source = read_script(args.script.as_ref())?;
    let lines = script::parse(&source).context("failed to parse script")?;

    let mut cues = Vec::new();
    for line in lines {
        run_line(&mut session, &line, args.json);
        cues.extend(session.drain_cues());
    }

    if args.json {
        let world = session.world();
        let report = Report {
            seed,
            battle_level: query::battle_level(world),
            gold: query::gold(world),
            phase: query::phase(world),
            side: query::side(world),
            units: query::unit_view(world).into_vec(),
            bench: query::bench_view(world),
            shop: query::shop_offer(world).to_vec(),
            events: session.events().len(),
            cues,
        };
        let json = serde_json::to_string_pretty(&report).context("failed to encode report")?;
        println!("{json}");
    } else {
        println!("{}", query::welcome_banner(session.world()));
        print!("{}", render::render(session.world()));
    }
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .compact()
        .init();
}

fn read_script(path: Option<&PathBuf>) -> Result<String> {
    match path {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read script {}", path.display())),
        None => {
            let mut source = String::new();
            let _ = io::stdin()
                .read_to_string(&mut source)
                .context("failed to read script from stdin")?;
            Ok(source)
        }
    }
}

fn run_line(session: &mut Session, line: &ScriptLine, quiet: bool) {
    let events = match &line.step {
        Step::Submit(command) => session.submit(command.clone()),
        Step::Buy(index) => match query::shop_offer(session.world()).get(*index).copied() {
            Some(card) => session.buy_card(card.id),
            None => {
                warn!(line = line.line, index, "no card at that offer position");
                Vec::new()
            }
        },
        Step::Settle => session.settle(SETTLE_STEP, SETTLE_LIMIT),
        Step::Show => {
            if !quiet {
                print!("{}", render::render(session.world()));
            }
            return;
        }
    };
    debug!(line = line.line, events = events.len(), "script line applied");
}
