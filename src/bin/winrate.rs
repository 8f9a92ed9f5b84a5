use std::collections::HashMap;
use std::error::Error;
use std::process;
use std::time::Instant;

use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use tracing_subscriber::EnvFilter;

use unorace::{Bot, DeckVariant, Game, GameError, create_bot_from_spec, label_for_spec};

/// Default base seed for deterministic runs.
const DEFAULT_SEED: u64 = 0x00C0_FFEE_0000_5EED;

#[derive(Parser, Debug)]
#[command(
    name = "winrate",
    about = "Run multiple bot-vs-bot games and print per-bot win rates."
)]
struct Args {
    /// Number of games to simulate
    #[arg(short = 'g', long = "games", default_value_t = 200)]
    games: usize,

    /// Base RNG seed (deck + bot RNGs will be derived deterministically)
    #[arg(short = 's', long = "seed", default_value_t = DEFAULT_SEED)]
    seed: u64,

    /// Safety cap on turns per game; games exceeding this are aborted (not counted as a win)
    #[arg(long = "max-turns", default_value_t = 2000)]
    max_turns: usize,

    /// Deck composition
    #[arg(long = "variant", value_enum, default_value_t = DeckVariant::NoZeros)]
    variant: DeckVariant,

    /// Search depth for `minimax` seats given without an explicit depth
    #[arg(short = 'd', long = "depth")]
    depth: Option<usize>,

    /// Log engine and search decisions
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,

    /// Player bot specs, exactly two: e.g., minimax greedy
    bots: Vec<String>,
}

fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);
    if let Err(err) = run(args) {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    if args.bots.len() != 2 {
        return Err(format!(
            "expected exactly 2 bot specs (e.g., minimax greedy), received {}",
            args.bots.len()
        )
        .into());
    }
    // Disallow human in batch sims; it would block waiting for input.
    if args
        .bots
        .iter()
        .any(|s| label_for_spec(s) == "human")
    {
        return Err("human players are not supported in winrate runs".into());
    }
    let variant = args.variant;
    let specs: Vec<String> = args
        .bots
        .iter()
        .map(|spec| with_default_depth(spec, args.depth))
        .collect();

    let mut wins_per_label: HashMap<String, usize> = HashMap::new();
    let mut seats_per_label: HashMap<String, usize> = HashMap::new();
    let mut decision_time_ns: HashMap<String, u128> = HashMap::new();
    let mut decision_counts: HashMap<String, usize> = HashMap::new();
    let mut aborted_games = 0usize;
    let mut total_turns = 0usize;

    // Full specs label the table so `minimax:2` and `minimax:4` stay apart.
    let labels_for_spec = specs.clone();

    for game_idx in 0..args.games {
        // Permute seating each game so neither bot always moves first.
        let mut indices: Vec<usize> = (0..specs.len()).collect();
        let mut seat_rng = StdRng::seed_from_u64(args.seed ^ 0x9E37_79B9 ^ (game_idx as u64));
        indices.shuffle(&mut seat_rng);

        let deck_seed = mix_seed(args.seed, game_idx as u64, 0x5EED_15);
        let names = [
            labels_for_spec[indices[0]].clone(),
            labels_for_spec[indices[1]].clone(),
        ];
        let mut game = Game::builder()
            .with_names(names.clone())
            .with_seed(deck_seed)
            .with_variant(variant)
            .build()?;

        let mut bots: Vec<Box<dyn Bot>> = Vec::with_capacity(indices.len());
        for (seat, src_idx) in indices.iter().enumerate() {
            let bot_seed = mix_seed(args.seed, game_idx as u64, seat as u64);
            bots.push(create_bot_from_spec(&specs[*src_idx], seat, bot_seed)?);
        }
        for label in &names {
            *seats_per_label.entry(label.clone()).or_default() += 1;
        }

        let mut turns = 0usize;
        while !game.is_finished() && turns < args.max_turns {
            let current = game.current_player();
            let state = game.state_view(current)?;
            let legal = game.legal_actions(current)?;
            if legal.is_empty() {
                return Err(GameError::InvalidConfiguration("no legal actions available").into());
            }
            let t0 = Instant::now();
            let action = bots[current].select_action(&state, &legal);
            *decision_time_ns.entry(names[current].clone()).or_default() +=
                t0.elapsed().as_nanos();
            *decision_counts.entry(names[current].clone()).or_default() += 1;
            game.apply_action(current, action)?;
            turns += 1;
        }
        total_turns += turns;

        match game.winner() {
            Some(winner) => *wins_per_label.entry(names[winner].clone()).or_default() += 1,
            None => aborted_games += 1,
        }
    }

    let mut results: Vec<(String, f64, usize, usize)> = seats_per_label
        .iter()
        .map(|(label, &seats)| {
            let wins = wins_per_label.get(label).copied().unwrap_or(0);
            let rate = if seats > 0 {
                wins as f64 / seats as f64
            } else {
                0.0
            };
            (label.clone(), rate, wins, seats)
        })
        .collect();
    results.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.0.cmp(&b.0))
    });

    println!("Win rates (per-seat) over {} games:", args.games);
    for (label, rate, wins, seats) in &results {
        let count = decision_counts.get(label).copied().unwrap_or(0);
        let total_ms = decision_time_ns.get(label).copied().unwrap_or(0) as f64 / 1.0e6;
        let avg_ms = if count > 0 { total_ms / count as f64 } else { 0.0 };
        println!(
            "  {label:<10}  {wins}/{seats}  ({:.2}%)   decisions: {count:<7}  avg: {avg_ms:.3} ms",
            rate * 100.0
        );
    }
    if args.games > 0 {
        println!(
            "\nAverage game length: {:.1} actions",
            total_turns as f64 / args.games as f64
        );
    }
    if aborted_games > 0 {
        println!("Note: {aborted_games} game(s) hit the turn cap without a winner.");
    }
    Ok(())
}

fn mix_seed(base: u64, a: u64, b: u64) -> u64 {
    let mut z =
        base ^ (a.wrapping_mul(0x9E37_79B97F4A7C15)) ^ (b.wrapping_mul(0xBF58_476D1CE4E5B9));
    z ^= z >> 12;
    z ^= z << 25;
    z ^= z >> 27;
    z
}

/// Applies `--depth` to a bare `minimax` spec.
fn with_default_depth(spec: &str, depth: Option<usize>) -> String {
    match depth {
        Some(depth) if label_for_spec(spec) == "minimax" && !spec.contains(':') => {
            format!("minimax:{depth}")
        }
        _ => spec.to_string(),
    }
}
