use std::error::Error;
use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use unorace::{
    Bot, DeckVariant, Game, GameError, Outcome, VisualOptions, create_bot_from_spec,
    describe_action, label_for_spec, render_state_with_options,
};

const DEFAULT_SEED: u64 = 0xDEC0_1DED_5EED_F00D;

#[derive(Parser, Debug)]
#[command(name = "play", about = "Play the card race against a bot, or watch two bots play.")]
struct Args {
    /// Seed for shuffling
    #[arg(long = "seed", default_value_t = DEFAULT_SEED)]
    seed: u64,

    /// Show the game state and chosen actions each turn
    #[arg(long = "visualize")]
    visualize: bool,

    /// Print both hands when visualizing
    #[arg(long = "reveal-hands")]
    reveal_hands: bool,

    /// Leave the board grid out when visualizing
    #[arg(long = "hide-board")]
    hide_board: bool,

    /// Stop after the specified number of actions
    #[arg(long = "max-turns")]
    max_turns: Option<usize>,

    /// Deck composition
    #[arg(long = "variant", value_enum, default_value_t = DeckVariant::NoZeros)]
    variant: DeckVariant,

    /// Search depth for `minimax` seats given without an explicit depth
    #[arg(short = 'd', long = "depth")]
    depth: Option<usize>,

    /// Log engine and search decisions
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,

    /// Two seats: human[:name], random[:seed], greedy, minimax[:depth]
    #[arg(default_values_t = [String::from("human"), String::from("minimax")])]
    bots: Vec<String>,
}

fn main() {
    let args = Args::parse();
    let filter = if args.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();
    if let Err(err) = run(args) {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    if args.bots.len() != 2 {
        return Err(format!("expected exactly 2 players, received {}", args.bots.len()).into());
    }
    let variant = args.variant;
    let specs: Vec<String> = args
        .bots
        .iter()
        .map(|spec| with_default_depth(spec, args.depth))
        .collect();
    let names = [label_for_spec(&specs[0]), label_for_spec(&specs[1])];
    let mut game = Game::builder()
        .with_names(names)
        .with_seed(args.seed)
        .with_variant(variant)
        .build()?;

    let mut bots: Vec<Box<dyn Bot>> = Vec::with_capacity(specs.len());
    for (index, spec) in specs.iter().enumerate() {
        bots.push(create_bot_from_spec(spec, index, args.seed)?);
    }

    let options = VisualOptions {
        show_board: !args.hide_board,
        reveal_hands: args.reveal_hands,
    };
    println!("Starting a race to cell {}.\n", game.settings().board_size);
    let mut turns = 0usize;
    while !game.is_finished() {
        if let Some(limit) = args.max_turns {
            if turns >= limit {
                println!("Max turn limit {limit} reached. Stopping.");
                break;
            }
        }
        let current = game.current_player();
        let state = game.state_view(current)?;
        let legal_actions = game.legal_actions(current)?;
        if legal_actions.is_empty() {
            return Err(GameError::InvalidConfiguration(
                "no legal actions available for current player",
            )
            .into());
        }
        if args.visualize {
            println!("{}", render_state_with_options(&state, options));
        }
        let action = bots[current].select_action(&state, &legal_actions);
        println!("Player {current}: {}", describe_action(&state, &action));
        match game.apply_action(current, action)? {
            Outcome::Played(outcome) => println!("  -> {:?}", outcome.effect),
            Outcome::Drew(draw) => println!("  -> {draw:?}"),
            Outcome::Passed | Outcome::ColorChosen(_) => {}
        }
        turns += 1;
    }

    if let Some(winner) = game.winner() {
        println!("Game finished. Winner: Player {winner}.");
    } else {
        println!("Game stopped before completion.");
    }
    Ok(())
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
