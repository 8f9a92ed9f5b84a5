use std::error::Error;

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::bot::Bot;
use crate::bots::{GreedyBot, HumanBot, MinimaxBot, RandomBot};
use crate::search::DEFAULT_DEPTH;

/// Returns a normalized label for a bot spec (the head token before any ':').
pub fn label_for_spec(spec: &str) -> String {
    spec.split(':')
        .next()
        .unwrap_or(spec)
        .trim()
        .to_ascii_lowercase()
}

/// Create a bot instance from a CLI-style spec.
/// Supported specs:
/// - human[:name]
/// - random[:seed]
/// - greedy
/// - minimax[:depth]
pub fn create_bot_from_spec(
    spec: &str,
    index: usize,
    seed: u64,
) -> Result<Box<dyn Bot>, Box<dyn Error>> {
    let argument = spec.split_once(':').map(|(_, value)| value.trim());
    match label_for_spec(spec).as_str() {
        "human" => {
            let name = argument
                .map(str::to_string)
                .unwrap_or_else(|| format!("Human {index}"));
            Ok(Box::new(HumanBot::new(name)))
        }
        "random" => {
            let custom_seed = argument
                .and_then(|value| value.parse::<u64>().ok())
                .unwrap_or(seed ^ ((index as u64 + 1) * 0x9E37_79B9));
            Ok(Box::new(RandomBot::new(StdRng::seed_from_u64(custom_seed))))
        }
        "greedy" => Ok(Box::new(GreedyBot::new())),
        "minimax" => {
            let depth = match argument {
                Some(value) => value
                    .parse::<usize>()
                    .map_err(|_| format!("invalid search depth: {value}"))?,
                None => DEFAULT_DEPTH,
            };
            Ok(Box::new(MinimaxBot::with_depth(depth)))
        }
        _ => Err(format!("unrecognized bot spec: {spec}").into()),
    }
}
