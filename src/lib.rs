//! Two-player race game played with a customized deck of colored cards: numbers move
//! your pawn along a snake board, action cards skip or push back the rival, and an
//! alpha-beta search plays the computer seat.

pub mod action;
pub mod board;
pub mod bot;
pub mod bots;
pub mod card;
pub mod deck;
pub mod error;
pub mod game;
pub mod rules;
pub mod search;
pub mod state;
pub mod visualize;

pub use crate::action::{Action, Move, PlayerId};
pub use crate::bot::Bot;
pub use crate::bots::{
    GreedyBot, HumanBot, MinimaxBot, RandomBot, create_bot_from_spec, label_for_spec,
};
pub use crate::card::{Card, Color, DeckVariant, Label};
pub use crate::error::{GameError, InvalidAction, Violation};
pub use crate::game::{DrawOutcome, Game, GameBuilder, GameConfig, Outcome, PlayOutcome};
pub use crate::rules::{Effect, is_legal};
pub use crate::search::{
    SearchConfig, choose_color, opponent_choose_color, opponent_choose_move,
};
pub use crate::state::{DiscardTop, GameSettings, GameStateView, GameStatus, PlayerView, TurnPhase};
pub use crate::visualize::{
    VisualOptions, describe_action, render_state, render_state_with_options,
};
