use thiserror::Error;

use crate::action::PlayerId;
use crate::card::{Card, Color};

/// Errors that can occur when manipulating the game state.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("player index {0} is out of range")]
    InvalidPlayer(PlayerId),
    #[error("not the specified player's turn")]
    NotPlayersTurn,
    #[error("game is already over")]
    GameOver,
    #[error("{card} cannot be played on {top_color} {top_card}")]
    IllegalPlay {
        card: Card,
        top_card: Card,
        top_color: Color,
    },
    #[error("protocol violation: {0}")]
    ProtocolViolation(#[from] Violation),
    #[error("invalid action: {0}")]
    InvalidAction(#[from] InvalidAction),
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(&'static str),
}

/// Actions attempted in the wrong phase of a turn.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Violation {
    /// A second draw in one turn; the turn is ended instead.
    #[error("a card was already drawn this turn")]
    RepeatedDraw,
    #[error("a wild color must be chosen first")]
    ColorPending,
    #[error("no wild color is waiting to be chosen")]
    NoColorPending,
    #[error("a turn can only be passed after drawing a playable card")]
    CannotPass,
    #[error("only the drawn card may be played after drawing")]
    DrawnCardOnly,
}

/// Details of malformed user actions.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidAction {
    #[error("hand index {0} is out of range")]
    HandIndex(usize),
    #[error("{0} cannot be assigned to a wild card")]
    WildColor(Color),
}
