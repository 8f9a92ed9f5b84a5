use serde::{Deserialize, Serialize};

use crate::card::Color;

/// Zero-based index of a player within the game.
pub type PlayerId = usize;

/// Action available to an agent during its turn.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum Action {
    /// Play the card at the given hand index onto the discard pile.
    Play { hand_index: usize },
    /// Draw one card from the deck.
    Draw,
    /// Keep a playable drawn card and end the turn.
    EndTurn,
    /// Assign a color to the wild card on top of the discard pile.
    ChooseColor(Color),
}

/// Decision returned by the opponent search: the subset of actions it ranks.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Move {
    Play(usize),
    Draw,
}

impl From<Move> for Action {
    fn from(mv: Move) -> Self {
        match mv {
            Move::Play(hand_index) => Action::Play { hand_index },
            Move::Draw => Action::Draw,
        }
    }
}
