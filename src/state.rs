use serde::{Deserialize, Serialize};

use crate::action::PlayerId;
use crate::board::BOARD_SIZE;
use crate::card::{Card, Color, DeckVariant, HAND_SIZE};
use crate::error::GameError;

/// Number of seats the rules are written for.
pub const SUPPORTED_PLAYERS: usize = 2;

/// Global constants for a running game.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameSettings {
    pub num_players: usize,
    pub hand_size: usize,
    pub board_size: usize,
    pub variant: DeckVariant,
}

impl GameSettings {
    pub fn new(num_players: usize) -> Result<Self, GameError> {
        if num_players != SUPPORTED_PLAYERS {
            return Err(GameError::InvalidConfiguration(
                "exactly two players are supported",
            ));
        }
        Ok(Self {
            num_players,
            hand_size: HAND_SIZE,
            board_size: BOARD_SIZE,
            variant: DeckVariant::default(),
        })
    }

    /// Cards in play across deck, hands and discard pile for a full deck.
    pub fn card_total(&self) -> usize {
        self.variant.deck_size()
    }
}

/// Face-up card deciding what may be played next.
///
/// `color` is the card's own color, or the color assigned after a wild card.
/// It stays `Black` only while the wild card's owner has yet to pick.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct DiscardTop {
    pub card: Card,
    pub color: Color,
}

impl DiscardTop {
    pub fn new(card: Card) -> Self {
        Self {
            card,
            color: card.color,
        }
    }

    pub fn with_color(card: Card, color: Color) -> Self {
        Self { card, color }
    }

    /// True while a wild card waits for its color.
    pub fn is_unresolved(&self) -> bool {
        self.color.is_black()
    }
}

/// Status of the entire game.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum GameStatus {
    Ongoing,
    Finished { winner: PlayerId },
}

/// Current phase of the active turn.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum TurnPhase {
    /// The current player must play a card or draw.
    AwaitingMove,
    /// The current player drew a playable card; they may play it or end the turn.
    AwaitingDrawDecision { hand_index: usize },
    /// The current player played a wild card and must choose its color.
    AwaitingWildColor,
    GameOver,
}

/// Per-seat information. Hands are visible to every seat.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerView {
    pub id: PlayerId,
    pub name: String,
    pub position: usize,
    pub skip_pending: bool,
    pub hand: Vec<Card>,
    pub is_current: bool,
    pub has_won: bool,
}

/// Game state snapshot handed to bots and front ends.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameStateView {
    pub settings: GameSettings,
    pub phase: TurnPhase,
    pub status: GameStatus,
    pub self_player: PlayerId,
    pub current_player: PlayerId,
    pub direction: i8,
    pub deck_count: usize,
    pub discard_count: usize,
    pub discard_top: DiscardTop,
    pub players: Vec<PlayerView>,
}

impl GameStateView {
    pub fn me(&self) -> Option<&PlayerView> {
        self.players.get(self.self_player)
    }

    /// Cards held by the viewing player.
    pub fn hand(&self) -> &[Card] {
        self.me().map(|p| p.hand.as_slice()).unwrap_or(&[])
    }
}
