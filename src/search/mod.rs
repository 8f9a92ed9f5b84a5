//! Opponent decision making.
//!
//! [`opponent_choose_move`] projects the caller's view into a [`Projection`],
//! runs a depth-limited alpha-beta search on copies of it, and falls back to
//! a greedy rule if the view cannot be searched. The live game is never
//! touched.

pub mod color;
pub mod evaluate;
pub mod minimax;
pub mod projection;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::action::{Move, PlayerId};
use crate::card::{Card, Color};
use crate::state::{DiscardTop, GameStateView, TurnPhase};

pub use color::choose_color;
pub use evaluate::{EvalWeights, WIN_SCORE, evaluate, terminal_score};
pub use minimax::{Search, SearchStats};
pub use projection::{Hand, Moves, Projection};

pub const DEFAULT_DEPTH: usize = 3;

/// Search parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Plies explored below the current position (at least one).
    pub max_depth: usize,
    pub weights: EvalWeights,
}

impl SearchConfig {
    pub fn with_depth(max_depth: usize) -> Self {
        Self {
            max_depth: max_depth.max(1),
            weights: EvalWeights::default(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self::with_depth(DEFAULT_DEPTH)
    }
}

/// Reasons a view could not be searched. These trigger the fallback rule and
/// are logged, never returned by [`opponent_choose_move`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SearchError {
    #[error("expected two players, found {0}")]
    PlayerCount(usize),
    #[error("seat {0} does not exist")]
    Seat(PlayerId),
    #[error("player {mover} is on move, not player {perspective}")]
    NotOnMove {
        mover: PlayerId,
        perspective: PlayerId,
    },
    #[error("a wild color is still pending")]
    ColorPending,
    #[error("a card was already drawn this turn")]
    AlreadyDrew,
    #[error("game is already over")]
    GameOver,
    #[error("hand index {0} is out of range")]
    HandIndex(usize),
    #[error("{0} is not playable in the projected position")]
    IllegalCard(Card),
    #[error("projected deck is empty")]
    EmptyDeck,
}

/// Runs the search for the owner of `view`, who must be on move.
pub fn choose_move(view: &GameStateView, config: &SearchConfig) -> Result<Move, SearchError> {
    let root = Projection::from_view(view)?;
    let mut search = Search::new(view.self_player, config);
    let (mv, score) = search.best_move(&root)?;
    let stats = search.stats();
    debug!(
        ?mv,
        score,
        nodes = stats.nodes,
        cutoffs = stats.cutoffs,
        "search finished"
    );
    Ok(mv)
}

/// Move for the owner of `view`. Never fails: a view the search cannot handle
/// is logged and answered by [`fallback_move`].
pub fn opponent_choose_move(view: &GameStateView, config: &SearchConfig) -> Move {
    if let TurnPhase::AwaitingDrawDecision { hand_index } = view.phase {
        return Move::Play(hand_index);
    }
    match choose_move(view, config) {
        Ok(mv) => mv,
        Err(err) => {
            warn!(%err, "search fallback");
            fallback_move(view.hand(), &view.discard_top)
        }
    }
}

/// Wild color for the owner of `view`.
pub fn opponent_choose_color(view: &GameStateView) -> Color {
    choose_color(view.hand())
}

/// Greedy rule: a card sharing the top's color, else its label, else a wild
/// card, else draw.
pub fn fallback_move(hand: &[Card], top: &DiscardTop) -> Move {
    hand.iter()
        .position(|c| !c.is_wild() && c.color == top.color)
        .or_else(|| {
            hand.iter()
                .position(|c| !c.is_wild() && c.label == top.card.label)
        })
        .or_else(|| hand.iter().position(Card::is_wild))
        .map(Move::Play)
        .unwrap_or(Move::Draw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_prefers_color_then_label_then_wild() {
        let top = DiscardTop::new(Card::number(Color::Red, 5));
        let hand = [
            Card::draw(Color::Black, 4),
            Card::number(Color::Blue, 5),
            Card::number(Color::Red, 1),
        ];
        assert_eq!(fallback_move(&hand, &top), Move::Play(2));
        assert_eq!(fallback_move(&hand[..2], &top), Move::Play(1));
        assert_eq!(fallback_move(&hand[..1], &top), Move::Play(0));
        assert_eq!(fallback_move(&[Card::number(Color::Blue, 1)], &top), Move::Draw);
    }

    #[test]
    fn depth_is_at_least_one() {
        assert_eq!(SearchConfig::with_depth(0).max_depth, 1);
    }
}
