use crate::action::{Action, Move};
use crate::bot::Bot;
use crate::search::{choose_color, fallback_move};
use crate::state::{GameStateView, TurnPhase};

/// Rule-based bot without lookahead.
///
/// - Play a card matching the top's color, then one matching its label,
///   then a wild card; draw when nothing fits.
/// - After drawing a playable card, play it.
/// - Name the color held most often after a wild card.
pub struct GreedyBot;

impl GreedyBot {
    pub fn new() -> Self {
        Self
    }
}

impl Default for GreedyBot {
    fn default() -> Self {
        Self::new()
    }
}

impl Bot for GreedyBot {
    fn select_action(&mut self, state: &GameStateView, legal_actions: &[Action]) -> Action {
        assert!(
            !legal_actions.is_empty(),
            "greedy bot requires at least one legal action"
        );
        let action = match state.phase {
            TurnPhase::AwaitingWildColor => Action::ChooseColor(choose_color(state.hand())),
            TurnPhase::AwaitingDrawDecision { hand_index } => Action::Play { hand_index },
            TurnPhase::AwaitingMove | TurnPhase::GameOver => {
                match fallback_move(state.hand(), &state.discard_top) {
                    Move::Play(hand_index) => Action::Play { hand_index },
                    Move::Draw => Action::Draw,
                }
            }
        };
        if legal_actions.contains(&action) {
            action
        } else {
            legal_actions[0]
        }
    }
}
