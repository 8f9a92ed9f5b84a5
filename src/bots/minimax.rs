use tracing::warn;

use crate::action::Action;
use crate::bot::Bot;
use crate::search::{SearchConfig, opponent_choose_color, opponent_choose_move};
use crate::state::GameStateView;

/// Search-based opponent: alpha-beta over the next few plies, majority color after wilds.
#[derive(Clone, Debug, Default)]
pub struct MinimaxBot {
    config: SearchConfig,
}

impl MinimaxBot {
    pub fn new(config: SearchConfig) -> Self {
        Self { config }
    }

    pub fn with_depth(depth: usize) -> Self {
        Self::new(SearchConfig::with_depth(depth))
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }
}

impl Bot for MinimaxBot {
    fn select_action(&mut self, state: &GameStateView, legal_actions: &[Action]) -> Action {
        assert!(
            !legal_actions.is_empty(),
            "minimax bot requires at least one legal action"
        );
        if legal_actions
            .iter()
            .any(|a| matches!(a, Action::ChooseColor(_)))
        {
            return Action::ChooseColor(opponent_choose_color(state));
        }
        let action = Action::from(opponent_choose_move(state, &self.config));
        if legal_actions.contains(&action) {
            return action;
        }
        warn!(?action, "search picked an action the engine does not offer");
        legal_actions[0]
    }
}
