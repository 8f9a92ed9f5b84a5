use rand::Rng;
use rand::seq::SliceRandom;

use crate::action::Action;
use crate::bot::Bot;
use crate::state::GameStateView;

/// Baseline opponent: a uniformly random card among those that fit, drawing
/// only when nothing fits. Wild colors are picked at random as well.
///
/// A playable drawn card is played straight away, so this bot never keeps one.
pub struct RandomBot<R: Rng> {
    rng: R,
}

impl<R: Rng> RandomBot<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> Bot for RandomBot<R> {
    fn select_action(&mut self, _state: &GameStateView, legal_actions: &[Action]) -> Action {
        let committed: Vec<Action> = legal_actions
            .iter()
            .copied()
            .filter(|a| matches!(a, Action::Play { .. } | Action::ChooseColor(_)))
            .collect();
        let pool: &[Action] = if committed.is_empty() {
            legal_actions
        } else {
            &committed
        };
        pool.choose(&mut self.rng).copied().unwrap_or(Action::Draw)
    }
}
