use crate::action::Action;
use crate::state::GameStateView;

/// Interface for anything that can take a seat: search bots, scripted bots, humans.
pub trait Bot {
    fn select_action(&mut self, state: &GameStateView, legal_actions: &[Action]) -> Action;
}
