use serde::{Deserialize, Serialize};

use crate::action::PlayerId;
use crate::board::BOARD_SIZE;
use crate::card::{Card, Label};
use crate::search::projection::Projection;

/// Score of a decided game; quicker wins score slightly higher. Kept well
/// above anything [`evaluate`] can return, whatever the hands hold.
pub const WIN_SCORE: i32 = 1_000_000;

/// Weights of the static evaluation.
///
/// Position and distance terms should dominate hand size, and held cards
/// rank wild > draw > skip/reverse > plain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvalWeights {
    pub position: i32,
    pub hand_size: i32,
    pub distance: i32,
    pub skip_bonus: i32,
    pub draw_bonus: i32,
    pub wild_bonus: i32,
}

impl Default for EvalWeights {
    fn default() -> Self {
        Self {
            position: 3,
            hand_size: 2,
            distance: 5,
            skip_bonus: 5,
            draw_bonus: 10,
            wild_bonus: 15,
        }
    }
}

impl EvalWeights {
    pub fn card_bonus(&self, card: &Card) -> i32 {
        if card.is_wild() {
            return self.wild_bonus;
        }
        match card.label {
            Label::Skip | Label::Reverse => self.skip_bonus,
            Label::Draw(_) => self.draw_bonus,
            Label::Number(_) => 0,
        }
    }
}

/// Heuristic value of a non-terminal node for `me`.
pub fn evaluate(node: &Projection, me: PlayerId, weights: &EvalWeights) -> i32 {
    let rival = 1 - me;
    let my_pos = node.position_of(me) as i32;
    let rival_pos = node.position_of(rival) as i32;
    let board = BOARD_SIZE as i32;
    let hand_gap = node.hand(rival).len() as i32 - node.hand(me).len() as i32;
    let distance_gap = (board - rival_pos) - (board - my_pos);
    let bonus: i32 = node.hand(me).iter().map(|c| weights.card_bonus(c)).sum();
    weights.position * (my_pos - rival_pos)
        + weights.hand_size * hand_gap
        + weights.distance * distance_gap
        + bonus
}

/// Value of a decided node for `me`, reached `plies_left` plies before the horizon.
/// Both players finishing at once counts as even.
pub fn terminal_score(node: &Projection, me: PlayerId, plies_left: usize) -> i32 {
    let score = WIN_SCORE + plies_left as i32;
    match (node.has_won(me), node.has_won(1 - me)) {
        (true, false) => score,
        (false, true) => -score,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::Color;
    use crate::state::DiscardTop;

    #[test]
    fn advantage_in_position_and_cards_is_positive() {
        let me_hand = [Card::number(Color::Red, 1)];
        let rival_hand = [Card::number(Color::Red, 2), Card::number(Color::Red, 3)];
        let node = Projection::new(
            [&me_hand, &rival_hand],
            [20, 10],
            DiscardTop::new(Card::number(Color::Red, 5)),
            10,
            0,
        );
        // 3*10 + 2*1 + 5*10
        assert_eq!(evaluate(&node, 0, &EvalWeights::default()), 82);
        assert_eq!(evaluate(&node, 1, &EvalWeights::default()), -82);
    }

    #[test]
    fn special_cards_rank_wild_over_draw_over_skip() {
        let w = EvalWeights::default();
        let wild = w.card_bonus(&Card::draw(Color::Black, 2));
        let draw = w.card_bonus(&Card::draw(Color::Red, 2));
        let skip = w.card_bonus(&Card::skip(Color::Red));
        let plain = w.card_bonus(&Card::number(Color::Red, 9));
        assert!(wild > draw && draw > skip && skip > plain);
    }

    #[test]
    fn both_hands_empty_is_even() {
        let node = Projection::new(
            [&[], &[]],
            [40, 40],
            DiscardTop::new(Card::number(Color::Red, 5)),
            10,
            0,
        );
        assert!(node.is_terminal());
        assert_eq!(terminal_score(&node, 0, 2), 0);
    }
}
