//! Card legality and card effects.
//!
//! Both the live [`Game`](crate::Game) and the search
//! [`Projection`](crate::search::Projection) resolve cards through
//! [`resolve_card`], so lookahead can never disagree with real play. Each
//! side exposes its seats through the [`Table`] trait.

use serde::{Deserialize, Serialize};

use crate::action::PlayerId;
use crate::board::{self, BOARD_SIZE};
use crate::card::{Card, Label};
use crate::state::DiscardTop;

/// Mutable view of the seats a card effect touches.
pub trait Table {
    fn seat_count(&self) -> usize;

    /// Turn direction, `1` or `-1`.
    fn direction(&self) -> i8;

    fn position(&self, player: PlayerId) -> usize;

    fn set_position(&mut self, player: PlayerId, position: usize);

    fn set_skip_pending(&mut self, player: PlayerId);

    /// Moves up to `count` cards from the deck to `player`; returns how many moved.
    fn deal(&mut self, player: PlayerId, count: usize) -> usize;
}

/// Seat that follows `from` in turn order, ignoring skip flags.
pub fn next_seat(from: PlayerId, direction: i8, seats: usize) -> PlayerId {
    let seats = seats as isize;
    (from as isize + direction as isize).rem_euclid(seats) as PlayerId
}

/// Whether `card` may be played on `top`.
///
/// Wild cards always match. An unresolved wild on top accepts anything;
/// otherwise the card must share the top's effective color or its label.
/// Two numbered cards of different color therefore need the same number.
pub fn is_legal(card: Card, top: &DiscardTop) -> bool {
    card.is_wild() || top.is_unresolved() || card.color == top.color || card.label == top.card.label
}

/// What a resolved card did.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Effect {
    Advanced {
        player: PlayerId,
        from: usize,
        to: usize,
    },
    Skipped {
        player: PlayerId,
    },
    PushedBack {
        player: PlayerId,
        from: usize,
        to: usize,
        dealt: usize,
    },
}

/// Result of [`resolve_card`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    pub effect: Effect,
    /// The actor plays again after choosing a color for the wild card.
    pub extra_turn: bool,
    pub winner: Option<PlayerId>,
}

/// Applies the effect of `card`, just played by `actor`.
pub fn resolve_card<T: Table + ?Sized>(table: &mut T, card: Card, actor: PlayerId) -> Resolution {
    let next = next_seat(actor, table.direction(), table.seat_count());
    let mut extra_turn = false;
    let effect = match card.label {
        Label::Number(steps) => {
            let from = table.position(actor);
            let to = board::advance(from, steps as usize);
            table.set_position(actor, to);
            Effect::Advanced {
                player: actor,
                from,
                to,
            }
        }
        // With two seats a reversal hands the turn straight back, which is
        // exactly a skip. Seating more players needs a direction flip here.
        Label::Skip | Label::Reverse => {
            table.set_skip_pending(next);
            Effect::Skipped { player: next }
        }
        Label::Draw(count) => {
            let count = count as usize;
            let from = table.position(next);
            let to = board::retreat(from, count);
            table.set_position(next, to);
            let dealt = if card.is_wild() {
                extra_turn = true;
                0
            } else {
                table.deal(next, count)
            };
            Effect::PushedBack {
                player: next,
                from,
                to,
                dealt,
            }
        }
    };
    let winner = (table.position(actor) >= BOARD_SIZE).then_some(actor);
    Resolution {
        effect,
        extra_turn: extra_turn && winner.is_none(),
        winner,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::Color;

    struct Seats {
        positions: [usize; 2],
        skips: [bool; 2],
        deck: usize,
        hands: [usize; 2],
    }

    impl Table for Seats {
        fn seat_count(&self) -> usize {
            2
        }
        fn direction(&self) -> i8 {
            1
        }
        fn position(&self, player: PlayerId) -> usize {
            self.positions[player]
        }
        fn set_position(&mut self, player: PlayerId, position: usize) {
            self.positions[player] = position;
        }
        fn set_skip_pending(&mut self, player: PlayerId) {
            self.skips[player] = true;
        }
        fn deal(&mut self, player: PlayerId, count: usize) -> usize {
            let dealt = count.min(self.deck);
            self.deck -= dealt;
            self.hands[player] += dealt;
            dealt
        }
    }

    fn seats(positions: [usize; 2], deck: usize) -> Seats {
        Seats {
            positions,
            skips: [false; 2],
            deck,
            hands: [7, 7],
        }
    }

    #[test]
    fn wild_top_waiting_for_color_accepts_anything() {
        let top = DiscardTop::new(Card::draw(Color::Black, 4));
        assert!(is_legal(Card::number(Color::Green, 3), &top));
        let resolved = DiscardTop::with_color(Card::draw(Color::Black, 4), Color::Blue);
        assert!(!is_legal(Card::number(Color::Green, 3), &resolved));
        assert!(is_legal(Card::number(Color::Blue, 3), &resolved));
    }

    #[test]
    fn numbers_need_same_number_or_color() {
        let top = DiscardTop::new(Card::number(Color::Red, 5));
        assert!(is_legal(Card::number(Color::Blue, 5), &top));
        assert!(is_legal(Card::number(Color::Red, 8), &top));
        assert!(!is_legal(Card::number(Color::Blue, 8), &top));
        assert!(!is_legal(Card::skip(Color::Yellow), &top));
    }

    #[test]
    fn colored_draw_pushes_back_and_deals() {
        let mut table = seats([10, 5], 1);
        let res = resolve_card(&mut table, Card::draw(Color::Red, 2), 0);
        assert_eq!(table.positions, [10, 3]);
        assert_eq!(table.hands[1], 8);
        assert!(!res.extra_turn);
        assert_eq!(
            res.effect,
            Effect::PushedBack {
                player: 1,
                from: 5,
                to: 3,
                dealt: 1
            }
        );
    }

    #[test]
    fn wild_draw_grants_extra_turn_without_dealing() {
        let mut table = seats([8, 8], 30);
        let res = resolve_card(&mut table, Card::draw(Color::Black, 10), 0);
        assert_eq!(table.positions[1], 1);
        assert_eq!(table.hands[1], 7);
        assert!(res.extra_turn);
    }

    #[test]
    fn reaching_the_last_cell_wins() {
        let mut table = seats([95, 1], 30);
        let res = resolve_card(&mut table, Card::number(Color::Red, 9), 0);
        assert_eq!(table.positions[0], BOARD_SIZE);
        assert_eq!(res.winner, Some(0));
    }

    #[test]
    fn reverse_marks_the_next_seat_like_skip() {
        let mut table = seats([1, 1], 30);
        resolve_card(&mut table, Card::reverse(Color::Red), 1);
        assert_eq!(table.skips, [true, false]);
    }
}
