use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Card colors. `Black` marks the wild cards, which carry no color of their own.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Color {
    Red,
    Blue,
    Green,
    Yellow,
    Black,
}

impl Color {
    /// The four colors a wild card can be assigned, in tie-break priority order.
    pub const PLAYABLE: [Color; 4] = [Color::Red, Color::Blue, Color::Green, Color::Yellow];

    #[inline]
    pub fn is_black(self) -> bool {
        matches!(self, Color::Black)
    }

    pub fn name(self) -> &'static str {
        match self {
            Color::Red => "Red",
            Color::Blue => "Blue",
            Color::Green => "Green",
            Color::Yellow => "Yellow",
            Color::Black => "Black",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What is printed on a card.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Label {
    /// Numbered card between 0 and 9; moves the player forward.
    Number(u8),
    Skip,
    Reverse,
    /// Pushes the next player back; 2, 4 or 10.
    Draw(u8),
}

impl Label {
    #[inline]
    pub fn is_number(self) -> bool {
        matches!(self, Label::Number(_))
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Number(n) => write!(f, "{n}"),
            Label::Skip => f.write_str("Skip"),
            Label::Reverse => f.write_str("Reverse"),
            Label::Draw(n) => write!(f, "Draw {n}"),
        }
    }
}

/// Immutable card value.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub color: Color,
    pub label: Label,
}

pub const MAX_NUMBER: u8 = 9;
pub const COPIES_PER_NUMBER: usize = 2;
pub const COPIES_PER_ACTION: usize = 2;
pub const BLACK_DRAW_TWO: usize = 4;
pub const BLACK_DRAW_FOUR: usize = 4;
pub const BLACK_DRAW_TEN: usize = 2;
pub const HAND_SIZE: usize = 7;
pub const CLASSIC_DECK_SIZE: usize = 110;

impl Card {
    pub const fn new(color: Color, label: Label) -> Self {
        Self { color, label }
    }

    pub const fn number(color: Color, value: u8) -> Self {
        Self::new(color, Label::Number(value))
    }

    pub const fn skip(color: Color) -> Self {
        Self::new(color, Label::Skip)
    }

    pub const fn reverse(color: Color) -> Self {
        Self::new(color, Label::Reverse)
    }

    pub const fn draw(color: Color, count: u8) -> Self {
        Self::new(color, Label::Draw(count))
    }

    #[inline]
    pub fn is_wild(&self) -> bool {
        self.color.is_black()
    }

    #[inline]
    pub fn is_number(&self) -> bool {
        self.label.is_number()
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.color, self.label)
    }
}

/// Deck composition used for a game.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize, ValueEnum)]
pub enum DeckVariant {
    /// Full recipe including one "0" per color (110 cards).
    Classic,
    /// Same recipe with every "0" removed (106 cards).
    #[default]
    NoZeros,
}

impl DeckVariant {
    pub fn deck_size(self) -> usize {
        match self {
            DeckVariant::Classic => CLASSIC_DECK_SIZE,
            DeckVariant::NoZeros => CLASSIC_DECK_SIZE - Color::PLAYABLE.len(),
        }
    }
}

/// Builds the deck for `variant` in deterministic order (unshuffled).
pub fn full_deck(variant: DeckVariant) -> Vec<Card> {
    let mut deck = Vec::with_capacity(CLASSIC_DECK_SIZE);
    for color in Color::PLAYABLE {
        if variant == DeckVariant::Classic {
            deck.push(Card::number(color, 0));
        }
        for value in 1..=MAX_NUMBER {
            deck.extend(std::iter::repeat(Card::number(color, value)).take(COPIES_PER_NUMBER));
        }
        for card in [Card::skip(color), Card::reverse(color), Card::draw(color, 2)] {
            deck.extend(std::iter::repeat(card).take(COPIES_PER_ACTION));
        }
    }
    deck.extend(std::iter::repeat(Card::draw(Color::Black, 2)).take(BLACK_DRAW_TWO));
    deck.extend(std::iter::repeat(Card::draw(Color::Black, 4)).take(BLACK_DRAW_FOUR));
    deck.extend(std::iter::repeat(Card::draw(Color::Black, 10)).take(BLACK_DRAW_TEN));
    deck
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_deck_has_106_cards() {
        let deck = full_deck(DeckVariant::default());
        assert_eq!(deck.len(), 106);
        assert_eq!(deck.iter().filter(|c| c.is_wild()).count(), 10);
        for color in Color::PLAYABLE {
            assert_eq!(deck.iter().filter(|c| c.color == color).count(), 24);
        }
        assert!(!deck.iter().any(|c| c.label == Label::Number(0)));
    }

    #[test]
    fn classic_variant_keeps_one_zero_per_color() {
        let deck = full_deck(DeckVariant::Classic);
        assert_eq!(deck.len(), DeckVariant::Classic.deck_size());
        assert_eq!(deck.iter().filter(|c| c.label == Label::Number(0)).count(), 4);
    }

    #[test]
    fn labels_render_like_printed_cards() {
        assert_eq!(Card::draw(Color::Black, 10).to_string(), "Black Draw 10");
        assert_eq!(Card::number(Color::Green, 7).to_string(), "Green 7");
    }
}
