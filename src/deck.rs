use rand::Rng;
use rand::seq::SliceRandom;

use crate::card::{Card, DeckVariant, full_deck};

/// Face-down draw pile. The top of the pile is the end of the vector.
#[derive(Clone, Debug, Default)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// Wraps an already ordered pile; the last card is drawn first.
    pub fn from_cards(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    /// Builds and shuffles a fresh deck for `variant`.
    pub fn shuffled<R: Rng + ?Sized>(variant: DeckVariant, rng: &mut R) -> Self {
        let mut deck = Self::from_cards(full_deck(variant));
        deck.shuffle(rng);
        deck
    }

    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
    }

    pub fn draw(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    /// Draws up to `count` cards, stopping early when the pile runs out.
    pub fn draw_many(&mut self, count: usize) -> Vec<Card> {
        let take = count.min(self.cards.len());
        let mut drawn = self.cards.split_off(self.cards.len() - take);
        drawn.reverse();
        drawn
    }

    /// Puts a card underneath the pile.
    pub fn put_bottom(&mut self, card: Card) {
        self.cards.insert(0, card);
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}
