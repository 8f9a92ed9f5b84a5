use crate::card::{Card, Color};

/// Picks the color to assign after a wild card: the most common color in
/// `hand`, ignoring wild cards. Ties go to the earlier of Red, Blue, Green,
/// Yellow; a hand with no colored cards yields Red.
pub fn choose_color(hand: &[Card]) -> Color {
    let mut counts = [0usize; Color::PLAYABLE.len()];
    for card in hand {
        if let Some(slot) = Color::PLAYABLE.iter().position(|c| *c == card.color) {
            counts[slot] += 1;
        }
    }
    let mut best = Color::Red;
    let mut best_count = 0;
    for (color, count) in Color::PLAYABLE.into_iter().zip(counts) {
        if count > best_count {
            best = color;
            best_count = count;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn majority_color_wins() {
        let hand = [
            Card::number(Color::Green, 1),
            Card::skip(Color::Green),
            Card::number(Color::Yellow, 4),
            Card::draw(Color::Black, 10),
        ];
        assert_eq!(choose_color(&hand), Color::Green);
    }

    #[test]
    fn ties_follow_priority_order() {
        let hand = [Card::number(Color::Yellow, 1), Card::number(Color::Blue, 2)];
        assert_eq!(choose_color(&hand), Color::Blue);
    }

    #[test]
    fn empty_or_all_wild_defaults_to_red() {
        assert_eq!(choose_color(&[]), Color::Red);
        assert_eq!(choose_color(&[Card::draw(Color::Black, 4)]), Color::Red);
    }
}
