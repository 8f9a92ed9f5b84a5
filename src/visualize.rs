use std::fmt::Write;

use crate::action::Action;
use crate::board::{COLS, Cell, ROWS, position_at};
use crate::card::Card;
use crate::state::{DiscardTop, GameStateView, GameStatus};

/// Customize state rendering for CLI visualization.
#[derive(Clone, Copy, Debug)]
pub struct VisualOptions {
    pub show_board: bool,
    /// Print every hand, not only the viewer's.
    pub reveal_hands: bool,
}

impl Default for VisualOptions {
    fn default() -> Self {
        Self {
            show_board: true,
            reveal_hands: false,
        }
    }
}

pub fn render_state(state: &GameStateView) -> String {
    render_state_with_options(state, VisualOptions::default())
}

pub fn render_state_with_options(state: &GameStateView, options: VisualOptions) -> String {
    let mut out = String::new();
    let status = match state.status {
        GameStatus::Ongoing => String::from("Ongoing"),
        GameStatus::Finished { winner } => format!("Finished (winner: Player {winner})"),
    };
    let _ = writeln!(out, "Game status: {status}");
    let _ = writeln!(out, "Phase: {:?}", state.phase);
    if options.show_board {
        render_board(&mut out, state);
    }
    let _ = writeln!(
        out,
        "Discard: {} ({} cards)  |  Deck: {}",
        format_top(&state.discard_top),
        state.discard_count,
        state.deck_count
    );
    let _ = writeln!(out, "Players:");
    for player in &state.players {
        let label_you = if player.id == state.self_player {
            " (You)"
        } else {
            ""
        };
        let current_tag = if player.is_current { " <- current" } else { "" };
        let skip_tag = if player.skip_pending { " [skips next turn]" } else { "" };
        let _ = writeln!(
            out,
            "  Player {} {}{} - cell {}{}{}",
            player.id, player.name, label_you, player.position, skip_tag, current_tag
        );
        if player.id == state.self_player || options.reveal_hands {
            if player.hand.is_empty() {
                let _ = writeln!(out, "    Hand: (empty)");
            } else {
                let hand_display = player
                    .hand
                    .iter()
                    .enumerate()
                    .map(|(idx, card)| format!("{idx}:{}", format_card(*card)))
                    .collect::<Vec<_>>()
                    .join("  ");
                let _ = writeln!(out, "    Hand: {hand_display}");
            }
        } else {
            let _ = writeln!(out, "    Hand size: {}", player.hand.len());
        }
    }
    out
}

/// Grid with cell numbers; pawns replace the number of the cell they stand on.
fn render_board(out: &mut String, state: &GameStateView) {
    for row in 0..ROWS {
        let mut line = String::with_capacity(COLS * 5);
        for col in 0..COLS {
            let Some(position) = position_at(Cell { row, col }) else {
                continue;
            };
            let pawns: String = state
                .players
                .iter()
                .filter(|p| p.position == position)
                .map(|p| char::from(b'A' + (p.id % 26) as u8))
                .collect();
            if pawns.is_empty() {
                let _ = write!(line, "{position:>4} ");
            } else {
                let _ = write!(line, "{pawns:>4} ");
            }
        }
        let _ = writeln!(out, "{}", line.trim_end());
    }
}

pub fn describe_action(state: &GameStateView, action: &Action) -> String {
    match action {
        Action::Play { hand_index } => {
            let card_desc = state
                .hand()
                .get(*hand_index)
                .map(|card| format_card(*card))
                .unwrap_or_else(|| String::from("--"));
            format!("Play hand[{hand_index}] {card_desc} on {}", format_top(&state.discard_top))
        }
        Action::Draw => format!("Draw a card ({} left)", state.deck_count),
        Action::EndTurn => String::from("Keep the drawn card and end turn"),
        Action::ChooseColor(color) => format!("Name {color} for the wild card"),
    }
}

fn format_card(card: Card) -> String {
    card.to_string()
}

fn format_top(top: &DiscardTop) -> String {
    if top.card.is_wild() && !top.is_unresolved() {
        format!("{} (as {})", format_card(top.card), top.color)
    } else {
        format_card(top.card)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::GameBuilder;

    #[test]
    fn render_and_describe_include_expected_phrases() {
        let game = GameBuilder::new().with_seed(3).build().expect("game");
        let view = game.state_view(0).expect("state view");
        let text = render_state(&view);
        assert!(text.contains("Player 0 Player1 (You)"));
        assert!(text.contains("Hand:"));
        assert!(text.contains("Hand size: 7"));
        // Both pawns share cell 1 at the bottom-left corner.
        assert!(text.lines().any(|line| line.starts_with("  AB")));
        let draw_desc = describe_action(&view, &Action::Draw);
        assert!(draw_desc.contains("91 left"));
        let play_desc = describe_action(&view, &Action::Play { hand_index: 0 });
        assert!(play_desc.starts_with("Play hand[0]"));
    }

    #[test]
    fn options_hide_the_board_and_reveal_hands() {
        let game = GameBuilder::new().with_seed(3).build().expect("game");
        let view = game.state_view(0).expect("state view");
        let options = VisualOptions {
            show_board: false,
            reveal_hands: true,
        };
        let text = render_state_with_options(&view, options);
        assert!(!text.lines().any(|line| line.starts_with("  AB")));
        assert!(!text.contains("Hand size:"));
        assert_eq!(text.matches("Hand: 0:").count(), 2);
    }
}
