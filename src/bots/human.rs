use std::io::{self, BufRead, Write};

use crate::action::Action;
use crate::board::cell_of;
use crate::bot::Bot;
use crate::card::Color;
use crate::rules::is_legal;
use crate::state::{GameStateView, TurnPhase};
use crate::visualize::render_state;

/// Seat driven from a terminal.
///
/// Commands: a hand index plays that card, `d` draws, `k` keeps a drawn
/// card and ends the turn, and `r`/`b`/`g`/`y` name the color of a wild card.
pub struct HumanBot {
    name: String,
}

impl HumanBot {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    fn prompt(&self, state: &GameStateView, legal_actions: &[Action]) {
        println!("\n--- {} (player {}) ---", self.name, state.self_player);
        println!("{}", render_state(state));
        if let Some(me) = state.me() {
            let cell = cell_of(me.position);
            println!(
                "Your pawn is on cell {} (row {}, column {}).",
                me.position,
                cell.row + 1,
                cell.col + 1
            );
        }
        match state.phase {
            TurnPhase::AwaitingWildColor => {
                println!("Name a color for your wild card: [r]ed, [b]lue, [g]reen or [y]ellow.");
            }
            TurnPhase::AwaitingDrawDecision { hand_index } => {
                println!("You drew a playable card. Play it with {hand_index} or [k]eep it.");
            }
            TurnPhase::AwaitingMove | TurnPhase::GameOver => {
                let playable: Vec<String> = state
                    .hand()
                    .iter()
                    .enumerate()
                    .filter(|(idx, _)| legal_actions.contains(&Action::Play { hand_index: *idx }))
                    .map(|(idx, card)| format!("{idx}:{card}"))
                    .collect();
                if playable.is_empty() {
                    println!("Nothing fits on {}. [d]raw a card.", state.discard_top.card);
                } else {
                    println!("Playable: {}  or [d]raw.", playable.join("  "));
                }
            }
        }
    }
}

impl Default for HumanBot {
    fn default() -> Self {
        Self::new("Human")
    }
}

/// Turns one line of input into an offered action, or explains why not.
pub fn parse_command(
    input: &str,
    state: &GameStateView,
    legal_actions: &[Action],
) -> Result<Action, String> {
    let command = input.trim().to_ascii_lowercase();
    let action = match command.as_str() {
        "d" | "draw" => Action::Draw,
        "k" | "keep" => Action::EndTurn,
        "r" | "red" => Action::ChooseColor(Color::Red),
        "b" | "blue" => Action::ChooseColor(Color::Blue),
        "g" | "green" => Action::ChooseColor(Color::Green),
        "y" | "yellow" => Action::ChooseColor(Color::Yellow),
        other => {
            let hand_index = other
                .parse::<usize>()
                .map_err(|_| format!("unknown command '{other}', type 'help'"))?;
            let card = state
                .hand()
                .get(hand_index)
                .ok_or_else(|| format!("you hold no card {hand_index}"))?;
            if !is_legal(*card, &state.discard_top) {
                return Err(format!("{card} does not fit on {}", state.discard_top.card));
            }
            Action::Play { hand_index }
        }
    };
    if legal_actions.contains(&action) {
        Ok(action)
    } else {
        Err(String::from("that is not allowed right now"))
    }
}

impl Bot for HumanBot {
    fn select_action(&mut self, state: &GameStateView, legal_actions: &[Action]) -> Action {
        self.prompt(state, legal_actions);
        let stdin = io::stdin();
        loop {
            print!("> ");
            if io::stdout().flush().is_err() {
                eprintln!("failed to flush stdout");
            }
            let mut line = String::new();
            match stdin.lock().read_line(&mut line) {
                Ok(0) | Err(_) => {
                    println!("Input closed, leaving the game.");
                    std::process::exit(0);
                }
                Ok(_) => {}
            }
            match line.trim() {
                "q" | "quit" => {
                    println!("Leaving the game.");
                    std::process::exit(0);
                }
                "help" => {
                    println!("Play a card of the discard's color or label, or any black card.");
                    println!("Numbers move you ahead; reach the last cell or empty your hand to win.");
                    continue;
                }
                _ => {}
            }
            match parse_command(&line, state, legal_actions) {
                Ok(action) => return action,
                Err(reason) => println!("{reason}"),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::Card;
    use crate::game::GameBuilder;

    fn deck(hand0: &[Card], hand1: &[Card], opening: Card) -> Vec<Card> {
        let mut deck = vec![Card::number(Color::Green, 9); 4];
        deck.push(opening);
        deck.extend(hand1.iter().rev());
        deck.extend(hand0.iter().rev());
        deck
    }

    #[test]
    fn commands_map_to_offered_actions() {
        let hand0 = [Card::number(Color::Blue, 3), Card::number(Color::Red, 1)];
        let hand1 = [Card::number(Color::Blue, 2), Card::number(Color::Blue, 4)];
        let game = GameBuilder::new()
            .with_hand_size(2)
            .with_deck(deck(&hand0, &hand1, Card::number(Color::Red, 7)))
            .build()
            .expect("game");
        let view = game.state_view(0).expect("view");
        let legal = game.legal_actions(0).expect("legal actions");

        assert_eq!(parse_command(" 1\n", &view, &legal), Ok(Action::Play { hand_index: 1 }));
        assert_eq!(parse_command("D", &view, &legal), Ok(Action::Draw));
        assert!(parse_command("0", &view, &legal).is_err_and(|e| e.contains("does not fit")));
        assert!(parse_command("5", &view, &legal).is_err());
        assert!(parse_command("keep", &view, &legal).is_err());
        assert!(parse_command("red", &view, &legal).is_err());
        assert!(parse_command("shuffle", &view, &legal).is_err());
    }

    #[test]
    fn color_letters_answer_a_wild_card() {
        let hand0 = [Card::draw(Color::Black, 4), Card::number(Color::Red, 1)];
        let hand1 = [Card::number(Color::Blue, 2), Card::number(Color::Blue, 4)];
        let mut game = GameBuilder::new()
            .with_hand_size(2)
            .with_positions([1, 20])
            .with_deck(deck(&hand0, &hand1, Card::number(Color::Red, 7)))
            .build()
            .expect("game");
        game.play_card(0, 0).expect("wild is always legal");
        let view = game.state_view(0).expect("view");
        let legal = game.legal_actions(0).expect("legal actions");
        assert_eq!(parse_command("y", &view, &legal), Ok(Action::ChooseColor(Color::Yellow)));
        assert!(parse_command("d", &view, &legal).is_err());
    }
}
