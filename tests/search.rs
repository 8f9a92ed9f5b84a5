use unorace::search::{
    Projection, Search, SearchError, WIN_SCORE, choose_move, fallback_move,
};
use unorace::{
    Action, Bot, Card, Color, DiscardTop, GameBuilder, GameError, MinimaxBot, Move, RandomBot,
    SearchConfig, opponent_choose_color, opponent_choose_move,
};

use rand::SeedableRng;
use rand::rngs::StdRng;

fn red(n: u8) -> Card {
    Card::number(Color::Red, n)
}

fn blue(n: u8) -> Card {
    Card::number(Color::Blue, n)
}

fn build_deck(hand0: &[Card], hand1: &[Card], opening: Card, pile: &[Card]) -> Vec<Card> {
    let mut deck = pile.to_vec();
    deck.push(opening);
    deck.extend(hand1.iter().rev());
    deck.extend(hand0.iter().rev());
    deck
}

fn filler() -> Vec<Card> {
    vec![Card::number(Color::Green, 9); 8]
}

#[test]
fn takes_the_winning_card() -> Result<(), GameError> {
    let hand0 = [red(2), red(5), blue(1)];
    let hand1 = [blue(2), blue(3), blue(4)];
    let deck = build_deck(&hand0, &hand1, red(7), &filler());
    let game = GameBuilder::new()
        .with_hand_size(3)
        .with_positions([95, 1])
        .with_deck(deck)
        .build()?;
    let view = game.state_view(0)?;
    let config = SearchConfig::default();
    assert_eq!(choose_move(&view, &config), Ok(Move::Play(1)));
    assert_eq!(opponent_choose_move(&view, &config), Move::Play(1));
    Ok(())
}

#[test]
fn wild_draw_ten_stops_a_rival_about_to_win() -> Result<(), GameError> {
    let hand0 = [red(1), Card::draw(Color::Black, 10), Card::number(Color::Green, 4)];
    let hand1 = [red(3), blue(9), blue(8)];
    let deck = build_deck(&hand0, &hand1, red(7), &filler());
    let game = GameBuilder::new()
        .with_hand_size(3)
        .with_positions([1, 97])
        .with_deck(deck)
        .build()?;
    let view = game.state_view(0)?;
    assert_eq!(choose_move(&view, &SearchConfig::with_depth(3)), Ok(Move::Play(1)));
    Ok(())
}

#[test]
fn search_does_not_touch_the_view() -> Result<(), GameError> {
    let game = GameBuilder::new().with_seed(77).build()?;
    let view = game.state_view(0)?;
    let before = view.clone();
    let first = opponent_choose_move(&view, &SearchConfig::default());
    assert_eq!(view, before);
    assert_eq!(opponent_choose_move(&view, &SearchConfig::default()), first);
    Ok(())
}

#[test]
fn terminal_children_are_not_expanded() {
    let root = Projection::new(
        [&[red(5)], &[blue(1), blue(2)]],
        [10, 10],
        DiscardTop::new(red(7)),
        0,
        0,
    );
    let config = SearchConfig::with_depth(4);
    let mut search = Search::new(0, &config);
    let (mv, score) = search.best_move(&root).expect("searchable root");
    assert_eq!(mv, Move::Play(0));
    assert!(score > WIN_SCORE);
    assert_eq!(search.stats().deepest, 1);
    assert_eq!(search.stats().nodes, 1);
}

#[test]
fn blocked_root_falls_back_to_drawing() {
    let root = Projection::new(
        [&[blue(5)], &[blue(1)]],
        [10, 10],
        DiscardTop::new(red(7)),
        0,
        0,
    );
    let config = SearchConfig::default();
    let mut search = Search::new(0, &config);
    let (mv, _) = search.best_move(&root).expect("searchable root");
    assert_eq!(mv, Move::Draw);
}

#[test]
fn view_off_turn_uses_the_fallback_rule() -> Result<(), GameError> {
    let hand0 = [red(2), red(5)];
    let hand1 = [blue(2), red(3)];
    let deck = build_deck(&hand0, &hand1, red(7), &filler());
    let game = GameBuilder::new().with_hand_size(2).with_deck(deck).build()?;
    let view = game.state_view(1)?;
    assert_eq!(
        choose_move(&view, &SearchConfig::default()),
        Err(SearchError::NotOnMove {
            mover: 0,
            perspective: 1
        })
    );
    assert_eq!(opponent_choose_move(&view, &SearchConfig::default()), Move::Play(1));
    assert_eq!(
        fallback_move(&hand1, &DiscardTop::new(red(7))),
        Move::Play(1)
    );
    Ok(())
}

#[test]
fn drawn_playable_card_is_played() -> Result<(), GameError> {
    let hand0 = [blue(2), blue(5)];
    let hand1 = [blue(3), blue(4)];
    let deck = build_deck(&hand0, &hand1, red(7), &[red(4)]);
    let mut game = GameBuilder::new().with_hand_size(2).with_deck(deck).build()?;
    game.draw_card(0)?;
    let view = game.state_view(0)?;
    assert_eq!(
        choose_move(&view, &SearchConfig::default()),
        Err(SearchError::AlreadyDrew)
    );
    assert_eq!(opponent_choose_move(&view, &SearchConfig::default()), Move::Play(2));
    Ok(())
}

#[test]
fn color_choice_follows_the_hand() -> Result<(), GameError> {
    let hand0 = [Card::draw(Color::Black, 2), blue(1), blue(2), red(3)];
    let hand1 = [blue(3), blue(4), blue(5), blue(6)];
    let deck = build_deck(&hand0, &hand1, red(7), &filler());
    let mut game = GameBuilder::new().with_hand_size(4).with_deck(deck).build()?;
    game.play_card(0, 0)?;
    let view = game.state_view(0)?;
    assert_eq!(opponent_choose_color(&view), Color::Blue);

    let mut bot = MinimaxBot::with_depth(2);
    let legal = game.legal_actions(0)?;
    assert_eq!(
        bot.select_action(&view, &legal),
        Action::ChooseColor(Color::Blue)
    );
    Ok(())
}

#[test]
fn minimax_bot_only_picks_offered_actions() -> Result<(), GameError> {
    let mut game = GameBuilder::new().with_seed(2024).build()?;
    let mut bots: [Box<dyn Bot>; 2] = [
        Box::new(MinimaxBot::with_depth(2)),
        Box::new(RandomBot::new(StdRng::seed_from_u64(9))),
    ];
    for _ in 0..300 {
        if game.is_finished() {
            break;
        }
        let current = game.current_player();
        let view = game.state_view(current)?;
        let legal = game.legal_actions(current)?;
        let action = bots[current].select_action(&view, &legal);
        assert!(legal.contains(&action));
        game.apply_action(current, action)?;
    }
    assert_eq!(game.card_count(), 106);
    Ok(())
}

#[test]
fn pending_skip_absorbs_the_next_turn() {
    let mut node = Projection::new(
        [&[red(1), red(2)], &[blue(1)]],
        [10, 10],
        DiscardTop::new(red(7)),
        5,
        0,
    )
    .with_skips([false, true]);
    node.apply(Move::Draw).expect("deck has cards");
    assert_eq!(node.mover(), 0);
    assert_eq!(node.deck_size(), 4);
    node.apply(Move::Play(0)).expect("red on red");
    assert_eq!(node.mover(), 1);
    assert_eq!(node.position_of(0), 11);
}

#[test]
fn winning_card_beats_a_hand_full_of_specials() {
    let mut hand0 = vec![red(5)];
    for count in [2, 2, 2, 2, 4, 4, 4, 4, 10, 10] {
        hand0.push(Card::draw(Color::Black, count));
    }
    for color in Color::PLAYABLE {
        for _ in 0..2 {
            hand0.extend([Card::draw(color, 2), Card::skip(color), Card::reverse(color)]);
        }
    }
    assert_eq!(hand0.len(), 35);
    let hand1: Vec<Card> = (1..=9).flat_map(|n| [blue(n), blue(n)]).collect();
    let root = Projection::new(
        [hand0.as_slice(), hand1.as_slice()],
        [95, 1],
        DiscardTop::new(red(7)),
        20,
        0,
    );
    let config = SearchConfig::default();
    let mut search = Search::new(0, &config);
    let (mv, score) = search.best_move(&root).expect("searchable root");
    assert_eq!(mv, Move::Play(0));
    assert!(score > WIN_SCORE);
}

#[test]
fn view_with_unknown_seat_uses_the_fallback_rule() -> Result<(), GameError> {
    let game = GameBuilder::new().with_seed(31).build()?;
    let mut view = game.state_view(0)?;
    view.self_player = 2;
    view.current_player = 2;
    let config = SearchConfig::default();
    assert_eq!(choose_move(&view, &config), Err(SearchError::Seat(2)));
    // No hand belongs to seat 2, so the fallback can only draw.
    assert_eq!(opponent_choose_move(&view, &config), Move::Draw);
    Ok(())
}
