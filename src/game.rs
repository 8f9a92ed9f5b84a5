use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::action::{Action, PlayerId};
use crate::board::{BOARD_SIZE, START_POSITION};
use crate::card::{Card, Color, DeckVariant, HAND_SIZE};
use crate::deck::Deck;
use crate::error::{GameError, InvalidAction, Violation};
use crate::rules::{self, Effect, Table, is_legal, resolve_card};
use crate::state::{
    DiscardTop, GameSettings, GameStateView, GameStatus, PlayerView, SUPPORTED_PLAYERS, TurnPhase,
};

const DEFAULT_SEED: u64 = 0x5EED_5EED_5EED_5EED;

/// Configuration required to bootstrap a game instance.
#[derive(Clone, Debug)]
pub struct GameConfig {
    pub names: [String; SUPPORTED_PLAYERS],
    pub seed: u64,
    pub variant: DeckVariant,
    pub hand_size: usize,
    pub start_positions: [usize; SUPPORTED_PLAYERS],
}

impl GameConfig {
    pub fn new(seed: u64) -> Self {
        Self {
            names: [String::from("Player1"), String::from("Player2")],
            seed,
            variant: DeckVariant::default(),
            hand_size: HAND_SIZE,
            start_positions: [START_POSITION; SUPPORTED_PLAYERS],
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

/// Builder that enables deterministic deck injection for testing and bot experiments.
pub struct GameBuilder {
    config: GameConfig,
    deck: Option<Vec<Card>>,
}

impl GameBuilder {
    pub fn new() -> Self {
        Self {
            config: GameConfig::default(),
            deck: None,
        }
    }

    pub fn with_names<S: Into<String>>(mut self, names: [S; SUPPORTED_PLAYERS]) -> Self {
        self.config.names = names.map(Into::into);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    pub fn with_variant(mut self, variant: DeckVariant) -> Self {
        self.config.variant = variant;
        self
    }

    /// Uses `deck` as-is instead of a shuffled one. The last card is dealt first:
    /// player 0's hand, then player 1's, then the opening discard.
    pub fn with_deck(mut self, deck: Vec<Card>) -> Self {
        self.deck = Some(deck);
        self
    }

    /// Override the number of cards dealt to each player (default 7).
    pub fn with_hand_size(mut self, hand_size: usize) -> Self {
        self.config.hand_size = hand_size;
        self
    }

    /// Start the pawns somewhere other than the first cell.
    pub fn with_positions(mut self, positions: [usize; SUPPORTED_PLAYERS]) -> Self {
        self.config.start_positions = positions;
        self
    }

    pub fn build(self) -> Result<Game, GameError> {
        Game::from_builder(self)
    }
}

impl Default for GameBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of a successful card play.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayOutcome {
    pub card: Card,
    pub effect: Effect,
    pub winner: Option<PlayerId>,
    /// Player holding the turn after the play.
    pub current_player: PlayerId,
    pub phase: TurnPhase,
}

/// Result of a draw. An empty deck still ends the turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DrawOutcome {
    Drawn { card: Card, playable: bool },
    DeckEmpty,
}

/// Result of [`Game::apply_action`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Played(PlayOutcome),
    Drew(DrawOutcome),
    Passed,
    ColorChosen(Color),
}

/// Two-player race game: cards move pawns along a snake board.
pub struct Game {
    settings: GameSettings,
    status: GameStatus,
    phase: TurnPhase,
    current_player: PlayerId,
    direction: i8,
    players: Vec<PlayerState>,
    deck: Deck,
    discard_pile: Vec<Card>,
    top: DiscardTop,
}

impl Game {
    pub fn builder() -> GameBuilder {
        GameBuilder::new()
    }

    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        GameBuilder { config, deck: None }.build()
    }

    /// Shuffles a fresh deck with `seed`, deals seven cards each and flips the opening discard.
    pub fn new_game<S: Into<String>>(
        names: [S; SUPPORTED_PLAYERS],
        seed: u64,
    ) -> Result<Self, GameError> {
        GameBuilder::new().with_names(names).with_seed(seed).build()
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn settings(&self) -> GameSettings {
        self.settings
    }

    pub fn current_player(&self) -> PlayerId {
        self.current_player
    }

    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    pub fn direction(&self) -> i8 {
        self.direction
    }

    pub fn discard_top(&self) -> DiscardTop {
        self.top
    }

    pub fn discard_pile(&self) -> &[Card] {
        &self.discard_pile
    }

    pub fn deck_count(&self) -> usize {
        self.deck.len()
    }

    pub fn hand(&self, player: PlayerId) -> Result<&[Card], GameError> {
        self.player(player).map(|p| p.hand.as_slice())
    }

    pub fn player_position(&self, player: PlayerId) -> Result<usize, GameError> {
        self.player(player).map(|p| p.position)
    }

    pub fn skip_pending(&self, player: PlayerId) -> Result<bool, GameError> {
        self.player(player).map(|p| p.skip_pending)
    }

    /// Cards across the deck, both hands and the discard pile.
    pub fn card_count(&self) -> usize {
        self.deck.len()
            + self.discard_pile.len()
            + self.players.iter().map(|p| p.hand.len()).sum::<usize>()
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.status, GameStatus::Finished { .. })
    }

    pub fn winner(&self) -> Option<PlayerId> {
        match self.status {
            GameStatus::Finished { winner } => Some(winner),
            GameStatus::Ongoing => None,
        }
    }

    pub fn state_view(&self, perspective: PlayerId) -> Result<GameStateView, GameError> {
        self.player(perspective)?;
        let players = self
            .players
            .iter()
            .enumerate()
            .map(|(idx, player)| PlayerView {
                id: idx,
                name: player.name.clone(),
                position: player.position,
                skip_pending: player.skip_pending,
                hand: player.hand.clone(),
                is_current: idx == self.current_player,
                has_won: self.winner() == Some(idx),
            })
            .collect();

        Ok(GameStateView {
            settings: self.settings,
            phase: self.phase,
            status: self.status,
            self_player: perspective,
            current_player: self.current_player,
            direction: self.direction,
            deck_count: self.deck.len(),
            discard_count: self.discard_pile.len(),
            discard_top: self.discard_top(),
            players,
        })
    }

    /// Hand indices the current player may play right now.
    pub fn legal_moves(&self) -> Vec<usize> {
        let top = self.discard_top();
        let hand = &self.players[self.current_player].hand;
        match self.phase {
            TurnPhase::AwaitingMove => hand
                .iter()
                .enumerate()
                .filter(|(_, card)| is_legal(**card, &top))
                .map(|(idx, _)| idx)
                .collect(),
            TurnPhase::AwaitingDrawDecision { hand_index } => hand
                .get(hand_index)
                .filter(|card| is_legal(**card, &top))
                .map(|_| vec![hand_index])
                .unwrap_or_default(),
            TurnPhase::AwaitingWildColor | TurnPhase::GameOver => Vec::new(),
        }
    }

    pub fn legal_actions(&self, player: PlayerId) -> Result<Vec<Action>, GameError> {
        if self.is_finished() {
            return Ok(Vec::new());
        }
        self.player(player)?;
        if player != self.current_player {
            return Err(GameError::NotPlayersTurn);
        }
        let mut actions: Vec<Action> = self
            .legal_moves()
            .into_iter()
            .map(|hand_index| Action::Play { hand_index })
            .collect();
        match self.phase {
            TurnPhase::AwaitingMove => actions.push(Action::Draw),
            TurnPhase::AwaitingDrawDecision { .. } => actions.push(Action::EndTurn),
            TurnPhase::AwaitingWildColor => {
                actions.extend(Color::PLAYABLE.into_iter().map(Action::ChooseColor))
            }
            TurnPhase::GameOver => {}
        }
        Ok(actions)
    }

    pub fn apply_action(&mut self, player: PlayerId, action: Action) -> Result<Outcome, GameError> {
        match action {
            Action::Play { hand_index } => self.play_card(player, hand_index).map(Outcome::Played),
            Action::Draw => self.draw_card(player).map(Outcome::Drew),
            Action::EndTurn => self.end_turn(player).map(|()| Outcome::Passed),
            Action::ChooseColor(color) => self
                .choose_wild_color(player, color)
                .map(|()| Outcome::ColorChosen(color)),
        }
    }

    /// Plays the card at `hand_index`. Rejected plays leave the state untouched.
    pub fn play_card(&mut self, player: PlayerId, hand_index: usize) -> Result<PlayOutcome, GameError> {
        self.ensure_turn(player)?;
        match self.phase {
            TurnPhase::AwaitingWildColor => return Err(Violation::ColorPending.into()),
            TurnPhase::AwaitingDrawDecision { hand_index: drawn } if drawn != hand_index => {
                return Err(Violation::DrawnCardOnly.into());
            }
            _ => {}
        }
        let card = *self.players[player]
            .hand
            .get(hand_index)
            .ok_or(InvalidAction::HandIndex(hand_index))?;
        let top = self.discard_top();
        if !is_legal(card, &top) {
            return Err(GameError::IllegalPlay {
                card,
                top_card: top.card,
                top_color: top.color,
            });
        }

        self.players[player].hand.remove(hand_index);
        self.discard_pile.push(card);
        self.top = DiscardTop::new(card);
        let resolution = resolve_card(self, card, player);
        debug!(player, %card, effect = ?resolution.effect, "card played");

        let winner = resolution
            .winner
            .or_else(|| self.players[player].hand.is_empty().then_some(player));
        if let Some(winner) = winner {
            self.finish(winner);
        } else if resolution.extra_turn {
            self.phase = TurnPhase::AwaitingWildColor;
        } else {
            self.advance_turn();
        }

        Ok(PlayOutcome {
            card,
            effect: resolution.effect,
            winner,
            current_player: self.current_player,
            phase: self.phase,
        })
    }

    /// Draws one card. A playable draw may be played straight away (or kept
    /// with [`Game::end_turn`]); anything else ends the turn.
    pub fn draw_card(&mut self, player: PlayerId) -> Result<DrawOutcome, GameError> {
        self.ensure_turn(player)?;
        match self.phase {
            TurnPhase::AwaitingWildColor => return Err(Violation::ColorPending.into()),
            TurnPhase::AwaitingDrawDecision { .. } => {
                self.advance_turn();
                return Err(Violation::RepeatedDraw.into());
            }
            TurnPhase::AwaitingMove | TurnPhase::GameOver => {}
        }
        let Some(card) = self.deck.draw() else {
            debug!(player, "deck is empty, turn ends");
            self.advance_turn();
            return Ok(DrawOutcome::DeckEmpty);
        };
        let playable = is_legal(card, &self.discard_top());
        let hand = &mut self.players[player].hand;
        hand.push(card);
        debug!(player, %card, playable, "card drawn");
        if playable {
            self.phase = TurnPhase::AwaitingDrawDecision {
                hand_index: hand.len() - 1,
            };
        } else {
            self.advance_turn();
        }
        Ok(DrawOutcome::Drawn { card, playable })
    }

    /// Keeps a playable drawn card and passes the turn.
    pub fn end_turn(&mut self, player: PlayerId) -> Result<(), GameError> {
        self.ensure_turn(player)?;
        match self.phase {
            TurnPhase::AwaitingDrawDecision { .. } => {
                self.advance_turn();
                Ok(())
            }
            TurnPhase::AwaitingWildColor => Err(Violation::ColorPending.into()),
            TurnPhase::AwaitingMove | TurnPhase::GameOver => Err(Violation::CannotPass.into()),
        }
    }

    /// Assigns a color to the wild card just played; the same player moves again.
    pub fn choose_wild_color(&mut self, player: PlayerId, color: Color) -> Result<(), GameError> {
        self.ensure_turn(player)?;
        if self.phase != TurnPhase::AwaitingWildColor {
            return Err(Violation::NoColorPending.into());
        }
        if color.is_black() {
            return Err(InvalidAction::WildColor(color).into());
        }
        self.top.color = color;
        self.phase = TurnPhase::AwaitingMove;
        debug!(player, %color, "wild color chosen");
        Ok(())
    }

    fn from_builder(builder: GameBuilder) -> Result<Self, GameError> {
        let GameBuilder { config, deck } = builder;
        let mut settings = GameSettings::new(config.names.len())?;
        if config.hand_size == 0 {
            return Err(GameError::InvalidConfiguration("hand size must be positive"));
        }
        if config
            .start_positions
            .iter()
            .any(|p| !(START_POSITION..BOARD_SIZE).contains(p))
        {
            return Err(GameError::InvalidConfiguration(
                "start positions must lie before the last cell",
            ));
        }
        settings.hand_size = config.hand_size;
        settings.variant = config.variant;

        let mut deck = match deck {
            Some(cards) => Deck::from_cards(cards),
            None => {
                let mut rng = StdRng::seed_from_u64(config.seed);
                Deck::shuffled(config.variant, &mut rng)
            }
        };

        let mut players = Vec::with_capacity(settings.num_players);
        for (name, position) in config.names.into_iter().zip(config.start_positions) {
            let mut hand = Vec::with_capacity(settings.hand_size);
            for _ in 0..settings.hand_size {
                hand.push(deck.draw().ok_or(GameError::InvalidConfiguration(
                    "deck exhausted while dealing hands",
                ))?);
            }
            players.push(PlayerState {
                name,
                hand,
                position,
                skip_pending: false,
            });
        }

        let opening = flip_opening(&mut deck)?;
        Ok(Game {
            settings,
            status: GameStatus::Ongoing,
            phase: TurnPhase::AwaitingMove,
            current_player: 0,
            direction: 1,
            players,
            deck,
            discard_pile: vec![opening],
            top: DiscardTop::new(opening),
        })
    }

    fn player(&self, player: PlayerId) -> Result<&PlayerState, GameError> {
        self.players
            .get(player)
            .ok_or(GameError::InvalidPlayer(player))
    }

    fn ensure_turn(&self, player: PlayerId) -> Result<(), GameError> {
        if self.is_finished() {
            return Err(GameError::GameOver);
        }
        self.player(player)?;
        if player != self.current_player {
            return Err(GameError::NotPlayersTurn);
        }
        Ok(())
    }

    fn finish(&mut self, winner: PlayerId) {
        info!(winner, name = %self.players[winner].name, "game won");
        self.status = GameStatus::Finished { winner };
        self.phase = TurnPhase::GameOver;
    }

    /// Hands the turn on, consuming skip flags. Each pass clears one flag, so
    /// with two seats a skip hands the turn straight back to the skipper.
    fn advance_turn(&mut self) {
        let seats = self.players.len();
        let mut next = rules::next_seat(self.current_player, self.direction, seats);
        while self.players[next].skip_pending {
            self.players[next].skip_pending = false;
            debug!(player = next, "turn skipped");
            next = rules::next_seat(next, self.direction, seats);
        }
        self.current_player = next;
        self.phase = TurnPhase::AwaitingMove;
    }
}

impl Table for Game {
    fn seat_count(&self) -> usize {
        self.players.len()
    }

    fn direction(&self) -> i8 {
        self.direction
    }

    fn position(&self, player: PlayerId) -> usize {
        self.players[player].position
    }

    fn set_position(&mut self, player: PlayerId, position: usize) {
        self.players[player].position = position;
    }

    fn set_skip_pending(&mut self, player: PlayerId) {
        self.players[player].skip_pending = true;
    }

    fn deal(&mut self, player: PlayerId, count: usize) -> usize {
        let drawn = self.deck.draw_many(count);
        let dealt = drawn.len();
        self.players[player].hand.extend(drawn);
        dealt
    }
}

/// Flips the opening discard, sending action and wild cards to the bottom
/// until a numbered card turns up.
fn flip_opening(deck: &mut Deck) -> Result<Card, GameError> {
    for _ in 0..deck.len() {
        let Some(card) = deck.draw() else { break };
        if card.is_number() {
            return Ok(card);
        }
        deck.put_bottom(card);
    }
    Err(GameError::InvalidConfiguration(
        "deck holds no numbered card to open with",
    ))
}

#[derive(Clone, Debug)]
struct PlayerState {
    name: String,
    hand: Vec<Card>,
    position: usize,
    skip_pending: bool,
}
