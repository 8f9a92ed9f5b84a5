use smallvec::SmallVec;

use crate::action::{Move, PlayerId};
use crate::board::BOARD_SIZE;
use crate::card::Card;
use crate::rules::{Table, is_legal, resolve_card};
use crate::search::SearchError;
use crate::search::color::choose_color;
use crate::state::{DiscardTop, GameStateView, SUPPORTED_PLAYERS, TurnPhase};

/// Hand storage for lookahead; typical hands stay inline.
pub type Hand = SmallVec<[Card; 16]>;

/// Legal moves at a search node.
pub type Moves = SmallVec<[Move; 16]>;

/// Minimal copy of the game used for lookahead.
///
/// The deck is only a count: a simulated draw shrinks it without adding a
/// card to the drawer's hand, since the drawn card cannot be known.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Projection {
    hands: [Hand; SUPPORTED_PLAYERS],
    positions: [usize; SUPPORTED_PLAYERS],
    skips: [bool; SUPPORTED_PLAYERS],
    top: DiscardTop,
    deck_size: usize,
    direction: i8,
    mover: PlayerId,
}

impl Projection {
    pub fn new(
        hands: [&[Card]; SUPPORTED_PLAYERS],
        positions: [usize; SUPPORTED_PLAYERS],
        top: DiscardTop,
        deck_size: usize,
        mover: PlayerId,
    ) -> Self {
        Self {
            hands: hands.map(Hand::from_slice),
            positions,
            skips: [false; SUPPORTED_PLAYERS],
            top,
            deck_size,
            direction: 1,
            mover: mover % SUPPORTED_PLAYERS,
        }
    }

    /// Projects a view whose owner is on move.
    pub fn from_view(view: &GameStateView) -> Result<Self, SearchError> {
        if view.players.len() != SUPPORTED_PLAYERS {
            return Err(SearchError::PlayerCount(view.players.len()));
        }
        if let Some(seat) = [view.self_player, view.current_player]
            .into_iter()
            .find(|&seat| seat >= SUPPORTED_PLAYERS)
        {
            return Err(SearchError::Seat(seat));
        }
        match view.phase {
            TurnPhase::AwaitingMove => {}
            TurnPhase::AwaitingWildColor => return Err(SearchError::ColorPending),
            TurnPhase::AwaitingDrawDecision { .. } => return Err(SearchError::AlreadyDrew),
            TurnPhase::GameOver => return Err(SearchError::GameOver),
        }
        if view.current_player != view.self_player {
            return Err(SearchError::NotOnMove {
                mover: view.current_player,
                perspective: view.self_player,
            });
        }
        let seat = |idx: usize| &view.players[idx];
        Ok(Self {
            hands: [Hand::from_slice(&seat(0).hand), Hand::from_slice(&seat(1).hand)],
            positions: [seat(0).position, seat(1).position],
            skips: [seat(0).skip_pending, seat(1).skip_pending],
            top: view.discard_top,
            deck_size: view.deck_count,
            direction: view.direction,
            mover: view.current_player,
        })
    }

    pub fn with_skips(mut self, skips: [bool; SUPPORTED_PLAYERS]) -> Self {
        self.skips = skips;
        self
    }

    pub fn mover(&self) -> PlayerId {
        self.mover
    }

    pub fn hand(&self, player: PlayerId) -> &[Card] {
        &self.hands[player]
    }

    pub fn position_of(&self, player: PlayerId) -> usize {
        self.positions[player]
    }

    pub fn top(&self) -> DiscardTop {
        self.top
    }

    pub fn deck_size(&self) -> usize {
        self.deck_size
    }

    /// A pawn on the last cell or an empty hand ends the game.
    pub fn is_terminal(&self) -> bool {
        self.positions.iter().any(|&p| p >= BOARD_SIZE) || self.hands.iter().any(|h| h.is_empty())
    }

    /// Whether `player` has reached the last cell or emptied their hand.
    pub fn has_won(&self, player: PlayerId) -> bool {
        self.positions[player] >= BOARD_SIZE || self.hands[player].is_empty()
    }

    /// Plays of each legal card in hand order, then a draw while the deck lasts.
    pub fn legal_moves(&self) -> Moves {
        let mut moves: Moves = self.hands[self.mover]
            .iter()
            .enumerate()
            .filter(|(_, card)| is_legal(**card, &self.top))
            .map(|(idx, _)| Move::Play(idx))
            .collect();
        if self.deck_size > 0 {
            moves.push(Move::Draw);
        }
        moves
    }

    /// Applies `mv` for the player on move.
    pub fn apply(&mut self, mv: Move) -> Result<(), SearchError> {
        let mover = self.mover;
        match mv {
            Move::Play(idx) => {
                let card = *self.hands[mover]
                    .get(idx)
                    .ok_or(SearchError::HandIndex(idx))?;
                if !is_legal(card, &self.top) {
                    return Err(SearchError::IllegalCard(card));
                }
                self.hands[mover].remove(idx);
                self.top = DiscardTop::new(card);
                let resolution = resolve_card(self, card, mover);
                if resolution.extra_turn {
                    self.top.color = choose_color(&self.hands[mover]);
                    return Ok(());
                }
            }
            Move::Draw => {
                if self.deck_size == 0 {
                    return Err(SearchError::EmptyDeck);
                }
                self.deck_size -= 1;
            }
        }
        self.pass_turn();
        Ok(())
    }

    /// Hands the turn over unless the rival's pending skip absorbs it.
    fn pass_turn(&mut self) {
        let next = crate::rules::next_seat(self.mover, self.direction, SUPPORTED_PLAYERS);
        if self.skips[next] {
            self.skips[next] = false;
        } else {
            self.mover = next;
        }
    }
}

impl Table for Projection {
    fn seat_count(&self) -> usize {
        SUPPORTED_PLAYERS
    }

    fn direction(&self) -> i8 {
        self.direction
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

    fn deal(&mut self, _player: PlayerId, count: usize) -> usize {
        let dealt = count.min(self.deck_size);
        self.deck_size -= dealt;
        dealt
    }
}
