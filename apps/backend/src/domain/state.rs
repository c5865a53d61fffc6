//! Game aggregate root: phase machine, seats, turn math, pause and undo
//! bookkeeping. All mutation goes through the methods here or the command
//! handlers; the room actor never touches fields directly.

use rand::Rng;
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};
use uuid::Uuid;

use super::cards_logic::legal_plays;
use super::cards_types::{Card, Suit};
use super::deck::Deck;
use super::errors::{AuthorityKind, GameError, ProtocolKind, ValidationKind};
use super::player::{PlayerId, PlayerRecord, RoundEntry};
use super::rules;
use super::trick::Trick;
use super::undo::{UndoRequest, UndoResolution};

pub type GameId = Uuid;

/// Overall game progression phases.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Players join, leave, and bots are managed.
    Lobby,
    /// Transient: cards are being dealt for the next round.
    Dealing,
    /// The turned-up trump card was a Wizard; the dealer must pick a suit.
    TrumpSelection,
    /// Players place bids in seat order starting left of the dealer.
    Bidding,
    /// Tricks are played.
    Playing,
    /// Round scored; awaiting the host to advance.
    RoundEnd,
    /// All rounds complete.
    GameEnd,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    Public,
    Private,
}

/// Room-level settings chosen at creation. Serialized only into room-state
/// handoffs; client-facing views go through `SettingsPublic`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomSettings {
    pub name: String,
    pub visibility: Visibility,
    pub max_players: usize,
    pub password: Option<String>,
}

impl Default for RoomSettings {
    fn default() -> Self {
        Self {
            name: "Game room".into(),
            visibility: Visibility::Public,
            max_players: rules::MAX_PLAYERS,
            password: None,
        }
    }
}

/// Present only while the game is paused awaiting one player's return.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PauseState {
    pub player: PlayerId,
    pub at: OffsetDateTime,
    pub timeout: Duration,
}

/// Outcome of a single card play, reporting every cascaded transition so the
/// caller can emit events without re-deriving them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayOutcome {
    pub trick_completed: bool,
    pub trick_winner: Option<PlayerId>,
    pub round_completed: bool,
    pub game_completed: bool,
    /// Who acts next, when the round is still in play.
    pub next_player: Option<PlayerId>,
}

/// The aggregate root. One per room, exclusively owned by it. The serialized
/// form is the room-state handoff of `room::handoff`; it contains every hand
/// and must never be sent to a client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Game {
    pub id: GameId,
    pub phase: Phase,
    /// Seat order is join order and never changes mid-game.
    pub players: Vec<PlayerRecord>,
    /// 1-based once the game has started.
    pub round_no: u8,
    pub max_rounds: u8,
    pub trump_suit: Option<Suit>,
    /// The turned-up card that determined trump, if any was drawn.
    pub trump_card: Option<Card>,
    pub current_idx: usize,
    pub dealer_idx: usize,
    pub trick: Trick,
    /// Completed tricks of the current round, in play order.
    pub trick_history: Vec<Trick>,
    /// First joiner; reassigned if the host leaves in the lobby.
    pub host: Option<PlayerId>,
    pub settings: RoomSettings,
    pub pause: Option<PauseState>,
    pub undo: Option<UndoRequest>,
    /// Monotonic counter feeding generated bot names.
    pub bot_counter: u32,
    deck: Deck,
}

impl Game {
    pub fn new(id: GameId, settings: RoomSettings) -> Self {
        Self {
            id,
            phase: Phase::Lobby,
            players: Vec::new(),
            round_no: 0,
            max_rounds: 0,
            trump_suit: None,
            trump_card: None,
            current_idx: 0,
            dealer_idx: 0,
            trick: Trick::new(),
            trick_history: Vec::new(),
            host: None,
            settings,
            pause: None,
            undo: None,
            bot_counter: 0,
            deck: Deck::new(),
        }
    }

    // --- Seat lookups -----------------------------------------------------

    pub fn seat_of(&self, player: PlayerId) -> Option<usize> {
        self.players.iter().position(|p| p.id == player)
    }

    pub fn player(&self, player: PlayerId) -> Option<&PlayerRecord> {
        self.players.iter().find(|p| p.id == player)
    }

    pub fn player_mut(&mut self, player: PlayerId) -> Option<&mut PlayerRecord> {
        self.players.iter_mut().find(|p| p.id == player)
    }

    fn require_seat(&self, player: PlayerId) -> Result<usize, GameError> {
        self.seat_of(player).ok_or_else(|| {
            GameError::validation(ValidationKind::UnknownPlayer, format!("no seat for {player}"))
        })
    }

    pub fn is_host(&self, player: PlayerId) -> bool {
        self.host == Some(player)
    }

    fn require_host(&self, player: PlayerId) -> Result<(), GameError> {
        if self.is_host(player) {
            Ok(())
        } else {
            Err(GameError::Authority(AuthorityKind::NotHost))
        }
    }

    pub fn current_player(&self) -> Option<&PlayerRecord> {
        self.players.get(self.current_idx)
    }

    pub fn dealer(&self) -> Option<&PlayerRecord> {
        self.players.get(self.dealer_idx)
    }

    fn next_seat(&self, seat: usize) -> usize {
        (seat + 1) % self.players.len()
    }

    fn left_of_dealer(&self) -> usize {
        self.next_seat(self.dealer_idx)
    }

    /// Phases where a disconnect pauses the game instead of removing the
    /// player.
    pub fn is_active(&self) -> bool {
        !matches!(self.phase, Phase::Lobby | Phase::GameEnd)
    }

    pub fn is_paused(&self) -> bool {
        self.pause.is_some()
    }

    // --- Lobby ------------------------------------------------------------

    /// Seat a new player (or bot). The first joiner becomes host.
    pub fn add_player(&mut self, record: PlayerRecord) -> Result<usize, GameError> {
        if self.phase != Phase::Lobby {
            return Err(GameError::Phase("join"));
        }
        let cap = self.settings.max_players.min(rules::MAX_PLAYERS);
        if self.players.len() >= cap {
            return Err(GameError::Capacity);
        }
        if self.host.is_none() && !record.is_bot {
            self.host = Some(record.id);
        }
        self.players.push(record);
        Ok(self.players.len() - 1)
    }

    /// Remove a player outright. Lobby-only; afterwards departures only mark
    /// the seat disconnected.
    pub fn remove_player(&mut self, player: PlayerId) -> Result<PlayerRecord, GameError> {
        if self.phase != Phase::Lobby {
            return Err(GameError::Phase("leave"));
        }
        let seat = self.require_seat(player)?;
        let removed = self.players.remove(seat);
        if self.host == Some(player) {
            self.host = self.players.iter().find(|p| !p.is_bot).map(|p| p.id);
        }
        Ok(removed)
    }

    /// Generate the next bot name from the monotonic counter.
    pub fn next_bot_name(&mut self) -> String {
        self.bot_counter += 1;
        format!("Bot {}", self.bot_counter)
    }

    // --- Round lifecycle --------------------------------------------------

    /// Start the game. Host-only, lobby-only, 3 to 6 players.
    pub fn start(&mut self, actor: PlayerId) -> Result<(), GameError> {
        self.require_host(actor)?;
        if self.phase != Phase::Lobby {
            return Err(GameError::Phase("start"));
        }
        let count = self.players.len();
        if !(rules::MIN_PLAYERS..=rules::MAX_PLAYERS).contains(&count) {
            return Err(GameError::validation(
                ValidationKind::InvalidPlayerCount,
                format!("need 3-6 players, have {count}"),
            ));
        }
        self.max_rounds = rules::max_rounds(count);
        self.round_no = 0;
        self.dealer_idx = 0;
        self.phase = Phase::Dealing;
        Ok(())
    }

    /// Deal the next round: fresh shuffled deck, `round_no` cards per seat,
    /// trump card turned up. Ends in TrumpSelection or Bidding.
    pub fn deal_round(&mut self, rng: &mut impl Rng) -> Result<(), GameError> {
        if self.phase != Phase::Dealing {
            return Err(GameError::Phase("deal"));
        }
        self.round_no += 1;
        self.deck = Deck::shuffled(rng);
        self.trick = Trick::new();
        self.trick_history.clear();
        let hand_size = self.round_no as usize;
        for player in &mut self.players {
            player.reset_for_round();
            player.hand = self.deck.deal(hand_size);
            player.hand.sort();
        }

        // On the final round the deck is exhausted: no trump card, no trump.
        self.trump_card = self.deck.draw();
        match self.trump_card {
            Some(card) if card.is_wizard() => {
                self.trump_suit = None;
                self.phase = Phase::TrumpSelection;
                self.current_idx = self.dealer_idx;
            }
            Some(card) => {
                self.trump_suit = card.suit();
                self.phase = Phase::Bidding;
                self.current_idx = self.left_of_dealer();
            }
            None => {
                self.trump_suit = None;
                self.phase = Phase::Bidding;
                self.current_idx = self.left_of_dealer();
            }
        }
        Ok(())
    }

    /// Dealer picks trump after a Wizard was turned up.
    pub fn select_trump(&mut self, actor: PlayerId, suit: Suit) -> Result<(), GameError> {
        if self.phase != Phase::TrumpSelection {
            return Err(GameError::Phase("select_trump"));
        }
        let seat = self.require_seat(actor)?;
        if seat != self.dealer_idx {
            return Err(GameError::Authority(AuthorityKind::NotDealer));
        }
        self.trump_suit = Some(suit);
        self.phase = Phase::Bidding;
        self.current_idx = self.left_of_dealer();
        Ok(())
    }

    /// Advance to the next round. Host-only, after a round has been scored.
    pub fn advance_round(&mut self, actor: PlayerId) -> Result<(), GameError> {
        self.require_host(actor)?;
        if self.phase != Phase::RoundEnd {
            return Err(GameError::Phase("advance_round"));
        }
        self.dealer_idx = self.next_seat(self.dealer_idx);
        self.phase = Phase::Dealing;
        Ok(())
    }

    /// Reset in place for a rematch: identities, names, bot flags, and host
    /// survive; every per-game mutable field clears.
    pub fn rematch_reset(&mut self) {
        for player in &mut self.players {
            player.reset_for_rematch();
        }
        self.phase = Phase::Lobby;
        self.round_no = 0;
        self.max_rounds = 0;
        self.trump_suit = None;
        self.trump_card = None;
        self.current_idx = 0;
        self.dealer_idx = 0;
        self.trick = Trick::new();
        self.trick_history.clear();
        self.pause = None;
        self.undo = None;
        self.deck = Deck::new();
    }

    // --- Bidding ----------------------------------------------------------

    fn bids_placed(&self) -> usize {
        self.players.iter().filter(|p| p.bid.is_some()).count()
    }

    /// Legal bids for a player right now; empty when it is not their turn.
    pub fn legal_bids_for(&self, player: PlayerId) -> Vec<u8> {
        if self.phase != Phase::Bidding {
            return Vec::new();
        }
        let Some(seat) = self.seat_of(player) else {
            return Vec::new();
        };
        if seat != self.current_idx {
            return Vec::new();
        }
        let mut legal: Vec<u8> = rules::valid_bid_range(self.round_no).collect();
        if self.bids_placed() == self.players.len() - 1 {
            let sum: u8 = self.players.iter().filter_map(|p| p.bid).sum();
            if let Some(forbidden) = rules::forbidden_bid(self.round_no, sum) {
                legal.retain(|&b| b != forbidden);
            }
        }
        legal
    }

    /// Place a bid. Returns true when this was the final bid and play began.
    pub fn place_bid(&mut self, actor: PlayerId, bid: u8) -> Result<bool, GameError> {
        if self.phase != Phase::Bidding {
            return Err(GameError::Phase("place_bid"));
        }
        let seat = self.require_seat(actor)?;
        if seat != self.current_idx {
            return Err(GameError::Authority(AuthorityKind::OutOfTurn));
        }
        if !rules::valid_bid_range(self.round_no).contains(&bid) {
            return Err(GameError::validation(
                ValidationKind::InvalidBid,
                format!("bid {bid} outside 0..={}", self.round_no),
            ));
        }
        let last_bidder = self.bids_placed() == self.players.len() - 1;
        if last_bidder {
            let sum: u8 = self.players.iter().filter_map(|p| p.bid).sum();
            if rules::forbidden_bid(self.round_no, sum) == Some(bid) {
                return Err(GameError::validation(
                    ValidationKind::ForbiddenBid,
                    format!("bid {bid} would make total bids equal {}", self.round_no),
                ));
            }
        }

        self.players[seat].bid = Some(bid);
        if last_bidder {
            self.phase = Phase::Playing;
            self.current_idx = self.left_of_dealer();
            self.trick = Trick::new();
            Ok(true)
        } else {
            self.current_idx = self.next_seat(seat);
            Ok(false)
        }
    }

    // --- Trick play -------------------------------------------------------

    /// Legal cards for a player right now; empty when it is not their turn.
    pub fn legal_plays_for(&self, player: PlayerId) -> Vec<Card> {
        if self.phase != Phase::Playing {
            return Vec::new();
        }
        let Some(seat) = self.seat_of(player) else {
            return Vec::new();
        };
        if seat != self.current_idx {
            return Vec::new();
        }
        legal_plays(&self.players[seat].hand, self.trick.lead)
    }

    /// Play a card, cascading through trick, round, and game completion.
    pub fn play_card(&mut self, actor: PlayerId, card: Card) -> Result<PlayOutcome, GameError> {
        if self.phase != Phase::Playing {
            return Err(GameError::Phase("play_card"));
        }
        if self.undo.is_some() {
            return Err(GameError::Protocol(ProtocolKind::UndoPending));
        }
        let seat = self.require_seat(actor)?;
        if seat != self.current_idx {
            return Err(GameError::Authority(AuthorityKind::OutOfTurn));
        }
        if !self.players[seat].has_card(&card) {
            return Err(GameError::validation(
                ValidationKind::CardNotInHand,
                format!("{card} is not in hand"),
            ));
        }
        if !legal_plays(&self.players[seat].hand, self.trick.lead).contains(&card) {
            return Err(GameError::validation(
                ValidationKind::IllegalCard,
                format!("{card} does not follow the lead suit"),
            ));
        }

        // Validation done; mutate.
        let card = self.players[seat]
            .take_card(&card)
            .ok_or_else(|| GameError::internal("validated card vanished from hand"))?;
        self.trick.push(actor, card);
        self.current_idx = self.next_seat(seat);

        let mut outcome = PlayOutcome {
            trick_completed: false,
            trick_winner: None,
            round_completed: false,
            game_completed: false,
            next_player: None,
        };

        if self.trick.is_complete(self.players.len()) {
            let winner = self.trick.resolve(self.trump_suit)?;
            let winner_seat = self.require_seat(winner)?;
            self.players[winner_seat].tricks_won += 1;
            self.trick_history.push(std::mem::take(&mut self.trick));
            self.current_idx = winner_seat;
            outcome.trick_completed = true;
            outcome.trick_winner = Some(winner);

            if self.players.iter().all(|p| p.hand.is_empty()) {
                self.apply_round_scoring();
                outcome.round_completed = true;
                if self.round_no >= self.max_rounds {
                    self.phase = Phase::GameEnd;
                    outcome.game_completed = true;
                } else {
                    self.phase = Phase::RoundEnd;
                }
                return Ok(outcome);
            }
        }

        outcome.next_player = self.current_player().map(|p| p.id);
        Ok(outcome)
    }

    /// Round-end scoring: exact bid earns 20 plus 10 per trick, a miss costs
    /// 10 per trick of error. One history entry per player, every round.
    fn apply_round_scoring(&mut self) {
        for player in &mut self.players {
            let bid = player.bid.unwrap_or(0);
            let delta = rules::round_score(bid, player.tricks_won);
            player.score += delta;
            player.rounds.push(RoundEntry {
                round_no: self.round_no,
                bid,
                tricks_won: player.tricks_won,
                delta,
            });
        }
    }

    // --- Pause ------------------------------------------------------------

    pub fn pause_for(&mut self, player: PlayerId, timeout: Duration) {
        self.pause = Some(PauseState {
            player,
            at: OffsetDateTime::now_utc(),
            timeout,
        });
    }

    pub fn resume(&mut self) -> Option<PauseState> {
        self.pause.take()
    }

    /// Convert an absent player into a bot in place, returning the new name.
    pub fn substitute_bot(&mut self, player: PlayerId) -> Result<String, GameError> {
        let seat = self.require_seat(player)?;
        let name = self.next_bot_name();
        let record = &mut self.players[seat];
        record.name = name.clone();
        record.is_bot = true;
        record.connected = true;
        Ok(name)
    }

    // --- Undo -------------------------------------------------------------

    fn connected_humans_other_than(&self, player: PlayerId) -> usize {
        self.players
            .iter()
            .filter(|p| p.connected && !p.is_bot && p.id != player)
            .count()
    }

    /// Open an undo request for the requester's immediately-preceding play.
    pub fn begin_undo(&mut self, requester: PlayerId) -> Result<(), GameError> {
        if self.phase != Phase::Playing {
            return Err(GameError::Phase("request_undo"));
        }
        if self.undo.is_some() {
            return Err(GameError::Protocol(ProtocolKind::UndoPending));
        }
        let seat = self.require_seat(requester)?;
        let Some(&(last_player, card)) = self.trick.last_play() else {
            return Err(GameError::Protocol(ProtocolKind::NotYourPlay));
        };
        if last_player != requester {
            return Err(GameError::Protocol(ProtocolKind::NotYourPlay));
        }

        let required = self.connected_humans_other_than(requester).max(1);
        self.undo = Some(UndoRequest {
            requester,
            requester_name: self.players[seat].name.clone(),
            card,
            card_label: card.to_string(),
            previous_idx: seat,
            requested_at: OffsetDateTime::now_utc(),
            responses: std::collections::HashMap::new(),
            required,
        });
        Ok(())
    }

    /// Record one responder's vote. Callers enforce human eligibility; this
    /// guards identity, duplication, and self-response.
    pub fn record_undo_response(
        &mut self,
        responder: PlayerId,
        approve: bool,
    ) -> Result<(), GameError> {
        self.require_seat(responder)?;
        let Some(undo) = self.undo.as_mut() else {
            return Err(GameError::Protocol(ProtocolKind::NoActiveUndo));
        };
        if undo.requester == responder {
            return Err(GameError::Protocol(ProtocolKind::SelfResponse));
        }
        if undo.has_responded(responder) {
            return Err(GameError::Protocol(ProtocolKind::DuplicateResponse));
        }
        undo.responses.insert(responder, approve);
        Ok(())
    }

    /// Eligible humans who have not yet voted on the pending request.
    pub fn undo_unresponded_humans(&self) -> usize {
        let Some(undo) = self.undo.as_ref() else {
            return 0;
        };
        self.players
            .iter()
            .filter(|p| {
                p.connected && !p.is_bot && p.id != undo.requester && !undo.has_responded(p.id)
            })
            .count()
    }

    /// Whether the pending request has resolved either way.
    pub fn undo_resolution(&self) -> Option<UndoResolution> {
        let undo = self.undo.as_ref()?;
        undo.resolution(self.undo_unresponded_humans())
    }

    /// Apply the approved undo: the card returns to the requester's hand, the
    /// play pops off the trick, and the turn pointer restores.
    pub fn apply_undo(&mut self) -> Result<(PlayerId, Card), GameError> {
        let undo = self
            .undo
            .take()
            .ok_or(GameError::Protocol(ProtocolKind::NoActiveUndo))?;
        let (who, card) = self
            .trick
            .retract_last()
            .ok_or_else(|| GameError::internal("undo approved against an empty trick"))?;
        if who != undo.requester {
            return Err(GameError::internal("undo play does not match requester"));
        }
        let seat = self.require_seat(who)?;
        self.players[seat].hand.push(card);
        self.players[seat].hand.sort();
        self.current_idx = undo.previous_idx;
        Ok((who, card))
    }

    /// Drop the pending request without applying it.
    pub fn cancel_undo(&mut self) -> Option<UndoRequest> {
        self.undo.take()
    }
}
