//! Shared helpers for integration tests.
#![allow(dead_code)] // not every test binary uses every helper

use backend::domain::{Card, Game, Phase, PlayerId, RoomSettings, Suit};
use backend::services::game_flow::{GameEvent, GameFlow};
use uuid::Uuid;

/// A room-less table: a game plus a flow, driven exactly the way the room
/// actor drives them.
pub struct Table {
    pub game: Game,
    pub flow: GameFlow,
    pub ids: Vec<PlayerId>,
}

impl Table {
    /// Join `n` human players into a fresh lobby.
    pub fn with_players(n: usize) -> Self {
        let mut game = Game::new(Uuid::new_v4(), RoomSettings::default());
        let mut flow = GameFlow::with_seed(0xC0FFEE);
        let mut ids = Vec::with_capacity(n);
        for i in 0..n {
            let (id, _) = flow
                .join_new(&mut game, &format!("player-{i}"), None)
                .expect("join");
            ids.push(id);
        }
        Self { game, flow, ids }
    }

    pub fn host(&self) -> PlayerId {
        self.ids[0]
    }

    /// Current actor according to the machine.
    pub fn current(&self) -> PlayerId {
        self.game.current_player().expect("current player").id
    }

    /// Start the game and, if a Wizard was turned up, have the dealer choose
    /// Hearts so the table always lands in Bidding.
    pub fn start_into_bidding(&mut self) -> Vec<GameEvent> {
        let mut events = self
            .flow
            .start_game(&mut self.game, self.host())
            .expect("start game");
        if self.game.phase == Phase::TrumpSelection {
            let dealer = self.game.dealer().expect("dealer").id;
            events.extend(
                self.flow
                    .select_trump(&mut self.game, dealer, Suit::Hearts)
                    .expect("trump selection"),
            );
        }
        events
    }

    /// Bid for everyone in turn order, picking the first legal value.
    pub fn bid_all_legal(&mut self) {
        while self.game.phase == Phase::Bidding {
            let actor = self.current();
            let legal = self.game.legal_bids_for(actor);
            let bid = legal.first().copied().expect("legal bid available");
            self.flow
                .place_bid(&mut self.game, actor, bid)
                .expect("legal bid accepted");
        }
    }

    /// Play the first legal card for the current actor.
    pub fn play_first_legal(&mut self) -> Vec<GameEvent> {
        let actor = self.current();
        let card = self
            .game
            .legal_plays_for(actor)
            .first()
            .copied()
            .expect("legal play available");
        self.flow
            .play_card(&mut self.game, actor, card)
            .expect("legal play accepted")
    }
}

/// Force a table directly into Playing with the given hands: dealer seat 0,
/// seat 1 to lead, every bid zero unless changed afterwards.
pub fn playing_table(hands: Vec<Vec<Card>>) -> Table {
    let mut table = Table::with_players(hands.len());
    table.game.max_rounds = 20;
    table.game.round_no = hands[0].len() as u8;
    table.game.dealer_idx = 0;
    table.game.current_idx = 1;
    table.game.phase = Phase::Playing;
    for (player, hand) in table.game.players.iter_mut().zip(hands) {
        player.hand = hand;
        player.bid = Some(0);
    }
    table
}

pub fn has_event(events: &[GameEvent], pred: impl Fn(&GameEvent) -> bool) -> bool {
    events.iter().any(pred)
}
