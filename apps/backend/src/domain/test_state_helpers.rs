//! Test-only constructors for games in specific phases.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use uuid::Uuid;

use super::cards_types::Card;
use super::player::{PlayerId, PlayerRecord};
use super::rules;
use super::state::{Game, Phase, RoomSettings};

pub fn seeded_rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Lobby game with `n` connected human players; the first is host.
pub fn lobby_game(n: usize) -> (Game, Vec<PlayerId>) {
    let mut game = Game::new(Uuid::new_v4(), RoomSettings::default());
    let mut ids = Vec::with_capacity(n);
    for i in 0..n {
        let id = Uuid::new_v4();
        game.add_player(PlayerRecord::human(id, format!("p{i}"))).unwrap();
        ids.push(id);
    }
    (game, ids)
}

/// Game forced directly into Playing with the given hands; bids default to
/// zero, dealer is seat 0, seat 1 leads.
pub fn playing_game(hands: Vec<Vec<Card>>) -> (Game, Vec<PlayerId>) {
    let round_no = hands[0].len() as u8;
    let (mut game, ids) = lobby_game(hands.len());
    game.max_rounds = rules::max_rounds(hands.len());
    game.round_no = round_no;
    game.dealer_idx = 0;
    game.current_idx = 1;
    game.phase = Phase::Playing;
    for (player, hand) in game.players.iter_mut().zip(hands) {
        player.hand = hand;
        player.bid = Some(0);
    }
    (game, ids)
}
