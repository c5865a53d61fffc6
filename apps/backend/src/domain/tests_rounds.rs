use super::cards_types::{Card, Suit};
use super::errors::{AuthorityKind, GameError};
use super::player::PlayerRecord;
use super::state::Phase;
use super::test_state_helpers::{lobby_game, playing_game, seeded_rng};
use uuid::Uuid;

fn s(suit: Suit, value: u8) -> Card {
    Card::suited(suit, value)
}

#[test]
fn dealing_gives_round_number_cards_and_a_trump_card() {
    let (mut game, ids) = lobby_game(4);
    game.start(ids[0]).unwrap();
    game.deal_round(&mut seeded_rng(11)).unwrap();

    assert_eq!(game.round_no, 1);
    assert_eq!(game.max_rounds, 15);
    assert!(game.players.iter().all(|p| p.hand.len() == 1));
    assert!(game.trump_card.is_some());
    match game.trump_card.unwrap() {
        Card::Wizard(_) => {
            assert_eq!(game.phase, Phase::TrumpSelection);
            assert_eq!(game.current_idx, game.dealer_idx);
        }
        Card::Suited { suit, .. } => {
            assert_eq!(game.phase, Phase::Bidding);
            assert_eq!(game.trump_suit, Some(suit));
        }
        Card::Jester(_) => {
            assert_eq!(game.phase, Phase::Bidding);
            assert_eq!(game.trump_suit, None);
        }
    }
}

#[test]
fn final_round_deals_the_whole_deck_and_no_trump_card() {
    let (mut game, ids) = lobby_game(4);
    game.start(ids[0]).unwrap();
    // Jump to the last round: 15 cards each for 4 players.
    game.round_no = 14;
    game.deal_round(&mut seeded_rng(12)).unwrap();

    assert_eq!(game.round_no, 15);
    assert!(game.players.iter().all(|p| p.hand.len() == 15));
    assert_eq!(game.trump_card, None);
    assert_eq!(game.trump_suit, None);
    assert_eq!(game.phase, Phase::Bidding);
}

#[test]
fn advance_round_rotates_the_dealer_one_seat() {
    let (mut game, ids) = playing_game(vec![
        vec![s(Suit::Hearts, 5)],
        vec![s(Suit::Hearts, 9)],
        vec![s(Suit::Hearts, 2)],
    ]);
    game.max_rounds = 20;
    game.play_card(ids[1], s(Suit::Hearts, 9)).unwrap();
    game.play_card(ids[2], s(Suit::Hearts, 2)).unwrap();
    game.play_card(ids[0], s(Suit::Hearts, 5)).unwrap();
    assert_eq!(game.phase, Phase::RoundEnd);

    // Only the host may advance.
    let err = game.advance_round(ids[2]).unwrap_err();
    assert_eq!(err, GameError::Authority(AuthorityKind::NotHost));

    let dealer_before = game.dealer_idx;
    game.advance_round(ids[0]).unwrap();
    assert_eq!(game.dealer_idx, (dealer_before + 1) % 3);
    assert_eq!(game.phase, Phase::Dealing);

    game.deal_round(&mut seeded_rng(13)).unwrap();
    assert_eq!(game.round_no, 2);
    assert!(game.players.iter().all(|p| p.hand.len() == 2));
    assert!(game.trick_history.is_empty());
}

#[test]
fn round_history_accumulates_one_entry_per_round() {
    let (mut game, ids) = playing_game(vec![
        vec![s(Suit::Hearts, 5)],
        vec![s(Suit::Hearts, 9)],
        vec![s(Suit::Hearts, 2)],
    ]);
    game.max_rounds = 20;
    game.play_card(ids[1], s(Suit::Hearts, 9)).unwrap();
    game.play_card(ids[2], s(Suit::Hearts, 2)).unwrap();
    game.play_card(ids[0], s(Suit::Hearts, 5)).unwrap();

    for (seat, player) in game.players.iter().enumerate() {
        assert_eq!(player.rounds.len(), 1, "seat {seat}");
        let entry = player.rounds[0];
        assert_eq!(entry.round_no, 1);
        assert_eq!(entry.bid, 0);
    }
}

#[test]
fn rematch_keeps_identities_and_clears_progress() {
    let (mut game, ids) = playing_game(vec![
        vec![s(Suit::Hearts, 5)],
        vec![s(Suit::Hearts, 9)],
        vec![s(Suit::Hearts, 2)],
    ]);
    game.max_rounds = 20;
    game.play_card(ids[1], s(Suit::Hearts, 9)).unwrap();
    game.play_card(ids[2], s(Suit::Hearts, 2)).unwrap();
    game.play_card(ids[0], s(Suit::Hearts, 5)).unwrap();

    let host = game.host;
    game.rematch_reset();

    assert_eq!(game.phase, Phase::Lobby);
    assert_eq!(game.host, host);
    assert_eq!(game.round_no, 0);
    assert_eq!(game.players.len(), 3);
    for (player, id) in game.players.iter().zip(&ids) {
        assert_eq!(player.id, *id);
        assert_eq!(player.score, 0);
        assert!(player.rounds.is_empty());
        assert!(player.hand.is_empty());
        assert!(player.bid.is_none());
    }
}

#[test]
fn lobby_departure_reassigns_the_host() {
    let (mut game, ids) = lobby_game(4);
    assert_eq!(game.host, Some(ids[0]));
    game.remove_player(ids[0]).unwrap();
    assert_eq!(game.host, Some(ids[1]));
    assert_eq!(game.players.len(), 3);
}

#[test]
fn bots_never_become_host() {
    let (mut game, ids) = lobby_game(3);
    let bot_name = game.next_bot_name();
    game.add_player(PlayerRecord::bot(Uuid::new_v4(), bot_name)).unwrap();

    game.remove_player(ids[0]).unwrap();
    game.remove_player(ids[1]).unwrap();
    game.remove_player(ids[2]).unwrap();
    assert_eq!(game.host, None);
}

#[test]
fn bot_substitution_renames_and_reconnects_the_seat() {
    let (mut game, ids) = playing_game(vec![
        vec![s(Suit::Hearts, 5)],
        vec![s(Suit::Hearts, 9)],
        vec![s(Suit::Hearts, 2)],
    ]);
    game.player_mut(ids[1]).unwrap().connected = false;

    let name = game.substitute_bot(ids[1]).unwrap();
    let seat = game.player(ids[1]).unwrap();
    assert_eq!(seat.name, name);
    assert!(seat.is_bot);
    assert!(seat.connected);
    // Hand survives the substitution.
    assert_eq!(seat.hand.len(), 1);
}

#[test]
fn bot_names_come_from_a_monotonic_counter() {
    let (mut game, _ids) = lobby_game(3);
    assert_eq!(game.next_bot_name(), "Bot 1");
    assert_eq!(game.next_bot_name(), "Bot 2");
    assert_eq!(game.next_bot_name(), "Bot 3");
}
