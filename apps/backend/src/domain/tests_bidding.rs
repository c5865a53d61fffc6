use super::errors::{AuthorityKind, GameError, ValidationKind};
use super::state::Phase;
use super::test_state_helpers::{lobby_game, seeded_rng};

/// Drive a fresh 4-player game into Bidding, selecting Hearts if the turned
/// up card was a Wizard.
fn bidding_game(seed: u64) -> (super::state::Game, Vec<super::player::PlayerId>) {
    let (mut game, ids) = lobby_game(4);
    game.start(ids[0]).unwrap();
    game.deal_round(&mut seeded_rng(seed)).unwrap();
    if game.phase == Phase::TrumpSelection {
        let dealer = game.dealer().unwrap().id;
        game.select_trump(dealer, super::cards_types::Suit::Hearts).unwrap();
    }
    (game, ids)
}

#[test]
fn bidding_starts_left_of_dealer_and_rotates() {
    let (mut game, ids) = bidding_game(1);
    assert_eq!(game.phase, Phase::Bidding);
    assert_eq!(game.dealer_idx, 0);
    assert_eq!(game.current_idx, 1);

    assert!(game.place_bid(ids[1], 0).is_ok());
    assert_eq!(game.current_idx, 2);
    assert!(game.place_bid(ids[2], 1).is_ok());
    assert_eq!(game.current_idx, 3);
}

#[test]
fn out_of_turn_bid_is_rejected_without_mutation() {
    let (mut game, ids) = bidding_game(2);
    let err = game.place_bid(ids[2], 0).unwrap_err();
    assert_eq!(err, GameError::Authority(AuthorityKind::OutOfTurn));
    assert!(game.players.iter().all(|p| p.bid.is_none()));
    assert_eq!(game.current_idx, 1);
}

#[test]
fn bid_outside_round_range_is_rejected() {
    let (mut game, ids) = bidding_game(3);
    // Round 1: valid bids are 0 and 1.
    let err = game.place_bid(ids[1], 2).unwrap_err();
    assert!(matches!(
        err,
        GameError::Validation(ValidationKind::InvalidBid, _)
    ));
    assert!(game.players[1].bid.is_none());
}

#[test]
fn last_bidder_cannot_make_bids_sum_to_round_number() {
    let (mut game, ids) = bidding_game(4);
    // Round 1, four players: first three bid 0, 0, 1 so the sum is 1.
    assert!(game.place_bid(ids[1], 0).is_ok());
    assert!(game.place_bid(ids[2], 0).is_ok());
    assert!(game.place_bid(ids[3], 1).is_ok());

    // Dealer bids last; 1 - 1 = 0 is forbidden.
    let err = game.place_bid(ids[0], 0).unwrap_err();
    assert!(matches!(
        err,
        GameError::Validation(ValidationKind::ForbiddenBid, _)
    ));
    assert!(game.players[0].bid.is_none());
    assert_eq!(game.phase, Phase::Bidding);

    // Any other in-range value succeeds and starts play.
    assert!(game.place_bid(ids[0], 1).is_ok());
    assert_eq!(game.phase, Phase::Playing);
}

#[test]
fn forbidden_bid_skipped_when_out_of_range() {
    let (mut game, ids) = bidding_game(5);
    // Sum of first three bids exceeds the round number: nothing is forbidden.
    assert!(game.place_bid(ids[1], 1).is_ok());
    assert!(game.place_bid(ids[2], 1).is_ok());
    assert!(game.place_bid(ids[3], 0).is_ok());
    assert!(game.place_bid(ids[0], 0).is_ok());
    assert_eq!(game.phase, Phase::Playing);
}

#[test]
fn final_bid_starts_play_led_by_left_of_dealer() {
    let (mut game, ids) = bidding_game(6);
    assert!(game.place_bid(ids[1], 1).is_ok());
    assert!(game.place_bid(ids[2], 1).is_ok());
    assert!(game.place_bid(ids[3], 1).is_ok());
    assert!(game.place_bid(ids[0], 1).is_ok());

    assert_eq!(game.phase, Phase::Playing);
    assert_eq!(game.current_idx, 1);
    assert!(game.trick.is_empty());
}

#[test]
fn legal_bids_exclude_the_forbidden_value_for_the_last_bidder() {
    let (mut game, ids) = bidding_game(7);
    assert!(game.place_bid(ids[1], 0).is_ok());
    assert!(game.place_bid(ids[2], 0).is_ok());
    assert!(game.place_bid(ids[3], 0).is_ok());

    // Dealer is last; 1 - 0 = 1 is forbidden, leaving only 0.
    assert_eq!(game.legal_bids_for(ids[0]), vec![0]);
    // Not their turn: empty.
    assert!(game.legal_bids_for(ids[2]).is_empty());
}

#[test]
fn trump_selection_is_dealer_only() {
    use super::cards_types::Suit;

    let (mut game, ids) = lobby_game(4);
    game.start(ids[0]).unwrap();
    // Force the selection phase regardless of the drawn card.
    game.phase = Phase::TrumpSelection;
    game.current_idx = game.dealer_idx;
    game.round_no = 1;

    let non_dealer = ids[2];
    let err = game.select_trump(non_dealer, Suit::Clubs).unwrap_err();
    assert_eq!(err, GameError::Authority(AuthorityKind::NotDealer));
    assert_eq!(game.trump_suit, None);

    let dealer = game.dealer().unwrap().id;
    assert!(game.select_trump(dealer, Suit::Clubs).is_ok());
    assert_eq!(game.trump_suit, Some(Suit::Clubs));
    assert_eq!(game.phase, Phase::Bidding);
    assert_eq!(game.current_idx, 1);
}

#[test]
fn start_requires_host_and_three_players() {
    let (mut game, ids) = lobby_game(2);
    let err = game.start(ids[1]).unwrap_err();
    assert_eq!(err, GameError::Authority(AuthorityKind::NotHost));

    let err = game.start(ids[0]).unwrap_err();
    assert!(matches!(
        err,
        GameError::Validation(ValidationKind::InvalidPlayerCount, _)
    ));
    assert_eq!(game.phase, Phase::Lobby);
}
