use super::cards_types::{Card, Suit};
use super::errors::{GameError, ProtocolKind};
use super::test_state_helpers::playing_game;
use super::undo::UndoResolution;

fn s(suit: Suit, value: u8) -> Card {
    Card::suited(suit, value)
}

/// Four seats in Playing; seat 1 has led a heart.
fn game_after_one_play() -> (super::state::Game, Vec<super::player::PlayerId>) {
    let (mut game, ids) = playing_game(vec![
        vec![s(Suit::Hearts, 5), s(Suit::Clubs, 2)],
        vec![s(Suit::Hearts, 9), s(Suit::Clubs, 3)],
        vec![s(Suit::Hearts, 2), s(Suit::Clubs, 4)],
        vec![s(Suit::Hearts, 7), s(Suit::Clubs, 6)],
    ]);
    game.play_card(ids[1], s(Suit::Hearts, 9)).unwrap();
    (game, ids)
}

#[test]
fn only_the_last_player_to_play_may_request() {
    let (mut game, ids) = game_after_one_play();
    let err = game.begin_undo(ids[2]).unwrap_err();
    assert_eq!(err, GameError::Protocol(ProtocolKind::NotYourPlay));

    assert!(game.begin_undo(ids[1]).is_ok());
}

#[test]
fn request_records_card_turn_pointer_and_threshold() {
    let (mut game, ids) = game_after_one_play();
    game.begin_undo(ids[1]).unwrap();

    let undo = game.undo.as_ref().unwrap();
    assert_eq!(undo.requester, ids[1]);
    assert_eq!(undo.card, s(Suit::Hearts, 9));
    assert_eq!(undo.card_label, "9 of Hearts");
    assert_eq!(undo.previous_idx, 1);
    // Three other connected humans.
    assert_eq!(undo.required, 3);
}

#[test]
fn threshold_never_drops_below_one() {
    let (mut game, ids) = game_after_one_play();
    // Everyone else is a bot.
    for id in [ids[0], ids[2], ids[3]] {
        game.player_mut(id).unwrap().is_bot = true;
    }
    game.begin_undo(ids[1]).unwrap();
    assert_eq!(game.undo.as_ref().unwrap().required, 1);
}

#[test]
fn disconnected_humans_do_not_count_toward_the_threshold() {
    let (mut game, ids) = game_after_one_play();
    game.player_mut(ids[3]).unwrap().connected = false;
    game.begin_undo(ids[1]).unwrap();
    assert_eq!(game.undo.as_ref().unwrap().required, 2);
}

#[test]
fn a_second_request_is_rejected_while_one_is_pending() {
    let (mut game, ids) = game_after_one_play();
    game.begin_undo(ids[1]).unwrap();
    let err = game.begin_undo(ids[1]).unwrap_err();
    assert_eq!(err, GameError::Protocol(ProtocolKind::UndoPending));
}

#[test]
fn self_and_duplicate_responses_are_rejected() {
    let (mut game, ids) = game_after_one_play();
    game.begin_undo(ids[1]).unwrap();

    let err = game.record_undo_response(ids[1], true).unwrap_err();
    assert_eq!(err, GameError::Protocol(ProtocolKind::SelfResponse));

    assert!(game.record_undo_response(ids[2], true).is_ok());
    let err = game.record_undo_response(ids[2], false).unwrap_err();
    assert_eq!(err, GameError::Protocol(ProtocolKind::DuplicateResponse));
}

#[test]
fn resolves_applied_the_instant_approvals_reach_the_threshold() {
    let (mut game, ids) = game_after_one_play();
    game.begin_undo(ids[1]).unwrap();

    game.record_undo_response(ids[0], true).unwrap();
    assert_eq!(game.undo_resolution(), None);
    game.record_undo_response(ids[2], true).unwrap();
    assert_eq!(game.undo_resolution(), None);
    game.record_undo_response(ids[3], true).unwrap();
    assert_eq!(game.undo_resolution(), Some(UndoResolution::Approved));
}

#[test]
fn resolves_unreachable_when_remaining_approvals_cannot_suffice() {
    let (mut game, ids) = game_after_one_play();
    game.begin_undo(ids[1]).unwrap();

    // required = 3, one denial leaves at most 2 possible approvals.
    game.record_undo_response(ids[0], false).unwrap();
    assert_eq!(game.undo_resolution(), Some(UndoResolution::Unreachable));
}

#[test]
fn apply_restores_hand_trick_and_turn_pointer() {
    let (mut game, ids) = game_after_one_play();
    // A second play, then the latest player asks to take it back.
    game.play_card(ids[2], s(Suit::Hearts, 2)).unwrap();
    game.begin_undo(ids[2]).unwrap();
    assert_eq!(game.current_idx, 3);

    let (who, card) = game.apply_undo().unwrap();
    assert_eq!(who, ids[2]);
    assert_eq!(card, s(Suit::Hearts, 2));
    assert!(game.player(ids[2]).unwrap().has_card(&card));
    assert_eq!(game.trick.len(), 1);
    assert_eq!(game.trick.lead, Some(Suit::Hearts));
    assert_eq!(game.current_idx, 2);
    assert!(game.undo.is_none());
}

#[test]
fn undoing_the_lead_clears_the_lead_suit() {
    let (mut game, ids) = game_after_one_play();
    game.begin_undo(ids[1]).unwrap();
    game.apply_undo().unwrap();

    assert!(game.trick.is_empty());
    assert_eq!(game.trick.lead, None);
    assert_eq!(game.current_idx, 1);
}

#[test]
fn cancel_clears_without_touching_state() {
    let (mut game, ids) = game_after_one_play();
    game.begin_undo(ids[1]).unwrap();
    let cancelled = game.cancel_undo();
    assert!(cancelled.is_some());
    assert!(game.undo.is_none());
    // The play stands.
    assert_eq!(game.trick.len(), 1);
    assert_eq!(game.current_idx, 2);
}

#[test]
fn responses_require_an_active_request() {
    let (mut game, ids) = game_after_one_play();
    let err = game.record_undo_response(ids[2], true).unwrap_err();
    assert_eq!(err, GameError::Protocol(ProtocolKind::NoActiveUndo));
}
