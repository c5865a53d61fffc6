use super::cards_types::{Card, Suit};
use super::snapshot::GameSnapshot;
use super::test_state_helpers::playing_game;
use time::Duration;

fn s(suit: Suit, value: u8) -> Card {
    Card::suited(suit, value)
}

#[test]
fn snapshot_shows_only_the_viewers_hand() {
    let (game, ids) = playing_game(vec![
        vec![s(Suit::Hearts, 5)],
        vec![s(Suit::Clubs, 9)],
        vec![s(Suit::Diamonds, 2)],
    ]);

    let snap = GameSnapshot::for_player(&game, ids[0]);
    assert_eq!(snap.you, ids[0]);
    assert_eq!(snap.your_hand, vec![s(Suit::Hearts, 5)]);
    // Everyone else appears only as a card count.
    for public in &snap.players {
        assert_eq!(public.card_count, 1);
    }
}

#[test]
fn serialized_snapshot_never_contains_foreign_cards() {
    let (mut game, ids) = playing_game(vec![
        vec![s(Suit::Hearts, 5)],
        vec![s(Suit::Spades, 13)],
        vec![s(Suit::Hearts, 2)],
    ]);
    game.trump_suit = None;
    game.trump_card = None;

    let snap = GameSnapshot::for_player(&game, ids[0]);
    let json = serde_json::to_string(&snap).unwrap();
    // Seat 1 holds the only spade; with no trump, no trick plays, and no
    // lead, the word cannot appear unless the hand leaked.
    assert!(!json.contains("spades"), "foreign hand leaked: {json}");
    assert!(json.contains("hearts"));
}

#[test]
fn turn_dependent_helpers_are_empty_off_turn() {
    let (game, ids) = playing_game(vec![
        vec![s(Suit::Hearts, 5)],
        vec![s(Suit::Clubs, 9)],
        vec![s(Suit::Diamonds, 2)],
    ]);

    // Seat 1 is to act.
    let acting = GameSnapshot::for_player(&game, ids[1]);
    assert_eq!(acting.your_legal_plays, vec![s(Suit::Clubs, 9)]);
    let waiting = GameSnapshot::for_player(&game, ids[0]);
    assert!(waiting.your_legal_plays.is_empty());
    assert!(waiting.your_legal_bids.is_empty());
}

#[test]
fn pause_and_undo_summaries_are_published() {
    let (mut game, ids) = playing_game(vec![
        vec![s(Suit::Hearts, 5), s(Suit::Clubs, 2)],
        vec![s(Suit::Clubs, 9), s(Suit::Clubs, 3)],
        vec![s(Suit::Diamonds, 2), s(Suit::Clubs, 4)],
    ]);
    game.play_card(ids[1], s(Suit::Clubs, 9)).unwrap();
    game.begin_undo(ids[1]).unwrap();
    game.pause_for(ids[2], Duration::seconds(60));

    let snap = GameSnapshot::for_player(&game, ids[0]);
    let pause = snap.pause.expect("pause summary");
    assert_eq!(pause.player, ids[2]);
    assert_eq!(pause.timeout_secs, 60);

    let undo = snap.undo.expect("undo summary");
    assert_eq!(undo.requester, ids[1]);
    assert_eq!(undo.card_label, "9 of Clubs");
    assert_eq!(undo.required, 2);
    assert_eq!(undo.approvals, 0);
}
