//! Card comparison and hand legality: Wizard/Jester precedence, trump over
//! lead suit, follow-suit enforcement.

use super::cards_types::{Card, Suit};

/// True if the hand holds at least one suited card of `suit`.
/// Wizards and Jesters never count.
pub fn hand_has_suit(hand: &[Card], suit: Suit) -> bool {
    hand.iter().any(|c| c.suit() == Some(suit))
}

/// Does `challenger` beat `incumbent`?
///
/// `incumbent` is the play currently winning the trick, so it was played
/// earlier than `challenger`. Ties therefore go to the incumbent: the first
/// Wizard keeps a trick full of Wizards, and across two unrelated off-suits
/// the earlier card stands.
pub fn card_beats(
    challenger: Card,
    incumbent: Card,
    lead: Option<Suit>,
    trump: Option<Suit>,
) -> bool {
    // Wizards win outright, earliest first.
    if incumbent.is_wizard() {
        return false;
    }
    if challenger.is_wizard() {
        return true;
    }
    // Jesters lose to everything; between two Jesters the first stands.
    if challenger.is_jester() {
        return false;
    }
    if incumbent.is_jester() {
        return true;
    }

    // Both suited from here on.
    if let Some(trump_suit) = trump {
        let c_trump = challenger.suit() == Some(trump_suit);
        let i_trump = incumbent.suit() == Some(trump_suit);
        if c_trump && !i_trump {
            return true;
        }
        if i_trump && !c_trump {
            return false;
        }
        if c_trump && i_trump {
            return challenger.value() > incumbent.value();
        }
    }

    let c_follows = lead.is_some() && challenger.suit() == lead;
    let i_follows = lead.is_some() && incumbent.suit() == lead;
    if c_follows && !i_follows {
        return true;
    }
    if i_follows && !c_follows {
        return false;
    }
    if c_follows && i_follows {
        return challenger.value() > incumbent.value();
    }
    // Two unrelated off-suits: no comparison, earlier card wins.
    false
}

/// Cards from `hand` that may legally be played given the current lead suit.
///
/// With no lead established anything goes. With a lead suit, a player holding
/// suited cards of that suit may play only those or any Wizard/Jester;
/// a player void in the lead suit may play anything.
pub fn legal_plays(hand: &[Card], lead: Option<Suit>) -> Vec<Card> {
    let Some(lead) = lead else {
        return hand.to_vec();
    };
    if !hand_has_suit(hand, lead) {
        return hand.to_vec();
    }
    hand.iter()
        .copied()
        .filter(|c| c.suit() == Some(lead) || c.is_wizard() || c.is_jester())
        .collect()
}
