//! Domain layer: pure game logic. No I/O, no actors, no clocks besides the
//! timestamps stored on pause and undo state.

pub mod cards_logic;
pub mod cards_types;
pub mod deck;
pub mod errors;
pub mod player;
pub mod rules;
pub mod snapshot;
pub mod state;
pub mod trick;
pub mod undo;

#[cfg(test)]
mod test_state_helpers;
#[cfg(test)]
mod tests_bidding;
#[cfg(test)]
mod tests_rounds;
#[cfg(test)]
mod tests_snapshot;
#[cfg(test)]
mod tests_undo;

// Re-exports for ergonomics
pub use cards_logic::{card_beats, hand_has_suit, legal_plays};
pub use cards_types::{Card, Suit};
pub use errors::{AuthorityKind, GameError, ProtocolKind, ValidationKind};
pub use player::{PlayerId, PlayerRecord, RoundEntry};
pub use snapshot::GameSnapshot;
pub use state::{Game, GameId, Phase, PlayOutcome, RoomSettings, Visibility};
pub use undo::{UndoRequest, UndoResolution};
