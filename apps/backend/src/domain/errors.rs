//! Domain-level error type shared by the state machine and command handlers.
//!
//! Every rejected action is reported with one of these; none of them mutate
//! game state. Only `Internal` indicates a logic defect rather than a
//! reachable user error.

use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// The actor lacks the standing to perform the action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthorityKind {
    NotHost,
    NotDealer,
    OutOfTurn,
}

/// Payload failed a business-rule check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationKind {
    InvalidBid,
    ForbiddenBid,
    IllegalCard,
    CardNotInHand,
    UnknownPlayer,
    InvalidPlayerCount,
    NotABot,
    InvalidName,
    InvalidMessage,
    WrongPassword,
}

/// Undo-protocol violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProtocolKind {
    NoActiveUndo,
    UndoPending,
    DuplicateResponse,
    SelfResponse,
    NotYourPlay,
}

#[derive(Debug, Clone, PartialEq)]
pub enum GameError {
    Authority(AuthorityKind),
    /// Action attempted outside its valid phase; carries the action name.
    Phase(&'static str),
    Validation(ValidationKind, String),
    /// Room is full.
    Capacity,
    Protocol(ProtocolKind),
    /// Invariant violation; the room treats this as fatal.
    Internal(String),
}

impl GameError {
    pub fn validation(kind: ValidationKind, detail: impl Into<String>) -> Self {
        Self::Validation(kind, detail.into())
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::Internal(detail.into())
    }

    /// Stable machine-readable code for the wire protocol.
    pub fn code(&self) -> &'static str {
        match self {
            GameError::Authority(AuthorityKind::NotHost) => "not_host",
            GameError::Authority(AuthorityKind::NotDealer) => "not_dealer",
            GameError::Authority(AuthorityKind::OutOfTurn) => "out_of_turn",
            GameError::Phase(_) => "wrong_phase",
            GameError::Validation(ValidationKind::InvalidBid, _) => "invalid_bid",
            GameError::Validation(ValidationKind::ForbiddenBid, _) => "forbidden_bid",
            GameError::Validation(ValidationKind::IllegalCard, _) => "illegal_card",
            GameError::Validation(ValidationKind::CardNotInHand, _) => "card_not_in_hand",
            GameError::Validation(ValidationKind::UnknownPlayer, _) => "unknown_player",
            GameError::Validation(ValidationKind::InvalidPlayerCount, _) => "invalid_player_count",
            GameError::Validation(ValidationKind::NotABot, _) => "not_a_bot",
            GameError::Validation(ValidationKind::InvalidName, _) => "invalid_name",
            GameError::Validation(ValidationKind::InvalidMessage, _) => "invalid_message",
            GameError::Validation(ValidationKind::WrongPassword, _) => "wrong_password",
            GameError::Capacity => "room_full",
            GameError::Protocol(ProtocolKind::NoActiveUndo) => "no_active_undo",
            GameError::Protocol(ProtocolKind::UndoPending) => "undo_pending",
            GameError::Protocol(ProtocolKind::DuplicateResponse) => "duplicate_response",
            GameError::Protocol(ProtocolKind::SelfResponse) => "self_response",
            GameError::Protocol(ProtocolKind::NotYourPlay) => "not_your_play",
            GameError::Internal(_) => "internal_error",
        }
    }
}

impl Display for GameError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            GameError::Authority(AuthorityKind::NotHost) => write!(f, "only the host may do this"),
            GameError::Authority(AuthorityKind::NotDealer) => {
                write!(f, "only the dealer may do this")
            }
            GameError::Authority(AuthorityKind::OutOfTurn) => write!(f, "not your turn"),
            GameError::Phase(action) => write!(f, "{action} is not valid in the current phase"),
            GameError::Validation(kind, d) => write!(f, "invalid action ({kind:?}): {d}"),
            GameError::Capacity => write!(f, "room is full"),
            GameError::Protocol(ProtocolKind::NoActiveUndo) => write!(f, "no undo is pending"),
            GameError::Protocol(ProtocolKind::UndoPending) => {
                write!(f, "another undo is already pending")
            }
            GameError::Protocol(ProtocolKind::DuplicateResponse) => {
                write!(f, "already responded to this undo")
            }
            GameError::Protocol(ProtocolKind::SelfResponse) => {
                write!(f, "cannot respond to your own undo request")
            }
            GameError::Protocol(ProtocolKind::NotYourPlay) => {
                write!(f, "the last card played is not yours")
            }
            GameError::Internal(d) => write!(f, "internal error: {d}"),
        }
    }
}

impl Error for GameError {}
