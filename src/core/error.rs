//! Command rejections and engine failures.
//!
//! A [`Rejected`] command left the engine untouched: no ledger change, no
//! pile change, no combat log line. [`EngineError`] covers the few
//! operations that can genuinely fail (checkpoint encoding).

use thiserror::Error;

use super::entity::CardId;
use crate::campaign::View;
use crate::zones::PileRef;

/// Why a command was refused.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Rejected {
    #[error("command not available in {0:?} view")]
    WrongView(View),

    #[error("{0} is not a face-up top card")]
    NotPlayable(CardId),

    #[error("no card selected")]
    NothingSelected,

    #[error("stock and waste are both empty")]
    NothingToDraw,

    #[error("{card} has the same polarity as the top of {target}")]
    SamePolarity { card: CardId, target: PileRef },

    #[error("{0} is already on {1}")]
    SamePile(CardId, PileRef),

    #[error("{0} is not a tableau pile")]
    NoSuchPile(PileRef),

    #[error("boss fights cannot be escaped")]
    BossFight,

    #[error("deck is empty")]
    EmptyDeck,

    #[error("{0} is not on offer")]
    UnknownReward(CardId),
}

/// Result of an engine command.
pub type CommandResult<T> = std::result::Result<T, Rejected>;

/// Failures outside normal play.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to encode checkpoint")]
    Encode(#[source] bincode::Error),

    #[error("failed to decode checkpoint")]
    Decode(#[source] bincode::Error),

    #[error("checkpoint does not fit these rules: {0}")]
    Incompatible(String),
}
