//! Core engine types: identities, randomness, rules configuration, errors.
//!
//! Nothing here knows about piles or fights; the other modules build on
//! these pieces.

pub mod entity;
pub mod rng;
pub mod config;
pub mod error;

pub use entity::{CardId, TemplateId, IdAllocator, SequentialIds};
pub use rng::{RandomSource, GameRng, GameRngState, ScriptedRng};
pub use config::{RulesConfig, PlayCost, BonusReset, Ratio};
pub use error::{Rejected, CommandResult, EngineError};
