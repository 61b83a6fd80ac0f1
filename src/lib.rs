//! # cinder-engine
//!
//! A tick-budget card combat engine. The player fights a fixed sequence of
//! enemies by spending ticks on card actions; when the tick bar fills the
//! enemy acts on its displayed intent.
//!
//! ## Design Principles
//!
//! 1. **One owned state value**: every counter of a run lives in
//!    `RunState`, mutated only through `Engine` commands. The presentation
//!    layer reads `Snapshot`s.
//!
//! 2. **Injected randomness**: shuffles, intent rolls and reward offers all
//!    draw from a `RandomSource`. `GameRng` for play, `ScriptedRng` for
//!    tests.
//!
//! 3. **Atomic commands**: a command either commits every mutation or is
//!    rejected with `Err(Rejected)` and changes nothing.
//!
//! ## Turn protocol
//!
//! Each action costs ticks. The time phase adds the cost and, if the bar
//! is breached, runs the enemy turn. The effect phase then applies the card;
//! an attack hits the enemy block as it stood before the time phase.
//!
//! ## Modules
//!
//! - `core`: ids, randomness, rules configuration, errors
//! - `cards`: templates, instances, the catalog
//! - `combat`: ledger, intents, turn resolution, combat log
//! - `zones`: the `Table` seam with `Tableau` and `LinearDeck`
//! - `campaign`: enemies, the run engine, snapshots

pub mod core;
pub mod cards;
pub mod combat;
pub mod zones;
pub mod campaign;

#[cfg(feature = "python")]
pub mod python;

// Re-export commonly used types
pub use crate::core::{
    CardId, TemplateId, IdAllocator, SequentialIds,
    RandomSource, GameRng, GameRngState, ScriptedRng,
    RulesConfig, PlayCost, BonusReset, Ratio,
    Rejected, CommandResult, EngineError,
};

pub use crate::cards::{Card, CardKind, CardTemplate, Catalog, Polarity, Aspect};

pub use crate::combat::{
    CombatLedger, Intent, IntentKind, IntentTable, EnemyAi,
    TurnResolver, BreachReport, CardEffect, CombatLog,
};

pub use crate::zones::{Table, Tableau, LinearDeck, PileRef, CardView, TableView, Draw, HoldMove};

pub use crate::campaign::{
    Campaign, EnemyDef, Engine, EngineBuilder, SolitaireGame, LinearGame,
    Outcome, Snapshot, View,
};
