//! Combat: ledger, enemy intents, turn resolution and the combat log.
//!
//! ## Key Types
//!
//! - `CombatLedger`: HP, block and tick counters for one fight
//! - `Intent` / `EnemyAi`: the enemy's queued action and how it is rolled
//! - `TurnResolver`: the time-then-effect protocol for every action
//! - `CombatLog`: newest-first, capped, player-facing log

pub mod intent;
pub mod ledger;
pub mod log;
pub mod resolver;

pub use intent::{EnemyAi, Intent, IntentKind, IntentTable, RollBand};
pub use ledger::{CombatLedger, DamageSplit};
pub use log::CombatLog;
pub use resolver::{BreachReport, CardEffect, Resolution, TurnResolver};
