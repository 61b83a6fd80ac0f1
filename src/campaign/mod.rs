//! Campaign: enemies, the run state machine and the command surface.
//!
//! ## Key Types
//!
//! - `Engine<T, R>`: one run over a card table `T` with random source `R`
//! - `SolitaireGame` / `LinearGame`: the two variants with a seeded generator
//! - `Snapshot`: read-only view handed to the presentation layer
//! - `Campaign` / `EnemyDef`: enemies fought in order
//!
//! Variant-specific commands live in `solitaire` (draw, select, play, move)
//! and `linear` (play, shuffle, hold).

pub mod enemy;
pub mod engine;
pub mod linear;
pub mod snapshot;
pub mod solitaire;
pub mod state;

pub use enemy::{Campaign, EnemyDef};
pub use engine::{Engine, EngineBuilder, LinearGame, Outcome, SolitaireGame};
pub use snapshot::Snapshot;
pub use state::{RunState, View};
