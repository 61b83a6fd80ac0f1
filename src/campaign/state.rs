//! Run state: everything that changes while a run is played.
//!
//! `RunState` is a plain owned value. The engine wraps it with the
//! immutable pieces (rules, catalog, AI) and is the only thing that
//! mutates it.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::Card;
use crate::combat::{CombatLedger, CombatLog};
use crate::core::{CardId, SequentialIds};

/// Which screen of the run the player is on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum View {
    Combat,
    Reward,
    GameOver,
    Victory,
}

impl View {
    /// `GameOver` and `Victory` only leave through a new run.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, View::GameOver | View::Victory)
    }
}

impl std::fmt::Display for View {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            View::Combat => "COMBAT",
            View::Reward => "REWARD",
            View::GameOver => "GAME_OVER",
            View::Victory => "VICTORY",
        };
        f.write_str(name)
    }
}

/// Mutable state of one run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RunState<T, R> {
    pub view: View,
    pub fight_index: usize,
    pub ledger: CombatLedger,
    pub table: T,
    /// Cards on offer in the reward view.
    pub rewards: Vec<Card>,
    /// Reward cards picked so far, in pick order.
    pub selected_rewards: SmallVec<[CardId; 4]>,
    pub log: CombatLog,
    pub ids: SequentialIds,
    pub rng: R,
}

impl<T, R> RunState<T, R> {
    /// Whether a reward card is currently picked.
    #[must_use]
    pub fn is_reward_selected(&self, id: CardId) -> bool {
        self.selected_rewards.contains(&id)
    }
}
