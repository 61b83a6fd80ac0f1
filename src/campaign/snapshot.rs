//! Read-only snapshot handed to the presentation layer.

use serde::{Deserialize, Serialize};

use super::enemy::EnemyDef;
use super::state::View;
use crate::cards::Card;
use crate::combat::{CombatLedger, Intent};
use crate::core::CardId;
use crate::zones::TableView;

/// Everything a renderer needs for one frame.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub view: View,
    pub fight_index: usize,
    pub enemy: EnemyDef,
    pub ledger: CombatLedger,
    pub intent: Intent,
    pub table: TableView,
    /// Combat log, newest first.
    pub log: Vec<String>,
    pub rewards: Vec<Card>,
    pub selected_rewards: Vec<CardId>,
    /// Damage an escape would deal right now.
    pub escape_cost: u32,
    pub can_escape: bool,
}
