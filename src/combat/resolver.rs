//! Turn resolution: the two-phase tick protocol.
//!
//! Every player action declares a tick cost and resolves in a fixed order:
//!
//! 1. **Time phase**: `ticks += cost`. If the bar is breached the enemy
//!    turn runs immediately and `ticks` returns to zero.
//! 2. **Effect phase**: the card (if any) applies to the ledger. An attack
//!    measures its damage against the enemy block held *before* the time
//!    phase, so block the enemy fortified in that same enemy turn is lost
//!    under the hit. The phase runs even when the enemy turn just dropped
//!    the player to zero HP; a defeated player is not healed.
//!
//! Callers check fight outcomes after both phases have committed.

use serde::{Deserialize, Serialize};

use super::intent::{EnemyAi, Intent, IntentKind};
use super::ledger::{CombatLedger, DamageSplit};
use crate::cards::{Card, CardKind};
use crate::core::{CardId, RandomSource};

/// What happened when the tick bar filled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreachReport {
    /// The intent that fired.
    pub resolved: Intent,
    /// Damage split against the player (attack intents only).
    pub split: DamageSplit,
    /// Block the enemy gained (block intents only).
    pub block_gained: u32,
    /// The attack left the player at zero HP.
    pub player_defeated: bool,
    /// The freshly rolled intent now on display.
    pub next: Intent,
}

impl BreachReport {
    /// Combat log line for this breach.
    #[must_use]
    pub fn describe(&self, enemy_name: &str) -> String {
        match self.resolved.kind {
            IntentKind::Attack => format!(
                "BREACH: {enemy_name} attacked for {} ({} taken).",
                self.resolved.value, self.split.hp_lost
            ),
            IntentKind::Block => format!(
                "BREACH: {enemy_name} fortified (+{} Block).",
                self.resolved.value
            ),
        }
    }
}

/// What a played card did.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardEffect {
    pub card: CardId,
    pub kind: CardKind,
    /// Effective magnitude, including shuffle bonus.
    pub value: u32,
    /// Damage split against the enemy (attacks only).
    pub split: DamageSplit,
    pub block_gained: u32,
    pub healed: u32,
}

impl CardEffect {
    /// Combat log line for this play.
    #[must_use]
    pub fn describe(&self, card_name: &str) -> String {
        match self.kind {
            CardKind::Attack => format!("PLAY: {card_name} ({} DMG).", self.value),
            CardKind::Block => format!("PLAY: {card_name} (+{} Block).", self.value),
        }
    }
}

/// Outcome of one resolved action.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    pub breach: Option<BreachReport>,
    pub effect: Option<CardEffect>,
}

/// Resolves actions against a ledger for one fight.
#[derive(Clone, Copy, Debug)]
pub struct TurnResolver {
    ai: EnemyAi,
    fight_index: usize,
}

impl TurnResolver {
    #[must_use]
    pub fn new(ai: EnemyAi, fight_index: usize) -> Self {
        Self { ai, fight_index }
    }

    /// Time phase. Returns the breach report if the enemy acted.
    pub fn spend_ticks(
        &self,
        ledger: &mut CombatLedger,
        cost: u32,
        rng: &mut impl RandomSource,
    ) -> Option<BreachReport> {
        ledger.ticks = ledger.ticks.saturating_add(cost);
        if !ledger.is_breached() {
            return None;
        }
        let report = self.enemy_turn(ledger, rng);
        ledger.ticks = 0;
        Some(report)
    }

    /// Fire the active intent, reset the turn counters and roll a new intent.
    pub fn enemy_turn(&self, ledger: &mut CombatLedger, rng: &mut impl RandomSource) -> BreachReport {
        let resolved = ledger.intent;
        let mut split = DamageSplit::default();
        let mut block_gained = 0;

        match resolved.kind {
            IntentKind::Attack => split = ledger.strike_player(resolved.value),
            IntentKind::Block => {
                ledger.gain_enemy_block(resolved.value);
                block_gained = resolved.value;
            }
        }

        ledger.player_block = 0;
        ledger.ticks = 0;
        let next = self.ai.next_intent(self.fight_index, rng);
        ledger.set_intent(next);

        BreachReport {
            resolved,
            split,
            block_gained,
            player_defeated: ledger.player_defeated(),
            next,
        }
    }

    /// Effect phase: apply a card to the ledger.
    pub fn apply_card(ledger: &mut CombatLedger, card: &Card) -> CardEffect {
        let enemy_block = ledger.enemy_block;
        Self::apply_card_over(ledger, card, enemy_block)
    }

    /// Effect phase against an enemy block captured before the time phase.
    fn apply_card_over(ledger: &mut CombatLedger, card: &Card, enemy_block: u32) -> CardEffect {
        let value = card.effective_value();
        let mut split = DamageSplit::default();
        let mut block_gained = 0;

        match card.kind {
            CardKind::Attack => {
                ledger.enemy_block = enemy_block;
                split = ledger.strike_enemy(value);
            }
            CardKind::Block => {
                ledger.gain_player_block(value);
                block_gained = value;
            }
        }
        let healed = match card.heal {
            Some(amount) if !ledger.player_defeated() => ledger.heal(amount),
            _ => 0,
        };

        CardEffect {
            card: card.id,
            kind: card.kind,
            value,
            split,
            block_gained,
            healed,
        }
    }

    /// Both phases for a card play.
    pub fn play(
        &self,
        ledger: &mut CombatLedger,
        card: &Card,
        cost: u32,
        rng: &mut impl RandomSource,
    ) -> Resolution {
        let enemy_block = ledger.enemy_block;
        let breach = self.spend_ticks(ledger, cost, rng);
        let effect = Self::apply_card_over(ledger, card, enemy_block);
        Resolution {
            breach,
            effect: Some(effect),
        }
    }

    /// Time phase only, for actions without a card effect.
    pub fn pass_time(
        &self,
        ledger: &mut CombatLedger,
        cost: u32,
        rng: &mut impl RandomSource,
    ) -> Resolution {
        Resolution {
            breach: self.spend_ticks(ledger, cost, rng),
            effect: None,
        }
    }
}
