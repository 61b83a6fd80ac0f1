//! Per-fight counters: HP, block and the tick bar.
//!
//! All values are unsigned and every mutation saturates, so the ledger can
//! never hold a negative HP or block. HP is additionally clamped to its
//! maximum on heals.

use serde::{Deserialize, Serialize};

use super::intent::Intent;

/// Damage split between block and HP.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamageSplit {
    /// Damage soaked by block.
    pub absorbed: u32,
    /// Damage that reached HP (after flooring at zero).
    pub hp_lost: u32,
}

/// Combat ledger for one fight.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatLedger {
    /// Player HP, carried across fights.
    pub player_hp: u32,
    pub player_max_hp: u32,
    pub player_block: u32,

    pub enemy_hp: u32,
    pub enemy_max_hp: u32,
    pub enemy_block: u32,

    /// Ticks spent since the last enemy turn.
    pub ticks: u32,

    /// Breach threshold, taken from the active intent's duration.
    pub max_ticks: u32,

    /// The enemy's queued action.
    pub intent: Intent,
}

impl CombatLedger {
    /// Fresh ledger for a fight: blocks and ticks zeroed, enemy at full HP.
    #[must_use]
    pub fn for_fight(player_hp: u32, player_max_hp: u32, enemy_hp: u32, opening: Intent) -> Self {
        Self {
            player_hp: player_hp.min(player_max_hp),
            player_max_hp,
            player_block: 0,
            enemy_hp,
            enemy_max_hp: enemy_hp,
            enemy_block: 0,
            ticks: 0,
            max_ticks: opening.duration,
            intent: opening,
        }
    }

    /// Replace the active intent and the breach threshold with it.
    pub fn set_intent(&mut self, intent: Intent) {
        self.max_ticks = intent.duration;
        self.intent = intent;
    }

    /// Whether `ticks` has reached the threshold.
    #[must_use]
    pub fn is_breached(&self) -> bool {
        self.ticks >= self.max_ticks
    }

    /// Hit the enemy: block first, then HP floored at zero.
    pub fn strike_enemy(&mut self, damage: u32) -> DamageSplit {
        let absorbed = damage.min(self.enemy_block);
        let overflow = damage - absorbed;
        self.enemy_block -= absorbed;

        let hp_lost = overflow.min(self.enemy_hp);
        self.enemy_hp -= hp_lost;

        DamageSplit { absorbed, hp_lost }
    }

    /// Hit the player: block first, then HP floored at zero.
    pub fn strike_player(&mut self, damage: u32) -> DamageSplit {
        let absorbed = damage.min(self.player_block);
        let overflow = damage - absorbed;

        let hp_lost = overflow.min(self.player_hp);
        self.player_hp -= hp_lost;

        DamageSplit { absorbed, hp_lost }
    }

    /// Lose HP directly, ignoring block. Returns HP actually lost.
    pub fn lose_hp(&mut self, amount: u32) -> u32 {
        let lost = amount.min(self.player_hp);
        self.player_hp -= lost;
        lost
    }

    pub fn gain_player_block(&mut self, amount: u32) {
        self.player_block = self.player_block.saturating_add(amount);
    }

    pub fn gain_enemy_block(&mut self, amount: u32) {
        self.enemy_block = self.enemy_block.saturating_add(amount);
    }

    /// Heal up to the cap. Returns HP actually restored.
    pub fn heal(&mut self, amount: u32) -> u32 {
        let healed = amount.min(self.player_max_hp.saturating_sub(self.player_hp));
        self.player_hp += healed;
        healed
    }

    #[must_use]
    pub fn enemy_defeated(&self) -> bool {
        self.enemy_hp == 0
    }

    #[must_use]
    pub fn player_defeated(&self) -> bool {
        self.player_hp == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::IntentKind;

    fn ledger() -> CombatLedger {
        CombatLedger::for_fight(50, 50, 50, Intent::new(IntentKind::Attack, 8, 15))
    }

    #[test]
    fn test_for_fight() {
        let l = ledger();
        assert_eq!(l.ticks, 0);
        assert_eq!(l.max_ticks, 15);
        assert_eq!((l.player_block, l.enemy_block), (0, 0));
        assert_eq!(l.enemy_max_hp, 50);
    }

    #[test]
    fn test_damage_through_block() {
        let mut l = ledger();
        l.enemy_block = 10;

        let split = l.strike_enemy(15);

        assert_eq!(split, DamageSplit { absorbed: 10, hp_lost: 5 });
        assert_eq!(l.enemy_block, 0);
        assert_eq!(l.enemy_hp, 45);
    }

    #[test]
    fn test_block_soaks_everything() {
        let mut l = ledger();
        l.enemy_block = 20;

        l.strike_enemy(15);

        assert_eq!(l.enemy_block, 5);
        assert_eq!(l.enemy_hp, 50);
    }

    #[test]
    fn test_enemy_hp_floors_at_zero() {
        let mut l = ledger();
        let split = l.strike_enemy(80);
        assert_eq!(split.hp_lost, 50);
        assert_eq!(l.enemy_hp, 0);
        assert!(l.enemy_defeated());
    }

    #[test]
    fn test_player_block_absorbs() {
        let mut l = ledger();
        l.gain_player_block(6);

        let split = l.strike_player(10);

        assert_eq!(split, DamageSplit { absorbed: 6, hp_lost: 4 });
        assert_eq!(l.player_hp, 46);
    }

    #[test]
    fn test_heal_clamps() {
        let mut l = ledger();
        l.lose_hp(5);
        assert_eq!(l.heal(8), 5);
        assert_eq!(l.player_hp, 50);
    }

    #[test]
    fn test_lose_hp_floors() {
        let mut l = ledger();
        assert_eq!(l.lose_hp(70), 50);
        assert!(l.player_defeated());
    }

    #[test]
    fn test_set_intent_updates_threshold() {
        let mut l = ledger();
        l.set_intent(Intent::new(IntentKind::Block, 7, 10));
        assert_eq!(l.max_ticks, 10);
        assert_eq!(l.intent.value, 7);
    }
}
