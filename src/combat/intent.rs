//! Enemy intents and the AI that rolls them.
//!
//! The AI is a stateless function of campaign progress plus an injected
//! random source. Each roll is independent:
//!
//! 1. Attack with probability `aggression`, otherwise block.
//! 2. An attack is heavy with probability `heavy_chance`, otherwise light.
//! 3. The magnitude is `base + offset + uniform(0..spread)`, where
//!    `base = base_value + value_step * fight_index`.

use serde::{Deserialize, Serialize};

use crate::core::RandomSource;

/// What the enemy will do when the tick bar fills.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IntentKind {
    Attack,
    Block,
}

/// The enemy's queued action. Replaced wholesale after every enemy turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Intent {
    pub kind: IntentKind,
    /// Damage or block magnitude.
    pub value: u32,
    /// Ticks until it fires; becomes the ledger's `max_ticks`.
    pub duration: u32,
}

impl Intent {
    #[must_use]
    pub const fn new(kind: IntentKind, value: u32, duration: u32) -> Self {
        Self { kind, value, duration }
    }

    #[must_use]
    pub fn is_attack(&self) -> bool {
        self.kind == IntentKind::Attack
    }
}

/// One row of the roll table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollBand {
    /// Added to the fight's base value.
    pub offset: i32,
    /// Width of the uniform roll added on top (`0..spread`).
    pub spread: i32,
    /// Duration of intents from this band.
    pub duration: u32,
}

impl RollBand {
    #[must_use]
    pub const fn new(offset: i32, spread: i32, duration: u32) -> Self {
        Self { offset, spread, duration }
    }

    fn roll(&self, base: i32, rng: &mut impl RandomSource) -> u32 {
        let value = base + self.offset + rng.gen_range(0..self.spread.max(1));
        value.max(0) as u32
    }
}

/// Parameters of the intent distribution.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct IntentTable {
    /// Probability of attacking rather than blocking.
    pub aggression: f64,
    /// Probability that an attack is heavy.
    pub heavy_chance: f64,
    /// Base value of the first fight.
    pub base_value: i32,
    /// Base value increase per fight.
    pub value_step: i32,
    pub heavy: RollBand,
    pub light: RollBand,
    pub block: RollBand,
}

impl Default for IntentTable {
    fn default() -> Self {
        Self {
            aggression: 0.6,
            heavy_chance: 0.3,
            base_value: 8,
            value_step: 2,
            heavy: RollBand::new(5, 5, 20),
            light: RollBand::new(0, 3, 12),
            block: RollBand::new(-2, 4, 10),
        }
    }
}

impl IntentTable {
    /// Base value for a fight.
    #[must_use]
    pub fn base_for(&self, fight_index: usize) -> i32 {
        self.base_value + self.value_step * fight_index as i32
    }
}

/// Enemy AI: rolls intents from an [`IntentTable`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemyAi {
    table: IntentTable,
}

impl EnemyAi {
    #[must_use]
    pub fn new(table: IntentTable) -> Self {
        Self { table }
    }

    #[must_use]
    pub fn table(&self) -> &IntentTable {
        &self.table
    }

    /// The fixed intent every fight opens with: an attack at the base value.
    #[must_use]
    pub fn opening_intent(&self, fight_index: usize, duration: u32) -> Intent {
        let value = self.table.base_for(fight_index).max(0) as u32;
        Intent::new(IntentKind::Attack, value, duration)
    }

    /// Roll the next intent.
    pub fn next_intent(&self, fight_index: usize, rng: &mut impl RandomSource) -> Intent {
        let base = self.table.base_for(fight_index);

        if rng.gen_bool(self.table.aggression) {
            let band = if rng.gen_bool(self.table.heavy_chance) {
                self.table.heavy
            } else {
                self.table.light
            };
            Intent::new(IntentKind::Attack, band.roll(base, rng), band.duration)
        } else {
            let band = self.table.block;
            Intent::new(IntentKind::Block, band.roll(base, rng), band.duration)
        }
    }
}

impl Default for EnemyAi {
    fn default() -> Self {
        Self::new(IntentTable::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GameRng, ScriptedRng};

    #[test]
    fn test_opening_intent_scales() {
        let ai = EnemyAi::default();
        assert_eq!(ai.opening_intent(0, 15), Intent::new(IntentKind::Attack, 8, 15));
        assert_eq!(ai.opening_intent(2, 15), Intent::new(IntentKind::Attack, 12, 15));
    }

    #[test]
    fn test_forced_heavy_attack() {
        let ai = EnemyAi::default();
        // aggressive, heavy, top of the spread
        let mut rng = ScriptedRng::new([0.0, 0.0, 0.99]);

        let intent = ai.next_intent(0, &mut rng);

        assert_eq!(intent.kind, IntentKind::Attack);
        assert_eq!(intent.duration, 20);
        assert_eq!(intent.value, 8 + 5 + 4);
    }

    #[test]
    fn test_forced_light_attack() {
        let ai = EnemyAi::default();
        let mut rng = ScriptedRng::new([0.0, 0.5, 0.0]);

        let intent = ai.next_intent(1, &mut rng);

        assert_eq!(intent, Intent::new(IntentKind::Attack, 10, 12));
    }

    #[test]
    fn test_forced_block() {
        let ai = EnemyAi::default();
        let mut rng = ScriptedRng::new([0.9, 0.0]);

        let intent = ai.next_intent(0, &mut rng);

        assert_eq!(intent, Intent::new(IntentKind::Block, 6, 10));
    }

    #[test]
    fn test_rolls_stay_in_bands() {
        let ai = EnemyAi::default();
        let mut rng = GameRng::new(42);

        for fight in 0..3 {
            let base = 8 + 2 * fight as u32;
            for _ in 0..200 {
                let intent = ai.next_intent(fight, &mut rng);
                match (intent.kind, intent.duration) {
                    (IntentKind::Attack, 20) => assert!((base + 5..=base + 9).contains(&intent.value)),
                    (IntentKind::Attack, 12) => assert!((base..=base + 2).contains(&intent.value)),
                    (IntentKind::Block, 10) => assert!((base - 2..=base + 1).contains(&intent.value)),
                    other => panic!("unexpected intent shape {other:?}"),
                }
            }
        }
    }

    #[test]
    fn test_serialization() {
        let intent = Intent::new(IntentKind::Block, 9, 10);
        let json = serde_json::to_string(&intent).unwrap();
        let deserialized: Intent = serde_json::from_str(&json).unwrap();
        assert_eq!(intent, deserialized);
    }
}
