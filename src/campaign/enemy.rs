//! Enemy definitions and the ordered campaign.

use serde::{Deserialize, Serialize};

/// One enemy of the campaign.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnemyDef {
    pub id: u16,
    pub name: String,
    pub max_hp: u32,
    /// Cards offered after defeating this enemy.
    pub reward_count: usize,
    /// Bosses cannot be escaped.
    pub boss: bool,
}

impl EnemyDef {
    #[must_use]
    pub fn new(id: u16, name: impl Into<String>, max_hp: u32, reward_count: usize) -> Self {
        Self {
            id,
            name: name.into(),
            max_hp,
            reward_count,
            boss: false,
        }
    }

    #[must_use]
    pub fn boss(mut self) -> Self {
        self.boss = true;
        self
    }
}

/// Enemies fought in order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Campaign {
    enemies: Vec<EnemyDef>,
}

impl Campaign {
    #[must_use]
    pub fn new(enemies: Vec<EnemyDef>) -> Self {
        Self { enemies }
    }

    /// Scavenger, Sentinel, then the Cinder Lord.
    #[must_use]
    pub fn standard() -> Self {
        Self::new(vec![
            EnemyDef::new(1, "Scavenger", 50, 5),
            EnemyDef::new(2, "Sentinel", 80, 6),
            EnemyDef::new(3, "Cinder Lord", 200, 0).boss(),
        ])
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&EnemyDef> {
        self.enemies.get(index)
    }

    #[must_use]
    pub fn enemies(&self) -> &[EnemyDef] {
        &self.enemies
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.enemies.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.enemies.is_empty()
    }

    /// Whether `index` is the final fight.
    #[must_use]
    pub fn is_last(&self, index: usize) -> bool {
        index + 1 >= self.enemies.len()
    }
}
