//! Card catalog: template lookup, starter decks and reward offers.
//!
//! The `Catalog` stores every template a run can stamp cards from, plus the
//! template lists used for the two starter decks and the reward pool.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::definition::{Aspect, CardKind, CardTemplate};
use super::instance::Card;
use crate::core::{IdAllocator, RandomSource, TemplateId};

/// Template ids of the standard catalog.
pub mod ids {
    use crate::core::TemplateId;

    pub const STRIKE: TemplateId = TemplateId::new(0);
    pub const DEFEND: TemplateId = TemplateId::new(1);
    pub const BASH: TemplateId = TemplateId::new(2);
    pub const QUICK_SHIV: TemplateId = TemplateId::new(3);
    pub const PYROBLAST: TemplateId = TemplateId::new(4);
    pub const LEECH: TemplateId = TemplateId::new(5);
    pub const IRON_WALL: TemplateId = TemplateId::new(6);
    pub const FORTRESS: TemplateId = TemplateId::new(7);
    pub const INFERNO: TemplateId = TemplateId::new(8);
    pub const PREPARED_STRIKE: TemplateId = TemplateId::new(9);
    pub const GUARD: TemplateId = TemplateId::new(10);
}

/// Registry of card templates.
///
/// ## Example
///
/// ```
/// use cinder_engine::cards::{ids, Catalog};
/// use cinder_engine::core::SequentialIds;
///
/// let catalog = Catalog::standard();
/// let mut alloc = SequentialIds::new();
///
/// let bash = catalog.stamp(ids::BASH, &mut alloc).unwrap();
/// assert_eq!(bash.name, "Bash");
/// assert_eq!(bash.value, 20);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    templates: FxHashMap<TemplateId, CardTemplate>,
    reward_pool: Vec<TemplateId>,
    linear_starter: Vec<TemplateId>,
    tableau_starter: Vec<TemplateId>,
}

impl Catalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The standard Cinder catalog.
    #[must_use]
    pub fn standard() -> Self {
        use self::ids::*;

        let mut catalog = Self::new();
        let templates = [
            CardTemplate::new(STRIKE, "Strike", CardKind::Attack, 12)
                .with_description("Deal 12 DMG"),
            CardTemplate::new(DEFEND, "Defend", CardKind::Block, 10)
                .with_description("Gain 10 Block"),
            CardTemplate::new(BASH, "Bash", CardKind::Attack, 20)
                .with_cost(3)
                .with_description("Deal 20 DMG (3 Ticks)"),
            CardTemplate::new(QUICK_SHIV, "Quick Shiv", CardKind::Attack, 8)
                .with_cost(1)
                .with_description("Deal 8 DMG (1 Tick)"),
            CardTemplate::new(PYROBLAST, "Pyroblast", CardKind::Attack, 40)
                .with_cost(4)
                .with_aspect(Aspect::Ember)
                .with_description("Deal 40 DMG (4 Ticks)"),
            CardTemplate::new(LEECH, "Leech", CardKind::Attack, 10)
                .with_heal(8)
                .with_aspect(Aspect::Blood)
                .with_description("Deal 10 DMG + Heal 8"),
            CardTemplate::new(IRON_WALL, "Iron Wall", CardKind::Block, 20)
                .with_description("Gain 20 Block"),
            CardTemplate::new(FORTRESS, "Fortress", CardKind::Block, 30)
                .with_cost(4)
                .with_aspect(Aspect::Stone)
                .with_description("Gain 30 Block (4 Ticks)"),
            CardTemplate::new(INFERNO, "Inferno", CardKind::Attack, 60)
                .with_cost(5)
                .with_aspect(Aspect::Ember)
                .with_description("Deal 60 DMG (5 Ticks)"),
            CardTemplate::new(PREPARED_STRIKE, "Prepared Strike", CardKind::Attack, 10)
                .with_shuffle_bonus(10)
                .with_description("Deal 10 DMG. +10 DMG each time you shuffle with this card in hand."),
            CardTemplate::new(GUARD, "Defend", CardKind::Block, 12)
                .with_description("Gain 12 Block"),
        ];
        for template in templates {
            catalog.register(template);
        }

        catalog.reward_pool = vec![
            STRIKE, DEFEND, BASH, QUICK_SHIV, PYROBLAST, LEECH, IRON_WALL, FORTRESS, INFERNO,
        ];
        catalog.linear_starter = vec![PREPARED_STRIKE, PREPARED_STRIKE, GUARD, GUARD];
        catalog.tableau_starter = vec![
            STRIKE, STRIKE, STRIKE, STRIKE, DEFEND, DEFEND, QUICK_SHIV, QUICK_SHIV, BASH, LEECH,
            PYROBLAST, IRON_WALL,
        ];
        catalog
    }

    /// Register a template.
    ///
    /// Panics if a template with the same ID already exists.
    pub fn register(&mut self, template: CardTemplate) {
        if self.templates.contains_key(&template.id) {
            panic!("Template with ID {:?} already registered", template.id);
        }
        self.templates.insert(template.id, template);
    }

    /// Replace the reward pool.
    #[must_use]
    pub fn with_reward_pool(mut self, pool: Vec<TemplateId>) -> Self {
        self.reward_pool = pool;
        self
    }

    /// Replace the linear-variant starter deck.
    #[must_use]
    pub fn with_linear_starter(mut self, starter: Vec<TemplateId>) -> Self {
        self.linear_starter = starter;
        self
    }

    /// Replace the tableau-variant starter deck.
    #[must_use]
    pub fn with_tableau_starter(mut self, starter: Vec<TemplateId>) -> Self {
        self.tableau_starter = starter;
        self
    }

    /// Get a template by ID.
    #[must_use]
    pub fn get(&self, id: TemplateId) -> Option<&CardTemplate> {
        self.templates.get(&id)
    }

    /// Number of registered templates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    #[must_use]
    pub fn reward_pool(&self) -> &[TemplateId] {
        &self.reward_pool
    }

    #[must_use]
    pub fn linear_starter(&self) -> &[TemplateId] {
        &self.linear_starter
    }

    #[must_use]
    pub fn tableau_starter(&self) -> &[TemplateId] {
        &self.tableau_starter
    }

    /// Stamp a fresh card from a template.
    ///
    /// Returns `None` for an unknown template.
    pub fn stamp(&self, id: TemplateId, alloc: &mut impl IdAllocator) -> Option<Card> {
        let template = self.get(id)?;
        Some(Card::stamp(template, alloc.next_id()))
    }

    /// Stamp one card per listed template, skipping unknown ids.
    pub fn stamp_all(&self, list: &[TemplateId], alloc: &mut impl IdAllocator) -> Vec<Card> {
        list.iter().filter_map(|&id| self.stamp(id, alloc)).collect()
    }

    /// Roll `count` reward cards uniformly (with replacement) from the pool.
    pub fn roll_rewards(
        &self,
        count: usize,
        rng: &mut impl RandomSource,
        alloc: &mut impl IdAllocator,
    ) -> Vec<Card> {
        (0..count)
            .filter_map(|_| rng.choose(&self.reward_pool).copied())
            .filter_map(|id| self.stamp(id, alloc))
            .collect()
    }
}
