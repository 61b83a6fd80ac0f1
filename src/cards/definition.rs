//! Card templates - static card data.
//!
//! `CardTemplate` holds the immutable properties of a catalog entry.
//! "Bash" deals 20 damage for 3 ticks; those numbers live here.
//!
//! Instance-specific data (identity, visibility, shuffle bonus) is stored
//! separately in `Card`.

use serde::{Deserialize, Serialize};

use crate::core::TemplateId;

/// What a card does when played.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardKind {
    /// Deals `value` damage, block first.
    Attack,
    /// Adds `value` to the player's block.
    Block,
}

impl CardKind {
    /// Stacking polarity derived from the kind.
    #[must_use]
    pub const fn polarity(self) -> Polarity {
        match self {
            CardKind::Attack => Polarity::Warm,
            CardKind::Block => Polarity::Cool,
        }
    }
}

/// Tableau stacking colour. Only alternating polarities may stack.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Polarity {
    Warm,
    Cool,
}

impl Polarity {
    /// Whether a card of this polarity may be placed on `other`.
    #[must_use]
    pub fn stacks_on(self, other: Polarity) -> bool {
        self != other
    }
}

/// Flavour tag. Has no effect on resolution.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Aspect {
    #[default]
    Steel,
    Ember,
    Blood,
    Stone,
}

/// Static card template.
///
/// ## Example
///
/// ```
/// use cinder_engine::cards::{CardKind, CardTemplate};
/// use cinder_engine::core::TemplateId;
///
/// let bash = CardTemplate::new(TemplateId::new(3), "Bash", CardKind::Attack, 20)
///     .with_cost(3);
///
/// assert_eq!(bash.cost, Some(3));
/// assert_eq!(bash.heal, None);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardTemplate {
    /// Catalog identifier.
    pub id: TemplateId,

    /// Display name.
    pub name: String,

    /// Attack or block.
    pub kind: CardKind,

    /// Flavour tag.
    pub aspect: Aspect,

    /// Base magnitude.
    pub value: u32,

    /// Tick cost; `None` means the rules default.
    pub cost: Option<u32>,

    /// HP restored on play, whatever the kind.
    pub heal: Option<u32>,

    /// Value gained per shuffle while this card is at the front of the deck.
    pub shuffle_bonus: Option<u32>,

    /// Rules text.
    pub description: String,
}

impl CardTemplate {
    /// Create a template with no cost override, heal or bonus.
    #[must_use]
    pub fn new(id: TemplateId, name: impl Into<String>, kind: CardKind, value: u32) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            aspect: Aspect::default(),
            value,
            cost: None,
            heal: None,
            shuffle_bonus: None,
            description: String::new(),
        }
    }

    /// Set an explicit tick cost.
    #[must_use]
    pub fn with_cost(mut self, cost: u32) -> Self {
        self.cost = Some(cost);
        self
    }

    /// Heal on play.
    #[must_use]
    pub fn with_heal(mut self, heal: u32) -> Self {
        self.heal = Some(heal);
        self
    }

    /// Grow by `bonus` per shuffle at the front of the deck.
    #[must_use]
    pub fn with_shuffle_bonus(mut self, bonus: u32) -> Self {
        self.shuffle_bonus = Some(bonus);
        self
    }

    #[must_use]
    pub fn with_aspect(mut self, aspect: Aspect) -> Self {
        self.aspect = aspect;
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Stacking polarity.
    #[must_use]
    pub fn polarity(&self) -> Polarity {
        self.kind.polarity()
    }
}
