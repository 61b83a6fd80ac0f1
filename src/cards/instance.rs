//! Card instances - runtime card state.
//!
//! A `Card` is stamped from a template with a fresh identity. It carries a
//! copy of the template's numbers so a pile snapshot renders without a
//! catalog lookup, plus the two pieces of mutable state:
//!
//! - `face_up`: visibility in the tableau variant
//! - `bonus`: value accumulated from shuffles (Prepared Strike)

use serde::{Deserialize, Serialize};

use super::definition::{Aspect, CardKind, CardTemplate, Polarity};
use crate::core::{CardId, TemplateId};

/// A concrete card in play.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    /// Unique identity, never reused within a run.
    pub id: CardId,

    /// Template this card was stamped from.
    pub template: TemplateId,

    pub name: String,
    pub kind: CardKind,
    pub aspect: Aspect,

    /// Base magnitude.
    pub value: u32,

    /// Tick cost; `None` means the rules default.
    pub cost: Option<u32>,

    /// HP restored on play.
    pub heal: Option<u32>,

    /// Per-shuffle growth, if any.
    pub shuffle_bonus: Option<u32>,

    pub description: String,

    /// Visible to the player. Only top cards of waste and piles are face-up.
    pub face_up: bool,

    /// Value gained from shuffles so far.
    #[serde(default)]
    pub bonus: u32,
}

impl Card {
    /// Stamp a face-down card from a template.
    #[must_use]
    pub fn stamp(template: &CardTemplate, id: CardId) -> Self {
        Self {
            id,
            template: template.id,
            name: template.name.clone(),
            kind: template.kind,
            aspect: template.aspect,
            value: template.value,
            cost: template.cost,
            heal: template.heal,
            shuffle_bonus: template.shuffle_bonus,
            description: template.description.clone(),
            face_up: false,
            bonus: 0,
        }
    }

    /// Stacking polarity.
    #[must_use]
    pub fn polarity(&self) -> Polarity {
        self.kind.polarity()
    }

    /// Tick cost, falling back to `default` when the template left it unset.
    #[must_use]
    pub fn cost_or(&self, default: u32) -> u32 {
        self.cost.unwrap_or(default)
    }

    /// Magnitude including any accumulated shuffle bonus.
    #[must_use]
    pub fn effective_value(&self) -> u32 {
        self.value.saturating_add(self.bonus)
    }

    /// Apply one shuffle at the front of the deck.
    ///
    /// Returns the new bonus if the card grows from shuffles.
    pub fn record_shuffle(&mut self) -> Option<u32> {
        let step = self.shuffle_bonus?;
        self.bonus = self.bonus.saturating_add(step);
        Some(self.bonus)
    }

    pub fn flip_up(&mut self) {
        self.face_up = true;
    }

    pub fn flip_down(&mut self) {
        self.face_up = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prepared_strike() -> CardTemplate {
        CardTemplate::new(TemplateId::new(10), "Prepared Strike", CardKind::Attack, 10)
            .with_shuffle_bonus(10)
    }

    #[test]
    fn test_stamp_is_face_down() {
        let card = Card::stamp(&prepared_strike(), CardId::new(4));

        assert_eq!(card.id, CardId::new(4));
        assert_eq!(card.template, TemplateId::new(10));
        assert!(!card.face_up);
        assert_eq!(card.bonus, 0);
    }

    #[test]
    fn test_cost_default() {
        let card = Card::stamp(&prepared_strike(), CardId::new(1));
        assert_eq!(card.cost_or(2), 2);

        let bash = CardTemplate::new(TemplateId::new(3), "Bash", CardKind::Attack, 20).with_cost(3);
        assert_eq!(Card::stamp(&bash, CardId::new(2)).cost_or(2), 3);
    }

    #[test]
    fn test_shuffle_bonus_accumulates() {
        let mut card = Card::stamp(&prepared_strike(), CardId::new(1));

        assert_eq!(card.record_shuffle(), Some(10));
        assert_eq!(card.record_shuffle(), Some(20));
        assert_eq!(card.effective_value(), 30);
    }

    #[test]
    fn test_plain_card_ignores_shuffles() {
        let strike = CardTemplate::new(TemplateId::new(0), "Strike", CardKind::Attack, 12);
        let mut card = Card::stamp(&strike, CardId::new(1));

        assert_eq!(card.record_shuffle(), None);
        assert_eq!(card.effective_value(), 12);
    }

    #[test]
    fn test_flip() {
        let mut card = Card::stamp(&prepared_strike(), CardId::new(1));
        card.flip_up();
        assert!(card.face_up);
        card.flip_down();
        assert!(!card.face_up);
    }
}
