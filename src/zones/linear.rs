//! Linear-variant container: one sequential deck plus a hold slot.
//!
//! The front of `deck` is the active card. Nothing is concealed in this
//! variant, so every card is kept face-up.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::{Table, TableView};
use crate::cards::{Card, Catalog};
use crate::core::{BonusReset, CardId, CommandResult, RandomSource, Rejected, RulesConfig, TemplateId};

/// What a hold action did.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum HoldMove {
    /// The active card went into the empty hold slot.
    Stashed(CardId),
    /// The held card replaced the active card, which is now held.
    Swapped { released: CardId, stashed: CardId },
    /// The deck was empty; the held card became the whole deck.
    Released(CardId),
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinearDeck {
    deck: Vector<Card>,
    held: Option<Card>,
}

/// Snapshot of a [`LinearDeck`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinearView {
    pub active: Option<Card>,
    pub next: Option<Card>,
    pub held: Option<Card>,
    pub deck_count: usize,
}

impl LinearDeck {
    #[must_use]
    pub fn new(cards: impl IntoIterator<Item = Card>) -> Self {
        let mut deck = Self::default();
        deck.add_cards(cards.into_iter().collect());
        deck
    }

    #[must_use]
    pub fn deck(&self) -> &Vector<Card> {
        &self.deck
    }

    #[must_use]
    pub fn active(&self) -> Option<&Card> {
        self.deck.front()
    }

    #[must_use]
    pub fn next(&self) -> Option<&Card> {
        self.deck.get(1)
    }

    #[must_use]
    pub fn held(&self) -> Option<&Card> {
        self.held.as_ref()
    }

    /// Remove the active card for play.
    pub fn take_active(&mut self) -> CommandResult<Card> {
        self.deck.pop_front().ok_or(Rejected::EmptyDeck)
    }

    /// Rotate the active card to the back.
    ///
    /// Returns the card's new shuffle bonus if it grows from shuffles.
    pub fn rotate(&mut self) -> CommandResult<Option<u32>> {
        let mut card = self.deck.pop_front().ok_or(Rejected::EmptyDeck)?;
        let bonus = card.record_shuffle();
        self.deck.push_back(card);
        Ok(bonus)
    }

    /// Whether [`hold`](Self::hold) would do anything.
    #[must_use]
    pub fn can_hold(&self) -> bool {
        !self.deck.is_empty() || self.held.is_some()
    }

    /// Stash, swap or release the held card.
    pub fn hold(&mut self) -> CommandResult<HoldMove> {
        match (self.deck.pop_front(), self.held.take()) {
            (Some(active), None) => {
                let id = active.id;
                self.held = Some(active);
                Ok(HoldMove::Stashed(id))
            }
            (Some(active), Some(held)) => {
                let released = held.id;
                let stashed = active.id;
                self.deck.push_front(held);
                self.held = Some(active);
                Ok(HoldMove::Swapped { released, stashed })
            }
            (None, Some(held)) => {
                let id = held.id;
                self.deck.push_back(held);
                Ok(HoldMove::Released(id))
            }
            (None, None) => Err(Rejected::EmptyDeck),
        }
    }

    /// Return the held card to the back of the deck.
    pub fn return_held(&mut self) -> Option<CardId> {
        let card = self.held.take()?;
        let id = card.id;
        self.deck.push_back(card);
        Some(id)
    }

    pub fn reset_bonuses(&mut self) {
        for card in self.deck.iter_mut() {
            card.bonus = 0;
        }
        if let Some(card) = self.held.as_mut() {
            card.bonus = 0;
        }
    }

    /// Shuffle the whole deck in place.
    pub fn shuffle_deck(&mut self, rng: &mut impl RandomSource) {
        let mut cards: Vec<Card> = std::mem::take(&mut self.deck).into_iter().collect();
        rng.shuffle(&mut cards);
        self.deck = cards.into_iter().collect();
    }
}

impl Table for LinearDeck {
    const STRANDED_WHEN_EXHAUSTED: bool = true;

    fn starter(catalog: &Catalog) -> &[TemplateId] {
        catalog.linear_starter()
    }

    fn new_run(cards: Vec<Card>, _rules: &RulesConfig, rng: &mut impl RandomSource) -> Self {
        let mut deck = Self::new(cards);
        deck.shuffle_deck(rng);
        deck
    }

    fn begin_fight(&mut self, rules: &RulesConfig, _rng: &mut impl RandomSource) {
        self.return_held();
        if rules.bonus_reset == BonusReset::PerFight {
            self.reset_bonuses();
        }
    }

    fn add_cards(&mut self, cards: Vec<Card>) {
        self.deck.extend(cards.into_iter().map(|mut card| {
            card.flip_up();
            card
        }));
    }

    fn is_exhausted(&self) -> bool {
        !self.can_hold()
    }

    fn cards(&self) -> Vec<&Card> {
        self.deck.iter().chain(self.held.iter()).collect()
    }

    fn card_count(&self) -> usize {
        self.deck.len() + usize::from(self.held.is_some())
    }

    fn view(&self) -> TableView {
        TableView::Linear(LinearView {
            active: self.active().cloned(),
            next: self.next().cloned(),
            held: self.held.clone(),
            deck_count: self.deck.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::ids;
    use crate::core::{ScriptedRng, SequentialIds};

    fn deck(list: &[TemplateId]) -> LinearDeck {
        LinearDeck::new(Catalog::standard().stamp_all(list, &mut SequentialIds::new()))
    }

    fn order(deck: &LinearDeck) -> Vec<CardId> {
        deck.deck().iter().map(|c| c.id).collect()
    }

    #[test]
    fn test_cards_are_face_up() {
        let d = deck(&[ids::GUARD, ids::PREPARED_STRIKE]);
        assert!(d.cards().iter().all(|c| c.face_up));
        assert_eq!(d.active().unwrap().name, "Defend");
        assert_eq!(d.next().unwrap().name, "Prepared Strike");
    }

    #[test]
    fn test_rotate_moves_front_to_back() {
        let mut d = deck(&[ids::GUARD, ids::STRIKE, ids::DEFEND]);
        let before = order(&d);

        assert_eq!(d.rotate(), Ok(None));

        assert_eq!(order(&d), vec![before[1], before[2], before[0]]);
    }

    #[test]
    fn test_rotate_grows_prepared_strike() {
        let mut d = deck(&[ids::PREPARED_STRIKE]);

        assert_eq!(d.rotate(), Ok(Some(10)));
        assert_eq!(d.rotate(), Ok(Some(20)));
        assert_eq!(d.active().unwrap().effective_value(), 30);
    }

    #[test]
    fn test_rotate_empty_rejected() {
        let mut d = LinearDeck::default();
        assert_eq!(d.rotate(), Err(Rejected::EmptyDeck));
    }

    #[test]
    fn test_hold_cycle() {
        let mut d = deck(&[ids::GUARD, ids::STRIKE]);
        let ids_before = order(&d);

        assert_eq!(d.hold(), Ok(HoldMove::Stashed(ids_before[0])));
        assert_eq!(order(&d), vec![ids_before[1]]);

        assert_eq!(
            d.hold(),
            Ok(HoldMove::Swapped { released: ids_before[0], stashed: ids_before[1] })
        );
        assert_eq!(order(&d), vec![ids_before[0]]);
        assert_eq!(d.held().unwrap().id, ids_before[1]);

        d.take_active().unwrap();
        assert!(!d.is_exhausted());

        assert_eq!(d.hold(), Ok(HoldMove::Released(ids_before[1])));
        assert_eq!(order(&d), vec![ids_before[1]]);
        assert!(d.held().is_none());
    }

    #[test]
    fn test_exhaustion() {
        let mut d = deck(&[ids::GUARD]);
        d.take_active().unwrap();

        assert!(d.is_exhausted());
        assert_eq!(d.hold(), Err(Rejected::EmptyDeck));
        assert_eq!(d.take_active(), Err(Rejected::EmptyDeck));
    }

    #[test]
    fn test_begin_fight_returns_held_card() {
        let mut d = deck(&[ids::PREPARED_STRIKE, ids::GUARD, ids::GUARD]);
        d.rotate().unwrap();
        d.hold().unwrap();
        let held = d.held().unwrap().id;

        d.begin_fight(&RulesConfig::default(), &mut ScriptedRng::default());

        assert!(d.held().is_none());
        assert_eq!(d.deck().back().unwrap().id, held);
        assert_eq!(d.card_count(), 3);
        // Persist is the default: the bonus survives.
        assert!(d.cards().iter().any(|c| c.bonus == 10));
    }

    #[test]
    fn test_per_fight_bonus_reset() {
        let mut d = deck(&[ids::PREPARED_STRIKE]);
        d.rotate().unwrap();
        let rules = RulesConfig::default().with_bonus_reset(BonusReset::PerFight);

        d.begin_fight(&rules, &mut ScriptedRng::default());

        assert_eq!(d.active().unwrap().bonus, 0);
    }

    #[test]
    fn test_new_run_shuffles_with_injected_source() {
        let cards = Catalog::standard()
            .stamp_all(Catalog::standard().linear_starter(), &mut SequentialIds::new());
        let ids_in: Vec<_> = cards.iter().map(|c| c.id).collect();

        // All-zero rolls: i=3 swap(3,0), i=2 swap(2,0), i=1 swap(1,0).
        let d = LinearDeck::new_run(cards, &RulesConfig::default(), &mut ScriptedRng::default());

        assert_eq!(order(&d), vec![ids_in[1], ids_in[2], ids_in[3], ids_in[0]]);
    }

    #[test]
    fn test_view() {
        let d = deck(&[ids::GUARD, ids::STRIKE, ids::DEFEND]);
        let TableView::Linear(view) = d.view() else { panic!("expected linear view") };

        assert_eq!(view.deck_count, 3);
        assert_eq!(view.active.unwrap().name, "Defend");
        assert_eq!(view.next.unwrap().name, "Strike");
        assert!(view.held.is_none());
    }
}
