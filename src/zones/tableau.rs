//! Solitaire-variant containers: stock, waste and the tableau piles.
//!
//! Ordering conventions:
//! - `stock` is consumed from the front and is entirely face-down.
//! - `waste` and every pile grow at the back; only the last card is
//!   face-up and playable.
//!
//! Every mutating method validates first and mutates second, so a
//! rejected command leaves the containers untouched.

use im::Vector;
use smallvec::SmallVec;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{CardView, PileRef, Table, TableView};
use crate::cards::{Card, Catalog};
use crate::core::{CardId, CommandResult, RandomSource, Rejected, RulesConfig, TemplateId};

/// Result of a stock draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Draw {
    /// One card moved from stock to waste.
    Drew(CardId),
    /// The waste was turned back into the stock.
    Recycled(usize),
}

/// Stock, waste and tableau piles.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tableau {
    stock: Vector<Card>,
    waste: Vector<Card>,
    piles: SmallVec<[Vector<Card>; 3]>,
    selected: Option<CardId>,
}

/// Snapshot of a [`Tableau`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableauView {
    pub stock: Vec<CardView>,
    pub waste: Vec<CardView>,
    pub piles: Vec<Vec<CardView>>,
    pub selected: Option<CardId>,
}

impl Tableau {
    /// Empty containers with `pile_count` piles.
    #[must_use]
    pub fn with_piles(pile_count: usize) -> Self {
        Self {
            piles: (0..pile_count).map(|_| Vector::new()).collect(),
            ..Self::default()
        }
    }

    /// Shuffle `cards` and deal them.
    ///
    /// Cards go round-robin into the piles, `pile_depth` rounds deep; the
    /// last card placed on each pile is turned face-up. Whatever is left
    /// becomes the face-down stock.
    pub fn deal(
        mut cards: Vec<Card>,
        pile_count: usize,
        pile_depth: usize,
        rng: &mut impl RandomSource,
    ) -> Self {
        rng.shuffle(&mut cards);

        let mut table = Self::with_piles(pile_count);
        let mut remaining = cards.into_iter().map(|mut card| {
            card.flip_down();
            card
        });

        'deal: for _ in 0..pile_depth {
            for pile in table.piles.iter_mut() {
                match remaining.next() {
                    Some(card) => pile.push_back(card),
                    None => break 'deal,
                }
            }
        }
        for pile in table.piles.iter_mut() {
            if let Some(top) = pile.back_mut() {
                top.flip_up();
            }
        }
        table.stock = remaining.collect();
        table
    }

    /// Remove every card, leaving empty containers.
    pub fn gather(&mut self) -> Vec<Card> {
        let mut cards: Vec<Card> = Vec::with_capacity(self.card_count());
        cards.extend(std::mem::take(&mut self.stock));
        cards.extend(std::mem::take(&mut self.waste));
        for pile in self.piles.iter_mut() {
            cards.extend(std::mem::take(pile));
        }
        self.selected = None;
        cards
    }

    #[must_use]
    pub fn stock(&self) -> &Vector<Card> {
        &self.stock
    }

    #[must_use]
    pub fn waste(&self) -> &Vector<Card> {
        &self.waste
    }

    #[must_use]
    pub fn piles(&self) -> &[Vector<Card>] {
        &self.piles
    }

    #[must_use]
    pub fn pile(&self, index: usize) -> Option<&Vector<Card>> {
        self.piles.get(index)
    }

    #[must_use]
    pub fn selected(&self) -> Option<CardId> {
        self.selected
    }

    /// Draw one card from the stock, or recycle the waste when the stock
    /// is empty.
    pub fn draw(&mut self) -> CommandResult<Draw> {
        if let Some(mut card) = self.stock.pop_front() {
            if let Some(previous) = self.waste.back_mut() {
                previous.flip_down();
            }
            card.flip_up();
            let id = card.id;
            self.waste.push_back(card);
            self.prune_selection();
            return Ok(Draw::Drew(id));
        }

        if self.waste.is_empty() {
            return Err(Rejected::NothingToDraw);
        }

        let count = self.waste.len();
        let mut recycled = std::mem::take(&mut self.waste);
        while let Some(mut card) = recycled.pop_back() {
            card.flip_down();
            self.stock.push_back(card);
        }
        self.selected = None;
        debug!(count, "waste recycled into stock");
        Ok(Draw::Recycled(count))
    }

    /// The container holding `id` as its playable top card.
    #[must_use]
    pub fn locate(&self, id: CardId) -> Option<PileRef> {
        let is_top = |pile: &Vector<Card>| pile.back().is_some_and(|c| c.id == id && c.face_up);

        if is_top(&self.waste) {
            return Some(PileRef::Waste);
        }
        self.piles.iter().position(is_top).map(PileRef::Tableau)
    }

    /// The playable top card with this id.
    #[must_use]
    pub fn playable(&self, id: CardId) -> Option<&Card> {
        let pile = self.locate(id)?;
        self.container(pile)?.back()
    }

    /// Toggle selection of a playable top card.
    ///
    /// Selecting another card replaces the current selection. Returns the
    /// selection after the toggle.
    pub fn toggle_select(&mut self, id: CardId) -> CommandResult<Option<CardId>> {
        if self.locate(id).is_none() {
            return Err(Rejected::NotPlayable(id));
        }
        self.selected = if self.selected == Some(id) { None } else { Some(id) };
        Ok(self.selected)
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Remove a playable top card and reveal the card under it.
    pub fn take(&mut self, id: CardId) -> CommandResult<(Card, PileRef)> {
        let source = self.locate(id).ok_or(Rejected::NotPlayable(id))?;
        let card = self
            .container_mut(source)
            .and_then(Vector::pop_back)
            .ok_or(Rejected::NotPlayable(id))?;
        self.reveal_top(source);
        self.prune_selection();
        Ok((card, source))
    }

    /// Check a move without performing it. Returns the source container.
    pub fn check_move(&self, id: CardId, target: PileRef) -> CommandResult<PileRef> {
        let source = self.locate(id).ok_or(Rejected::NotPlayable(id))?;
        let PileRef::Tableau(index) = target else {
            return Err(Rejected::NoSuchPile(target));
        };
        let pile = self.piles.get(index).ok_or(Rejected::NoSuchPile(target))?;
        if source == target {
            return Err(Rejected::SamePile(id, target));
        }

        let moving = self.playable(id).ok_or(Rejected::NotPlayable(id))?;
        match pile.back() {
            Some(top) if !moving.polarity().stacks_on(top.polarity()) => {
                Err(Rejected::SamePolarity { card: id, target })
            }
            _ => Ok(source),
        }
    }

    /// Move a playable top card onto a tableau pile.
    ///
    /// The pile must be empty or topped by a card of opposite polarity.
    /// The card it lands on is turned face-down; the card uncovered at the
    /// source is turned face-up.
    pub fn move_card(&mut self, id: CardId, target: PileRef) -> CommandResult<PileRef> {
        let source = self.check_move(id, target)?;
        let PileRef::Tableau(index) = target else {
            return Err(Rejected::NoSuchPile(target));
        };

        let card = self
            .container_mut(source)
            .and_then(Vector::pop_back)
            .ok_or(Rejected::NotPlayable(id))?;
        self.reveal_top(source);

        let pile = &mut self.piles[index];
        if let Some(buried) = pile.back_mut() {
            buried.flip_down();
        }
        pile.push_back(card);
        self.prune_selection();
        Ok(source)
    }

    /// Visibility invariant: stock fully face-down, and in the waste and
    /// every pile only the last card may be face-up.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        let buried_down = |pile: &Vector<Card>| {
            let len = pile.len();
            pile.iter().take(len.saturating_sub(1)).all(|c| !c.face_up)
        };
        self.stock.iter().all(|c| !c.face_up)
            && buried_down(&self.waste)
            && self.piles.iter().all(buried_down)
            && self.piles.iter().all(|p| p.back().map_or(true, |c| c.face_up))
            && self.selected.map_or(true, |id| self.locate(id).is_some())
    }

    fn container(&self, pile: PileRef) -> Option<&Vector<Card>> {
        match pile {
            PileRef::Stock => Some(&self.stock),
            PileRef::Waste => Some(&self.waste),
            PileRef::Tableau(i) => self.piles.get(i),
        }
    }

    fn container_mut(&mut self, pile: PileRef) -> Option<&mut Vector<Card>> {
        match pile {
            PileRef::Stock => Some(&mut self.stock),
            PileRef::Waste => Some(&mut self.waste),
            PileRef::Tableau(i) => self.piles.get_mut(i),
        }
    }

    fn reveal_top(&mut self, pile: PileRef) {
        if pile == PileRef::Stock {
            return;
        }
        if let Some(top) = self.container_mut(pile).and_then(Vector::back_mut) {
            top.flip_up();
        }
    }

    fn prune_selection(&mut self) {
        if let Some(id) = self.selected {
            if self.locate(id).is_none() {
                self.selected = None;
            }
        }
    }
}

impl Table for Tableau {
    const STRANDED_WHEN_EXHAUSTED: bool = false;

    fn starter(catalog: &Catalog) -> &[TemplateId] {
        catalog.tableau_starter()
    }

    fn new_run(cards: Vec<Card>, rules: &RulesConfig, _rng: &mut impl RandomSource) -> Self {
        let mut table = Self::with_piles(rules.pile_count);
        table.add_cards(cards);
        table
    }

    fn begin_fight(&mut self, rules: &RulesConfig, rng: &mut impl RandomSource) {
        let cards = self.gather();
        *self = Self::deal(cards, rules.pile_count, rules.pile_depth, rng);
    }

    fn add_cards(&mut self, cards: Vec<Card>) {
        self.stock.extend(cards.into_iter().map(|mut card| {
            card.flip_down();
            card
        }));
    }

    fn is_exhausted(&self) -> bool {
        self.card_count() == 0
    }

    fn cards(&self) -> Vec<&Card> {
        self.stock
            .iter()
            .chain(self.waste.iter())
            .chain(self.piles.iter().flat_map(|p| p.iter()))
            .collect()
    }

    fn card_count(&self) -> usize {
        self.stock.len() + self.waste.len() + self.piles.iter().map(Vector::len).sum::<usize>()
    }

    fn fits(&self, rules: &RulesConfig) -> bool {
        self.piles.len() == rules.pile_count
    }

    fn view(&self) -> TableView {
        let render = |pile: &Vector<Card>| pile.iter().map(CardView::of).collect::<Vec<_>>();
        TableView::Tableau(TableauView {
            stock: render(&self.stock),
            waste: render(&self.waste),
            piles: self.piles.iter().map(render).collect(),
            selected: self.selected,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{ids, CardKind};
    use crate::core::{GameRng, ScriptedRng, SequentialIds};

    fn stamp(list: &[TemplateId]) -> Vec<Card> {
        Catalog::standard().stamp_all(list, &mut SequentialIds::new())
    }

    /// Deal without shuffling: the scripted rolls keep the input order.
    fn dealt(list: &[TemplateId]) -> Tableau {
        let cards = stamp(list);
        let mut rng = ScriptedRng::new(vec![0.999; cards.len()]);
        Tableau::deal(cards, 3, 3, &mut rng)
    }

    fn top_id(table: &Tableau, pile: usize) -> CardId {
        table.pile(pile).unwrap().back().unwrap().id
    }

    #[test]
    fn test_deal_shape() {
        let catalog = Catalog::standard();
        let cards = stamp(catalog.tableau_starter());
        let mut rng = GameRng::new(42);

        let table = Tableau::deal(cards, 3, 3, &mut rng);

        assert_eq!(table.piles().len(), 3);
        assert!(table.piles().iter().all(|p| p.len() == 3));
        assert_eq!(table.stock().len(), 3);
        assert!(table.waste().is_empty());
        assert!(table.is_consistent());
        for pile in table.piles() {
            let face_up: Vec<_> = pile.iter().map(|c| c.face_up).collect();
            assert_eq!(face_up, vec![false, false, true]);
        }
    }

    #[test]
    fn test_deal_round_robin_order() {
        use ids::*;
        let table = dealt(&[STRIKE, DEFEND, BASH, QUICK_SHIV, LEECH, IRON_WALL]);

        // Six cards, three piles: two rounds.
        let names = |i: usize| -> Vec<String> {
            table.pile(i).unwrap().iter().map(|c| c.name.clone()).collect()
        };
        assert_eq!(names(0), vec!["Strike", "Quick Shiv"]);
        assert_eq!(names(1), vec!["Defend", "Leech"]);
        assert_eq!(names(2), vec!["Bash", "Iron Wall"]);
        assert!(table.stock().is_empty());
    }

    #[test]
    fn test_short_deal_reveals_partial_piles() {
        let table = dealt(&[ids::STRIKE, ids::DEFEND]);

        assert_eq!(table.pile(0).unwrap().len(), 1);
        assert_eq!(table.pile(1).unwrap().len(), 1);
        assert!(table.pile(2).unwrap().is_empty());
        assert!(table.is_consistent());
    }

    #[test]
    fn test_draw_then_recycle_conserves() {
        let catalog = Catalog::standard();
        let mut table = Tableau::deal(
            stamp(catalog.tableau_starter()),
            3,
            3,
            &mut GameRng::new(1),
        );
        let stock_order: Vec<_> = table.stock().iter().map(|c| c.id).collect();
        let total = table.stock().len() + table.waste().len();

        for expected in &stock_order {
            assert_eq!(table.draw(), Ok(Draw::Drew(*expected)));
            assert_eq!(table.stock().len() + table.waste().len(), total);
            assert!(table.is_consistent());
        }
        assert!(table.waste().back().unwrap().face_up);

        assert_eq!(table.draw(), Ok(Draw::Recycled(3)));
        assert_eq!(table.stock().len(), 3);
        assert!(table.waste().is_empty());
        assert!(table.stock().iter().all(|c| !c.face_up));

        // Recycling reverses the waste.
        let recycled: Vec<_> = table.stock().iter().map(|c| c.id).collect();
        let mut reversed = stock_order.clone();
        reversed.reverse();
        assert_eq!(recycled, reversed);
    }

    #[test]
    fn test_draw_from_nothing_is_rejected() {
        let mut table = dealt(&[ids::STRIKE]);
        let before = table.clone();

        assert_eq!(table.draw(), Err(Rejected::NothingToDraw));
        assert_eq!(table, before);
    }

    #[test]
    fn test_only_tops_are_playable() {
        let table = dealt(ids_nine());
        let buried = table.pile(0).unwrap()[0].id;

        assert!(table.locate(buried).is_none());
        assert_eq!(table.locate(top_id(&table, 0)), Some(PileRef::Tableau(0)));
    }

    #[test]
    fn test_select_toggles_and_replaces() {
        let mut table = dealt(ids_nine());
        let a = top_id(&table, 0);
        let b = top_id(&table, 1);

        assert_eq!(table.toggle_select(a), Ok(Some(a)));
        assert_eq!(table.toggle_select(b), Ok(Some(b)));
        assert_eq!(table.toggle_select(b), Ok(None));

        let buried = table.pile(0).unwrap()[0].id;
        assert_eq!(table.toggle_select(buried), Err(Rejected::NotPlayable(buried)));
    }

    #[test]
    fn test_take_reveals_new_top() {
        let mut table = dealt(ids_nine());
        let top = top_id(&table, 1);
        table.toggle_select(top).unwrap();

        let (card, source) = table.take(top).unwrap();

        assert_eq!(card.id, top);
        assert_eq!(source, PileRef::Tableau(1));
        assert_eq!(table.pile(1).unwrap().len(), 2);
        assert!(table.pile(1).unwrap().back().unwrap().face_up);
        assert_eq!(table.selected(), None);
        assert!(table.is_consistent());
    }

    #[test]
    fn test_take_from_waste_reveals_previous_draw() {
        let mut table = dealt(&[
            ids::STRIKE, ids::STRIKE, ids::STRIKE, ids::DEFEND, ids::DEFEND, ids::DEFEND,
            ids::BASH, ids::BASH, ids::BASH, ids::LEECH, ids::IRON_WALL,
        ]);
        let Ok(Draw::Drew(first)) = table.draw() else { panic!("expected draw") };
        let Ok(Draw::Drew(second)) = table.draw() else { panic!("expected draw") };
        assert!(table.locate(first).is_none());

        table.take(second).unwrap();

        assert_eq!(table.locate(first), Some(PileRef::Waste));
    }

    #[test]
    fn test_move_warm_onto_warm_rejected() {
        use ids::*;
        // Pile tops after two rounds: QUICK_SHIV(warm), LEECH(warm), IRON_WALL(cool)
        let mut table = dealt(&[STRIKE, DEFEND, BASH, QUICK_SHIV, LEECH, IRON_WALL]);
        let before = table.clone();
        let shiv = top_id(&table, 0);

        let result = table.move_card(shiv, PileRef::Tableau(1));

        assert_eq!(
            result,
            Err(Rejected::SamePolarity { card: shiv, target: PileRef::Tableau(1) })
        );
        assert_eq!(table, before);
    }

    #[test]
    fn test_move_warm_onto_cool() {
        use ids::*;
        let mut table = dealt(&[STRIKE, DEFEND, BASH, QUICK_SHIV, LEECH, IRON_WALL]);
        let shiv = top_id(&table, 0);

        assert_eq!(table.move_card(shiv, PileRef::Tableau(2)), Ok(PileRef::Tableau(0)));

        let target = table.pile(2).unwrap();
        assert_eq!(target.len(), 3);
        assert_eq!(target.back().unwrap().id, shiv);
        assert!(!target[1].face_up);
        // Source revealed its next card.
        assert!(table.pile(0).unwrap().back().unwrap().face_up);
        assert!(table.is_consistent());
    }

    #[test]
    fn test_move_onto_empty_pile() {
        let mut table = dealt(&[ids::STRIKE, ids::BASH]);
        let strike = top_id(&table, 0);

        assert!(table.move_card(strike, PileRef::Tableau(2)).is_ok());
        assert!(table.pile(0).unwrap().is_empty());
        assert_eq!(table.pile(2).unwrap().len(), 1);
    }

    #[test]
    fn test_move_validation() {
        let mut table = dealt(ids_nine());
        let top = top_id(&table, 0);

        assert_eq!(
            table.move_card(top, PileRef::Tableau(0)),
            Err(Rejected::SamePile(top, PileRef::Tableau(0)))
        );
        assert_eq!(
            table.move_card(top, PileRef::Tableau(7)),
            Err(Rejected::NoSuchPile(PileRef::Tableau(7)))
        );
        assert_eq!(
            table.move_card(top, PileRef::Waste),
            Err(Rejected::NoSuchPile(PileRef::Waste))
        );
    }

    #[test]
    fn test_gather_and_redeal_keeps_every_card() {
        let catalog = Catalog::standard();
        let mut table = Tableau::new_run(
            stamp(catalog.tableau_starter()),
            &RulesConfig::default(),
            &mut GameRng::new(3),
        );
        let mut rng = GameRng::new(3);
        table.begin_fight(&RulesConfig::default(), &mut rng);
        table.draw().unwrap();

        let mut before: Vec<_> = table.cards().iter().map(|c| c.id).collect();
        table.begin_fight(&RulesConfig::default(), &mut rng);
        let mut after: Vec<_> = table.cards().iter().map(|c| c.id).collect();

        before.sort();
        after.sort();
        assert_eq!(before, after);
        assert!(table.is_consistent());
    }

    #[test]
    fn test_view_hides_face_down_cards() {
        let table = dealt(ids_nine());
        let TableView::Tableau(view) = table.view() else { panic!("expected tableau view") };

        for pile in &view.piles {
            assert!(!pile[0].is_visible());
            assert!(pile[2].is_visible());
        }
        assert_eq!(table.card_count(), 9);
        assert!(table.cards().iter().any(|c| c.kind == CardKind::Block));
    }

    fn ids_nine() -> &'static [TemplateId] {
        use ids::*;
        &[STRIKE, DEFEND, BASH, QUICK_SHIV, LEECH, IRON_WALL, STRIKE, DEFEND, FORTRESS]
    }
}
