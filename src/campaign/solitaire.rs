//! Commands of the solitaire variant.

use tracing::debug;

use super::engine::{traced, Engine, Outcome};
use super::state::View;
use crate::combat::Resolution;
use crate::core::{CardId, CommandResult, PlayCost, RandomSource, Rejected};
use crate::zones::{Draw, PileRef, Tableau};

impl<R: RandomSource> Engine<Tableau, R> {
    /// Draw one card from the stock, or recycle the waste.
    pub fn draw_from_stock(&mut self) -> CommandResult<Outcome> {
        traced("draw_from_stock", self.try_draw())
    }

    fn try_draw(&mut self) -> CommandResult<Outcome> {
        self.require(View::Combat)?;
        let table = &self.state.table;
        if table.stock().is_empty() && table.waste().is_empty() {
            return Err(Rejected::NothingToDraw);
        }

        let breach = self.resolve_time(self.rules.draw_cost);
        match self.state.table.draw()? {
            Draw::Drew(id) => {
                let name = self
                    .state
                    .table
                    .playable(id)
                    .map(|card| card.name.clone())
                    .unwrap_or_default();
                self.state.log.push(format!("DRAW: {name}."));
                debug!(card = %id, "drew from stock");
            }
            Draw::Recycled(_) => {
                self.state.log.push("RECYCLE: Waste returned to stock.");
            }
        }
        Ok(self.settle(Resolution { breach, effect: None }))
    }

    /// Toggle selection of a face-up top card. Free.
    pub fn select_card(&mut self, id: CardId) -> CommandResult<Option<CardId>> {
        traced("select_card", self.try_select(id))
    }

    fn try_select(&mut self, id: CardId) -> CommandResult<Option<CardId>> {
        self.require(View::Combat)?;
        self.state.table.toggle_select(id)
    }

    /// The currently selected card.
    #[must_use]
    pub fn selected(&self) -> Option<CardId> {
        self.state.table.selected()
    }

    /// Play the selected card.
    pub fn play_selected(&mut self) -> CommandResult<Outcome> {
        traced("play_selected", self.try_play_selected())
    }

    fn try_play_selected(&mut self) -> CommandResult<Outcome> {
        self.require(View::Combat)?;
        let id = self.state.table.selected().ok_or(Rejected::NothingSelected)?;
        self.play_top(id)
    }

    /// Select and play a face-up top card in one step.
    pub fn play_card(&mut self, id: CardId) -> CommandResult<Outcome> {
        traced("play_card", self.try_play_card(id))
    }

    fn try_play_card(&mut self, id: CardId) -> CommandResult<Outcome> {
        self.require(View::Combat)?;
        self.play_top(id)
    }

    /// Move a face-up top card onto tableau pile `pile`. Free.
    ///
    /// Returns where the card came from.
    pub fn move_card(&mut self, id: CardId, pile: usize) -> CommandResult<PileRef> {
        traced("move_card", self.try_move(id, pile))
    }

    fn try_move(&mut self, id: CardId, pile: usize) -> CommandResult<PileRef> {
        self.require(View::Combat)?;
        let source = self.state.table.move_card(id, PileRef::Tableau(pile))?;
        debug!(card = %id, from = %source, to = pile, "card moved");
        Ok(source)
    }

    fn play_top(&mut self, id: CardId) -> CommandResult<Outcome> {
        let (card, source) = self.state.table.take(id)?;
        let cost = match self.rules.tableau_play_cost {
            PlayCost::Flat(ticks) => ticks,
            PlayCost::CardCost => card.cost_or(self.rules.default_card_cost),
        };
        debug!(card = %id, from = %source, "playing from tableau");

        let resolution = self.resolve_play(&card, cost);
        Ok(self.settle(resolution))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::campaign::EngineBuilder;
    use crate::core::{RulesConfig, ScriptedRng};
    use crate::zones::Table;

    /// Deterministic deal: all-zero rolls.
    fn game() -> Engine<Tableau, ScriptedRng> {
        EngineBuilder::new().build_with_rng(ScriptedRng::default())
    }

    fn top(game: &Engine<Tableau, ScriptedRng>, pile: usize) -> CardId {
        game.table().pile(pile).unwrap().back().unwrap().id
    }

    #[test]
    fn test_play_card_costs_one_tick() {
        let mut g = game();
        let id = top(&g, 0);

        let outcome = g.play_card(id).unwrap();

        assert!(outcome.breach.is_none());
        assert_eq!(outcome.effect.unwrap().card, id);
        assert_eq!(g.ledger().ticks, 1);
        assert_eq!(g.table().card_count(), 11);
        assert!(g.log().latest().unwrap().starts_with("PLAY: "));
    }

    #[test]
    fn test_play_selected() {
        let mut g = game();
        assert_eq!(g.play_selected(), Err(Rejected::NothingSelected));

        let id = top(&g, 2);
        assert_eq!(g.select_card(id), Ok(Some(id)));
        assert_eq!(g.selected(), Some(id));

        g.play_selected().unwrap();
        assert_eq!(g.selected(), None);
        assert!(g.table().locate(id).is_none());
    }

    #[test]
    fn test_card_cost_rule() {
        let rules = RulesConfig::default().with_tableau_play_cost(PlayCost::CardCost);
        let mut g: Engine<Tableau, ScriptedRng> =
            EngineBuilder::new().rules(rules).build_with_rng(ScriptedRng::default());
        let id = top(&g, 1);
        let cost = g.table().playable(id).unwrap().cost_or(2);

        g.play_card(id).unwrap();

        assert_eq!(g.ledger().ticks, cost);
    }

    #[test]
    fn test_draw_costs_two_ticks_and_logs() {
        let mut g = game();

        let outcome = g.draw_from_stock().unwrap();

        assert!(outcome.breach.is_none());
        assert_eq!(g.ledger().ticks, 2);
        assert_eq!(g.table().waste().len(), 1);
        let name = &g.table().waste().back().unwrap().name;
        assert_eq!(g.log().latest(), Some(format!("DRAW: {name}.").as_str()));
    }

    #[test]
    fn test_recycle_logs() {
        let mut g = game();
        for _ in 0..3 {
            g.draw_from_stock().unwrap();
        }

        g.draw_from_stock().unwrap();

        assert_eq!(g.log().latest(), Some("RECYCLE: Waste returned to stock."));
        assert_eq!(g.table().stock().len(), 3);
        assert_eq!(g.ledger().ticks, 8);
    }

    #[test]
    fn test_rejected_move_is_silent() {
        let mut g = game();
        let id = top(&g, 0);
        let before = g.snapshot();

        assert!(g.move_card(id, 0).is_err());
        assert!(g.move_card(id, 9).is_err());
        assert_eq!(g.snapshot(), before);
    }

    #[test]
    fn test_commands_rejected_outside_combat() {
        let mut g = game();
        g.state.view = View::Victory;
        let id = top(&g, 0);

        assert_eq!(g.draw_from_stock(), Err(Rejected::WrongView(View::Victory)));
        assert_eq!(g.play_card(id), Err(Rejected::WrongView(View::Victory)));
        assert_eq!(g.select_card(id), Err(Rejected::WrongView(View::Victory)));
    }
}
